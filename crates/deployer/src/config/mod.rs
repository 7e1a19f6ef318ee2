//! Resolution of the run configuration. Values are taken from the command
//! line (or environment), then the optional TOML file, then the built-in
//! defaults which describe the Lion King collection.

use {
    crate::{
        arguments::{Arguments, ParameterArguments},
        signer::Credentials,
    },
    alloy::primitives::{Address, U256},
    anyhow::Result,
    number::Ether,
    std::{path::PathBuf, time::Duration},
    url::Url,
};

pub mod file;

const DEFAULT_CONFIRMATIONS: u64 = 1;
const DEFAULT_CONFIRMATION_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// Everything a deployment run needs, resolved once at process start.
#[derive(Debug)]
pub struct Config {
    pub node_url: Url,
    pub expected_chain_id: Option<u64>,
    pub credentials: Credentials,
    pub artifacts: PathBuf,
    pub submission: Submission,
    pub parameters: DeploymentParameters,
}

#[derive(Clone, Debug)]
pub struct Submission {
    pub confirmations: u64,
    pub confirmation_timeout: Duration,
    pub rpc_timeout: Duration,
}

/// The values the contract gets constructed with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeploymentParameters {
    pub contract_name: String,
    pub token_name: String,
    pub token_symbol: String,
    pub max_supply: u64,
    pub mint_price: Ether,
    pub max_per_tx: u64,
    pub base_uri: String,
    /// `None` means the deploying account receives the royalties.
    pub royalty_receiver: Option<Address>,
    pub royalty_fee_bps: u64,
}

impl Default for DeploymentParameters {
    fn default() -> Self {
        Self {
            contract_name: "LionKing".to_string(),
            token_name: "Lion King".to_string(),
            token_symbol: "LIONK".to_string(),
            max_supply: 5000,
            // 0.03 ether
            mint_price: Ether::from_wei(U256::from(30_000_000_000_000_000_u64)),
            max_per_tx: 5,
            base_uri: "ipfs://Qm.../metadata/".to_string(),
            royalty_receiver: None,
            royalty_fee_bps: 500,
        }
    }
}

impl DeploymentParameters {
    fn resolve(args: ParameterArguments, file: &file::File) -> Self {
        let defaults = Self::default();
        Self {
            contract_name: args
                .contract_name
                .or_else(|| file.contract_name.clone())
                .unwrap_or(defaults.contract_name),
            token_name: args
                .token_name
                .or_else(|| file.token_name.clone())
                .unwrap_or(defaults.token_name),
            token_symbol: args
                .token_symbol
                .or_else(|| file.token_symbol.clone())
                .unwrap_or(defaults.token_symbol),
            max_supply: args
                .max_supply
                .or(file.max_supply)
                .unwrap_or(defaults.max_supply),
            mint_price: args
                .mint_price
                .or(file.mint_price)
                .unwrap_or(defaults.mint_price),
            max_per_tx: args
                .max_per_tx
                .or(file.max_per_tx)
                .unwrap_or(defaults.max_per_tx),
            base_uri: args
                .base_uri
                .or_else(|| file.base_uri.clone())
                .unwrap_or(defaults.base_uri),
            royalty_receiver: args.royalty_receiver.or(file.royalty_receiver),
            royalty_fee_bps: args
                .royalty_fee_bps
                .or(file.royalty_fee_bps)
                .unwrap_or(defaults.royalty_fee_bps),
        }
    }
}

impl Config {
    /// Resolves the configuration, reading the TOML file if one is given.
    pub async fn load(args: Arguments) -> Result<Self> {
        let file = match &args.config {
            Some(path) => file::load(path).await?,
            None => file::File::default(),
        };
        Self::resolve(args, file)
    }

    fn resolve(args: Arguments, file: file::File) -> Result<Self> {
        let confirmations = args
            .confirmations
            .or(file.confirmations)
            .unwrap_or(DEFAULT_CONFIRMATIONS);
        // Waiting for zero confirmations would not wait for the receipt.
        anyhow::ensure!(confirmations > 0, "confirmations must be at least 1");

        Ok(Self {
            node_url: args.node_url,
            expected_chain_id: args.chain_id.or(file.chain_id),
            credentials: Credentials {
                private_key: args.private_key,
                mnemonic: args.mnemonic,
                mnemonic_index: args.mnemonic_index,
            },
            artifacts: args.artifacts,
            submission: Submission {
                confirmations,
                confirmation_timeout: args
                    .confirmation_timeout
                    .or(file.confirmation_timeout)
                    .unwrap_or(DEFAULT_CONFIRMATION_TIMEOUT),
                rpc_timeout: args.rpc_timeout,
            },
            parameters: DeploymentParameters::resolve(args.parameters, &file),
        })
    }
}
