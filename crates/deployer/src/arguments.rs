use {
    alloy::primitives::Address,
    number::Ether,
    std::{
        fmt::{self, Display, Formatter},
        path::PathBuf,
        time::Duration,
    },
    url::Url,
};

#[derive(clap::Parser)]
#[clap(version, about = "Deploys a compiled contract and reports its address")]
pub struct Arguments {
    /// The Ethereum node URL to connect to.
    #[clap(long, env, default_value = "http://localhost:8545")]
    pub node_url: Url,

    /// The chain ID the node is expected to serve. When set, the deployment
    /// is aborted before submission if the connected node reports a
    /// different one.
    #[clap(long, env)]
    pub chain_id: Option<u64>,

    /// Hex encoded private key of the deploying account.
    #[clap(long, env, hide_env_values = true)]
    pub private_key: Option<String>,

    /// BIP-39 mnemonic of the deploying account. Ignored if a private key is
    /// configured.
    #[clap(long, env, hide_env_values = true)]
    pub mnemonic: Option<String>,

    /// Derivation index of the account when using a mnemonic.
    #[clap(long, env, default_value = "0")]
    pub mnemonic_index: u32,

    /// Directory containing the compiled contract artifacts.
    #[clap(long, env = "DEPLOY_ARTIFACTS", default_value = "artifacts")]
    pub artifacts: PathBuf,

    /// Path to a TOML file with deployment parameters. Values given on the
    /// command line or through the environment take precedence over the file.
    #[clap(long, env = "DEPLOY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Number of blocks the creation transaction must be buried under before
    /// the deployment counts as confirmed. Must be at least 1, which is also
    /// the default.
    #[clap(long, env = "DEPLOY_CONFIRMATIONS")]
    pub confirmations: Option<u64>,

    /// How long to wait for the confirmation of the creation transaction.
    /// Defaults to 5m.
    #[clap(long, env = "DEPLOY_CONFIRMATION_TIMEOUT", value_parser = humantime::parse_duration)]
    pub confirmation_timeout: Option<Duration>,

    /// Timeout for individual requests to the node.
    #[clap(long, env, default_value = "30s", value_parser = humantime::parse_duration)]
    pub rpc_timeout: Duration,

    #[clap(flatten)]
    pub parameters: ParameterArguments,

    /// The log filter.
    #[clap(
        long,
        env,
        default_value = "warn,deployer=info,contracts=info,ethrpc=info"
    )]
    pub log_filter: String,

    /// Whether to use JSON format for the logs.
    #[clap(long, env, default_value = "false")]
    pub use_json_logs: bool,
}

/// Overrides for the values passed to the contract constructor.
#[derive(Default, clap::Parser)]
#[group(skip)]
pub struct ParameterArguments {
    /// Name of the contract artifact to deploy.
    #[clap(long, env)]
    pub contract_name: Option<String>,

    /// Token collection name.
    #[clap(long, env)]
    pub token_name: Option<String>,

    /// Token collection symbol.
    #[clap(long, env)]
    pub token_symbol: Option<String>,

    /// Maximum number of tokens that can ever be minted.
    #[clap(long, env)]
    pub max_supply: Option<u64>,

    /// Price per token, e.g. "0.03" (ether) or "30000000 gwei".
    #[clap(long, env)]
    pub mint_price: Option<Ether>,

    /// Maximum number of tokens minted in one transaction.
    #[clap(long, env)]
    pub max_per_tx: Option<u64>,

    /// Base URI of the token metadata.
    #[clap(long, env)]
    pub base_uri: Option<String>,

    /// Receiver of royalties. Defaults to the deploying account.
    #[clap(long, env)]
    pub royalty_receiver: Option<Address>,

    /// Royalty fee in basis points (500 = 5%).
    #[clap(long, env)]
    pub royalty_fee_bps: Option<u64>,
}

impl Display for Arguments {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Self {
            node_url,
            chain_id,
            private_key,
            mnemonic,
            mnemonic_index,
            artifacts,
            config,
            confirmations,
            confirmation_timeout,
            rpc_timeout,
            parameters,
            log_filter,
            use_json_logs,
        } = self;

        writeln!(f, "node_url: {node_url}")?;
        writeln!(f, "chain_id: {chain_id:?}")?;
        display_secret_option(f, "private_key", private_key)?;
        display_secret_option(f, "mnemonic", mnemonic)?;
        writeln!(f, "mnemonic_index: {mnemonic_index}")?;
        writeln!(f, "artifacts: {}", artifacts.display())?;
        writeln!(f, "config: {config:?}")?;
        writeln!(f, "confirmations: {confirmations:?}")?;
        writeln!(f, "confirmation_timeout: {confirmation_timeout:?}")?;
        writeln!(f, "rpc_timeout: {rpc_timeout:?}")?;
        write!(f, "{parameters}")?;
        writeln!(f, "log_filter: {log_filter}")?;
        writeln!(f, "use_json_logs: {use_json_logs}")?;
        Ok(())
    }
}

impl Display for ParameterArguments {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Self {
            contract_name,
            token_name,
            token_symbol,
            max_supply,
            mint_price,
            max_per_tx,
            base_uri,
            royalty_receiver,
            royalty_fee_bps,
        } = self;

        writeln!(f, "contract_name: {contract_name:?}")?;
        writeln!(f, "token_name: {token_name:?}")?;
        writeln!(f, "token_symbol: {token_symbol:?}")?;
        writeln!(f, "max_supply: {max_supply:?}")?;
        writeln!(
            f,
            "mint_price: {:?}",
            mint_price.map(|price| price.to_string())
        )?;
        writeln!(f, "max_per_tx: {max_per_tx:?}")?;
        writeln!(f, "base_uri: {base_uri:?}")?;
        writeln!(f, "royalty_receiver: {royalty_receiver:?}")?;
        writeln!(f, "royalty_fee_bps: {royalty_fee_bps:?}")?;
        Ok(())
    }
}

fn display_secret_option<T>(f: &mut Formatter<'_>, name: &str, option: &Option<T>) -> fmt::Result {
    let value = if option.is_some() { "SECRET" } else { "None" };
    writeln!(f, "{name}: {value}")
}
