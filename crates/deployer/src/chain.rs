//! The network side of a deployment: submitting the creation transaction and
//! waiting for its confirmation.

use {
    crate::{config::Submission, error::DeploymentError, observe},
    alloy::{
        network::TransactionBuilder,
        primitives::{Address, B256, Bytes},
        providers::{PendingTransactionBuilder, PendingTransactionError, Provider, WatchTxError},
        rpc::types::{TransactionReceipt, TransactionRequest},
        signers::local::PrivateKeySigner,
    },
    anyhow::{Context, anyhow},
    ethrpc::{AlloyProvider, alloy::errors::RpcErrorExt},
    std::time::Duration,
    url::Url,
};

/// A contract creation transaction ready to be signed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeployTx {
    pub contract_name: String,
    /// Creation bytecode followed by the ABI encoded constructor arguments.
    pub input: Bytes,
}

/// A confirmed deployment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deployment {
    pub address: Address,
    pub tx_hash: B256,
    pub block_number: Option<u64>,
    pub gas_used: u64,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ChainClient: Send + Sync {
    /// The chain ID reported by the node.
    async fn chain_id(&self) -> Result<u64, DeploymentError>;

    /// Signs and submits `tx`, then waits until it is confirmed.
    async fn deploy(
        &self,
        signer: &PrivateKeySigner,
        tx: DeployTx,
    ) -> Result<Deployment, DeploymentError>;
}

/// [`ChainClient`] talking to an Ethereum node over JSON-RPC.
pub struct Ethereum {
    url: Url,
    rpc: ethrpc::Config,
    provider: AlloyProvider,
    confirmations: u64,
    confirmation_timeout: Duration,
}

impl Ethereum {
    pub fn new(url: Url, submission: &Submission) -> anyhow::Result<Self> {
        let rpc = ethrpc::Config {
            request_timeout: submission.rpc_timeout,
            ..Default::default()
        };
        let provider = ethrpc::alloy::provider(&url, &rpc)?;
        Ok(Self {
            url,
            rpc,
            provider,
            confirmations: submission.confirmations,
            confirmation_timeout: submission.confirmation_timeout,
        })
    }
}

#[async_trait::async_trait]
impl ChainClient for Ethereum {
    async fn chain_id(&self) -> Result<u64, DeploymentError> {
        Ok(self
            .provider
            .get_chain_id()
            .await
            .context("could not fetch current chain id")?)
    }

    async fn deploy(
        &self,
        signer: &PrivateKeySigner,
        tx: DeployTx,
    ) -> Result<Deployment, DeploymentError> {
        let provider = ethrpc::alloy::provider_with_signer(&self.url, &self.rpc, signer.clone())?;
        let request = TransactionRequest::default()
            .with_from(signer.address())
            .with_deploy_code(tx.input);

        let pending = submit(&provider, request).await?;
        let tx_hash = *pending.tx_hash();
        observe::submitted(&tx.contract_name, tx_hash);

        let receipt = pending
            .with_required_confirmations(self.confirmations)
            .with_timeout(Some(self.confirmation_timeout))
            .get_receipt()
            .await
            .map_err(|err| confirmation_error(err, tx_hash, self.confirmation_timeout))?;
        deployment(tx_hash, &receipt)
    }
}

/// Sends the creation transaction. A node refusing it because execution
/// reverts (usually during gas estimation) rejects the deployment.
async fn submit(
    provider: &AlloyProvider,
    request: TransactionRequest,
) -> Result<PendingTransactionBuilder<alloy::network::Ethereum>, DeploymentError> {
    provider.send_transaction(request).await.map_err(|err| {
        if err.is_revert() {
            DeploymentError::DeploymentRejected {
                tx_hash: None,
                reason: match err.revert_data() {
                    Some(data) => format!("execution reverted with data {data}"),
                    None => err.to_string(),
                },
            }
        } else {
            anyhow!(err)
                .context("failed to submit deployment transaction")
                .into()
        }
    })
}

fn confirmation_error(
    err: PendingTransactionError,
    tx_hash: B256,
    timeout: Duration,
) -> anyhow::Error {
    match err {
        PendingTransactionError::TxWatcher(WatchTxError::Timeout) => {
            observe::confirmation_timed_out(tx_hash, timeout);
            anyhow!("transaction {tx_hash} was not confirmed within {timeout:?}")
        }
        err => anyhow!(err).context(format!("failed to confirm transaction {tx_hash}")),
    }
}

fn deployment(tx_hash: B256, receipt: &TransactionReceipt) -> Result<Deployment, DeploymentError> {
    if !receipt.status() {
        return Err(DeploymentError::DeploymentRejected {
            tx_hash: Some(tx_hash),
            reason: format!("transaction {tx_hash} reverted"),
        });
    }
    let address = receipt
        .contract_address
        .ok_or_else(|| anyhow!("receipt of {tx_hash} carries no contract address"))?;

    Ok(Deployment {
        address,
        tx_hash,
        block_number: receipt.block_number,
        gas_used: receipt.gas_used,
    })
}
