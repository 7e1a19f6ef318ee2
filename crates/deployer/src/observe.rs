//! Events that are meaningful to a deployment run. Each function is called
//! when the corresponding event occurs and logs it. Logs go to stderr so they
//! never mix with the report on stdout.

use {
    crate::{
        chain::{DeployTx, Deployment},
        error::DeploymentError,
    },
    alloy::primitives::{Address, B256},
    contracts::Artifact,
    std::time::Duration,
};

/// Observe that the deploying account was resolved.
pub fn signer(address: Address) {
    tracing::info!(%address, "resolved signer");
}

/// Observe the artifact that is about to be deployed.
pub fn artifact(artifact: &Artifact) {
    tracing::debug!(
        contract = %artifact.contract_name,
        bytecode_len = artifact.bytecode.len(),
        "loaded artifact"
    );
}

/// Observe the chain the node is connected to.
pub fn chain_id(chain_id: u64) {
    tracing::debug!(chain_id, "connected to chain");
}

/// Observe that the creation transaction is about to be submitted.
pub fn submitting(tx: &DeployTx) {
    tracing::debug!(contract = %tx.contract_name, input_len = tx.input.len(), "submitting");
}

/// Observe that the node accepted the creation transaction.
pub fn submitted(contract: &str, tx_hash: B256) {
    tracing::info!(contract, ?tx_hash, "submitted deployment, awaiting confirmation");
}

/// Observe that the transaction was not confirmed in time.
pub fn confirmation_timed_out(tx_hash: B256, timeout: Duration) {
    tracing::warn!(?tx_hash, ?timeout, "deployment not confirmed in time");
}

/// Observe a confirmed deployment.
pub fn deployed(contract: &str, deployment: &Deployment) {
    tracing::info!(
        contract,
        address = %deployment.address,
        tx_hash = ?deployment.tx_hash,
        block_number = ?deployment.block_number,
        gas_used = deployment.gas_used,
        "deployed"
    );
}

/// Observe that the run failed.
pub fn failed(err: &DeploymentError) {
    match err {
        DeploymentError::DeploymentRejected {
            tx_hash: Some(tx_hash),
            ..
        } => tracing::error!(?tx_hash, %err, "deployment failed"),
        DeploymentError::Unknown(err) => tracing::error!(?err, "deployment failed"),
        err => tracing::error!(%err, "deployment failed"),
    }
}
