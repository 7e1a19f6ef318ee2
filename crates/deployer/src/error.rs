use {alloy::primitives::B256, thiserror::Error};

/// Everything that can make a deployment run fail. None of these are
/// recovered from: they surface to the entry point which logs them and exits
/// with a non-zero status.
#[derive(Debug, Error)]
pub enum DeploymentError {
    #[error("no signer available: {0}")]
    SignerUnavailable(String),
    #[error("artifact for contract {0:?} not found")]
    ArtifactNotFound(String),
    #[error("invalid constructor arguments: {0}")]
    InvalidArguments(String),
    /// The network reported the creation transaction as reverted. `tx_hash`
    /// is `None` when the node refused the transaction before it was mined
    /// (e.g. gas estimation hit the revert).
    #[error("deployment rejected by the network: {reason}")]
    DeploymentRejected {
        tx_hash: Option<B256>,
        reason: String,
    },
    /// Any other failure, typically from the node connection.
    #[error(transparent)]
    Unknown(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_errors_display_the_underlying_failure() {
        let err = DeploymentError::from(anyhow::anyhow!("connection refused"));
        assert!(matches!(err, DeploymentError::Unknown(_)));
        assert_eq!(err.to_string(), "connection refused");
    }
}
