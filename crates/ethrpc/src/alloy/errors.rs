use alloy::{
    primitives::Bytes,
    transports::{RpcError, TransportError},
};

pub trait RpcErrorExt {
    /// Returns the revert data carried by the error response, if the node
    /// reported the request as reverted.
    fn revert_data(&self) -> Option<Bytes>;

    /// Returns whether the node rejected the request because its execution
    /// reverted. Such errors will not go away by sending the request again.
    fn is_revert(&self) -> bool;
}

impl RpcErrorExt for TransportError {
    fn revert_data(&self) -> Option<Bytes> {
        match self {
            RpcError::ErrorResp(err) => err.as_revert_data(),
            _ => None,
        }
    }

    fn is_revert(&self) -> bool {
        match self {
            // Nodes are not consistent in attaching revert data: an empty revert
            // (e.g. a `require` without message) sometimes comes without any data
            // at all, so the error message is checked as well.
            RpcError::ErrorResp(err) => {
                let has_revert_data = err.as_revert_data().is_some();
                tracing::debug!(?err, %has_revert_data, "node returned error response");
                has_revert_data || err.message.to_lowercase().contains("revert")
            }
            _ => false,
        }
    }
}

/// Create an arbitrary node error that is not a revert.
/// Useful for testing.
#[cfg(test)]
pub fn testing_node_error() -> TransportError {
    TransportError::ErrorResp(alloy::rpc::json_rpc::ErrorPayload::internal_error())
}

/// Create a node error reporting a reverted execution without revert data.
/// Useful for testing.
#[cfg(test)]
pub fn testing_revert_error() -> TransportError {
    TransportError::ErrorResp(alloy::rpc::json_rpc::ErrorPayload {
        code: 3,
        message: "execution reverted".into(),
        data: None,
    })
}
