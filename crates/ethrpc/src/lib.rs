pub mod alloy;

use {::alloy::providers::DynProvider, std::time::Duration};

pub type AlloyProvider = DynProvider;

#[derive(Debug, Clone)]
pub struct Config {
    /// Upper bound for a single JSON-RPC round trip. Requests exceeding it
    /// fail with a transport error instead of hanging forever.
    pub request_timeout: Duration,

    /// Label attached to the request logs of the provider.
    pub label: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            label: "main".into(),
        }
    }
}
