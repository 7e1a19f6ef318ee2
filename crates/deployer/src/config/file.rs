use {
    alloy::primitives::Address,
    anyhow::{Context, Result},
    number::Ether,
    serde::Deserialize,
    std::{path::Path, time::Duration},
    tokio::fs,
};

/// Deployment parameters as written in the optional TOML file. Every field
/// is optional; missing values fall back to the built-in defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct File {
    /// The chain ID the node is expected to serve.
    pub chain_id: Option<u64>,

    /// Number of confirmations to wait for.
    pub confirmations: Option<u64>,

    /// How long to wait for the confirmation, e.g. "5m".
    #[serde(default, with = "humantime_serde")]
    pub confirmation_timeout: Option<Duration>,

    pub contract_name: Option<String>,
    pub token_name: Option<String>,
    pub token_symbol: Option<String>,
    pub max_supply: Option<u64>,
    pub mint_price: Option<Ether>,
    pub max_per_tx: Option<u64>,
    pub base_uri: Option<String>,
    pub royalty_receiver: Option<Address>,
    pub royalty_fee_bps: Option<u64>,
}

/// Load the deployment parameters from a TOML file.
pub async fn load(path: &Path) -> Result<File> {
    let data = fs::read_to_string(path)
        .await
        .with_context(|| format!("I/O error while reading {path:?}"))?;
    parse(&data).with_context(|| format!("TOML syntax error while reading {path:?}"))
}

fn parse(data: &str) -> Result<File> {
    Ok(toml::de::from_str(data)?)
}
