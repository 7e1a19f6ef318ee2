pub mod errors;
mod instrumentation;

#[cfg(any(test, feature = "test-util"))]
use alloy::transports::mock::{Asserter, MockTransport};
use {
    crate::{AlloyProvider, Config},
    alloy::{
        network::{EthereumWallet, TxSigner},
        primitives::Signature,
        providers::{Provider, ProviderBuilder},
        rpc::client::{ClientBuilder, RpcClient},
        transports::{
            http::{Http, reqwest},
            utils::guess_local_url,
        },
    },
    anyhow::Context,
    instrumentation::InstrumentationLayer,
    url::Url,
};

fn rpc_client(url: &Url, config: &Config) -> anyhow::Result<RpcClient> {
    let http = reqwest::Client::builder()
        .timeout(config.request_timeout)
        .build()
        .context("failed to build HTTP client")?;
    let transport = Http::with_client(http, url.clone());
    Ok(ClientBuilder::default()
        .layer(InstrumentationLayer::new(&config.label))
        .transport(transport, guess_local_url(url.as_str())))
}

/// Creates a read-only provider for the node at `url`.
pub fn provider(url: &Url, config: &Config) -> anyhow::Result<AlloyProvider> {
    let rpc = rpc_client(url, config)?;
    Ok(ProviderBuilder::new().connect_client(rpc).erased())
}

/// Creates a provider that fills and signs transactions with `signer`.
pub fn provider_with_signer(
    url: &Url,
    config: &Config,
    signer: impl TxSigner<Signature> + Send + Sync + 'static,
) -> anyhow::Result<AlloyProvider> {
    let rpc = rpc_client(url, config)?;
    Ok(signing(rpc, signer))
}

fn signing(
    rpc: RpcClient,
    signer: impl TxSigner<Signature> + Send + Sync + 'static,
) -> AlloyProvider {
    ProviderBuilder::new()
        .wallet(EthereumWallet::new(signer))
        .connect_client(rpc)
        .erased()
}

/// Like [`provider_with_signer`], but every request is answered from
/// `asserter` instead of a node. Requests still pass through the
/// instrumentation layer.
#[cfg(any(test, feature = "test-util"))]
pub fn mocked_provider_with_signer(
    asserter: Asserter,
    config: &Config,
    signer: impl TxSigner<Signature> + Send + Sync + 'static,
) -> AlloyProvider {
    let rpc = ClientBuilder::default()
        .layer(InstrumentationLayer::new(&config.label))
        .transport(MockTransport::new(asserter), true);
    signing(rpc, signer)
}
