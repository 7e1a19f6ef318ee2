pub mod arguments;
pub mod artifacts;
pub mod chain;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod request;
pub mod signer;

mod observe;
mod run;

pub use {
    chain::{ChainClient, Deployment, Ethereum},
    error::DeploymentError,
    orchestrator::Orchestrator,
    run::{run, start},
};
