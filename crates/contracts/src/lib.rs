//! Loading of compiled contract artifacts.
//!
//! Artifacts are the JSON files a Hardhat project writes to its `artifacts/`
//! directory: the contract ABI together with its creation bytecode. They are
//! addressed by contract name.

pub mod artifact;
pub mod paths;

pub use artifact::{Artifact, Artifacts, LoadError};
