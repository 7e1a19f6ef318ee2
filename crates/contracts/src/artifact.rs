use {
    crate::paths,
    alloy::primitives::Bytes,
    alloy_json_abi::{Constructor, JsonAbi},
    serde::Deserialize,
    std::{
        fs,
        io,
        path::{Path, PathBuf},
    },
    thiserror::Error,
};

/// A compiled contract: its interface and creation bytecode.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub contract_name: String,
    pub abi: JsonAbi,
    /// Creation bytecode. Empty for interfaces and abstract contracts.
    #[serde(default)]
    pub bytecode: Bytes,
}

impl Artifact {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// The constructor described by the ABI. `None` means the contract
    /// uses the implicit constructor without parameters.
    pub fn constructor(&self) -> Option<&Constructor> {
        self.abi.constructor()
    }

    /// Whether the artifact carries bytecode that can be deployed.
    pub fn is_deployable(&self) -> bool {
        !self.bytecode.is_empty()
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("artifact for contract {0:?} not found")]
    NotFound(String),
    #[error("contract name {name:?} is ambiguous, found artifacts {paths:?}")]
    Ambiguous { name: String, paths: Vec<PathBuf> },
    #[error("failed to read artifact {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed artifact {path:?}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// An artifacts directory as written by the contract toolchain.
#[derive(Clone, Debug)]
pub struct Artifacts {
    root: PathBuf,
}

impl Artifacts {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Loads the artifact of the contract called `name`.
    pub fn load(&self, name: &str) -> Result<Artifact, LoadError> {
        let path = self.locate(name)?;
        tracing::debug!(?path, "loading artifact");
        let json = fs::read_to_string(&path).map_err(|source| LoadError::Io {
            path: path.clone(),
            source,
        })?;
        Artifact::from_json(&json).map_err(|source| LoadError::Malformed { path, source })
    }

    fn locate(&self, name: &str) -> Result<PathBuf, LoadError> {
        if !paths::is_valid_contract_name(name) {
            return Err(LoadError::NotFound(name.to_owned()));
        }

        let flat = paths::flat_artifact_file(&self.root, name);
        if flat.is_file() {
            return Ok(flat);
        }

        let mut found = match paths::find_artifact_files(&self.root, name) {
            Ok(found) => found,
            // A missing artifacts directory is no different from a missing
            // artifact.
            Err(err) if err.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(source) => {
                return Err(LoadError::Io {
                    path: self.root.clone(),
                    source,
                });
            }
        };
        match found.len() {
            0 => Err(LoadError::NotFound(name.to_owned())),
            1 => Ok(found.remove(0)),
            _ => Err(LoadError::Ambiguous {
                name: name.to_owned(),
                paths: found,
            }),
        }
    }
}
