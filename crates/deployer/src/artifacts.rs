use {
    crate::error::DeploymentError,
    contracts::{Artifact, Artifacts, LoadError},
};

/// Resolves compiled contracts by name.
#[cfg_attr(test, mockall::automock)]
pub trait ArtifactSource: Send + Sync {
    fn artifact(&self, name: &str) -> Result<Artifact, DeploymentError>;
}

impl ArtifactSource for Artifacts {
    fn artifact(&self, name: &str) -> Result<Artifact, DeploymentError> {
        self.load(name).map_err(|err| match err {
            LoadError::NotFound(name) => DeploymentError::ArtifactNotFound(name),
            err => DeploymentError::Unknown(err.into()),
        })
    }
}
