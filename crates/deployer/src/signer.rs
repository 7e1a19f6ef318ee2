use {
    crate::error::DeploymentError,
    alloy::signers::local::{MnemonicBuilder, PrivateKeySigner, coins_bip39::English},
    std::fmt,
};

/// Resolves the identity that signs and pays for the deployment.
#[cfg_attr(test, mockall::automock)]
pub trait SignerProvider: Send + Sync {
    fn signer(&self) -> Result<PrivateKeySigner, DeploymentError>;
}

/// Locally held key material. A private key takes precedence over a
/// mnemonic; blank values count as not configured.
#[derive(Clone, Default)]
pub struct Credentials {
    pub private_key: Option<String>,
    pub mnemonic: Option<String>,
    pub mnemonic_index: u32,
}

impl SignerProvider for Credentials {
    fn signer(&self) -> Result<PrivateKeySigner, DeploymentError> {
        if let Some(key) = non_blank(&self.private_key) {
            // Not printing the parse error because it could leak the key.
            return key.parse().map_err(|_| {
                DeploymentError::SignerUnavailable(
                    "private key is not a 32 byte hex string".to_string(),
                )
            });
        }

        if let Some(phrase) = non_blank(&self.mnemonic) {
            return MnemonicBuilder::<English>::default()
                .phrase(phrase)
                .index(self.mnemonic_index)
                .and_then(|builder| builder.build())
                .map_err(|err| {
                    DeploymentError::SignerUnavailable(format!(
                        "cannot derive account {} from mnemonic: {err}",
                        self.mnemonic_index
                    ))
                });
        }

        Err(DeploymentError::SignerUnavailable(
            "neither a private key nor a mnemonic is configured".to_string(),
        ))
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("private_key", &self.private_key.as_ref().map(|_| "SECRET"))
            .field("mnemonic", &self.mnemonic.as_ref().map(|_| "SECRET"))
            .field("mnemonic_index", &self.mnemonic_index)
            .finish()
    }
}
