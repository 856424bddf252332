use thiserror::Error;

/// Error outputs from `Passkey39`
#[derive(Debug, Error, PartialEq, Eq)]
#[derive(uniffi::Error)]
pub enum Passkey39Error {
    /// The platform offers no authenticator capability
    #[error("unsupported_environment")]
    UnsupportedEnvironment,
    /// The presented input is not valid for the requested operation
    #[error("invalid_input_{attribute}: {reason}")]
    InvalidInput {
        /// The name of the offending input
        attribute: String,
        /// Why the input was rejected
        reason: String,
    },
    /// The key-derivation function rejected its parameters
    #[error("derivation_failure: {reason}")]
    DerivationFailure {
        /// Description of the rejection
        reason: String,
    },
    /// The authenticator ceremony failed or was cancelled by the host
    #[error("authenticator_error: {reason}")]
    Authenticator {
        /// Description reported by the host
        reason: String,
    },
}

impl Passkey39Error {
    pub(crate) fn invalid_input(attribute: &str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            attribute: attribute.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<uniffi::UnexpectedUniFFICallbackError> for Passkey39Error {
    fn from(error: uniffi::UnexpectedUniFFICallbackError) -> Self {
        Self::Authenticator {
            reason: error.reason,
        }
    }
}

/// Result type for `Passkey39` operations.
pub type Passkey39Result<T, E = Passkey39Error> = std::result::Result<T, E>;
