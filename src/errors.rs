use thiserror::Error;
use walletfy_config::ConfigError;
use walletfy_core::{CoreError, ValidationErrors};

/// Error type returned by the [`crate::Walletfy`] facade.
#[derive(Debug, Error)]
pub enum WalletfyError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl WalletfyError {
    /// Field-level failures, when the error came from the validation gate.
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            WalletfyError::Core(CoreError::Validation(errors)) => Some(errors),
            _ => None,
        }
    }
}

impl From<ValidationErrors> for WalletfyError {
    fn from(errors: ValidationErrors) -> Self {
        WalletfyError::Core(CoreError::Validation(errors))
    }
}
