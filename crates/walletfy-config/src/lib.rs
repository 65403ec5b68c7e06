//! walletfy-config
//!
//! User-tunable settings (storage location and keys, display formatting,
//! log filter) plus disk persistence helpers.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::ConfigManager;
pub use model::Config;
