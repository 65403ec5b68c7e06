use serde::{Deserialize, Serialize};
use std::{env, path::PathBuf};

pub const HOME_ENV_VAR: &str = "WALLETFY_HOME";
const DEFAULT_DIR_NAME: &str = "walletfy";
const MAX_DISPLAY_PRECISION: u8 = 6;

/// Settings read at startup. Every field has a default so partial files load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Directory holding the stored records. Defaults to [`Config::resolve_data_dir`].
    pub data_dir: Option<PathBuf>,
    #[serde(default = "Config::default_events_key")]
    pub events_key: String,
    #[serde(default = "Config::default_initial_balance_key")]
    pub initial_balance_key: String,
    #[serde(default = "Config::default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default = "Config::default_display_precision")]
    pub display_precision: u8,
    #[serde(default = "Config::default_log_filter")]
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            events_key: Self::default_events_key(),
            initial_balance_key: Self::default_initial_balance_key(),
            currency_symbol: Self::default_currency_symbol(),
            display_precision: Self::default_display_precision(),
            log_filter: Self::default_log_filter(),
        }
    }
}

impl Config {
    pub fn default_events_key() -> String {
        "walletfyEvents".into()
    }

    pub fn default_initial_balance_key() -> String {
        "initialBalance".into()
    }

    pub fn default_currency_symbol() -> String {
        "$".into()
    }

    pub fn default_display_precision() -> u8 {
        2
    }

    pub fn default_log_filter() -> String {
        "walletfy=info".into()
    }

    /// Explicit `data_dir`, else `$WALLETFY_HOME`, else the platform data directory.
    pub fn resolve_data_dir(&self) -> PathBuf {
        if let Some(path) = &self.data_dir {
            return path.clone();
        }
        if let Some(custom) = env::var_os(HOME_ENV_VAR) {
            return PathBuf::from(custom);
        }
        dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_DIR_NAME)
    }

    pub fn validate(&self) -> Result<(), crate::ConfigError> {
        if self.events_key.trim().is_empty() {
            return Err(invalid("events_key", "must not be empty"));
        }
        if self.initial_balance_key.trim().is_empty() {
            return Err(invalid("initial_balance_key", "must not be empty"));
        }
        // Stored files are named after the keys; case-insensitive filesystems
        // would fold `Events` and `events` into one file.
        if self.events_key.eq_ignore_ascii_case(&self.initial_balance_key) {
            return Err(invalid(
                "initial_balance_key",
                "must differ from events_key (ignoring case)",
            ));
        }
        if self.display_precision > MAX_DISPLAY_PRECISION {
            return Err(invalid(
                "display_precision",
                &format!("must be at most {MAX_DISPLAY_PRECISION}"),
            ));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &str) -> crate::ConfigError {
    crate::ConfigError::Invalid {
        field,
        reason: reason.to_string(),
    }
}
