#![doc(test(attr(deny(warnings))))]

//! Walletfy records dated income and expense events and derives a running
//! month-by-month balance from them.
//!
//! The [`Walletfy`] facade ties together the event store, the initial balance,
//! the balance aggregation and the persistence bridge from the workspace crates.

pub mod errors;
pub mod utils;
pub mod walletfy;

pub use errors::WalletfyError;
pub use walletfy::Walletfy;

pub use walletfy_config::{Config, ConfigManager};
pub use walletfy_core::{
    format::CurrencyFormat, BalanceService, CoreError, DroppedRecord, EventField, EventStore,
    InitialBalance, KeyValueStore, LoadReport, MemoryStore, PersistenceBridge, StorageKeys,
    ValidationError, ValidationErrors,
};
pub use walletfy_domain::{BalanceReport, Event, EventType, MonthKey, MonthSummary};
pub use walletfy_storage_json::JsonFileStore;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing with the default filter and emits a startup info log.
pub fn init() {
    init_with_filter(&Config::default_log_filter());
}

/// Initializes global tracing using the filter from `config`.
pub fn init_with_config(config: &Config) {
    init_with_filter(&config.log_filter);
}

fn init_with_filter(filter: &str) {
    INIT_TRACING.call_once(|| {
        utils::init_tracing(filter);
        tracing::info!("Walletfy tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
