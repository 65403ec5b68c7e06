//! walletfy-core
//!
//! Validation, event store, balance aggregation and persistence plumbing.
//! Depends on walletfy-domain. No terminal I/O; durable storage is reached only
//! through the [`storage::KeyValueStore`] trait.

pub mod balance_service;
pub mod balance;
pub mod error;
pub mod event_store;
pub mod format;
pub mod persistence;
pub mod storage;
pub mod validation;

pub use balance_service::BalanceService;
pub use balance::InitialBalance;
pub use error::CoreError;
pub use event_store::EventStore;
pub use persistence::{DroppedRecord, LoadReport, PersistenceBridge, StorageKeys};
pub use storage::{KeyValueStore, MemoryStore};
pub use validation::{EventField, ValidationError, ValidationErrors, ValidationGate};
