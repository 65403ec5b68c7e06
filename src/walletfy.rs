//! Facade that coordinates the event store, the initial balance and persistence.

use serde_json::Value;
use tracing::info;
use uuid::Uuid;
use walletfy_config::Config;
use walletfy_core::{
    format::CurrencyFormat, BalanceService, EventStore, InitialBalance, LoadReport, MemoryStore,
    PersistenceBridge, StorageKeys, ValidationGate,
};
use walletfy_domain::{BalanceReport, Event};
use walletfy_storage_json::JsonFileStore;

use crate::WalletfyError;

/// Application state plus the bridge it is saved through.
///
/// Every mutation is staged on a copy of the store and saved before it becomes
/// visible, so a failed save leaves memory and storage at the previous state.
pub struct Walletfy {
    events: EventStore,
    initial_balance: InitialBalance,
    persistence: PersistenceBridge,
    currency: CurrencyFormat,
}

impl Walletfy {
    /// Loads stored state through `persistence`. Records that fail validation are
    /// skipped and listed in the returned [`LoadReport`].
    pub fn open(persistence: PersistenceBridge) -> Result<(Self, LoadReport), WalletfyError> {
        let report = persistence.load()?;
        let wallet = Self {
            events: EventStore::from_events(report.events.clone())?,
            initial_balance: report.initial_balance,
            persistence,
            currency: CurrencyFormat::default(),
        };
        info!(
            events = wallet.events.len(),
            dropped = report.dropped.len(),
            "wallet opened"
        );
        Ok((wallet, report))
    }

    /// Opens the JSON-file store located and keyed as `config` describes.
    pub fn open_with_config(config: &Config) -> Result<(Self, LoadReport), WalletfyError> {
        config.validate()?;
        let store = JsonFileStore::new(config.resolve_data_dir())?;
        let keys = StorageKeys {
            events: config.events_key.clone(),
            initial_balance: config.initial_balance_key.clone(),
        };
        let bridge = PersistenceBridge::with_keys(Box::new(store), keys);
        let (mut wallet, report) = Self::open(bridge)?;
        wallet.currency =
            CurrencyFormat::new(config.currency_symbol.clone(), config.display_precision);
        Ok((wallet, report))
    }

    /// Empty wallet backed by process memory only.
    pub fn in_memory() -> Self {
        Self {
            events: EventStore::new(),
            initial_balance: InitialBalance::default(),
            persistence: PersistenceBridge::new(Box::new(MemoryStore::new())),
            currency: CurrencyFormat::default(),
        }
    }

    /// Discards in-memory state and reads it again from storage.
    pub fn reload(&mut self) -> Result<LoadReport, WalletfyError> {
        let report = self.persistence.load()?;
        self.events = EventStore::from_events(report.events.clone())?;
        self.initial_balance = report.initial_balance;
        Ok(report)
    }

    /// Validates an untyped candidate, then adds it or replaces the event with
    /// the same id.
    pub fn submit_event(&mut self, candidate: &Value) -> Result<Event, WalletfyError> {
        let event = ValidationGate::validate(candidate)?;
        self.upsert(event)
    }

    /// Same as [`Walletfy::submit_event`] for an already typed event.
    pub fn submit(&mut self, event: Event) -> Result<Event, WalletfyError> {
        ValidationGate::check(&event)?;
        self.upsert(event)
    }

    /// Replaces an existing event; unknown ids fail with `NotFound`.
    pub fn update_event(&mut self, event: Event) -> Result<Event, WalletfyError> {
        ValidationGate::check(&event)?;
        let mut staged = self.events.clone();
        staged.update(event.clone())?;
        self.commit(staged)?;
        Ok(event)
    }

    pub fn delete_event(&mut self, id: Uuid) -> Result<Event, WalletfyError> {
        let mut staged = self.events.clone();
        let removed = staged.remove(id)?;
        self.commit(staged)?;
        info!(%id, "event deleted");
        Ok(removed)
    }

    /// Sets and saves the starting balance. Non-finite values are refused.
    pub fn set_initial_balance(&mut self, value: f64) -> Result<(), WalletfyError> {
        let balance = InitialBalance::new(value)?;
        self.persistence.save_initial_balance(balance)?;
        self.initial_balance = balance;
        info!(value, "initial balance saved");
        Ok(())
    }

    /// Recomputes the monthly breakdown from the current events.
    pub fn balance_report(&self) -> BalanceReport {
        BalanceService::report(self.events.list(), self.initial_balance.value())
    }

    pub fn events(&self) -> &[Event] {
        self.events.list()
    }

    pub fn event(&self, id: Uuid) -> Option<&Event> {
        self.events.get(id)
    }

    pub fn initial_balance(&self) -> f64 {
        self.initial_balance.value()
    }

    pub fn currency_format(&self) -> &CurrencyFormat {
        &self.currency
    }

    pub fn persistence(&self) -> &PersistenceBridge {
        &self.persistence
    }

    fn upsert(&mut self, event: Event) -> Result<Event, WalletfyError> {
        let mut staged = self.events.clone();
        let created = !staged.contains(event.id);
        if created {
            staged.add(event.clone())?;
        } else {
            staged.update(event.clone())?;
        }
        self.commit(staged)?;
        info!(id = %event.id, created, "event saved");
        Ok(event)
    }

    fn commit(&mut self, staged: EventStore) -> Result<(), WalletfyError> {
        self.persistence.save_events(staged.list())?;
        self.events = staged;
        Ok(())
    }
}
