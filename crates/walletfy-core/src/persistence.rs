//! Bridge between in-memory state and a [`KeyValueStore`].
//!
//! Two records are kept: the event list as a JSON array and the initial
//! balance as a decimal string. Loading never fails on bad data: each stored
//! event goes back through the [`ValidationGate`], bad or duplicate records are
//! dropped one by one and reported in the [`LoadReport`].

use std::collections::HashSet;

use serde_json::Value;
use tracing::{info, warn};
use walletfy_domain::Event;

use crate::{
    balance::InitialBalance, storage::KeyValueStore, validation::ValidationGate, CoreError,
};

pub const DEFAULT_EVENTS_KEY: &str = "walletfyEvents";
pub const DEFAULT_INITIAL_BALANCE_KEY: &str = "initialBalance";

/// Keys under which the two records live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    pub events: String,
    pub initial_balance: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            events: DEFAULT_EVENTS_KEY.into(),
            initial_balance: DEFAULT_INITIAL_BALANCE_KEY.into(),
        }
    }
}

/// A stored record that could not be recovered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedRecord {
    /// Position in the stored array; `None` when the whole payload was unreadable.
    pub index: Option<usize>,
    /// Raw id of the record, when one could be read.
    pub id: Option<String>,
    pub reason: String,
}

/// Outcome of [`PersistenceBridge::load`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    pub events: Vec<Event>,
    pub initial_balance: InitialBalance,
    pub dropped: Vec<DroppedRecord>,
    /// Set when a stored balance existed but could not be parsed.
    pub balance_issue: Option<String>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.dropped.is_empty() && self.balance_issue.is_none()
    }

    /// Human-readable lines describing everything that was discarded.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings: Vec<String> = self
            .dropped
            .iter()
            .map(|record| match (record.index, record.id.as_deref()) {
                (Some(index), Some(id)) => {
                    format!("event #{index} ({id}) dropped: {}", record.reason)
                }
                (Some(index), None) => format!("event #{index} dropped: {}", record.reason),
                (None, _) => format!("stored events discarded: {}", record.reason),
            })
            .collect();
        if let Some(issue) = &self.balance_issue {
            warnings.push(format!("initial balance reset to 0: {issue}"));
        }
        warnings
    }
}

pub struct PersistenceBridge {
    backend: Box<dyn KeyValueStore>,
    keys: StorageKeys,
}

impl PersistenceBridge {
    pub fn new(backend: Box<dyn KeyValueStore>) -> Self {
        Self::with_keys(backend, StorageKeys::default())
    }

    pub fn with_keys(backend: Box<dyn KeyValueStore>, keys: StorageKeys) -> Self {
        Self { backend, keys }
    }

    pub fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    pub fn backend(&self) -> &dyn KeyValueStore {
        self.backend.as_ref()
    }

    pub fn save(
        &self,
        events: &[Event],
        initial_balance: InitialBalance,
    ) -> Result<(), CoreError> {
        self.save_events(events)?;
        self.save_initial_balance(initial_balance)
    }

    pub fn save_events(&self, events: &[Event]) -> Result<(), CoreError> {
        let json = serde_json::to_string(events)?;
        self.backend.set(&self.keys.events, &json)?;
        info!(count = events.len(), key = %self.keys.events, "events saved");
        Ok(())
    }

    pub fn save_initial_balance(&self, initial_balance: InitialBalance) -> Result<(), CoreError> {
        self.backend
            .set(&self.keys.initial_balance, &initial_balance.value().to_string())
    }

    /// Reads both records. Only a failing backend produces an error.
    pub fn load(&self) -> Result<LoadReport, CoreError> {
        let (events, dropped) = match self.backend.get(&self.keys.events)? {
            Some(raw) => recover_events(&raw),
            None => (Vec::new(), Vec::new()),
        };
        let stored_balance = self.backend.get(&self.keys.initial_balance)?;
        let parsed = stored_balance.as_deref().map(parse_initial_balance);
        let (initial_balance, balance_issue) = match parsed {
            Some(Ok(balance)) => (balance, None),
            Some(Err(issue)) => {
                warn!(%issue, "stored initial balance ignored");
                (InitialBalance::default(), Some(issue))
            }
            None => (InitialBalance::default(), None),
        };
        info!(events = events.len(), dropped = dropped.len(), "state loaded");
        Ok(LoadReport {
            events,
            initial_balance,
            dropped,
            balance_issue,
        })
    }
}

/// Validates every element of a stored event array, keeping the good ones.
pub fn recover_events(raw: &str) -> (Vec<Event>, Vec<DroppedRecord>) {
    let payload: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(err) => {
            return (
                Vec::new(),
                vec![whole_payload(format!("not valid JSON: {err}"))],
            )
        }
    };
    let Value::Array(items) = payload else {
        return (Vec::new(), vec![whole_payload("not a JSON array".into())]);
    };

    let mut events = Vec::with_capacity(items.len());
    let mut dropped = Vec::new();
    let mut seen = HashSet::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let id = item.get("id").and_then(Value::as_str).map(String::from);
        let reason = match ValidationGate::validate(item) {
            Ok(event) if seen.insert(event.id) => {
                events.push(event);
                continue;
            }
            Ok(event) => format!("duplicate id {}", event.id),
            Err(errors) => errors.to_string(),
        };
        warn!(index, id = id.as_deref().unwrap_or("-"), %reason, "stored event dropped");
        dropped.push(DroppedRecord {
            index: Some(index),
            id,
            reason,
        });
    }
    (events, dropped)
}

fn whole_payload(reason: String) -> DroppedRecord {
    warn!(%reason, "stored events discarded");
    DroppedRecord {
        index: None,
        id: None,
        reason,
    }
}

fn parse_initial_balance(raw: &str) -> Result<InitialBalance, String> {
    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("`{raw}` is not a number"))?;
    InitialBalance::new(value).map_err(|err| err.to_string())
}
