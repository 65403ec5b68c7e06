//! The user-set starting capital that seeds the running balance.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::CoreError;

/// Finite starting balance; zero until the user sets one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InitialBalance(f64);

impl InitialBalance {
    pub fn new(value: f64) -> Result<Self, CoreError> {
        if !value.is_finite() {
            return Err(CoreError::InvalidBalance(value));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Replaces the held value. Non-finite inputs are refused and the old value kept.
    pub fn set(&mut self, value: f64) -> Result<(), CoreError> {
        *self = Self::new(value)?;
        debug!(value, "initial balance set");
        Ok(())
    }
}

impl From<InitialBalance> for f64 {
    fn from(balance: InitialBalance) -> Self {
        balance.0
    }
}
