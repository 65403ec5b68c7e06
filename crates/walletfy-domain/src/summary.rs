//! Derived, never-persisted views over the event collection.

use serde::{Deserialize, Serialize};

use crate::{common::MonthKey, event::Event};

/// Totals for one calendar month that has at least one event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthSummary {
    pub month_key: MonthKey,
    pub month_name: String,
    pub year: i32,
    pub total_income: f64,
    pub total_expense: f64,
    pub monthly_balance: f64,
    /// Cumulative balance from the initial balance through the end of this month.
    pub global_balance: f64,
    /// Events of the month, date ascending; equal dates keep insertion order.
    pub events: Vec<Event>,
}

impl MonthSummary {
    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    /// Global balance carried into this month.
    pub fn opening_balance(&self) -> f64 {
        self.global_balance - self.monthly_balance
    }
}

/// Monthly breakdown plus the balance after the most recent month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceReport {
    pub month_summaries: Vec<MonthSummary>,
    pub current_global_balance: f64,
}

impl BalanceReport {
    pub fn empty(initial_balance: f64) -> Self {
        Self {
            month_summaries: Vec::new(),
            current_global_balance: initial_balance,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.month_summaries.is_empty()
    }

    pub fn month_count(&self) -> usize {
        self.month_summaries.len()
    }

    pub fn event_count(&self) -> usize {
        self.month_summaries
            .iter()
            .map(MonthSummary::event_count)
            .sum()
    }

    pub fn summary(&self, key: MonthKey) -> Option<&MonthSummary> {
        self.month_summaries
            .iter()
            .find(|summary| summary.month_key == key)
    }

    pub fn latest(&self) -> Option<&MonthSummary> {
        self.month_summaries.last()
    }
}
