//! The dated income/expense record tracked by Walletfy.

use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;

pub const NAME_MAX_LEN: usize = 20;
pub const DESCRIPTION_MAX_LEN: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub amount: f64,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: EventType,
    /// Base64 data URL of an image receipt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<String>,
}

impl Event {
    pub fn new(name: impl Into<String>, amount: f64, date: NaiveDate, kind: EventType) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: None,
            amount,
            date,
            kind,
            attachment: None,
        }
    }

    pub fn income(name: impl Into<String>, amount: f64, date: NaiveDate) -> Self {
        Self::new(name, amount, date, EventType::Income)
    }

    pub fn expense(name: impl Into<String>, amount: f64, date: NaiveDate) -> Self {
        Self::new(name, amount, date, EventType::Expense)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_attachment(mut self, attachment: impl Into<String>) -> Self {
        self.attachment = Some(attachment.into());
        self
    }

    pub fn month_key(&self) -> MonthKey {
        MonthKey::from_date(self.date)
    }

    pub fn is_income(&self) -> bool {
        self.kind == EventType::Income
    }
}

impl Identifiable for Event {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Amounted for Event {
    fn amount(&self) -> f64 {
        self.amount
    }

    fn signed_amount(&self) -> f64 {
        match self.kind {
            EventType::Income => self.amount,
            EventType::Expense => -self.amount,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
/// Direction of an event. The amount itself is never signed.
pub enum EventType {
    #[serde(alias = "ingreso")]
    Income,
    #[serde(alias = "egreso")]
    Expense,
}

impl EventType {
    pub fn as_str(self) -> &'static str {
        match self {
            EventType::Income => "income",
            EventType::Expense => "expense",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = UnknownEventType;

    /// Accepts `income`/`expense` plus the legacy `ingreso`/`egreso` labels.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "income" | "ingreso" => Ok(EventType::Income),
            "expense" | "egreso" => Ok(EventType::Expense),
            other => Err(UnknownEventType(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownEventType(pub String);

impl fmt::Display for UnknownEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown event type `{}`", self.0)
    }
}

impl std::error::Error for UnknownEventType {}
