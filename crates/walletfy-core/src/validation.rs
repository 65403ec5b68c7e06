//! Schema gate every event passes before it may enter the store.
//!
//! Checks run field by field in a fixed order (id, name, description, amount,
//! date, type, attachment). Each field reports at most its first failing rule,
//! but every field is checked, so callers can flag all invalid inputs at once.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::{Map, Value};
use uuid::Uuid;
use walletfy_domain::{Event, EventType, DESCRIPTION_MAX_LEN, NAME_MAX_LEN};

const HYPHENATED_UUID_LEN: usize = 36;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventField {
    Id,
    Name,
    Description,
    Amount,
    Date,
    Type,
    Attachment,
}

impl EventField {
    /// Wire name of the field.
    pub fn as_str(self) -> &'static str {
        match self {
            EventField::Id => "id",
            EventField::Name => "name",
            EventField::Description => "description",
            EventField::Amount => "amount",
            EventField::Date => "date",
            EventField::Type => "type",
            EventField::Attachment => "attachment",
        }
    }
}

impl fmt::Display for EventField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: EventField,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Every field violation found in one candidate, in check order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub fn push(&mut self, field: EventField, message: impl Into<String>) {
        self.0.push(ValidationError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    pub fn fields(&self) -> Vec<EventField> {
        self.0.iter().map(|error| error.field).collect()
    }

    pub fn has(&self, field: EventField) -> bool {
        self.0.iter().any(|error| error.field == field)
    }

    /// Message for `field`, suitable for highlighting a form input.
    pub fn message_for(&self, field: EventField) -> Option<&str> {
        self.0
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message.as_str())
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        f.write_str(&rendered.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Validates untyped candidates and re-checks typed events.
pub struct ValidationGate;

impl ValidationGate {
    /// Turns an untyped candidate (form payload, persisted record) into an [`Event`].
    pub fn validate(candidate: &Value) -> Result<Event, ValidationErrors> {
        let empty = Map::new();
        let object = candidate.as_object().unwrap_or(&empty);
        let mut errors = ValidationErrors::default();

        let id = collect(&mut errors, EventField::Id, check_id(object.get("id")));
        let name = collect(&mut errors, EventField::Name, check_name(object.get("name")));
        let description = collect(
            &mut errors,
            EventField::Description,
            check_description(object.get("description")),
        );
        let amount = collect(
            &mut errors,
            EventField::Amount,
            check_amount(object.get("amount")),
        );
        let date = collect(&mut errors, EventField::Date, check_date(object.get("date")));
        let kind = collect(&mut errors, EventField::Type, check_type(object.get("type")));
        let attachment = collect(
            &mut errors,
            EventField::Attachment,
            check_attachment(object.get("attachment")),
        );

        match (id, name, description, amount, date, kind, attachment) {
            (
                Some(id),
                Some(name),
                Some(description),
                Some(amount),
                Some(date),
                Some(kind),
                Some(attachment),
            ) if errors.is_empty() => Ok(Event {
                id,
                name,
                description,
                amount,
                date,
                kind,
                attachment,
            }),
            _ => Err(errors),
        }
    }

    /// Applies the same rules to an event that is already typed.
    pub fn check(event: &Event) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        if let Err(message) = check_name_text(&event.name) {
            errors.push(EventField::Name, message);
        }
        if let Some(description) = event.description.as_deref() {
            if let Err(message) = check_description_text(description) {
                errors.push(EventField::Description, message);
            }
        }
        if let Err(message) = check_amount_value(event.amount) {
            errors.push(EventField::Amount, message);
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Parses the date forms accepted on input, keeping the calendar date as written.
pub fn parse_event_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(stamp) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(stamp.date());
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|stamp| stamp.date_naive())
}

fn collect<T>(
    errors: &mut ValidationErrors,
    field: EventField,
    result: Result<T, String>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(message) => {
            errors.push(field, message);
            None
        }
    }
}

fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|value| !value.is_null())
}

fn check_id(value: Option<&Value>) -> Result<Uuid, String> {
    let raw = present(value)
        .ok_or("id is required")?
        .as_str()
        .ok_or("id must be a string")?;
    if raw.len() != HYPHENATED_UUID_LEN {
        return Err("id must be a valid UUID".into());
    }
    Uuid::try_parse(raw).map_err(|_| "id must be a valid UUID".into())
}

fn check_name(value: Option<&Value>) -> Result<String, String> {
    let raw = present(value)
        .ok_or("name is required")?
        .as_str()
        .ok_or("name must be a string")?;
    check_name_text(raw)?;
    Ok(raw.to_string())
}

/// Lengths are counted in Unicode scalar values.
fn check_name_text(raw: &str) -> Result<(), String> {
    let len = raw.chars().count();
    if len == 0 {
        return Err("name is required".into());
    }
    if len > NAME_MAX_LEN {
        return Err(format!("name cannot exceed {NAME_MAX_LEN} characters"));
    }
    Ok(())
}

fn check_description(value: Option<&Value>) -> Result<Option<String>, String> {
    let Some(value) = present(value) else {
        return Ok(None);
    };
    let raw = value.as_str().ok_or("description must be a string")?;
    if raw.is_empty() {
        return Ok(None);
    }
    check_description_text(raw)?;
    Ok(Some(raw.to_string()))
}

fn check_description_text(raw: &str) -> Result<(), String> {
    if raw.chars().count() > DESCRIPTION_MAX_LEN {
        return Err(format!(
            "description cannot exceed {DESCRIPTION_MAX_LEN} characters"
        ));
    }
    Ok(())
}

fn check_amount(value: Option<&Value>) -> Result<f64, String> {
    let amount = present(value)
        .ok_or("amount is required")?
        .as_f64()
        .ok_or("amount must be a number")?;
    check_amount_value(amount)?;
    Ok(amount)
}

fn check_amount_value(amount: f64) -> Result<(), String> {
    if !amount.is_finite() {
        return Err("amount must be a finite number".into());
    }
    if amount <= 0.0 {
        return Err("amount must be a positive number".into());
    }
    Ok(())
}

fn check_date(value: Option<&Value>) -> Result<NaiveDate, String> {
    let raw = present(value)
        .ok_or("date is required")?
        .as_str()
        .ok_or("date must be a string")?;
    parse_event_date(raw).ok_or_else(|| "date must be a valid date in YYYY-MM-DD format".into())
}

fn check_type(value: Option<&Value>) -> Result<EventType, String> {
    present(value)
        .and_then(Value::as_str)
        .and_then(|raw| raw.parse::<EventType>().ok())
        .ok_or_else(|| "type must be 'income' or 'expense'".into())
}

fn check_attachment(value: Option<&Value>) -> Result<Option<String>, String> {
    let Some(value) = present(value) else {
        return Ok(None);
    };
    let raw = value.as_str().ok_or("attachment must be a string")?;
    Ok((!raw.is_empty()).then(|| raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const ID: &str = "7f0c3a52-9d8e-4b61-a1f4-2f6c5e9d0b13";

    fn candidate() -> Value {
        json!({
            "id": ID,
            "name": "Groceries",
            "description": "weekly shop",
            "amount": 54.25,
            "date": "2025-01-10",
            "type": "expense",
            "attachment": null
        })
    }

    #[test]
    fn accepts_well_formed_candidate() {
        let event = ValidationGate::validate(&candidate()).expect("valid candidate");
        assert_eq!(event.id.to_string(), ID);
        assert_eq!(event.name, "Groceries");
        assert_eq!(event.description.as_deref(), Some("weekly shop"));
        assert_eq!(event.amount, 54.25);
        assert_eq!(event.date, NaiveDate::from_ymd_opt(2025, 1, 10).unwrap());
        assert_eq!(event.kind, EventType::Expense);
        assert!(event.attachment.is_none());
    }

    #[test]
    fn reports_every_invalid_field_in_check_order() {
        let bad = json!({
            "id": "not-a-uuid",
            "name": "",
            "description": "x".repeat(101),
            "amount": -5,
            "date": "2025-02-30",
            "type": "transfer",
            "attachment": 42
        });
        let errors = ValidationGate::validate(&bad).expect_err("all fields invalid");
        assert_eq!(
            errors.fields(),
            vec![
                EventField::Id,
                EventField::Name,
                EventField::Description,
                EventField::Amount,
                EventField::Date,
                EventField::Type,
                EventField::Attachment,
            ]
        );
        assert_eq!(
            errors.message_for(EventField::Amount),
            Some("amount must be a positive number")
        );
    }

    #[test]
    fn name_length_is_bounded_in_characters() {
        let mut value = candidate();
        value["name"] = json!("ñ".repeat(20));
        assert!(ValidationGate::validate(&value).is_ok());

        // Emoji outside the BMP count once each, not as surrogate pairs.
        value["name"] = json!("💸".repeat(20));
        assert!(ValidationGate::validate(&value).is_ok());
        value["name"] = json!("💸".repeat(21));
        assert!(ValidationGate::validate(&value).is_err());

        value["name"] = json!("a".repeat(21));
        let errors = ValidationGate::validate(&value).unwrap_err();
        assert_eq!(errors.fields(), vec![EventField::Name]);
    }

    #[test]
    fn optional_fields_may_be_absent_or_empty() {
        let mut value = candidate();
        value.as_object_mut().unwrap().remove("description");
        value["attachment"] = json!("");
        let event = ValidationGate::validate(&value).unwrap();
        assert!(event.description.is_none());
        assert!(event.attachment.is_none());

        value["description"] = json!("");
        value["attachment"] = json!("data:image/png;base64,iVBORw0KGgo=");
        let event = ValidationGate::validate(&value).unwrap();
        assert!(event.description.is_none());
        assert_eq!(
            event.attachment.as_deref(),
            Some("data:image/png;base64,iVBORw0KGgo=")
        );
    }

    #[test]
    fn missing_required_fields_are_reported() {
        let errors = ValidationGate::validate(&json!({})).unwrap_err();
        assert_eq!(
            errors.fields(),
            vec![
                EventField::Id,
                EventField::Name,
                EventField::Amount,
                EventField::Date,
                EventField::Type,
            ]
        );
        assert_eq!(errors.message_for(EventField::Id), Some("id is required"));

        let errors = ValidationGate::validate(&json!("not an object")).unwrap_err();
        assert_eq!(errors.len(), 5);
    }

    #[test]
    fn amount_must_be_a_number_not_a_string() {
        let mut value = candidate();
        value["amount"] = json!("12.5");
        let errors = ValidationGate::validate(&value).unwrap_err();
        assert_eq!(
            errors.message_for(EventField::Amount),
            Some("amount must be a number")
        );

        value["amount"] = json!(0);
        assert!(ValidationGate::validate(&value).is_err());
    }

    #[test]
    fn uuid_must_be_hyphenated() {
        let mut value = candidate();
        value["id"] = json!(ID.replace('-', ""));
        let errors = ValidationGate::validate(&value).unwrap_err();
        assert_eq!(errors.fields(), vec![EventField::Id]);

        value["id"] = json!(ID.to_uppercase());
        assert!(ValidationGate::validate(&value).is_ok());
    }

    #[test]
    fn accepts_timestamp_dates_and_legacy_types() {
        let mut value = candidate();
        value["date"] = json!("2025-03-31T23:30:00-05:00");
        value["type"] = json!("ingreso");
        let event = ValidationGate::validate(&value).unwrap();
        assert_eq!(event.date, NaiveDate::from_ymd_opt(2025, 3, 31).unwrap());
        assert_eq!(event.kind, EventType::Income);

        assert_eq!(
            parse_event_date("2024-02-29T08:15:00.250"),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
        assert_eq!(parse_event_date("29/02/2024"), None);
    }

    #[test]
    fn check_flags_typed_events_that_break_the_schema() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let event = walletfy_domain::Event::income("", f64::NAN, date);
        let errors = ValidationGate::check(&event).unwrap_err();
        assert_eq!(errors.fields(), vec![EventField::Name, EventField::Amount]);

        let ok = walletfy_domain::Event::income("Bonus", 10.0, date);
        assert!(ValidationGate::check(&ok).is_ok());
    }
}
