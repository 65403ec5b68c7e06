//! Presentation helpers. Rounding happens here and only here.

use chrono::NaiveDate;
use walletfy_domain::{Event, EventType, MonthSummary};

pub const DEFAULT_CURRENCY_SYMBOL: &str = "$";
pub const DEFAULT_PRECISION: u8 = 2;
const EVENT_DATE_FORMAT: &str = "%d/%m/%Y";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormat {
    pub symbol: String,
    pub precision: u8,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            symbol: DEFAULT_CURRENCY_SYMBOL.into(),
            precision: DEFAULT_PRECISION,
        }
    }
}

impl CurrencyFormat {
    pub fn new(symbol: impl Into<String>, precision: u8) -> Self {
        Self {
            symbol: symbol.into(),
            precision,
        }
    }

    /// `-$30.00` style rendering of a balance.
    pub fn balance(&self, value: f64) -> String {
        let digits = format_amount(value.abs(), self.precision);
        if is_negative_at_precision(value, self.precision) {
            format!("-{}{}", self.symbol, digits)
        } else {
            format!("{}{}", self.symbol, digits)
        }
    }

    /// `+ $50.00` for income, `- $30.00` for expense.
    pub fn event_amount(&self, event: &Event) -> String {
        let sign = match event.kind {
            EventType::Income => '+',
            EventType::Expense => '-',
        };
        format!(
            "{} {}{}",
            sign,
            self.symbol,
            format_amount(event.amount, self.precision)
        )
    }
}

/// Rounds `value` to `precision` decimals for display.
pub fn format_amount(value: f64, precision: u8) -> String {
    let precision = usize::from(precision);
    let rendered = format!("{:.*}", precision, value);
    match rendered.strip_prefix('-') {
        Some(rest) if rest.chars().all(|c| c == '0' || c == '.') => rest.to_string(),
        _ => rendered,
    }
}

pub fn format_event_date(date: NaiveDate) -> String {
    date.format(EVENT_DATE_FORMAT).to_string()
}

/// `January 2025` style heading for a month summary.
pub fn month_heading(summary: &MonthSummary) -> String {
    format!("{} {}", summary.month_name, summary.year)
}

fn is_negative_at_precision(value: f64, precision: u8) -> bool {
    format_amount(value, precision).starts_with('-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_round_to_precision() {
        assert_eq!(format_amount(50.0, 2), "50.00");
        assert_eq!(format_amount(0.1 + 0.2, 2), "0.30");
        assert_eq!(format_amount(1234.5678, 0), "1235");
    }

    #[test]
    fn tiny_negatives_do_not_render_as_negative_zero() {
        assert_eq!(format_amount(-0.0001, 2), "0.00");
        assert_eq!(CurrencyFormat::default().balance(-0.0001), "$0.00");
    }

    #[test]
    fn balances_and_event_amounts_carry_signs() {
        let fmt = CurrencyFormat::default();
        assert_eq!(fmt.balance(-20.0), "-$20.00");
        assert_eq!(fmt.balance(80.0), "$80.00");

        let date = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        assert_eq!(fmt.event_amount(&Event::expense("Bus", 30.0, date)), "- $30.00");
        assert_eq!(
            CurrencyFormat::new("€", 1).event_amount(&Event::income("Gift", 12.34, date)),
            "+ €12.3"
        );
    }

    #[test]
    fn event_dates_render_day_first() {
        let date = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
        assert_eq!(format_event_date(date), "01/02/2025");
    }

    #[test]
    fn month_headings_name_the_month_and_year() {
        let events = vec![
            Event::income("Salary", 100.0, NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()),
            Event::expense("Rent", 40.0, NaiveDate::from_ymd_opt(2025, 1, 3).unwrap()),
        ];
        let report = crate::BalanceService::report(&events, 0.0);
        let headings: Vec<String> = report.month_summaries.iter().map(month_heading).collect();
        assert_eq!(headings, vec!["December 2024", "January 2025"]);
    }
}
