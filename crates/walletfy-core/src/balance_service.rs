//! Monthly balance aggregation.
//!
//! Every call recomputes the whole breakdown from the event list; nothing is
//! cached between calls. Amounts are accumulated as `f64` in insertion order
//! and never rounded here, rounding belongs to [`crate::format`].

use std::collections::BTreeMap;

use walletfy_domain::{BalanceReport, Event, EventType, MonthKey, MonthSummary};

#[derive(Default)]
struct MonthBucket {
    total_income: f64,
    total_expense: f64,
    events: Vec<Event>,
}

pub struct BalanceService;

impl BalanceService {
    /// Groups `events` by calendar month and folds the monthly balances into a
    /// running global balance seeded with `initial_balance`.
    ///
    /// Months come out oldest first and only months holding at least one event
    /// are present. Within a month events are ordered by date, equal dates keep
    /// their relative input order.
    pub fn report(events: &[Event], initial_balance: f64) -> BalanceReport {
        let mut buckets: BTreeMap<MonthKey, MonthBucket> = BTreeMap::new();
        for event in events {
            let bucket = buckets.entry(event.month_key()).or_default();
            match event.kind {
                EventType::Income => bucket.total_income += event.amount,
                EventType::Expense => bucket.total_expense += event.amount,
            }
            bucket.events.push(event.clone());
        }

        let mut running = initial_balance;
        let mut month_summaries = Vec::with_capacity(buckets.len());
        for (key, mut bucket) in buckets {
            bucket.events.sort_by_key(|event| event.date);
            let monthly_balance = bucket.total_income - bucket.total_expense;
            running += monthly_balance;
            month_summaries.push(MonthSummary {
                month_key: key,
                month_name: key.month_name().to_string(),
                year: key.year,
                total_income: bucket.total_income,
                total_expense: bucket.total_expense,
                monthly_balance,
                global_balance: running,
                events: bucket.events,
            });
        }

        BalanceReport {
            month_summaries,
            current_global_balance: running,
        }
    }

    /// Balance after the most recent month, without building the breakdown.
    pub fn current_balance(events: &[Event], initial_balance: f64) -> f64 {
        Self::report(events, initial_balance).current_global_balance
    }
}
