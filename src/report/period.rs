//! Selecting the transactions of one calendar month.

use std::fmt;

use serde::Deserialize;

use crate::transaction::Transaction;

/// A calendar month, displayed as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(super) struct PeriodKey {
    pub year: i32,
    pub month: u8,
}

impl PeriodKey {
    fn of(transaction: &Transaction) -> Self {
        Self {
            year: transaction.timestamp.year(),
            month: u8::from(transaction.timestamp.month()),
        }
    }

    /// Parse a `YYYY-MM` key.
    fn parse(text: &str) -> Option<Self> {
        let (year, month) = text.trim().split_once('-')?;

        if year.len() != 4 || month.len() != 2 {
            return None;
        }

        let year = year.parse::<i32>().ok()?;
        let month = month.parse::<u8>().ok().filter(|month| (1..=12).contains(month))?;

        Some(Self { year, month })
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// The value of the period selector for all periods.
pub(super) const ALL_PERIODS: &str = "all";

/// Which transactions a report covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Period {
    All,
    /// The month given in the query string. It may not parse or may not be
    /// present in the table, in which case it matches nothing.
    Month(String),
}

impl Period {
    /// Interpret the `period` query parameter. Absent, empty and `all` select every period.
    pub fn from_query(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") | Some(ALL_PERIODS) => Period::All,
            Some(key) => Period::Month(key.to_owned()),
        }
    }

    /// The value submitted by the period selector.
    pub fn query_value(&self) -> &str {
        match self {
            Period::All => ALL_PERIODS,
            Period::Month(key) => key,
        }
    }
}

/// The query string of the reports page.
#[derive(Debug, Default, Deserialize)]
pub struct PeriodQuery {
    pub period: Option<String>,
}

/// The distinct months in `transactions`, newest first.
pub(super) fn available_periods(transactions: &[Transaction]) -> Vec<PeriodKey> {
    let mut periods: Vec<PeriodKey> = transactions.iter().map(PeriodKey::of).collect();

    periods.sort_unstable_by(|a, b| b.cmp(a));
    periods.dedup();

    periods
}

/// The transactions in `period`, in their original order.
pub(super) fn filter_by_period(transactions: &[Transaction], period: &Period) -> Vec<Transaction> {
    match period {
        Period::All => transactions.to_vec(),
        Period::Month(key) => match PeriodKey::parse(key) {
            Some(key) => transactions
                .iter()
                .filter(|transaction| PeriodKey::of(transaction) == key)
                .cloned()
                .collect(),
            None => Vec::new(),
        },
    }
}
