//! Defines the core data model for transactions.

use rust_decimal::Decimal;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use time::{PrimitiveDateTime, format_description::BorrowedFormatItem, macros::format_description};

use crate::{
    Error,
    transaction::{
        amount::{format_amount, max_amount},
        category::Categories,
    },
};

/// How timestamps are written to and read from the backing store, e.g. "2024-03-05 14:30".
pub const TIMESTAMP_FORMAT: &[BorrowedFormatItem] =
    format_description!("[year]-[month]-[day] [hour]:[minute]");

// ============================================================================
// MODELS
// ============================================================================

/// Whether money was spent or earned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Expense,
    Income,
}

impl TransactionKind {
    /// The label shown in the user interface.
    pub fn label(self) -> &'static str {
        match self {
            TransactionKind::Expense => "Expense",
            TransactionKind::Income => "Income",
        }
    }

    /// The value written to the `Tür` column of the backing store.
    pub fn stored_value(self) -> &'static str {
        match self {
            TransactionKind::Expense => "Gider",
            TransactionKind::Income => "Gelir",
        }
    }

    /// The value used for the kind in HTML forms.
    pub fn form_value(self) -> &'static str {
        match self {
            TransactionKind::Expense => "expense",
            TransactionKind::Income => "income",
        }
    }

    /// Parses the value of the `Tür` column, returning `None` for anything
    /// other than the two known kinds.
    pub fn from_stored_value(value: &str) -> Option<Self> {
        match value.trim() {
            "Gider" => Some(TransactionKind::Expense),
            "Gelir" => Some(TransactionKind::Income),
            _ => None,
        }
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// To create a new `Transaction` from user input, use [Transaction::build].
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// When the transaction was recorded, to the minute.
    pub timestamp: PrimitiveDateTime,
    /// Whether this is an expense or an income.
    pub kind: TransactionKind,
    /// The label used to group transactions in reports.
    pub category: String,
    /// Free text detailing the transaction.
    pub note: String,
    /// The amount of money, always non-negative. The sign is given by `kind`.
    pub amount: Decimal,
}

impl Transaction {
    /// Start building a new transaction from user input.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(kind: TransactionKind, amount: Decimal, category: &str) -> TransactionBuilder {
        TransactionBuilder {
            kind,
            amount,
            category: category.to_owned(),
            note: String::new(),
        }
    }

    /// The timestamp as stored, e.g. "2024-03-05 14:30".
    pub fn formatted_timestamp(&self) -> String {
        format_timestamp(self.timestamp)
    }

    /// A digest of every stored field.
    ///
    /// Two rows with the same fingerprint are indistinguishable in the
    /// backing store. Used to check that a row selected by its position is
    /// still the row the user saw.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();

        for field in [
            self.formatted_timestamp().as_str(),
            self.kind.stored_value(),
            self.category.as_str(),
            self.note.as_str(),
            format_amount(self.amount).as_str(),
        ] {
            hasher.update(field.as_bytes());
            hasher.update([0x1f]);
        }

        let digest = format!("{:x}", hasher.finalize());
        digest[..16].to_owned()
    }
}

/// Formats `timestamp` with [TIMESTAMP_FORMAT].
fn format_timestamp(timestamp: PrimitiveDateTime) -> String {
    format!(
        "{:04}-{:02}-{:02} {:02}:{:02}",
        timestamp.year(),
        u8::from(timestamp.month()),
        timestamp.day(),
        timestamp.hour(),
        timestamp.minute()
    )
}

/// A builder for creating [Transaction] instances from user input.
///
/// Once all fields are set, call `finalize()` to validate the input and
/// stamp the transaction with the time it was recorded.
#[derive(Debug, PartialEq, Clone)]
pub struct TransactionBuilder {
    kind: TransactionKind,
    amount: Decimal,
    category: String,
    note: String,
}

impl TransactionBuilder {
    /// Set the note for the transaction, kept exactly as typed.
    pub fn note(mut self, note: &str) -> Self {
        self.note = note.to_owned();
        self
    }

    /// Validate the transaction and stamp it with `now`, truncated to the minute.
    ///
    /// # Errors
    /// Returns [Error::ValidationFailed] if the amount, rounded to two decimal
    /// places, is not greater than zero or is above [max_amount], or if the
    /// category is not one of `categories`.
    pub fn finalize(
        self,
        now: PrimitiveDateTime,
        categories: &Categories,
    ) -> Result<Transaction, Error> {
        let amount = self.amount.round_dp(2);

        if amount <= Decimal::ZERO {
            return Err(Error::ValidationFailed(
                "Enter an amount greater than zero.".to_owned(),
            ));
        }

        if amount > max_amount() {
            return Err(Error::ValidationFailed(format!(
                "Enter an amount no greater than {}.",
                format_amount(max_amount())
            )));
        }

        let category = self.category.trim();
        if !categories.contains(category) {
            return Err(Error::ValidationFailed(format!(
                "\"{category}\" is not one of the available categories."
            )));
        }

        let timestamp = now
            .replace_second(0)
            .and_then(|timestamp| timestamp.replace_nanosecond(0))
            .unwrap_or(now);

        Ok(Transaction {
            timestamp,
            kind: self.kind,
            category: category.to_owned(),
            note: self.note,
            amount,
        })
    }
}
