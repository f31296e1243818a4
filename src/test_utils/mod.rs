#![allow(missing_docs)]

pub(crate) mod form;
pub(crate) mod html;
pub(crate) mod http;
pub(crate) mod store;

pub(crate) use form::{
    assert_form_input, assert_form_submit_button_with_text, assert_hx_endpoint, must_get_form,
};
pub(crate) use html::{assert_valid_html, parse_html_document};
pub(crate) use http::{assert_hx_redirect, assert_status_ok};
pub(crate) use store::RecordingStore;

use rust_decimal::Decimal;
use time::PrimitiveDateTime;

use crate::transaction::{Transaction, TransactionKind};

/// A transaction with a fixed note, for tests that only care about the other fields.
pub(crate) fn transaction(
    timestamp: PrimitiveDateTime,
    kind: TransactionKind,
    category: &str,
    amount: impl Into<Decimal>,
) -> Transaction {
    Transaction {
        timestamp,
        kind,
        category: category.to_owned(),
        note: String::new(),
        amount: amount.into(),
    }
}
