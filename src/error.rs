//! Defines the app level error type and conversions to rendered HTML pages and alerts.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{alert::Alert, internal_server_error::InternalServerError};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The backing store could not be reached, opened or authorized.
    ///
    /// The request cannot continue without the table, so this is rendered as
    /// a full error page rather than an alert.
    #[error("the record store is unavailable: {0}")]
    StoreUnavailable(String),

    /// Appending or deleting records could not be persisted.
    #[error("could not save changes to the record store: {0}")]
    WriteFailed(String),

    /// A stored row could not be decoded into a transaction.
    ///
    /// `row` is the 1-based row number in the backing store, counting the
    /// header as row 1.
    #[error("row {row} is malformed: {reason}")]
    MalformedRecord {
        /// The 1-based row number including the header row.
        row: usize,
        /// What was wrong with the row.
        reason: String,
    },

    /// The user submitted data that cannot be saved, e.g., a zero amount.
    #[error("{0}")]
    ValidationFailed(String),

    /// The rows selected for deletion no longer match the stored table.
    ///
    /// Rows are selected by their position in the table when the page was
    /// rendered, so any write in between makes the selection unsafe to apply.
    #[error("the selected transactions changed since the page was loaded")]
    StaleSelection,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::StoreUnavailable(reason) => {
                tracing::error!("Record store unavailable: {reason}");
                InternalServerError {
                    description: "Could not open your ledger",
                    fix: &format!(
                        "The record store could not be reached: {reason}. \
                        Check the server configuration and credentials, then reload the page."
                    ),
                }
                .into_response()
            }
            Error::MalformedRecord { row, reason } => InternalServerError {
                description: "Your ledger contains a broken row",
                fix: &format!("Row {row} could not be read ({reason}). Fix or remove it and reload."),
            }
            .into_response(),
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Convert the error into an HTTP response with an HTML alert.
    pub fn into_alert_response(self) -> Response {
        let (status_code, alert) = match self {
            Error::ValidationFailed(details) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Could not save transaction".to_owned(),
                    details,
                },
            ),
            Error::StaleSelection => (
                StatusCode::CONFLICT,
                Alert::Error {
                    message: "The ledger has changed".to_owned(),
                    details: "Some of the selected transactions changed since the page was \
                        loaded. Refresh the page and select them again."
                        .to_owned(),
                },
            ),
            Error::WriteFailed(reason) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Could not save changes".to_owned(),
                    details: format!("{reason}. Your input has been kept, try again."),
                },
            ),
            Error::StoreUnavailable(reason) => (
                StatusCode::SERVICE_UNAVAILABLE,
                Alert::Error {
                    message: "Could not open your ledger".to_owned(),
                    details: reason,
                },
            ),
            Error::MalformedRecord { row, reason } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Your ledger contains a broken row".to_owned(),
                    details: format!("Row {row} could not be read ({reason})."),
                },
            ),
            Error::InvalidTimezoneError(timezone) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Invalid Timezone Settings".to_owned(),
                    details: format!(
                        "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                    ),
                },
            ),
        };

        (status_code, alert.into_html()).into_response()
    }
}
