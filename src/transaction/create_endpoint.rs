//! Defines the endpoint for recording a new transaction.
use std::sync::Arc;

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use serde::Deserialize;

use crate::{
    AppState, Error, endpoints,
    store::RecordStore,
    timezone::local_now,
    transaction::{Categories, Transaction, TransactionKind, parse_amount},
};

/// The state needed to record a transaction.
#[derive(Clone)]
pub struct CreateTransactionState {
    /// Where the new transaction is saved.
    pub store: Arc<dyn RecordStore>,
    /// The local timezone as a canonical timezone name, e.g. "Europe/Istanbul".
    pub local_timezone: String,
    /// The categories a transaction may be filed under.
    pub categories: Categories,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            local_timezone: state.local_timezone.clone(),
            categories: state.categories.clone(),
        }
    }
}

/// The form data for recording a transaction.
#[derive(Debug, Deserialize)]
pub struct TransactionForm {
    /// Whether money was spent or earned.
    pub kind: TransactionKind,
    /// The amount as typed, with either a decimal point or comma.
    pub amount: String,
    /// One of the configured categories.
    pub category: String,
    /// Text detailing the transaction.
    #[serde(default)]
    pub note: Option<String>,
}

/// A route handler for recording a new transaction, redirects to the add page on success.
///
/// Invalid input is answered with an alert and nothing is saved, so the form
/// keeps what the user entered.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let transaction = match validate(&state, &form) {
        Ok(transaction) => transaction,
        Err(error) => {
            tracing::error!("Rejected new transaction: {error}");
            return error.into_alert_response();
        }
    };

    if let Err(error) = state.store.append(transaction).await {
        tracing::error!("could not record transaction: {error}");

        return error.into_alert_response();
    }

    tracing::info!("Recorded a new {} transaction", form.kind.label().to_lowercase());

    (
        HxRedirect(endpoints::ADD_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}

fn validate(state: &CreateTransactionState, form: &TransactionForm) -> Result<Transaction, Error> {
    let amount = parse_amount(&form.amount).ok_or_else(|| {
        Error::ValidationFailed(format!("\"{}\" is not a valid amount.", form.amount.trim()))
    })?;
    let now = local_now(&state.local_timezone)?;

    Transaction::build(form.kind, amount, &form.category)
        .note(form.note.as_deref().unwrap_or_default())
        .finalize(now, &state.categories)
}

#[cfg(test)]
mod tests {
    use std::{str::FromStr, sync::Arc};

    use axum::{extract::State, http::StatusCode, response::IntoResponse};
    use axum_extra::extract::Form;
    use rust_decimal::Decimal;

    use crate::{
        endpoints,
        test_utils::{RecordingStore, assert_hx_redirect},
        transaction::{
            Categories, TransactionKind,
            create_endpoint::{
                CreateTransactionState, TransactionForm, create_transaction_endpoint,
            },
        },
    };

    fn state_with(store: Arc<RecordingStore>) -> CreateTransactionState {
        CreateTransactionState {
            store,
            local_timezone: "Etc/UTC".to_owned(),
            categories: Categories::new(vec!["Food".to_owned(), "Salary".to_owned()]).unwrap(),
        }
    }

    fn form(amount: &str, category: &str) -> TransactionForm {
        TransactionForm {
            kind: TransactionKind::Expense,
            amount: amount.to_owned(),
            category: category.to_owned(),
            note: Some("lunch".to_owned()),
        }
    }

    #[tokio::test]
    async fn can_create_transaction() {
        let store = Arc::new(RecordingStore::default());

        let response =
            create_transaction_endpoint(State(state_with(store.clone())), Form(form("12,5", "Food")))
                .await
                .into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, endpoints::ADD_VIEW);
        let rows = store.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].amount, Decimal::from_str("12.50").unwrap());
        assert_eq!(rows[0].category, "Food");
        assert_eq!(rows[0].note, "lunch");
        assert_eq!(rows[0].kind, TransactionKind::Expense);
    }

    #[tokio::test]
    async fn zero_amount_is_rejected_without_saving() {
        let store = Arc::new(RecordingStore::default());

        let response =
            create_transaction_endpoint(State(state_with(store.clone())), Form(form("0", "Food")))
                .await
                .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(store.append_count(), 0);
    }

    #[tokio::test]
    async fn text_amount_is_rejected_without_saving() {
        let store = Arc::new(RecordingStore::default());

        let response =
            create_transaction_endpoint(State(state_with(store.clone())), Form(form("ten", "Food")))
                .await
                .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(store.append_count(), 0);
    }

    #[tokio::test]
    async fn unknown_category_is_rejected_without_saving() {
        let store = Arc::new(RecordingStore::default());

        let response =
            create_transaction_endpoint(State(state_with(store.clone())), Form(form("5", "Yachts")))
                .await
                .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(store.append_count(), 0);
    }

    #[tokio::test]
    async fn failed_write_returns_error_alert() {
        let store = Arc::new(RecordingStore::default().failing_writes());

        let response =
            create_transaction_endpoint(State(state_with(store.clone())), Form(form("5", "Food")))
                .await
                .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(store.append_count(), 1);
        assert!(store.rows().is_empty());
    }
}
