//! Defines the endpoint for deleting the transactions selected on the ledger page.

use std::{collections::BTreeSet, sync::Arc};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use serde::Deserialize;

use crate::{AppState, Error, endpoints, store::RecordStore, transaction::Transaction};

/// The state needed to delete transactions.
#[derive(Clone)]
pub struct DeleteTransactionsState {
    /// Where the transactions are deleted from.
    pub store: Arc<dyn RecordStore>,
}

impl FromRef<AppState> for DeleteTransactionsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// A row picked for deletion, as `position:fingerprint`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct RowSelection {
    position: usize,
    fingerprint: String,
}

impl TryFrom<String> for RowSelection {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let (position, fingerprint) = value
            .split_once(':')
            .ok_or_else(|| format!("invalid row selection \"{value}\""))?;
        let position = position
            .parse()
            .map_err(|_| format!("invalid row position \"{position}\""))?;

        Ok(Self {
            position,
            fingerprint: fingerprint.to_owned(),
        })
    }
}

/// The form data for deleting transactions.
#[derive(Debug, Deserialize)]
pub struct DeleteForm {
    /// The ticked rows. Empty when nothing was ticked.
    #[serde(default)]
    pub selected: Vec<RowSelection>,
}

/// A route handler for deleting the selected transactions, redirects to the ledger on success.
///
/// Rows are selected by position, so the current table is checked first: if
/// any selected row no longer matches what the user saw, nothing is deleted.
pub async fn delete_transactions_endpoint(
    State(state): State<DeleteTransactionsState>,
    Form(form): Form<DeleteForm>,
) -> Response {
    if form.selected.is_empty() {
        tracing::debug!("Delete requested with no transactions selected");
        return redirect_to_ledger();
    }

    let transactions = match state.store.load().await {
        Ok(transactions) => transactions,
        Err(error) => {
            tracing::error!("could not load transactions to delete: {error}");
            return error.into_alert_response();
        }
    };

    let positions = match verify_selection(&form.selected, &transactions) {
        Ok(positions) => positions,
        Err(error) => {
            tracing::error!("Refused to delete transactions: {error}");
            return error.into_alert_response();
        }
    };

    if let Err(error) = state.store.delete(&positions).await {
        tracing::error!("could not delete transactions: {error}");
        return error.into_alert_response();
    }

    tracing::info!("Deleted {} transactions", positions.len());

    redirect_to_ledger()
}

fn redirect_to_ledger() -> Response {
    (
        HxRedirect(endpoints::LEDGER_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}

/// The positions of `selection` if every selected row still has the fingerprint the user saw.
fn verify_selection(
    selection: &[RowSelection],
    transactions: &[Transaction],
) -> Result<BTreeSet<usize>, Error> {
    selection
        .iter()
        .map(|selected| match transactions.get(selected.position) {
            Some(transaction) if transaction.fingerprint() == selected.fingerprint => {
                Ok(selected.position)
            }
            _ => Err(Error::StaleSelection),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{extract::State, http::StatusCode, response::IntoResponse};
    use axum_extra::extract::Form;
    use time::macros::datetime;

    use crate::{
        endpoints,
        test_utils::{RecordingStore, assert_hx_redirect, transaction},
        transaction::{
            Transaction, TransactionKind,
            delete_endpoint::{
                DeleteForm, DeleteTransactionsState, RowSelection, delete_transactions_endpoint,
            },
        },
    };

    fn rows() -> Vec<Transaction> {
        (1..=5)
            .rev()
            .map(|day| {
                transaction(
                    datetime!(2024-03-01 10:00) + time::Duration::days(day),
                    TransactionKind::Expense,
                    "Food",
                    day,
                )
            })
            .collect()
    }

    fn select(position: usize, transaction: &Transaction) -> RowSelection {
        RowSelection::try_from(format!("{position}:{}", transaction.fingerprint())).unwrap()
    }

    #[test]
    fn parses_row_selection() {
        let selection = RowSelection::try_from("3:abc123".to_owned()).unwrap();

        assert_eq!(
            selection,
            RowSelection {
                position: 3,
                fingerprint: "abc123".to_owned()
            }
        );
        assert!(RowSelection::try_from("abc123".to_owned()).is_err());
        assert!(RowSelection::try_from("x:abc123".to_owned()).is_err());
    }

    #[test]
    fn deserializes_repeated_selection_fields() {
        let form: DeleteForm = serde_html_form::from_str("selected=1%3Aaa&selected=3%3Abb").unwrap();

        assert_eq!(
            form.selected
                .iter()
                .map(|selected| selected.position)
                .collect::<Vec<_>>(),
            vec![1, 3]
        );

        let empty: DeleteForm = serde_html_form::from_str("").unwrap();
        assert!(empty.selected.is_empty());
    }

    #[tokio::test]
    async fn deletes_selected_rows() {
        let rows = rows();
        let store = Arc::new(RecordingStore::with_rows(rows.clone()));
        let form = DeleteForm {
            selected: vec![select(1, &rows[1]), select(3, &rows[3])],
        };

        let response = delete_transactions_endpoint(
            State(DeleteTransactionsState {
                store: store.clone(),
            }),
            Form(form),
        )
        .await
        .into_response();

        assert_hx_redirect(&response, endpoints::LEDGER_VIEW);
        assert_eq!(
            store.rows(),
            vec![rows[0].clone(), rows[2].clone(), rows[4].clone()]
        );
    }

    #[tokio::test]
    async fn stale_selection_deletes_nothing() {
        let rows = rows();
        let store = Arc::new(RecordingStore::with_rows(rows.clone()));
        // The row the user saw at position 1 has since moved to position 2.
        let form = DeleteForm {
            selected: vec![select(1, &rows[2])],
        };

        let response = delete_transactions_endpoint(
            State(DeleteTransactionsState {
                store: store.clone(),
            }),
            Form(form),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(store.delete_count(), 0);
        assert_eq!(store.rows(), rows);
    }

    #[tokio::test]
    async fn selection_past_the_end_is_stale() {
        let rows = rows();
        let store = Arc::new(RecordingStore::with_rows(rows.clone()));
        let form = DeleteForm {
            selected: vec![select(9, &rows[0])],
        };

        let response = delete_transactions_endpoint(
            State(DeleteTransactionsState {
                store: store.clone(),
            }),
            Form(form),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(store.delete_count(), 0);
    }

    #[tokio::test]
    async fn empty_selection_is_a_no_op() {
        let store = Arc::new(RecordingStore::with_rows(rows()));

        let response = delete_transactions_endpoint(
            State(DeleteTransactionsState {
                store: store.clone(),
            }),
            Form(DeleteForm { selected: vec![] }),
        )
        .await
        .into_response();

        assert_hx_redirect(&response, endpoints::LEDGER_VIEW);
        assert_eq!(store.delete_count(), 0);
        assert_eq!(store.rows().len(), 5);
    }
}
