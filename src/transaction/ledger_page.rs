//! The page listing every transaction, where transactions can be selected and deleted.

use std::sync::Arc;

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error, endpoints,
    html::{BUTTON_DANGER_STYLE, PAGE_CONTAINER_STYLE, base, link, loading_spinner},
    navigation::NavBar,
    store::RecordStore,
    transaction::{Transaction, table::TransactionTable},
};

fn ledger_view(transactions: &[Transaction]) -> Markup {
    let nav_bar = NavBar::new(endpoints::LEDGER_VIEW).into_html();

    let content = html! {
        (nav_bar)

        div class={(PAGE_CONTAINER_STYLE) " max-w-5xl pb-24 lg:pb-8"}
        {
            div class="flex w-full justify-between items-baseline mb-4"
            {
                h2 class="text-xl font-bold" { "Ledger" }
                p class="text-sm text-gray-500 dark:text-gray-400"
                {
                    (transactions.len()) " transactions, newest first"
                }
            }

            @if transactions.is_empty() {
                p
                {
                    "No transactions yet. "
                    (link(endpoints::ADD_VIEW, "Record your first one"))
                    "."
                }
            } @else {
                form
                    hx-post=(endpoints::DELETE_TRANSACTIONS_API)
                    hx-target-error="#alert-container"
                    hx-confirm="Delete the selected transactions? This cannot be undone."
                    class="w-full space-y-4"
                {
                    (TransactionTable::selectable(transactions).into_html())

                    button type="submit" id="delete-button" class=(BUTTON_DANGER_STYLE)
                    {
                        span
                            id="indicator"
                            class="inline htmx-indicator"
                        {
                            (loading_spinner())
                        }
                        " Delete selected"
                    }
                }
            }
        }
    };

    base("Ledger", &[], &content)
}

/// The state needed for the ledger page.
#[derive(Clone)]
pub struct LedgerPageState {
    /// Where the transactions are loaded from.
    pub store: Arc<dyn RecordStore>,
}

impl FromRef<AppState> for LedgerPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// Renders every transaction with a checkbox for deleting it.
pub async fn get_ledger_page(State(state): State<LedgerPageState>) -> Result<Response, Error> {
    let transactions = state
        .store
        .load()
        .await
        .inspect_err(|error| tracing::error!("Failed to load transactions for ledger: {error}"))?;

    Ok(ledger_view(&transactions).into_response())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::extract::State;
    use scraper::Selector;
    use time::macros::datetime;

    use crate::{
        endpoints,
        test_utils::{
            RecordingStore, assert_hx_endpoint, assert_status_ok, assert_valid_html,
            must_get_form, parse_html_document, transaction,
        },
        transaction::{
            TransactionKind,
            ledger_page::{LedgerPageState, get_ledger_page},
        },
    };

    #[tokio::test]
    async fn ledger_has_a_checkbox_per_transaction() {
        let store = RecordingStore::with_rows(vec![
            transaction(datetime!(2024-03-02 10:00), TransactionKind::Expense, "Food", 5),
            transaction(datetime!(2024-03-01 10:00), TransactionKind::Income, "Salary", 100),
        ]);
        let state = LedgerPageState {
            store: Arc::new(store),
        };

        let response = get_ledger_page(State(state)).await.unwrap();

        assert_status_ok(&response);
        let document = parse_html_document(response).await;
        assert_valid_html(&document);
        let form = must_get_form(&document);
        assert_hx_endpoint(&form, endpoints::DELETE_TRANSACTIONS_API, "hx-post");
        assert_eq!(
            form.select(&Selector::parse("input[type=checkbox]").unwrap())
                .count(),
            2
        );
    }

    #[tokio::test]
    async fn empty_ledger_has_no_form() {
        let state = LedgerPageState {
            store: Arc::new(RecordingStore::default()),
        };

        let response = get_ledger_page(State(state)).await.unwrap();

        let document = parse_html_document(response).await;
        assert_valid_html(&document);
        assert_eq!(document.select(&Selector::parse("form").unwrap()).count(), 0);
    }
}
