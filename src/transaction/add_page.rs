//! Defines the route handler for the page for recording a new transaction.

use std::sync::Arc;

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error, endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, base, currency_input_styles, link,
        loading_spinner,
    },
    navigation::NavBar,
    store::RecordStore,
    transaction::{
        Categories, Transaction,
        form::{TransactionFormDefaults, transaction_form_fields},
        table::TransactionTable,
    },
};

/// How many of the latest transactions are listed under the form.
const RECENT_TRANSACTION_COUNT: usize = 5;

fn add_transaction_view(categories: &Categories, recent: &[Transaction]) -> Markup {
    let nav_bar = NavBar::new(endpoints::ADD_VIEW).into_html();
    let spinner = loading_spinner();
    let fields = transaction_form_fields(&TransactionFormDefaults::default(), categories);

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            form
                hx-post=(endpoints::TRANSACTIONS_API)
                hx-target-error="#alert-container"
                hx-disabled-elt="#submit-button"
                class="w-full space-y-4 md:space-y-6"
            {
                h2 class="text-xl font-bold" { "New Transaction" }

                (fields)

                button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
                {
                    span
                        id="indicator"
                        class="inline htmx-indicator"
                    {
                        (spinner)
                    }
                    " Save"
                }
            }
        }

        section class="flex flex-col items-center gap-4 px-6 py-8 mx-auto max-w-4xl text-gray-900 dark:text-white pb-24 lg:pb-8"
        {
            h2 class="text-xl font-bold self-start" { "Latest Transactions" }

            @if recent.is_empty() {
                p
                {
                    "Nothing recorded yet. Transactions you save will show up here."
                }
            } @else {
                (TransactionTable::new(recent).into_html())

                p class="self-start"
                {
                    "See every transaction in the " (link(endpoints::LEDGER_VIEW, "ledger")) "."
                }
            }
        }
    };

    base("Add Transaction", &[currency_input_styles()], &content)
}

/// The state needed for the page for recording a transaction.
#[derive(Clone)]
pub struct AddTransactionPageState {
    /// Where the latest transactions are loaded from.
    pub store: Arc<dyn RecordStore>,
    /// The categories offered in the form.
    pub categories: Categories,
}

impl FromRef<AppState> for AddTransactionPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            categories: state.categories.clone(),
        }
    }
}

/// Renders the page for recording a transaction.
pub async fn get_add_transaction_page(
    State(state): State<AddTransactionPageState>,
) -> Result<Response, Error> {
    let mut transactions = state
        .store
        .load()
        .await
        .inspect_err(|error| tracing::error!("Failed to load transactions for add page: {error}"))?;
    transactions.truncate(RECENT_TRANSACTION_COUNT);

    Ok(add_transaction_view(&state.categories, &transactions).into_response())
}
