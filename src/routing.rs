//! Application router configuration.

use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};

use crate::{
    AppState, endpoints,
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
    report::get_reports_page,
    transaction::{
        create_transaction_endpoint, delete_transactions_endpoint, get_add_transaction_page,
        get_ledger_page,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::ADD_VIEW, get(get_add_transaction_page))
        .route(endpoints::REPORTS_VIEW, get(get_reports_page))
        .route(endpoints::LEDGER_VIEW, get(get_ledger_page))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        )
        .route(
            endpoints::TRANSACTIONS_API,
            post(create_transaction_endpoint),
        )
        .route(
            endpoints::DELETE_TRANSACTIONS_API,
            post(delete_transactions_endpoint),
        )
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the page for recording transactions.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::ADD_VIEW)
}
