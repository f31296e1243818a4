//! The URIs of the pages and form endpoints.

/// The root route which redirects to the page for adding a transaction.
pub const ROOT: &str = "/";
/// The page with the form for recording a transaction and the latest transactions.
pub const ADD_VIEW: &str = "/add";
/// The page with the totals and category breakdown for a period.
pub const REPORTS_VIEW: &str = "/reports";
/// The page listing every transaction with checkboxes for deleting them.
pub const LEDGER_VIEW: &str = "/ledger";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";

/// The route for recording a new transaction.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route for deleting the selected transactions.
pub const DELETE_TRANSACTIONS_API: &str = "/api/transactions/delete";
