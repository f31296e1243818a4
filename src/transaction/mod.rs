//! Recording, listing and deleting transactions.

mod add_page;
mod amount;
mod category;
mod core;
mod create_endpoint;
mod delete_endpoint;
mod form;
mod ledger_page;
mod table;

pub use add_page::get_add_transaction_page;
pub use amount::{format_amount, max_amount, parse_amount};
pub use category::{Categories, DEFAULT_CATEGORIES};
pub use core::{TIMESTAMP_FORMAT, Transaction, TransactionKind};
pub use create_endpoint::create_transaction_endpoint;
pub use delete_endpoint::delete_transactions_endpoint;
pub use ledger_page::get_ledger_page;
