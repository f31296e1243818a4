//! Reports module
//!
//! Shows income, expense and balance totals for a chosen month, or for all
//! time, along with a pie chart of expenses by category.

mod aggregation;
mod cards;
mod charts;
mod handlers;
mod period;

pub use handlers::get_reports_page;
