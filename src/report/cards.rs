//! The income, expense and balance cards at the top of the reports page.

use maud::{Markup, html};
use rust_decimal::Decimal;

use crate::{html::format_currency, report::aggregation::Totals};

const CARD_STYLE: &str = "bg-white dark:bg-gray-800 border border-gray-200 \
    dark:border-gray-700 rounded-lg p-4 shadow-md";

/// Renders one card per total.
pub(super) fn totals_cards_view(totals: &Totals) -> Markup {
    let balance_style = if totals.balance < Decimal::ZERO {
        "text-red-600 dark:text-red-400"
    } else {
        "text-green-600 dark:text-green-400"
    };

    html! {
        section class="w-full mx-auto mb-8" aria-label="Totals"
        {
            div class="grid grid-cols-1 sm:grid-cols-3 gap-4"
            {
                (metric_card("Income", totals.income, ""))
                (metric_card("Expenses", totals.expense, ""))
                (metric_card("Balance", totals.balance, balance_style))
            }
        }
    }
}

fn metric_card(title: &str, amount: Decimal, amount_style: &str) -> Markup {
    html! {
        div class=(CARD_STYLE) aria-label=(format!("{title}: {}", format_currency(amount)))
        {
            h3 class="text-sm font-medium text-gray-600 dark:text-gray-400 mb-1" { (title) }
            div class={"text-3xl font-bold " (amount_style)} data-metric=(title.to_lowercase())
            {
                (format_currency(amount))
            }
        }
    }
}
