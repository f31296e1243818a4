//! The reports page: totals, a period selector and the expense breakdown chart.

use std::sync::Arc;

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error, endpoints,
    html::{FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, HeadElement, PAGE_CONTAINER_STYLE, base, link},
    navigation::NavBar,
    report::{
        aggregation::{expense_by_category, totals},
        cards::totals_cards_view,
        charts::{ECHARTS_SCRIPT, chart_script, chart_view, expense_breakdown_chart},
        period::{ALL_PERIODS, Period, PeriodKey, PeriodQuery, available_periods, filter_by_period},
    },
    store::RecordStore,
};

/// The state needed for the reports page.
#[derive(Clone)]
pub struct ReportsPageState {
    /// Where the transactions are loaded from.
    pub store: Arc<dyn RecordStore>,
}

impl FromRef<AppState> for ReportsPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// Display the totals and expense breakdown for the period in the query string.
pub async fn get_reports_page(
    State(state): State<ReportsPageState>,
    Query(query): Query<PeriodQuery>,
) -> Result<Response, Error> {
    let transactions = state
        .store
        .load()
        .await
        .inspect_err(|error| tracing::error!("Failed to load transactions for reports: {error}"))?;

    if transactions.is_empty() {
        return Ok(reports_no_data_view().into_response());
    }

    let period = Period::from_query(query.period.as_deref());
    let periods = available_periods(&transactions);
    let selected = filter_by_period(&transactions, &period);

    let totals = totals(&selected);
    let breakdown = expense_by_category(&selected);

    tracing::debug!(
        "Report for period {} covers {} of {} transactions",
        period.query_value(),
        selected.len(),
        transactions.len()
    );

    let subtitle = match &period {
        Period::All => "All periods".to_owned(),
        Period::Month(key) => key.clone(),
    };

    let nav_bar = NavBar::new(endpoints::REPORTS_VIEW).into_html();
    let content = html! {
        (nav_bar)

        div class={(PAGE_CONTAINER_STYLE) " max-w-5xl pb-24 lg:pb-8"}
        {
            div class="flex w-full justify-between items-end mb-6 gap-4"
            {
                h2 class="text-xl font-bold" { "Reports" }
                (period_selector(&periods, &period))
            }

            (totals_cards_view(&totals))

            @if breakdown.is_empty() {
                p id="no-expenses" class="text-gray-500 dark:text-gray-400"
                {
                    "No expenses in this period."
                }
            } @else {
                (chart_view())
            }
        }
    };

    let head_elements = if breakdown.is_empty() {
        Vec::new()
    } else {
        vec![
            HeadElement::ScriptLink(ECHARTS_SCRIPT.to_owned()),
            chart_script(&expense_breakdown_chart(&breakdown, &subtitle)),
        ]
    };

    Ok(base("Reports", &head_elements, &content).into_response())
}

/// A GET form that reloads the page when a different period is picked.
fn period_selector(periods: &[PeriodKey], selected: &Period) -> Markup {
    let selected = selected.query_value();

    html! {
        form method="get" action=(endpoints::REPORTS_VIEW) class="min-w-40"
        {
            label for="period" class=(FORM_LABEL_STYLE) { "Period" }

            select
                id="period"
                name="period"
                onchange="this.form.submit()"
                class=(FORM_TEXT_INPUT_STYLE)
            {
                option value=(ALL_PERIODS) selected[selected == ALL_PERIODS] { "All periods" }

                @for period in periods {
                    @let key = period.to_string();
                    option value=(key) selected[selected == key] { (key) }
                }
            }

            noscript
            {
                button type="submit" class="mt-2 underline" { "Show" }
            }
        }
    }
}

fn reports_no_data_view() -> Markup {
    let nav_bar = NavBar::new(endpoints::REPORTS_VIEW).into_html();
    let add_link = link(endpoints::ADD_VIEW, "add a transaction");

    let content = html!(
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            h2 class="text-xl font-bold"
            {
                "Nothing here yet..."
            }

            p
            {
                "Reports will show up here once you " (add_link) "."
            }
        }
    );

    base("Reports", &[], &content)
}
