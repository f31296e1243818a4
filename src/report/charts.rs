//! The category breakdown pie chart.

use std::collections::BTreeMap;

use charming::{
    Chart,
    component::{Legend, Title},
    element::{JsFunction, Label, Tooltip, Trigger},
    series::Pie,
};
use maud::{Markup, PreEscaped, html};
use rust_decimal::{Decimal, prelude::ToPrimitive};

use crate::html::{CURRENCY_SYMBOL, HeadElement};

/// The ID of the element the chart is drawn in.
pub(super) const CHART_ID: &str = "expense-breakdown-chart";

/// The ECharts library, loaded from a CDN like the other scripts.
pub(super) const ECHARTS_SCRIPT: &str =
    "https://cdn.jsdelivr.net/npm/echarts@6.0.0/dist/echarts.min.js";

/// The container the chart is drawn in.
pub(super) fn chart_view() -> Markup {
    html!(
        section
            id="charts"
            class="w-full mx-auto mb-4"
        {
            div
                id=(CHART_ID)
                class="min-h-[420px] rounded dark:bg-gray-100"
            {}
        }
    )
}

/// JavaScript that draws `chart` once the page has loaded.
///
/// The chart follows the system colour scheme and resizes with the window.
pub(super) fn chart_script(chart: &Chart) -> HeadElement {
    let script = format!(
        r#"document.addEventListener('DOMContentLoaded', function() {{
            const chartDom = document.getElementById("{CHART_ID}");
            const chart = echarts.init(chartDom);
            const option = {chart};
            chart.setOption(option);

            window.addEventListener('resize', chart.resize);

            const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
            const updateTheme = () => {{
                const isDarkMode = darkModeMediaQuery.matches;
                chart.setTheme(isDarkMode ? 'dark' : 'default');
            }}
            darkModeMediaQuery.addEventListener('change', updateTheme);
            updateTheme();
        }});"#
    );

    HeadElement::ScriptSource(PreEscaped(script))
}

/// A pie chart with one slice per category, labelled with its share of the total.
pub(super) fn expense_breakdown_chart(breakdown: &BTreeMap<String, Decimal>, subtitle: &str) -> Chart {
    Chart::new()
        .title(
            Title::new()
                .text("Expenses by category")
                .subtext(subtitle)
                .left("center"),
        )
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Item)
                .value_formatter(currency_formatter()),
        )
        .legend(Legend::new().bottom(0))
        .series(
            Pie::new()
                .name("Expenses")
                .radius(vec!["35%", "65%"])
                .label(Label::new().show(true).formatter("{b}\n{d}%"))
                .data(pie_data(breakdown)),
        )
}

/// One `(value, name)` pair per category, in category order.
fn pie_data(breakdown: &BTreeMap<String, Decimal>) -> Vec<(f64, &str)> {
    breakdown
        .iter()
        .map(|(category, amount)| (amount.to_f64().unwrap_or_default(), category.as_str()))
        .collect()
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        &format!(
            "const currencyFormatter = new Intl.NumberFormat('en-US', {{
                  minimumFractionDigits: 2,
                  maximumFractionDigits: 2
                }});
                return '{CURRENCY_SYMBOL}' + currencyFormatter.format(number);"
        ),
    )
}
