//! Renders transactions as an HTML table.

use maud::{Markup, html};
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    html::{CATEGORY_BADGE_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, format_currency},
    transaction::{Transaction, TransactionKind},
};

/// Notes longer than this many characters are cut short in tables.
const NOTE_DISPLAY_LIMIT: usize = 32;

/// The name of the checkbox inputs used to select rows for deletion.
pub const SELECTION_INPUT_NAME: &str = "selected";

/// A table of transactions in the order given.
pub struct TransactionTable<'a> {
    rows: &'a [Transaction],
    selectable: bool,
}

impl<'a> TransactionTable<'a> {
    /// A read-only table.
    pub fn new(rows: &'a [Transaction]) -> Self {
        Self {
            rows,
            selectable: false,
        }
    }

    /// A table with a checkbox in front of every row.
    ///
    /// Each checkbox submits `position:fingerprint`, where position is the
    /// row's index in `rows`.
    pub fn selectable(rows: &'a [Transaction]) -> Self {
        Self {
            rows,
            selectable: true,
        }
    }

    pub fn into_html(self) -> Markup {
        html! {
            div class="overflow-x-auto w-full rounded shadow-md"
            {
                table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            @if self.selectable {
                                th scope="col" class=(TABLE_CELL_STYLE) { span class="sr-only" { "Select" } }
                            }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Type" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Note" }
                            th scope="col" class={(TABLE_CELL_STYLE) " text-right"} { "Amount" }
                        }
                    }

                    tbody
                    {
                        @for (position, transaction) in self.rows.iter().enumerate() {
                            (row_view(position, transaction, self.selectable))
                        }
                    }
                }
            }
        }
    }
}

fn row_view(position: usize, transaction: &Transaction, selectable: bool) -> Markup {
    let checkbox_id = format!("select-{position}");
    let amount_style = match transaction.kind {
        TransactionKind::Expense => "text-red-600 dark:text-red-400",
        TransactionKind::Income => "text-green-600 dark:text-green-400",
    };
    let note = truncate_note(&transaction.note);

    html! {
        tr class=(TABLE_ROW_STYLE)
        {
            @if selectable {
                td class=(TABLE_CELL_STYLE)
                {
                    input
                        type="checkbox"
                        id=(checkbox_id)
                        name=(SELECTION_INPUT_NAME)
                        value=(format!("{position}:{}", transaction.fingerprint()))
                        aria-label={"Select transaction " (position + 1)}
                        class="w-4 h-4 cursor-pointer";
                }
            }
            td class={(TABLE_CELL_STYLE) " whitespace-nowrap"} { (transaction.formatted_timestamp()) }
            td class=(TABLE_CELL_STYLE) { (transaction.kind.label()) }
            td class=(TABLE_CELL_STYLE)
            {
                span class=(CATEGORY_BADGE_STYLE) { (transaction.category) }
            }
            td class=(TABLE_CELL_STYLE) title=[(note != transaction.note).then_some(&transaction.note)]
            {
                (note)
            }
            td class={(TABLE_CELL_STYLE) " text-right whitespace-nowrap " (amount_style)}
            {
                (format_currency(transaction.amount))
            }
        }
    }
}

/// Cut `note` to [NOTE_DISPLAY_LIMIT] user-perceived characters, adding an ellipsis if cut.
fn truncate_note(note: &str) -> String {
    let mut graphemes = note.graphemes(true);
    let truncated: String = graphemes.by_ref().take(NOTE_DISPLAY_LIMIT).collect();

    if graphemes.next().is_some() {
        format!("{truncated}…")
    } else {
        truncated
    }
}
