use maud::{Markup, html};

use crate::{
    html::{
        FORM_LABEL_STYLE, FORM_RADIO_GROUP_STYLE, FORM_RADIO_INPUT_STYLE, FORM_RADIO_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE,
    },
    transaction::{Categories, TransactionKind},
};

pub struct TransactionFormDefaults<'a> {
    pub kind: TransactionKind,
    pub category: Option<&'a str>,
    pub autofocus_amount: bool,
}

impl Default for TransactionFormDefaults<'_> {
    fn default() -> Self {
        Self {
            kind: TransactionKind::Expense,
            category: None,
            autofocus_amount: true,
        }
    }
}

pub fn transaction_form_fields(
    defaults: &TransactionFormDefaults<'_>,
    categories: &Categories,
) -> Markup {
    html! {
        fieldset class="space-y-2"
        {
            legend class=(FORM_LABEL_STYLE) { "Transaction type" }

            div class=(FORM_RADIO_GROUP_STYLE)
            {
                @for kind in [TransactionKind::Expense, TransactionKind::Income] {
                    @let id = format!("transaction-kind-{}", kind.form_value());

                    div class="flex items-center gap-3"
                    {
                        input
                            name="kind"
                            id=(id)
                            type="radio"
                            value=(kind.form_value())
                            checked[kind == defaults.kind]
                            required
                            tabindex="0"
                            class=(FORM_RADIO_INPUT_STYLE);

                        label
                            for=(id)
                            class=(FORM_RADIO_LABEL_STYLE)
                        {
                            (kind.label())
                        }
                    }
                }
            }
        }

        div
        {
            label
                for="amount"
                class=(FORM_LABEL_STYLE)
            {
                "Amount"
            }

            // w-full needed to ensure input takes the full width when prefilled with a value
            div class="input-wrapper w-full"
            {
                input
                    name="amount"
                    id="amount"
                    type="number"
                    step="0.01"
                    min="0.01"
                    placeholder="0.00"
                    required
                    autofocus[defaults.autofocus_amount]
                    class=(FORM_TEXT_INPUT_STYLE);
            }
        }

        div
        {
            label
                for="category"
                class=(FORM_LABEL_STYLE)
            {
                "Category"
            }

            select
                name="category"
                id="category"
                required
                class=(FORM_TEXT_INPUT_STYLE)
            {
                @for category in categories.iter() {
                    option value=(category) selected[Some(category) == defaults.category] {
                        (category)
                    }
                }
            }
        }

        div
        {
            label
                for="note"
                class=(FORM_LABEL_STYLE)
            {
                "Note"
            }

            input
                name="note"
                id="note"
                type="text"
                placeholder="Optional"
                class=(FORM_TEXT_INPUT_STYLE);
        }
    }
}
