//! Alerts for telling users why a request failed.
//!
//! Alerts are returned as HTML fragments that htmx swaps into the
//! `#alert-container` element of the base page.

use maud::{Markup, html};

/// A dismissable message shown at the bottom of the page.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// Something went wrong and the user should know why.
    Error { message: String, details: String },
}

const ERROR_STYLE: &str = "text-red-800 border-red-300 bg-red-50 \
    dark:bg-gray-800 dark:text-red-400 dark:border-red-800";

impl Alert {
    pub fn into_html(self) -> Markup {
        let (style, message, details) = match self {
            Alert::Error { message, details } => (ERROR_STYLE, message, details),
        };

        html! {
            div
                id="alert-container"
                hx-swap-oob="true"
                class="w-full max-w-md px-4"
                style="position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
            {
                div
                    role="alert"
                    class={"flex items-start p-4 mb-4 border rounded-lg " (style)}
                {
                    div class="text-sm grow"
                    {
                        p class="font-semibold" { (message) }

                        @if !details.is_empty()
                        {
                            p { (details) }
                        }
                    }

                    button
                        type="button"
                        aria-label="Dismiss"
                        class="ms-3 font-bold"
                        onclick="this.closest('[role=alert]').remove()"
                    {
                        "×"
                    }
                }
            }
        }
    }
}
