//! Error messages shown to the user after an htmx request fails.
//!
//! Alerts are swapped out-of-band into the `#alert-container` element that
//! [crate::html::base] places on every page.

use axum::response::{Html, IntoResponse, Response};
use maud::{Markup, html};

/// A dismissible error message for the alert container.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub message: String,
    pub details: String,
}

impl Alert {
    pub fn into_html(self) -> Markup {
        html! {
            div
                id="alert-container"
                hx-swap-oob="true"
                class="w-full max-w-md px-4"
                style="position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
            {
                div
                    class="p-4 mb-4 text-sm text-red-800 rounded-lg bg-red-50 \
                        dark:bg-gray-800 dark:text-red-400 shadow-lg"
                    role="alert"
                {
                    div class="flex items-start justify-between gap-4"
                    {
                        div
                        {
                            p class="font-medium" { (self.message) }

                            @if !self.details.is_empty()
                            {
                                p class="mt-1" { (self.details) }
                            }
                        }

                        button
                            type="button"
                            aria-label="Dismiss"
                            class="font-bold"
                            onclick="this.closest('#alert-container').classList.add('hidden')"
                        {
                            "×"
                        }
                    }
                }
            }
        }
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        Html(self.into_html().into_string()).into_response()
    }
}
