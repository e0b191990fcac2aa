//! Alert messages for htmx requests that fail.
//!
//! Alerts are swapped into the page's `#alert-container` so that a failed
//! panel update does not replace the dashboard with an error page.

use axum::response::{IntoResponse, Response};
use maud::{Markup, html};

/// Alert message types for styling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertType {
    Error,
}

/// An alert message with an optional line of details.
#[derive(Debug, Clone)]
pub struct Alert<'a> {
    pub alert_type: AlertType,
    pub message: &'a str,
    pub details: &'a str,
}

impl<'a> Alert<'a> {
    /// Create a new error alert
    pub fn error(message: &'a str, details: &'a str) -> Self {
        Self {
            alert_type: AlertType::Error,
            message,
            details,
        }
    }

    pub fn into_html(self) -> Markup {
        let style = match self.alert_type {
            AlertType::Error => "border-red-800 bg-gray-800 text-red-400",
        };

        html!(
            div
                role="alert"
                class={"flex items-start p-4 mb-4 text-sm rounded-lg border " (style)}
            {
                div class="flex-1"
                {
                    span class="font-medium" { (self.message) }

                    @if !self.details.is_empty() {
                        p class="mt-1" { (self.details) }
                    }
                }

                button
                    type="button"
                    class="ms-3 font-bold"
                    aria-label="Dismiss"
                    onclick="this.closest('[role=alert]').remove()"
                {
                    "×"
                }
            }
        )
    }
}

impl IntoResponse for Alert<'_> {
    fn into_response(self) -> Response {
        self.into_html().into_response()
    }
}
