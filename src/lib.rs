//! A single-page dashboard of video-game sales.
//!
//! The dashboard shows a fixed set of charts over a read-only CSV table of
//! sales records. Choosing a year with the slider (desktop) or dropdown
//! (mobile) re-renders every panel with the sales of that year.
//!
//! This library provides the HTTP server that serves the HTML page, the htmx
//! partials and the chart options.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod dashboard;
mod dataset;
mod endpoints;
mod html;
mod internal_server_error;
mod logging;
mod not_found;
mod routing;

pub use app_state::AppState;
pub use dashboard::{DEFAULT_FONT_SIZE, GraphStyle};
pub use dataset::{Region, SalesDataset, SalesRecord};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;

use crate::{
    alert::Alert, html::error_view, internal_server_error::InternalServerError,
    not_found::get_404_not_found_response,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The dataset file could not be opened or read.
    ///
    /// Callers should include the path in the message.
    #[error("could not read the dataset: {0}")]
    DatasetIo(String),

    /// The CSV had issues that prevented it from being parsed.
    #[error("Could not parse the CSV file: {0}")]
    InvalidCSV(String),

    /// The dataset has no records with a release year, so there is no year
    /// to select.
    #[error("the dataset does not contain any records with a release year")]
    EmptyDataset,

    /// A year was requested that has no records in the dataset.
    #[error("there are no sales records for the year {0}")]
    UnknownYear(i32),

    /// The requested resource was not found.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An error occurred while serializing a struct as JSON
    #[error("could not serialize as JSON: {0}")]
    JSONSerializationError(String),
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Error::JSONSerializationError(value.to_string())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            Error::UnknownYear(year) => (
                StatusCode::BAD_REQUEST,
                error_view(
                    "Unknown Year",
                    "400",
                    &format!("There are no sales records for {year}."),
                    "Pick one of the years offered by the year filter.",
                ),
            )
                .into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    fn into_alert_response(self) -> Response {
        match self {
            Error::UnknownYear(year) => (
                StatusCode::BAD_REQUEST,
                Alert::error(
                    "Unknown year",
                    &format!("There are no sales records for {year}. Pick another year."),
                ),
            )
                .into_response(),
            Error::NotFound => (
                StatusCode::NOT_FOUND,
                Alert::error("Not found", "The requested panel does not exist."),
            )
                .into_response(),
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Alert::error(
                        "Something went wrong",
                        "An unexpected error occurred, check the server logs for more details.",
                    ),
                )
                    .into_response()
            }
        }
    }
}
