//! Front-end components for the MyNet sales management system.
//!
//! The components keep their state in plain Rust values and render that state
//! as HTML with [maud]. Browser events reach a component as typed event values,
//! timers run on Tokio, and requests to the sales backend go through
//! [reqwest].
//!
//! The crate also contains a small preview server that hosts the components on
//! a daily sales page.

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
mod daily_sales;
mod date_navigation;
mod date_picker;
mod endpoints;
mod format;
mod html;
mod loading;
mod logging;
mod not_found;
mod page;
mod routing;
mod save;
mod sub_menu;
mod table;
mod timer;
mod timezone;
mod transport;

#[cfg(test)]
mod test_utils;

pub use alert::{
    ALERT_CONTAINER_ID, Alert, AlertHandle, AlertManager, DEFAULT_ALERT_DURATION,
    FADE_OUT_DURATION, Severity,
};
pub use app_state::AppState;
pub use date_navigation::{DateNavigation, Prompt};
pub use date_picker::{
    CalendarCell, DatePicker, DatePickerOptions, PickerEvent, Restrictions, RestrictionsUpdate,
    Visibility, YearOptions, month_grid,
};
pub use date_picker::{CLOSE_DELAY, MODAL_ID, OPEN_DELAY};
pub use format::{
    calculate_achievement_rate, calculate_amount, clamp_non_negative, format_date, format_number,
    parse_date, today_string,
};
pub use loading::{LOADING_INDICATOR_ID, LoadingIndicator};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use page::{Container, CsrfMeta, Element, Page, PageMeta};
pub use routing::build_router;
pub use save::{
    DEFAULT_ERROR_MESSAGE, DEFAULT_SUCCESS_MESSAGE, SaveFailure, SaveOutcome, SaveRequest,
};
pub use sub_menu::SubMenus;
pub use table::{Comparison, InputEvent, QuantityInput, achievement_cell, amount_cell, tooltip};
pub use timezone::{get_local_offset, today_in};
pub use transport::{ApiClient, FormData};

use crate::{alert::AlertTemplate, html::render_fragment};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {error}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
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
    /// A date string was not of the form `YYYY-MM-DD` or did not name a real
    /// calendar date.
    #[error("\"{0}\" is not a valid YYYY-MM-DD date")]
    InvalidDate(String),

    /// The server answered with a status other than 200 OK.
    #[error("HTTP {status}: {status_text}")]
    Http {
        /// The numeric HTTP status code.
        status: u16,
        /// The reason phrase for `status`, empty if the code has none.
        status_text: String,
    },

    /// The request never produced an HTTP response, e.g. the connection was
    /// refused or the body could not be read.
    #[error("the request could not be completed: {0}")]
    Network(String),

    /// Form data could not be encoded as `application/x-www-form-urlencoded`.
    #[error("could not encode form data: {0}")]
    FormEncoding(String),

    /// A canonical timezone name could not be resolved.
    #[error("invalid timezone {0}")]
    InvalidTimezone(String),
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        Error::Network(value.to_string())
    }
}

impl Error {
    fn into_alert_response(self) -> Response {
        match self {
            Error::InvalidDate(text) => render_fragment(
                StatusCode::BAD_REQUEST,
                AlertTemplate::error(
                    "Invalid date",
                    &format!("\"{text}\" is not a valid date. Use the format YYYY-MM-DD."),
                )
                .into_html(),
            ),
            Error::InvalidTimezone(timezone) => render_fragment(
                StatusCode::INTERNAL_SERVER_ERROR,
                AlertTemplate::error(
                    "Invalid Timezone Settings",
                    &format!(
                        "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                    ),
                )
                .into_html(),
            ),
            error => {
                tracing::error!("An unexpected error occurred: {error}");
                render_fragment(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    AlertTemplate::error(
                        "Something went wrong",
                        "An unexpected error occurred, check the server logs for more details.",
                    )
                    .into_html(),
                )
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        self.into_alert_response()
    }
}
