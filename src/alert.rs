//! Alert banners for success, error, warning and info messages.
//!
//! [AlertManager] keeps the alerts currently on the page and removes them
//! when they are closed or when their display time runs out.
//! [AlertTemplate] renders a single alert that the preview server sends back
//! in place of a page when a request fails.

use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use maud::{Markup, html};

use crate::timer::run_after;

/// The `id` of the element the alerts are rendered in.
pub const ALERT_CONTAINER_ID: &str = "alert-container";

/// How long an alert stays up when no duration is given.
pub const DEFAULT_ALERT_DURATION: Duration = Duration::from_millis(5000);

/// How long the fade out transition of a closed alert takes.
pub const FADE_OUT_DURATION: Duration = Duration::from_millis(300);

const CLOSE_BUTTON_STYLE: &str =
    "float: right; background: none; border: none; font-size: 1.2rem; cursor: pointer;";

/// Alert message types for styling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Neutral information.
    Info,
    /// An action completed.
    Success,
    /// An action failed.
    Error,
    /// Something needs the user's attention.
    Warning,
}

impl Severity {
    fn css_class(self) -> &'static str {
        match self {
            Severity::Info => "alert-info",
            Severity::Success => "alert-success",
            Severity::Error => "alert-error",
            Severity::Warning => "alert-warning",
        }
    }
}

/// Identifies an alert created by [AlertManager::show].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AlertHandle(u64);

/// An alert currently on the page.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    /// The handle returned when the alert was shown.
    pub handle: AlertHandle,
    /// The text of the alert.
    pub message: String,
    /// Controls the styling of the alert.
    pub severity: Severity,
    /// How long the alert stays up before it closes itself, zero for never.
    pub auto_dismiss: Duration,
    /// Set once the alert has been closed and is fading out.
    pub fading: bool,
}

#[derive(Debug, Default)]
struct AlertState {
    container_created: bool,
    next_id: u64,
    alerts: Vec<Alert>,
}

/// Shows and hides the alerts of one page.
///
/// Cloning the manager gives another handle to the same alerts.
#[derive(Debug, Clone, Default)]
pub struct AlertManager {
    state: Arc<Mutex<AlertState>>,
}

impl AlertManager {
    /// A manager whose container has not been created yet.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, AlertState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Create the alert container if it does not exist yet.
    pub fn init(&self) {
        let mut state = self.lock();

        if !state.container_created {
            tracing::debug!("Creating the alert container.");
            state.container_created = true;
        }
    }

    /// Whether the alert container exists.
    pub fn is_initialized(&self) -> bool {
        self.lock().container_created
    }

    /// Add an alert showing `message`.
    ///
    /// If `duration` is not zero the alert is hidden once it has elapsed.
    /// Must be called from within a Tokio runtime for the alert to be hidden
    /// automatically.
    pub fn show(&self, message: &str, severity: Severity, duration: Duration) -> AlertHandle {
        let handle = {
            let mut state = self.lock();
            state.container_created = true;

            let handle = AlertHandle(state.next_id);
            state.next_id += 1;
            state.alerts.push(Alert {
                handle,
                message: message.to_owned(),
                severity,
                auto_dismiss: duration,
                fading: false,
            });

            handle
        };

        tracing::debug!("Showing {severity:?} alert {handle:?}: {message}");

        if !duration.is_zero() {
            let manager = self.clone();
            run_after(duration, move || manager.hide(handle));
        }

        handle
    }

    /// Start fading out the alert and remove it once the fade out is done.
    ///
    /// Does nothing if the alert has already been closed.
    pub fn hide(&self, handle: AlertHandle) {
        {
            let mut state = self.lock();
            let Some(alert) = state
                .alerts
                .iter_mut()
                .find(|alert| alert.handle == handle && !alert.fading)
            else {
                return;
            };

            alert.fading = true;
        }

        let manager = self.clone();
        run_after(FADE_OUT_DURATION, move || manager.remove(handle));
    }

    fn remove(&self, handle: AlertHandle) {
        let mut state = self.lock();
        state.alerts.retain(|alert| alert.handle != handle);
        tracing::debug!("Removed alert {handle:?}");
    }

    /// Show an info alert for the default duration.
    pub fn info(&self, message: &str) -> AlertHandle {
        self.show(message, Severity::Info, DEFAULT_ALERT_DURATION)
    }

    /// Show a success alert for the default duration.
    pub fn success(&self, message: &str) -> AlertHandle {
        self.success_for(message, DEFAULT_ALERT_DURATION)
    }

    /// Show a success alert for `duration`, zero for until closed.
    pub fn success_for(&self, message: &str, duration: Duration) -> AlertHandle {
        self.show(message, Severity::Success, duration)
    }

    /// Show an error alert for the default duration.
    pub fn error(&self, message: &str) -> AlertHandle {
        self.error_for(message, DEFAULT_ALERT_DURATION)
    }

    /// Show an error alert for `duration`, zero for until closed.
    pub fn error_for(&self, message: &str, duration: Duration) -> AlertHandle {
        self.show(message, Severity::Error, duration)
    }

    /// Show a warning alert for the default duration.
    pub fn warning(&self, message: &str) -> AlertHandle {
        self.warning_for(message, DEFAULT_ALERT_DURATION)
    }

    /// Show a warning alert for `duration`, zero for until closed.
    pub fn warning_for(&self, message: &str, duration: Duration) -> AlertHandle {
        self.show(message, Severity::Warning, duration)
    }

    /// The alerts on the page, oldest first.
    pub fn alerts(&self) -> Vec<Alert> {
        self.lock().alerts.clone()
    }

    /// The alert container with its alerts, or nothing if the container has
    /// not been created.
    pub fn render(&self) -> Markup {
        let state = self.lock();

        if !state.container_created {
            return html! {};
        }

        html! {
            div id=(ALERT_CONTAINER_ID) {
                @for alert in &state.alerts {
                    div
                        class={"alert " (alert.severity.css_class())}
                        data-alert-id=(alert.handle.0)
                        style=[alert.fading.then_some("opacity: 0")]
                    {
                        (alert.message)
                        button
                            type="button"
                            style=(CLOSE_BUTTON_STYLE)
                            data-dismiss=(alert.handle.0)
                            onclick="this.parentElement.remove()"
                        {
                            "×"
                        }
                    }
                }
            }
        }
    }
}

/// Renders an alert with a title and details, used for alerts sent by the
/// server in response to a failed request.
pub struct AlertTemplate<'a> {
    pub severity: Severity,
    pub message: &'a str,
    pub details: &'a str,
}

impl<'a> AlertTemplate<'a> {
    /// Create a new error alert
    pub fn error(message: &'a str, details: &'a str) -> Self {
        Self {
            severity: Severity::Error,
            message,
            details,
        }
    }

    pub fn into_html(self) -> Markup {
        html! {
            div class={"alert " (self.severity.css_class())} role="alert" {
                strong { (self.message) }
                @if !self.details.is_empty() {
                    p { (self.details) }
                }
                button
                    type="button"
                    style=(CLOSE_BUTTON_STYLE)
                    onclick="this.parentElement.remove()"
                {
                    "×"
                }
            }
        }
    }
}
