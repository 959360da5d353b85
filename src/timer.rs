//! One-shot timers for UI transitions.

use std::time::Duration;

/// Run `task` once `delay` has elapsed.
///
/// Timers cannot be cancelled, so `task` must check that whatever it acts on
/// still exists. Outside a Tokio runtime the timer is dropped with a warning.
pub(crate) fn run_after(delay: Duration, task: impl FnOnce() + Send + 'static) {
    match tokio::runtime::Handle::try_current() {
        Ok(runtime) => {
            runtime.spawn(async move {
                tokio::time::sleep(delay).await;
                task();
            });
        }
        Err(error) => {
            tracing::warn!("Could not schedule a timer outside a Tokio runtime: {error}");
        }
    }
}
