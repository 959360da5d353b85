//! The spinner shown in a container while a request is in flight.

use maud::{Markup, html};

use crate::page::{Container, Element};

/// The `id` of the spinner element.
pub const LOADING_INDICATOR_ID: &str = "loading-indicator";

/// Adds and removes the loading spinner.
pub struct LoadingIndicator;

impl LoadingIndicator {
    /// Append a spinner to `container`.
    pub fn show(container: &mut Container) {
        container.append(Element {
            id: Some(LOADING_INDICATOR_ID.to_owned()),
            class: "loading".to_owned(),
            content: spinner(),
        });
    }

    /// Remove the spinner from `container`. Does nothing if there is none.
    pub fn hide(container: &mut Container) {
        if container.remove_first_by_id(LOADING_INDICATOR_ID).is_none() {
            tracing::debug!("No loading indicator in #{} to hide", container.id());
        }
    }
}

fn spinner() -> Markup {
    html! { div class="spinner" {} }
}
