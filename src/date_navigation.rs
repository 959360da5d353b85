//! The strip above the daily sales table for stepping between days.

use maud::{Markup, html};
use time::Date;

use crate::{
    Error,
    format::{format_date, parse_date},
};

const PROMPT_MESSAGE: &str = "날짜를 입력하세요 (YYYY-MM-DD):";

/// Asks the user to type a value.
pub trait Prompt {
    /// Show `message` with `default` filled in. Returns `None` if the user
    /// cancelled.
    fn prompt(&mut self, message: &str, default: &str) -> Option<String>;
}

type DateChangeCallback = Box<dyn FnMut(&str) + Send>;

/// Holds the date the page shows and lets the user move a day back or forward
/// or type a date.
pub struct DateNavigation {
    current_date: Date,
    endpoint: Option<String>,
    picker_endpoint: Option<String>,
    on_date_change: Option<DateChangeCallback>,
}

impl DateNavigation {
    /// A strip showing `today`.
    pub fn new(today: Date) -> Self {
        Self {
            current_date: today,
            endpoint: None,
            picker_endpoint: None,
            on_date_change: None,
        }
    }

    /// Make the previous and next buttons load `endpoint?date=YYYY-MM-DD`.
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = Some(endpoint.to_owned());
        self
    }

    /// Make the date picker button load the calendar modal from
    /// `endpoint?selected=YYYY-MM-DD`.
    pub fn with_picker_endpoint(mut self, endpoint: &str) -> Self {
        self.picker_endpoint = Some(endpoint.to_owned());
        self
    }

    /// Call `on_date_change` with the new date as `YYYY-MM-DD` whenever the
    /// date changes.
    pub fn on_date_change(mut self, on_date_change: impl FnMut(&str) + Send + 'static) -> Self {
        self.on_date_change = Some(Box::new(on_date_change));
        self
    }

    /// The date currently shown.
    pub fn current_date(&self) -> Date {
        self.current_date
    }

    /// Go back one day.
    pub fn previous_day(&mut self) {
        match self.current_date.previous_day() {
            Some(date) => self.change_to(date),
            None => tracing::warn!("Cannot go back from {}", self.current_date),
        }
    }

    /// Go forward one day.
    pub fn next_day(&mut self) {
        match self.current_date.next_day() {
            Some(date) => self.change_to(date),
            None => tracing::warn!("Cannot go forward from {}", self.current_date),
        }
    }

    /// Show the date given as `YYYY-MM-DD`.
    ///
    /// # Errors
    /// Returns [Error::InvalidDate] and keeps the current date if
    /// `date_string` is not a valid date.
    pub fn set_date(&mut self, date_string: &str) -> Result<(), Error> {
        let date = parse_date(date_string).inspect_err(|error| {
            tracing::debug!("Ignoring date navigation input: {error}");
        })?;
        self.change_to(date);

        Ok(())
    }

    /// Ask the user for a date. Cancelled or invalid input is ignored.
    pub fn show_date_picker(&mut self, prompt: &mut impl Prompt) {
        let default = format_date(Some(self.current_date));

        if let Some(input) = prompt.prompt(PROMPT_MESSAGE, &default) {
            // Invalid input is logged by `set_date` and otherwise ignored.
            let _ = self.set_date(&input);
        }
    }

    fn change_to(&mut self, date: Date) {
        self.current_date = date;

        if let Some(on_date_change) = self.on_date_change.as_mut() {
            on_date_change(&format_date(Some(date)));
        }
    }

    fn link_for(&self, date: Option<Date>) -> Option<String> {
        let endpoint = self.endpoint.as_deref()?;
        let date = date?;

        Some(format!("{endpoint}?date={}", format_date(Some(date))))
    }

    /// The whole strip for the current date.
    pub fn render(&self) -> Markup {
        let previous = self.link_for(self.current_date.previous_day());
        let next = self.link_for(self.current_date.next_day());
        let picker = self.picker_endpoint.as_deref().map(|endpoint| {
            format!("{endpoint}?selected={}", format_date(Some(self.current_date)))
        });

        html! {
            div class="date-navigation" {
                button
                    type="button"
                    class="date-nav-btn"
                    data-action="previous-day"
                    hx-get=[previous.as_deref()]
                    hx-target=[previous.as_ref().map(|_| "body")]
                    hx-push-url=[previous.as_ref().map(|_| "true")]
                {
                    "◀"
                }
                button
                    type="button"
                    class="date-picker-btn"
                    data-action="pick-date"
                    hx-get=[picker.as_deref()]
                    hx-target=[picker.as_ref().map(|_| "#datepicker-modal")]
                    hx-swap=[picker.as_ref().map(|_| "outerHTML")]
                {
                    "날짜 선택"
                }
                span class="current-date" { (format_date(Some(self.current_date))) }
                button
                    type="button"
                    class="date-nav-btn"
                    data-action="next-day"
                    hx-get=[next.as_deref()]
                    hx-target=[next.as_ref().map(|_| "body")]
                    hx-push-url=[next.as_ref().map(|_| "true")]
                {
                    "▶"
                }
            }
        }
    }
}
