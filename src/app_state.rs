//! Implements a struct that holds the state of the preview server.

use time::Date;

use crate::{
    Error,
    page::{CSRF_HEADER_META, CSRF_TOKEN_META, PageMeta},
    timezone::today_in,
};

/// The header name published next to the CSRF token.
pub const CSRF_HEADER_NAME: &str = "X-CSRF-TOKEN";

/// The state of the preview server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The local timezone as a canonical timezone name, e.g. "Asia/Seoul".
    pub local_timezone: String,

    /// The CSRF token published in every page's metadata, if any.
    pub csrf_token: Option<String>,
}

impl AppState {
    /// Create a new [AppState].
    ///
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Asia/Seoul".
    ///
    /// # Errors
    /// Returns [Error::InvalidTimezone] if `local_timezone` is not a known
    /// timezone.
    pub fn new(local_timezone: &str, csrf_token: Option<String>) -> Result<Self, Error> {
        today_in(local_timezone)?;

        Ok(Self {
            local_timezone: local_timezone.to_owned(),
            csrf_token,
        })
    }

    /// Today's date in the local timezone.
    ///
    /// # Errors
    /// Returns [Error::InvalidTimezone] if the configured timezone is invalid.
    pub fn today(&self) -> Result<Date, Error> {
        today_in(&self.local_timezone)
    }

    /// The metadata every page is rendered with.
    pub fn page_meta(&self) -> PageMeta {
        match &self.csrf_token {
            Some(token) => PageMeta::new()
                .with(CSRF_TOKEN_META, token)
                .with(CSRF_HEADER_META, CSRF_HEADER_NAME),
            None => PageMeta::new(),
        }
    }
}
