//! The URIs served by the preview server.

/// The root route, which shows the daily sales page for today.
pub const ROOT: &str = "/";
/// The daily sales page, takes an optional `date=YYYY-MM-DD` query.
pub const DAILY_SALES: &str = "/sales";
/// The date picker modal, takes `year`, `month`, `selected` and `open`
/// queries.
pub const DATE_PICKER: &str = "/api/date-picker";
