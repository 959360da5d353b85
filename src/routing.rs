//! Application router configuration.

use axum::{Router, middleware, routing::get};

use crate::{
    AppState,
    daily_sales::{get_daily_sales_page, get_date_picker},
    endpoints,
    logging::logging_middleware,
    not_found::get_404_not_found,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_daily_sales_page))
        .route(endpoints::DAILY_SALES, get(get_daily_sales_page))
        .route(endpoints::DATE_PICKER, get(get_date_picker))
        .fallback(get_404_not_found)
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}
