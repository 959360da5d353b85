use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    html::error_view,
    page::{Page, PageMeta},
};

pub async fn get_404_not_found() -> Response {
    get_404_not_found_response()
}

pub fn get_404_not_found_response() -> Response {
    let page = Page::new(PageMeta::new());

    (
        StatusCode::NOT_FOUND,
        error_view(
            &page,
            "Not Found",
            "404",
            "Page not found.",
            "Check the address or go back to today's sales.",
        ),
    )
        .into_response()
}
