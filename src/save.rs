//! Saving form data to the sales backend.
//!
//! The backend answers every save with 200 OK. A body starting with `error:`
//! means the save was refused and the rest of the body says why. Any other
//! 200 body means the data was saved. Other statuses are treated as failures.

use reqwest::{StatusCode, multipart::Form};

use crate::{
    loading::LoadingIndicator,
    page::{CSRF_TOKEN_META, CsrfMeta, Page},
    transport::{ApiClient, FormData},
};

/// The prefix of a 200 OK body that reports a refused save.
pub const ERROR_PREFIX: &str = "error:";

/// The form field the CSRF token is sent in.
pub const CSRF_FIELD: &str = CSRF_TOKEN_META;

/// Shown when a save succeeds and no success message is given.
pub const DEFAULT_SUCCESS_MESSAGE: &str = "저장되었습니다.";

/// Shown when a save fails and no error message is given.
pub const DEFAULT_ERROR_MESSAGE: &str = "저장 중 오류가 발생했습니다.";

type SuccessMessage = Box<dyn FnOnce(&str) -> String + Send>;
type ErrorMessage = Box<dyn FnOnce(&SaveFailure) -> String + Send>;

/// Why a save did not reach the backend or was not accepted by it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveFailure {
    /// The server answered with a status other than 200 OK.
    Status {
        /// The numeric HTTP status code.
        status: u16,
        /// The response body.
        body: String,
    },
    /// No response arrived.
    Network(String),
}

/// How a save ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The backend accepted the data and answered with this body.
    Saved(String),
    /// The backend refused the data with this message.
    Rejected(String),
    /// The request failed.
    Failed(SaveFailure),
}

/// A single save of key-value data to `url`.
///
/// ```no_run
/// # async fn save(client: &mynet_sales_ui::ApiClient, page: &mynet_sales_ui::Page) {
/// use mynet_sales_ui::{FormData, SaveRequest};
///
/// SaveRequest::new("/sales/daily/save", FormData::new().field("quantity", 3))
///     .on_success(|body| format!("Saved order {body}"))
///     .send(client, page)
///     .await;
/// # }
/// ```
pub struct SaveRequest {
    url: String,
    data: FormData,
    on_success: Option<SuccessMessage>,
    on_error: Option<ErrorMessage>,
}

impl SaveRequest {
    /// A request posting `data` to `url`.
    pub fn new(url: &str, data: FormData) -> Self {
        Self {
            url: url.to_owned(),
            data,
            on_success: None,
            on_error: None,
        }
    }

    /// Build the success alert from the response body.
    pub fn on_success(mut self, on_success: impl FnOnce(&str) -> String + Send + 'static) -> Self {
        self.on_success = Some(Box::new(on_success));
        self
    }

    /// Build the error alert from the failure.
    pub fn on_error(
        mut self,
        on_error: impl FnOnce(&SaveFailure) -> String + Send + 'static,
    ) -> Self {
        self.on_error = Some(Box::new(on_error));
        self
    }

    /// Post the data and show the outcome as an alert on `page`.
    ///
    /// The loading indicator is shown on the page body while the request is
    /// in flight.
    pub async fn send(self, client: &ApiClient, page: &Page) -> SaveOutcome {
        page.with_body(LoadingIndicator::show);
        let result = post_multipart(client, &page.csrf(), &self.url, &self.data).await;
        page.with_body(LoadingIndicator::hide);

        match result {
            Ok(body) => match body.strip_prefix(ERROR_PREFIX) {
                Some(message) => {
                    tracing::info!("Save to {} was refused: {message}", self.url);
                    page.alerts().error(message);
                    SaveOutcome::Rejected(message.to_owned())
                }
                None => {
                    let message = match self.on_success {
                        Some(on_success) => on_success(&body),
                        None => DEFAULT_SUCCESS_MESSAGE.to_owned(),
                    };
                    page.alerts().success(&message);
                    SaveOutcome::Saved(body)
                }
            },
            Err(failure) => {
                tracing::warn!("Save to {} failed: {failure:?}", self.url);
                let message = match self.on_error {
                    Some(on_error) => on_error(&failure),
                    None => DEFAULT_ERROR_MESSAGE.to_owned(),
                };
                page.alerts().error(&message);
                SaveOutcome::Failed(failure)
            }
        }
    }
}

async fn post_multipart(
    client: &ApiClient,
    csrf: &CsrfMeta,
    url: &str,
    data: &FormData,
) -> Result<String, SaveFailure> {
    let mut form = data
        .fields()
        .iter()
        .fold(Form::new(), |form, (key, value)| {
            form.text(key.clone(), value.clone())
        });

    if let Some(token) = &csrf.token {
        form = form.text(CSRF_FIELD, token.clone());
    }

    let response = client
        .http_client()
        .post(url)
        .multipart(form)
        .send()
        .await
        .map_err(|error| SaveFailure::Network(error.to_string()))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|error| SaveFailure::Network(error.to_string()))?;

    if status != StatusCode::OK {
        return Err(SaveFailure::Status {
            status: status.as_u16(),
            body,
        });
    }

    Ok(body)
}

#[cfg(test)]
mod save_request_tests {
    use std::sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    };

    use axum::{Router, extract::Multipart, http::StatusCode, routing::post};

    use crate::{
        alert::Severity,
        loading::LOADING_INDICATOR_ID,
        page::{CSRF_HEADER_META, CSRF_TOKEN_META, CsrfMeta, Page, PageMeta},
        test_utils::{spawn_test_server, unused_local_url},
        transport::{ApiClient, FormData},
    };

    use super::{DEFAULT_ERROR_MESSAGE, DEFAULT_SUCCESS_MESSAGE, SaveFailure, SaveOutcome, SaveRequest};

    async fn echo_fields(mut multipart: Multipart) -> String {
        let mut fields = Vec::new();

        while let Some(field) = multipart.next_field().await.unwrap() {
            let name = field.name().unwrap_or_default().to_owned();
            let value = field.text().await.unwrap();
            fields.push(format!("{name}={value}"));
        }

        fields.join("&")
    }

    fn test_router() -> Router {
        Router::new()
            .route("/save", post(|| async { "OK-123" }))
            .route("/refuse", post(|| async { "error:Insufficient stock" }))
            .route(
                "/broken",
                post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "stack trace") }),
            )
            .route("/echo", post(echo_fields))
    }

    fn page_with_token() -> Page {
        Page::new(
            PageMeta::new()
                .with(CSRF_TOKEN_META, "tok-123")
                .with(CSRF_HEADER_META, "X-CSRF-TOKEN"),
        )
    }

    fn client_for(page: &Page) -> ApiClient {
        ApiClient::new(page.csrf())
    }

    fn assert_single_alert(page: &Page, severity: Severity, message: &str) {
        let alerts = page.alerts().alerts();
        assert_eq!(alerts.len(), 1, "{alerts:?}");
        assert_eq!(alerts[0].severity, severity);
        assert_eq!(alerts[0].message, message);
    }

    #[tokio::test]
    async fn success_body_goes_to_success_message() {
        let url = spawn_test_server(test_router()).await;
        let page = page_with_token();

        let outcome = SaveRequest::new(&format!("{url}/save"), FormData::new().field("qty", 3))
            .on_success(|body| format!("Saved {body}"))
            .send(&client_for(&page), &page)
            .await;

        assert_eq!(outcome, SaveOutcome::Saved("OK-123".to_owned()));
        assert_single_alert(&page, Severity::Success, "Saved OK-123");
    }

    #[tokio::test]
    async fn success_without_callback_uses_default_message() {
        let url = spawn_test_server(test_router()).await;
        let page = page_with_token();

        SaveRequest::new(&format!("{url}/save"), FormData::new())
            .send(&client_for(&page), &page)
            .await;

        assert_single_alert(&page, Severity::Success, DEFAULT_SUCCESS_MESSAGE);
    }

    #[tokio::test]
    async fn error_prefix_shows_server_message_and_skips_success() {
        let url = spawn_test_server(test_router()).await;
        let page = page_with_token();
        let success_called = Arc::new(AtomicBool::new(false));
        let flag = success_called.clone();

        let outcome = SaveRequest::new(&format!("{url}/refuse"), FormData::new())
            .on_success(move |body| {
                flag.store(true, Ordering::SeqCst);
                body.to_owned()
            })
            .send(&client_for(&page), &page)
            .await;

        assert_eq!(outcome, SaveOutcome::Rejected("Insufficient stock".to_owned()));
        assert!(!success_called.load(Ordering::SeqCst));
        assert_single_alert(&page, Severity::Error, "Insufficient stock");
    }

    #[tokio::test]
    async fn server_error_uses_default_error_message() {
        let url = spawn_test_server(test_router()).await;
        let page = page_with_token();

        let outcome = SaveRequest::new(&format!("{url}/broken"), FormData::new())
            .send(&client_for(&page), &page)
            .await;

        assert_eq!(
            outcome,
            SaveOutcome::Failed(SaveFailure::Status {
                status: 500,
                body: "stack trace".to_owned()
            })
        );
        assert_single_alert(&page, Severity::Error, DEFAULT_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn network_failure_goes_to_error_callback() {
        let url = unused_local_url().await;
        let page = page_with_token();

        let outcome = SaveRequest::new(&url, FormData::new())
            .on_error(|failure| match failure {
                SaveFailure::Network(_) => "offline".to_owned(),
                SaveFailure::Status { status, .. } => format!("status {status}"),
            })
            .send(&client_for(&page), &page)
            .await;

        assert!(matches!(outcome, SaveOutcome::Failed(SaveFailure::Network(_))));
        assert_single_alert(&page, Severity::Error, "offline");
    }

    #[tokio::test]
    async fn sends_fields_and_csrf_token_as_multipart() {
        let url = spawn_test_server(test_router()).await;
        let page = page_with_token();

        let outcome = SaveRequest::new(
            &format!("{url}/echo"),
            FormData::new().field("product", "커피").field("qty", 2),
        )
        .send(&client_for(&page), &page)
        .await;

        assert_eq!(
            outcome,
            SaveOutcome::Saved("product=커피&qty=2&_csrf=tok-123".to_owned())
        );
    }

    #[tokio::test]
    async fn csrf_field_is_omitted_without_token() {
        let url = spawn_test_server(test_router()).await;
        let page = Page::new(PageMeta::new());

        let outcome = SaveRequest::new(&format!("{url}/echo"), FormData::new().field("qty", 2))
            .send(&ApiClient::new(CsrfMeta::default()), &page)
            .await;

        assert_eq!(outcome, SaveOutcome::Saved("qty=2".to_owned()));
    }

    #[tokio::test]
    async fn loading_indicator_is_hidden_on_every_outcome() {
        let url = spawn_test_server(test_router()).await;
        let page = page_with_token();
        let client = client_for(&page);

        for path in ["/save", "/refuse", "/broken"] {
            SaveRequest::new(&format!("{url}{path}"), FormData::new())
                .send(&client, &page)
                .await;

            assert!(
                !page.with_body(|body| body.contains_id(LOADING_INDICATOR_ID)),
                "loading indicator left behind after {path}"
            );
        }
    }
}
