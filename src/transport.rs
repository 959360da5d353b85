//! A thin HTTP client for the sales backend.
//!
//! Every request is sent once. A 200 OK response yields the body text and any
//! other status is an [Error::Http]. There are no retries or timeouts, and
//! concurrent requests complete in whatever order the server answers them.

use reqwest::{Method, StatusCode, header::CONTENT_TYPE};
use tokio::task::JoinHandle;

use crate::{Error, page::CsrfMeta};

/// Ordered key-value pairs sent as the body of a request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    fields: Vec<(String, String)>,
}

impl FormData {
    /// Form data without any fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the field `key` with `value`.
    pub fn field(mut self, key: &str, value: impl ToString) -> Self {
        self.append(key, value);
        self
    }

    /// Add the field `key` with `value`.
    pub fn append(&mut self, key: &str, value: impl ToString) {
        self.fields.push((key.to_owned(), value.to_string()));
    }

    /// The fields in the order they were added.
    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    /// Encode the fields as `application/x-www-form-urlencoded`.
    ///
    /// # Errors
    /// Returns [Error::FormEncoding] if the fields cannot be encoded.
    pub fn to_urlencoded(&self) -> Result<String, Error> {
        serde_urlencoded::to_string(&self.fields)
            .map_err(|error| Error::FormEncoding(error.to_string()))
    }
}

impl<K: ToString, V: ToString> FromIterator<(K, V)> for FormData {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
        }
    }
}

/// Sends form-encoded requests with the page's CSRF header attached.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    csrf: CsrfMeta,
}

impl ApiClient {
    /// A client that attaches the CSRF header described by `csrf`, if both the
    /// token and the header name are known.
    pub fn new(csrf: CsrfMeta) -> Self {
        Self {
            client: reqwest::Client::new(),
            csrf,
        }
    }

    pub(crate) fn http_client(&self) -> &reqwest::Client {
        &self.client
    }

    /// Send a request and return the response body.
    ///
    /// # Errors
    /// Returns [Error::Http] if the response status is not 200 OK,
    /// [Error::Network] if no response was received, or
    /// [Error::FormEncoding] if `data` could not be encoded.
    pub async fn request(
        &self,
        url: &str,
        method: Method,
        data: Option<&FormData>,
    ) -> Result<String, Error> {
        let mut request = self
            .client
            .request(method.clone(), url)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded");

        if let Some((header_name, token)) = self.csrf.header() {
            request = request.header(header_name, token);
        }

        if let Some(data) = data {
            request = request.body(data.to_urlencoded()?);
        }

        let response = request.send().await.inspect_err(|error| {
            tracing::error!("{method} {url} failed before a response arrived: {error}");
        })?;

        check_status(response.status()).inspect_err(|error| {
            tracing::warn!("{method} {url} failed: {error}");
        })?;

        Ok(response.text().await?)
    }

    /// Send a GET request and return the response body.
    ///
    /// # Errors
    /// See [ApiClient::request].
    pub async fn get(&self, url: &str) -> Result<String, Error> {
        self.request(url, Method::GET, None).await
    }

    /// Send a POST request with `data` and return the response body.
    ///
    /// # Errors
    /// See [ApiClient::request].
    pub async fn post(&self, url: &str, data: &FormData) -> Result<String, Error> {
        self.request(url, Method::POST, Some(data)).await
    }

    /// Send a request in the background and pass the outcome to `callback`.
    ///
    /// `callback` is called exactly once, after this function has returned.
    /// Must be called from within a Tokio runtime.
    pub fn dispatch(
        &self,
        url: &str,
        method: Method,
        data: Option<FormData>,
        callback: impl FnOnce(Result<String, Error>) + Send + 'static,
    ) -> JoinHandle<()> {
        let client = self.clone();
        let url = url.to_owned();

        tokio::spawn(async move {
            let result = client.request(&url, method, data.as_ref()).await;
            callback(result);
        })
    }
}

/// Only 200 OK counts as success.
pub(crate) fn check_status(status: StatusCode) -> Result<(), Error> {
    if status == StatusCode::OK {
        return Ok(());
    }

    Err(Error::Http {
        status: status.as_u16(),
        status_text: status.canonical_reason().unwrap_or_default().to_owned(),
    })
}
