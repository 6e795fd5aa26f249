//! Shared HTTP client for the barbershop API.
//!
//! DESIGN
//! ======
//! One `ApiClient` per request (server) or per process (CLI). Clones share
//! the same pooled `reqwest::Client`, base URL and `Authorization` slot, so
//! setting the bearer on one clone is visible to all of them.
//!
//! The bearer is a derived copy of the session cookie. When a call that
//! carried a bearer comes back 401, the client clears its copy and fires the
//! installed invalidation hook so the session can destroy the cookie before
//! any later call on the same page reuses the stale token.
//!
//! ERROR HANDLING
//! ==============
//! Non-2xx responses map to [`ApiError::Status`] with the API's own message
//! when the body carries one; 401 maps to [`ApiError::Unauthorized`].

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("http client build failed: {0}")]
    ClientBuild(String),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("session is no longer valid")]
    Unauthorized,
    #[error("api returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

type UnauthorizedHook = Arc<dyn Fn() + Send + Sync>;

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Arc<str>,
    bearer: Arc<RwLock<Option<String>>>,
    on_unauthorized: Option<UnauthorizedHook>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.bearer().is_some())
            .finish_non_exhaustive()
    }
}

/// Build the pooled transport. `timeout_secs = None` keeps reqwest's default
/// of no whole-request timeout.
pub fn build_http(timeout_secs: Option<u64>) -> Result<reqwest::Client, ApiError> {
    let mut builder = reqwest::Client::builder();
    if let Some(secs) = timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    builder.build().map_err(|e| ApiError::ClientBuild(e.to_string()))
}

impl ApiClient {
    /// Wrap an existing transport. `base_url` is used without trailing slash.
    #[must_use]
    pub fn new(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: Arc::from(base_url.trim_end_matches('/')),
            bearer: Arc::new(RwLock::new(None)),
            on_unauthorized: None,
        }
    }

    /// Install the hook fired when a bearer-carrying call returns 401.
    #[must_use]
    pub fn with_unauthorized_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_unauthorized = Some(Arc::new(hook));
        self
    }

    /// A client on the same transport and base URL that sends no bearer and
    /// fires no hook. Used for the public sign-in and sign-up calls.
    #[must_use]
    pub fn detached(&self) -> Self {
        Self::new(self.http.clone(), &self.base_url)
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Attach `Authorization: Bearer <token>` to every later call.
    pub fn set_bearer(&self, token: &str) {
        *self.bearer.write().unwrap_or_else(PoisonError::into_inner) = Some(token.to_owned());
    }

    pub fn clear_bearer(&self) {
        *self.bearer.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    #[must_use]
    pub fn bearer(&self) -> Option<String> {
        self.bearer.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// `GET path?query`.
    pub async fn get<Q, T>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::GET, path).query(query);
        self.send(request).await
    }

    /// `POST path` with a JSON body.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::POST, path).json(body);
        self.send(request).await
    }

    /// `PUT path` with a JSON body.
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::PUT, path).json(body);
        self.send(request).await
    }

    /// `DELETE path?query`.
    pub async fn delete<Q, T>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::DELETE, path).query(query);
        self.send(request).await
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = endpoint_url(&self.base_url, path);
        let builder = self.http.request(method, url);
        match self.bearer() {
            Some(token) => builder.header(AUTHORIZATION, format!("Bearer {token}")),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T, ApiError> {
        let carried_bearer = self.bearer().is_some();
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if status == StatusCode::UNAUTHORIZED {
            if carried_bearer {
                tracing::warn!("api rejected session token; invalidating session");
                self.clear_bearer();
                if let Some(hook) = &self.on_unauthorized {
                    hook();
                }
            }
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            return Err(ApiError::Status { status: status.as_u16(), message: error_message(&text, status) });
        }

        decode_body(&text)
    }
}

pub(crate) fn endpoint_url(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Decode a JSON body; an empty body decodes as `null`.
pub(crate) fn decode_body<T: DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    let text = text.trim();
    let text = if text.is_empty() { "null" } else { text };
    Ok(serde_json::from_str(text)?)
}

/// Pull a human-readable message out of an error body.
pub(crate) fn error_message(text: &str, status: StatusCode) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(text) {
        for key in ["error", "message"] {
            if let Some(message) = value.get(key).and_then(serde_json::Value::as_str) {
                return message.to_owned();
            }
        }
    }
    let text = text.trim();
    if text.is_empty() {
        status.canonical_reason().unwrap_or("request failed").to_owned()
    } else {
        text.to_owned()
    }
}
