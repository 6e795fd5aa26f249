//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds only what is safe to share across requests: the immutable config
//! and the pooled outbound HTTP client. Everything session-related is built
//! fresh per request by [`AppState::page_context`].

use std::collections::HashMap;
use std::sync::Arc;

use axum::http::HeaderMap;

use crate::config::AppConfig;
use crate::guard::PageContext;
use crate::net::api::{ApiClient, ApiError, build_http};
use crate::session::Session;
use crate::session::token::{RequestCookies, TokenStore};

#[derive(Clone, Debug)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub http: reqwest::Client,
}

impl AppState {
    #[must_use]
    pub fn new(config: AppConfig, http: reqwest::Client) -> Self {
        Self { config: Arc::new(config), http }
    }

    /// Build state with a transport configured from `config`.
    pub fn from_config(config: AppConfig) -> Result<Self, ApiError> {
        let http = build_http(config.api_timeout_secs)?;
        Ok(Self::new(config, http))
    }

    /// Per-request context: a session over this request's cookies with the
    /// api client already carrying the cookie's token.
    #[must_use]
    pub fn page_context(
        &self,
        headers: &HeaderMap,
        params: HashMap<String, String>,
        query: HashMap<String, String>,
    ) -> PageContext {
        let cookies = Arc::new(RequestCookies::from_headers(headers));
        let tokens = TokenStore::new(cookies.clone()).with_secure(self.config.cookie_secure);
        let api = ApiClient::new(self.http.clone(), &self.config.api_url);
        PageContext::with_parts(Session::new(api, tokens), cookies, params, query)
    }
}
