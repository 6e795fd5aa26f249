//! Page loaders and the authentication guards that wrap them.
//!
//! DESIGN
//! ======
//! A loader is `Fn(PageContext) -> Future<Output = PageOutcome<P>>`: it
//! fetches what a page needs and either renders or redirects. Guards are
//! plain functions that take a loader and return a new loader, so a route
//! states its protection by composition:
//!
//! ```ignore
//! let load = require_auth(dashboard::load);
//! let outcome = load(ctx).await;
//! ```
//!
//! The guard only decides on token presence. Failures inside the wrapped
//! loader are that page's business; see [`PageOutcome::on_error`].

#[cfg(test)]
#[path = "guard_test.rs"]
mod tests;

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;

use crate::nav::{Notice, Route};
use crate::net::api::{ApiClient, ApiError};
use crate::session::Session;
use crate::session::token::{RequestCookies, SetCookies};

/// Result of a page loader.
#[derive(Debug, Clone, PartialEq)]
pub enum PageOutcome<P> {
    Render(P),
    Redirect(Route),
}

impl<P> PageOutcome<P> {
    /// Redirect for a failed API call: to the login page when the session
    /// was rejected (the cookie is already gone), else to `fallback`.
    #[must_use]
    pub fn on_error(err: &ApiError, fallback: Route) -> Self {
        if err.is_unauthorized() {
            Self::Redirect(Route::Login)
        } else {
            tracing::warn!(error = %err, fallback = %fallback.path(), "page load failed");
            Self::Redirect(fallback)
        }
    }
}

pub type LoaderFuture<P> = BoxFuture<'static, PageOutcome<P>>;

/// Everything a loader or action needs for one request: the request-bound
/// session, path parameters and query string. Cheap to clone.
#[derive(Clone, Debug)]
pub struct PageContext {
    inner: Arc<ContextInner>,
}

#[derive(Debug)]
struct ContextInner {
    session: Session,
    cookies: Arc<RequestCookies>,
    params: HashMap<String, String>,
    query: HashMap<String, String>,
}

impl PageContext {
    #[must_use]
    pub fn new(session: Session, cookies: Arc<RequestCookies>) -> Self {
        Self::with_parts(session, cookies, HashMap::new(), HashMap::new())
    }

    #[must_use]
    pub fn with_parts(
        session: Session,
        cookies: Arc<RequestCookies>,
        params: HashMap<String, String>,
        query: HashMap<String, String>,
    ) -> Self {
        Self { inner: Arc::new(ContextInner { session, cookies, params, query }) }
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.inner.session
    }

    #[must_use]
    pub fn api(&self) -> &ApiClient {
        self.inner.session.api()
    }

    /// Session token from the request cookie, if any.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.inner.session.tokens().get_token()
    }

    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.inner.params.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn query(&self, name: &str) -> Option<&str> {
        self.inner.query.get(name).map(String::as_str)
    }

    /// `?notice=` decoded, ignoring unknown codes.
    #[must_use]
    pub fn notice(&self) -> Option<Notice> {
        self.query("notice").and_then(Notice::from_code)
    }

    /// Cookies written while handling this request.
    #[must_use]
    pub fn response_cookies(&self) -> SetCookies {
        self.inner.cookies.response_cookies()
    }
}

/// Wrap `loader` so it only runs for requests carrying a session token.
/// Without one the result is a redirect to the login page.
pub fn require_auth<P, F, Fut>(loader: F) -> impl Fn(PageContext) -> LoaderFuture<P> + Clone + Send + Sync + 'static
where
    P: Send + 'static,
    F: Fn(PageContext) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = PageOutcome<P>> + Send + 'static,
{
    move |ctx: PageContext| {
        if ctx.token().is_none() {
            tracing::debug!("no session token; redirecting to login");
            return futures::future::ready(PageOutcome::Redirect(Route::Login)).boxed();
        }
        loader(ctx).boxed()
    }
}

/// Inverse of [`require_auth`] for the login and registration pages: a
/// request that already carries a token goes straight to the dashboard.
pub fn redirect_if_authenticated<P, F, Fut>(
    loader: F,
) -> impl Fn(PageContext) -> LoaderFuture<P> + Clone + Send + Sync + 'static
where
    P: Send + 'static,
    F: Fn(PageContext) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = PageOutcome<P>> + Send + 'static,
{
    move |ctx: PageContext| {
        if ctx.token().is_some() {
            return futures::future::ready(PageOutcome::Redirect(Route::Dashboard)).boxed();
        }
        loader(ctx).boxed()
    }
}
