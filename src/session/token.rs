//! Cookie-backed storage for the opaque session token.
//!
//! DESIGN
//! ======
//! The token lives in exactly one cookie. Where that cookie comes from
//! depends on who is running: the web server reads it from the inbound
//! request and answers with `Set-Cookie`, while a long-lived client keeps its
//! own jar. [`CookieSource`] is that seam; [`TokenStore`] is the only code
//! that knows the cookie's name and attributes.

use std::collections::HashMap;
use std::convert::Infallible;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, HeaderValue};
use axum::response::{IntoResponseParts, ResponseParts};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

pub const TOKEN_COOKIE: &str = "@barber.token";
pub const TOKEN_PATH: &str = "/";
pub const TOKEN_MAX_AGE: Duration = Duration::days(30);

#[derive(Debug, thiserror::Error)]
pub enum TokenStoreError {
    #[error("cookie file i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("cookie file encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Where cookies are read from and written to.
pub trait CookieSource: Send + Sync {
    /// Current value of the named cookie, if any.
    fn read(&self, name: &str) -> Option<String>;

    /// Store `cookie`, replacing any cookie with the same name.
    fn write(&self, cookie: Cookie<'static>) -> Result<(), TokenStoreError>;

    /// Expire the named cookie at `path`.
    fn remove(&self, name: &str, path: &str) -> Result<(), TokenStoreError> {
        self.write(expired_cookie(name, path))
    }
}

fn expired_cookie(name: &str, path: &str) -> Cookie<'static> {
    Cookie::build((name.to_owned(), String::new()))
        .path(path.to_owned())
        .max_age(Duration::ZERO)
        .build()
}

// =============================================================================
// TOKEN STORE
// =============================================================================

/// Reads and writes the session token cookie. Never inspects the token.
#[derive(Clone)]
pub struct TokenStore {
    source: Arc<dyn CookieSource>,
    secure: bool,
}

impl TokenStore {
    #[must_use]
    pub fn new(source: Arc<dyn CookieSource>) -> Self {
        Self { source, secure: false }
    }

    /// Mark cookies written by this store `Secure`.
    #[must_use]
    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    pub fn set_token(&self, value: &str, max_age: Duration, path: &str) -> Result<(), TokenStoreError> {
        let cookie = Cookie::build((TOKEN_COOKIE, value.to_owned()))
            .path(path.to_owned())
            .max_age(max_age)
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .build();
        self.source.write(cookie)
    }

    /// The token, or `None` when the cookie is missing or empty.
    #[must_use]
    pub fn get_token(&self) -> Option<String> {
        self.source.read(TOKEN_COOKIE).filter(|token| !token.is_empty())
    }

    pub fn destroy_token(&self, path: &str) -> Result<(), TokenStoreError> {
        self.source.remove(TOKEN_COOKIE, path)
    }
}

impl std::fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenStore")
            .field("has_token", &self.get_token().is_some())
            .field("secure", &self.secure)
            .finish()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// =============================================================================
// REQUEST-BOUND COOKIES
// =============================================================================

/// Cookies of one inbound HTTP request.
///
/// Reads come from the request's `Cookie` header. Writes are kept as a delta
/// that becomes the response's `Set-Cookie` headers, and later reads in the
/// same request see them.
#[derive(Debug, Default)]
pub struct RequestCookies {
    inbound: CookieJar,
    delta: Mutex<Vec<Cookie<'static>>>,
}

impl RequestCookies {
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self { inbound: CookieJar::from_headers(headers), delta: Mutex::new(Vec::new()) }
    }

    /// Cookies written during this request, to be sent with the response.
    #[must_use]
    pub fn response_cookies(&self) -> SetCookies {
        SetCookies(lock(&self.delta).clone())
    }
}

impl CookieSource for RequestCookies {
    fn read(&self, name: &str) -> Option<String> {
        if let Some(cookie) = lock(&self.delta).iter().find(|cookie| cookie.name() == name) {
            return Some(cookie.value().to_owned());
        }
        self.inbound.get(name).map(|cookie| cookie.value().to_owned())
    }

    fn write(&self, cookie: Cookie<'static>) -> Result<(), TokenStoreError> {
        let mut delta = lock(&self.delta);
        delta.retain(|existing| existing.name() != cookie.name());
        delta.push(cookie);
        Ok(())
    }
}

/// `Set-Cookie` headers for a response. Names are written verbatim, so the
/// browser stores `@barber.token` rather than a percent-encoded name.
#[derive(Debug, Clone, Default)]
pub struct SetCookies(Vec<Cookie<'static>>);

impl SetCookies {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Rendered header values.
    #[must_use]
    pub fn header_values(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }
}

impl IntoResponseParts for SetCookies {
    type Error = Infallible;

    fn into_response_parts(self, mut res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        for value in self.header_values() {
            match HeaderValue::from_str(&value) {
                Ok(header) => {
                    res.headers_mut().append(SET_COOKIE, header);
                }
                Err(e) => tracing::warn!(error = %e, "dropping unrepresentable set-cookie header"),
            }
        }
        Ok(res)
    }
}

// =============================================================================
// CLIENT-OWNED COOKIES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct StoredCookie {
    value: String,
    path: String,
    /// Unix seconds; `None` lives as long as the jar.
    expires_at: Option<i64>,
}

impl StoredCookie {
    fn is_live(&self, now: i64) -> bool {
        self.expires_at.is_none_or(|at| now < at)
    }
}

/// A jar owned by a long-lived client process, optionally persisted as JSON
/// so the session survives restarts the way a browser's cookies do.
#[derive(Debug, Default)]
pub struct ClientCookies {
    entries: Mutex<HashMap<String, StoredCookie>>,
    file: Option<PathBuf>,
}

impl ClientCookies {
    #[must_use]
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open (or start) a jar persisted at `path`.
    pub fn persistent(path: impl Into<PathBuf>) -> Result<Self, TokenStoreError> {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(text) if !text.trim().is_empty() => serde_json::from_str(&text)?,
            Ok(_) => HashMap::new(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { entries: Mutex::new(entries), file: Some(path) })
    }

    fn flush(&self, entries: &HashMap<String, StoredCookie>) -> Result<(), TokenStoreError> {
        let Some(path) = &self.file else {
            return Ok(());
        };
        let now = now_unix();
        let live: HashMap<&String, &StoredCookie> = entries.iter().filter(|(_, c)| c.is_live(now)).collect();
        std::fs::write(path, serde_json::to_vec_pretty(&live)?)?;
        Ok(())
    }
}

fn now_unix() -> i64 {
    OffsetDateTime::now_utc().unix_timestamp()
}

impl CookieSource for ClientCookies {
    fn read(&self, name: &str) -> Option<String> {
        let entries = lock(&self.entries);
        entries
            .get(name)
            .filter(|cookie| cookie.is_live(now_unix()))
            .map(|cookie| cookie.value.clone())
    }

    fn write(&self, cookie: Cookie<'static>) -> Result<(), TokenStoreError> {
        let mut entries = lock(&self.entries);
        let max_age = cookie.max_age();
        if cookie.value().is_empty() || max_age.is_some_and(|age| age <= Duration::ZERO) {
            entries.remove(cookie.name());
        } else {
            let stored = StoredCookie {
                value: cookie.value().to_owned(),
                path: cookie.path().unwrap_or(TOKEN_PATH).to_owned(),
                expires_at: max_age.map(|age| now_unix() + age.whole_seconds()),
            };
            entries.insert(cookie.name().to_owned(), stored);
        }
        self.flush(&entries)
    }

    fn remove(&self, name: &str, path: &str) -> Result<(), TokenStoreError> {
        let mut entries = lock(&self.entries);
        if entries.get(name).is_some_and(|cookie| cookie.path == path) {
            entries.remove(name);
        }
        self.flush(&entries)
    }
}

#[cfg(test)]
#[path = "token_test.rs"]
mod tests;
