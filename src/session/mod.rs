//! Session state for the current shop owner.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every protected page and CLI command goes through a [`Session`]. The
//! server builds one per request over that request's cookies; the CLI builds
//! one per process over its own jar and runs [`Session::bootstrap`] once.
//!
//! INVARIANTS
//! ==========
//! - The cookie is the only authoritative copy of the token. The bearer on
//!   the api client is derived from it and dropped together with it.
//! - A present user implies a present cookie; the reverse need not hold
//!   (a request-bound session never fetches the profile on its own).
//! - `is_authenticated` is computed from the user, never stored.

pub mod token;

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

use std::sync::{Arc, PoisonError, RwLock};

use crate::nav::Route;
use crate::net::api::{ApiClient, ApiError};
use crate::net::endpoints;
use crate::net::types::User;
use token::{TOKEN_MAX_AGE, TOKEN_PATH, TokenStore, TokenStoreError};

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("could not store session token: {0}")]
    Token(#[from] TokenStoreError),
    #[error("session response carried no token")]
    EmptyToken,
}

type SharedUser = Arc<RwLock<Option<User>>>;

pub struct Session {
    api: ApiClient,
    tokens: TokenStore,
    user: SharedUser,
}

impl Session {
    /// Bind a session to a token store. When a token is already present, the
    /// api client starts with it as bearer, like a client set up from the
    /// request's cookies.
    #[must_use]
    pub fn new(api: ApiClient, tokens: TokenStore) -> Self {
        let user: SharedUser = Arc::new(RwLock::new(None));
        let api = {
            let tokens = tokens.clone();
            let user = Arc::clone(&user);
            api.with_unauthorized_hook(move || {
                clear_session(&tokens, &user);
            })
        };
        if let Some(token) = tokens.get_token() {
            api.set_bearer(&token);
        }
        Self { api, tokens, user }
    }

    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    #[must_use]
    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.user.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user().is_some()
    }

    fn set_user(&self, user: Option<User>) {
        *self.user.write().unwrap_or_else(PoisonError::into_inner) = user;
    }

    /// Exchange credentials for a session token.
    ///
    /// On success the token is stored for 30 days at `/`, the user is set and
    /// the api client carries the bearer. On failure nothing changes.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Route, AuthError> {
        let email = required("email", email)?;
        let password = required_secret("password", password)?;

        let response = endpoints::create_session(&self.api.detached(), email, password).await?;
        let (token, user) = response.into_parts(email);
        if token.trim().is_empty() {
            return Err(AuthError::EmptyToken);
        }

        self.tokens.set_token(&token, TOKEN_MAX_AGE, TOKEN_PATH)?;
        tracing::info!(user_id = %user.id, "signed in");
        self.set_user(Some(user));
        self.api.set_bearer(&token);

        Ok(Route::Dashboard)
    }

    /// Register a new account. Does not sign in.
    pub async fn sign_up(&self, name: &str, email: &str, password: &str) -> Result<Route, AuthError> {
        let name = required("name", name)?;
        let email = required("email", email)?;
        let password = required_secret("password", password)?;

        endpoints::register_user(&self.api.detached(), name, email, password).await?;
        tracing::info!("account registered");
        Ok(Route::Login)
    }

    /// Drop the token, the user and the bearer. Never fails; a store error
    /// is logged and the in-memory state is cleared anyway.
    pub fn logout_user(&self) {
        clear_session(&self.tokens, &self.user);
        self.api.clear_bearer();
    }

    /// [`Session::logout_user`], then go to the login page.
    pub fn sign_out(&self) -> Route {
        self.logout_user();
        Route::Login
    }

    /// Reconcile the cookie with in-memory state once, at client start.
    ///
    /// With a token present, fetch the profile; if the API rejects it, sign
    /// out so the stale cookie does not linger. Returns whether the session
    /// ended up authenticated.
    pub async fn bootstrap(&self) -> bool {
        if self.tokens.get_token().is_none() {
            return false;
        }
        match endpoints::fetch_me(&self.api).await {
            Ok(user) => {
                self.set_user(Some(user));
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "stored session rejected; signing out");
                self.sign_out();
                false
            }
        }
    }

    /// Fetch the profile for an already-authenticated session and keep it.
    pub async fn refresh_user(&self) -> Result<User, ApiError> {
        let user = endpoints::fetch_me(&self.api).await?;
        self.set_user(Some(user.clone()));
        Ok(user)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("api", &self.api)
            .field("tokens", &self.tokens)
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

fn clear_session(tokens: &TokenStore, user: &SharedUser) {
    if let Err(e) = tokens.destroy_token(TOKEN_PATH) {
        tracing::warn!(error = %e, "failed to destroy session cookie");
    }
    *user.write().unwrap_or_else(PoisonError::into_inner) = None;
}

fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, AuthError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AuthError::MissingField(field));
    }
    Ok(trimmed)
}

/// Like [`required`] but keeps the value verbatim; passwords are not trimmed.
fn required_secret<'a>(field: &'static str, value: &'a str) -> Result<&'a str, AuthError> {
    if value.trim().is_empty() {
        return Err(AuthError::MissingField(field));
    }
    Ok(value)
}
