//! BarberPRO web client.
//!
//! ARCHITECTURE
//! ============
//! Every screen is a thin layer over the remote barbershop API. The crate is
//! split the same way the pages use it:
//!
//! - `net` wraps the outbound HTTP client and the endpoint calls.
//! - `session` owns the cookie-backed token and the in-memory user.
//! - `guard` composes page loaders with authentication redirects.
//! - `pages` holds loaders, form actions and Leptos views per screen.
//! - `routes` binds all of it to axum.
//!
//! The `barber` binary reuses `net` and `session` from a long-lived process
//! with its own cookie jar.

pub mod components;
pub mod config;
pub mod format;
pub mod guard;
pub mod nav;
pub mod net;
pub mod pages;
pub mod routes;
pub mod session;
pub mod state;

#[cfg(test)]
pub(crate) mod test_support;
