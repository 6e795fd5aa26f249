//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds every page loader and form action to an axum route.
//! Handlers build a [`PageContext`] per request, run the guarded loader or
//! action and turn the outcome into a response. The cookie delta collected
//! while handling the request rides on every response, redirects included,
//! so a session cleared mid-request is also cleared in the browser.

pub mod auth;
pub mod pages;

#[cfg(test)]
#[path = "routes_test.rs"]
mod tests;

use std::future::Future;

use axum::Router;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::guard::{PageContext, PageOutcome};
use crate::nav::Route;
use crate::pages::ActionOutcome;
use crate::state::AppState;

/// Full application router.
pub fn app(state: AppState) -> Router {
    let static_dir = state.config.static_dir.clone();

    Router::new()
        .route("/", get(auth::login_page))
        .route("/login", get(auth::login_page).post(auth::login_submit))
        .route("/register", get(auth::register_page).post(auth::register_submit))
        .route("/logout", post(auth::logout))
        .route("/dashboard", get(pages::dashboard_page))
        .route("/dashboard/finish", post(pages::dashboard_finish))
        .route("/new", get(pages::new_schedule_page).post(pages::new_schedule_submit))
        .route("/haircuts", get(pages::haircuts_page))
        .route("/haircuts/new", get(pages::haircut_new_page).post(pages::haircut_new_submit))
        .route("/haircuts/{id}", get(pages::haircut_edit_page).post(pages::haircut_edit_submit))
        .route("/planos", get(pages::plans_page))
        .route("/planos/subscribe", post(pages::plans_subscribe))
        .route("/planos/portal", post(pages::plans_portal))
        .route("/healthz", get(healthz))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Response for a loader outcome. Guard redirects are temporary.
fn page_response<P>(ctx: &PageContext, outcome: PageOutcome<P>, render: impl FnOnce(P) -> String) -> Response {
    match outcome {
        PageOutcome::Render(props) => (ctx.response_cookies(), Html(render(props))).into_response(),
        PageOutcome::Redirect(route) => (ctx.response_cookies(), Redirect::temporary(&route.path())).into_response(),
    }
}

/// Response for a form action. Redirects are `303 See Other` so the browser
/// follows with a GET.
fn action_response<P>(ctx: &PageContext, outcome: ActionOutcome<P>, render: impl FnOnce(P) -> String) -> Response {
    match outcome {
        ActionOutcome::Render(props) => (ctx.response_cookies(), Html(render(props))).into_response(),
        ActionOutcome::Redirect(location) => (ctx.response_cookies(), Redirect::to(&location)).into_response(),
    }
}

/// Run a protected form action. Without a session token the action future
/// is dropped unpolled and the browser goes to the login page.
async fn protected_action<P>(
    ctx: &PageContext,
    action: impl Future<Output = ActionOutcome<P>>,
    render: impl FnOnce(P) -> String,
) -> Response {
    if ctx.token().is_none() {
        tracing::debug!("form action without session token; redirecting to login");
        return action_response(ctx, ActionOutcome::to(&Route::Login), render);
    }
    let outcome = action.await;
    action_response(ctx, outcome, render)
}
