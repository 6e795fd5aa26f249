//! Login, registration and logout routes.

use std::collections::HashMap;

use axum::Form;
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::Response;

use super::{action_response, page_response};
use crate::guard::redirect_if_authenticated;
use crate::pages::{ActionOutcome, login, register};
use crate::state::AppState;

type QueryMap = Query<HashMap<String, String>>;

pub async fn login_page(State(state): State<AppState>, headers: HeaderMap, Query(query): QueryMap) -> Response {
    let ctx = state.page_context(&headers, HashMap::new(), query);
    let outcome = redirect_if_authenticated(login::load)(ctx.clone()).await;
    page_response(&ctx, outcome, login::render)
}

pub async fn login_submit(State(state): State<AppState>, headers: HeaderMap, Form(form): Form<login::LoginForm>) -> Response {
    let ctx = state.page_context(&headers, HashMap::new(), HashMap::new());
    let outcome = login::submit(&ctx, form).await;
    action_response(&ctx, outcome, login::render)
}

pub async fn register_page(State(state): State<AppState>, headers: HeaderMap, Query(query): QueryMap) -> Response {
    let ctx = state.page_context(&headers, HashMap::new(), query);
    let outcome = redirect_if_authenticated(register::load)(ctx.clone()).await;
    page_response(&ctx, outcome, register::render)
}

pub async fn register_submit(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<register::RegisterForm>,
) -> Response {
    let ctx = state.page_context(&headers, HashMap::new(), HashMap::new());
    let outcome = register::submit(&ctx, form).await;
    action_response(&ctx, outcome, register::render)
}

/// Clear the session and expire the cookie. Works with or without a token.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let ctx = state.page_context(&headers, HashMap::new(), HashMap::new());
    let route = ctx.session().sign_out();
    tracing::info!("signed out");
    action_response(&ctx, ActionOutcome::<()>::to(&route), |()| String::new())
}
