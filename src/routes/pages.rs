//! Routes for the signed-in screens.

use std::collections::HashMap;

use axum::Form;
use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::response::Response;

use super::{page_response, protected_action};
use crate::guard::require_auth;
use crate::pages::{dashboard, haircut_edit, haircut_new, haircuts, new_schedule, plans};
use crate::state::AppState;

type QueryMap = Query<HashMap<String, String>>;

fn id_param(id: String) -> HashMap<String, String> {
    HashMap::from([("id".to_owned(), id)])
}

pub async fn dashboard_page(State(state): State<AppState>, headers: HeaderMap, Query(query): QueryMap) -> Response {
    let ctx = state.page_context(&headers, HashMap::new(), query);
    let outcome = require_auth(dashboard::load)(ctx.clone()).await;
    page_response(&ctx, outcome, dashboard::render)
}

pub async fn dashboard_finish(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<dashboard::FinishForm>,
) -> Response {
    let ctx = state.page_context(&headers, HashMap::new(), HashMap::new());
    protected_action(&ctx, dashboard::finish(&ctx, form), dashboard::render).await
}

pub async fn new_schedule_page(State(state): State<AppState>, headers: HeaderMap, Query(query): QueryMap) -> Response {
    let ctx = state.page_context(&headers, HashMap::new(), query);
    let outcome = require_auth(new_schedule::load)(ctx.clone()).await;
    page_response(&ctx, outcome, new_schedule::render)
}

pub async fn new_schedule_submit(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<new_schedule::NewScheduleForm>,
) -> Response {
    let ctx = state.page_context(&headers, HashMap::new(), HashMap::new());
    protected_action(&ctx, new_schedule::register(&ctx, form), new_schedule::render).await
}

pub async fn haircuts_page(State(state): State<AppState>, headers: HeaderMap, Query(query): QueryMap) -> Response {
    let ctx = state.page_context(&headers, HashMap::new(), query);
    let outcome = require_auth(haircuts::load)(ctx.clone()).await;
    page_response(&ctx, outcome, haircuts::render)
}

pub async fn haircut_new_page(State(state): State<AppState>, headers: HeaderMap, Query(query): QueryMap) -> Response {
    let ctx = state.page_context(&headers, HashMap::new(), query);
    let outcome = require_auth(haircut_new::load)(ctx.clone()).await;
    page_response(&ctx, outcome, haircut_new::render)
}

pub async fn haircut_new_submit(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<haircut_new::HaircutNewForm>,
) -> Response {
    let ctx = state.page_context(&headers, HashMap::new(), HashMap::new());
    protected_action(&ctx, haircut_new::create(&ctx, form), haircut_new::render).await
}

pub async fn haircut_edit_page(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Query(query): QueryMap,
) -> Response {
    let ctx = state.page_context(&headers, id_param(id), query);
    let outcome = require_auth(haircut_edit::load)(ctx.clone()).await;
    page_response(&ctx, outcome, haircut_edit::render)
}

pub async fn haircut_edit_submit(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Form(form): Form<haircut_edit::HaircutEditForm>,
) -> Response {
    let ctx = state.page_context(&headers, id_param(id), HashMap::new());
    protected_action(&ctx, haircut_edit::update(&ctx, form), haircut_edit::render).await
}

pub async fn plans_page(State(state): State<AppState>, headers: HeaderMap, Query(query): QueryMap) -> Response {
    let ctx = state.page_context(&headers, HashMap::new(), query);
    let outcome = require_auth(plans::load)(ctx.clone()).await;
    page_response(&ctx, outcome, plans::render)
}

pub async fn plans_subscribe(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let ctx = state.page_context(&headers, HashMap::new(), HashMap::new());
    protected_action(&ctx, plans::subscribe(&ctx, &state.config.checkout_url), plans::render).await
}

pub async fn plans_portal(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let ctx = state.page_context(&headers, HashMap::new(), HashMap::new());
    protected_action(&ctx, plans::portal(&ctx), plans::render).await
}
