use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::http::header::COOKIE;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};

use super::*;
use crate::config::AppConfig;
use crate::guard::PageContext;
use crate::state::AppState;
use crate::test_support::{CallLog, spawn_api};

// =============================================================================
// STUB API
// =============================================================================

#[derive(Clone, Default)]
struct Stub {
    log: CallLog,
    bodies: CallLog,
    premium: bool,
    count: u64,
    /// Every call answers 401.
    reject: bool,
    /// Every call answers 500.
    fail: bool,
    /// `GET /haircuts?status=true` answers `null`.
    null_catalog: bool,
}

type Q = Query<HashMap<String, String>>;

impl Stub {
    fn answer(&self, call: String, ok: impl FnOnce() -> Value) -> Response {
        self.log.record(call);
        if self.reject {
            return StatusCode::UNAUTHORIZED.into_response();
        }
        if self.fail {
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": "boom" }))).into_response();
        }
        Json(ok()).into_response()
    }

    fn subscription(&self) -> Value {
        if self.premium { json!({ "id": "s1", "status": "active" }) } else { Value::Null }
    }
}

fn stub_router(stub: Stub) -> Router {
    Router::new()
        .route(
            "/schedule",
            get(|State(s): State<Stub>| async move {
                s.answer("GET /schedule".to_owned(), || {
                    json!([{
                        "id": "a1",
                        "customer": "Ana",
                        "haircut": { "id": "h1", "name": "Degradê", "price": 30, "user_id": "u1" }
                    }])
                })
            })
            .delete(|State(s): State<Stub>, Query(q): Q| async move {
                let id = q.get("schedule_id").cloned().unwrap_or_default();
                s.answer(format!("DELETE /schedule?schedule_id={id}"), || Value::Null)
            })
            .post(|State(s): State<Stub>, Json(body): Json<Value>| async move {
                s.bodies.record(body.to_string());
                s.answer("POST /schedule".to_owned(), || json!({ "id": "a2" }))
            }),
        )
        .route(
            "/haircuts",
            get(|State(s): State<Stub>, Query(q): Q| async move {
                let status = q.get("status").cloned().unwrap_or_default();
                let null_catalog = s.null_catalog && status == "true";
                s.answer(format!("GET /haircuts?status={status}"), || {
                    if null_catalog {
                        Value::Null
                    } else if status == "true" {
                        json!([{ "id": "h1", "name": "Degradê", "price": "30", "status": true, "user_id": "u1" }])
                    } else {
                        json!([{ "id": "h9", "name": "Moicano", "price": 25.5, "status": false, "user_id": "u1" }])
                    }
                })
            }),
        )
        .route(
            "/haircut",
            post(|State(s): State<Stub>, Json(body): Json<Value>| async move {
                s.bodies.record(body.to_string());
                s.answer("POST /haircut".to_owned(), || json!({ "id": "h2" }))
            })
            .put(|State(s): State<Stub>, Json(body): Json<Value>| async move {
                s.bodies.record(body.to_string());
                s.answer("PUT /haircut".to_owned(), || json!({ "id": "h1" }))
            }),
        )
        .route(
            "/haircut/detail",
            get(|State(s): State<Stub>, Query(q): Q| async move {
                let id = q.get("haircut_id").cloned().unwrap_or_default();
                s.answer(format!("GET /haircut/detail?haircut_id={id}"), || {
                    json!({ "id": id, "name": "Degradê", "price": "45.9", "status": true, "user_id": "u1" })
                })
            }),
        )
        .route(
            "/haircut/check",
            get(|State(s): State<Stub>| async move {
                let subscription = s.subscription();
                s.answer("GET /haircut/check".to_owned(), || json!({ "id": "u1", "subscriptions": subscription }))
            }),
        )
        .route(
            "/haircut/count",
            get(|State(s): State<Stub>| async move {
                let count = s.count;
                s.answer("GET /haircut/count".to_owned(), || json!(count))
            }),
        )
        .route(
            "/me",
            get(|State(s): State<Stub>| async move {
                let subscription = s.subscription();
                s.answer("GET /me".to_owned(), || {
                    json!({ "id": "u1", "name": "A", "email": "a@a.com", "endereco": null, "subscriptions": subscription })
                })
            }),
        )
        .route(
            "/subscribe",
            post(|State(s): State<Stub>| async move {
                s.answer("POST /subscribe".to_owned(), || json!({ "sessionId": "cs_test_1" }))
            }),
        )
        .route(
            "/create-portal",
            post(|State(s): State<Stub>| async move {
                s.answer("POST /create-portal".to_owned(), || json!({ "sessionId": "https://billing.example/p/1" }))
            }),
        )
        .route(
            "/session",
            post(|State(s): State<Stub>| async move {
                s.log.record("POST /session");
                (StatusCode::UNAUTHORIZED, Json(json!({ "error": "Email/senha incorretos" }))).into_response()
            }),
        )
        .with_state(stub)
}

struct Harness {
    state: AppState,
    log: CallLog,
    bodies: CallLog,
}

impl Harness {
    async fn start(stub: Stub) -> Self {
        let log = stub.log.clone();
        let bodies = stub.bodies.clone();
        let base = spawn_api(stub_router(stub)).await;
        let state = AppState::new(AppConfig::for_api(&base), reqwest::Client::new());
        Self { state, log, bodies }
    }

    fn ctx(&self, params: &[(&str, &str)], query: &[(&str, &str)]) -> PageContext {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("@barber.token=t1"));
        self.state.page_context(&headers, pairs(params), pairs(query))
    }
}

fn pairs(items: &[(&str, &str)]) -> HashMap<String, String> {
    items.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect()
}

fn rendered<P: std::fmt::Debug>(outcome: PageOutcome<P>) -> P {
    match outcome {
        PageOutcome::Render(props) => props,
        PageOutcome::Redirect(route) => panic!("expected render, got redirect to {}", route.path()),
    }
}

fn rerendered<P: std::fmt::Debug>(outcome: ActionOutcome<P>) -> P {
    match outcome {
        ActionOutcome::Render(props) => props,
        ActionOutcome::Redirect(location) => panic!("expected render, got redirect to {location}"),
    }
}

// =============================================================================
// DASHBOARD
// =============================================================================

#[tokio::test]
async fn dashboard_renders_customer_and_formatted_price() {
    let h = Harness::start(Stub::default()).await;

    let props = rendered(dashboard::load(h.ctx(&[], &[])).await);
    let html = dashboard::render(props);

    assert!(html.contains("Ana"), "{html}");
    assert!(html.contains("Degradê"), "{html}");
    assert!(html.contains("R$\u{a0}30,00"), "{html}");
    assert!(html.contains("href=\"/dashboard?finish=a1\""), "{html}");
}

#[tokio::test]
async fn dashboard_finish_query_opens_panel() {
    let h = Harness::start(Stub::default()).await;

    let props = rendered(dashboard::load(h.ctx(&[], &[("finish", "a1")])).await);
    assert_eq!(props.finishing.as_ref().map(|item| item.id.as_str()), Some("a1"));
    let html = dashboard::render(props);
    assert!(html.contains("Finalizar serviço"), "{html}");
    assert!(html.contains("value=\"a1\""), "{html}");

    let props = rendered(dashboard::load(h.ctx(&[], &[("finish", "unknown")])).await);
    assert!(props.finishing.is_none());
}

#[tokio::test]
async fn dashboard_failure_renders_empty_agenda() {
    let h = Harness::start(Stub { fail: true, ..Stub::default() }).await;

    let props = rendered(dashboard::load(h.ctx(&[], &[])).await);

    assert!(props.schedule.is_empty());
}

#[tokio::test]
async fn rejected_session_redirects_to_login_and_expires_cookie() {
    let h = Harness::start(Stub { reject: true, ..Stub::default() }).await;
    let ctx = h.ctx(&[], &[]);

    let outcome = dashboard::load(ctx.clone()).await;

    assert_eq!(outcome, PageOutcome::Redirect(Route::Login));
    let cookies = ctx.response_cookies().header_values();
    assert_eq!(cookies.len(), 1);
    assert!(cookies[0].contains("Max-Age=0"), "{}", cookies[0]);
}

#[tokio::test]
async fn finish_removes_item_and_returns_to_agenda() {
    let h = Harness::start(Stub::default()).await;

    let outcome = dashboard::finish(&h.ctx(&[], &[]), dashboard::FinishForm { schedule_id: "a1".to_owned() }).await;

    assert_eq!(outcome.location(), Some("/dashboard"));
    assert_eq!(h.log.count("DELETE /schedule?schedule_id=a1"), 1);
}

#[tokio::test]
async fn finish_failure_redirects_with_notice() {
    let h = Harness::start(Stub { fail: true, ..Stub::default() }).await;

    let outcome = dashboard::finish(&h.ctx(&[], &[]), dashboard::FinishForm { schedule_id: "a1".to_owned() }).await;

    assert_eq!(outcome.location(), Some("/dashboard?notice=finish-failed"));
}

// =============================================================================
// NEW APPOINTMENT
// =============================================================================

#[tokio::test]
async fn new_schedule_with_empty_customer_makes_no_create_call() {
    let h = Harness::start(Stub::default()).await;
    let form = new_schedule::NewScheduleForm { customer: "  ".to_owned(), haircut_id: "h1".to_owned() };

    let props = rerendered(new_schedule::register(&h.ctx(&[], &[]), form).await);

    assert_eq!(props.haircuts.len(), 1);
    assert_eq!(h.log.count("POST /schedule"), 0);
}

#[tokio::test]
async fn new_schedule_posts_customer_and_haircut() {
    let h = Harness::start(Stub::default()).await;
    let form = new_schedule::NewScheduleForm { customer: "Bruno".to_owned(), haircut_id: "h1".to_owned() };

    let outcome = new_schedule::register(&h.ctx(&[], &[]), form).await;

    assert_eq!(outcome.location(), Some("/dashboard"));
    let body: Value = serde_json::from_str(&h.bodies.calls()[0]).unwrap();
    assert_eq!(body, json!({ "customer": "Bruno", "haircut_id": "h1" }));
}

#[tokio::test]
async fn new_schedule_with_null_catalog_goes_to_dashboard() {
    let h = Harness::start(Stub { null_catalog: true, ..Stub::default() }).await;

    assert_eq!(new_schedule::load(h.ctx(&[], &[])).await, PageOutcome::Redirect(Route::Dashboard));
}

// =============================================================================
// CATALOG
// =============================================================================

#[tokio::test]
async fn catalog_lists_active_by_default_and_inactive_on_toggle() {
    let h = Harness::start(Stub::default()).await;

    let active = rendered(haircuts::load(h.ctx(&[], &[])).await);
    assert!(active.active);
    assert_eq!(active.haircuts[0].id, "h1");
    let html = haircuts::render(active);
    assert!(html.contains("href=\"/haircuts/h1\""), "{html}");
    assert!(html.contains("href=\"/haircuts?status=inactive\""), "{html}");

    let inactive = rendered(haircuts::load(h.ctx(&[], &[("status", "inactive")])).await);
    assert!(!inactive.active);
    assert_eq!(inactive.haircuts[0].id, "h9");
    assert_eq!(h.log.count("GET /haircuts?status=false"), 1);
}

#[tokio::test]
async fn catalog_failure_goes_to_dashboard() {
    let h = Harness::start(Stub { fail: true, ..Stub::default() }).await;
    assert_eq!(haircuts::load(h.ctx(&[], &[])).await, PageOutcome::Redirect(Route::Dashboard));

    let h = Harness::start(Stub { null_catalog: true, ..Stub::default() }).await;
    assert_eq!(haircuts::load(h.ctx(&[], &[])).await, PageOutcome::Redirect(Route::Dashboard));
}

// =============================================================================
// NEW HAIRCUT
// =============================================================================

fn haircut_form(name: &str, price: &str) -> haircut_new::HaircutNewForm {
    haircut_new::HaircutNewForm { name: name.to_owned(), price: price.to_owned(), ..Default::default() }
}

#[tokio::test]
async fn free_account_at_limit_cannot_create() {
    let h = Harness::start(Stub { count: 3, ..Stub::default() }).await;

    let props = rendered(haircut_new::load(h.ctx(&[], &[])).await);
    assert!(props.limit_reached());
    let html = haircut_new::render(props);
    assert!(html.contains("Seja Premium"), "{html}");
    assert!(html.contains("disabled"), "{html}");

    let props = rerendered(haircut_new::create(&h.ctx(&[], &[]), haircut_form("Navalhado", "40")).await);
    assert_eq!(props.notice, Some(Notice::HaircutLimitReached));
    assert_eq!(h.log.count("POST /haircut"), 0);
}

#[tokio::test]
async fn premium_account_ignores_limit() {
    let h = Harness::start(Stub { count: 10, premium: true, ..Stub::default() }).await;

    let outcome = haircut_new::create(&h.ctx(&[], &[]), haircut_form("Navalhado", "40,50")).await;

    assert_eq!(outcome.location(), Some("/haircuts"));
    let body: Value = serde_json::from_str(&h.bodies.calls()[0]).unwrap();
    assert_eq!(body, json!({ "name": "Navalhado", "price": 40.5 }));
}

#[tokio::test]
async fn new_haircut_with_empty_name_keeps_values_and_makes_no_call() {
    let h = Harness::start(Stub::default()).await;

    let props = rerendered(haircut_new::create(&h.ctx(&[], &[]), haircut_form("", "59.99")).await);

    assert_eq!(props.price, "59.99");
    assert_eq!(props.notice, None);
    assert!(h.log.calls().is_empty(), "{:?}", h.log.calls());
}

#[tokio::test]
async fn new_haircut_with_empty_name_stays_on_form_while_api_is_down() {
    let h = Harness::start(Stub { fail: true, ..Stub::default() }).await;
    let form = haircut_new::HaircutNewForm {
        name: "  ".to_owned(),
        price: "59.99".to_owned(),
        premium: false,
        count: 3,
    };

    let props = rerendered(haircut_new::create(&h.ctx(&[], &[]), form).await);

    assert_eq!(props.price, "59.99");
    assert!(props.limit_reached());
    assert!(h.log.calls().is_empty(), "{:?}", h.log.calls());
    let html = haircut_new::render(props);
    assert!(html.contains("value=\"59.99\""), "{html}");
    assert!(html.contains("name=\"count\""), "{html}");
}

#[tokio::test]
async fn new_haircut_with_unparsable_price_shows_notice() {
    let h = Harness::start(Stub::default()).await;

    let props = rerendered(haircut_new::create(&h.ctx(&[], &[]), haircut_form("Navalhado", "barato")).await);

    assert_eq!(props.notice, Some(Notice::InvalidPrice));
    assert!(h.log.calls().is_empty(), "{:?}", h.log.calls());
}

#[tokio::test]
async fn new_haircut_ignores_echoed_plan_when_checking_limit() {
    let h = Harness::start(Stub { count: 3, ..Stub::default() }).await;
    let form = haircut_new::HaircutNewForm {
        name: "Navalhado".to_owned(),
        price: "40".to_owned(),
        premium: true,
        count: 0,
    };

    let props = rerendered(haircut_new::create(&h.ctx(&[], &[]), form).await);

    assert_eq!(props.notice, Some(Notice::HaircutLimitReached));
    assert!(!props.premium);
    assert_eq!(h.log.count("POST /haircut"), 0);
}

// =============================================================================
// EDIT HAIRCUT
// =============================================================================

fn edit_form(name: &str, price: &str, active: bool) -> haircut_edit::HaircutEditForm {
    haircut_edit::HaircutEditForm {
        name: name.to_owned(),
        price: price.to_owned(),
        status: active.then(|| "on".to_owned()),
        premium: false,
    }
}

#[tokio::test]
async fn edit_loads_detail_for_path_id() {
    let h = Harness::start(Stub::default()).await;

    let props = rendered(haircut_edit::load(h.ctx(&[("id", "h1")], &[])).await);

    assert_eq!(props.haircut_id, "h1");
    assert_eq!(props.price, "45.9");
    assert!(props.active);
    assert!(!props.can_save());
    assert_eq!(h.log.count("GET /haircut/detail?haircut_id=h1"), 1);
}

#[tokio::test]
async fn edit_failure_goes_back_to_catalog() {
    let h = Harness::start(Stub { fail: true, ..Stub::default() }).await;

    assert_eq!(haircut_edit::load(h.ctx(&[("id", "h1")], &[])).await, PageOutcome::Redirect(Route::Haircuts));
}

#[tokio::test]
async fn edit_without_subscription_never_calls_update() {
    let h = Harness::start(Stub::default()).await;

    let props = rerendered(haircut_edit::update(&h.ctx(&[("id", "h1")], &[]), edit_form("Novo", "50", true)).await);

    assert_eq!(props.notice, Some(Notice::PremiumRequired));
    assert_eq!(h.log.count("PUT /haircut"), 0);
}

#[tokio::test]
async fn edit_with_blank_name_makes_no_call_even_while_api_is_down() {
    let h = Harness::start(Stub { fail: true, ..Stub::default() }).await;
    let form = haircut_edit::HaircutEditForm { premium: true, ..edit_form("", "50", true) };

    let props = rerendered(haircut_edit::update(&h.ctx(&[("id", "h1")], &[]), form).await);

    assert_eq!(props.haircut_id, "h1");
    assert_eq!(props.price, "50");
    assert!(props.can_save());
    assert_eq!(props.notice, None);
    assert!(h.log.calls().is_empty(), "{:?}", h.log.calls());
}

#[tokio::test]
async fn edit_ignores_echoed_plan_without_subscription() {
    let h = Harness::start(Stub::default()).await;
    let form = haircut_edit::HaircutEditForm { premium: true, ..edit_form("Novo", "50", true) };

    let props = rerendered(haircut_edit::update(&h.ctx(&[("id", "h1")], &[]), form).await);

    assert_eq!(props.notice, Some(Notice::PremiumRequired));
    assert!(!props.can_save());
    assert_eq!(h.log.count("PUT /haircut"), 0);
}

#[tokio::test]
async fn edit_with_subscription_updates_and_confirms() {
    let h = Harness::start(Stub { premium: true, ..Stub::default() }).await;

    let outcome = haircut_edit::update(&h.ctx(&[("id", "h1")], &[]), edit_form("Novo", "50", false)).await;

    assert_eq!(outcome.location(), Some("/haircuts/h1?notice=haircut-updated"));
    let body: Value = serde_json::from_str(&h.bodies.calls()[0]).unwrap();
    assert_eq!(body, json!({ "name": "Novo", "price": 50.0, "status": false, "haircut_id": "h1" }));
}

// =============================================================================
// PLANS
// =============================================================================

#[tokio::test]
async fn subscribe_redirects_to_hosted_checkout() {
    let h = Harness::start(Stub::default()).await;

    let outcome = plans::subscribe(&h.ctx(&[], &[]), "https://checkout.example/pay/").await;

    assert_eq!(outcome.location(), Some("https://checkout.example/pay/cs_test_1"));
}

#[tokio::test]
async fn premium_cannot_subscribe_again_and_free_has_no_portal() {
    let h = Harness::start(Stub { premium: true, ..Stub::default() }).await;
    let outcome = plans::subscribe(&h.ctx(&[], &[]), "https://checkout.example/pay/").await;
    assert_eq!(outcome.location(), Some("/planos"));
    assert_eq!(h.log.count("POST /subscribe"), 0);

    let outcome = plans::portal(&h.ctx(&[], &[])).await;
    assert_eq!(outcome.location(), Some("https://billing.example/p/1"));

    let h = Harness::start(Stub::default()).await;
    let outcome = plans::portal(&h.ctx(&[], &[])).await;
    assert_eq!(outcome.location(), Some("/planos"));
    assert_eq!(h.log.count("POST /create-portal"), 0);
}

#[tokio::test]
async fn plans_page_shows_portal_only_for_premium() {
    let h = Harness::start(Stub { premium: true, ..Stub::default() }).await;
    let html = plans::render(rendered(plans::load(h.ctx(&[], &[])).await));
    assert!(html.contains("Você já é premium"), "{html}");
    assert!(html.contains("/planos/portal"), "{html}");

    let h = Harness::start(Stub::default()).await;
    let html = plans::render(rendered(plans::load(h.ctx(&[], &[])).await));
    assert!(html.contains("Assinar Plano"), "{html}");
    assert!(!html.contains("/planos/portal"), "{html}");
}

// =============================================================================
// LOGIN
// =============================================================================

#[tokio::test]
async fn rejected_login_rerenders_with_notice_and_email() {
    let h = Harness::start(Stub::default()).await;
    let form = login::LoginForm { email: "a@a.com".to_owned(), password: "wrong".to_owned() };

    let props = rerendered(login::submit(&h.ctx(&[], &[]), form).await);

    assert_eq!(props.email, "a@a.com");
    assert_eq!(props.notice, Some(Notice::SignInFailed));
    let html = login::render(props);
    assert!(html.contains(Notice::SignInFailed.message()), "{html}");
}

#[test]
fn action_failed_sends_rejected_session_to_login() {
    let outcome: ActionOutcome<()> = ActionOutcome::failed(&ApiError::Unauthorized, &Route::Plans, Notice::PortalFailed);
    assert_eq!(outcome.location(), Some("/login"));

    let err = ApiError::Status { status: 502, message: "bad gateway".to_owned() };
    let outcome: ActionOutcome<()> = ActionOutcome::failed(&err, &Route::Plans, Notice::PortalFailed);
    assert_eq!(outcome.location(), Some("/planos?notice=portal-failed"));
}
