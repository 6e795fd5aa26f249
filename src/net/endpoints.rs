//! Typed calls for each API endpoint the client consumes.
//!
//! These are plain request/response pairs; callers decide what a failure
//! means for their page.

use serde::de::IgnoredAny;

use super::api::{ApiClient, ApiError};
use super::types::{
    Haircut, HaircutUpdate, NewHaircut, NewSchedule, ProviderSession, ScheduleItem, SignInRequest,
    SignInResponse, SignUpRequest, SubscriptionCheck, User,
};

const NO_QUERY: &[(&str, &str)] = &[];

/// `POST /session`.
pub async fn create_session(api: &ApiClient, email: &str, password: &str) -> Result<SignInResponse, ApiError> {
    api.post("/session", &SignInRequest { email, password }).await
}

/// `POST /users`.
pub async fn register_user(api: &ApiClient, name: &str, email: &str, password: &str) -> Result<(), ApiError> {
    let _: IgnoredAny = api.post("/users", &SignUpRequest { name, email, password }).await?;
    Ok(())
}

/// `GET /me`.
pub async fn fetch_me(api: &ApiClient) -> Result<User, ApiError> {
    api.get("/me", NO_QUERY).await
}

/// `GET /schedule`.
pub async fn fetch_schedule(api: &ApiClient) -> Result<Vec<ScheduleItem>, ApiError> {
    let items: Option<Vec<ScheduleItem>> = api.get("/schedule", NO_QUERY).await?;
    Ok(items.unwrap_or_default())
}

/// `DELETE /schedule?schedule_id=`: marks the service as finished.
pub async fn finish_schedule(api: &ApiClient, schedule_id: &str) -> Result<(), ApiError> {
    let _: IgnoredAny = api.delete("/schedule", &[("schedule_id", schedule_id)]).await?;
    Ok(())
}

/// `POST /schedule`.
pub async fn create_schedule(api: &ApiClient, customer: &str, haircut_id: &str) -> Result<(), ApiError> {
    let _: IgnoredAny = api.post("/schedule", &NewSchedule { customer, haircut_id }).await?;
    Ok(())
}

/// `GET /haircuts?status=`. `None` means the API answered `null`.
pub async fn fetch_haircuts(api: &ApiClient, active: bool) -> Result<Option<Vec<Haircut>>, ApiError> {
    let status = if active { "true" } else { "false" };
    api.get("/haircuts", &[("status", status)]).await
}

/// `GET /haircut/detail?haircut_id=`.
pub async fn fetch_haircut(api: &ApiClient, haircut_id: &str) -> Result<Haircut, ApiError> {
    api.get("/haircut/detail", &[("haircut_id", haircut_id)]).await
}

/// `POST /haircut`.
pub async fn create_haircut(api: &ApiClient, name: &str, price: f64) -> Result<(), ApiError> {
    let _: IgnoredAny = api.post("/haircut", &NewHaircut { name, price }).await?;
    Ok(())
}

/// `PUT /haircut`.
pub async fn update_haircut(api: &ApiClient, update: &HaircutUpdate<'_>) -> Result<(), ApiError> {
    let _: IgnoredAny = api.put("/haircut", update).await?;
    Ok(())
}

/// `GET /haircut/check`.
pub async fn check_subscription(api: &ApiClient) -> Result<SubscriptionCheck, ApiError> {
    let check: Option<SubscriptionCheck> = api.get("/haircut/check", NO_QUERY).await?;
    Ok(check.unwrap_or_default())
}

/// `GET /haircut/count`.
pub async fn count_haircuts(api: &ApiClient) -> Result<u64, ApiError> {
    let count: Option<u64> = api.get("/haircut/count", NO_QUERY).await?;
    Ok(count.unwrap_or(0))
}

/// `POST /subscribe`: starts a hosted checkout.
pub async fn create_checkout(api: &ApiClient) -> Result<ProviderSession, ApiError> {
    api.post("/subscribe", &serde_json::json!({})).await
}

/// `POST /create-portal`: returns the billing portal URL.
pub async fn create_portal(api: &ApiClient) -> Result<ProviderSession, ApiError> {
    api.post("/create-portal", &serde_json::json!({})).await
}
