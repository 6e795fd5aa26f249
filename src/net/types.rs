//! Wire DTOs for the barbershop API.
//!
//! DESIGN
//! ======
//! Field names follow the API's JSON, which mixes Portuguese and plural keys
//! (`endereco`, `subscriptions`). Rust names are English; serde renames bridge
//! the two. Prices come back as numbers or numeric strings depending on the
//! endpoint, so they decode through [`Price`].

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Subscription status value that unlocks premium features.
pub const ACTIVE_STATUS: &str = "active";

/// Number of haircut models a free account may create.
pub const FREE_HAIRCUT_LIMIT: u64 = 3;

/// Billing state sourced from the payment provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: String,
    pub status: String,
}

impl Subscription {
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == ACTIVE_STATUS
    }
}

/// `true` when an optional subscription is present and active.
#[must_use]
pub fn is_premium(subscription: Option<&Subscription>) -> bool {
    subscription.is_some_and(Subscription::is_active)
}

/// Authenticated shop owner, as returned by `GET /me`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "endereco", default)]
    pub address: Option<String>,
    #[serde(rename = "subscriptions", default)]
    pub subscription: Option<Subscription>,
}

impl User {
    #[must_use]
    pub fn is_premium(&self) -> bool {
        is_premium(self.subscription.as_ref())
    }
}

/// Credentials posted to `POST /session`.
#[derive(Clone, Debug, Serialize)]
pub struct SignInRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Response of `POST /session`. Carries the token but not the email.
#[derive(Clone, Debug, Deserialize)]
pub struct SignInResponse {
    pub id: String,
    pub name: String,
    pub token: String,
    #[serde(rename = "endereco", default)]
    pub address: Option<String>,
    #[serde(rename = "subscriptions", default)]
    pub subscription: Option<Subscription>,
}

impl SignInResponse {
    /// Split into the opaque token and the user profile.
    #[must_use]
    pub fn into_parts(self, email: &str) -> (String, User) {
        let user = User {
            id: self.id,
            name: self.name,
            email: email.to_owned(),
            address: self.address,
            subscription: self.subscription,
        };
        (self.token, user)
    }
}

/// Registration payload for `POST /users`.
#[derive(Clone, Debug, Serialize)]
pub struct SignUpRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

/// A monetary amount in reais.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Price(pub f64);

impl Price {
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(value) => Ok(Self(value)),
            Raw::Text(text) => text
                .trim()
                .parse::<f64>()
                .map(Self)
                .map_err(|_| D::Error::custom(format!("invalid price '{text}'"))),
        }
    }
}

/// Catalog entry: a named, priced service type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Haircut {
    pub id: String,
    pub name: String,
    pub price: Price,
    #[serde(default = "default_true")]
    pub status: bool,
    #[serde(default)]
    pub user_id: Option<String>,
}

fn default_true() -> bool {
    true
}

/// Haircut as embedded in a schedule item.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HaircutSummary {
    pub id: String,
    pub name: String,
    pub price: Price,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// A booked appointment on the agenda.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScheduleItem {
    pub id: String,
    pub customer: String,
    pub haircut: HaircutSummary,
}

/// Body of `POST /schedule`.
#[derive(Clone, Debug, Serialize)]
pub struct NewSchedule<'a> {
    pub customer: &'a str,
    pub haircut_id: &'a str,
}

/// Body of `POST /haircut`.
#[derive(Clone, Debug, Serialize)]
pub struct NewHaircut<'a> {
    pub name: &'a str,
    pub price: f64,
}

/// Body of `PUT /haircut`.
#[derive(Clone, Debug, Serialize)]
pub struct HaircutUpdate<'a> {
    pub name: &'a str,
    pub price: f64,
    pub status: bool,
    pub haircut_id: &'a str,
}

/// Response of `GET /haircut/check`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SubscriptionCheck {
    #[serde(rename = "subscriptions", default)]
    pub subscription: Option<Subscription>,
}

/// Response of `POST /subscribe` and `POST /create-portal`.
///
/// For checkout this is a provider session id; for the portal it is the
/// portal URL itself.
#[derive(Clone, Debug, Deserialize)]
pub struct ProviderSession {
    #[serde(rename = "sessionId")]
    pub session_id: String,
}
