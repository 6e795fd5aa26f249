//! Application configuration parsed from environment variables.

use std::path::PathBuf;

pub const DEFAULT_API_URL: &str = "http://localhost:3333";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_CHECKOUT_URL: &str = "https://checkout.stripe.com/pay/";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid BARBER_API_URL '{0}'")]
    InvalidApiUrl(String),
    #[error("invalid PORT '{0}'")]
    InvalidPort(String),
    #[error("invalid number for {var}: '{value}'")]
    InvalidNumber { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URL of the barbershop API, without trailing slash.
    pub api_url: String,
    pub port: u16,
    /// Mark the session cookie `Secure`.
    pub cookie_secure: bool,
    /// Whole-request timeout for API calls. `None` keeps the transport default.
    pub api_timeout_secs: Option<u64>,
    /// Hosted checkout prefix; the provider session id is appended.
    pub checkout_url: String,
    pub static_dir: PathBuf,
}

impl AppConfig {
    /// Build typed config from environment variables.
    ///
    /// All optional:
    /// - `BARBER_API_URL`: default `http://localhost:3333`
    /// - `PORT`: default 3000
    /// - `COOKIE_SECURE`: `1|true|yes|on` / `0|false|no|off`, default false
    /// - `BARBER_API_TIMEOUT_SECS`: unset means no timeout
    /// - `BARBER_CHECKOUT_URL`: default Stripe hosted checkout prefix
    /// - `BARBER_STATIC_DIR`: default `<manifest>/public`
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_url = parse_api_url(std::env::var("BARBER_API_URL").ok().as_deref())?;
        let port = parse_port(std::env::var("PORT").ok().as_deref())?;
        let cookie_secure = env_bool("COOKIE_SECURE").unwrap_or(false);
        let api_timeout_secs = match std::env::var("BARBER_API_TIMEOUT_SECS") {
            Ok(raw) => Some(
                raw.trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidNumber { var: "BARBER_API_TIMEOUT_SECS", value: raw })?,
            ),
            Err(_) => None,
        };
        let checkout_url = std::env::var("BARBER_CHECKOUT_URL").unwrap_or_else(|_| DEFAULT_CHECKOUT_URL.to_owned());
        let static_dir = std::env::var("BARBER_STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("public"));

        Ok(Self { api_url, port, cookie_secure, api_timeout_secs, checkout_url, static_dir })
    }

    /// Config pointing at `api_url` with every other field at its default.
    #[must_use]
    pub fn for_api(api_url: &str) -> Self {
        Self {
            api_url: api_url.trim_end_matches('/').to_owned(),
            port: DEFAULT_PORT,
            cookie_secure: false,
            api_timeout_secs: None,
            checkout_url: DEFAULT_CHECKOUT_URL.to_owned(),
            static_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("public"),
        }
    }
}

pub(crate) fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key).ok().and_then(|raw| parse_bool(&raw))
}

pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

pub fn parse_api_url(raw: Option<&str>) -> Result<String, ConfigError> {
    let raw = raw.unwrap_or(DEFAULT_API_URL).trim();
    match reqwest::Url::parse(raw) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(raw.trim_end_matches('/').to_owned()),
        _ => Err(ConfigError::InvalidApiUrl(raw.to_owned())),
    }
}

fn parse_port(raw: Option<&str>) -> Result<u16, ConfigError> {
    match raw {
        None => Ok(DEFAULT_PORT),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidPort(value.to_owned())),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
