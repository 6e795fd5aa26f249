//! Test helpers: a stub barbershop API served by axum on an ephemeral port.

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::http::HeaderMap;

use crate::net::api::ApiClient;

/// Serve `router` on `127.0.0.1:0` and return its base URL.
pub async fn spawn_api(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub api");
    let addr = listener.local_addr().expect("stub api addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("stub api failed");
    });
    format!("http://{addr}")
}

/// Api client pointed at a stub base URL.
pub fn api_client(base_url: &str) -> ApiClient {
    ApiClient::new(reqwest::Client::new(), base_url)
}

/// Records each request the stub API receives as `"METHOD /path"`.
#[derive(Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<String>>>,
}

impl CallLog {
    pub fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| c.as_str() == call).count()
    }
}

/// Read the bearer token a stub handler received, if any.
pub fn bearer_of(headers: &HeaderMap) -> Option<String> {
    headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_owned)
}
