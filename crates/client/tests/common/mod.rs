//! Common test utilities for integration tests.
//!
//! Shared helpers and re-exports for testing the search client against a
//! wiremock server.
//!
//! # Invariants
//! - Every connected client authenticates as `admin` / `changeme`
//! - The credential probe mock must be mounted before connecting
//!
//! # What this does NOT handle
//! - Per-endpoint mocks (tests mount those themselves)

use std::sync::Arc;

use secrecy::SecretString;
use wiremock::matchers::{header, method, path};
use wiremock::{Match, Request};

#[allow(unused_imports)]
pub use splunk_search_client::testing::load_fixture;

#[allow(unused_imports)]
pub use splunk_search_client::{
    CancellationToken, ClientConfig, ClientError, CreateJobOptions, JobState, SearchClient,
    SearchJob, endpoints,
};
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

/// `Authorization` header value for `admin` / `changeme`.
#[allow(dead_code)]
pub const ADMIN_BASIC_AUTH: &str = "Basic YWRtaW46Y2hhbmdlbWU=";

/// Build a secret from a literal.
#[allow(dead_code)]
pub fn secret(s: &str) -> SecretString {
    SecretString::new(s.to_string().into())
}

/// Mount a successful credential probe that requires the admin basic auth header.
#[allow(dead_code)]
pub async fn mount_auth_probe(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(endpoints::AUTH_CONTEXT_PATH))
        .and(header("authorization", ADMIN_BASIC_AUTH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(load_fixture("auth/current_context.json")),
        )
        .mount(server)
        .await;
}

/// Mount the credential probe and connect a shared client to `server`.
#[allow(dead_code)]
pub async fn connect(server: &MockServer) -> Arc<SearchClient> {
    mount_auth_probe(server).await;
    let config = ClientConfig::new(server.uri());
    let client = SearchClient::connect(
        &CancellationToken::new(),
        "admin",
        &secret("changeme"),
        &config,
    )
    .await
    .expect("connect against mock server");
    Arc::new(client)
}

/// Matches when the raw query string equals the given value exactly.
#[allow(dead_code)]
pub struct RawQuery(pub &'static str);

impl Match for RawQuery {
    fn matches(&self, request: &Request) -> bool {
        request.url.query() == Some(self.0)
    }
}

/// Matches when the form-encoded body contains every given pair.
#[allow(dead_code)]
pub struct FormBody(pub Vec<(&'static str, &'static str)>);

impl Match for FormBody {
    fn matches(&self, request: &Request) -> bool {
        let pairs: Vec<(String, String)> = url::form_urlencoded::parse(&request.body)
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        self.0
            .iter()
            .all(|(k, v)| pairs.iter().any(|(pk, pv)| pk == k && pv == v))
    }
}

/// Matches requests that carry no query string.
#[allow(dead_code)]
pub struct NoQuery;

impl Match for NoQuery {
    fn matches(&self, request: &Request) -> bool {
        request.url.query().is_none()
    }
}
