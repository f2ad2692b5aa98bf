//! Request construction, authentication and dispatch for [`SearchClient`].
//!
//! # Invariants
//! - Every request carries `output_mode=json`; a caller-supplied value is dropped
//! - `POST` parameters go in a form-encoded body, all other methods use the query string
//! - `Content-Type: application/x-www-form-urlencoded` is always set
//! - [`SearchClient::execute`] is the only path to the network and always authenticates

use std::borrow::Cow;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, Request, Response, Url};
use tokio::time::Instant;
use tracing::debug;

use crate::cancellation::CancellationToken;
use crate::client::SearchClient;
use crate::endpoints;
use crate::error::{ClientError, Result};
use crate::metrics::ErrorCategory;

/// Content type sent on every request.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

const OUTPUT_MODE: (&str, &str) = ("output_mode", "json");

impl SearchClient {
    /// Build (but do not send) a request against `base_url + path_suffix`.
    ///
    /// A missing leading `/` on `path_suffix` is added.
    pub fn build_request(
        &self,
        method: Method,
        path_suffix: &str,
        params: &[(&str, &str)],
    ) -> Result<Request> {
        let raw = format!("{}{}", self.base_url, normalize_suffix(path_suffix));
        let mut url =
            Url::parse(&raw).map_err(|e| ClientError::InvalidUrl(format!("{}: {}", raw, e)))?;

        let encoded = encode_params(params);
        let in_body = method == Method::POST;

        if !in_body {
            let query = match url.query() {
                Some(existing) if !existing.is_empty() => format!("{}&{}", existing, encoded),
                _ => encoded.clone(),
            };
            url.set_query(Some(&query));
        }

        let mut builder = self
            .http
            .request(method, url)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE);
        if in_body {
            builder = builder.body(encoded);
        }

        builder.build().map_err(|source| ClientError::Transport {
            context: format!("building request for {}", raw),
            source,
        })
    }

    /// Add `Authorization: Basic <token>` to `request`.
    pub fn authenticate(&self, request: &mut Request) -> Result<()> {
        self.auth.apply(request)
    }

    /// Authenticate `request` and dispatch it through the HTTP executor.
    ///
    /// The call is raced against `ctx`; if it fires first the in-flight
    /// request is dropped and [`ClientError::Cancelled`] is returned. Any
    /// HTTP status is returned as `Ok`; callers decide which are acceptable.
    pub async fn execute(&self, ctx: &CancellationToken, mut request: Request) -> Result<Response> {
        self.authenticate(&mut request)?;

        let method = request.method().as_str().to_string();
        let path = request.url().path().to_string();
        let label = endpoints::metrics_label(&path);
        let context = format!("{} {}", method, path);

        debug!(%method, %path, "Sending Splunk API request");
        if let Some(metrics) = &self.metrics {
            metrics.record_request(&label, &method);
        }

        let start = Instant::now();
        let in_flight = self.http.execute(request);
        let result = ctx
            .run(context.clone(), async {
                in_flight.await.map_err(|source| ClientError::Transport {
                    context: context.clone(),
                    source,
                })
            })
            .await;

        if let Some(metrics) = &self.metrics {
            match &result {
                Ok(response) => {
                    let status = response.status().as_u16();
                    metrics.record_request_duration(&label, &method, start.elapsed(), Some(status));
                    if status >= 400 {
                        metrics.record_error(&label, &method, ErrorCategory::from_status(status));
                    }
                }
                Err(e) => {
                    metrics.record_request_duration(&label, &method, start.elapsed(), None);
                    metrics.record_client_error(&label, &method, e);
                }
            }
        }

        if let Ok(response) = &result {
            debug!(%method, %path, status = response.status().as_u16(), "Splunk API response");
        }

        result
    }

    /// Build, authenticate and dispatch a request in one step.
    pub async fn send(
        &self,
        ctx: &CancellationToken,
        method: Method,
        path_suffix: &str,
        params: &[(&str, &str)],
    ) -> Result<Response> {
        let request = self.build_request(method, path_suffix, params)?;
        self.execute(ctx, request).await
    }
}

fn normalize_suffix(suffix: &str) -> Cow<'_, str> {
    if suffix.is_empty() || suffix.starts_with('/') {
        Cow::Borrowed(suffix)
    } else {
        Cow::Owned(format!("/{}", suffix))
    }
}

/// Form-urlencode `output_mode=json` followed by the caller's parameters.
pub(crate) fn encode_params(params: &[(&str, &str)]) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    serializer.append_pair(OUTPUT_MODE.0, OUTPUT_MODE.1);
    for (key, value) in params {
        if *key == OUTPUT_MODE.0 {
            continue;
        }
        serializer.append_pair(key, value);
    }
    serializer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use reqwest::header::AUTHORIZATION;

    fn client() -> SearchClient {
        SearchClient::unverified("http://localhost:8089")
    }

    fn query_pairs(request: &Request) -> Vec<(String, String)> {
        request
            .url()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    fn body_pairs(request: &Request) -> Vec<(String, String)> {
        let bytes = request
            .body()
            .and_then(|b| b.as_bytes())
            .unwrap_or_default();
        url::form_urlencoded::parse(bytes)
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn test_normalize_suffix() {
        assert_eq!(normalize_suffix("services/x"), "/services/x");
        assert_eq!(normalize_suffix("/services/x"), "/services/x");
        assert_eq!(normalize_suffix(""), "");
    }

    #[test]
    fn test_get_puts_params_in_query() {
        let request = client()
            .build_request(Method::GET, "services/search/jobs", &[("count", "10")])
            .unwrap();

        assert_eq!(request.url().path(), "/services/search/jobs");
        let pairs = query_pairs(&request);
        assert!(pairs.contains(&("output_mode".to_string(), "json".to_string())));
        assert!(pairs.contains(&("count".to_string(), "10".to_string())));
        assert!(request.body().is_none());
    }

    #[test]
    fn test_delete_has_only_output_mode() {
        let request = client()
            .build_request(Method::DELETE, "/services/search/jobs/job_id_1", &[])
            .unwrap();
        assert_eq!(
            request.url().as_str(),
            "http://localhost:8089/services/search/jobs/job_id_1?output_mode=json"
        );
    }

    #[test]
    fn test_post_puts_params_in_body() {
        let request = client()
            .build_request(
                Method::POST,
                "/services/search/jobs",
                &[("search", "search index=main | head 5")],
            )
            .unwrap();

        assert!(request.url().query().is_none());
        let pairs = body_pairs(&request);
        assert_eq!(pairs[0], ("output_mode".to_string(), "json".to_string()));
        assert!(pairs.contains(&(
            "search".to_string(),
            "search index=main | head 5".to_string()
        )));
    }

    #[test]
    fn test_content_type_always_form() {
        for method in [Method::GET, Method::POST, Method::DELETE] {
            let request = client().build_request(method, "/x", &[]).unwrap();
            assert_eq!(request.headers()[CONTENT_TYPE], FORM_CONTENT_TYPE);
        }
    }

    #[test]
    fn test_caller_output_mode_is_overridden() {
        let request = client()
            .build_request(Method::GET, "/x", &[("output_mode", "xml")])
            .unwrap();
        let modes: Vec<_> = query_pairs(&request)
            .into_iter()
            .filter(|(k, _)| k == "output_mode")
            .collect();
        assert_eq!(modes, vec![("output_mode".to_string(), "json".to_string())]);
    }

    #[test]
    fn test_existing_query_preserved() {
        let request = client()
            .build_request(Method::GET, "/x?f=a", &[("count", "1")])
            .unwrap();
        let pairs = query_pairs(&request);
        assert_eq!(pairs[0], ("f".to_string(), "a".to_string()));
        assert!(pairs.contains(&("output_mode".to_string(), "json".to_string())));
    }

    #[test]
    fn test_build_request_is_unauthenticated_until_authenticate() {
        let client = client();
        let mut request = client.build_request(Method::GET, "/x", &[]).unwrap();
        assert!(request.headers().get(AUTHORIZATION).is_none());

        client.authenticate(&mut request).unwrap();
        assert_eq!(
            request.headers()[AUTHORIZATION],
            "Basic YWRtaW46Y2hhbmdlbWU="
        );
    }

    #[test]
    fn test_encode_params_escapes_values() {
        let encoded = encode_params(&[("search", "a=b&c d")]);
        assert_eq!(encoded, "output_mode=json&search=a%3Db%26c+d");
    }

    proptest! {
        #[test]
        fn prop_output_mode_always_present(
            suffix in "[a-z/]{0,20}",
            params in proptest::collection::vec(("[a-z_]{1,8}", "[ -~]{0,16}"), 0..5),
            post in any::<bool>(),
        ) {
            let borrowed: Vec<(&str, &str)> =
                params.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
            let method = if post { Method::POST } else { Method::GET };
            let request = client().build_request(method, &suffix, &borrowed).unwrap();

            let (carrier, other) = if post {
                (body_pairs(&request), query_pairs(&request))
            } else {
                (query_pairs(&request), body_pairs(&request))
            };

            prop_assert!(carrier.contains(&("output_mode".to_string(), "json".to_string())));
            prop_assert!(other.is_empty());
            for (k, v) in &params {
                if k != "output_mode" {
                    prop_assert!(carrier.contains(&(k.clone(), v.clone())));
                }
            }
        }
    }
}
