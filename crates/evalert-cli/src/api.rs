//! Client for the alert ingest API.
//!
//! Every request carries the tenant header and a `ZenApiKey` authorization
//! built from `base64(user:key)`. A status of 300 or above is a failure; there
//! is no retry.

use anyhow::{bail, Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use std::env;
use std::time::Duration;
use tracing::{debug, info};

/// Sent as `X-TenantID`; header names are case-insensitive on the wire.
pub const TENANT_HEADER: &str = "x-tenantid";
pub const DEFAULT_ALERTS_PATH: &str = "/irdatalayer.aiops.io/active/v1/alerts";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub user: String,
    pub key: String,
    pub tenant_id: String,
    /// Skips TLS certificate verification. Off unless explicitly requested.
    pub accept_invalid_certs: bool,
}

impl ApiConfig {
    pub fn from_env(accept_invalid_certs: bool) -> Result<Self> {
        Ok(Self {
            base_url: env::var("EVALERT_API_URL").context("EVALERT_API_URL env var is required")?,
            user: env::var("EVALERT_API_USER").context("EVALERT_API_USER env var is required")?,
            key: env::var("EVALERT_API_KEY").context("EVALERT_API_KEY env var is required")?,
            tenant_id: env::var("EVALERT_TENANT_ID")
                .context("EVALERT_TENANT_ID env var is required")?,
            accept_invalid_certs,
        })
    }
}

pub fn zen_token(user: &str, key: &str) -> String {
    STANDARD.encode(format!("{user}:{key}"))
}

#[derive(Debug)]
pub struct IngestApi {
    base_url: String,
    headers: HeaderMap,
    client: Client,
}

impl IngestApi {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            HeaderName::from_static(TENANT_HEADER),
            HeaderValue::from_str(&config.tenant_id).context("Invalid tenant id")?,
        );
        let mut auth = HeaderValue::from_str(&format!(
            "ZenApiKey {}",
            zen_token(&config.user, &config.key)
        ))
        .context("Invalid API credentials")?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let client = Client::builder()
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            headers,
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Sends one request and returns the response body. Only POST, GET and
    /// PATCH are supported.
    pub fn call(&self, method: Method, path: &str, body: Option<Vec<u8>>) -> Result<String> {
        if method != Method::POST && method != Method::GET && method != Method::PATCH {
            bail!("Unsupported method: {method}");
        }
        let url = self.url(path);
        debug!(%method, %url, "calling ingest API");

        let mut req = self
            .client
            .request(method.clone(), &url)
            .headers(self.headers.clone());
        if method != Method::GET {
            req = req.body(body.unwrap_or_default());
        }

        let resp = req
            .send()
            .with_context(|| format!("Failed to call {url}"))?;
        let status = resp.status();
        if status.as_u16() >= 300 {
            let text = resp.text().unwrap_or_default();
            bail!("Ingest API returned non-success status {status}: {text}");
        }
        let text = resp.text().context("Failed to read response body")?;

        info!(%method, %url, status = status.as_u16(), "ingest API call succeeded");
        Ok(text)
    }

    pub fn submit(&self, path: &str, payload: Vec<u8>) -> Result<String> {
        self.call(Method::POST, path, Some(payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    fn config(base_url: String) -> ApiConfig {
        ApiConfig {
            base_url,
            user: "admin".into(),
            key: "secret".into(),
            tenant_id: "tenant-42".into(),
            accept_invalid_certs: false,
        }
    }

    #[test]
    fn token_is_base64_of_user_and_key() {
        assert_eq!(zen_token("admin", "secret"), "YWRtaW46c2VjcmV0");
    }

    #[test]
    fn submit_sends_auth_and_tenant_headers() {
        let mut server = Server::new();
        let mock = server
            .mock("POST", DEFAULT_ALERTS_PATH)
            .match_header("authorization", "ZenApiKey YWRtaW46c2VjcmV0")
            .match_header("x-tenantid", "tenant-42")
            .match_header("content-type", "application/json")
            .match_header("accept", "application/json")
            .match_body(Matcher::JsonString(r#"{"id":"a-1"}"#.to_string()))
            .with_status(202)
            .with_body("ok")
            .create();

        let api = IngestApi::new(&config(format!("{}/", server.url()))).unwrap();
        let body = api
            .submit(DEFAULT_ALERTS_PATH, br#"{"id":"a-1"}"#.to_vec())
            .unwrap();

        assert_eq!(body, "ok");
        mock.assert();
    }

    #[test]
    fn relative_path_is_joined_with_a_slash() {
        let mut server = Server::new();
        let mock = server
            .mock("PATCH", "/v1/alerts/a-1")
            .with_status(204)
            .create();

        let api = IngestApi::new(&config(server.url())).unwrap();
        let body = api
            .call(Method::PATCH, "v1/alerts/a-1", Some(b"{}".to_vec()))
            .unwrap();

        assert!(body.is_empty());
        mock.assert();
    }

    #[test]
    fn non_success_status_is_an_error() {
        let mut server = Server::new();
        let mock = server
            .mock("POST", "/v1/alerts")
            .with_status(500)
            .with_body("boom")
            .create();

        let api = IngestApi::new(&config(server.url())).unwrap();
        let err = api.submit("v1/alerts", b"{}".to_vec()).unwrap_err();

        assert!(err.to_string().contains("500"));
        assert!(err.to_string().contains("boom"));
        mock.assert();
    }

    #[test]
    fn redirect_status_is_an_error() {
        let mut server = Server::new();
        let mock = server
            .mock("GET", "/v1/alerts")
            .with_status(304)
            .create();

        let api = IngestApi::new(&config(server.url())).unwrap();
        assert!(api.call(Method::GET, "/v1/alerts", None).is_err());
        mock.assert();
    }

    #[test]
    fn unsupported_method_is_rejected_without_sending() {
        let mut server = Server::new();
        let mock = server.mock("DELETE", Matcher::Any).expect(0).create();

        let api = IngestApi::new(&config(server.url())).unwrap();
        let err = api.call(Method::DELETE, "/x", None).unwrap_err();

        assert!(err.to_string().contains("Unsupported method"));
        mock.assert();
    }
}
