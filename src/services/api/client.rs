//! Authenticated HTTP client for the Sky366Trade backend
//!
//! Every backend call in the application goes through this one wrapper so
//! that bearer-token injection, retry policy, and error mapping exist in a
//! single place. A 401 or 403 from any endpoint evicts the stored session;
//! transient transport failures and 5xx responses are retried with
//! exponential backoff up to the configured budget.

use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, instrument, warn};
use url::Url;

use super::types::ErrorBody;
use crate::config::models::ApiConfig;
use crate::core::error::AppError;
use crate::core::result::AppResult;
use crate::infrastructure::monitoring::metrics;
use crate::infrastructure::storage::SessionContext;

/// Backend API client
#[derive(Debug, Clone)]
pub struct ApiClient {
    /// HTTP client
    http: Client,
    /// Backend base URL, always with a trailing slash
    base_url: Url,
    /// API configuration
    config: ApiConfig,
    /// Shared session context
    session: Arc<SessionContext>,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(config: &ApiConfig, session: Arc<SessionContext>) -> AppResult<Self> {
        let mut base_url = Url::parse(&config.base_url)
            .map_err(|e| AppError::config(format!("Invalid backend base URL: {e}")))?;

        // Url::join replaces the last path segment unless the base ends
        // with a slash.
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }

        let http = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .connect_timeout(Duration::from_millis(config.connection_timeout_ms))
            .build()
            .map_err(|e| AppError::network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url,
            config: config.clone(),
            session,
        })
    }

    /// Backend base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Issue an unauthenticated GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        self.execute(Method::GET, path, None, false).await
    }

    /// Issue an authenticated GET request
    pub async fn get_authorized<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        self.execute(Method::GET, path, None, true).await
    }

    /// Issue an unauthenticated POST request with a JSON body
    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> AppResult<T> {
        self.execute(Method::POST, path, Some(serde_json::to_value(body)?), false)
            .await
    }

    /// Issue an authenticated POST request with a JSON body
    pub async fn post_authorized<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> AppResult<T> {
        self.execute(Method::POST, path, Some(serde_json::to_value(body)?), true)
            .await
    }

    /// Probe backend reachability
    ///
    /// Any HTTP response counts as reachable; only transport failures are
    /// reported as errors. Returns the observed round-trip latency.
    pub async fn probe(&self, timeout: Duration) -> AppResult<Duration> {
        let started = Instant::now();
        self.http
            .get(self.base_url.clone())
            .timeout(timeout)
            .send()
            .await
            .map_err(AppError::from)?;
        Ok(started.elapsed())
    }

    /// Execute one logical request with retry and error mapping
    #[instrument(skip(self, body), fields(method = %method, path = path))]
    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
        authorized: bool,
    ) -> AppResult<T> {
        let url = self
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| AppError::config(format!("Invalid endpoint path '{path}': {e}")))?;

        let mut attempt: u32 = 0;
        loop {
            let started = Instant::now();

            let mut request = self.http.request(method.clone(), url.clone());
            if authorized {
                let token = self.session.token().await?;
                request = request.bearer_auth(token.as_str());
            }
            if let Some(ref json) = body {
                request = request.json(json);
            }

            let outcome = match request.send().await {
                Ok(response) => self.handle_response(path, response).await,
                Err(e) => Err(AppError::from(e)),
            };

            match outcome {
                Ok(value) => {
                    metrics::record_request(path, "ok", started.elapsed());
                    debug!("✅ {} {} completed in {:?}", method, path, started.elapsed());
                    return Ok(value);
                }
                Err(error) => {
                    metrics::record_request(path, "error", started.elapsed());

                    if error.evicts_session() {
                        self.session.evict().await?;
                        metrics::record_session_eviction();
                        return Err(error);
                    }

                    if error.is_retryable() && attempt < self.config.max_retries {
                        attempt += 1;
                        metrics::record_retry(path);
                        let delay = Duration::from_millis(self.config.retry_backoff_ms)
                            * 2_u32.pow(attempt - 1);
                        warn!(
                            "🔁 {} {} failed (attempt {}/{}), retrying in {:?}: {}",
                            method,
                            path,
                            attempt,
                            self.config.max_retries,
                            delay,
                            error
                        );
                        tokio::time::sleep(delay).await;
                        continue;
                    }

                    return Err(error);
                }
            }
        }
    }

    /// Map a completed HTTP response into a typed result
    async fn handle_response<T: DeserializeOwned>(
        &self,
        path: &str,
        response: reqwest::Response,
    ) -> AppResult<T> {
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(AppError::auth(format!(
                "Backend rejected the session token ({status})"
            )));
        }

        if status.is_success() {
            return response.json::<T>().await.map_err(|e| {
                AppError::api(
                    format!("Malformed response body: {e}"),
                    path.to_string(),
                )
            });
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|b| b.message)
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            });

        Err(AppError::api_status(
            message,
            path.to_string(),
            status.as_u16(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{AuthToken, Username};
    use crate::infrastructure::storage::TokenStore;
    use serde::Deserialize;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Debug, Deserialize)]
    struct Pong {
        ok: bool,
    }

    async fn authed_client(server: &MockServer, dir: &tempfile::TempDir) -> ApiClient {
        let session = SessionContext::open(TokenStore::new(dir.path().join("session.json")))
            .await
            .unwrap();
        session
            .establish(
                AuthToken::new("test-token".to_string()),
                Username::new_unchecked("alice".to_string()),
            )
            .await
            .unwrap();

        let config = ApiConfig {
            base_url: server.uri(),
            request_timeout_ms: 5000,
            connection_timeout_ms: 5000,
            max_retries: 2,
            retry_backoff_ms: 1,
        };
        ApiClient::new(&config, session).unwrap()
    }

    #[tokio::test]
    async fn test_bearer_token_is_attached() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let client = authed_client(&server, &dir).await;

        Mock::given(method("GET"))
            .and(path("/profile"))
            .and(header("authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;

        let pong: Pong = client.get_authorized("/profile").await.unwrap();
        assert!(pong.ok);
    }

    #[tokio::test]
    async fn test_transient_server_error_is_retried() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let client = authed_client(&server, &dir).await;

        Mock::given(method("GET"))
            .and(path("/profile"))
            .respond_with(ResponseTemplate::new(500))
            .up_to_n_times(1)
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/profile"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;

        let pong: Pong = client.get_authorized("/profile").await.unwrap();
        assert!(pong.ok);
    }

    #[tokio::test]
    async fn test_unauthorized_evicts_session() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let client = authed_client(&server, &dir).await;

        Mock::given(method("GET"))
            .and(path("/profile"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;

        let err = client.get_authorized::<Pong>("/profile").await.unwrap_err();
        assert!(matches!(err, AppError::Auth { .. }));

        // Follow-up authorized calls fail locally without a token.
        let err = client.get_authorized::<Pong>("/profile").await.unwrap_err();
        assert!(matches!(err, AppError::Auth { .. }));
    }

    #[tokio::test]
    async fn test_client_error_is_not_retried() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let client = authed_client(&server, &dir).await;

        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(serde_json::json!({"message": "no such thing"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let err = client.get_authorized::<Pong>("/missing").await.unwrap_err();
        match err {
            AppError::Api {
                status_code,
                message,
                ..
            } => {
                assert_eq!(status_code, Some(404));
                assert_eq!(message, "no such thing");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_an_api_error() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let client = authed_client(&server, &dir).await;

        Mock::given(method("GET"))
            .and(path("/profile"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client.get_authorized::<Pong>("/profile").await.unwrap_err();
        assert!(matches!(err, AppError::Api { .. }));
    }

    #[tokio::test]
    async fn test_post_sends_json_body() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let client = authed_client(&server, &dir).await;

        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let body = serde_json::json!({"username": "alice", "password": "pw"});
        let pong: Pong = client.post("/login", &body).await.unwrap();
        assert!(pong.ok);
    }
}
