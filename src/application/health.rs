//! Health monitoring
//!
//! The client has one external dependency worth probing: the backend. A
//! probe counts any HTTP response as reachable; only transport failures
//! mark the backend unhealthy.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tracing::{instrument, warn};

use crate::config::models::MonitoringConfig;
use crate::core::result::AppResult;
use crate::services::api::ApiClient;

/// Overall system health status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    /// All components are healthy
    Healthy,
    /// Critical components are unhealthy
    Unhealthy,
    /// No check has run yet
    Unknown,
}

/// Health status of an individual component
#[derive(Debug, Clone)]
pub struct ComponentHealth {
    /// Component name
    pub name: String,

    /// Current health status
    pub status: HealthStatus,

    /// Health check message
    pub message: Option<String>,

    /// When the check ran
    pub checked_at: DateTime<Utc>,

    /// Response time for the check, when it completed
    pub response_time: Option<Duration>,
}

/// Health check service
#[derive(Debug, Clone)]
pub struct HealthService {
    api: Arc<ApiClient>,
    probe_timeout: Duration,
}

impl HealthService {
    /// Create the service
    pub fn new(api: Arc<ApiClient>, config: &MonitoringConfig) -> Self {
        Self {
            api,
            probe_timeout: Duration::from_millis(config.health_timeout_ms),
        }
    }

    /// Probe the backend once
    #[instrument(skip(self))]
    pub async fn check_backend(&self) -> AppResult<ComponentHealth> {
        let checked_at = Utc::now();

        match self.api.probe(self.probe_timeout).await {
            Ok(elapsed) => Ok(ComponentHealth {
                name: "backend".to_string(),
                status: HealthStatus::Healthy,
                message: None,
                checked_at,
                response_time: Some(elapsed),
            }),
            Err(e) => {
                warn!("💔 Backend probe failed: {}", e);
                Ok(ComponentHealth {
                    name: "backend".to_string(),
                    status: HealthStatus::Unhealthy,
                    message: Some(e.to_string()),
                    checked_at,
                    response_time: None,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::models::ApiConfig;
    use crate::infrastructure::storage::{SessionContext, TokenStore};
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn health_against(base_url: String, dir: &tempfile::TempDir) -> HealthService {
        let session = SessionContext::open(TokenStore::new(dir.path().join("session.json")))
            .await
            .unwrap();
        let config = ApiConfig {
            base_url,
            request_timeout_ms: 2000,
            connection_timeout_ms: 2000,
            max_retries: 0,
            retry_backoff_ms: 1,
        };
        let api = Arc::new(ApiClient::new(&config, session).unwrap());
        HealthService::new(api, &MonitoringConfig::default())
    }

    #[tokio::test]
    async fn test_reachable_backend_is_healthy() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let health = health_against(server.uri(), &dir).await;

        let component = health.check_backend().await.unwrap();
        assert_eq!(component.status, HealthStatus::Healthy);
        assert!(component.response_time.is_some());
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_unhealthy() {
        let dir = tempfile::tempdir().unwrap();
        // Nothing listens on this port.
        let health = health_against("http://127.0.0.1:9".to_string(), &dir).await;

        let component = health.check_backend().await.unwrap();
        assert_eq!(component.status, HealthStatus::Unhealthy);
        assert!(component.message.is_some());
    }
}
