//! Metrics API client - read-only access to the dashboard backend

pub mod report;
pub mod types;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;

pub use types::{Process, SystemMetrics};

/// Fixed per-request timeout; a request that exceeds it counts as a failed fetch.
pub const REQUEST_TIMEOUT: Duration = Duration::from_millis(5000);

/// Why a single fetch failed. The poller treats every variant the same way and
/// only logs the detail.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} returned HTTP {status}")]
    Status {
        endpoint: String,
        status: reqwest::StatusCode,
    },

    #[error("malformed response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Source of metrics snapshots and process lists consumed by the poller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MetricsSource: Send + Sync {
    async fn fetch_metrics(&self) -> Result<SystemMetrics, FetchError>;
    async fn fetch_processes(&self) -> Result<Vec<Process>, FetchError>;
}

/// HTTP client for `{base}/metrics`, `{base}/processes` and the auxiliary endpoints
pub struct HttpMetricsClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpMetricsClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("sysboard/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let endpoint = self.endpoint(path);
        tracing::trace!(%endpoint, "GET");

        let response = self
            .http
            .get(&endpoint)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                endpoint: endpoint.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { endpoint, status });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| FetchError::Transport {
                endpoint: endpoint.clone(),
                source,
            })?;

        serde_json::from_slice(&body).map_err(|source| FetchError::Decode { endpoint, source })
    }

    pub async fn metrics(&self) -> Result<SystemMetrics, FetchError> {
        let metrics: SystemMetrics = self.get_json("metrics").await?;
        Ok(metrics.normalized())
    }

    pub async fn processes(&self) -> Result<Vec<Process>, FetchError> {
        self.get_json("processes").await
    }

    /// Untyped; only surfaced by the `network` subcommand.
    pub async fn network_stats(&self) -> Result<serde_json::Value, FetchError> {
        self.get_json("network-stats").await
    }

    /// Untyped; only surfaced by the `health` subcommand.
    pub async fn health(&self) -> Result<serde_json::Value, FetchError> {
        self.get_json("health").await
    }
}

#[async_trait]
impl MetricsSource for HttpMetricsClient {
    async fn fetch_metrics(&self) -> Result<SystemMetrics, FetchError> {
        self.metrics().await
    }

    async fn fetch_processes(&self) -> Result<Vec<Process>, FetchError> {
        self.processes().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve exactly one HTTP response on a loopback port and return the base URL.
    async fn serve_once(status_line: &'static str, body: String) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        });

        format!("http://{}/dashboard/api/", addr)
    }

    #[test]
    fn endpoint_joins_without_double_slash() {
        let client = HttpMetricsClient::new("http://localhost:8000/dashboard/api/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000/dashboard/api");
        assert_eq!(
            client.endpoint("/metrics"),
            "http://localhost:8000/dashboard/api/metrics"
        );
        assert_eq!(
            client.endpoint("network-stats"),
            "http://localhost:8000/dashboard/api/network-stats"
        );
    }

    #[tokio::test]
    async fn decodes_process_list() {
        let body = r#"[{"pid": 1, "name": "init", "cpu_percent": 0.3, "memory_percent": 0.1, "status": "sleeping"},
                       {"pid": 99}]"#;
        let base = serve_once("200 OK", body.to_string()).await;
        let client = HttpMetricsClient::new(&base).unwrap();

        let processes = client.processes().await.expect("process list");
        assert_eq!(processes.len(), 2);
        assert_eq!(processes[0].display_name(), "init");
        assert_eq!(processes[1].cpu_percent, None);
    }

    #[tokio::test]
    async fn non_success_status_is_a_status_error() {
        let base = serve_once("503 Service Unavailable", "{}".to_string()).await;
        let client = HttpMetricsClient::new(&base).unwrap();

        let err = client.metrics().await.unwrap_err();
        assert!(
            matches!(err, FetchError::Status { status, .. } if status.as_u16() == 503),
            "unexpected error: {err}"
        );
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let base = serve_once("200 OK", r#"{"cpu": "nope"}"#.to_string()).await;
        let client = HttpMetricsClient::new(&base).unwrap();

        let err = client.metrics().await.unwrap_err();
        assert!(matches!(err, FetchError::Decode { .. }), "unexpected error: {err}");
    }

    #[tokio::test]
    async fn unanswered_request_times_out_as_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            // Hold the connection open without ever responding.
            tokio::time::sleep(REQUEST_TIMEOUT * 4).await;
            drop(socket);
        });

        let client = HttpMetricsClient::new(&format!("http://{}", addr)).unwrap();
        let started = std::time::Instant::now();
        let err = client.metrics().await.unwrap_err();
        let elapsed = started.elapsed();

        assert!(
            matches!(&err, FetchError::Transport { source, .. } if source.is_timeout()),
            "unexpected error: {err}"
        );
        assert!(elapsed >= REQUEST_TIMEOUT - Duration::from_millis(100), "{elapsed:?}");
        assert!(elapsed < REQUEST_TIMEOUT + Duration::from_secs(3), "{elapsed:?}");
    }

    #[tokio::test]
    async fn connection_refused_is_a_transport_error() {
        // Bind then drop to get a port with nothing listening.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = HttpMetricsClient::new(&format!("http://{}", addr)).unwrap();
        let err = client.health().await.unwrap_err();
        assert!(matches!(err, FetchError::Transport { .. }), "unexpected error: {err}");
    }
}
