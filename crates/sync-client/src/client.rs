//! HTTP client for the gatecheck sync backend.
//!
//! Two endpoints: `POST /sync/pull` and `POST /sync/push`.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

use gatecheck_core::sync::{PullBatch, PushOutcome, PushRequest, SyncApi};

use crate::error::{Result, SyncClientError};
use crate::types::*;

/// Default timeout for API requests.
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const MAX_LOG_BODY_CHARS: usize = 512;

/// Environment variable naming the backend base URL.
pub const API_URL_ENV: &str = "GATECHECK_API_URL";

/// Client for the gatecheck sync backend.
///
/// Stateless apart from the connection pool; cheap to clone and share.
#[derive(Debug, Clone)]
pub struct SyncApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl SyncApiClient {
    /// Create a new sync client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The base URL of the backend (e.g. "https://api.gatecheck.app")
    pub fn new(base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Create a client from the `GATECHECK_API_URL` environment variable.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var(API_URL_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| {
                SyncClientError::invalid_request(format!("{API_URL_ENV} is not set"))
            })?;
        Ok(Self::new(&base_url))
    }

    /// Create headers for an API request with an optional bearer token.
    fn headers(&self, token: Option<&str>) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = token {
            let auth_value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| SyncClientError::auth("Invalid access token format"))?;
            headers.insert(AUTHORIZATION, auth_value);
        }

        Ok(headers)
    }

    fn log_response(status: reqwest::StatusCode, body: &str) {
        if status.is_success() {
            debug!("API response status: {}", status);
            return;
        }

        let mut preview = body.chars().take(MAX_LOG_BODY_CHARS).collect::<String>();
        if body.chars().count() > MAX_LOG_BODY_CHARS {
            preview.push_str("...");
        }
        debug!("API response error ({}): {}", status, preview);
    }

    /// Parse a JSON response body.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        let body = response.text().await?;
        Self::log_response(status, &body);

        if !status.is_success() {
            // Try to parse error response
            if let Ok(error) = serde_json::from_str::<ApiErrorResponse>(&body) {
                return Err(SyncClientError::api(
                    status.as_u16(),
                    format!("{}: {}", error.code, error.message),
                ));
            }
            return Err(SyncClientError::api(
                status.as_u16(),
                format!("Request failed: {}", body),
            ));
        }

        serde_json::from_str(&body).map_err(|e| {
            log::error!(
                "Failed to deserialize response. Body: {}, Error: {}",
                body,
                e
            );
            SyncClientError::api(status.as_u16(), format!("Failed to parse response: {}", e))
        })
    }

    /// Fetch server-side deltas since the given checkpoint.
    ///
    /// `last_pulled_at = None` requests everything (full resync).
    ///
    /// POST /sync/pull
    pub async fn pull_changes(
        &self,
        token: Option<&str>,
        last_pulled_at: Option<&str>,
    ) -> Result<PullResponseData> {
        let url = format!("{}/sync/pull", self.base_url);
        debug!(
            "Pulling changes since {}",
            last_pulled_at.unwrap_or("the beginning")
        );

        let body = PullRequestBody {
            last_pulled_at: last_pulled_at.map(str::to_string),
        };
        let response = self
            .client
            .post(&url)
            .headers(self.headers(token)?)
            .json(&body)
            .send()
            .await?;

        let envelope: PullResponse = Self::parse_response(response).await?;
        Ok(envelope.data)
    }

    /// Submit client-created records.
    ///
    /// A `success: false` envelope on a 2xx response is surfaced as an API
    /// error; per-record rejections inside a successful envelope are not.
    ///
    /// POST /sync/push
    pub async fn push_changes(
        &self,
        token: Option<&str>,
        body: &PushRequestBody,
    ) -> Result<PushResponseData> {
        let url = format!("{}/sync/push", self.base_url);

        let response = self
            .client
            .post(&url)
            .headers(self.headers(token)?)
            .json(body)
            .send()
            .await?;

        let envelope: PushResponse = Self::parse_response(response).await?;
        if !envelope.success {
            return Err(SyncClientError::api(200, envelope.message));
        }
        Ok(envelope.data)
    }
}

#[async_trait]
impl SyncApi for SyncApiClient {
    async fn pull(
        &self,
        auth_token: Option<&str>,
        last_pulled_at: Option<&str>,
    ) -> gatecheck_core::Result<PullBatch> {
        let data = self.pull_changes(auth_token, last_pulled_at).await?;
        Ok(PullBatch::from(data))
    }

    async fn push(
        &self,
        auth_token: Option<&str>,
        request: &PushRequest,
    ) -> gatecheck_core::Result<PushOutcome> {
        let body = PushRequestBody::from(request);
        let data = self.push_changes(auth_token, &body).await?;
        Ok(PushOutcome {
            users: gatecheck_core::sync::CategoryCounts {
                total: data.users.total,
                processed: data.users.processed,
            },
            entries: gatecheck_core::sync::CategoryCounts {
                total: data.entries.total,
                processed: data.entries.processed,
            },
            attendance: gatecheck_core::sync::CategoryCounts {
                total: data.attendance.total,
                processed: data.attendance.processed,
            },
            errors: data.errors.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, VecDeque};
    use std::sync::Arc;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::Mutex as TokioMutex;

    use gatecheck_core::sync::{EntryCreate, WireEntrySource};

    #[derive(Debug, Clone)]
    struct CapturedRequest {
        path: String,
        authorization: Option<String>,
        body: String,
    }

    #[derive(Debug, Clone)]
    struct MockResponse {
        status: u16,
        body: String,
    }

    fn header_end_offset(buffer: &[u8]) -> Option<usize> {
        buffer.windows(4).position(|window| window == b"\r\n\r\n")
    }

    async fn read_http_request(
        stream: &mut tokio::net::TcpStream,
    ) -> Option<(String, HashMap<String, String>, String)> {
        let mut buffer = Vec::new();
        loop {
            let mut chunk = [0_u8; 2048];
            let read = stream.read(&mut chunk).await.ok()?;
            if read == 0 {
                return None;
            }
            buffer.extend_from_slice(&chunk[..read]);
            if header_end_offset(&buffer).is_some() {
                break;
            }
        }

        let header_end = header_end_offset(&buffer)?;
        let head = String::from_utf8_lossy(&buffer[..header_end]).to_string();
        let mut lines = head.lines();
        let request_line = lines.next()?.to_string();
        let path = request_line.split_whitespace().nth(1)?.to_string();

        let mut headers = HashMap::new();
        for line in lines {
            if let Some((name, value)) = line.split_once(':') {
                headers.insert(name.trim().to_ascii_lowercase(), value.trim().to_string());
            }
        }

        let content_length = headers
            .get("content-length")
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(0);

        let mut body = buffer[header_end + 4..].to_vec();
        while body.len() < content_length {
            let mut chunk = [0_u8; 2048];
            let read = stream.read(&mut chunk).await.ok()?;
            if read == 0 {
                break;
            }
            body.extend_from_slice(&chunk[..read]);
        }

        Some((path, headers, String::from_utf8_lossy(&body).to_string()))
    }

    fn status_text(status: u16) -> &'static str {
        match status {
            200 => "OK",
            400 => "Bad Request",
            401 => "Unauthorized",
            500 => "Internal Server Error",
            _ => "Error",
        }
    }

    async fn write_http_response(
        stream: &mut tokio::net::TcpStream,
        status: u16,
        body: &str,
    ) -> std::io::Result<()> {
        let response = format!(
            "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            status_text(status),
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).await?;
        stream.flush().await
    }

    async fn start_mock_server(
        responses: Vec<MockResponse>,
    ) -> (
        String,
        Arc<TokioMutex<Vec<CapturedRequest>>>,
        tokio::task::JoinHandle<()>,
    ) {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test listener");
        let addr = listener.local_addr().expect("listener addr");
        let captured = Arc::new(TokioMutex::new(Vec::<CapturedRequest>::new()));
        let scripted = Arc::new(TokioMutex::new(VecDeque::from(responses)));
        let captured_clone = Arc::clone(&captured);
        let scripted_clone = Arc::clone(&scripted);

        let handle = tokio::spawn(async move {
            loop {
                let (mut stream, _) = match listener.accept().await {
                    Ok(value) => value,
                    Err(_) => break,
                };
                let captured_inner = Arc::clone(&captured_clone);
                let scripted_inner = Arc::clone(&scripted_clone);
                tokio::spawn(async move {
                    let Some((path, headers, body)) = read_http_request(&mut stream).await else {
                        return;
                    };
                    captured_inner.lock().await.push(CapturedRequest {
                        path,
                        authorization: headers.get("authorization").cloned(),
                        body,
                    });

                    let response =
                        scripted_inner
                            .lock()
                            .await
                            .pop_front()
                            .unwrap_or(MockResponse {
                                status: 500,
                                body: r#"{"code":"INTERNAL","message":"unexpected request"}"#
                                    .to_string(),
                            });
                    let _ = write_http_response(&mut stream, response.status, &response.body).await;
                });
            }
        });

        (format!("http://{}", addr), captured, handle)
    }

    fn pull_body() -> String {
        r#"{"data":{
            "users":[{"user_id":"u-1","unique_code":"1001","name":"Asha","email":"asha@example.com","batch":"2026"}],
            "events":[{"event_id":"ev-1","event_name":"Robo Rally"}],
            "timestamp":"2026-03-01T12:00:00+00:00"
        }}"#
        .to_string()
    }

    #[tokio::test]
    async fn pull_sends_null_checkpoint_and_parses_entities() {
        let (base_url, captured, server) = start_mock_server(vec![MockResponse {
            status: 200,
            body: pull_body(),
        }])
        .await;

        let client = SyncApiClient::new(&base_url);
        let batch = client.pull(None, None).await.expect("pull");

        assert_eq!(batch.users.len(), 1);
        assert_eq!(batch.users[0].unique_code, "1001");
        // Unknown fields survive in the side-map.
        assert_eq!(
            batch.users[0].extra.get("batch").and_then(|v| v.as_str()),
            Some("2026")
        );
        assert_eq!(batch.events.len(), 1);
        assert_eq!(batch.timestamp, "2026-03-01T12:00:00+00:00");

        let requests = captured.lock().await.clone();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].path, "/sync/pull");
        assert!(requests[0].body.contains(r#""lastPulledAt":null"#));
        assert!(requests[0].authorization.is_none());

        server.abort();
    }

    #[tokio::test]
    async fn pull_forwards_checkpoint_and_bearer_token() {
        let (base_url, captured, server) = start_mock_server(vec![MockResponse {
            status: 200,
            body: pull_body(),
        }])
        .await;

        let client = SyncApiClient::new(&base_url);
        client
            .pull(Some("token-123"), Some("2026-03-01T11:00:00+00:00"))
            .await
            .expect("pull");

        let requests = captured.lock().await.clone();
        assert!(requests[0].body.contains("2026-03-01T11:00:00+00:00"));
        assert_eq!(
            requests[0].authorization.as_deref(),
            Some("Bearer token-123")
        );

        server.abort();
    }

    #[tokio::test]
    async fn pull_surfaces_api_errors_with_status() {
        let (base_url, _captured, server) = start_mock_server(vec![MockResponse {
            status: 500,
            body: r#"{"code":"INTERNAL","message":"database offline"}"#.to_string(),
        }])
        .await;

        let client = SyncApiClient::new(&base_url);
        let err = client
            .pull_changes(None, None)
            .await
            .expect_err("should fail");

        assert_eq!(err.status_code(), Some(500));
        assert_eq!(err.retry_class(), crate::error::ApiRetryClass::Retryable);
        assert!(err.to_string().contains("database offline"));

        server.abort();
    }

    #[tokio::test]
    async fn push_omits_empty_categories_and_parses_counts() {
        let (base_url, captured, server) = start_mock_server(vec![MockResponse {
            status: 200,
            body: r#"{"success":true,"message":"ok","data":{
                "users":{"total":0,"processed":0},
                "entries":{"total":2,"processed":1},
                "attendance":{"total":0,"processed":0},
                "errors":["duplicate unique_code 1002"]
            }}"#
            .to_string(),
        }])
        .await;

        let client = SyncApiClient::new(&base_url);
        let request = PushRequest {
            entries_created: vec![
                EntryCreate {
                    unique_code: "1001".to_string(),
                    admin_id: "adm-1".to_string(),
                    source: WireEntrySource::Online,
                },
                EntryCreate {
                    unique_code: "1002".to_string(),
                    admin_id: "adm-1".to_string(),
                    source: WireEntrySource::Onspot,
                },
            ],
            ..Default::default()
        };
        let outcome = client.push(None, &request).await.expect("push");

        assert_eq!(outcome.entries.total, 2);
        assert_eq!(outcome.entries.processed, 1);
        assert_eq!(outcome.errors.len(), 1);

        let requests = captured.lock().await.clone();
        assert_eq!(requests[0].path, "/sync/push");
        let body: serde_json::Value =
            serde_json::from_str(&requests[0].body).expect("request json");
        assert!(body.get("users").is_none());
        assert!(body.get("attendance").is_none());
        assert_eq!(
            body.pointer("/entries/created/1/source")
                .and_then(|v| v.as_str()),
            Some("ONSPOT")
        );

        server.abort();
    }

    #[tokio::test]
    async fn push_treats_unsuccessful_envelope_as_api_error() {
        let (base_url, _captured, server) = start_mock_server(vec![MockResponse {
            status: 200,
            body: r#"{"success":false,"message":"maintenance window","data":{}}"#.to_string(),
        }])
        .await;

        let client = SyncApiClient::new(&base_url);
        let err = client
            .push_changes(None, &PushRequestBody::from(&PushRequest::default()))
            .await
            .expect_err("should fail");

        assert!(err.to_string().contains("maintenance window"));
        server.abort();
    }
}
