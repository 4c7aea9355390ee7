use std::time::{Duration, Instant};

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use synopsis_logging::{pipeline_debug, pipeline_info};

use crate::types::ErrorBody;
use crate::{FailureKind, RequestError, SummaryPayload, SummaryRequest};

pub const DEFAULT_ENDPOINT: &str = "http://localhost:3000/api/summarize";
pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred";

/// Settings for the outbound call. No timeouts are enforced unless set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub endpoint: String,
    pub connect_timeout: Option<Duration>,
    pub request_timeout: Option<Duration>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout: None,
            request_timeout: None,
        }
    }
}

#[async_trait::async_trait]
pub trait SummaryClient: Send + Sync {
    /// Asks the service to extract, summarize and translate `address`.
    async fn summarize(&self, address: &str) -> Result<SummaryPayload, RequestError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestSummaryClient {
    settings: ClientSettings,
}

impl ReqwestSummaryClient {
    pub fn new(settings: ClientSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, RequestError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = self.settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        builder.build().map_err(map_reqwest_error)
    }
}

#[async_trait::async_trait]
impl SummaryClient for ReqwestSummaryClient {
    async fn summarize(&self, address: &str) -> Result<SummaryPayload, RequestError> {
        let endpoint = reqwest::Url::parse(&self.settings.endpoint).map_err(|err| {
            RequestError::new(
                FailureKind::InvalidEndpoint,
                format!("invalid summary endpoint {:?}: {err}", self.settings.endpoint),
            )
        })?;
        let client = self.build_client()?;
        let request = SummaryRequest { url: address };
        let body = serde_json::json!(request).to_string();

        pipeline_info!("POST {} url={}", endpoint, address);
        let started = Instant::now();
        let response = client
            .post(endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let code = status.as_u16();
            // An unreadable error body is treated as an empty one.
            let bytes = response.bytes().await.unwrap_or_default();
            pipeline_debug!(
                "summary service answered {} with {} bytes in {:?}",
                status,
                bytes.len(),
                started.elapsed()
            );
            return Err(RequestError::new(
                FailureKind::HttpStatus(code),
                error_message_from_body(&bytes, code),
            ));
        }

        let bytes = response.bytes().await.map_err(map_reqwest_error)?;
        pipeline_debug!(
            "summary service answered {} with {} bytes in {:?}",
            status,
            bytes.len(),
            started.elapsed()
        );
        serde_json::from_slice::<SummaryPayload>(&bytes).map_err(|err| {
            RequestError::new(
                FailureKind::MalformedResponse,
                format!("malformed response from summary service: {err}"),
            )
        })
    }
}

/// The service's `error` field, or a message carrying the status code.
pub fn error_message_from_body(body: &[u8], status: u16) -> String {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.error)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| format!("HTTP error! status: {status}"))
}

fn map_reqwest_error(err: reqwest::Error) -> RequestError {
    let message = describe_error_chain(&err);
    if err.is_timeout() {
        return RequestError::new(FailureKind::Timeout, message);
    }
    RequestError::new(FailureKind::Network, message)
}

/// Joins an error with its sources, e.g. `error sending request: tcp connect error: refused`.
fn describe_error_chain(err: &dyn std::error::Error) -> String {
    let mut parts = Vec::new();
    let mut current = Some(err);
    while let Some(err) = current {
        let text = err.to_string();
        if !text.trim().is_empty() && !parts.iter().any(|part: &String| part.contains(&text)) {
            parts.push(text);
        }
        current = err.source();
    }
    if parts.is_empty() {
        UNEXPECTED_ERROR.to_string()
    } else {
        parts.join(": ")
    }
}
