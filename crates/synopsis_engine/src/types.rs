use std::fmt;

use serde::{Deserialize, Serialize};

pub type RunId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    RequestCompleted {
        run_id: RunId,
        result: Result<SummaryPayload, RequestError>,
    },
}

/// Request body sent to the summary service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRequest<'a> {
    pub url: &'a str,
}

/// Success body returned by the summary service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryPayload {
    pub id: i64,
    pub blog_url: String,
    pub title: String,
    pub summary_english: String,
    pub summary_urdu: String,
    pub created_at: String,
    pub word_count: u64,
    #[serde(default)]
    pub author: Option<String>,
}

/// Error body returned by the summary service alongside a failure status.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct RequestError {
    pub kind: FailureKind,
    pub message: String,
}

impl RequestError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("request engine is not running")]
pub struct EngineStopped;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    InvalidEndpoint,
    HttpStatus(u16),
    Network,
    Timeout,
    MalformedResponse,
}

impl FailureKind {
    /// True when no response was received at all.
    pub fn is_transport(self) -> bool {
        matches!(
            self,
            FailureKind::InvalidEndpoint | FailureKind::Network | FailureKind::Timeout
        )
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidEndpoint => write!(f, "invalid endpoint"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::MalformedResponse => write!(f, "malformed response"),
        }
    }
}
