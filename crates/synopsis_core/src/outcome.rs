use std::fmt;

/// The payload of one successful run. Replaced wholesale by the next one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineResult {
    pub id: i64,
    pub source_url: String,
    pub title: String,
    pub synopsis: String,
    pub translation: String,
    /// ISO-8601 timestamp as reported by the service.
    pub created_at: String,
    pub word_count: u64,
    pub author: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The service answered with a non-success status.
    RemoteRequest { status: u16 },
    /// The call never produced a response.
    Transport,
    /// Success status, but the body did not match the expected shape.
    MalformedResponse,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::RemoteRequest { status } => write!(f, "remote request failed ({status})"),
            FailureKind::Transport => write!(f, "transport failure"),
            FailureKind::MalformedResponse => write!(f, "malformed response"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl RunFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

pub type RunOutcome = Result<PipelineResult, RunFailure>;
