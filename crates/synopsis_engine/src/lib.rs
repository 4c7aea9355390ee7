//! Synopsis engine: the outbound summary call and the worker that runs it.
mod client;
mod engine;
mod types;

pub use client::{
    error_message_from_body, ClientSettings, ReqwestSummaryClient, SummaryClient,
    DEFAULT_ENDPOINT, UNEXPECTED_ERROR,
};
pub use engine::{EngineEvents, EngineHandle};
pub use types::{
    EngineEvent, EngineStopped, FailureKind, RequestError, RunId, SummaryPayload, SummaryRequest,
};
