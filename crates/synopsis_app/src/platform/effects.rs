use std::io;
use std::sync::mpsc;
use std::thread;

use synopsis_core::{Effect, FailureKind, Msg, PipelineResult, RunFailure, RunId, RunOutcome};
use synopsis_engine::{
    ClientSettings, EngineEvent, EngineEvents, EngineHandle, EngineStopped, RequestError,
    SummaryPayload,
};
use synopsis_logging::{pipeline_info, pipeline_warn};

use super::app::AppEvent;

pub struct EffectRunner {
    engine: EngineHandle,
    event_tx: mpsc::Sender<AppEvent>,
}

impl EffectRunner {
    pub fn new(settings: ClientSettings, event_tx: mpsc::Sender<AppEvent>) -> io::Result<Self> {
        let (engine, events) = EngineHandle::spawn(settings)?;
        Ok(Self::start(engine, events, event_tx))
    }

    #[cfg(test)]
    pub fn with_client(
        client: std::sync::Arc<dyn synopsis_engine::SummaryClient>,
        event_tx: mpsc::Sender<AppEvent>,
    ) -> io::Result<Self> {
        let (engine, events) = EngineHandle::spawn_with_client(client)?;
        Ok(Self::start(engine, events, event_tx))
    }

    fn start(engine: EngineHandle, events: EngineEvents, event_tx: mpsc::Sender<AppEvent>) -> Self {
        spawn_event_loop(events, event_tx.clone());
        Self { engine, event_tx }
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::RequestSynopsis { run_id, address } => {
                    pipeline_info!("RequestSynopsis run_id={} url={}", run_id, address);
                    if let Err(err) = self.engine.submit(run_id, address.into_string()) {
                        let _ = self
                            .event_tx
                            .send(AppEvent::Dispatch(unsent_request(run_id, err)));
                    }
                }
            }
        }
    }
}

fn spawn_event_loop(events: EngineEvents, event_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        while let Some(event) = events.recv() {
            match event {
                EngineEvent::RequestCompleted { run_id, result } => {
                    if let Err(err) = &result {
                        pipeline_warn!("Run {} failed: {} ({})", run_id, err, err.kind);
                    }
                    let msg = Msg::RunSettled {
                        run_id,
                        outcome: map_outcome(result),
                    };
                    if event_tx.send(AppEvent::Dispatch(msg)).is_err() {
                        break;
                    }
                }
            }
        }
    });
}

/// Settles a run whose request never reached the engine.
fn unsent_request(run_id: RunId, err: EngineStopped) -> Msg {
    Msg::RunSettled {
        run_id,
        outcome: Err(RunFailure::new(FailureKind::Transport, err.to_string())),
    }
}

fn map_outcome(result: Result<SummaryPayload, RequestError>) -> RunOutcome {
    result.map(map_payload).map_err(map_failure)
}

fn map_payload(payload: SummaryPayload) -> PipelineResult {
    PipelineResult {
        id: payload.id,
        source_url: payload.blog_url,
        title: payload.title,
        synopsis: payload.summary_english,
        translation: payload.summary_urdu,
        created_at: payload.created_at,
        word_count: payload.word_count,
        author: payload.author,
    }
}

fn map_failure(err: RequestError) -> RunFailure {
    let kind = match err.kind {
        kind if kind.is_transport() => FailureKind::Transport,
        synopsis_engine::FailureKind::HttpStatus(status) => FailureKind::RemoteRequest { status },
        _ => FailureKind::MalformedResponse,
    };
    RunFailure::new(kind, err.message)
}
