use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use synopsis_logging::{pipeline_debug, pipeline_info, pipeline_warn};
use tokio_util::sync::CancellationToken;

use crate::client::{ClientSettings, ReqwestSummaryClient, SummaryClient};
use crate::{EngineEvent, EngineStopped, RunId};

enum EngineCommand {
    Submit { run_id: RunId, address: String },
}

/// Submits outbound calls to a background tokio runtime.
///
/// Only the most recent submission is kept alive: a new submit cancels the
/// request still in flight, which then emits no event.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

/// Receiving end of the worker's events. Owned by a single consumer.
pub struct EngineEvents {
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn spawn(settings: ClientSettings) -> io::Result<(Self, EngineEvents)> {
        Self::spawn_with_client(Arc::new(ReqwestSummaryClient::new(settings)))
    }

    pub fn spawn_with_client(
        client: Arc<dyn SummaryClient>,
    ) -> io::Result<(Self, EngineEvents)> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::spawn(move || {
            let mut in_flight: Option<CancellationToken> = None;
            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::Submit { run_id, address } => {
                        if let Some(previous) = in_flight.take() {
                            previous.cancel();
                        }
                        let token = CancellationToken::new();
                        in_flight = Some(token.clone());

                        let client = client.clone();
                        let event_tx = event_tx.clone();
                        runtime.spawn(async move {
                            handle_submit(client.as_ref(), run_id, address, token, event_tx).await;
                        });
                    }
                }
            }
            pipeline_debug!("engine worker stopped");
        });

        Ok((Self { cmd_tx }, EngineEvents { event_rx }))
    }

    /// Fails when the worker thread is gone and the request cannot be sent.
    pub fn submit(&self, run_id: RunId, address: impl Into<String>) -> Result<(), EngineStopped> {
        self.cmd_tx
            .send(EngineCommand::Submit {
                run_id,
                address: address.into(),
            })
            .map_err(|_| {
                pipeline_warn!("run {} dropped: engine worker is gone", run_id);
                EngineStopped
            })
    }
}

impl EngineEvents {
    /// Blocks until the next event. `None` once the worker is gone.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_submit(
    client: &dyn SummaryClient,
    run_id: RunId,
    address: String,
    token: CancellationToken,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    tokio::select! {
        _ = token.cancelled() => {
            pipeline_debug!("run {} superseded before the service answered", run_id);
        }
        result = client.summarize(&address) => {
            match &result {
                Ok(_) => pipeline_info!("run {} settled successfully", run_id),
                Err(err) => pipeline_info!("run {} failed ({}): {}", run_id, err.kind, err),
            }
            let _ = event_tx.send(EngineEvent::RequestCompleted { run_id, result });
        }
    }
}
