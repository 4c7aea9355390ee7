use crate::stage::{StageBoard, StageKind, StageRow, StageTransitionError};
use crate::view_model::{AppViewModel, ResultView};
use crate::{Address, PipelineResult, RejectionReason, RunOutcome};

pub type RunId = u64;

pub const DETAIL_EXTRACTING: &str = "extracting content";
pub const DETAIL_EXTRACTED: &str = "content extracted";
pub const DETAIL_SUMMARIZING: &str = "generating summary";
pub const DETAIL_SUMMARIZED: &str = "summary generated";
pub const DETAIL_TRANSLATING: &str = "translating";
pub const DETAIL_TRANSLATED: &str = "translation completed";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    input: String,
    input_error: Option<RejectionReason>,
    address: Option<Address>,
    stages: StageBoard,
    started: bool,
    result: Option<PipelineResult>,
    error: Option<String>,
    running: bool,
    current_run: Option<RunId>,
    last_run_id: RunId,
    show_translation: bool,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn input_error(&self) -> Option<RejectionReason> {
        self.input_error
    }

    pub fn stages(&self) -> &[StageRow] {
        self.stages.rows()
    }

    pub fn stage_board(&self) -> &StageBoard {
        &self.stages
    }

    pub fn result(&self) -> Option<&PipelineResult> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The run whose outcome is currently awaited or was last applied.
    pub fn current_run(&self) -> Option<RunId> {
        self.current_run
    }

    pub fn show_translation(&self) -> bool {
        self.show_translation
    }

    /// Starts a fresh run for `address`, replacing everything the previous
    /// run left behind, and returns its id.
    pub fn submit(&mut self, address: Address) -> RunId {
        self.last_run_id += 1;
        let run_id = self.last_run_id;

        self.result = None;
        self.error = None;
        self.input_error = None;
        self.stages = StageBoard::new();
        self.started = true;
        self.running = true;
        self.current_run = Some(run_id);
        self.address = Some(address);

        if let Err(err) = self.stages.start(StageKind::Extraction, DETAIL_EXTRACTING) {
            self.record_failure(err.to_string());
            self.running = false;
        }
        self.mark_dirty();
        run_id
    }

    /// Applies the outcome of `run_id`'s outbound call.
    ///
    /// Returns `false` and leaves the state untouched when `run_id` is not the
    /// in-flight run (a superseded or already settled one).
    pub fn settle(&mut self, run_id: RunId, outcome: RunOutcome) -> bool {
        if !self.running || self.current_run != Some(run_id) {
            return false;
        }

        match outcome {
            Ok(result) => match self.advance_through_remaining_stages() {
                Ok(()) => self.result = Some(result),
                Err(err) => self.record_failure(err.to_string()),
            },
            Err(failure) => self.record_failure(failure.message),
        }

        self.running = false;
        self.mark_dirty();
        true
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            input: self.input.clone(),
            input_enabled: !self.running,
            can_submit: !self.running && !self.input.trim().is_empty(),
            input_error: self.input_error.map(|reason| reason.to_string()),
            address: self.address.as_ref().map(Address::to_string),
            stages_visible: self.started,
            stages: self.stages.rows().to_vec(),
            running: self.running,
            error: self.error.clone(),
            result: self
                .result
                .as_ref()
                .map(|result| ResultView::new(result, self.show_translation)),
            show_translation: self.show_translation,
            dirty: self.dirty,
        }
    }

    /// Returns whether anything observable changed since the last call, and
    /// clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_input(&mut self, text: String) {
        if self.input == text && self.input_error.is_none() {
            return;
        }
        self.input = text;
        self.input_error = None;
        self.mark_dirty();
    }

    pub(crate) fn reject_input(&mut self, reason: RejectionReason) {
        self.input_error = Some(reason);
        self.mark_dirty();
    }

    pub(crate) fn toggle_translation(&mut self) {
        self.show_translation = !self.show_translation;
        self.mark_dirty();
    }

    // The service returns one combined payload, so the remaining stages are
    // walked through back to back.
    fn advance_through_remaining_stages(&mut self) -> Result<(), StageTransitionError> {
        self.stages.complete(StageKind::Extraction, DETAIL_EXTRACTED)?;
        self.stages.start(StageKind::Synopsis, DETAIL_SUMMARIZING)?;
        self.stages.complete(StageKind::Synopsis, DETAIL_SUMMARIZED)?;
        self.stages.start(StageKind::Translation, DETAIL_TRANSLATING)?;
        self.stages.complete(StageKind::Translation, DETAIL_TRANSLATED)?;
        Ok(())
    }

    fn record_failure(&mut self, message: String) {
        self.stages.fail(&message);
        self.result = None;
        self.error = Some(message);
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
