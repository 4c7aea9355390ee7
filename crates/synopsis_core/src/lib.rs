//! Synopsis core: address validation, the pure pipeline state machine and
//! view-model helpers.
mod address;
mod effect;
mod msg;
mod outcome;
mod stage;
mod state;
mod update;
mod view_model;

pub use address::{validate, Address, RejectionReason};
pub use effect::Effect;
pub use msg::Msg;
pub use outcome::{FailureKind, PipelineResult, RunFailure, RunOutcome};
pub use stage::{StageBoard, StageKind, StageRow, StageStatus, StageTransitionError};
pub use state::{
    AppState, RunId, DETAIL_EXTRACTED, DETAIL_EXTRACTING, DETAIL_SUMMARIZED, DETAIL_SUMMARIZING,
    DETAIL_TRANSLATED, DETAIL_TRANSLATING,
};
pub use update::update;
pub use view_model::{AppViewModel, ResultView};
