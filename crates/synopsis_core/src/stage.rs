use thiserror::Error;

/// One of the three displayed steps of a run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StageKind {
    Extraction,
    Synopsis,
    Translation,
}

impl StageKind {
    pub const ALL: [StageKind; 3] = [
        StageKind::Extraction,
        StageKind::Synopsis,
        StageKind::Translation,
    ];

    pub fn index(self) -> usize {
        match self {
            StageKind::Extraction => 0,
            StageKind::Synopsis => 1,
            StageKind::Translation => 2,
        }
    }

    /// Stable machine name.
    pub fn as_str(self) -> &'static str {
        match self {
            StageKind::Extraction => "extraction",
            StageKind::Synopsis => "synopsis",
            StageKind::Translation => "translation",
        }
    }

    /// Human-facing label.
    pub fn label(self) -> &'static str {
        match self {
            StageKind::Extraction => "Scraping blog content",
            StageKind::Synopsis => "Generating summary",
            StageKind::Translation => "Translating to Urdu",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StageStatus {
    #[default]
    Pending,
    Processing,
    Completed,
    Errored,
}

impl StageStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, StageStatus::Completed | StageStatus::Errored)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageRow {
    pub kind: StageKind,
    pub status: StageStatus,
    pub detail: Option<String>,
}

impl StageRow {
    fn pending(kind: StageKind) -> Self {
        Self {
            kind,
            status: StageStatus::Pending,
            detail: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StageTransitionError {
    #[error("stage {stage} cannot start while {status:?}")]
    NotPending { stage: &'static str, status: StageStatus },
    #[error("stage {stage} cannot start before {blocked_by} completes")]
    OutOfOrder {
        stage: &'static str,
        blocked_by: &'static str,
    },
    #[error("stage {stage} cannot complete while {status:?}")]
    NotProcessing { stage: &'static str, status: StageStatus },
}

/// The fixed, ordered stage list of a run.
///
/// Completed stages always form a prefix, at most one stage is processing,
/// and nothing after an errored stage leaves pending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageBoard {
    rows: [StageRow; 3],
}

impl Default for StageBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl StageBoard {
    pub fn new() -> Self {
        Self {
            rows: StageKind::ALL.map(StageRow::pending),
        }
    }

    pub fn rows(&self) -> &[StageRow] {
        &self.rows
    }

    pub fn get(&self, kind: StageKind) -> &StageRow {
        &self.rows[kind.index()]
    }

    pub fn status(&self, kind: StageKind) -> StageStatus {
        self.get(kind).status
    }

    /// The single stage currently processing, if any.
    pub fn active(&self) -> Option<StageKind> {
        self.rows
            .iter()
            .find(|row| row.status == StageStatus::Processing)
            .map(|row| row.kind)
    }

    pub fn is_consistent(&self) -> bool {
        let processing = self
            .rows
            .iter()
            .filter(|row| row.status == StageStatus::Processing)
            .count();
        if processing > 1 {
            return false;
        }

        // Walk left to right: completed*, then at most one of
        // processing/errored, then pending*.
        let mut rest = self.rows.iter().skip_while(|row| row.status == StageStatus::Completed);
        match rest.next() {
            None => true,
            Some(_) => rest.all(|row| row.status == StageStatus::Pending),
        }
    }

    pub(crate) fn start(
        &mut self,
        kind: StageKind,
        detail: impl Into<String>,
    ) -> Result<(), StageTransitionError> {
        let row = self.get(kind);
        if row.status != StageStatus::Pending {
            return Err(StageTransitionError::NotPending {
                stage: kind.as_str(),
                status: row.status,
            });
        }
        if let Some(blocker) = self.rows[..kind.index()]
            .iter()
            .find(|row| row.status != StageStatus::Completed)
        {
            return Err(StageTransitionError::OutOfOrder {
                stage: kind.as_str(),
                blocked_by: blocker.kind.as_str(),
            });
        }
        self.set(kind, StageStatus::Processing, Some(detail.into()));
        Ok(())
    }

    pub(crate) fn complete(
        &mut self,
        kind: StageKind,
        detail: impl Into<String>,
    ) -> Result<(), StageTransitionError> {
        let status = self.status(kind);
        if status != StageStatus::Processing {
            return Err(StageTransitionError::NotProcessing {
                stage: kind.as_str(),
                status,
            });
        }
        self.set(kind, StageStatus::Completed, Some(detail.into()));
        Ok(())
    }

    /// Marks the in-flight stage as errored and returns it.
    ///
    /// With nothing processing, the first stage that has not completed takes
    /// the error instead, so a failed run always shows exactly one errored row.
    /// Returns `None` only when every stage already completed.
    pub(crate) fn fail(&mut self, message: &str) -> Option<StageKind> {
        let target = self.active().or_else(|| {
            self.rows
                .iter()
                .find(|row| !row.status.is_terminal())
                .map(|row| row.kind)
        })?;
        self.set(target, StageStatus::Errored, Some(message.to_owned()));
        Some(target)
    }

    fn set(&mut self, kind: StageKind, status: StageStatus, detail: Option<String>) {
        let row = &mut self.rows[kind.index()];
        row.status = status;
        row.detail = detail;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_requires_earlier_stages_completed() {
        let mut board = StageBoard::new();
        let err = board.start(StageKind::Synopsis, "x").unwrap_err();
        assert_eq!(
            err,
            StageTransitionError::OutOfOrder {
                stage: "synopsis",
                blocked_by: "extraction",
            }
        );
        assert_eq!(board, StageBoard::new());
    }

    #[test]
    fn complete_requires_processing() {
        let mut board = StageBoard::new();
        assert!(board.complete(StageKind::Extraction, "done").is_err());
        board.start(StageKind::Extraction, "go").unwrap();
        board.complete(StageKind::Extraction, "done").unwrap();
        assert!(board.start(StageKind::Extraction, "again").is_err());
        assert!(board.is_consistent());
    }

    #[test]
    fn fail_without_active_stage_errors_first_unfinished() {
        let mut board = StageBoard::new();
        board.start(StageKind::Extraction, "go").unwrap();
        board.complete(StageKind::Extraction, "done").unwrap();

        assert_eq!(board.fail("boom"), Some(StageKind::Synopsis));
        assert_eq!(board.status(StageKind::Synopsis), StageStatus::Errored);
        assert_eq!(board.status(StageKind::Translation), StageStatus::Pending);
        assert!(board.is_consistent());
    }

    #[test]
    fn consistency_rejects_gaps_and_double_processing() {
        let mut board = StageBoard::new();
        board.set(StageKind::Synopsis, StageStatus::Completed, None);
        assert!(!board.is_consistent());

        let mut board = StageBoard::new();
        board.set(StageKind::Extraction, StageStatus::Processing, None);
        board.set(StageKind::Synopsis, StageStatus::Processing, None);
        assert!(!board.is_consistent());

        let mut board = StageBoard::new();
        board.set(StageKind::Extraction, StageStatus::Errored, None);
        board.set(StageKind::Translation, StageStatus::Processing, None);
        assert!(!board.is_consistent());
    }
}
