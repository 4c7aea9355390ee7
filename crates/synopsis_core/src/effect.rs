#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue the single outbound call of a run.
    RequestSynopsis {
        run_id: crate::RunId,
        address: crate::Address,
    },
}
