#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the address input.
    InputChanged(String),
    /// User submitted the current input.
    Submitted,
    /// The outbound call for a run settled.
    RunSettled {
        run_id: crate::RunId,
        outcome: crate::RunOutcome,
    },
    /// User toggled the translated synopsis.
    TranslationToggled,
}
