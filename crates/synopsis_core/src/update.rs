use crate::{validate, AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            state.set_input(text);
            Vec::new()
        }
        Msg::Submitted => match validate(state.input()) {
            Ok(address) => {
                let run_id = state.submit(address.clone());
                vec![Effect::RequestSynopsis { run_id, address }]
            }
            Err(reason) => {
                // Rejections never touch the stages of the previous run.
                state.reject_input(reason);
                Vec::new()
            }
        },
        Msg::RunSettled { run_id, outcome } => {
            state.settle(run_id, outcome);
            Vec::new()
        }
        Msg::TranslationToggled => {
            state.toggle_translation();
            Vec::new()
        }
    };

    (state, effects)
}
