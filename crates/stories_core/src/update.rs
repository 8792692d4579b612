use crate::{AppState, Effect, LifecycleEvent, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::TermChanged(term) => {
            let write = state.controller.on_term_change(term);
            state.mark_dirty();
            write.into_iter().map(Effect::from).collect()
        }
        Msg::SearchSubmitted => {
            match state
                .controller
                .on_submit(&mut state.orchestrator, &mut state.lifecycle)
            {
                Some(request) => {
                    state.mark_dirty();
                    vec![Effect::from(request)]
                }
                None => Vec::new(),
            }
        }
        Msg::StoryRemoved(id) => {
            if state.lifecycle.apply(LifecycleEvent::ItemRemoved(id)) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::FetchCompleted { token, result } => {
            if state
                .orchestrator
                .complete(token, result, &mut state.lifecycle)
            {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
