use std::sync::Arc;

use stories_core::{Effect, ErrorInfo, KeyValueStore, Msg};
use stories_engine::{EngineEvent, EngineHandle};
use stories_logging::{stories_debug, stories_warn};

/// Executes core effects against the engine and the durable store.
pub struct EffectRunner {
    engine: EngineHandle,
    store: Arc<dyn KeyValueStore>,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, store: Arc<dyn KeyValueStore>) -> Self {
        Self { engine, store }
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchStories { token, url } => {
                    self.engine.fetch(token, url);
                }
                Effect::PersistValue { key, value } => {
                    // Persistence is best-effort; the term stays in memory either way.
                    match self.store.set(&key, &value) {
                        Ok(()) => stories_debug!("Persisted {}={:?}", key, value),
                        Err(err) => stories_warn!("Failed to persist {}: {}", key, err),
                    }
                }
            }
        }
    }

    /// Next engine completion translated into a core message, if one is ready.
    pub fn try_recv_msg(&self) -> Option<Msg> {
        self.engine.try_recv().map(map_event)
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::FetchCompleted { token, result } => Msg::FetchCompleted {
            token,
            result: result.map_err(ErrorInfo::from),
        },
    }
}
