//! Stories core: pure search/fetch state machine and view-model helpers.
mod controller;
mod effect;
mod error;
mod item;
mod lifecycle;
mod msg;
mod orchestrator;
mod persistent;
mod state;
mod update;
mod view_model;

pub use controller::{SearchController, SearchSettings, API_ENDPOINT, DEFAULT_TERM, SEARCH_KEY};
pub use effect::Effect;
pub use error::{ErrorInfo, ErrorKind, StoreError};
pub use item::{Item, ItemId};
pub use lifecycle::{FetchLifecycle, FetchState, FetchStatus, LifecycleEvent};
pub use msg::Msg;
pub use orchestrator::{request_key, FetchOrchestrator, PendingRequest, RequestToken};
pub use persistent::{Hydration, KeyValueStore, MemoryStore, PendingWrite, PersistentValue};
pub use state::AppState;
pub use update::update;
pub use view_model::{StoriesViewModel, StoryRowView};
