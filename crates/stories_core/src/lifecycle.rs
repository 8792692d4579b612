use stories_logging::stories_debug;

use crate::{ErrorInfo, Item, ItemId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// Status, result collection and last failure of the story fetch.
///
/// `results` keeps server order and is only replaced wholesale on success;
/// a new fetch leaves the previous results visible until it completes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FetchState {
    status: FetchStatus,
    results: Vec<Item>,
    last_error: Option<ErrorInfo>,
}

impl FetchState {
    pub fn status(&self) -> FetchStatus {
        self.status
    }

    pub fn results(&self) -> &[Item] {
        &self.results
    }

    pub fn last_error(&self) -> Option<&ErrorInfo> {
        self.last_error.as_ref()
    }
}

/// The closed set of events the lifecycle accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    FetchStarted,
    FetchSucceeded(Vec<Item>),
    FetchFailed(ErrorInfo),
    ItemRemoved(ItemId),
}

/// Sole owner of [`FetchState`]; mutates it only through [`FetchLifecycle::apply`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FetchLifecycle {
    state: FetchState,
}

impl FetchLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FetchState {
        &self.state
    }

    /// Applies one event and reports whether the state changed.
    pub fn apply(&mut self, event: LifecycleEvent) -> bool {
        match event {
            LifecycleEvent::FetchStarted => {
                self.state.status = FetchStatus::Loading;
                self.state.last_error = None;
                true
            }
            LifecycleEvent::FetchSucceeded(items) => {
                if self.state.status != FetchStatus::Loading {
                    stories_debug!(
                        "Ignoring fetch success while {:?} ({} items)",
                        self.state.status,
                        items.len()
                    );
                    return false;
                }
                self.state.status = FetchStatus::Success;
                self.state.results = items;
                true
            }
            LifecycleEvent::FetchFailed(error) => {
                if self.state.status != FetchStatus::Loading {
                    stories_debug!(
                        "Ignoring fetch failure while {:?}: {}",
                        self.state.status,
                        error
                    );
                    return false;
                }
                self.state.status = FetchStatus::Error;
                self.state.last_error = Some(error);
                true
            }
            LifecycleEvent::ItemRemoved(id) => {
                match self.state.results.iter().position(|item| item.id == id) {
                    Some(index) => {
                        self.state.results.remove(index);
                        true
                    }
                    None => false,
                }
            }
        }
    }
}
