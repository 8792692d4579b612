use crate::view_model::{StoriesViewModel, StoryRowView};
use crate::{
    Effect, FetchLifecycle, FetchOrchestrator, FetchState, KeyValueStore, PersistentValue,
    RequestToken, SearchController, SearchSettings,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub(crate) controller: SearchController,
    pub(crate) orchestrator: FetchOrchestrator,
    pub(crate) lifecycle: FetchLifecycle,
    dirty: bool,
}

impl AppState {
    /// Hydrates the search term from `store` and returns the initial effects
    /// (the first search, if the term is non-empty).
    pub fn init(settings: &SearchSettings, store: &dyn KeyValueStore) -> (Self, Vec<Effect>) {
        let term = PersistentValue::create(
            settings.storage_key.as_str(),
            settings.initial_term.as_str(),
            store,
        );
        let mut orchestrator = FetchOrchestrator::new(settings.endpoint_prefix.as_str());
        let mut lifecycle = FetchLifecycle::new();
        let (controller, initial) =
            SearchController::create(term, &mut orchestrator, &mut lifecycle);

        let state = Self {
            controller,
            orchestrator,
            lifecycle,
            dirty: true,
        };
        (state, initial.into_iter().map(Effect::from).collect())
    }

    pub fn view(&self) -> StoriesViewModel {
        let fetch = self.lifecycle.state();
        let stories: Vec<StoryRowView> = fetch.results().iter().map(StoryRowView::from).collect();
        StoriesViewModel {
            term: self.controller.term().to_string(),
            active_query: self.controller.active_query().map(ToOwned::to_owned),
            status: fetch.status(),
            last_error: fetch.last_error().cloned(),
            story_count: stories.len(),
            total_comments: stories.iter().map(|row| u64::from(row.comment_count)).sum(),
            stories,
            can_submit: self.controller.can_submit(),
            dirty: self.dirty,
        }
    }

    pub fn fetch_state(&self) -> &FetchState {
        self.lifecycle.state()
    }

    pub fn latest_token(&self) -> Option<RequestToken> {
        self.orchestrator.latest_token()
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns whether a re-render is due and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}
