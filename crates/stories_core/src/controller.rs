use crate::{FetchLifecycle, FetchOrchestrator, PendingRequest, PendingWrite, PersistentValue};

/// Search endpoint; the query is appended url-encoded.
pub const API_ENDPOINT: &str = "https://hn.algolia.com/api/v1/search?query=";
/// Storage key of the persisted search term.
pub const SEARCH_KEY: &str = "search";
/// Term used when nothing has been persisted yet.
pub const DEFAULT_TERM: &str = "React";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSettings {
    pub endpoint_prefix: String,
    pub storage_key: String,
    pub initial_term: String,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            endpoint_prefix: API_ENDPOINT.to_string(),
            storage_key: SEARCH_KEY.to_string(),
            initial_term: DEFAULT_TERM.to_string(),
        }
    }
}

/// Owns the live search term and the committed active query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchController {
    term: PersistentValue,
    active_query: Option<String>,
}

impl SearchController {
    /// Builds the controller and, when the hydrated term is non-empty,
    /// issues the initial search.
    pub fn create(
        term: PersistentValue,
        orchestrator: &mut FetchOrchestrator,
        lifecycle: &mut FetchLifecycle,
    ) -> (Self, Option<PendingRequest>) {
        let mut controller = Self {
            term,
            active_query: None,
        };
        let initial = controller.on_submit(orchestrator, lifecycle);
        (controller, initial)
    }

    pub fn term(&self) -> &str {
        self.term.get()
    }

    pub fn active_query(&self) -> Option<&str> {
        self.active_query.as_deref()
    }

    pub fn can_submit(&self) -> bool {
        !self.term.get().is_empty()
    }

    /// Updates the live term. Never triggers a fetch.
    pub fn on_term_change(&mut self, new_term: impl Into<String>) -> Option<PendingWrite> {
        self.term.set(new_term)
    }

    /// Commits the current term and submits it. An empty term is rejected.
    pub fn on_submit(
        &mut self,
        orchestrator: &mut FetchOrchestrator,
        lifecycle: &mut FetchLifecycle,
    ) -> Option<PendingRequest> {
        if !self.can_submit() {
            return None;
        }
        let query = self.term.get().to_string();
        let request = orchestrator.submit(&query, lifecycle);
        self.active_query = Some(query);
        Some(request)
    }
}
