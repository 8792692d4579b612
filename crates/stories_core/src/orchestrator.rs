use std::fmt;

use stories_logging::{stories_debug, stories_info};
use url::form_urlencoded;

use crate::{ErrorInfo, FetchLifecycle, Item, LifecycleEvent};

/// Minted once per issued request; larger tokens are newer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A request the caller must perform and report back with its token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    pub token: RequestToken,
    pub url: String,
}

/// Builds the request target for a query: `endpoint_prefix` + url-encoded query.
pub fn request_key(endpoint_prefix: &str, query: &str) -> String {
    let encoded: String = form_urlencoded::byte_serialize(query.as_bytes()).collect();
    format!("{endpoint_prefix}{encoded}")
}

/// Issues requests and discards completions that are no longer current.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOrchestrator {
    endpoint_prefix: String,
    next_token: u64,
    latest: Option<RequestToken>,
}

impl FetchOrchestrator {
    pub fn new(endpoint_prefix: impl Into<String>) -> Self {
        Self {
            endpoint_prefix: endpoint_prefix.into(),
            next_token: 1,
            latest: None,
        }
    }

    pub fn endpoint_prefix(&self) -> &str {
        &self.endpoint_prefix
    }

    /// Token of the request whose completion is still awaited, if any.
    pub fn latest_token(&self) -> Option<RequestToken> {
        self.latest
    }

    /// Starts a fetch for `query`. Does not deduplicate identical queries.
    pub fn submit(&mut self, query: &str, lifecycle: &mut FetchLifecycle) -> PendingRequest {
        let url = request_key(&self.endpoint_prefix, query);
        let token = RequestToken(self.next_token);
        self.next_token += 1;
        self.latest = Some(token);
        lifecycle.apply(LifecycleEvent::FetchStarted);
        stories_info!("Issuing request {} url={}", token, url);
        PendingRequest { token, url }
    }

    /// Feeds a completion into `lifecycle` if `token` is still the latest.
    /// Returns whether the lifecycle changed.
    pub fn complete(
        &mut self,
        token: RequestToken,
        result: Result<Vec<Item>, ErrorInfo>,
        lifecycle: &mut FetchLifecycle,
    ) -> bool {
        if self.latest != Some(token) {
            stories_debug!(
                "Discarding stale completion {} (latest {:?})",
                token,
                self.latest.map(RequestToken::value)
            );
            return false;
        }
        self.latest = None;

        let event = match result {
            Ok(items) => LifecycleEvent::FetchSucceeded(items),
            Err(error) => LifecycleEvent::FetchFailed(error),
        };
        lifecycle.apply(event)
    }
}
