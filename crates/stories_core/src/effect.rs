use crate::{PendingRequest, PendingWrite, RequestToken};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Perform one GET for `url` and report back `Msg::FetchCompleted` with `token`.
    FetchStories { token: RequestToken, url: String },
    /// Best-effort write to durable storage.
    PersistValue { key: String, value: String },
}

impl From<PendingRequest> for Effect {
    fn from(request: PendingRequest) -> Self {
        Effect::FetchStories {
            token: request.token,
            url: request.url,
        }
    }
}

impl From<PendingWrite> for Effect {
    fn from(write: PendingWrite) -> Self {
        Effect::PersistValue {
            key: write.key,
            value: write.value,
        }
    }
}
