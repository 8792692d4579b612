//! Stories engine: HTTP fetching, payload decoding and durable storage.
mod decode;
mod engine;
mod fetch;
mod store;
mod types;

pub use decode::decode_hits;
pub use engine::{EngineError, EngineHandle};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use store::RonFileStore;
pub use types::{EngineEvent, FailureKind, FetchError};
