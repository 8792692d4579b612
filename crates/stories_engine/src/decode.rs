use serde::Deserialize;
use stories_core::Item;

use crate::{FailureKind, FetchError};

#[derive(Debug, Deserialize)]
struct SearchResponse {
    hits: Vec<Hit>,
}

// Ask/Show HN hits come back with null `url`, comments with null `title`.
#[derive(Debug, Deserialize)]
struct Hit {
    #[serde(rename = "objectID")]
    object_id: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    author: Option<String>,
    #[serde(default)]
    num_comments: Option<u32>,
    #[serde(default)]
    points: Option<u32>,
}

impl From<Hit> for Item {
    fn from(hit: Hit) -> Self {
        Self {
            id: hit.object_id,
            title: hit.title.unwrap_or_default(),
            url: hit.url.unwrap_or_default(),
            author: hit.author.unwrap_or_default(),
            comment_count: hit.num_comments.unwrap_or_default(),
            points: hit.points.unwrap_or_default(),
        }
    }
}

/// Decode a search response body into items, preserving server order.
pub fn decode_hits(bytes: &[u8]) -> Result<Vec<Item>, FetchError> {
    let response: SearchResponse = serde_json::from_slice(bytes)
        .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))?;
    Ok(response.hits.into_iter().map(Item::from).collect())
}
