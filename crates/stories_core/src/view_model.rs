use crate::{ErrorInfo, FetchStatus, Item, ItemId};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StoriesViewModel {
    pub term: String,
    pub active_query: Option<String>,
    pub status: FetchStatus,
    pub last_error: Option<ErrorInfo>,
    pub stories: Vec<StoryRowView>,
    pub story_count: usize,
    pub total_comments: u64,
    pub can_submit: bool,
    pub dirty: bool,
}

impl StoriesViewModel {
    pub fn is_loading(&self) -> bool {
        self.status == FetchStatus::Loading
    }

    pub fn is_error(&self) -> bool {
        self.status == FetchStatus::Error
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryRowView {
    pub id: ItemId,
    pub title: String,
    pub url: String,
    pub author: String,
    pub comment_count: u32,
    pub points: u32,
}

impl From<&Item> for StoryRowView {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id.clone(),
            title: item.title.clone(),
            url: item.url.clone(),
            author: item.author.clone(),
            comment_count: item.comment_count,
            points: item.points,
        }
    }
}
