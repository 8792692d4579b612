/// Identity of a story; the upstream `objectID`.
pub type ItemId = String;

/// One search hit. Only `id` is used for identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    pub url: String,
    pub author: String,
    pub comment_count: u32,
    pub points: u32,
}
