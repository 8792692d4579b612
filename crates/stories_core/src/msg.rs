#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the search input.
    TermChanged(String),
    /// User submitted the current search term.
    SearchSubmitted,
    /// User dismissed a story from the list.
    StoryRemoved(crate::ItemId),
    /// Engine completion for a request.
    FetchCompleted {
        token: crate::RequestToken,
        result: Result<Vec<crate::Item>, crate::ErrorInfo>,
    },
    /// Fallback for placeholder wiring.
    NoOp,
}
