use stories_core::{FetchStatus, StoriesViewModel, StoryRowView};

pub fn render(view: &StoriesViewModel) -> Vec<String> {
    let mut lines = Vec::with_capacity(view.stories.len() * 2 + 4);

    lines.push(format!(
        "My Hacker Stories with {} comments.",
        view.total_comments
    ));

    let submit_hint = if view.can_submit {
        ""
    } else {
        " (type a term to enable /search)"
    };
    lines.push(format!("Search: {}{}", view.term, submit_hint));

    let status = match view.status {
        FetchStatus::Idle => None,
        FetchStatus::Loading => Some("Loading ...".to_string()),
        FetchStatus::Success => view
            .active_query
            .as_ref()
            .map(|query| format!("{} results for \"{}\"", view.story_count, query)),
        FetchStatus::Error => Some(match &view.last_error {
            Some(err) => format!("Something went wrong ... ({err})"),
            None => "Something went wrong ...".to_string(),
        }),
    };
    lines.extend(status);

    lines.extend(view.stories.iter().flat_map(format_story_row));
    lines
}

fn format_story_row(story: &StoryRowView) -> [String; 2] {
    [
        format!(
            "[{id}] {title} | {author} | {comments} comments | {points} points",
            id = story.id,
            title = story.title,
            author = story.author,
            comments = story.comment_count,
            points = story.points,
        ),
        format!("      {}", story.url),
    ]
}
