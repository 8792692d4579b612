use stories_core::Msg;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Replace the search term with the given text.
    Edit(String),
    Submit,
    Remove(String),
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    /// The core message for this command; `None` for commands handled by the shell.
    pub fn to_msg(&self) -> Option<Msg> {
        match self {
            Command::Edit(term) => Some(Msg::TermChanged(term.clone())),
            Command::Submit => Some(Msg::SearchSubmitted),
            Command::Remove(id) => Some(Msg::StoryRemoved(id.clone())),
            Command::Help | Command::Quit | Command::Unknown(_) => None,
        }
    }
}

pub const HELP: &str =
    "Type text to edit the search term (start with // for a leading /), an empty line to search. Commands: /search, /clear, /remove <id>, /help, /quit";

pub fn parse_command(line: &str) -> Command {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.is_empty() {
        return Command::Submit;
    }
    // A doubled slash escapes a term that itself starts with '/'.
    if let Some(term) = line.strip_prefix("//") {
        return Command::Edit(format!("/{term}"));
    }
    let Some(rest) = line.strip_prefix('/') else {
        return Command::Edit(line.to_string());
    };

    let mut parts = rest.splitn(2, char::is_whitespace);
    let name = parts.next().unwrap_or_default();
    let arg = parts.next().map(str::trim).unwrap_or_default();
    match name {
        "search" | "s" => Command::Submit,
        "clear" => Command::Edit(String::new()),
        "remove" | "rm" if !arg.is_empty() => Command::Remove(arg.to_string()),
        "help" | "h" => Command::Help,
        "quit" | "q" => Command::Quit,
        _ => Command::Unknown(line.to_string()),
    }
}
