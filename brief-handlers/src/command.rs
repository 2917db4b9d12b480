//! Bot command parsing (`/cmd` or `/cmd@botname`, arguments ignored).

use dbot_core::command_name;

/// Commands understood by the brief bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BriefCommand {
    Start,
    Help,
    New,
    Cancel,
    Generate,
}

/// What an inbound text turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input<'a> {
    Command(BriefCommand),
    UnknownCommand(String),
    Text(&'a str),
}

impl BriefCommand {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "start" => Some(Self::Start),
            "help" => Some(Self::Help),
            "new" => Some(Self::New),
            "cancel" => Some(Self::Cancel),
            "generate" => Some(Self::Generate),
            _ => None,
        }
    }
}

/// Classifies `text`. Anything not starting with `/` is free text.
pub fn parse_input(text: &str) -> Input<'_> {
    let Some(name) = command_name(text) else {
        return Input::Text(text.trim());
    };
    match BriefCommand::from_name(name) {
        Some(cmd) => Input::Command(cmd),
        None => Input::UnknownCommand(name.to_string()),
    }
}
