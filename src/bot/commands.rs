use crate::config::Config;
use crate::deliver::render_message::Dialect;
use crate::App;
use frankenstein::Message;
use std::str::FromStr;

pub mod all_drops;
pub mod help;
pub mod latest;
pub mod set_channel;
pub mod start;

pub use all_drops::AllDrops;
pub use help::Help;
pub use latest::Latest;
pub use set_channel::SetChannel;
pub use start::Start;

/// Prompts, confirmations and errors go out as plain text; anything
/// containing a rendered drop is sent with the configured dialect.
pub enum Response {
    Simple(String),
    Rendered(String),
}

pub fn send_response(app: &App, chat_id: i64, response: Response) {
    let (text, dialect) = match response {
        Response::Simple(text) => (text, Dialect::Plain),
        Response::Rendered(text) => (text, app.dialect),
    };

    if let Err(error) = app.messenger.send_text(&chat_id.to_string(), &text, dialect) {
        log::error!("Failed to reply to chat {}: {}", chat_id, error);
    }
}

pub trait Command {
    fn response(&self) -> Response;

    fn app(&self) -> &App;

    fn message(&self) -> &Message;

    fn run(&self) {
        let response = self.response();

        send_response(self.app(), self.message().chat.id, response);
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum BotCommand {
    SetChannel(String),
    Latest(String),
    AllDrops,
    Help,
    Start,
    Unknown,
}

impl FromStr for BotCommand {
    type Err = ();

    fn from_str(command: &str) -> Result<Self, Self::Err> {
        let command = command.trim();

        let bot_command = if !command.starts_with('/') {
            BotCommand::Unknown
        } else if command.starts_with(SetChannel::command()) {
            BotCommand::SetChannel(parse_argument(command, SetChannel::command()))
        } else if command.starts_with(Latest::command()) {
            BotCommand::Latest(parse_argument(command, Latest::command()))
        } else if command.starts_with(AllDrops::command()) {
            BotCommand::AllDrops
        } else if command.starts_with(Help::command()) {
            BotCommand::Help
        } else if command.starts_with(Start::command()) {
            BotCommand::Start
        } else {
            BotCommand::Unknown
        };

        Ok(bot_command)
    }
}

fn parse_argument(full_command: &str, command: &str) -> String {
    strip_command(full_command, command, &Config::telegram_bot_handle())
}

fn strip_command(full_command: &str, command: &str, handle: &str) -> String {
    let command_with_handle = format!("{command}@{handle}");

    if !handle.is_empty() && full_command.starts_with(&command_with_handle) {
        full_command
            .replacen(&command_with_handle, "", 1)
            .trim()
            .to_string()
    } else {
        full_command.replacen(command, "", 1).trim().to_string()
    }
}
