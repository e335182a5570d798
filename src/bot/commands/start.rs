use super::Command;
use super::Response;
use crate::App;
use frankenstein::Message;
use typed_builder::TypedBuilder;

static START: &str = "El Pregonero is a town crier for NFT drops.\n\
     It watches the approved drop feed and posts every new mint, auction \
     and airdrop to the channels you configure.\n\n\
     Use /help to see available commands.";

static COMMAND: &str = "/start";

#[derive(TypedBuilder)]
pub struct Start<'a> {
    app: &'a App,
    message: &'a Message,
}

impl Start<'_> {
    pub fn command() -> &'static str {
        COMMAND
    }
}

impl Command for Start<'_> {
    fn response(&self) -> Response {
        Response::Simple(START.to_string())
    }

    fn app(&self) -> &App {
        self.app
    }

    fn message(&self) -> &Message {
        self.message
    }
}
