use super::Command;
use super::Response;
use crate::App;
use frankenstein::Message;
use typed_builder::TypedBuilder;

static HELP: &str = "El Pregonero announces approved NFT drops in your channels.\n\n\
     /setchannel CHANNEL DROP_TYPE - deliver new drops of the given type to a channel. \
     Send /setchannel on its own for a guided setup.\n\
     /latest DROP_TYPE - show the newest approved drop of the given type.\n\
     /alldrops - show every approved drop at once.\n\
     /help - this message.\n\n\
     Drop types: new mint, auction, airdrop, any.\n\n\
     Forward a post from any channel to the bot to find out that channel's chat ID.";

static COMMAND: &str = "/help";

#[derive(TypedBuilder)]
pub struct Help<'a> {
    app: &'a App,
    message: &'a Message,
}

impl Help<'_> {
    pub fn command() -> &'static str {
        COMMAND
    }
}

impl Command for Help<'_> {
    fn response(&self) -> Response {
        Response::Simple(HELP.to_string())
    }

    fn app(&self) -> &App {
        self.app
    }

    fn message(&self) -> &Message {
        self.message
    }
}
