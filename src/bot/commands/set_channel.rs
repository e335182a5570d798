use super::Command;
use super::Response;
use crate::bot::conversation::ConversationStep;
use crate::models::ChannelConfig;
use crate::App;
use frankenstein::Message;
use typed_builder::TypedBuilder;

static COMMAND: &str = "/setchannel";

static CHANNEL_PROMPT: &str =
    "Which channel should the drops be posted to? Reply with its @username or chat ID.";

static USAGE: &str = "Usage: /setchannel CHANNEL DROP_TYPE \
     (drop types: new mint, auction, airdrop, any). \
     Send /setchannel on its own for a guided setup.";

#[derive(TypedBuilder)]
pub struct SetChannel<'a> {
    app: &'a App,
    message: &'a Message,
    args: String,
}

impl SetChannel<'_> {
    pub fn command() -> &'static str {
        COMMAND
    }

    fn save_config(&self, channel_id: &str, drop_type: &str) -> Response {
        let config = ChannelConfig {
            chat_id: self.message.chat.id,
            channel_id: channel_id.to_string(),
            drop_type: drop_type.to_string(),
        };

        match self.app.channel_configs.upsert(config) {
            Ok(()) => Response::Simple(format!(
                "Set the post channel to {channel_id} for {drop_type} drops"
            )),
            Err(error) => {
                log::error!(
                    "Failed to save the channel config for {}: {}",
                    self.message.chat.id,
                    error
                );

                Response::Simple("Failed to set the post channel.".to_string())
            }
        }
    }
}

impl Command for SetChannel<'_> {
    fn response(&self) -> Response {
        if self.args.is_empty() {
            self.app
                .conversations
                .start(self.message.chat.id, ConversationStep::AwaitingChannel);

            return Response::Simple(CHANNEL_PROMPT.to_string());
        }

        match self.args.split_once(char::is_whitespace) {
            Some((channel_id, drop_type)) if !drop_type.trim().is_empty() => {
                self.save_config(channel_id, drop_type.trim())
            }
            _ => Response::Simple(USAGE.to_string()),
        }
    }

    fn app(&self) -> &App {
        self.app
    }

    fn message(&self) -> &Message {
        self.message
    }
}
