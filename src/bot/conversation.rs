use crate::bot::commands::latest::latest_drop_response;
use crate::bot::commands::{send_response, Response};
use crate::models::ChannelConfig;
use crate::App;
use std::collections::HashMap;
use std::sync::Mutex;

static KIND_PROMPT: &str =
    "Which drops should be posted there? Reply with new mint, auction, airdrop or any.";

/// One owner chat's place in a guided flow. Absence means idle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConversationStep {
    AwaitingChannel,
    AwaitingDropKind { channel_id: String },
    AwaitingLatestKind,
}

/// Active conversations, at most one step per chat, in memory only.
/// While a chat has an active step all of its input belongs to the
/// conversation, including text that looks like a command.
#[derive(Default)]
pub struct ConversationTracker {
    steps: Mutex<HashMap<i64, ConversationStep>>,
}

impl ConversationTracker {
    pub fn start(&self, chat_id: i64, step: ConversationStep) {
        self.steps.lock().unwrap().insert(chat_id, step);
    }

    pub fn current(&self, chat_id: i64) -> Option<ConversationStep> {
        self.steps.lock().unwrap().get(&chat_id).cloned()
    }

    pub fn finish(&self, chat_id: i64) {
        self.steps.lock().unwrap().remove(&chat_id);
    }
}

/// Consumes one message from a chat with an active step and replies.
pub fn respond(app: &App, chat_id: i64, step: ConversationStep, text: &str) {
    let response = match step {
        ConversationStep::AwaitingChannel => {
            let channel_id = text.trim().to_string();

            app.conversations
                .start(chat_id, ConversationStep::AwaitingDropKind { channel_id });

            Response::Simple(KIND_PROMPT.to_string())
        }
        ConversationStep::AwaitingDropKind { channel_id } => {
            let drop_type = text.trim().to_string();
            let config = ChannelConfig {
                chat_id,
                channel_id: channel_id.clone(),
                drop_type: drop_type.clone(),
            };

            match app.channel_configs.upsert(config) {
                Ok(()) => {
                    app.conversations.finish(chat_id);

                    Response::Simple(format!(
                        "Set the post channel to {channel_id} for {drop_type} drops"
                    ))
                }
                Err(error) => {
                    // The step stays active so the owner can retry the kind.
                    log::error!("Failed to save the channel config for {}: {}", chat_id, error);

                    Response::Simple("Failed to set the post channel.".to_string())
                }
            }
        }
        ConversationStep::AwaitingLatestKind => {
            app.conversations.finish(chat_id);

            latest_drop_response(app, text.trim())
        }
    };

    send_response(app, chat_id, response);
}
