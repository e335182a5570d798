use crate::bot::commands::{
    send_response, AllDrops, BotCommand, Command, Help, Latest, Response, SetChannel, Start,
};
use crate::bot::conversation;
use crate::bot::telegram_client::Api;
use crate::config::Config;
use crate::App;
use frankenstein::{Message, MessageOrigin, UpdateContent};
use std::str::FromStr;
use std::sync::Arc;
use std::thread;

pub struct UpdateHandler {}

impl UpdateHandler {
    pub fn start(app: Arc<App>, mut api: Api) {
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(Config::commands_pool_size())
            .build()
            .unwrap();

        log::info!("Starting the El Pregonero bot");

        let interval = std::time::Duration::from_secs(1);

        loop {
            while let Some(update) = api.next_update() {
                let app = app.clone();

                thread_pool.spawn(move || {
                    if let UpdateContent::Message(message) | UpdateContent::ChannelPost(message) =
                        update.content
                    {
                        process_message(&app, message);
                    }
                });
            }

            thread::sleep(interval);
        }
    }
}

/// Routes one incoming message. Forwarded channel posts are answered
/// with the source channel's ID, chats mid-conversation consume every
/// message as an answer, and only then is the text read as a command.
pub fn process_message(app: &App, message: Message) {
    if let Some(origin) = &message.forward_origin {
        if let Some(channel_id) = forwarded_channel_id(origin) {
            send_response(
                app,
                message.chat.id,
                Response::Simple(format!("Channel ID: {channel_id}")),
            );

            return;
        }
    }

    let Some(text) = message.text.clone() else {
        return;
    };

    if let Some(step) = app.conversations.current(message.chat.id) {
        conversation::respond(app, message.chat.id, step, &text);

        return;
    }

    match BotCommand::from_str(&text).unwrap() {
        BotCommand::SetChannel(args) => SetChannel::builder()
            .app(app)
            .message(&message)
            .args(args)
            .build()
            .run(),
        BotCommand::Latest(args) => Latest::builder()
            .app(app)
            .message(&message)
            .args(args)
            .build()
            .run(),
        BotCommand::AllDrops => AllDrops::builder().app(app).message(&message).build().run(),
        BotCommand::Help => Help::builder().app(app).message(&message).build().run(),
        BotCommand::Start => Start::builder().app(app).message(&message).build().run(),
        BotCommand::Unknown => {
            log::debug!("Ignoring a message from {}: {}", message.chat.id, text);
        }
    }
}

fn forwarded_channel_id(origin: &MessageOrigin) -> Option<i64> {
    match origin {
        MessageOrigin::Channel(channel) => Some(channel.chat.id),
        MessageOrigin::Chat(chat) => Some(chat.sender_chat.id),
        _ => None,
    }
}
