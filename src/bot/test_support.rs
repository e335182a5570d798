use crate::deliver::render_message::Dialect;
use crate::models::{DropDate, DropKind, DropPost};
use crate::storage::{ChannelConfigStore, LastDelivered};
use crate::sync::drops_api::{FeedError, ReadDrops};
use crate::{App, Messenger, SendError};
use frankenstein::{Chat, ChatType, Message};
use std::sync::{Arc, Mutex};

/// A feed with nothing approved.
pub struct NoFeed;

impl ReadDrops for NoFeed {
    fn fetch_approved(&self, _drop_type: Option<&str>) -> Result<Vec<DropPost>, FeedError> {
        Ok(Vec::new())
    }
}

/// A feed that always serves the same posts.
pub struct FixedFeed {
    pub posts: Vec<DropPost>,
}

impl ReadDrops for FixedFeed {
    fn fetch_approved(&self, _drop_type: Option<&str>) -> Result<Vec<DropPost>, FeedError> {
        Ok(self.posts.clone())
    }
}

/// A feed that always fails.
pub struct BrokenFeed;

impl ReadDrops for BrokenFeed {
    fn fetch_approved(&self, _drop_type: Option<&str>) -> Result<Vec<DropPost>, FeedError> {
        Err(FeedError::Status(503))
    }
}

/// Captures outgoing messages instead of talking to Telegram. Clones
/// share the same log, so tests can keep a handle after moving one
/// into the app.
#[derive(Clone, Default)]
pub struct RecordingMessenger {
    sent: Arc<Mutex<Vec<(String, String)>>>,
}

impl RecordingMessenger {
    pub fn texts(&self) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|(_, text)| text.clone())
            .collect()
    }

    pub fn destinations(&self) -> Vec<String> {
        let mut destinations: Vec<String> = self
            .sent
            .lock()
            .unwrap()
            .iter()
            .map(|(destination, _)| destination.clone())
            .collect();

        destinations.sort();
        destinations
    }

    pub fn count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

impl Messenger for RecordingMessenger {
    fn send_text(&self, destination: &str, text: &str, _dialect: Dialect) -> Result<(), SendError> {
        self.sent
            .lock()
            .unwrap()
            .push((destination.to_string(), text.to_string()));

        Ok(())
    }
}

pub fn test_app(
    directory: &tempfile::TempDir,
    feed: Box<dyn ReadDrops>,
    messenger: RecordingMessenger,
) -> App {
    App::builder()
        .channel_configs(ChannelConfigStore::open(directory.path().join("configs.json")).unwrap())
        .last_delivered(LastDelivered::open(directory.path().join("last_delivered")).unwrap())
        .feed(feed)
        .messenger(Box::new(messenger))
        .build()
}

pub fn drop_post(id: &str, kind: DropKind, project_name: &str) -> DropPost {
    DropPost {
        id: id.to_string(),
        kind,
        project_name: project_name.to_string(),
        description: None,
        date: DropDate::Tba,
        time: None,
        supply: None,
        like_count: 0,
        price: None,
        whitelist_price: None,
        starting_price: None,
        marketplace_link: None,
        project_link: None,
        website: None,
        x_com: None,
        telegram: None,
        discord: None,
        image_url: None,
    }
}

pub fn chat_message(chat_id: i64, text: &str) -> Message {
    let chat = Chat::builder()
        .id(chat_id)
        .type_field(ChatType::Private)
        .build();

    let mut message = Message::builder()
        .message_id(1)
        .date(1_u64)
        .chat(chat)
        .build();
    message.text = Some(text.to_string());

    message
}
