use std::fmt;
use typed_builder::TypedBuilder as Builder;

pub mod bot;
pub mod config;
pub mod deliver;
pub mod http_client;
pub mod models;
pub mod storage;
pub mod sync;

use bot::conversation::ConversationTracker;
use config::Config;
use deliver::render_message::Dialect;
use storage::{ChannelConfigStore, LastDelivered, StoreError};
use sync::drops_api::{DropsApi, ReadDrops};

/// Outbound message channel. The Telegram client implements it; tests
/// substitute recording fakes.
pub trait Messenger: Send + Sync {
    fn send_text(&self, destination: &str, text: &str, dialect: Dialect) -> Result<(), SendError>;
}

#[derive(Debug)]
pub struct SendError {
    pub msg: String,
}

impl fmt::Display for SendError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.msg)
    }
}

/// Everything the polling loop and the update loop share.
#[derive(Builder)]
pub struct App {
    pub channel_configs: ChannelConfigStore,
    pub last_delivered: LastDelivered,
    #[builder(default)]
    pub conversations: ConversationTracker,
    pub feed: Box<dyn ReadDrops>,
    pub messenger: Box<dyn Messenger>,
    #[builder(default = Dialect::Html)]
    pub dialect: Dialect,
}

impl App {
    pub fn from_config(messenger: Box<dyn Messenger>) -> Result<App, StoreError> {
        Ok(App::builder()
            .channel_configs(ChannelConfigStore::open(Config::channel_configs_file())?)
            .last_delivered(LastDelivered::open(Config::last_delivered_file())?)
            .feed(Box::new(DropsApi::new()))
            .messenger(messenger)
            .dialect(Config::message_dialect())
            .build())
    }
}
