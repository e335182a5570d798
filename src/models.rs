pub mod channel_config;
pub mod drop_post;

pub use channel_config::ChannelConfig;
pub use drop_post::{DropDate, DropKind, DropPost, Scalar};
