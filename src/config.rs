use crate::deliver::render_message::Dialect;
use std::env;

/// Reads configuration from environment variables. `TELEGRAM_BOT_TOKEN`
/// and `BACKEND_URL` are required, everything else has a default.
pub struct Config {}

impl Config {
    pub fn telegram_bot_token() -> String {
        Self::read_var("TELEGRAM_BOT_TOKEN")
    }

    pub fn telegram_base_url() -> String {
        Self::read_var_with_default("TELEGRAM_BASE_URL", "https://api.telegram.org/bot")
    }

    /// Bot username without `@`, used to strip `/command@Handle` suffixes
    /// in group chats. Empty when unset.
    pub fn telegram_bot_handle() -> String {
        Self::read_var_with_default("TELEGRAM_BOT_HANDLE", "")
    }

    pub fn backend_url() -> String {
        Self::read_var("BACKEND_URL")
    }

    pub fn poll_interval_in_seconds() -> u64 {
        Self::parse_var_with_default("POLL_INTERVAL_SECONDS", "60")
    }

    pub fn request_timeout_in_seconds() -> u64 {
        Self::parse_var_with_default("REQUEST_TIMEOUT_SECONDS", "10")
    }

    pub fn commands_pool_size() -> usize {
        Self::parse_var_with_default("COMMANDS_POOL_SIZE", "4")
    }

    pub fn channel_configs_file() -> String {
        Self::read_var_with_default("CHANNEL_CONFIGS_FILE", "channel_configs.json")
    }

    pub fn last_delivered_file() -> String {
        Self::read_var_with_default("LAST_DELIVERED_FILE", "last_delivered_drop")
    }

    pub fn message_dialect() -> Dialect {
        let name = Self::read_var_with_default("MESSAGE_DIALECT", "html");

        match Dialect::from_name(&name) {
            Some(dialect) => dialect,
            None => {
                log::warn!("Unknown MESSAGE_DIALECT {}, falling back to html", name);
                Dialect::Html
            }
        }
    }

    fn parse_var_with_default<T: std::str::FromStr>(name: &str, default_value: &str) -> T {
        Self::read_var_with_default(name, default_value)
            .parse()
            .unwrap_or_else(|_| panic!("{name} must be a number"))
    }

    fn read_var_with_default(name: &str, default_value: &str) -> String {
        env::var(name).unwrap_or_else(|_| default_value.to_string())
    }

    fn read_var(name: &str) -> String {
        env::var(name).unwrap_or_else(|_| panic!("{name} environment variable is not set"))
    }
}
