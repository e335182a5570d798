use crate::config::Config;
use isahc::config::RedirectPolicy;
use isahc::prelude::*;
use isahc::HttpClient;
use std::sync::OnceLock;
use std::time::Duration;

static CLIENT: OnceLock<HttpClient> = OnceLock::new();

/// Shared blocking client for both the drops feed and the Telegram API.
pub fn client() -> &'static HttpClient {
    CLIENT.get_or_init(init_client)
}

fn init_client() -> HttpClient {
    HttpClient::builder()
        .redirect_policy(RedirectPolicy::Limit(10))
        .timeout(Duration::from_secs(Config::request_timeout_in_seconds()))
        .build()
        .unwrap()
}
