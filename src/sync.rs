use crate::config::Config;
use crate::App;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

pub mod drops_api;
pub mod poll_job;

pub use drops_api::{DropsApi, FeedError, ReadDrops};
pub use poll_job::PollJob;

/// Polls the drops feed forever. A failed tick is logged and skipped; the
/// next tick starts from the same marker.
pub fn start_polling(app: Arc<App>) {
    let interval = Duration::from_secs(Config::poll_interval_in_seconds());

    log::info!("Started polling drops every {} seconds", interval.as_secs());

    loop {
        if let Err(error) = PollJob::new().execute(&app) {
            log::error!("Failed to poll drops: {}", error);
        }

        thread::sleep(interval);
    }
}
