use crate::deliver::DeliverJob;
use crate::storage::StoreError;
use crate::sync::drops_api::FeedError;
use crate::App;
use std::fmt;

/// One polling tick: fetch the feed, compare the head item's identity to
/// the last announced one, move the marker, fan out.
pub struct PollJob {}

#[derive(Debug)]
pub struct PollError {
    msg: String,
}

impl fmt::Display for PollError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.msg)
    }
}

impl From<FeedError> for PollError {
    fn from(error: FeedError) -> Self {
        PollError {
            msg: format!("{error}"),
        }
    }
}

impl From<StoreError> for PollError {
    fn from(error: StoreError) -> Self {
        PollError {
            msg: format!("{error}"),
        }
    }
}

impl PollJob {
    pub fn new() -> Self {
        PollJob {}
    }

    pub fn execute(&self, app: &App) -> Result<(), PollError> {
        let posts = app.feed.fetch_approved(None)?;

        let Some(newest) = posts.first() else {
            return Ok(());
        };

        // The marker is persisted before any send, so a crash mid-fanout
        // cannot announce the same drop twice. Items that changed while
        // the process was down are never backfilled.
        if !app.last_delivered.advance(&newest.id)? {
            return Ok(());
        }

        log::info!("New drop detected: {}", newest.id);

        DeliverJob::new(newest.clone()).execute(app);

        Ok(())
    }
}

impl Default for PollJob {
    fn default() -> Self {
        Self::new()
    }
}
