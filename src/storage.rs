use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

pub mod channel_configs;
pub mod last_delivered;

pub use channel_configs::ChannelConfigStore;
pub use last_delivered::LastDelivered;

#[derive(Debug)]
pub enum StoreError {
    Io(io::Error),
    Serialization(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StoreError::Io(error) => write!(f, "{error}"),
            StoreError::Serialization(error) => write!(f, "{error}"),
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(error: io::Error) -> Self {
        StoreError::Io(error)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(error: serde_json::Error) -> Self {
        StoreError::Serialization(error)
    }
}

// Readers only ever see the previous file or the new one, never a torn
// write: the content goes to a sibling temp file first and is renamed
// over the target.
pub(crate) fn write_atomically(path: &Path, contents: &str) -> Result<(), io::Error> {
    let tmp_path = path.with_extension("tmp");

    fs::write(&tmp_path, contents)?;
    fs::rename(&tmp_path, path)
}
