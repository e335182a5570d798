use crate::models::ChannelConfig;
use crate::storage::{write_atomically, StoreError};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;

/// Channel configurations keyed by the owner chat, one per owner, backed
/// by a JSON file. The file is rewritten before the in-memory list is
/// touched, so a failed write never leaves the two out of sync.
pub struct ChannelConfigStore {
    path: PathBuf,
    records: Mutex<Vec<ChannelConfig>>,
}

impl ChannelConfigStore {
    /// A missing file is an empty store, a corrupt one is a startup error.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        let records = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(error) if error.kind() == ErrorKind::NotFound => Vec::new(),
            Err(error) => return Err(error.into()),
        };

        Ok(ChannelConfigStore {
            path,
            records: Mutex::new(records),
        })
    }

    /// Replace-or-insert the config for `config.chat_id`, last write wins.
    pub fn upsert(&self, config: ChannelConfig) -> Result<(), StoreError> {
        let mut records = self.records.lock().unwrap();

        let mut updated = records.clone();
        match updated
            .iter_mut()
            .find(|record| record.chat_id == config.chat_id)
        {
            Some(existing) => *existing = config,
            None => updated.push(config),
        }

        let contents = serde_json::to_string_pretty(&updated)?;
        write_atomically(&self.path, &contents)?;

        *records = updated;
        Ok(())
    }

    /// Snapshot of all configs, detached from later writes.
    pub fn list_all(&self) -> Vec<ChannelConfig> {
        self.records.lock().unwrap().clone()
    }
}
