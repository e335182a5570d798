use crate::storage::{write_atomically, StoreError};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;

/// Identity of the most recently announced drop, persisted across restarts.
pub struct LastDelivered {
    path: PathBuf,
    id: Mutex<Option<String>>,
}

impl LastDelivered {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        let id = match fs::read_to_string(&path) {
            Ok(contents) => {
                let trimmed = contents.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
            Err(error) if error.kind() == ErrorKind::NotFound => None,
            Err(error) => return Err(error.into()),
        };

        Ok(LastDelivered {
            path,
            id: Mutex::new(id),
        })
    }

    pub fn current(&self) -> Option<String> {
        self.id.lock().unwrap().clone()
    }

    /// Moves the marker to `id`, persisting before the in-memory change.
    /// `Ok(false)` means the id was already current.
    pub fn advance(&self, id: &str) -> Result<bool, StoreError> {
        let mut current = self.id.lock().unwrap();

        if current.as_deref() == Some(id) {
            return Ok(false);
        }

        write_atomically(&self.path, id)?;

        *current = Some(id.to_string());
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::LastDelivered;

    #[test]
    fn starts_empty_when_the_file_is_missing() {
        let directory = tempfile::tempdir().unwrap();
        let marker = LastDelivered::open(directory.path().join("last")).unwrap();

        assert_eq!(marker.current(), None);
    }

    #[test]
    fn advance_moves_only_on_new_identities() {
        let directory = tempfile::tempdir().unwrap();
        let marker = LastDelivered::open(directory.path().join("last")).unwrap();

        assert!(marker.advance("42").unwrap());
        assert!(!marker.advance("42").unwrap());
        assert!(marker.advance("43").unwrap());

        assert_eq!(marker.current().as_deref(), Some("43"));
    }

    #[test]
    fn marker_survives_a_reopen() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("last");

        {
            let marker = LastDelivered::open(&path).unwrap();
            marker.advance("66b1f0aa").unwrap();
        }

        let reopened = LastDelivered::open(&path).unwrap();
        assert_eq!(reopened.current().as_deref(), Some("66b1f0aa"));
        assert!(!reopened.advance("66b1f0aa").unwrap());
    }

    #[test]
    fn blank_file_counts_as_empty() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("last");
        std::fs::write(&path, "\n").unwrap();

        let marker = LastDelivered::open(&path).unwrap();
        assert_eq!(marker.current(), None);
    }
}
