use std::path::PathBuf;

use chrono::{FixedOffset, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::db::seed::{is_mock, mock_entries};
use crate::models::entry::{MoodEntry, NewEntry};
use crate::models::mood::{default_moods, Mood};
use crate::models::user::User;
use crate::store::{EntryStore, StoreError};

/// File-backed store for a single local user.
///
/// Entries live in memory and the user-written ones are rewritten to one
/// JSON file after every save. Sample entries, when enabled, are kept in
/// memory only.
pub struct LocalStore {
    path: PathBuf,
    offset: FixedOffset,
    with_mock_entries: bool,
    entries: RwLock<Vec<MoodEntry>>,
    moods: Vec<Mood>,
}

impl LocalStore {
    pub fn new(path: impl Into<PathBuf>, offset: FixedOffset, with_mock_entries: bool) -> Self {
        Self {
            path: path.into(),
            offset,
            with_mock_entries,
            entries: RwLock::new(Vec::new()),
            moods: default_moods(),
        }
    }

    async fn read_file(&self) -> Result<Vec<MoodEntry>, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_slice::<Vec<MoodEntry>>(&bytes) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                tracing::error!(path = %self.path.display(), error = %e, "Failed to load entries, starting empty");
                Ok(Vec::new())
            }
        }
    }

    async fn persist(&self, entries: &[MoodEntry]) -> Result<(), StoreError> {
        let user_entries: Vec<&MoodEntry> = entries.iter().filter(|e| !is_mock(e)).collect();
        let json = serde_json::to_vec_pretty(&user_entries)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        tracing::debug!(path = %self.path.display(), count = user_entries.len(), "Persisted entries");
        Ok(())
    }
}

impl EntryStore for LocalStore {
    async fn init(&self) -> Result<(), StoreError> {
        let mut loaded = self.read_file().await?;
        // A file written by hand could carry sample ids; they are rebuilt below
        loaded.retain(|e| !is_mock(e));

        if self.with_mock_entries {
            let now = Utc::now().with_timezone(&self.offset);
            loaded.extend(mock_entries(now));
        }

        tracing::info!(path = %self.path.display(), count = loaded.len(), "Local entry store ready");
        *self.entries.write().await = loaded;
        Ok(())
    }

    async fn load(&self, user_id: Option<Uuid>) -> Result<Vec<MoodEntry>, StoreError> {
        let entries = self.entries.read().await;
        let mut snapshot: Vec<MoodEntry> = entries
            .iter()
            .filter(|e| user_id.map_or(true, |uid| e.user_id == Some(uid)))
            .cloned()
            .collect();
        snapshot.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(snapshot)
    }

    async fn save(&self, entry: NewEntry) -> Result<MoodEntry, StoreError> {
        let entry = entry.into_entry(Uuid::new_v4().to_string());

        // Held across the write so concurrent saves hit the file in order
        let mut entries = self.entries.write().await;
        entries.insert(0, entry.clone());
        if let Err(e) = self.persist(&entries).await {
            entries.remove(0);
            return Err(e);
        }

        tracing::info!(entry_id = %entry.id, "Saved entry");
        Ok(entry)
    }

    async fn moods(&self) -> Result<Vec<Mood>, StoreError> {
        Ok(self.moods.clone())
    }

    async fn users(&self) -> Result<Vec<User>, StoreError> {
        Ok(Vec::new())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn shutdown(&self) -> Result<(), StoreError> {
        let entries = self.entries.read().await;
        self.persist(&entries).await
    }
}
