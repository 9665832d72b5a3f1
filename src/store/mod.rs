//! # Entry storage
//!
//! The service talks to one [`EntryStore`]. Two backends exist: a JSON file
//! for single-user local use and PostgreSQL. [`Store`] picks one at start-up
//! so handlers and the statistics engine never care which is active.

use uuid::Uuid;

use crate::models::entry::{MoodEntry, NewEntry};
use crate::models::mood::Mood;
use crate::models::user::User;

pub mod local;
pub mod remote;

pub use local::LocalStore;
pub use remote::RemoteStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("No mood with color {color} and icon {icon}")]
    MoodNotFound { color: String, icon: String },
}

/// Source and sink of diary entries.
///
/// `load` returns an owned snapshot; later writes never show up in a
/// snapshot that has already been handed out.
#[allow(async_fn_in_trait)]
pub trait EntryStore {
    /// Prepares the backend. Called once before serving.
    async fn init(&self) -> Result<(), StoreError>;

    /// All entries, newest first, optionally restricted to one user.
    async fn load(&self, user_id: Option<Uuid>) -> Result<Vec<MoodEntry>, StoreError>;

    async fn save(&self, entry: NewEntry) -> Result<MoodEntry, StoreError>;

    /// Selectable moods in display order.
    async fn moods(&self) -> Result<Vec<Mood>, StoreError>;

    async fn users(&self) -> Result<Vec<User>, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;

    /// Flushes pending state and releases resources. Called once on exit.
    async fn shutdown(&self) -> Result<(), StoreError>;
}

pub enum Store {
    Local(LocalStore),
    Remote(RemoteStore),
}

impl Store {
    pub fn kind(&self) -> &'static str {
        match self {
            Store::Local(_) => "local",
            Store::Remote(_) => "remote",
        }
    }
}

impl EntryStore for Store {
    async fn init(&self) -> Result<(), StoreError> {
        match self {
            Store::Local(store) => store.init().await,
            Store::Remote(store) => store.init().await,
        }
    }

    async fn load(&self, user_id: Option<Uuid>) -> Result<Vec<MoodEntry>, StoreError> {
        match self {
            Store::Local(store) => store.load(user_id).await,
            Store::Remote(store) => store.load(user_id).await,
        }
    }

    async fn save(&self, entry: NewEntry) -> Result<MoodEntry, StoreError> {
        match self {
            Store::Local(store) => store.save(entry).await,
            Store::Remote(store) => store.save(entry).await,
        }
    }

    async fn moods(&self) -> Result<Vec<Mood>, StoreError> {
        match self {
            Store::Local(store) => store.moods().await,
            Store::Remote(store) => store.moods().await,
        }
    }

    async fn users(&self) -> Result<Vec<User>, StoreError> {
        match self {
            Store::Local(store) => store.users().await,
            Store::Remote(store) => store.users().await,
        }
    }

    async fn ping(&self) -> Result<(), StoreError> {
        match self {
            Store::Local(store) => store.ping().await,
            Store::Remote(store) => store.ping().await,
        }
    }

    async fn shutdown(&self) -> Result<(), StoreError> {
        match self {
            Store::Local(store) => store.shutdown().await,
            Store::Remote(store) => store.shutdown().await,
        }
    }
}
