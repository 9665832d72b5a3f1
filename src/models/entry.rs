use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A diary record tagged with a mood.
///
/// `date` is the local calendar day of `timestamp`; the offset carried by
/// `timestamp` is the user's offset at the time of writing, so
/// `timestamp.hour()` is the local hour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
    pub title: String,
    pub content: String,
    pub color: String,
    pub icon: String,
    pub date: NaiveDate,
    pub timestamp: DateTime<FixedOffset>,
}

impl MoodEntry {
    /// Local calendar day of the timestamp.
    pub fn local_date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }
}

/// Payload accepted by an `EntryStore` when writing a new entry.
#[derive(Debug, Clone)]
pub struct NewEntry {
    pub user_id: Option<Uuid>,
    pub title: String,
    pub content: String,
    pub color: String,
    pub icon: String,
    pub timestamp: DateTime<FixedOffset>,
}

impl NewEntry {
    /// Materializes the entry under `id`, deriving `date` from the timestamp.
    pub fn into_entry(self, id: String) -> MoodEntry {
        MoodEntry {
            id,
            user_id: self.user_id,
            date: self.timestamp.date_naive(),
            title: self.title,
            content: self.content,
            color: self.color,
            icon: self.icon,
            timestamp: self.timestamp,
        }
    }
}
