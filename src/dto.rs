//! # MoodShare request and response DTOs
//!
//! Conventions:
//! - `*Request` → deserialized from client JSON body
//! - `*Query`   → deserialized from query params
//! - `*Response` → serialized to client JSON
//! - Body validation is expressed via `validator` derive macros

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::entry::NewEntry;
use crate::services::timeline::{SortOrder, TimelineFilter};

// ============================================================================
// Entries
// ============================================================================

/// POST /api/entries
#[derive(Debug, Deserialize, Validate)]
pub struct CreateEntryRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 10000, message = "Content must be 1-10000 characters"))]
    pub content: String,

    /// Hex color of the chosen mood (e.g. "#fef08a")
    #[validate(length(min = 1, max = 32, message = "Color is required"))]
    pub color: String,

    /// Icon name of the chosen mood (e.g. "Sun")
    #[validate(length(min = 1, max = 64, message = "Icon is required"))]
    pub icon: String,

    pub user_id: Option<Uuid>,

    /// RFC 3339 instant; defaults to the server's current time
    pub timestamp: Option<DateTime<FixedOffset>>,
}

impl CreateEntryRequest {
    /// Trims the free-text fields; whitespace-only input is then rejected by
    /// validation.
    pub fn normalized(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            content: self.content.trim().to_string(),
            ..self
        }
    }

    pub fn into_new_entry(self, default_timestamp: DateTime<FixedOffset>) -> NewEntry {
        NewEntry {
            user_id: self.user_id,
            title: self.title,
            content: self.content,
            color: self.color,
            icon: self.icon,
            timestamp: self.timestamp.unwrap_or(default_timestamp),
        }
    }
}

/// GET /api/entries
#[derive(Debug, Default, Deserialize)]
pub struct TimelineQuery {
    pub user_id: Option<Uuid>,
    pub q: Option<String>,
    pub color: Option<String>,
    #[serde(default)]
    pub order: SortOrder,
}

impl TimelineQuery {
    pub fn filter(&self) -> TimelineFilter {
        TimelineFilter {
            query: self.q.clone(),
            color: self.color.clone().filter(|c| c != "all"),
            order: self.order,
        }
    }
}

/// Any endpoint scoped to an optional user
#[derive(Debug, Default, Deserialize)]
pub struct UserScopeQuery {
    pub user_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct TimelineResponse {
    pub total: usize,
    pub entries: Vec<crate::models::entry::MoodEntry>,
}

// ============================================================================
// Stats
// ============================================================================

/// GET /api/stats and /api/stats/*
#[derive(Debug, Default, Deserialize)]
pub struct StatsQuery {
    pub user_id: Option<Uuid>,
    /// Reference instant (RFC 3339); defaults to the server's current time.
    /// A positive offset must be sent percent-encoded (`%2B09:00`), since a
    /// raw `+` in a query string decodes to a space.
    pub now: Option<DateTime<FixedOffset>>,
}
