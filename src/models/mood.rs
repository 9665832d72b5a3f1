use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::icon::{resolve_icon, MoodIcon};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Mood {
    pub id: Uuid,
    pub name: String,
    pub color: String,
    pub icon: String,
    #[sqlx(rename = "sort_order")]
    pub order: i32,
    pub created_at: DateTime<Utc>,
}

impl Mood {
    pub fn resolved_icon(&self) -> MoodIcon {
        resolve_icon(&self.icon).icon()
    }
}

/// Mood as returned to clients, with the icon already resolved.
#[derive(Debug, Serialize)]
pub struct MoodResponse {
    pub id: Uuid,
    pub name: String,
    pub color: String,
    pub icon: MoodIcon,
    pub order: i32,
}

impl From<Mood> for MoodResponse {
    fn from(mood: Mood) -> Self {
        Self {
            icon: mood.resolved_icon(),
            id: mood.id,
            name: mood.name,
            color: mood.color,
            order: mood.order,
        }
    }
}

/// (name, color, icon) of the built-in palette, in display order.
pub const DEFAULT_PALETTE: [(&str, &str, &str); 8] = [
    ("幸せ", "#fef08a", "Sun"),
    ("穏やか", "#bfdbfe", "Cloud"),
    ("情熱", "#fecaca", "Flame"),
    ("自然", "#bbf7d0", "Leaf"),
    ("神秘", "#e9d5ff", "Sparkles"),
    ("活力", "#fed7aa", "Zap"),
    ("憂鬱", "#e2e8f0", "CloudRain"),
    ("愛情", "#fbcfe8", "Heart"),
];

/// Builds the default palette with fresh ids.
pub fn default_moods() -> Vec<Mood> {
    let now = Utc::now();
    DEFAULT_PALETTE
        .iter()
        .zip(0..)
        .map(|(&(name, color, icon), order)| Mood {
            id: Uuid::new_v4(),
            name: name.to_string(),
            color: color.to_string(),
            icon: icon.to_string(),
            order,
            created_at: now,
        })
        .collect()
}
