use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::db::seed::seed_database;
use crate::models::entry::{MoodEntry, NewEntry};
use crate::models::mood::Mood;
use crate::models::user::User;
use crate::store::{EntryStore, StoreError};

/// PostgreSQL-backed store shared by all users.
///
/// Instants are stored in UTC and handed out in the configured offset, which
/// is also the offset `entry_date` was derived in.
pub struct RemoteStore {
    pool: PgPool,
    offset: FixedOffset,
    seed_on_start: bool,
}

#[derive(Debug, FromRow)]
struct EntryRow {
    id: Uuid,
    user_id: Option<Uuid>,
    title: String,
    content: String,
    color: String,
    icon: String,
    entry_date: NaiveDate,
    written_at: DateTime<Utc>,
}

impl EntryRow {
    fn into_entry(self, offset: FixedOffset) -> MoodEntry {
        MoodEntry {
            id: self.id.to_string(),
            user_id: self.user_id,
            title: self.title,
            content: self.content,
            color: self.color,
            icon: self.icon,
            date: self.entry_date,
            timestamp: self.written_at.with_timezone(&offset),
        }
    }
}

impl RemoteStore {
    pub fn new(pool: PgPool, offset: FixedOffset, seed_on_start: bool) -> Self {
        Self {
            pool,
            offset,
            seed_on_start,
        }
    }

    pub async fn connect(
        database_url: &str,
        offset: FixedOffset,
        seed_on_start: bool,
    ) -> Result<Self, StoreError> {
        let pool = crate::db::create_pool(database_url).await?;
        Ok(Self::new(pool, offset, seed_on_start))
    }
}

impl EntryStore for RemoteStore {
    async fn init(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        tracing::info!("Database migrations applied");

        if self.seed_on_start {
            seed_database(&self.pool, self.offset).await?;
        }
        Ok(())
    }

    async fn load(&self, user_id: Option<Uuid>) -> Result<Vec<MoodEntry>, StoreError> {
        let rows = sqlx::query_as::<_, EntryRow>(
            r#"
            SELECT e.id, e.user_id, e.title, e.content, m.color, m.icon, e.entry_date, e.written_at
            FROM diary_entries e
            JOIN moods m ON m.id = e.mood_id
            WHERE $1::uuid IS NULL OR e.user_id = $1
            ORDER BY e.written_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        tracing::debug!(count = rows.len(), user_id = ?user_id, "Loaded entries");
        Ok(rows.into_iter().map(|r| r.into_entry(self.offset)).collect())
    }

    async fn save(&self, entry: NewEntry) -> Result<MoodEntry, StoreError> {
        let mood_id = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM moods WHERE color = $1 AND icon = $2 ORDER BY sort_order ASC LIMIT 1",
        )
        .bind(&entry.color)
        .bind(&entry.icon)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| StoreError::MoodNotFound {
            color: entry.color.clone(),
            icon: entry.icon.clone(),
        })?;

        // entry_date must be the day in the store's offset or reloads disagree
        let entry = NewEntry {
            timestamp: entry.timestamp.with_timezone(&self.offset),
            ..entry
        };
        let id = Uuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO diary_entries (id, user_id, mood_id, title, content, entry_date, written_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(id)
        .bind(entry.user_id)
        .bind(mood_id)
        .bind(&entry.title)
        .bind(&entry.content)
        .bind(entry.timestamp.date_naive())
        .bind(entry.timestamp.with_timezone(&Utc))
        .execute(&self.pool)
        .await?;

        tracing::info!(entry_id = %id, mood_id = %mood_id, "Saved entry");
        Ok(entry.into_entry(id.to_string()))
    }

    async fn moods(&self) -> Result<Vec<Mood>, StoreError> {
        let moods = sqlx::query_as::<_, Mood>(
            "SELECT id, name, color, icon, sort_order, created_at FROM moods ORDER BY sort_order ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(moods)
    }

    async fn users(&self) -> Result<Vec<User>, StoreError> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, name, email, created_at FROM users ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }

    async fn shutdown(&self) -> Result<(), StoreError> {
        self.pool.close().await;
        Ok(())
    }
}
