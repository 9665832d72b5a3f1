use chrono::{DateTime, Days, FixedOffset, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::entry::MoodEntry;
use crate::models::mood::DEFAULT_PALETTE;

/// Ids of built-in sample entries start with this; they are never persisted.
pub const MOCK_ID_PREFIX: &str = "mock-";

pub fn is_mock(entry: &MoodEntry) -> bool {
    entry.id.starts_with(MOCK_ID_PREFIX)
}

/// Local time `hour:00` on `date` in `offset`.
fn local_at(date: NaiveDate, hour: u32, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    date.and_hms_opt(hour, 0, 0)?
        .and_local_timezone(offset)
        .single()
}

/// Three sample entries written yesterday and the day before, relative to
/// `now`.
pub fn mock_entries(now: DateTime<FixedOffset>) -> Vec<MoodEntry> {
    let offset = *now.offset();
    let today = now.date_naive();
    let samples = [
        (1, 1, 10, "楽しい一日", "友達と遊んで、とても楽しい時間を過ごしました。", "#FFD700", "Sun"),
        (2, 1, 14, "静かな午後", "雨の音を聞きながら読書をしました。", "#87CEEB", "Cloud"),
        (3, 2, 9, "新しい挑戦", "新しいプロジェクトを始めました。", "#FF6B6B", "Zap"),
    ];

    samples
        .into_iter()
        .filter_map(|(n, days_ago, hour, title, content, color, icon)| {
            let date = today.checked_sub_days(Days::new(days_ago))?;
            let timestamp = local_at(date, hour, offset)?;
            Some(MoodEntry {
                id: format!("{MOCK_ID_PREFIX}{n}"),
                user_id: None,
                title: title.to_string(),
                content: content.to_string(),
                color: color.to_string(),
                icon: icon.to_string(),
                date,
                timestamp,
            })
        })
        .collect()
}

const SEED_USERS: [(&str, &str); 2] = [
    ("田中太郎", "tanaka@example.com"),
    ("佐藤花子", "sato@example.com"),
];

/// (user index, day of October 2025, mood name, content)
const SEED_DIARY: [(usize, u32, &str, &str); 12] = [
    (0, 8, "自然", "朝日を浴びながら散歩した。小鳥のさえずりが心地よい。"),
    (0, 9, "活力", "新しいプロジェクトがスタート。やる気が湧いてくる！"),
    (0, 10, "幸せ", "プロジェクトが無事完了。達成感で心が満たされている。"),
    (0, 11, "神秘", "美術館で不思議な絵画に出会った。"),
    (0, 12, "穏やか", "ゆっくりお茶を飲みながら読書。"),
    (0, 13, "憂鬱", "バグ修正に追われた。気持ちが沈んでいる..."),
    (1, 8, "愛情", "家族と久しぶりに電話。温かい気持ちになった。"),
    (1, 9, "情熱", "新しい挑戦を決意した！"),
    (1, 10, "穏やか", "カフェで友達とゆっくり話せた。"),
    (1, 11, "活力", "ジムで久々に運動。体を動かすと元気が出る！"),
    (1, 12, "憂鬱", "仕事でミスをしてしまった。"),
    (1, 13, "自然", "夕焼けがとても綺麗だった。"),
];

/// Replaces all data with the demo users, the default mood palette and a
/// week of diary entries. Runs in one transaction.
pub async fn seed_database(pool: &PgPool, offset: FixedOffset) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM diary_entries").execute(&mut *tx).await?;
    sqlx::query("DELETE FROM moods").execute(&mut *tx).await?;
    sqlx::query("DELETE FROM users").execute(&mut *tx).await?;

    let mut user_ids = Vec::with_capacity(SEED_USERS.len());
    for (name, email) in SEED_USERS {
        let id = Uuid::new_v4();
        sqlx::query("INSERT INTO users (id, name, email) VALUES ($1, $2, $3)")
            .bind(id)
            .bind(name)
            .bind(email)
            .execute(&mut *tx)
            .await?;
        user_ids.push(id);
    }

    let mut mood_ids = Vec::with_capacity(DEFAULT_PALETTE.len());
    for ((name, color, icon), order) in DEFAULT_PALETTE.into_iter().zip(0i32..) {
        let id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO moods (id, name, color, icon, sort_order) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(id)
        .bind(name)
        .bind(color)
        .bind(icon)
        .bind(order)
        .execute(&mut *tx)
        .await?;
        mood_ids.push((name, id));
    }

    let mut inserted = 0usize;
    for (user, day, mood_name, content) in SEED_DIARY {
        let Some(date) = NaiveDate::from_ymd_opt(2025, 10, day) else {
            continue;
        };
        let Some(written_at) = local_at(date, 21, offset) else {
            continue;
        };
        let Some(&(_, mood_id)) = mood_ids.iter().find(|(name, _)| *name == mood_name) else {
            continue;
        };

        sqlx::query(
            r#"
            INSERT INTO diary_entries (id, user_id, mood_id, title, content, entry_date, written_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_ids[user])
        .bind(mood_id)
        .bind(mood_name)
        .bind(content)
        .bind(date)
        .bind(written_at.with_timezone(&Utc))
        .execute(&mut *tx)
        .await?;
        inserted += 1;
    }

    tx.commit().await?;

    tracing::info!(
        users = user_ids.len(),
        moods = mood_ids.len(),
        entries = inserted,
        "Seeded database"
    );
    Ok(())
}
