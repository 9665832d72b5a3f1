use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, FixedOffset};

use crate::dto::StatsQuery;
use crate::error::AppResult;
use crate::models::entry::MoodEntry;
use crate::services::stats::{
    color_distribution, most_used_icon, streak_summary, time_of_day_distribution,
    validate_entries, weekly_trend, ColorBucket, IconUsage, StatsReport, StreakSummary,
    TimeSlotBucket, TrendPoint, TREND_DAYS,
};
use crate::store::EntryStore;
use crate::AppState;

/// Loads and validates one snapshot and resolves the reference instant.
async fn snapshot(
    state: &AppState,
    query: &StatsQuery,
) -> AppResult<(Vec<MoodEntry>, DateTime<FixedOffset>)> {
    let entries = state.store.load(query.user_id).await?;
    validate_entries(&entries)?;
    let now = query.now.unwrap_or_else(|| state.config.now());
    Ok((entries, now))
}

pub async fn get_stats(
    State(state): State<AppState>,
    Query(query): Query<StatsQuery>,
) -> AppResult<Json<StatsReport>> {
    let entries = state.store.load(query.user_id).await?;
    let now = query.now.unwrap_or_else(|| state.config.now());

    let report = StatsReport::compute(&entries, now, state.config.label_locale)?;
    tracing::debug!(
        user_id = ?query.user_id,
        entries = report.total_entries,
        current_streak = report.streak.current_streak,
        "Computed stats report"
    );
    Ok(Json(report))
}

pub async fn get_color_distribution(
    State(state): State<AppState>,
    Query(query): Query<StatsQuery>,
) -> AppResult<Json<Vec<ColorBucket>>> {
    let (entries, _) = snapshot(&state, &query).await?;
    Ok(Json(color_distribution(&entries)))
}

pub async fn get_time_of_day(
    State(state): State<AppState>,
    Query(query): Query<StatsQuery>,
) -> AppResult<Json<[TimeSlotBucket; 4]>> {
    let (entries, _) = snapshot(&state, &query).await?;
    Ok(Json(time_of_day_distribution(
        &entries,
        state.config.label_locale,
    )))
}

pub async fn get_weekly_trend(
    State(state): State<AppState>,
    Query(query): Query<StatsQuery>,
) -> AppResult<Json<[TrendPoint; TREND_DAYS]>> {
    let (entries, now) = snapshot(&state, &query).await?;
    Ok(Json(weekly_trend(&entries, now, state.config.label_locale)))
}

pub async fn get_streak(
    State(state): State<AppState>,
    Query(query): Query<StatsQuery>,
) -> AppResult<Json<StreakSummary>> {
    let (entries, now) = snapshot(&state, &query).await?;
    Ok(Json(streak_summary(&entries, now)))
}

pub async fn get_top_icon(
    State(state): State<AppState>,
    Query(query): Query<StatsQuery>,
) -> AppResult<Json<IconUsage>> {
    let (entries, _) = snapshot(&state, &query).await?;
    Ok(Json(most_used_icon(&entries)))
}
