use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;

use crate::dto::UserScopeQuery;
use crate::error::{AppError, AppResult};
use crate::models::entry::MoodEntry;
use crate::services::timeline::{calendar_month, entries_on, CalendarMonth};
use crate::store::EntryStore;
use crate::AppState;

pub async fn get_month(
    State(state): State<AppState>,
    Path((year, month)): Path<(i32, u32)>,
    Query(query): Query<UserScopeQuery>,
) -> AppResult<Json<CalendarMonth>> {
    let entries = state.store.load(query.user_id).await?;
    let grid = calendar_month(&entries, year, month)
        .ok_or_else(|| AppError::Validation(format!("Invalid month: {year}-{month}")))?;
    Ok(Json(grid))
}

pub async fn get_day(
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
    Query(query): Query<UserScopeQuery>,
) -> AppResult<Json<Vec<MoodEntry>>> {
    let entries = state.store.load(query.user_id).await?;
    Ok(Json(entries_on(&entries, date)))
}
