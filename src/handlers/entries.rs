use axum::{
    extract::{Path, Query, State},
    Json,
};
use validator::Validate;

use crate::dto::{CreateEntryRequest, TimelineQuery, TimelineResponse, UserScopeQuery};
use crate::error::{AppError, AppResult};
use crate::models::entry::MoodEntry;
use crate::services::timeline::{filter_timeline, unique_colors};
use crate::store::EntryStore;
use crate::AppState;

pub async fn list_entries(
    State(state): State<AppState>,
    Query(query): Query<TimelineQuery>,
) -> AppResult<Json<TimelineResponse>> {
    let entries = state.store.load(query.user_id).await?;
    let entries = filter_timeline(&entries, &query.filter());

    Ok(Json(TimelineResponse {
        total: entries.len(),
        entries,
    }))
}

pub async fn get_entry(
    State(state): State<AppState>,
    Path(entry_id): Path<String>,
) -> AppResult<Json<MoodEntry>> {
    let entry = state
        .store
        .load(None)
        .await?
        .into_iter()
        .find(|e| e.id == entry_id)
        .ok_or(AppError::NotFound("Entry not found".into()))?;

    Ok(Json(entry))
}

pub async fn list_colors(
    State(state): State<AppState>,
    Query(query): Query<UserScopeQuery>,
) -> AppResult<Json<Vec<String>>> {
    let entries = state.store.load(query.user_id).await?;
    Ok(Json(unique_colors(&entries)))
}

pub async fn create_entry(
    State(state): State<AppState>,
    Json(body): Json<CreateEntryRequest>,
) -> AppResult<Json<MoodEntry>> {
    let body = body.normalized();
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let new_entry = body.into_new_entry(state.config.now());
    let entry = state.store.save(new_entry).await?;

    // Broadcast via WebSocket so open dashboards refresh their stats
    if let Some(tx) = state.ws_tx.as_ref() {
        let msg = serde_json::json!({
            "type": "entry_created",
            "user_id": entry.user_id,
            "entry_id": entry.id,
            "date": entry.date,
        });
        let _ = tx.send(msg.to_string());
    }

    Ok(Json(entry))
}
