use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::models::icon::resolve_icon;
use crate::models::mood::MoodResponse;
use crate::store::EntryStore;
use crate::AppState;

pub async fn list_moods(State(state): State<AppState>) -> AppResult<Json<Vec<MoodResponse>>> {
    let mut moods = state.store.moods().await?;
    moods.sort_by_key(|m| m.order);

    for mood in moods.iter().filter(|m| resolve_icon(&m.icon).is_fallback()) {
        tracing::warn!(mood = %mood.name, icon = %mood.icon, "Mood icon not registered, using default");
    }

    Ok(Json(moods.into_iter().map(MoodResponse::from).collect()))
}
