use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::user::{User, UserEmailQuery};
use crate::store::EntryStore;
use crate::AppState;

pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<User>>> {
    Ok(Json(state.store.users().await?))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<User>> {
    state
        .store
        .users()
        .await?
        .into_iter()
        .find(|u| u.id == user_id)
        .map(Json)
        .ok_or(AppError::NotFound("User not found".into()))
}

pub async fn find_user_by_email(
    State(state): State<AppState>,
    Query(query): Query<UserEmailQuery>,
) -> AppResult<Json<User>> {
    state
        .store
        .users()
        .await?
        .into_iter()
        .find(|u| u.email.eq_ignore_ascii_case(query.email.trim()))
        .map(Json)
        .ok_or(AppError::NotFound("User not found".into()))
}
