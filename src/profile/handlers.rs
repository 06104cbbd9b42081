use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use tracing::instrument;

use crate::error::ApiError;
use crate::ident::UserId;
use crate::state::AppState;

use super::dto::UpdateProfileRequest;
use super::repo::Profile;
use super::services;

pub fn routes() -> Router<AppState> {
    Router::new().route("/profile", get(get_profile).put(update_profile))
}

#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    UserId(user_id): UserId,
) -> Result<Json<Profile>, ApiError> {
    let profile = services::ensure_targets(&state.db, user_id).await?;
    Ok(Json(profile))
}

#[instrument(skip(state, body))]
pub async fn update_profile(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Json(body): Json<UpdateProfileRequest>,
) -> Result<Json<Profile>, ApiError> {
    if let Some(age) = body.age {
        if age <= 0 {
            return Err(ApiError::BadRequest("age must be positive".into()));
        }
    }
    if matches!(body.weight_kg, Some(w) if w <= 0.0) {
        return Err(ApiError::BadRequest("weight_kg must be positive".into()));
    }
    if matches!(body.height_cm, Some(h) if h <= 0.0) {
        return Err(ApiError::BadRequest("height_cm must be positive".into()));
    }

    let profile =
        services::update_biometrics(&state.db, user_id, &body.into_biometrics()).await?;

    // the cached summary was computed against the old targets
    state.dashboard_cache.invalidate(user_id);
    Ok(Json(profile))
}
