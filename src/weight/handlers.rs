use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::instrument;

use crate::dates::parse_ymd;
use crate::error::ApiError;
use crate::ident::UserId;
use crate::state::AppState;

use super::repo::{self, WeightLog};

#[derive(Debug, Deserialize)]
pub struct PutWeightRequest {
    /// `YYYY-MM-DD`
    pub date: String,
    pub weight_kg: f64,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/weight", get(list_weight).put(put_weight))
}

#[instrument(skip(state, body))]
pub async fn put_weight(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Json(body): Json<PutWeightRequest>,
) -> Result<Json<WeightLog>, ApiError> {
    let date = parse_ymd(&body.date)
        .map_err(|_| ApiError::BadRequest("date must be YYYY-MM-DD".into()))?;
    if !body.weight_kg.is_finite() || body.weight_kg <= 0.0 {
        return Err(ApiError::BadRequest("weight_kg must be positive".into()));
    }

    let log = repo::upsert(&state.db, user_id, date, body.weight_kg).await?;
    Ok(Json(log))
}

#[instrument(skip(state))]
pub async fn list_weight(
    State(state): State<AppState>,
    UserId(user_id): UserId,
) -> Result<Json<Vec<WeightLog>>, ApiError> {
    let logs = repo::list(&state.db, user_id).await?;
    Ok(Json(logs))
}
