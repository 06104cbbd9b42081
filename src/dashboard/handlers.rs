use axum::{extract::State, routing::get, Json, Router};
use tracing::instrument;

use crate::dates::utc_today;
use crate::error::ApiError;
use crate::ident::UserId;
use crate::state::AppState;

use super::aggregate::DashboardSummary;
use super::services;

pub fn routes() -> Router<AppState> {
    Router::new().route("/dashboard", get(get_dashboard))
}

#[instrument(skip(state))]
pub async fn get_dashboard(
    State(state): State<AppState>,
    UserId(user_id): UserId,
) -> Result<Json<DashboardSummary>, ApiError> {
    let summary = services::get_dashboard(&state, user_id, utc_today()).await?;
    Ok(Json(summary))
}
