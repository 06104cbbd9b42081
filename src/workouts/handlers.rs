use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, post},
    Json, Router,
};
use time::{Duration, OffsetDateTime};
use tracing::instrument;
use uuid::Uuid;

use crate::dates::{day_bounds, parse_ymd, utc_today};
use crate::error::ApiError;
use crate::ident::UserId;
use crate::state::AppState;

use super::dto::{CreateWorkoutRequest, RangeQuery};
use super::repo::{self, Workout};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/workouts", post(create_workout).get(list_workouts))
        .route("/workouts/:id", delete(delete_workout))
}

#[instrument(skip(state, body))]
pub async fn create_workout(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Json(body): Json<CreateWorkoutRequest>,
) -> Result<(StatusCode, Json<Workout>), ApiError> {
    let date = match body.date.as_deref() {
        Some(raw) => {
            let day = parse_ymd(raw)
                .map_err(|_| ApiError::BadRequest("date must be YYYY-MM-DD".into()))?;
            day.midnight().assume_utc()
        }
        None => OffsetDateTime::now_utc(),
    };
    let name = body.name.as_deref().unwrap_or("Workout");

    let workout = repo::create(
        &state.db,
        user_id,
        name,
        date,
        body.duration_min,
        body.notes.as_deref(),
        body.calories_burned,
    )
    .await?;

    state.dashboard_cache.invalidate(user_id);
    Ok((StatusCode::CREATED, Json(workout)))
}

#[instrument(skip(state))]
pub async fn list_workouts(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Query(q): Query<RangeQuery>,
) -> Result<Json<Vec<Workout>>, ApiError> {
    let to = match q.to.as_deref() {
        Some(raw) => parse_ymd(raw)
            .map_err(|_| ApiError::BadRequest("to must be YYYY-MM-DD".into()))?,
        None => utc_today(),
    };
    let from = match q.from.as_deref() {
        Some(raw) => parse_ymd(raw)
            .map_err(|_| ApiError::BadRequest("from must be YYYY-MM-DD".into()))?,
        None => to - Duration::days(30),
    };
    if from > to {
        return Err(ApiError::BadRequest("from must not be after to".into()));
    }

    let start = from.midnight().assume_utc();
    let (_, end) = day_bounds(to);
    let workouts = repo::workouts_in_range(&state.db, user_id, start, end).await?;
    Ok(Json(workouts))
}

#[instrument(skip(state))]
pub async fn delete_workout(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if !repo::delete(&state.db, user_id, id).await? {
        return Err(ApiError::NotFound("Workout not found".into()));
    }
    state.dashboard_cache.invalidate(user_id);
    Ok(StatusCode::NO_CONTENT)
}
