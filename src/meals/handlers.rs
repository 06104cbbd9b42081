use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, post},
    Json, Router,
};
use time::OffsetDateTime;
use tracing::instrument;
use uuid::Uuid;

use crate::dates::{day_bounds, parse_ymd, utc_today};
use crate::error::ApiError;
use crate::ident::UserId;
use crate::state::AppState;

use super::dto::{CreateMealRequest, DayQuery, MealsByType};
use super::repo::{self, MealWithItems};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/meals", post(create_meal).get(list_day_meals))
        .route("/meals/items/:id", delete(delete_meal_item))
}

#[instrument(skip(state, body))]
pub async fn create_meal(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Json(body): Json<CreateMealRequest>,
) -> Result<(StatusCode, Json<MealWithItems>), ApiError> {
    if body.items.is_empty() {
        return Err(ApiError::BadRequest("items must be non-empty".into()));
    }
    let date = body.date.unwrap_or_else(OffsetDateTime::now_utc);
    let meal = repo::create_with_items(
        &state.db,
        user_id,
        body.meal_type.as_str(),
        date,
        &body.items,
    )
    .await?;

    state.dashboard_cache.invalidate(user_id);
    Ok((StatusCode::CREATED, Json(meal)))
}

#[instrument(skip(state))]
pub async fn list_day_meals(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Query(q): Query<DayQuery>,
) -> Result<Json<MealsByType>, ApiError> {
    let day = match q.date.as_deref() {
        Some(raw) => parse_ymd(raw)
            .map_err(|_| ApiError::BadRequest("date must be YYYY-MM-DD".into()))?,
        None => utc_today(),
    };
    let (start, end) = day_bounds(day);
    let meals = repo::meals_in_range(&state.db, user_id, start, end).await?;
    Ok(Json(MealsByType::group(meals)))
}

#[instrument(skip(state))]
pub async fn delete_meal_item(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if !repo::delete_item(&state.db, user_id, id).await? {
        return Err(ApiError::NotFound("Meal item not found".into()));
    }
    state.dashboard_cache.invalidate(user_id);
    Ok(StatusCode::NO_CONTENT)
}
