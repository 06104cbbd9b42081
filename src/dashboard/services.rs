use time::{Date, Duration};
use tracing::debug;
use uuid::Uuid;

use crate::dates::{day_bounds, trailing_bounds};
use crate::meals::repo::{meals_in_range, MealWithItems};
use crate::profile::services::ensure_targets;
use crate::state::AppState;
use crate::workouts::repo::{workouts_in_range, Workout};

use super::aggregate::{
    self, AggregateInput, DashboardSummary, ItemMacros, MealEntry, WorkoutEntry,
    STREAK_WINDOW_DAYS, TREND_SERIES_DAYS,
};

fn meal_entries(meals: Vec<MealWithItems>) -> Vec<MealEntry> {
    meals
        .into_iter()
        .map(|m| MealEntry {
            at: m.meal.date,
            items: m
                .items
                .iter()
                .map(|i| ItemMacros {
                    calories: i.calories,
                    protein: i.protein,
                })
                .collect(),
        })
        .collect()
}

fn workout_entries(workouts: Vec<Workout>) -> Vec<WorkoutEntry> {
    workouts
        .into_iter()
        .map(|w| WorkoutEntry {
            at: w.date,
            calories_burned: w.calories_burned,
        })
        .collect()
}

/// One dashboard load: ensure targets exist, fan out the independent range
/// queries, then aggregate locally. A cached summary short-circuits all of
/// it while its TTL lasts.
pub async fn get_dashboard(
    state: &AppState,
    user_id: Uuid,
    today: Date,
) -> anyhow::Result<DashboardSummary> {
    if let Some(cached) = state.dashboard_cache.get(user_id) {
        debug!(%user_id, "dashboard cache hit");
        return Ok(cached);
    }

    let profile = ensure_targets(&state.db, user_id).await?;
    let target_calories = profile.target_calories.unwrap_or(0);
    let target_protein = profile.target_protein.unwrap_or(0);

    let db = &state.db;
    let (today_start, today_end) = day_bounds(today);
    let (y_start, y_end) = day_bounds(today - Duration::days(1));
    let (week_start, week_end) = trailing_bounds(today, TREND_SERIES_DAYS - 1);
    let (range_start, range_end) = trailing_bounds(today, STREAK_WINDOW_DAYS);

    // no data dependencies between these; run them concurrently
    let (
        today_meals,
        today_workouts,
        yesterday_meals,
        yesterday_workouts,
        week_workouts,
        range_meals,
        range_workouts,
    ) = tokio::try_join!(
        meals_in_range(db, user_id, today_start, today_end),
        workouts_in_range(db, user_id, today_start, today_end),
        meals_in_range(db, user_id, y_start, y_end),
        workouts_in_range(db, user_id, y_start, y_end),
        workouts_in_range(db, user_id, week_start, week_end),
        meals_in_range(db, user_id, range_start, range_end),
        workouts_in_range(db, user_id, range_start, range_end),
    )?;

    let input = AggregateInput {
        target_calories,
        target_protein,
        today_meals: meal_entries(today_meals),
        today_workouts: workout_entries(today_workouts),
        yesterday_meals: meal_entries(yesterday_meals),
        yesterday_workouts: workout_entries(yesterday_workouts),
        week_workouts: workout_entries(week_workouts),
        range_meals: meal_entries(range_meals),
        range_workouts: workout_entries(range_workouts),
    };

    let summary = aggregate::build_summary(today, &input);
    state.dashboard_cache.insert(user_id, summary.clone());
    Ok(summary)
}
