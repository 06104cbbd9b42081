use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Workout {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub date: OffsetDateTime,
    pub duration_min: Option<i32>,
    pub notes: Option<String>,
    pub calories_burned: Option<f64>,
    pub created_at: OffsetDateTime,
}

pub async fn create(
    db: &PgPool,
    user_id: Uuid,
    name: &str,
    date: OffsetDateTime,
    duration_min: Option<i32>,
    notes: Option<&str>,
    calories_burned: Option<f64>,
) -> anyhow::Result<Workout> {
    let workout = sqlx::query_as::<_, Workout>(
        r#"
        INSERT INTO workouts (id, user_id, name, date, duration_min, notes, calories_burned)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, user_id, name, date, duration_min, notes, calories_burned, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(name)
    .bind(date)
    .bind(duration_min)
    .bind(notes)
    .bind(calories_burned)
    .fetch_one(db)
    .await?;
    Ok(workout)
}

/// The `workouts_in_range` accessor over `[start, end)`.
pub async fn workouts_in_range(
    db: &PgPool,
    user_id: Uuid,
    start: OffsetDateTime,
    end: OffsetDateTime,
) -> anyhow::Result<Vec<Workout>> {
    let rows = sqlx::query_as::<_, Workout>(
        r#"
        SELECT id, user_id, name, date, duration_min, notes, calories_burned, created_at
        FROM workouts
        WHERE user_id = $1 AND date >= $2 AND date < $3
        ORDER BY date DESC
        "#,
    )
    .bind(user_id)
    .bind(start)
    .bind(end)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn delete(db: &PgPool, user_id: Uuid, workout_id: Uuid) -> anyhow::Result<bool> {
    let result = sqlx::query("DELETE FROM workouts WHERE id = $1 AND user_id = $2")
        .bind(workout_id)
        .bind(user_id)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}
