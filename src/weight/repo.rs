use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::Date;
use uuid::Uuid;

/// One weight reading per user and calendar day (UTC). Re-logging a day
/// overwrites the earlier value.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct WeightLog {
    pub user_id: Uuid,
    pub date: Date,
    pub weight_kg: f64,
}

pub async fn upsert(
    db: &PgPool,
    user_id: Uuid,
    date: Date,
    weight_kg: f64,
) -> anyhow::Result<WeightLog> {
    let log = sqlx::query_as::<_, WeightLog>(
        r#"
        INSERT INTO weight_logs (user_id, date, weight_kg)
        VALUES ($1, $2, $3)
        ON CONFLICT (user_id, date) DO UPDATE SET weight_kg = EXCLUDED.weight_kg
        RETURNING user_id, date, weight_kg
        "#,
    )
    .bind(user_id)
    .bind(date)
    .bind(weight_kg)
    .fetch_one(db)
    .await?;
    Ok(log)
}

/// Full history, oldest first, the order the weight chart consumes.
pub async fn list(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<WeightLog>> {
    let rows = sqlx::query_as::<_, WeightLog>(
        r#"
        SELECT user_id, date, weight_kg
        FROM weight_logs
        WHERE user_id = $1
        ORDER BY date ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}
