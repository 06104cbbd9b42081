use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::nutrition::{Biometrics, Targets};

/// One row per user. The five derived fields (tdee through target_carbs)
/// are nullable as a unit: written together by `save_targets`, cleared
/// together by `clear_targets`.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Profile {
    pub user_id: Uuid,
    pub age: Option<i32>,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub gender: Option<String>,
    pub activity_level: Option<String>,
    pub goal: Option<String>,
    pub tdee: Option<i32>,
    pub target_calories: Option<i32>,
    pub target_protein: Option<i32>,
    pub target_fat: Option<i32>,
    pub target_carbs: Option<i32>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl Profile {
    pub fn biometrics(&self) -> Biometrics {
        Biometrics {
            gender: self.gender.clone(),
            weight_kg: self.weight_kg,
            height_cm: self.height_cm,
            age: self.age,
            activity_level: self.activity_level.clone(),
            goal: self.goal.clone(),
        }
    }

    pub fn has_targets(&self) -> bool {
        self.tdee.is_some()
            && self.target_calories.is_some()
            && self.target_protein.is_some()
            && self.target_fat.is_some()
            && self.target_carbs.is_some()
    }
}

const PROFILE_COLUMNS: &str = "user_id, age, weight_kg, height_cm, gender, activity_level, goal, \
     tdee, target_calories, target_protein, target_fat, target_carbs, created_at, updated_at";

/// Creates an empty profile if none exists and returns the row either way.
pub async fn find_or_create(db: &PgPool, user_id: Uuid) -> anyhow::Result<Profile> {
    let profile = sqlx::query_as::<_, Profile>(&format!(
        r#"
        INSERT INTO profiles (user_id)
        VALUES ($1)
        ON CONFLICT (user_id) DO UPDATE SET user_id = EXCLUDED.user_id
        RETURNING {PROFILE_COLUMNS}
        "#
    ))
    .bind(user_id)
    .fetch_one(db)
    .await?;
    Ok(profile)
}

/// Upserts the biometric fields. Derived targets are untouched here; the
/// caller clears them so the next read recomputes lazily.
pub async fn upsert_biometrics(
    db: &PgPool,
    user_id: Uuid,
    b: &Biometrics,
) -> anyhow::Result<Profile> {
    let profile = sqlx::query_as::<_, Profile>(&format!(
        r#"
        INSERT INTO profiles (user_id, age, weight_kg, height_cm, gender, activity_level, goal)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        ON CONFLICT (user_id) DO UPDATE SET
            age = EXCLUDED.age,
            weight_kg = EXCLUDED.weight_kg,
            height_cm = EXCLUDED.height_cm,
            gender = EXCLUDED.gender,
            activity_level = EXCLUDED.activity_level,
            goal = EXCLUDED.goal,
            updated_at = now()
        RETURNING {PROFILE_COLUMNS}
        "#
    ))
    .bind(user_id)
    .bind(b.age)
    .bind(b.weight_kg)
    .bind(b.height_cm)
    .bind(&b.gender)
    .bind(&b.activity_level)
    .bind(&b.goal)
    .fetch_one(db)
    .await?;
    Ok(profile)
}

/// Persists a derived target set in one UPDATE.
pub async fn save_targets(db: &PgPool, user_id: Uuid, t: &Targets) -> anyhow::Result<Profile> {
    let profile = sqlx::query_as::<_, Profile>(&format!(
        r#"
        UPDATE profiles SET
            tdee = $2,
            target_calories = $3,
            target_protein = $4,
            target_fat = $5,
            target_carbs = $6,
            updated_at = now()
        WHERE user_id = $1
        RETURNING {PROFILE_COLUMNS}
        "#
    ))
    .bind(user_id)
    .bind(t.tdee)
    .bind(t.calories)
    .bind(t.protein_g)
    .bind(t.fat_g)
    .bind(t.carbs_g)
    .fetch_one(db)
    .await?;
    Ok(profile)
}

/// Nulls all five derived fields in one UPDATE.
pub async fn clear_targets(db: &PgPool, user_id: Uuid) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        UPDATE profiles SET
            tdee = NULL,
            target_calories = NULL,
            target_protein = NULL,
            target_fat = NULL,
            target_carbs = NULL,
            updated_at = now()
        WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .execute(db)
    .await?;
    Ok(())
}
