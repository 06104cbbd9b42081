use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use super::dto::NewMealItem;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Meal {
    pub id: Uuid,
    pub user_id: Uuid,
    pub meal_type: String,
    pub date: OffsetDateTime,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct MealItem {
    pub id: Uuid,
    pub meal_id: Uuid,
    pub name: String,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fat: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MealWithItems {
    #[serde(flatten)]
    pub meal: Meal,
    pub items: Vec<MealItem>,
}

/// Inserts a meal and its items in one transaction.
pub async fn create_with_items(
    db: &PgPool,
    user_id: Uuid,
    meal_type: &str,
    date: OffsetDateTime,
    items: &[NewMealItem],
) -> anyhow::Result<MealWithItems> {
    let mut tx = db.begin().await?;

    let meal = sqlx::query_as::<_, Meal>(
        r#"
        INSERT INTO meals (id, user_id, meal_type, date)
        VALUES ($1, $2, $3, $4)
        RETURNING id, user_id, meal_type, date, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(meal_type)
    .bind(date)
    .fetch_one(&mut *tx)
    .await?;

    let mut saved = Vec::with_capacity(items.len());
    for item in items {
        let row = sqlx::query_as::<_, MealItem>(
            r#"
            INSERT INTO meal_items (id, meal_id, name, quantity, unit, calories, protein, carbs, fat)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, meal_id, name, quantity, unit, calories, protein, carbs, fat
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(meal.id)
        .bind(&item.name)
        .bind(item.quantity)
        .bind(&item.unit)
        .bind(item.calories)
        .bind(item.protein)
        .bind(item.carbs)
        .bind(item.fat)
        .fetch_one(&mut *tx)
        .await?;
        saved.push(row);
    }

    tx.commit().await?;
    Ok(MealWithItems { meal, items: saved })
}

/// The `meals_in_range` accessor: meals whose date falls in `[start, end)`,
/// items attached, ordered by creation time.
pub async fn meals_in_range(
    db: &PgPool,
    user_id: Uuid,
    start: OffsetDateTime,
    end: OffsetDateTime,
) -> anyhow::Result<Vec<MealWithItems>> {
    let meals = sqlx::query_as::<_, Meal>(
        r#"
        SELECT id, user_id, meal_type, date, created_at
        FROM meals
        WHERE user_id = $1 AND date >= $2 AND date < $3
        ORDER BY created_at ASC
        "#,
    )
    .bind(user_id)
    .bind(start)
    .bind(end)
    .fetch_all(db)
    .await?;

    if meals.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<Uuid> = meals.iter().map(|m| m.id).collect();
    let items = sqlx::query_as::<_, MealItem>(
        r#"
        SELECT id, meal_id, name, quantity, unit, calories, protein, carbs, fat
        FROM meal_items
        WHERE meal_id = ANY($1)
        "#,
    )
    .bind(&ids)
    .fetch_all(db)
    .await?;

    let mut out: Vec<MealWithItems> = meals
        .into_iter()
        .map(|meal| MealWithItems {
            meal,
            items: Vec::new(),
        })
        .collect();
    for item in items {
        if let Some(holder) = out.iter_mut().find(|m| m.meal.id == item.meal_id) {
            holder.items.push(item);
        }
    }
    Ok(out)
}

/// Deletes a single item, scoped through its meal to the owning user.
/// Returns false when nothing matched.
pub async fn delete_item(db: &PgPool, user_id: Uuid, item_id: Uuid) -> anyhow::Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM meal_items
        USING meals
        WHERE meal_items.id = $1
          AND meals.id = meal_items.meal_id
          AND meals.user_id = $2
        "#,
    )
    .bind(item_id)
    .bind(user_id)
    .execute(db)
    .await?;
    Ok(result.rows_affected() > 0)
}
