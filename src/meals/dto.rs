use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::repo::MealWithItems;

/// Meal slot, mirroring the four sections of the food log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
            Self::Snack => "snack",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewMealItem {
    pub name: String,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fat: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct CreateMealRequest {
    pub meal_type: MealType,
    /// Defaults to now when omitted.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub date: Option<OffsetDateTime>,
    pub items: Vec<NewMealItem>,
}

#[derive(Debug, Deserialize)]
pub struct DayQuery {
    /// `YYYY-MM-DD`; defaults to the current UTC day.
    pub date: Option<String>,
}

/// A day's meals grouped by slot, the shape the food page renders.
#[derive(Debug, Default, Serialize)]
pub struct MealsByType {
    pub breakfast: Vec<MealWithItems>,
    pub lunch: Vec<MealWithItems>,
    pub dinner: Vec<MealWithItems>,
    pub snack: Vec<MealWithItems>,
}

impl MealsByType {
    pub fn group(meals: Vec<MealWithItems>) -> Self {
        let mut out = Self::default();
        for m in meals {
            match m.meal.meal_type.as_str() {
                "breakfast" => out.breakfast.push(m),
                "lunch" => out.lunch.push(m),
                "dinner" => out.dinner.push(m),
                _ => out.snack.push(m),
            }
        }
        out
    }
}
