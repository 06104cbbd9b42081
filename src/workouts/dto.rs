use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateWorkoutRequest {
    /// Defaults to "Workout" when omitted.
    pub name: Option<String>,
    /// `YYYY-MM-DD`; defaults to today (UTC).
    pub date: Option<String>,
    pub duration_min: Option<i32>,
    pub notes: Option<String>,
    pub calories_burned: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    /// `YYYY-MM-DD`, inclusive; defaults to 30 days back.
    pub from: Option<String>,
    /// `YYYY-MM-DD`, inclusive; defaults to today (UTC).
    pub to: Option<String>,
}
