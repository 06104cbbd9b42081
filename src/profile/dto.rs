use serde::Deserialize;

use crate::nutrition::Biometrics;

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub age: Option<i32>,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub gender: Option<String>,
    pub activity_level: Option<String>,
    pub goal: Option<String>,
}

impl UpdateProfileRequest {
    pub fn into_biometrics(self) -> Biometrics {
        Biometrics {
            gender: self.gender,
            weight_kg: self.weight_kg,
            height_cm: self.height_cm,
            age: self.age,
            activity_level: self.activity_level,
            goal: self.goal,
        }
    }
}
