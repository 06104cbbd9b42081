use serde::{Deserialize, Serialize};

/// Canonical training goal. Incoming profile strings are free-form and get
/// normalized through [`Goal::normalize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Goal {
    Lose,
    Maintain,
    Gain,
}

impl Goal {
    /// Maps the many goal spellings seen in profiles onto a canonical goal.
    /// Unknown or absent values fall back to `Maintain`.
    pub fn normalize(raw: Option<&str>) -> Self {
        let g = raw.unwrap_or_default().to_lowercase();
        match g.as_str() {
            "lose" | "lose_weight" | "cut" | "fat_loss" | "weight_loss" | "shred" | "cutting" => {
                Self::Lose
            }
            "gain" | "gain_weight" | "bulk" | "build_muscle" | "muscle_gain" | "mass" => Self::Gain,
            _ => Self::Maintain,
        }
    }
}

/// Biometric inputs for target derivation. Every field is optional; targets
/// are only derivable when gender, weight, height and age are all present.
#[derive(Debug, Clone, Default)]
pub struct Biometrics {
    pub gender: Option<String>,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub age: Option<i32>,
    pub activity_level: Option<String>,
    pub goal: Option<String>,
}

/// Daily nutrition targets, derived as a unit: either all fields are
/// computed or none are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Targets {
    pub tdee: i32,
    pub calories: i32,
    pub protein_g: i32,
    pub fat_g: i32,
    pub carbs_g: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacroSplit {
    pub fat_g: i32,
    pub carbs_g: i32,
}

/// Mifflin-St Jeor basal metabolic rate.
///
/// `10w + 6.25h − 5a` plus a gender offset: +5 for male, −161 for female,
/// −78 (the midpoint) for anything else. Returns `None` when any required
/// field is missing or non-positive.
pub fn mifflin_st_jeor_bmr(
    gender: Option<&str>,
    weight_kg: Option<f64>,
    height_cm: Option<f64>,
    age: Option<i32>,
) -> Option<f64> {
    let gender = gender.filter(|g| !g.is_empty())?;
    let weight = weight_kg.filter(|w| w.is_finite() && *w > 0.0)?;
    let height = height_cm.filter(|h| h.is_finite() && *h > 0.0)?;
    let age = age?;

    let base = 10.0 * weight + 6.25 * height - 5.0 * f64::from(age);
    let offset = match gender.to_lowercase().as_str() {
        "male" => 5.0,
        "female" => -161.0,
        _ => -78.0,
    };
    Some(base + offset)
}

/// Activity multiplier over BMR. Unknown levels default to lightly active.
pub fn activity_multiplier(level: Option<&str>) -> f64 {
    match level.unwrap_or_default().to_lowercase().as_str() {
        "sedentary" => 1.2,
        "light" | "lightly_active" => 1.375,
        "moderate" | "moderately_active" => 1.55,
        "active" => 1.725,
        "very_active" => 1.9,
        _ => 1.375,
    }
}

/// Goal-adjusted calorie target: 20% deficit to lose, 10% surplus to gain.
pub fn adjust_for_goal(tdee: f64, goal: Option<&str>) -> i32 {
    match Goal::normalize(goal) {
        Goal::Lose => (tdee * 0.8).round() as i32,
        Goal::Gain => (tdee * 1.1).round() as i32,
        Goal::Maintain => tdee.round() as i32,
    }
}

/// Protein target in grams: per-kg coefficient depends on the goal
/// (2.0 lose, 1.6 gain, 1.8 maintain). `None` without a usable weight.
pub fn protein_grams(weight_kg: Option<f64>, goal: Option<&str>) -> Option<i32> {
    let weight = weight_kg.filter(|w| w.is_finite() && *w > 0.0)?;
    let per_kg = match Goal::normalize(goal) {
        Goal::Lose => 2.0,
        Goal::Gain => 1.6,
        Goal::Maintain => 1.8,
    };
    Some((weight * per_kg).round() as i32)
}

/// Fat/carb split of the calories left after protein. Fat takes 25% of the
/// target; carb calories are clamped at zero so a large protein target can
/// never imply negative carbs.
pub fn macro_split(target_calories: i32, protein_g: i32) -> MacroSplit {
    let protein_cals = f64::from(protein_g) * 4.0;
    let fat_cals = (f64::from(target_calories) * 0.25).round();
    let carb_cals = (f64::from(target_calories) - protein_cals - fat_cals).max(0.0);
    MacroSplit {
        fat_g: (fat_cals / 9.0).round() as i32,
        carbs_g: (carb_cals / 4.0).round() as i32,
    }
}

/// Derives the full target set from a profile's biometrics, or `None` when
/// they are insufficient. Targets are computed as one unit; there is no
/// partially-derived result.
pub fn derive_targets(b: &Biometrics) -> Option<Targets> {
    let bmr = mifflin_st_jeor_bmr(
        b.gender.as_deref(),
        b.weight_kg,
        b.height_cm,
        b.age,
    )?;
    let tdee = (bmr * activity_multiplier(b.activity_level.as_deref())).round() as i32;
    let calories = adjust_for_goal(f64::from(tdee), b.goal.as_deref());
    // BMR already required weight, so protein is always derivable here.
    let protein_g = protein_grams(b.weight_kg, b.goal.as_deref())?;
    let MacroSplit { fat_g, carbs_g } = macro_split(calories, protein_g);
    Some(Targets {
        tdee,
        calories,
        protein_g,
        fat_g,
        carbs_g,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_biometrics() -> Biometrics {
        Biometrics {
            gender: Some("male".into()),
            weight_kg: Some(80.0),
            height_cm: Some(180.0),
            age: Some(30),
            activity_level: Some("moderate".into()),
            goal: Some("cut".into()),
        }
    }

    #[test]
    fn bmr_matches_formula_for_each_gender() {
        let base = 10.0 * 80.0 + 6.25 * 180.0 - 5.0 * 30.0;
        assert_eq!(
            mifflin_st_jeor_bmr(Some("male"), Some(80.0), Some(180.0), Some(30)),
            Some(base + 5.0)
        );
        assert_eq!(
            mifflin_st_jeor_bmr(Some("Female"), Some(80.0), Some(180.0), Some(30)),
            Some(base - 161.0)
        );
        assert_eq!(
            mifflin_st_jeor_bmr(Some("other"), Some(80.0), Some(180.0), Some(30)),
            Some(base - 78.0)
        );
    }

    #[test]
    fn bmr_is_none_when_any_field_is_missing() {
        assert_eq!(mifflin_st_jeor_bmr(None, Some(80.0), Some(180.0), Some(30)), None);
        assert_eq!(mifflin_st_jeor_bmr(Some("male"), None, Some(180.0), Some(30)), None);
        assert_eq!(mifflin_st_jeor_bmr(Some("male"), Some(80.0), None, Some(30)), None);
        assert_eq!(mifflin_st_jeor_bmr(Some("male"), Some(80.0), Some(180.0), None), None);
        // zero weight/height behave like missing values
        assert_eq!(mifflin_st_jeor_bmr(Some("male"), Some(0.0), Some(180.0), Some(30)), None);
        assert_eq!(mifflin_st_jeor_bmr(Some(""), Some(80.0), Some(180.0), Some(30)), None);
    }

    #[test]
    fn activity_multiplier_table_and_default() {
        assert_eq!(activity_multiplier(Some("sedentary")), 1.2);
        assert_eq!(activity_multiplier(Some("light")), 1.375);
        assert_eq!(activity_multiplier(Some("lightly_active")), 1.375);
        assert_eq!(activity_multiplier(Some("moderate")), 1.55);
        assert_eq!(activity_multiplier(Some("moderately_active")), 1.55);
        assert_eq!(activity_multiplier(Some("active")), 1.725);
        assert_eq!(activity_multiplier(Some("very_active")), 1.9);
        assert_eq!(activity_multiplier(Some("couch_potato")), 1.375);
        assert_eq!(activity_multiplier(None), 1.375);
    }

    #[test]
    fn goal_normalization_recognizes_synonyms() {
        for g in ["lose", "lose_weight", "cut", "fat_loss", "weight_loss", "shred", "cutting"] {
            assert_eq!(Goal::normalize(Some(g)), Goal::Lose, "{g}");
        }
        for g in ["gain", "gain_weight", "bulk", "build_muscle", "muscle_gain", "mass"] {
            assert_eq!(Goal::normalize(Some(g)), Goal::Gain, "{g}");
        }
        assert_eq!(Goal::normalize(Some("BULK")), Goal::Gain);
        assert_eq!(Goal::normalize(Some("whatever")), Goal::Maintain);
        assert_eq!(Goal::normalize(None), Goal::Maintain);
    }

    #[test]
    fn goal_adjustment_scales_tdee() {
        assert_eq!(adjust_for_goal(2500.0, Some("cut")), 2000);
        assert_eq!(adjust_for_goal(2500.0, Some("bulk")), 2750);
        assert_eq!(adjust_for_goal(2500.0, Some("anything_else")), 2500);
        assert_eq!(adjust_for_goal(2500.0, None), 2500);
    }

    #[test]
    fn protein_grams_per_goal() {
        assert_eq!(protein_grams(Some(80.0), Some("lose")), Some(160));
        assert_eq!(protein_grams(Some(80.0), Some("gain")), Some(128));
        assert_eq!(protein_grams(Some(80.0), Some("maintain")), Some(144));
        assert_eq!(protein_grams(None, Some("lose")), None);
        assert_eq!(protein_grams(Some(0.0), Some("lose")), None);
    }

    #[test]
    fn macro_split_never_yields_negative_carbs() {
        // 2000 kcal with an absurd 600 g protein: 2400 protein kcal alone
        // already exceeds the target.
        let split = macro_split(2000, 600);
        assert_eq!(split.carbs_g, 0);
        assert_eq!(split.fat_g, (2000.0_f64 * 0.25 / 9.0).round() as i32);
    }

    #[test]
    fn macro_split_regular_case() {
        // 2000 kcal, 150 g protein: fat 500 kcal -> 56 g, carbs 900 kcal -> 225 g
        let split = macro_split(2000, 150);
        assert_eq!(split.fat_g, 56);
        assert_eq!(split.carbs_g, 225);
    }

    #[test]
    fn derive_targets_is_all_or_nothing() {
        let targets = derive_targets(&full_biometrics()).expect("complete biometrics");
        // BMR 1780, x1.55 = 2759, cut -> 2207, protein 2.0 g/kg
        assert_eq!(targets.tdee, 2759);
        assert_eq!(targets.calories, 2207);
        assert_eq!(targets.protein_g, 160);
        assert_eq!(targets.fat_g, 61);
        assert_eq!(targets.carbs_g, 254);

        let mut incomplete = full_biometrics();
        incomplete.height_cm = None;
        assert!(derive_targets(&incomplete).is_none());
    }

    #[test]
    fn derive_targets_defaults_activity_and_goal() {
        let b = Biometrics {
            gender: Some("female".into()),
            weight_kg: Some(60.0),
            height_cm: Some(165.0),
            age: Some(25),
            activity_level: None,
            goal: None,
        };
        let targets = derive_targets(&b).expect("derivable");
        // BMR 1345.25, x1.375 = 1850, maintain keeps it, protein 1.8 g/kg
        assert_eq!(targets.tdee, 1850);
        assert_eq!(targets.calories, 1850);
        assert_eq!(targets.protein_g, 108);
    }
}
