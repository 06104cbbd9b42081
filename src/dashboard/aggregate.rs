use std::collections::HashMap;

use serde::Serialize;
use time::{Date, Duration, OffsetDateTime, UtcOffset, Weekday};

/// Days covered by the streak window, counted back from the reference day.
/// Today is bucketed too but excluded from streak judgment.
pub const STREAK_WINDOW_DAYS: i64 = 30;

/// Days covered by the burned-calories chart series, today included.
pub const TREND_SERIES_DAYS: i64 = 7;

/// One logged meal as the aggregator sees it: a timestamp plus the macro
/// totals of its items. Nutrient fields are optional because logged items
/// may carry no estimate.
#[derive(Debug, Clone)]
pub struct MealEntry {
    pub at: OffsetDateTime,
    pub items: Vec<ItemMacros>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ItemMacros {
    pub calories: Option<f64>,
    pub protein: Option<f64>,
}

#[derive(Debug, Clone, Copy)]
pub struct WorkoutEntry {
    pub at: OffsetDateTime,
    pub calories_burned: Option<f64>,
}

/// Per-calendar-day totals. `logged` is true when at least one meal or
/// workout fell on the day; a silent day is never adherent no matter what
/// its net works out to.
#[derive(Debug, Clone, Copy, Default)]
pub struct DayBucket {
    pub eaten: f64,
    pub protein: f64,
    pub burned: f64,
    pub net: f64,
    pub logged: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakStats {
    pub current: u32,
    pub current_start: Option<Date>,
    pub best: u32,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TrendPoint {
    pub day: &'static str,
    pub calories: i32,
}

/// The flat dashboard record. Everything a single dashboard load needs,
/// computed from the fetched rows in one pass.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub calories_burned_today: i32,
    pub calories_burned_yesterday: i32,
    pub calories_trend: i32,
    pub trend_improving: bool,
    pub calories_eaten_today: i32,
    pub protein_today: i32,
    pub target_calories: i32,
    pub target_protein: i32,
    pub trends: Vec<TrendPoint>,
    pub protein_yesterday: i32,
    pub net_yesterday: i32,
    pub hit_protein_yesterday: bool,
    pub hit_calories_yesterday: bool,
    pub current_streak: u32,
    pub current_streak_start: Option<Date>,
    pub best_streak: u32,
    pub has_logged_any_day_last_30: bool,
    pub praise: &'static str,
}

/// Everything the pure aggregation needs, already fetched. `today` is the
/// caller-supplied reference day; all bucketing happens on UTC calendar
/// days, never on the wall clock at call time.
#[derive(Debug, Clone, Default)]
pub struct AggregateInput {
    pub target_calories: i32,
    pub target_protein: i32,
    pub today_meals: Vec<MealEntry>,
    pub today_workouts: Vec<WorkoutEntry>,
    pub yesterday_meals: Vec<MealEntry>,
    pub yesterday_workouts: Vec<WorkoutEntry>,
    pub week_workouts: Vec<WorkoutEntry>,
    pub range_meals: Vec<MealEntry>,
    pub range_workouts: Vec<WorkoutEntry>,
}

fn utc_day(at: OffsetDateTime) -> Date {
    at.to_offset(UtcOffset::UTC).date()
}

fn meal_calories(meals: &[MealEntry]) -> f64 {
    meals
        .iter()
        .flat_map(|m| &m.items)
        .map(|i| i.calories.unwrap_or(0.0))
        .sum()
}

fn meal_protein(meals: &[MealEntry]) -> f64 {
    meals
        .iter()
        .flat_map(|m| &m.items)
        .map(|i| i.protein.unwrap_or(0.0))
        .sum()
}

fn workout_calories(workouts: &[WorkoutEntry]) -> f64 {
    workouts.iter().map(|w| w.calories_burned.unwrap_or(0.0)).sum()
}

/// Buckets meals and workouts into per-day totals for the trailing window
/// `today - window_days ..= today`. Every day of the window gets a bucket
/// up front so unlogged gaps stay explicit (they break streaks); rows
/// falling outside the window are dropped.
pub fn bucket_days(
    today: Date,
    window_days: i64,
    meals: &[MealEntry],
    workouts: &[WorkoutEntry],
) -> HashMap<Date, DayBucket> {
    let mut buckets: HashMap<Date, DayBucket> = HashMap::new();
    for i in 0..=window_days {
        buckets.insert(today - Duration::days(i), DayBucket::default());
    }

    for meal in meals {
        if let Some(bucket) = buckets.get_mut(&utc_day(meal.at)) {
            bucket.eaten += meal.items.iter().map(|i| i.calories.unwrap_or(0.0)).sum::<f64>();
            bucket.protein += meal.items.iter().map(|i| i.protein.unwrap_or(0.0)).sum::<f64>();
            bucket.logged = true;
        }
    }
    for workout in workouts {
        if let Some(bucket) = buckets.get_mut(&utc_day(workout.at)) {
            bucket.burned += workout.calories_burned.unwrap_or(0.0);
            bucket.logged = true;
        }
    }
    for bucket in buckets.values_mut() {
        bucket.net = bucket.eaten - bucket.burned;
    }
    buckets
}

/// A day counts toward a streak only when a calorie target exists, the day
/// had at least one log entry, and its net calories stayed at or under the
/// target. With no usable target this is false for every day, so streaks
/// degrade to zero instead of erroring.
fn is_adherent(bucket: &DayBucket, target_calories: i32) -> bool {
    target_calories > 0 && bucket.logged && bucket.net <= f64::from(target_calories)
}

/// Streak statistics over the trailing window, today excluded (its day is
/// still in progress and cannot be judged yet).
///
/// Current streak walks back from yesterday and stops at the first
/// non-adherent day; best streak scans the whole window oldest-first with a
/// running counter that resets on any break.
pub fn streaks(
    buckets: &HashMap<Date, DayBucket>,
    today: Date,
    target_calories: i32,
) -> StreakStats {
    let mut best = 0u32;
    let mut running = 0u32;
    for i in (1..=STREAK_WINDOW_DAYS).rev() {
        let day = today - Duration::days(i);
        let ok = buckets
            .get(&day)
            .is_some_and(|b| is_adherent(b, target_calories));
        running = if ok { running + 1 } else { 0 };
        best = best.max(running);
    }

    let mut current = 0u32;
    let mut current_start = None;
    for i in 1..=STREAK_WINDOW_DAYS {
        let day = today - Duration::days(i);
        let ok = buckets
            .get(&day)
            .is_some_and(|b| is_adherent(b, target_calories));
        if !ok {
            break;
        }
        current += 1;
        // earliest day of the run so far
        current_start = Some(day);
    }

    StreakStats {
        current,
        current_start,
        best,
    }
}

pub fn weekday_abbrev(day: Date) -> &'static str {
    match day.weekday() {
        Weekday::Monday => "Mon",
        Weekday::Tuesday => "Tue",
        Weekday::Wednesday => "Wed",
        Weekday::Thursday => "Thu",
        Weekday::Friday => "Fri",
        Weekday::Saturday => "Sat",
        Weekday::Sunday => "Sun",
    }
}

/// Burned-calories series for the `TREND_SERIES_DAYS` days ending today,
/// oldest first. Chart fodder only; no smoothing.
pub fn burned_series(today: Date, workouts: &[WorkoutEntry]) -> Vec<TrendPoint> {
    let mut by_day: HashMap<Date, f64> = HashMap::new();
    for w in workouts {
        *by_day.entry(utc_day(w.at)).or_default() += w.calories_burned.unwrap_or(0.0);
    }
    (0..TREND_SERIES_DAYS)
        .rev()
        .map(|i| {
            let day = today - Duration::days(i);
            TrendPoint {
                day: weekday_abbrev(day),
                calories: by_day.get(&day).copied().unwrap_or(0.0).round() as i32,
            }
        })
        .collect()
}

/// Encouragement line, picked by priority: a week-long streak beats a short
/// one beats a clean yesterday.
pub fn praise(current_streak: u32, hit_protein_yesterday: bool, hit_calories_yesterday: bool) -> &'static str {
    if current_streak >= 7 {
        "🔥 On fire! A full week on target!"
    } else if current_streak >= 3 {
        "👏 Great momentum—keep it rolling!"
    } else if hit_protein_yesterday && hit_calories_yesterday {
        "💪 Nailed protein and calories yesterday. Awesome!"
    } else {
        "Let’s make today count!"
    }
}

/// Builds the full dashboard summary from pre-fetched rows. Pure and
/// synchronous; every code path degrades to zero/false output instead of
/// failing, since the result feeds a display.
pub fn build_summary(today: Date, input: &AggregateInput) -> DashboardSummary {
    let target_calories = input.target_calories;
    let target_protein = input.target_protein;

    let calories_eaten_today = meal_calories(&input.today_meals).round() as i32;
    let protein_today = meal_protein(&input.today_meals).round() as i32;
    let calories_burned_today = workout_calories(&input.today_workouts).round() as i32;

    let protein_yesterday = meal_protein(&input.yesterday_meals).round() as i32;
    let eaten_yesterday = meal_calories(&input.yesterday_meals).round() as i32;
    let calories_burned_yesterday = workout_calories(&input.yesterday_workouts).round() as i32;
    let net_yesterday = eaten_yesterday - calories_burned_yesterday;

    let hit_protein_yesterday = target_protein > 0 && protein_yesterday >= target_protein;
    let hit_calories_yesterday = target_calories > 0 && net_yesterday <= target_calories;

    let trends = burned_series(today, &input.week_workouts);

    let buckets = bucket_days(
        today,
        STREAK_WINDOW_DAYS,
        &input.range_meals,
        &input.range_workouts,
    );
    let has_logged_any_day_last_30 = buckets.values().any(|b| b.logged);
    let streak_stats = streaks(&buckets, today, target_calories);

    let calories_trend = calories_burned_today - calories_burned_yesterday;

    DashboardSummary {
        calories_burned_today,
        calories_burned_yesterday,
        calories_trend,
        trend_improving: calories_trend > 0,
        calories_eaten_today,
        protein_today,
        target_calories,
        target_protein,
        trends,
        protein_yesterday,
        net_yesterday,
        hit_protein_yesterday,
        hit_calories_yesterday,
        current_streak: streak_stats.current,
        current_streak_start: streak_stats.current_start,
        best_streak: streak_stats.best,
        has_logged_any_day_last_30,
        praise: praise(
            streak_stats.current,
            hit_protein_yesterday,
            hit_calories_yesterday,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    const TODAY: Date = date!(2025 - 06 - 30);

    fn noon(day: Date) -> OffsetDateTime {
        day.with_hms(12, 0, 0)
            .expect("valid time")
            .assume_utc()
    }

    fn meal(day: Date, calories: f64, protein: f64) -> MealEntry {
        MealEntry {
            at: noon(day),
            items: vec![ItemMacros {
                calories: Some(calories),
                protein: Some(protein),
            }],
        }
    }

    fn workout(day: Date, burned: f64) -> WorkoutEntry {
        WorkoutEntry {
            at: noon(day),
            calories_burned: Some(burned),
        }
    }

    /// Adherent days `offsets` days before TODAY: one meal of 1500 kcal
    /// against a 2000 kcal target.
    fn adherent_meals(offsets: &[i64]) -> Vec<MealEntry> {
        offsets
            .iter()
            .map(|&i| meal(TODAY - Duration::days(i), 1500.0, 100.0))
            .collect()
    }

    #[test]
    fn buckets_sum_per_day_and_mark_logged() {
        let d = TODAY - Duration::days(2);
        let meals = vec![meal(d, 400.0, 30.0), meal(d, 600.0, 20.0)];
        let workouts = vec![workout(d, 250.0)];
        let buckets = bucket_days(TODAY, STREAK_WINDOW_DAYS, &meals, &workouts);

        let bucket = buckets.get(&d).expect("bucket exists");
        assert_eq!(bucket.eaten, 1000.0);
        assert_eq!(bucket.protein, 50.0);
        assert_eq!(bucket.burned, 250.0);
        assert_eq!(bucket.net, 750.0);
        assert!(bucket.logged);

        let silent = buckets.get(&(TODAY - Duration::days(3))).expect("in window");
        assert!(!silent.logged);
        assert_eq!(silent.net, 0.0);
    }

    #[test]
    fn rows_outside_the_window_are_dropped() {
        let stale = vec![meal(TODAY - Duration::days(31), 100.0, 10.0)];
        let buckets = bucket_days(TODAY, STREAK_WINDOW_DAYS, &stale, &[]);
        assert!(buckets.values().all(|b| !b.logged));
    }

    #[test]
    fn items_without_estimates_count_as_zero() {
        let entry = MealEntry {
            at: noon(TODAY),
            items: vec![ItemMacros::default()],
        };
        let buckets = bucket_days(TODAY, STREAK_WINDOW_DAYS, &[entry], &[]);
        let bucket = buckets.get(&TODAY).expect("bucket");
        assert_eq!(bucket.eaten, 0.0);
        // the item still marks the day as logged
        assert!(bucket.logged);
    }

    #[test]
    fn silent_day_is_never_adherent() {
        assert!(!is_adherent(&DayBucket::default(), 2000));
        let logged_zero = DayBucket {
            logged: true,
            ..DayBucket::default()
        };
        assert!(is_adherent(&logged_zero, 2000));
        assert!(!is_adherent(&logged_zero, 0));
    }

    #[test]
    fn current_streak_breaks_at_first_gap() {
        // days 1..=5 adherent, day 6 silent, days 7..=9 adherent again
        let meals = adherent_meals(&[1, 2, 3, 4, 5, 7, 8, 9]);
        let buckets = bucket_days(TODAY, STREAK_WINDOW_DAYS, &meals, &[]);
        let stats = streaks(&buckets, TODAY, 2000);
        assert_eq!(stats.current, 5);
        assert_eq!(stats.current_start, Some(TODAY - Duration::days(5)));
        assert_eq!(stats.best, 5);
    }

    #[test]
    fn best_streak_finds_older_runs() {
        // a 3-day current run, and a 6-day run further back
        let meals = adherent_meals(&[1, 2, 3, 10, 11, 12, 13, 14, 15]);
        let buckets = bucket_days(TODAY, STREAK_WINDOW_DAYS, &meals, &[]);
        let stats = streaks(&buckets, TODAY, 2000);
        assert_eq!(stats.current, 3);
        assert_eq!(stats.best, 6);
    }

    #[test]
    fn best_streak_counts_a_run_touching_the_window_edge() {
        let meals = adherent_meals(&[28, 29, 30]);
        let buckets = bucket_days(TODAY, STREAK_WINDOW_DAYS, &meals, &[]);
        let stats = streaks(&buckets, TODAY, 2000);
        assert_eq!(stats.current, 0);
        assert_eq!(stats.best, 3);
    }

    #[test]
    fn today_is_excluded_from_streaks() {
        let meals = adherent_meals(&[0]);
        let buckets = bucket_days(TODAY, STREAK_WINDOW_DAYS, &meals, &[]);
        let stats = streaks(&buckets, TODAY, 2000);
        assert_eq!(stats.current, 0);
        assert_eq!(stats.best, 0);
    }

    #[test]
    fn over_target_day_breaks_the_streak() {
        let mut meals = adherent_meals(&[1, 3]);
        meals.push(meal(TODAY - Duration::days(2), 2500.0, 100.0));
        let buckets = bucket_days(TODAY, STREAK_WINDOW_DAYS, &meals, &[]);
        let stats = streaks(&buckets, TODAY, 2000);
        assert_eq!(stats.current, 1);
        assert_eq!(stats.best, 1);
    }

    #[test]
    fn burned_offsets_net_for_adherence() {
        // 2300 eaten but 500 burned: net 1800 <= 2000
        let meals = vec![meal(TODAY - Duration::days(1), 2300.0, 100.0)];
        let workouts = vec![workout(TODAY - Duration::days(1), 500.0)];
        let buckets = bucket_days(TODAY, STREAK_WINDOW_DAYS, &meals, &workouts);
        let stats = streaks(&buckets, TODAY, 2000);
        assert_eq!(stats.current, 1);
    }

    #[test]
    fn missing_targets_degrade_to_zero_streaks() {
        let meals = adherent_meals(&[1, 2, 3, 4, 5, 6, 7]);
        let buckets = bucket_days(TODAY, STREAK_WINDOW_DAYS, &meals, &[]);
        let stats = streaks(&buckets, TODAY, 0);
        assert_eq!(stats.current, 0);
        assert_eq!(stats.best, 0);
        assert_eq!(stats.current_start, None);
    }

    #[test]
    fn yesterday_flags_compare_net_and_protein_to_targets() {
        let yesterday = TODAY - Duration::days(1);
        let input = AggregateInput {
            target_calories: 2000,
            target_protein: 140,
            yesterday_meals: vec![meal(yesterday, 1800.0, 120.0)],
            yesterday_workouts: vec![workout(yesterday, 200.0)],
            ..AggregateInput::default()
        };
        let summary = build_summary(TODAY, &input);
        assert_eq!(summary.net_yesterday, 1600);
        assert!(summary.hit_calories_yesterday);
        // 120 g < 140 g: protein wants "at least", calories wants "at most"
        assert_eq!(summary.protein_yesterday, 120);
        assert!(!summary.hit_protein_yesterday);
    }

    #[test]
    fn no_targets_mean_all_false_flags_and_no_failure() {
        let input = AggregateInput {
            yesterday_meals: vec![meal(TODAY - Duration::days(1), 1500.0, 200.0)],
            ..AggregateInput::default()
        };
        let summary = build_summary(TODAY, &input);
        assert_eq!(summary.target_calories, 0);
        assert_eq!(summary.target_protein, 0);
        assert!(!summary.hit_calories_yesterday);
        assert!(!summary.hit_protein_yesterday);
        assert_eq!(summary.current_streak, 0);
        assert_eq!(summary.best_streak, 0);
    }

    #[test]
    fn trend_is_today_minus_yesterday() {
        let input = AggregateInput {
            today_workouts: vec![workout(TODAY, 450.0)],
            yesterday_workouts: vec![workout(TODAY - Duration::days(1), 300.0)],
            ..AggregateInput::default()
        };
        let summary = build_summary(TODAY, &input);
        assert_eq!(summary.calories_burned_today, 450);
        assert_eq!(summary.calories_burned_yesterday, 300);
        assert_eq!(summary.calories_trend, 150);
        assert!(summary.trend_improving);
    }

    #[test]
    fn burned_series_covers_seven_labeled_days() {
        let workouts = vec![
            workout(TODAY, 100.0),
            workout(TODAY - Duration::days(3), 250.0),
            workout(TODAY - Duration::days(3), 50.0),
            // outside the series
            workout(TODAY - Duration::days(7), 999.0),
        ];
        let series = burned_series(TODAY, &workouts);
        assert_eq!(series.len(), 7);
        // 2025-06-30 is a Monday; series runs Tue..Mon oldest first
        assert_eq!(series[0].day, "Tue");
        assert_eq!(series[6].day, "Mon");
        assert_eq!(series[6].calories, 100);
        assert_eq!(series[3].calories, 300);
        assert_eq!(series[1].calories, 0);
    }

    #[test]
    fn praise_priority_order() {
        assert_eq!(praise(7, false, false), "🔥 On fire! A full week on target!");
        assert_eq!(praise(3, true, true), "👏 Great momentum—keep it rolling!");
        assert_eq!(
            praise(0, true, true),
            "💪 Nailed protein and calories yesterday. Awesome!"
        );
        assert_eq!(praise(2, true, false), "Let’s make today count!");
    }

    #[test]
    fn summary_serializes_as_a_flat_record() {
        let summary = build_summary(TODAY, &AggregateInput::default());
        let v = serde_json::to_value(&summary).expect("serializes");
        assert_eq!(v["target_calories"], 0);
        assert_eq!(v["current_streak"], 0);
        assert!(v["current_streak_start"].is_null());
        assert_eq!(v["trends"].as_array().map(Vec::len), Some(7));
        assert_eq!(v["praise"], "Let’s make today count!");
    }

    #[test]
    fn full_summary_with_a_five_day_streak() {
        let yesterday = TODAY - Duration::days(1);
        let range_meals = adherent_meals(&[1, 2, 3, 4, 5, 7]);
        let input = AggregateInput {
            target_calories: 2000,
            target_protein: 100,
            today_meals: vec![meal(TODAY, 900.0, 55.0)],
            yesterday_meals: vec![meal(yesterday, 1500.0, 100.0)],
            range_meals,
            ..AggregateInput::default()
        };
        let summary = build_summary(TODAY, &input);
        assert_eq!(summary.calories_eaten_today, 900);
        assert_eq!(summary.protein_today, 55);
        assert_eq!(summary.current_streak, 5);
        assert_eq!(summary.best_streak, 5);
        assert!(summary.has_logged_any_day_last_30);
        // streak of 5 is below 7, so the secondary message wins
        assert_eq!(summary.praise, "👏 Great momentum—keep it rolling!");
    }
}
