//! Canonical per-day records and the date-keyed store that holds them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Duration string of a day without a workout.
pub const NO_DURATION: &str = "0:00";

/// One logged set after normalization.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct ExerciseSet {
    pub exercise: String,
    pub set_type: String,
    /// Effective resistance in pounds.
    pub weight_lbs: f64,
    pub reps: Option<u32>,
    pub distance: Option<f64>,
    pub notes: String,
    pub muscle_groups: Vec<String>,
}

/// One calendar date's merged state.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct DailyRecord {
    pub steps: u64,
    pub distance: f64,
    pub total_calories_burned: i64,
    pub sleep_hours: f64,
    pub sleep_score: Option<f64>,
    pub workout_title: Option<String>,
    pub exercises: Vec<ExerciseSet>,
    /// `H:MM`
    pub total_workout_duration: String,
    pub calories_burned_from_workout: i64,
    pub calories_burned_from_steps: i64,
    pub resting_heart_rate: u32,
    pub bodyweight: f64,
}

impl Default for DailyRecord {
    fn default() -> Self {
        Self {
            steps: 0,
            distance: 0.0,
            total_calories_burned: 0,
            sleep_hours: 0.0,
            sleep_score: None,
            workout_title: None,
            exercises: Vec::new(),
            total_workout_duration: NO_DURATION.to_string(),
            calories_burned_from_workout: 0,
            calories_burned_from_steps: 0,
            resting_heart_rate: 0,
            bodyweight: 0.0,
        }
    }
}

impl DailyRecord {
    pub fn has_workout(&self) -> bool {
        !self.exercises.is_empty()
    }

    pub(crate) fn recompute_total(&mut self) {
        self.total_calories_burned =
            self.calories_burned_from_steps + self.calories_burned_from_workout;
    }

    /// Fill every unset field from `prior`. Workout fields move as a group.
    fn fold_from(&mut self, prior: &DailyRecord) {
        if self.steps == 0 {
            self.steps = prior.steps;
        }
        if self.distance == 0.0 {
            self.distance = prior.distance;
        }
        if self.sleep_hours == 0.0 {
            self.sleep_hours = prior.sleep_hours;
        }
        if self.sleep_score.is_none() {
            self.sleep_score = prior.sleep_score;
        }
        if self.resting_heart_rate == 0 {
            self.resting_heart_rate = prior.resting_heart_rate;
        }
        if self.bodyweight == 0.0 {
            self.bodyweight = prior.bodyweight;
        }
        if self.calories_burned_from_steps == 0 {
            self.calories_burned_from_steps = prior.calories_burned_from_steps;
        }
        if !self.has_workout() && prior.has_workout() {
            self.workout_title = prior.workout_title.clone();
            self.total_workout_duration = prior.total_workout_duration.clone();
            self.exercises = prior.exercises.clone();
            self.calories_burned_from_workout = prior.calories_burned_from_workout;
        }
        self.recompute_total();
    }
}

/// Date-keyed records, always iterated in ascending date order.
///
/// Keys are `YYYY-MM-DD`, so lexicographic order is calendar order.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(transparent)]
pub struct DailyRecordStore {
    days: BTreeMap<String, DailyRecord>,
}

impl DailyRecordStore {
    pub fn get(&self, date: &str) -> Option<&DailyRecord> {
        self.days.get(date)
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Ascending date order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&str, &DailyRecord)> {
        self.days.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub(crate) fn entry(&mut self, date: &str) -> &mut DailyRecord {
        self.days.entry(date.to_string()).or_default()
    }

    pub(crate) fn recompute_totals(&mut self) {
        for day in self.days.values_mut() {
            day.recompute_total();
        }
    }

    /// Fold a previously persisted store into this one, field by field.
    ///
    /// Fields set in `self` win; unset fields take the previous value, and
    /// dates only present in `previous` are carried over unchanged.
    pub fn fold_previous(mut self, previous: DailyRecordStore) -> Self {
        for (date, prior) in previous.days {
            match self.days.get_mut(&date) {
                Some(day) => day.fold_from(&prior),
                None => {
                    self.days.insert(date, prior);
                }
            }
        }
        self.recompute_totals();
        self
    }

    pub fn to_json_pretty(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
