//! Store-wide averages over days that actually recorded each metric.

use std::fmt;

use serde::Serialize;

use crate::record::DailyRecordStore;
use crate::utils;

#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct Averages {
    pub avg_steps: f64,
    pub avg_resting_hr: f64,
    pub avg_sleep_hours: f64,
    pub avg_workout_duration_minutes: f64,
    pub avg_calories_burned: f64,
}

/// Mean of the strictly positive values; 0 when there are none.
fn positive_mean(values: impl IntoIterator<Item = f64>) -> f64 {
    let (sum, count) = values
        .into_iter()
        .filter(|v| *v > 0.0)
        .fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    if count == 0 { 0.0 } else { sum / count as f64 }
}

impl Averages {
    pub fn from_store(store: &DailyRecordStore) -> Self {
        let days: Vec<_> = store.iter().map(|(_, d)| d).collect();
        Self {
            avg_steps: positive_mean(days.iter().map(|d| d.steps as f64)),
            avg_resting_hr: positive_mean(days.iter().map(|d| f64::from(d.resting_heart_rate))),
            avg_sleep_hours: positive_mean(days.iter().map(|d| d.sleep_hours)),
            avg_workout_duration_minutes: positive_mean(days.iter().filter_map(|d| {
                utils::duration_minutes(&d.total_workout_duration).map(f64::from)
            })),
            avg_calories_burned: positive_mean(days.iter().map(|d| d.total_calories_burned as f64)),
        }
    }
}

impl fmt::Display for Averages {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let minutes = self.avg_workout_duration_minutes as u64;
        writeln!(f, "Averages across valid days:")?;
        writeln!(f, "- Steps: {:.0}", self.avg_steps)?;
        writeln!(f, "- Resting HR: {:.1} bpm", self.avg_resting_hr)?;
        writeln!(f, "- Sleep Duration: {:.2} hours", self.avg_sleep_hours)?;
        writeln!(f, "- Workout Duration: {} hr {} min", minutes / 60, minutes % 60)?;
        write!(f, "- Calories Burned: {:.0}", self.avg_calories_burned)
    }
}
