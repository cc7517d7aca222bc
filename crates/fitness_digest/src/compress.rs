//! History compression: per-day workout summaries, recent-history selection,
//! ISO-week muscle volume and the bounded plan payload.
//!
//! Nothing here mutates the store; every call builds fresh derived values.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{Datelike, NaiveDate};
use schemars::JsonSchema;
use serde::{Serialize, Serializer};

use crate::record::{DailyRecord, DailyRecordStore, ExerciseSet};
use crate::utils::{self, round1};
use crate::{FitnessError, Result};

/// Key lifts kept per summary.
pub const MAX_KEY_LIFTS: usize = 3;
/// Set notes kept per summary.
pub const MAX_NOTES: usize = 5;
/// Sleep below this many hours raises the fatigue flag.
pub const LOW_SLEEP_HOURS: f64 = 6.0;

const PUSH_MUSCLES: &[&str] = &["chest", "shoulder", "shoulders", "triceps", "front delts", "pec"];
const PULL_MUSCLES: &[&str] = &["back", "biceps", "rear delts", "lats"];
const LEG_MUSCLES: &[&str] = &["quads", "hamstrings", "glutes", "calves", "legs"];

/// Lowercased, trimmed muscle key. Blank tags count as `other`.
pub fn normalize_muscle(m: &str) -> String {
    let m = m.trim();
    if m.is_empty() {
        "other".to_string()
    } else {
        m.to_lowercase()
    }
}

/// Sets per muscle group, iterated in first-increment order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VolumeSets {
    entries: Vec<(String, u32)>,
}

impl VolumeSets {
    pub fn increment(&mut self, muscle: &str) {
        let key = normalize_muscle(muscle);
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, n)) => *n += 1,
            None => self.entries.push((key, 1)),
        }
    }

    /// One increment per muscle tag of the set.
    pub fn add_set(&mut self, set: &ExerciseSet) {
        for m in &set.muscle_groups {
            self.increment(m);
        }
    }

    pub fn get(&self, muscle: &str) -> u32 {
        self.entries
            .iter()
            .find(|(k, _)| k == muscle)
            .map_or(0, |(_, n)| *n)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.entries.iter().map(|(k, n)| (k.as_str(), *n))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Muscle with the highest count; the earliest inserted wins ties.
    pub fn top(&self) -> Option<(&str, u32)> {
        let mut best: Option<(&str, u32)> = None;
        for (k, n) in self.iter() {
            if best.is_none_or(|(_, b)| n > b) {
                best = Some((k, n));
            }
        }
        best
    }
}

impl Serialize for VolumeSets {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// Coarse classification of a day's dominant muscle group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Focus {
    /// No sets logged.
    None,
    Push,
    Pull,
    Legs,
    /// Dominant muscle outside push/pull/legs.
    Muscle(String),
    /// Sets logged, none tagged with a muscle.
    Other,
}

impl Focus {
    pub fn classify(volume: &VolumeSets) -> Self {
        let Some((top, _)) = volume.top() else {
            return Focus::Other;
        };
        let is = |family: &[&str]| family.iter().any(|m| *m == top);
        if is(PUSH_MUSCLES) {
            Focus::Push
        } else if is(PULL_MUSCLES) {
            Focus::Pull
        } else if is(LEG_MUSCLES) {
            Focus::Legs
        } else {
            Focus::Muscle(top.to_string())
        }
    }
}

impl fmt::Display for Focus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Focus::None => f.write_str("none"),
            Focus::Push => f.write_str("push"),
            Focus::Pull => f.write_str("pull"),
            Focus::Legs => f.write_str("legs"),
            Focus::Muscle(m) => f.write_str(m),
            Focus::Other => f.write_str("other"),
        }
    }
}

impl Serialize for Focus {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Clone, Debug, Serialize, JsonSchema, PartialEq)]
pub struct KeyLift {
    pub exercise: String,
    pub sets: u32,
    /// Mean of nonzero resistances; `None` when every set was unloaded.
    pub avg_weight: Option<f64>,
    pub avg_reps: f64,
    pub muscles: Vec<String>,
}

/// Compressed view of one day's training.
#[derive(Clone, Debug, Serialize, JsonSchema, PartialEq)]
pub struct WorkoutSummary {
    pub date: String,
    pub had_workout: bool,
    #[schemars(with = "String")]
    pub focus: Focus,
    #[schemars(with = "BTreeMap<String, u32>")]
    pub volume_sets: VolumeSets,
    pub total_sets: u32,
    pub total_reps: u32,
    pub estimated_volume: f64,
    pub key_lifts: Vec<KeyLift>,
    pub notes: String,
}

impl WorkoutSummary {
    fn rest_day(date: &str) -> Self {
        Self {
            date: date.to_string(),
            had_workout: false,
            focus: Focus::None,
            volume_sets: VolumeSets::default(),
            total_sets: 0,
            total_reps: 0,
            estimated_volume: 0.0,
            key_lifts: Vec::new(),
            notes: String::new(),
        }
    }
}

/// Sets of one exercise within a day, in log order.
struct ExerciseGroup<'a> {
    name: &'a str,
    sets: Vec<&'a ExerciseSet>,
}

impl ExerciseGroup<'_> {
    fn score_and_lift(&self) -> (f64, KeyLift) {
        let count = self.sets.len() as u32;
        let reps_sum: u64 = self.sets.iter().map(|s| u64::from(s.reps.unwrap_or(0))).sum();
        let loaded: Vec<f64> = self
            .sets
            .iter()
            .map(|s| s.weight_lbs)
            .filter(|w| *w != 0.0)
            .collect();
        let avg_weight =
            (!loaded.is_empty()).then(|| loaded.iter().sum::<f64>() / loaded.len() as f64);
        let avg_reps = reps_sum as f64 / f64::from(count);

        let mut muscles: Vec<String> = self
            .sets
            .iter()
            .flat_map(|s| s.muscle_groups.iter().map(|m| normalize_muscle(m)))
            .collect();
        muscles.sort();
        muscles.dedup();

        let score = avg_weight.unwrap_or(0.0) * avg_reps * f64::from(count);
        let lift = KeyLift {
            exercise: self.name.to_string(),
            sets: count,
            avg_weight: avg_weight.map(round1),
            avg_reps: round1(avg_reps),
            muscles,
        };
        (score, lift)
    }
}

fn group_by_exercise(sets: &[ExerciseSet]) -> Vec<ExerciseGroup<'_>> {
    let mut groups: Vec<ExerciseGroup<'_>> = Vec::new();
    for set in sets {
        let name = match set.exercise.trim() {
            "" => "unknown",
            n => n,
        };
        match groups.iter_mut().find(|g| g.name == name) {
            Some(g) => g.sets.push(set),
            None => groups.push(ExerciseGroup {
                name,
                sets: vec![set],
            }),
        }
    }
    groups
}

/// Compress one day's workout.
///
/// Groups are walked in first-seen order and sets in log order within each
/// group; muscle tallies and notes follow that walk.
pub fn compress_day(date: &str, record: &DailyRecord) -> WorkoutSummary {
    if !record.has_workout() {
        return WorkoutSummary::rest_day(date);
    }

    let groups = group_by_exercise(&record.exercises);

    let mut volume_sets = VolumeSets::default();
    let mut total_sets = 0u32;
    let mut total_reps = 0u32;
    let mut estimated_volume = 0.0;
    let mut notes: Vec<&str> = Vec::new();

    for group in &groups {
        for set in &group.sets {
            volume_sets.add_set(set);
            let reps = set.reps.unwrap_or(0);
            total_sets = total_sets.saturating_add(1);
            total_reps = total_reps.saturating_add(reps);
            if set.weight_lbs != 0.0 {
                estimated_volume += set.weight_lbs * f64::from(reps);
            }
            let note = set.notes.trim();
            if !note.is_empty() {
                notes.push(note);
            }
        }
    }

    let mut scored: Vec<(f64, KeyLift)> =
        groups.iter().map(ExerciseGroup::score_and_lift).collect();
    // stable: equal scores keep first-seen order
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    let key_lifts = scored
        .into_iter()
        .take(MAX_KEY_LIFTS)
        .map(|(_, lift)| lift)
        .collect();

    WorkoutSummary {
        date: date.to_string(),
        had_workout: true,
        focus: Focus::classify(&volume_sets),
        volume_sets,
        total_sets,
        total_reps,
        estimated_volume: round1(estimated_volume),
        key_lifts,
        notes: notes
            .into_iter()
            .take(MAX_NOTES)
            .collect::<Vec<_>>()
            .join(" | "),
    }
}

/// The `n` most recent days that have sets, compressed.
///
/// Days without sets are skipped and do not count toward `n`.
pub fn recent_workouts(
    store: &DailyRecordStore,
    n: usize,
    newest_first: bool,
) -> Vec<WorkoutSummary> {
    let days: Box<dyn Iterator<Item = (&str, &DailyRecord)> + '_> = if newest_first {
        Box::new(store.iter().rev())
    } else {
        Box::new(store.iter())
    };
    days.filter(|(_, day)| day.has_workout())
        .take(n)
        .map(|(date, day)| compress_day(date, day))
        .collect()
}

/// Sets per muscle across every stored day in the ISO week of `reference`.
///
/// Store keys that are not valid dates are skipped.
pub fn weekly_volume(store: &DailyRecordStore, reference: NaiveDate) -> VolumeSets {
    let target = reference.iso_week();
    let target = (target.year(), target.week());
    let mut volume = VolumeSets::default();
    for (date, day) in store.iter() {
        match utils::iso_week_of(date) {
            Some(week) if week == target => day.exercises.iter().for_each(|s| volume.add_set(s)),
            Some(_) => {}
            None => tracing::trace!(date, "skipping unparseable date in weekly rollup"),
        }
    }
    volume
}

/// Prior night's recovery snapshot.
#[derive(Clone, Debug, Default, Serialize, JsonSchema, PartialEq)]
pub struct SleepSnapshot {
    pub hours: Option<f64>,
    pub score: Option<f64>,
    pub resting_hr: Option<u32>,
}

/// Most recent workout, or a bare marker when there is none.
#[derive(Clone, Debug, Serialize, JsonSchema, PartialEq)]
#[serde(untagged)]
pub enum LastWorkout {
    Summary(WorkoutSummary),
    NoWorkout { had_workout: bool },
}

impl LastWorkout {
    pub fn summary(&self) -> Option<&WorkoutSummary> {
        match self {
            LastWorkout::Summary(s) => Some(s),
            LastWorkout::NoWorkout { .. } => None,
        }
    }
}

/// Bounded input for plan generation.
#[derive(Clone, Debug, Serialize, JsonSchema, PartialEq)]
pub struct Payload {
    pub date_for_plan: String,
    pub sleep_last_night: SleepSnapshot,
    pub bodyweight: Option<f64>,
    #[schemars(with = "BTreeMap<String, u32>")]
    pub week_volume: VolumeSets,
    pub recent_workouts: Vec<WorkoutSummary>,
    pub last_workout_summary: LastWorkout,
    pub low_sleep_flag: bool,
}

/// Assemble the plan payload for `target_date`.
///
/// Recovery metrics come from the day before; bodyweight falls back to the
/// target day when the prior day has none.
pub fn build_payload(
    store: &DailyRecordStore,
    target_date: &str,
    recent_n: usize,
) -> Result<Payload> {
    let target = utils::parse_date(target_date).ok_or_else(|| {
        FitnessError::Date(format!("target date {target_date:?} is not YYYY-MM-DD"))
    })?;
    let prior_date = utils::previous_day(target_date)
        .ok_or_else(|| FitnessError::Date(format!("no day before {target_date:?}")))?;
    let prior = store.get(&prior_date);

    let sleep_last_night = prior.map_or_else(SleepSnapshot::default, |p| SleepSnapshot {
        hours: Some(p.sleep_hours),
        score: p.sleep_score,
        resting_hr: Some(p.resting_heart_rate),
    });

    let bodyweight = prior
        .map(|p| p.bodyweight)
        .filter(|w| *w != 0.0)
        .or_else(|| store.get(target_date).map(|d| d.bodyweight));

    let recent = recent_workouts(store, recent_n, true);
    let last_workout_summary = match recent.first() {
        Some(s) => LastWorkout::Summary(s.clone()),
        None => LastWorkout::NoWorkout { had_workout: false },
    };
    let low_sleep_flag = sleep_last_night.hours.is_some_and(|h| h < LOW_SLEEP_HOURS);

    Ok(Payload {
        date_for_plan: target_date.to_string(),
        sleep_last_night,
        bodyweight,
        week_volume: weekly_volume(store, target),
        recent_workouts: recent,
        last_workout_summary,
        low_sleep_flag,
    })
}

/// JSON Schema of [`Payload`] for the plan-generation consumer.
pub fn payload_schema() -> Result<serde_json::Value> {
    Ok(serde_json::to_value(schemars::schema_for!(Payload))?)
}
