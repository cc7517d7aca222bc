//! Record merge engine: biometric feed + workout feed -> [`DailyRecordStore`].
//!
//! Writes happen in a fixed sequence: every touched date is seeded with a
//! zero record, biometric fields are written, workout fields are written, and
//! only then are daily totals recomputed for every date.

use crate::feeds::{BiometricEntry, BiometricFeed, RawSet, WorkoutFeed, WorkoutSession};
use crate::normalize::{self, Normalizer};
use crate::record::{DailyRecord, DailyRecordStore, ExerciseSet, NO_DURATION};

const MS_PER_HOUR: f64 = 3_600_000.0;

/// Merge both feeds into a fresh store.
///
/// Deterministic: identical feeds produce an identical store.
pub fn merge(
    biometrics: &BiometricFeed,
    workouts: &WorkoutFeed,
    reference_bodyweight: f64,
) -> DailyRecordStore {
    let normalizer = Normalizer::new(reference_bodyweight);
    let mut store = DailyRecordStore::default();

    for date in biometrics.keys() {
        store.entry(date);
    }
    for session in workouts {
        store.entry(&session.date);
    }

    for (date, entry) in biometrics {
        apply_biometrics(store.entry(date), entry);
    }

    let mut sets_total = 0usize;
    for session in workouts {
        sets_total += session.exercises.len();
        apply_workout(store.entry(&session.date), session, &normalizer);
    }

    store.recompute_totals();

    tracing::debug!(
        biometric_days = biometrics.len(),
        sessions = workouts.len(),
        sets = sets_total,
        days = store.len(),
        "merged feeds"
    );
    store
}

fn apply_biometrics(day: &mut DailyRecord, entry: &BiometricEntry) {
    day.steps = entry.steps.unwrap_or(0.0) as u64;
    day.distance = entry.distance.unwrap_or(0.0);
    day.calories_burned_from_steps = entry.calories_out.unwrap_or(0.0) as i64;
    day.sleep_hours = entry.sleep_duration.unwrap_or(0.0) / MS_PER_HOUR;
    day.sleep_score = entry.sleep_efficiency;
    day.resting_heart_rate = entry
        .heart
        .as_ref()
        .and_then(|h| h.resting_heart_rate)
        .unwrap_or(0.0) as u32;
    day.bodyweight = entry.weight.unwrap_or(0.0);
}

fn apply_workout(day: &mut DailyRecord, session: &WorkoutSession, normalizer: &Normalizer) {
    day.workout_title = session.title.clone();
    day.total_workout_duration = session
        .duration
        .clone()
        .unwrap_or_else(|| NO_DURATION.to_string());

    let mut energy = 0.0;
    day.exercises = session
        .exercises
        .iter()
        .map(|raw| {
            let (set, kcal) = normalize_set(raw, normalizer);
            energy += kcal;
            set
        })
        .collect();
    day.calories_burned_from_workout = energy as i64;
}

/// Build one [`ExerciseSet`] and its estimated energy from a raw set.
pub fn normalize_set(raw: &RawSet, normalizer: &Normalizer) -> (ExerciseSet, f64) {
    let recorded = raw.weight_lbs.unwrap_or(0.0);
    let reps = raw.reps.unwrap_or(0);
    let effective = normalizer.effective_resistance(&raw.exercise, &raw.notes, recorded);
    let kcal = normalize::estimate_energy(
        &raw.exercise,
        effective,
        reps,
        raw.duration_seconds,
        normalizer.bodyweight(),
    );

    let set = ExerciseSet {
        exercise: raw.exercise.clone(),
        set_type: raw.set_type.clone(),
        weight_lbs: effective,
        reps: (reps > 0).then_some(reps),
        distance: raw.distance.filter(|d| *d != 0.0),
        notes: raw.notes.clone(),
        muscle_groups: normalize::muscle_groups(&raw.exercise),
    };
    (set, kcal)
}
