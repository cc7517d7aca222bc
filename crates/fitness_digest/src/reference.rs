//! Static lookup tables: exercise name to trained muscle groups, and exercise
//! name to a metabolic-intensity (MET) coefficient.
//!
//! Keys are matched exactly, as the workout tracker exports them.

use std::collections::HashMap;
use std::sync::LazyLock;

/// MET value used when an exercise has no entry in [`EXERCISE_MET`].
pub const DEFAULT_MET: f64 = 5.0;

/// Pounds to kilograms.
pub const LB_TO_KG: f64 = 0.453592;

pub const EXERCISE_MUSCLES: &[(&str, &[&str])] = &[
    ("Pull Up", &["Back"]),
    ("Pull Up (Assisted)", &["Back"]),
    ("Neutral Grip Pull Up", &["Back", "Forearm"]),
    ("Neutral Grip Pull Up (Assisted)", &["Back", "Forearm"]),
    ("Chin Up", &["Biceps", "Back"]),
    ("Chin Up (Assisted)", &["Biceps", "Back"]),
    ("Bent Over Row (Barbell)", &["Back", "Rear Delts"]),
    ("Seated Row (Machine)", &["Back", "Rear Delts"]),
    ("Lat Pulldown (Cable)", &["Back", "Biceps"]),
    ("Lat Pulldown - Close Grip (Cable)", &["Back", "Biceps"]),
    ("lat pulldown Burn Outs", &["Back"]),
    ("Negative Pull Up", &["Back", "Biceps"]),
    ("Bench Press", &["Chest", "Triceps", "Shoulders"]),
    ("Incline Bench Press", &["Chest", "Shoulders", "Triceps"]),
    ("Incline Bench Press (Barbell)", &["Chest", "Shoulders", "Triceps"]),
    ("Incline Bench Press (Dumbbell)", &["Chest", "Shoulders", "Triceps"]),
    ("Overhead Press", &["Shoulders"]),
    ("Overhead Press (Barbell)", &["Shoulders"]),
    ("Overhead Press (Smith Machine)", &["Shoulders"]),
    ("Shoulder Press (Dumbbell)", &["Shoulders"]),
    ("Seated Shoulder Press (Machine)", &["Shoulders"]),
    ("Chest Dip", &["Chest", "Triceps", "Shoulders"]),
    ("Chest Dip (Assisted)", &["Chest", "Triceps", "Shoulders"]),
    ("Push Up", &["Chest", "Triceps", "Shoulders"]),
    ("Face Pull", &["Rear Delts", "Traps"]),
    ("Triceps Extension (Barbell)", &["Triceps"]),
    ("Triceps Extension (Cable)", &["Triceps"]),
    ("Triceps Rope Pushdown", &["Triceps"]),
    ("Overhead Triceps Extension (Cable)", &["Triceps"]),
    ("Hammer Curl (Dumbbell)", &["Biceps", "Forearms"]),
    ("Bicep Curl (Barbell)", &["Biceps"]),
    ("EZ Bar Biceps Curl", &["Biceps"]),
    ("Bicep Curl (Cable)", &["Biceps"]),
    ("Reverse Curl (Barbell)", &["Biceps", "Forearms"]),
    ("Lateral Raise (Dumbbell)", &["Shoulders"]),
    ("Single Arm Lateral Raise (Cable)", &["Shoulders"]),
    ("Lateral Raise (Cable)", &["Shoulders"]),
    ("Rear Delt Reverse Fly (Machine)", &["Rear Delts"]),
    ("Squat", &["Quads", "Glutes", "Hamstrings"]),
    ("Squat (Barbell)", &["Quads", "Glutes", "Hamstrings"]),
    ("Front Squat", &["Quads", "Glutes", "Hamstrings"]),
    ("Leg Press Horizontal (Machine)", &["Quads", "Glutes"]),
    ("Bulgarian Split Squat", &["Quads", "Glutes", "Hamstrings"]),
    ("Deadlift", &["Hamstrings", "Glutes", "Back"]),
    ("Deadlift (Barbell)", &["Hamstrings", "Glutes", "Back"]),
    ("Romanian Deadlift (Barbell)", &["Hamstrings", "Glutes", "Back"]),
    ("Hip Thrust (Barbell)", &["Glutes", "Hamstrings"]),
    ("Hanging Knee Raise", &["Abs"]),
    ("Leg Raise Parallel Bars", &["Abs"]),
];

pub const EXERCISE_MET: &[(&str, f64)] = &[
    ("Pull Up", 8.0),
    ("Pull Up (Assisted)", 6.0),
    ("Chin Up", 8.0),
    ("Chin Up (Assisted)", 6.0),
    ("Bent Over Row (Barbell)", 6.0),
    ("Seated Row (Machine)", 5.5),
    ("Lat Pulldown (Cable)", 5.5),
    ("Lat Pulldown - Close Grip (Cable)", 5.5),
    ("lat pulldown Burn Outs", 5.5),
    ("Negative Pull Up", 7.0),
    ("Bench Press", 6.0),
    ("Incline Bench Press", 6.0),
    ("Incline Bench Press (Barbell)", 6.0),
    ("Incline Bench Press (Dumbbell)", 6.0),
    ("Overhead Press", 5.5),
    ("Overhead Press (Barbell)", 5.5),
    ("Overhead Press (Smith Machine)", 5.5),
    ("Shoulder Press (Dumbbell)", 5.5),
    ("Seated Shoulder Press (Machine)", 5.0),
    ("Chest Dip", 6.0),
    ("Chest Dip (Assisted)", 5.0),
    ("Push Up", 5.5),
    ("Face Pull", 4.5),
    ("Triceps Extension (Barbell)", 4.0),
    ("Triceps Extension (Cable)", 4.0),
    ("Triceps Rope Pushdown", 4.0),
    ("Hammer Curl (Dumbbell)", 4.0),
    ("Bicep Curl (Barbell)", 4.0),
    ("EZ Bar Biceps Curl", 4.0),
    ("Bicep Curl (Cable)", 4.0),
    ("Reverse Curl (Barbell)", 4.0),
    ("Lateral Raise (Dumbbell)", 3.5),
    ("Single Arm Lateral Raise (Cable)", 3.5),
    ("Lateral Raise (Cable)", 3.5),
    ("Rear Delt Reverse Fly (Machine)", 4.0),
    ("Squat", 7.0),
    ("Squat (Barbell)", 7.0),
    ("Front Squat", 7.0),
    ("Leg Press Horizontal (Machine)", 6.5),
    ("Bulgarian Split Squat", 6.5),
    ("Deadlift", 7.0),
    ("Deadlift (Barbell)", 7.0),
    ("Romanian Deadlift (Barbell)", 6.5),
    ("Hip Thrust (Barbell)", 6.0),
    ("Hanging Knee Raise", 3.5),
    ("Leg Raise Parallel Bars", 3.5),
];

static MUSCLE_INDEX: LazyLock<HashMap<&'static str, &'static [&'static str]>> =
    LazyLock::new(|| EXERCISE_MUSCLES.iter().copied().collect());

static MET_INDEX: LazyLock<HashMap<&'static str, f64>> =
    LazyLock::new(|| EXERCISE_MET.iter().copied().collect());

/// Muscle groups trained by `exercise`, or `None` when the name is unmapped.
pub fn muscles_for(exercise: &str) -> Option<&'static [&'static str]> {
    MUSCLE_INDEX.get(exercise).copied()
}

/// MET coefficient for `exercise`, falling back to [`DEFAULT_MET`].
pub fn met_for(exercise: &str) -> f64 {
    MET_INDEX.get(exercise).copied().unwrap_or(DEFAULT_MET)
}
