use fitness_digest::compress::{Focus, LastWorkout};
use fitness_digest::feeds::{biometric_feed_from_value, workout_feed_from_value};
use fitness_digest::{
    BiometricFeed, DailyRecordStore, FitnessError, WorkoutFeed, build_payload, compress_day,
    merge, recent_workouts, weekly_volume,
};
use serde_json::json;

fn biometrics() -> BiometricFeed {
    biometric_feed_from_value(json!({
        "2025-11-14": {
            "steps_activities-steps": "9500",
            "calories_out_activities-calories": "2450",
            "sleep_duration": 25200000,
            "sleep_efficiency": 88,
            "heart_activities-heart": {"restingHeartRate": 56},
            "weight_body-weight": "171.0"
        },
        "2025-11-15": {
            "steps_activities-steps": "4000",
            "calories_out_activities-calories": "2100",
            "sleep_duration": 19800000,
            "sleep_efficiency": 79,
            "heart_activities-heart": {},
            "weight_body-weight": ""
        }
    }))
    .expect("biometric feed")
}

fn workouts() -> WorkoutFeed {
    workout_feed_from_value(json!([
        {
            "Date": "2025-11-10",
            "Workout_Title": "Pull",
            "Workout_Duration": "1:05",
            "exercises": [
                {"exercise": "Pull Up (Assisted)", "set_type": "normal", "weight_lbs": "40", "reps": "8", "notes": "slow negatives"},
                {"exercise": "Bent Over Row (Barbell)", "set_type": "normal", "weight_lbs": "45", "reps": "10", "notes": ""},
                {"exercise": "Lat Pulldown (Cable)", "set_type": "normal", "weight_lbs": "120", "reps": "10", "notes": ""}
            ]
        },
        {
            "Date": "2025-11-12",
            "Workout_Title": "Push",
            "Workout_Duration": "0:50",
            "exercises": [
                {"exercise": "Bench Press", "set_type": "normal", "weight_lbs": 135, "reps": 8},
                {"exercise": "Bench Press", "set_type": "normal", "weight_lbs": 135, "reps": 6}
            ]
        },
        {
            "Date": "2025-11-15",
            "Workout_Title": "Legs",
            "Workout_Duration": "1:00",
            "exercises": [
                {"exercise": "Squat (Barbell)", "set_type": "normal", "weight_lbs": "95", "reps": "5", "notes": "belt"},
                {"exercise": "Sled Push", "set_type": "normal", "weight_lbs": "", "reps": "", "duration_seconds": "45"}
            ]
        }
    ]))
    .expect("workout feed")
}

fn store() -> DailyRecordStore {
    merge(&biometrics(), &workouts(), 160.0)
}

#[test]
fn totals_are_always_ambient_plus_workout() {
    let store = store();
    assert_eq!(store.len(), 4);
    for (_, day) in store.iter() {
        assert_eq!(
            day.total_calories_burned,
            day.calories_burned_from_steps + day.calories_burned_from_workout
        );
    }
    let both = store.get("2025-11-15").expect("day");
    assert_eq!(both.steps, 4000);
    assert!(both.calories_burned_from_workout > 0);
    assert_eq!(both.total_calories_burned, 2100 + both.calories_burned_from_workout);
}

#[test]
fn merge_applies_resistance_conventions() {
    let store = store();
    let pull = store.get("2025-11-10").expect("pull day");
    let weights: Vec<f64> = pull.exercises.iter().map(|s| s.weight_lbs).collect();
    assert_eq!(weights, vec![120.0, 135.0, 120.0]);
    let legs = store.get("2025-11-15").expect("leg day");
    assert_eq!(legs.exercises[0].weight_lbs, 235.0);
    assert!(legs.exercises[1].muscle_groups.is_empty());
    assert_eq!(legs.exercises[1].reps, None);
}

#[test]
fn merging_identical_feeds_is_byte_identical() {
    let a = store().to_json_pretty().expect("json");
    let b = store().to_json_pretty().expect("json");
    assert_eq!(a, b);
    let keys: Vec<String> = serde_json::from_str::<serde_json::Map<String, serde_json::Value>>(&a)
        .expect("map")
        .keys()
        .cloned()
        .collect();
    assert_eq!(keys, vec!["2025-11-10", "2025-11-12", "2025-11-14", "2025-11-15"]);
}

#[test]
fn workout_less_days_compress_to_rest() {
    let store = store();
    let s = compress_day("2025-11-14", store.get("2025-11-14").expect("day"));
    assert!(!s.had_workout);
    assert_eq!(s.total_sets, 0);
    assert_eq!(s.estimated_volume, 0.0);
}

#[test]
fn recent_workouts_skip_rest_days_and_respect_n() {
    let store = store();
    let recent = recent_workouts(&store, 2, true);
    let dates: Vec<&str> = recent.iter().map(|s| s.date.as_str()).collect();
    assert_eq!(dates, vec!["2025-11-15", "2025-11-12"]);
    assert!(recent.iter().all(|s| s.had_workout));

    let oldest = recent_workouts(&store, 10, false);
    assert_eq!(oldest.len(), 3);
    assert_eq!(oldest[0].date, "2025-11-10");
    assert_eq!(oldest[0].focus, Focus::Pull);
}

#[test]
fn weekly_volume_counts_only_target_iso_week() {
    let store = store();
    let week = weekly_volume(&store, "2025-11-16".parse().expect("date"));
    // Mon 2025-11-10 .. Sun 2025-11-16
    assert_eq!(week.get("back"), 3);
    assert_eq!(week.get("chest"), 2);
    assert_eq!(week.get("quads"), 1);
    let next = weekly_volume(&store, "2025-11-17".parse().expect("date"));
    assert!(next.is_empty());
}

#[test]
fn payload_reads_prior_night_and_flags_low_sleep() {
    let store = store();
    let payload = build_payload(&store, "2025-11-16", 3).expect("payload");
    assert_eq!(payload.sleep_last_night.hours, Some(5.5));
    assert_eq!(payload.sleep_last_night.score, Some(79.0));
    assert_eq!(payload.sleep_last_night.resting_hr, Some(0));
    assert!(payload.low_sleep_flag);
    // prior day has no weight and the target day is absent
    assert_eq!(payload.bodyweight, None);
    assert_eq!(payload.recent_workouts.len(), 3);
    assert_eq!(
        payload.last_workout_summary.summary().map(|s| s.date.as_str()),
        Some("2025-11-15")
    );

    let earlier = build_payload(&store, "2025-11-15", 3).expect("payload");
    assert_eq!(earlier.sleep_last_night.hours, Some(7.0));
    assert!(!earlier.low_sleep_flag);
    assert_eq!(earlier.bodyweight, Some(171.0));
}

#[test]
fn payload_without_history_serializes_bare_marker() {
    let payload = build_payload(&DailyRecordStore::default(), "2025-11-16", 3).expect("payload");
    assert_eq!(payload.last_workout_summary, LastWorkout::NoWorkout { had_workout: false });
    assert_eq!(payload.sleep_last_night.hours, None);
    assert!(!payload.low_sleep_flag);
    let value = serde_json::to_value(&payload).expect("json");
    assert_eq!(value["last_workout_summary"], json!({"had_workout": false}));
    assert_eq!(value["week_volume"], json!({}));
    assert_eq!(value["sleep_last_night"], json!({"hours": null, "score": null, "resting_hr": null}));
}

#[test]
fn payload_rejects_bad_target_date() {
    let err = build_payload(&store(), "next tuesday", 3).unwrap_err();
    assert!(matches!(err, FitnessError::Date(_)));
}

#[test]
fn payload_schema_describes_payload_fields() {
    let schema = fitness_digest::compress::payload_schema().expect("schema");
    let props = schema["properties"].as_object().expect("properties");
    for key in ["date_for_plan", "sleep_last_night", "week_volume", "low_sleep_flag"] {
        assert!(props.contains_key(key), "missing {key}");
    }
}

#[test]
fn weekly_volume_ignores_days_whose_keys_are_not_calendar_dates() {
    let bio = biometric_feed_from_value(json!({
        "2025-02-30": {"steps_activities-steps": "1000", "sleep_duration": 25200000}
    }))
    .expect("biometric feed");
    let mut sessions = workouts();
    sessions.extend(
        workout_feed_from_value(json!([
            {
                "Date": "garbage",
                "Workout_Title": "Push",
                "Workout_Duration": "0:30",
                "exercises": [
                    {"exercise": "Bench Press", "set_type": "normal", "weight_lbs": 135, "reps": 8}
                ]
            },
            {
                "Date": "2025-02-30",
                "Workout_Title": "Legs",
                "Workout_Duration": "0:30",
                "exercises": [
                    {"exercise": "Squat (Barbell)", "set_type": "normal", "weight_lbs": 95, "reps": 5}
                ]
            }
        ]))
        .expect("workout feed"),
    );
    let store = merge(&bio, &sessions, 160.0);
    assert!(store.get("garbage").is_some_and(|d| d.has_workout()));
    assert!(store.get("2025-02-30").is_some_and(|d| d.has_workout()));

    let week = weekly_volume(&store, "2025-11-16".parse().expect("date"));
    assert_eq!(week.get("chest"), 2);
    assert_eq!(week.get("quads"), 1);

    let payload = build_payload(&store, "2025-11-16", 3).expect("payload");
    assert_eq!(payload.week_volume, week);
}
