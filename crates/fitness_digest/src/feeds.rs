//! Raw source feeds as handed over by the acquisition collaborators.
//!
//! Both feeds come from exports that mix JSON numbers and numeric strings,
//! so numeric fields decode leniently: numbers, numeric strings, empty
//! strings and nulls are accepted. Anything else is a malformed feed.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::{FitnessError, Result};

/// Fitness-tracker data keyed by ISO date.
pub type BiometricFeed = BTreeMap<String, BiometricEntry>;

/// Workout sessions in export order.
pub type WorkoutFeed = Vec<WorkoutSession>;

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct BiometricEntry {
    #[serde(rename = "steps_activities-steps", default, deserialize_with = "lenient_f64")]
    pub steps: Option<f64>,
    #[serde(rename = "distance_activities-distance", default, deserialize_with = "lenient_f64")]
    pub distance: Option<f64>,
    #[serde(rename = "calories_out_activities-calories", default, deserialize_with = "lenient_f64")]
    pub calories_out: Option<f64>,
    /// Milliseconds asleep.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub sleep_duration: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub sleep_efficiency: Option<f64>,
    #[serde(rename = "heart_activities-heart", default)]
    pub heart: Option<HeartInfo>,
    #[serde(rename = "weight_body-weight", default, deserialize_with = "lenient_f64")]
    pub weight: Option<f64>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct HeartInfo {
    #[serde(rename = "restingHeartRate", default, deserialize_with = "lenient_f64")]
    pub resting_heart_rate: Option<f64>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct WorkoutSession {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Workout_Title", default)]
    pub title: Option<String>,
    /// `H:MM`
    #[serde(rename = "Workout_Duration", default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub exercises: Vec<RawSet>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct RawSet {
    #[serde(default, deserialize_with = "string_or_empty")]
    pub exercise: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub set_type: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub weight_lbs: Option<f64>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub reps: Option<u32>,
    #[serde(default, alias = "distance_miles", deserialize_with = "lenient_f64")]
    pub distance: Option<f64>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub duration_seconds: Option<u32>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub rpe: Option<f64>,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub notes: String,
}

/// Decode a biometric feed, rejecting anything that is not a date-keyed object.
pub fn biometric_feed_from_value(value: Value) -> Result<BiometricFeed> {
    if !value.is_object() {
        return Err(FitnessError::Feed(format!(
            "biometric feed must be an object keyed by date, got {}",
            kind_of(&value)
        )));
    }
    Ok(serde_json::from_value(value)?)
}

/// Decode a workout feed, rejecting anything that is not a list of sessions.
pub fn workout_feed_from_value(value: Value) -> Result<WorkoutFeed> {
    if !value.is_array() {
        return Err(FitnessError::Feed(format!(
            "workout feed must be a list of sessions, got {}",
            kind_of(&value)
        )));
    }
    Ok(serde_json::from_value(value)?)
}

pub fn biometric_feed_from_str(s: &str) -> Result<BiometricFeed> {
    biometric_feed_from_value(serde_json::from_str(s)?)
}

pub fn workout_feed_from_str(s: &str) -> Result<WorkoutFeed> {
    workout_feed_from_value(serde_json::from_str(s)?)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn lenient_f64<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    let value: Option<Value> = Option::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("expected numeric string, got {s:?}"))),
        Some(other) => Err(D::Error::custom(format!(
            "expected number or numeric string, got {other}"
        ))),
    }
}

fn lenient_u32<'de, D>(deserializer: D) -> std::result::Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    match lenient_f64(deserializer)? {
        None => Ok(None),
        Some(v) if v.is_finite() && v >= 0.0 && v <= f64::from(u32::MAX) => Ok(Some(v as u32)),
        Some(v) => Err(D::Error::custom(format!(
            "expected non-negative integer, got {v}"
        ))),
    }
}

fn string_or_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn biometric_entry_accepts_strings_and_numbers() {
        let feed = biometric_feed_from_value(json!({
            "2025-11-15": {
                "steps_activities-steps": "8123",
                "distance_activities-distance": 5.4,
                "calories_out_activities-calories": "2301",
                "sleep_duration": 27000000,
                "sleep_efficiency": 91,
                "heart_activities-heart": {"restingHeartRate": 58, "heartRateZones": []},
                "weight_body-weight": "171.2"
            }
        }))
        .expect("feed");
        let day = &feed["2025-11-15"];
        assert_eq!(day.steps, Some(8123.0));
        assert_eq!(day.calories_out, Some(2301.0));
        assert_eq!(day.heart.as_ref().and_then(|h| h.resting_heart_rate), Some(58.0));
        assert_eq!(day.weight, Some(171.2));
    }

    #[test]
    fn biometric_entry_missing_fields_are_none() {
        let input = json!({"2025-11-15": {"heart_activities-heart": null}});
        let feed = biometric_feed_from_value(input).expect("feed");
        assert_eq!(feed["2025-11-15"], BiometricEntry::default());
    }

    #[test]
    fn raw_set_decodes_csv_style_values() {
        let feed = workout_feed_from_value(json!([{
            "Date": "2025-11-15",
            "Workout_Title": "Pull Day",
            "Workout_Duration": "1:02",
            "exercises": [{
                "exercise": "Pull Up (Assisted)",
                "set_type": "normal",
                "weight_lbs": "40",
                "reps": "8",
                "distance_miles": "",
                "duration_seconds": null,
                "rpe": null,
                "notes": null
            }]
        }]))
        .expect("feed");
        let set = &feed[0].exercises[0];
        assert_eq!(set.weight_lbs, Some(40.0));
        assert_eq!(set.reps, Some(8));
        assert_eq!(set.distance, None);
        assert_eq!(set.notes, "");
    }

    #[test]
    fn wrong_top_level_shape_is_feed_error() {
        let err = biometric_feed_from_value(json!([])).unwrap_err();
        assert!(matches!(err, FitnessError::Feed(_)));
        let err = workout_feed_from_value(json!({"Date": "2025-11-15"})).unwrap_err();
        assert!(matches!(err, FitnessError::Feed(_)));
    }

    #[test]
    fn non_numeric_string_is_fatal() {
        let err = workout_feed_from_value(json!([{
            "Date": "2025-11-15",
            "exercises": [{"exercise": "Squat", "reps": "five"}]
        }]))
        .unwrap_err();
        assert!(matches!(err, FitnessError::Json(_)));
    }
}
