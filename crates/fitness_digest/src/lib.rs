//! Merge per-day biometric and workout feeds into canonical daily records and
//! compress the history into a bounded, decision-ready payload.
//!
//! Data flows one way: [`reference`] tables feed the [`normalize`] rules, the
//! [`merge`] engine builds a [`DailyRecordStore`], and [`compress`] reads it to
//! produce summaries, weekly rollups and the final [`Payload`].

use thiserror::Error;

pub mod averages;
pub mod compress;
pub mod config;
pub mod feeds;
pub mod merge;
pub mod normalize;
pub mod record;
pub mod reference;
pub mod utils;

pub use averages::Averages;
pub use compress::{
    KeyLift, Payload, SleepSnapshot, VolumeSets, WorkoutSummary, build_payload, compress_day,
    recent_workouts, weekly_volume,
};
pub use feeds::{BiometricEntry, BiometricFeed, RawSet, WorkoutFeed, WorkoutSession};
pub use merge::merge;
pub use record::{DailyRecord, DailyRecordStore, ExerciseSet};

#[derive(Debug, Error)]
pub enum FitnessError {
    #[error("malformed feed: {0}")]
    Feed(String),
    #[error("invalid date: {0}")]
    Date(String),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FitnessError>;
