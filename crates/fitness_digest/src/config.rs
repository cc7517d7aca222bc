use std::path::PathBuf;

use crate::FitnessError;

pub const DEFAULT_BODYWEIGHT_LBS: f64 = 160.0;
pub const DEFAULT_RECENT_WORKOUTS: usize = 3;

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub data_dir: PathBuf,
    /// Reference bodyweight for normalization and energy estimates (lbs).
    pub bodyweight_lbs: f64,
    pub recent_workouts: usize,
    /// `YYYY-MM-DD`; `None` means today.
    pub target_date: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            bodyweight_lbs: DEFAULT_BODYWEIGHT_LBS,
            recent_workouts: DEFAULT_RECENT_WORKOUTS,
            target_date: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, FitnessError> {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Testable helper that reads configuration values using the provided
    /// function instead of the process environment.
    pub fn from_env_with<F>(mut get: F) -> Result<Self, FitnessError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let data_dir = get("FITNESS_DIGEST_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);

        let bodyweight_lbs = match get("FITNESS_DIGEST_BODYWEIGHT_LBS") {
            Some(v) => v
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|w| w.is_finite() && *w > 0.0)
                .ok_or_else(|| {
                    FitnessError::Config(format!("FITNESS_DIGEST_BODYWEIGHT_LBS invalid: {v:?}"))
                })?,
            None => defaults.bodyweight_lbs,
        };

        let recent_workouts = match get("FITNESS_DIGEST_RECENT_WORKOUTS") {
            Some(v) => v.trim().parse::<usize>().map_err(|_| {
                FitnessError::Config(format!("FITNESS_DIGEST_RECENT_WORKOUTS invalid: {v:?}"))
            })?,
            None => defaults.recent_workouts,
        };

        let target_date = match get("FITNESS_DIGEST_TARGET_DATE") {
            Some(d) if crate::utils::parse_date(d.trim()).is_some() => Some(d.trim().to_string()),
            Some(d) => {
                return Err(FitnessError::Config(format!(
                    "FITNESS_DIGEST_TARGET_DATE must be YYYY-MM-DD, got {d:?}"
                )));
            }
            None => None,
        };

        Ok(Self {
            data_dir,
            bodyweight_lbs,
            recent_workouts,
            target_date,
        })
    }

    /// Target date, defaulting to today on the local clock.
    pub fn target_date_or_today(&self) -> String {
        self.target_date
            .clone()
            .unwrap_or_else(|| chrono::Local::now().date_naive().format("%Y-%m-%d").to_string())
    }
}
