//! Per-set normalization: effective resistance and energy estimates.
//!
//! Resistance corrections are an ordered rule table. The first rule whose
//! predicate matches wins; when none match the recorded value is kept.

use crate::reference::{self, LB_TO_KG};

/// Fixed weight of an olympic bar, in pounds.
pub const BAR_WEIGHT_LBS: f64 = 45.0;

/// Seconds assumed per repetition when a set carries no explicit duration.
pub const SECONDS_PER_REP: f64 = 3.0;

/// Inputs a resistance rule can inspect. Text fields are lowercased once.
#[derive(Debug, Clone)]
pub struct SetContext {
    pub exercise: String,
    pub notes: String,
    pub recorded: f64,
    pub bodyweight: f64,
}

impl SetContext {
    pub fn new(exercise: &str, notes: &str, recorded: f64, bodyweight: f64) -> Self {
        Self {
            exercise: exercise.to_lowercase(),
            notes: notes.to_lowercase(),
            recorded,
            bodyweight,
        }
    }
}

/// One predicate/transform pair of the resistance rule table.
#[derive(Clone, Copy)]
pub struct ResistanceRule {
    pub name: &'static str,
    pub matches: fn(&SetContext) -> bool,
    pub apply: fn(&SetContext) -> f64,
}

impl std::fmt::Debug for ResistanceRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResistanceRule")
            .field("name", &self.name)
            .finish()
    }
}

/// Default equipment conventions, in resolution order.
pub const DEFAULT_RULES: &[ResistanceRule] = &[
    // Logged as one side of plates.
    ResistanceRule {
        name: "barbell",
        matches: |c| c.exercise.contains("barbell"),
        apply: |c| 2.0 * c.recorded + BAR_WEIGHT_LBS,
    },
    // Logged as the assistance offset.
    ResistanceRule {
        name: "assisted",
        matches: |c| c.exercise.contains("assisted"),
        apply: |c| c.bodyweight - c.recorded,
    },
    ResistanceRule {
        name: "smith",
        matches: |c| c.exercise.contains("smith") || c.notes.contains("smith"),
        apply: |c| 2.0 * c.recorded,
    },
    ResistanceRule {
        name: "bodyweight",
        matches: |c| c.exercise.contains("pull up") || c.notes.contains("chest dip"),
        apply: |c| c.bodyweight,
    },
];

/// Applies an ordered resistance rule table to raw sets.
#[derive(Debug, Clone)]
pub struct Normalizer {
    rules: Vec<ResistanceRule>,
    bodyweight: f64,
}

impl Normalizer {
    /// Normalizer using [`DEFAULT_RULES`] and the given reference bodyweight (lbs).
    pub fn new(bodyweight: f64) -> Self {
        Self::with_rules(DEFAULT_RULES.to_vec(), bodyweight)
    }

    pub fn with_rules(rules: Vec<ResistanceRule>, bodyweight: f64) -> Self {
        Self { rules, bodyweight }
    }

    pub fn bodyweight(&self) -> f64 {
        self.bodyweight
    }

    pub fn effective_resistance(&self, exercise: &str, notes: &str, recorded: f64) -> f64 {
        let ctx = SetContext::new(exercise, notes, recorded, self.bodyweight);
        self.rules
            .iter()
            .find(|r| (r.matches)(&ctx))
            .map_or(recorded, |r| (r.apply)(&ctx))
    }
}

/// Effective resistance for one set under the default rule table.
pub fn normalize(exercise: &str, notes: &str, recorded: f64, reference_bodyweight: f64) -> f64 {
    Normalizer::new(reference_bodyweight).effective_resistance(exercise, notes, recorded)
}

/// Estimated kilocalories for one set.
///
/// Duration is `duration_seconds` when present and nonzero, otherwise
/// `reps * 3` seconds. The effective resistance does not enter the MET model.
pub fn estimate_energy(
    exercise: &str,
    _effective_resistance: f64,
    reps: u32,
    duration_seconds: Option<u32>,
    reference_bodyweight: f64,
) -> f64 {
    let met = reference::met_for(exercise);
    let weight_kg = reference_bodyweight * LB_TO_KG;
    let seconds = match duration_seconds {
        Some(s) if s > 0 => f64::from(s),
        _ => f64::from(reps) * SECONDS_PER_REP,
    };
    met * 3.5 * weight_kg / 200.0 * (seconds / 60.0)
}

/// Muscle groups for `exercise`. Unmapped names are reported and yield an
/// empty list.
pub fn muscle_groups(exercise: &str) -> Vec<String> {
    match reference::muscles_for(exercise) {
        Some(groups) => groups.iter().map(|g| g.to_string()).collect(),
        None => {
            tracing::warn!(exercise, "no muscle group mapping for exercise");
            metrics::counter!("fitness_digest_unmapped_exercise_total").increment(1);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn barbell_doubles_plates_and_adds_bar() {
        assert_eq!(normalize("Squat (Barbell)", "", 95.0, 160.0), 235.0);
    }

    #[test]
    fn barbell_wins_over_later_rules() {
        // notes mention smith, barbell still resolves first
        assert_eq!(normalize("Bench (Barbell)", "smith rack", 50.0, 160.0), 145.0);
    }

    #[test]
    fn assisted_subtracts_from_bodyweight() {
        assert_eq!(normalize("Pull Up (Assisted)", "", 40.0, 160.0), 120.0);
    }

    #[test]
    fn smith_matches_name_or_notes() {
        assert_eq!(normalize("Overhead Press (Smith Machine)", "", 30.0, 160.0), 60.0);
        assert_eq!(normalize("Incline Bench Press", "Used SMITH", 30.0, 160.0), 60.0);
    }

    #[test]
    fn bodyweight_movements_ignore_recorded() {
        assert_eq!(normalize("Pull Up", "", 0.0, 172.0), 172.0);
        assert_eq!(normalize("Dips", "chest dip focus", 25.0, 172.0), 172.0);
    }

    #[test]
    fn unmatched_keeps_recorded() {
        assert_eq!(normalize("Lateral Raise (Dumbbell)", "", 20.0, 160.0), 20.0);
    }

    #[test]
    fn custom_rule_table_is_respected() {
        let rules = vec![ResistanceRule {
            name: "kettlebell",
            matches: |c| c.exercise.contains("kettlebell"),
            apply: |c| c.recorded * 2.2,
        }];
        let n = Normalizer::with_rules(rules, 160.0);
        assert!(close(n.effective_resistance("Swing (Kettlebell)", "", 10.0), 22.0));
        assert_eq!(n.effective_resistance("Squat (Barbell)", "", 10.0), 10.0);
    }

    #[test]
    fn energy_derives_duration_from_reps() {
        let kcal = estimate_energy("Squat (Barbell)", 235.0, 5, None, 160.0);
        let expected = 7.0 * 3.5 * (160.0 * LB_TO_KG) / 200.0 * (15.0 / 60.0);
        assert!(close(kcal, expected));
    }

    #[test]
    fn energy_prefers_explicit_duration_and_defaults_met() {
        let kcal = estimate_energy("Farmer Walk", 0.0, 10, Some(60), 160.0);
        let expected = 5.0 * 3.5 * (160.0 * LB_TO_KG) / 200.0;
        assert!(close(kcal, expected));
        let zero_duration = estimate_energy("Farmer Walk", 0.0, 10, Some(0), 160.0);
        assert!(close(zero_duration, expected * 0.5));
    }

    #[test]
    fn unmapped_exercise_yields_empty_muscles() {
        assert!(muscle_groups("Zercher Carry").is_empty());
        assert_eq!(muscle_groups("Face Pull"), vec!["Rear Delts", "Traps"]);
    }
}
