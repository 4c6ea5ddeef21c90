use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::practice::{Mood, TimeBudget};

/// Post-practice self report, set once when a timer session completes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Better,
    Same,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Better => "better",
            Outcome::Same => "same",
        }
    }

    /// Improvement contribution used by the pattern analyzer.
    pub fn improvement(&self) -> f64 {
        match self {
            Outcome::Better => 1.0,
            Outcome::Same => 0.0,
        }
    }
}

/// One mood submission. The practice id is attached at recommendation time
/// and may be swapped when the user rotates to an alternate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodCheckIn {
    pub id: String,
    pub mood: Mood,
    pub on_shift: bool,
    pub time_budget: TimeBudget,
    pub timestamp: DateTime<Utc>,
    pub practice_id: String,
    pub outcome: Option<Outcome>,
}

impl MoodCheckIn {
    pub fn new(
        mood: Mood,
        on_shift: bool,
        time_budget: TimeBudget,
        practice_id: impl Into<String>,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            mood,
            on_shift,
            time_budget,
            timestamp: at,
            practice_id: practice_id.into(),
            outcome: None,
        }
    }
}

/// One completed or explicitly logged timer session. Never mutated after
/// creation except for the write-once outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetLog {
    pub id: String,
    pub practice_id: String,
    pub mood: Mood,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub time_budget: TimeBudget,
    pub outcome: Option<Outcome>,
    /// Back-reference to the originating check-in; legacy records lack it.
    pub check_in_id: Option<String>,
}

impl ResetLog {
    pub fn new(
        practice_id: impl Into<String>,
        mood: Mood,
        time_budget: TimeBudget,
        started_at: DateTime<Utc>,
        completed_at: Option<DateTime<Utc>>,
        check_in_id: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            practice_id: practice_id.into(),
            mood,
            started_at,
            completed_at,
            time_budget,
            outcome: None,
            check_in_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn outcome_improvement_values() {
        assert_eq!(Outcome::Better.improvement(), 1.0);
        assert_eq!(Outcome::Same.improvement(), 0.0);
    }

    #[test]
    fn new_records_get_unique_ids_and_no_outcome() {
        let at = Utc.with_ymd_and_hms(2026, 3, 9, 14, 0, 0).unwrap();
        let a = MoodCheckIn::new(Mood::Stressed, true, TimeBudget::Short, "box-breathing", at);
        let b = MoodCheckIn::new(Mood::Stressed, true, TimeBudget::Short, "box-breathing", at);
        assert_ne!(a.id, b.id);
        assert!(a.outcome.is_none());

        let reset = ResetLog::new(
            "box-breathing",
            Mood::Stressed,
            TimeBudget::Short,
            at,
            None,
            Some(a.id.clone()),
        );
        assert_eq!(reset.check_in_id.as_deref(), Some(a.id.as_str()));
        assert!(reset.outcome.is_none());
    }
}
