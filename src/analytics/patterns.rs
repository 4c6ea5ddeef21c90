//! Pattern analyzer: turns the raw check-in/reset history into the aggregate
//! behavioral signals the recommendation ranker consumes. Pure function of
//! the supplied snapshot, recomputed on every call.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::{Datelike, Timelike};

use crate::domain::checkin::{MoodCheckIn, ResetLog};
use crate::domain::practice::Mood;
use crate::history::History;

/// Improvement value assumed wherever no signal exists.
pub const NEUTRAL_IMPROVEMENT: f64 = 0.5;

const PREFERRED_LIMIT: usize = 5;

/// Mean improvement observed for one practice under one mood.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PracticeEffectiveness {
    pub practice_id: String,
    pub mood: Mood,
    pub score: f64,
    pub usage_count: u32,
    pub positive_count: u32,
}

/// Aggregate signal bundle derived from one user's history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPatterns {
    /// Mean improvement across resets that carry an explicit outcome.
    pub avg_improvement: f64,
    /// Up to five practice ids by historical mean improvement, best first.
    pub preferred_practices: Vec<String>,
    /// Mean improvement keyed by UTC hour of day (0-23); absent hour = no
    /// signal. Lookups must use the same UTC basis.
    pub hour_of_day: HashMap<u32, f64>,
    /// Mean improvement keyed by UTC day of week (0=Sunday..6); absent = no
    /// signal.
    pub day_of_week: HashMap<u32, f64>,
    pub effectiveness: Vec<PracticeEffectiveness>,
    /// Number of resets that could be linked to a check-in.
    pub sample_count: u32,
}

impl UserPatterns {
    /// True when no reset could be aggregated; the ranker must fall back to
    /// the neutral catalog-order path in that case.
    pub fn is_empty(&self) -> bool {
        self.sample_count == 0
    }

    pub fn effectiveness_for(&self, practice_id: &str, mood: Mood) -> Option<f64> {
        self.effectiveness
            .iter()
            .find(|e| e.practice_id == practice_id && e.mood == mood)
            .map(|e| e.score)
    }
}

#[derive(Default)]
struct Accumulator {
    total: f64,
    count: u32,
    positive: u32,
}

impl Accumulator {
    fn add(&mut self, improvement: f64) {
        self.total += improvement;
        self.count += 1;
        if improvement >= 1.0 {
            self.positive += 1;
        }
    }

    fn mean(&self) -> f64 {
        if self.count == 0 {
            NEUTRAL_IMPROVEMENT
        } else {
            self.total / self.count as f64
        }
    }
}

/// Links a reset back to its check-in. The explicit back-reference wins;
/// first-match by practice id covers legacy records without one.
fn link_check_in<'a>(check_ins: &'a [MoodCheckIn], reset: &ResetLog) -> Option<&'a MoodCheckIn> {
    if let Some(id) = &reset.check_in_id {
        if let Some(check_in) = check_ins.iter().find(|ci| ci.id == *id) {
            return Some(check_in);
        }
    }
    check_ins.iter().find(|ci| ci.practice_id == reset.practice_id)
}

pub fn analyze(history: &History) -> UserPatterns {
    let mut hour_acc: HashMap<u32, Accumulator> = HashMap::new();
    let mut day_acc: HashMap<u32, Accumulator> = HashMap::new();
    // Vec keyed by first encounter so ties in the rankings stay stable.
    let mut by_practice: Vec<(String, Accumulator)> = Vec::new();
    let mut by_pair: Vec<(String, Mood, Accumulator)> = Vec::new();
    let mut outcome_total = 0.0;
    let mut outcome_count = 0u32;
    let mut sample_count = 0u32;

    for reset in &history.resets {
        let Some(check_in) = link_check_in(&history.check_ins, reset) else {
            // Unmatched rows are skipped rather than treated as fatal.
            continue;
        };

        let improvement = reset
            .outcome
            .map(|o| o.improvement())
            .unwrap_or(NEUTRAL_IMPROVEMENT);
        if let Some(outcome) = reset.outcome {
            outcome_total += outcome.improvement();
            outcome_count += 1;
        }

        hour_acc
            .entry(reset.started_at.hour())
            .or_default()
            .add(improvement);
        day_acc
            .entry(reset.started_at.weekday().num_days_from_sunday())
            .or_default()
            .add(improvement);

        match by_practice.iter_mut().find(|(id, _)| *id == reset.practice_id) {
            Some((_, acc)) => acc.add(improvement),
            None => {
                let mut acc = Accumulator::default();
                acc.add(improvement);
                by_practice.push((reset.practice_id.clone(), acc));
            }
        }

        let mood = check_in.mood;
        match by_pair
            .iter_mut()
            .find(|(id, m, _)| *id == reset.practice_id && *m == mood)
        {
            Some((_, _, acc)) => acc.add(improvement),
            None => {
                let mut acc = Accumulator::default();
                acc.add(improvement);
                by_pair.push((reset.practice_id.clone(), mood, acc));
            }
        }

        sample_count += 1;
    }

    let avg_improvement = if outcome_count > 0 {
        outcome_total / outcome_count as f64
    } else {
        NEUTRAL_IMPROVEMENT
    };

    let mut ranked: Vec<(String, f64)> = by_practice
        .into_iter()
        .map(|(id, acc)| (id, acc.mean()))
        .collect();
    // Stable sort keeps encounter order for equal means.
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    let preferred_practices = ranked
        .into_iter()
        .take(PREFERRED_LIMIT)
        .map(|(id, _)| id)
        .collect();

    let hour_of_day = hour_acc.into_iter().map(|(h, acc)| (h, acc.mean())).collect();
    let day_of_week = day_acc.into_iter().map(|(d, acc)| (d, acc.mean())).collect();

    let effectiveness = by_pair
        .into_iter()
        .map(|(practice_id, mood, acc)| PracticeEffectiveness {
            practice_id,
            mood,
            score: acc.mean(),
            usage_count: acc.count,
            positive_count: acc.positive,
        })
        .collect();

    tracing::debug!(
        samples = sample_count,
        avg_improvement,
        "analyzed reset history"
    );

    UserPatterns {
        avg_improvement,
        preferred_practices,
        hour_of_day,
        day_of_week,
        effectiveness,
        sample_count,
    }
}
