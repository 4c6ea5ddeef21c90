//! Weekly trend aggregate consumed by the insights screen. Chart rendering
//! itself lives with the caller.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::history::History;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeeklyPoint {
    pub date: NaiveDate,
    /// Short weekday label, e.g. "Mon".
    pub label: String,
    pub check_ins: u32,
    pub resets: u32,
}

impl WeeklyPoint {
    fn activity(&self) -> u32 {
        self.check_ins + self.resets
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklySummary {
    /// One point per day for the trailing week, oldest first.
    pub points: Vec<WeeklyPoint>,
    /// Consecutive active days ending at the most recent active run.
    pub streak: u32,
    /// Label of the busiest active day, if any day was active.
    pub best_day: Option<String>,
}

/// Builds the trailing-week aggregate ending at `today`. Records are
/// bucketed by their UTC calendar date, so `today` must be the current UTC
/// date (`Utc::now().date_naive()`), not a local one.
pub fn weekly_summary(history: &History, today: NaiveDate) -> WeeklySummary {
    let mut points = Vec::with_capacity(7);
    for offset in (0..7).rev() {
        let day = today - Duration::days(offset);
        let check_ins = history
            .check_ins
            .iter()
            .filter(|ci| ci.timestamp.date_naive() == day)
            .count() as u32;
        let resets = history
            .resets
            .iter()
            .filter(|r| r.started_at.date_naive() == day)
            .count() as u32;
        points.push(WeeklyPoint {
            date: day,
            label: day.format("%a").to_string(),
            check_ins,
            resets,
        });
    }

    let mut streak = 0;
    let mut best: Option<&WeeklyPoint> = None;
    for point in &points {
        if point.activity() > 0 {
            streak += 1;
            if best.map_or(true, |b| point.activity() > b.activity()) {
                best = Some(point);
            }
        } else {
            streak = 0;
        }
    }
    let best_day = best.map(|b| b.label.clone());

    WeeklySummary {
        points,
        streak,
        best_day,
    }
}
