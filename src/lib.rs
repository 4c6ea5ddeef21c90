//! Recommendation core for a physician micro-reset app.
//!
//! Users log a mood check-in, get a suggested short practice, run it, and
//! report whether it helped. This crate holds the parts of that loop with
//! actual logic in them: the static practice catalog, the per-user record
//! set, the pattern analyzer that distills history into signals, and the
//! ranker that turns signals plus the current request into an ordered
//! recommendation. Storage, auth, timers, and screens belong to the caller;
//! everything here is a pure function over an in-memory history snapshot.

pub mod analytics;
pub mod content;
pub mod domain;
pub mod history;
pub mod services;

pub use analytics::patterns::{analyze, PracticeEffectiveness, UserPatterns};
pub use analytics::weekly::{weekly_summary, WeeklyPoint, WeeklySummary};
pub use content::{catalog, practice_by_id, validate_catalog, CatalogError};
pub use domain::checkin::{MoodCheckIn, Outcome, ResetLog};
pub use domain::practice::{BreathingCue, Category, Mood, Practice, TimeBudget};
pub use history::{History, HistoryError};
pub use services::classify::{classify_mood, MoodGuess};
pub use services::recommend::{
    recommend, recommend_now, Recommendation, RecommendContext, Source,
};
