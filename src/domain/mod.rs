pub mod checkin;
pub mod practice;

pub use checkin::{MoodCheckIn, Outcome, ResetLog};
pub use practice::{BreathingCue, Category, Mood, Practice, TimeBudget};
