//! Per-user record set. Passed by value into the analyzers on every call;
//! nothing in the engine keeps its own copy between calls.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::checkin::{MoodCheckIn, Outcome, ResetLog};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HistoryError {
    #[error("unknown check-in id {0}")]
    UnknownCheckIn(String),
    #[error("unknown reset id {0}")]
    UnknownReset(String),
    #[error("outcome already recorded for reset {0}")]
    OutcomeAlreadySet(String),
}

/// Everything the persistence collaborator has stored for one user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct History {
    pub check_ins: Vec<MoodCheckIn>,
    pub resets: Vec<ResetLog>,
}

impl History {
    pub fn is_empty(&self) -> bool {
        self.check_ins.is_empty() && self.resets.is_empty()
    }

    /// Appends a committed mood submission and returns its id.
    pub fn record_check_in(&mut self, check_in: MoodCheckIn) -> String {
        let id = check_in.id.clone();
        self.check_ins.push(check_in);
        id
    }

    /// Swaps the practice attached to a check-in when the user rotates to a
    /// different suggestion.
    pub fn reassign_practice(
        &mut self,
        check_in_id: &str,
        practice_id: &str,
    ) -> Result<(), HistoryError> {
        let check_in = self
            .check_ins
            .iter_mut()
            .find(|ci| ci.id == check_in_id)
            .ok_or_else(|| HistoryError::UnknownCheckIn(check_in_id.to_string()))?;
        check_in.practice_id = practice_id.to_string();
        Ok(())
    }

    /// Appends a finished timer session. A reset carrying a back-reference
    /// must point at a check-in we actually have.
    pub fn log_reset(&mut self, reset: ResetLog) -> Result<String, HistoryError> {
        if let Some(check_in_id) = &reset.check_in_id {
            if !self.check_ins.iter().any(|ci| ci.id == *check_in_id) {
                return Err(HistoryError::UnknownCheckIn(check_in_id.clone()));
            }
        }
        let id = reset.id.clone();
        self.resets.push(reset);
        Ok(id)
    }

    /// Write-once: stores the post-practice self report on the reset and,
    /// when still unset, on the linked check-in.
    pub fn record_outcome(&mut self, reset_id: &str, outcome: Outcome) -> Result<(), HistoryError> {
        let reset = self
            .resets
            .iter_mut()
            .find(|r| r.id == reset_id)
            .ok_or_else(|| HistoryError::UnknownReset(reset_id.to_string()))?;
        if reset.outcome.is_some() {
            return Err(HistoryError::OutcomeAlreadySet(reset_id.to_string()));
        }
        reset.outcome = Some(outcome);

        let check_in_id = reset.check_in_id.clone();
        let practice_id = reset.practice_id.clone();
        let check_in = match check_in_id {
            Some(id) => self.check_ins.iter_mut().find(|ci| ci.id == id),
            None => self
                .check_ins
                .iter_mut()
                .find(|ci| ci.practice_id == practice_id),
        };
        if let Some(check_in) = check_in {
            if check_in.outcome.is_none() {
                check_in.outcome = Some(outcome);
            }
        }
        Ok(())
    }

    /// Bulk wipe. Records are never deleted individually.
    pub fn clear(&mut self) {
        self.check_ins.clear();
        self.resets.clear();
    }
}
