use serde::{Deserialize, Serialize};

use crate::{log_event, logging::LogEvent};

/// Decision taken by the catalog guard for one mutation attempt.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub enum GuardEvent {
    Vote(i64, Verdict),
    AddTitle(String, Verdict),
    MarkOwned(i64, Verdict),
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub enum Verdict {
    /// Validation passed and the write was issued.
    Written { accepted: bool },

    /// Validation failed against the snapshot and nothing was written.
    Rejected(RejectReason),
}

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Debug)]
pub enum RejectReason {
    NotWanted,
    DuplicateTitle,
}

impl GuardEvent {
    pub fn vote(game_id: i64, verdict: Verdict) {
        log_event!(LogEvent::Guard(GuardEvent::Vote(game_id, verdict)))
    }

    pub fn add_title(title: &str, verdict: Verdict) {
        log_event!(LogEvent::Guard(GuardEvent::AddTitle(
            title.to_owned(),
            verdict
        )))
    }

    pub fn mark_owned(game_id: i64, verdict: Verdict) {
        log_event!(LogEvent::Guard(GuardEvent::MarkOwned(game_id, verdict)))
    }
}
