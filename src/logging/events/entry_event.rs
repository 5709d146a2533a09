use serde::{Deserialize, Serialize};

use crate::{log_event, logging::LogEvent, voting::Denial};

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub enum EntryEvent {
    Denied(Vec<Denial>),
    Recorded,
}

impl EntryEvent {
    pub fn denied(denials: Vec<Denial>) {
        log_event!(LogEvent::Entry(EntryEvent::Denied(denials)))
    }

    pub fn recorded() {
        log_event!(LogEvent::Entry(EntryEvent::Recorded))
    }
}
