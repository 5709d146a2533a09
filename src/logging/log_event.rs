use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{CatalogEvent, EntryEvent, GuardEvent};

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub enum LogEvent {
    Catalog(CatalogEvent),
    Guard(GuardEvent),
    Entry(EntryEvent),
}

impl LogEvent {
    pub fn encode(&self) -> String {
        match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => {
                warn!("{}", e);
                String::default()
            }
        }
    }
}

#[macro_export]
macro_rules! log_event {
    ($event:expr) => {
        ::tracing::info!(event = $event.encode())
    };
}
