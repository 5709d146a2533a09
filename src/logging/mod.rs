mod event_span;
mod events;
mod log_event;
mod log_layer;

use event_span::*;
pub use events::*;
pub use log_event::*;
pub use log_layer::VotingLogsLayer;
