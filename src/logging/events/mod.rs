mod catalog_event;
mod entry_event;
mod guard_event;

pub use catalog_event::*;
pub use entry_event::*;
pub use guard_event::*;
