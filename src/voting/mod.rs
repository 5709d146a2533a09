mod calendar;
mod clock;
mod guard;
mod manager;

#[cfg(test)]
pub(crate) mod testing;

pub use calendar::{can_enter_today, default_last_entry, Denial, Eligibility, VotingCalendar};
pub use clock::{Clock, FixedClock, SystemClock};
pub use guard::{CatalogGuard, LatestSnapshot, SnapshotStrategy};
pub use manager::VotingManager;
