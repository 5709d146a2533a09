use crate::{
    documents::Game,
    traits::CatalogService,
    util::settings::Settings,
    voting::{
        calendar::{self, Eligibility, VotingCalendar},
        clock::{Clock, SystemClock},
        guard::CatalogGuard,
    },
    Status,
};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::instrument;

/// Business rules of the voting store, kept apart from the catalog service
/// so the service can be swapped without touching the rules.
pub struct VotingManager {
    catalog: Arc<dyn CatalogService>,
    guard: CatalogGuard,
    calendar: VotingCalendar,
    clock: Arc<dyn Clock>,
}

impl VotingManager {
    pub fn new(catalog: Arc<dyn CatalogService>, calendar: VotingCalendar) -> Self {
        VotingManager::with_clock(catalog, calendar, Arc::new(SystemClock))
    }

    pub fn with_clock(
        catalog: Arc<dyn CatalogService>,
        calendar: VotingCalendar,
        clock: Arc<dyn Clock>,
    ) -> Self {
        VotingManager {
            guard: CatalogGuard::new(Arc::clone(&catalog)),
            catalog,
            calendar,
            clock,
        }
    }

    pub fn from_settings(
        catalog: Arc<dyn CatalogService>,
        settings: &Settings,
    ) -> Result<Self, Status> {
        Ok(VotingManager::new(
            catalog,
            VotingCalendar::from_settings(settings)?,
        ))
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Returns `Ok(false)` if the service is reachable but rejects the
    /// credential. Connection failures are returned as errors so callers
    /// can inspect them.
    #[instrument(level = "trace", skip(self))]
    pub async fn is_connection_working(&self) -> Result<bool, Status> {
        self.catalog.check_access().await
    }

    #[instrument(level = "trace", skip(self))]
    pub async fn get_all_games(&self) -> Result<Vec<Game>, Status> {
        self.catalog.fetch_all_games().await
    }

    /// True if the user's last entry was yesterday at the latest.
    pub fn is_this_user_able_to_add_new_entry(&self, last_entry: DateTime<Utc>) -> bool {
        calendar::can_enter_today(self.now(), last_entry)
    }

    /// True if today is a voting day in the office timezone.
    pub fn are_entries_allowed_right_now(&self) -> bool {
        self.calendar.is_voting_day(self.now())
    }

    /// Last entry assumed for a client that has no entry record.
    pub fn default_last_entry(&self) -> DateTime<Utc> {
        calendar::default_last_entry(self.now())
    }

    pub fn eligibility(&self, last_entry: Option<DateTime<Utc>>) -> Eligibility {
        let now = self.now();
        let last_entry = last_entry.unwrap_or_else(|| calendar::default_last_entry(now));
        self.calendar.eligibility(now, last_entry)
    }

    pub async fn mark_existing_game_as_owned(&self, game_id: i64) -> Result<bool, Status> {
        self.guard.mark_existing_game_as_owned(game_id).await
    }

    pub async fn add_new_game_to_voting_list(&self, title: &str) -> Result<bool, Status> {
        self.guard.add_new_game_to_voting_list(title).await
    }

    pub async fn vote_for_game(&self, game_id: i64) -> Result<bool, Status> {
        self.guard.vote_for_game(game_id).await
    }
}
