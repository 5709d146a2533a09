use crate::{
    documents::Snapshot,
    logging::{GuardEvent, RejectReason, Verdict},
    traits::CatalogService,
    Status,
};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::instrument;

/// Provides the catalog snapshot that a mutation is validated against.
#[async_trait]
pub trait SnapshotStrategy: Send + Sync {
    async fn snapshot(&self, catalog: &dyn CatalogService) -> Result<Snapshot, Status>;
}

/// Optimistic revalidation against the latest snapshot.
///
/// The remote store has no transactional read-modify-write, so the full
/// catalog is fetched again right before every write. Two clients can still
/// race between the fetch and the write.
#[derive(Default, Clone, Copy, Debug)]
pub struct LatestSnapshot;

#[async_trait]
impl SnapshotStrategy for LatestSnapshot {
    async fn snapshot(&self, catalog: &dyn CatalogService) -> Result<Snapshot, Status> {
        Ok(Snapshot::new(catalog.fetch_all_games().await?))
    }
}

/// Applies the catalog business rules the remote service does not enforce.
///
/// Rule violations come back as `Ok(false)` and nothing is written.
/// Failures talking to the service come back as `Err`.
pub struct CatalogGuard {
    catalog: Arc<dyn CatalogService>,
    strategy: Box<dyn SnapshotStrategy>,
}

impl CatalogGuard {
    pub fn new(catalog: Arc<dyn CatalogService>) -> Self {
        CatalogGuard::with_strategy(catalog, Box::new(LatestSnapshot))
    }

    pub fn with_strategy(
        catalog: Arc<dyn CatalogService>,
        strategy: Box<dyn SnapshotStrategy>,
    ) -> Self {
        CatalogGuard { catalog, strategy }
    }

    async fn revalidate(&self) -> Result<Snapshot, Status> {
        self.strategy.snapshot(self.catalog.as_ref()).await
    }

    /// Adds a vote to a game that is still wanted.
    #[instrument(level = "info", name = "guard::vote_for_game", skip(self))]
    pub async fn vote_for_game(&self, game_id: i64) -> Result<bool, Status> {
        let snapshot = self.revalidate().await?;
        if !snapshot.is_wanted(game_id) {
            GuardEvent::vote(game_id, Verdict::Rejected(RejectReason::NotWanted));
            return Ok(false);
        }

        let accepted = self.catalog.add_vote(game_id).await?;
        GuardEvent::vote(game_id, Verdict::Written { accepted });
        Ok(accepted)
    }

    /// Adds a new wanted title unless one with the exact same (trimmed) title
    /// exists under any status.
    #[instrument(level = "info", name = "guard::add_new_game", skip(self))]
    pub async fn add_new_game_to_voting_list(&self, title: &str) -> Result<bool, Status> {
        let title = title.trim();
        let snapshot = self.revalidate().await?;
        if snapshot.has_title(title) {
            GuardEvent::add_title(title, Verdict::Rejected(RejectReason::DuplicateTitle));
            return Ok(false);
        }

        let accepted = self.catalog.add_game(title).await?;
        GuardEvent::add_title(title, Verdict::Written { accepted });
        Ok(accepted)
    }

    /// Moves a wanted game to owned. Owned and unknown ids are rejected.
    #[instrument(level = "info", name = "guard::mark_owned", skip(self))]
    pub async fn mark_existing_game_as_owned(&self, game_id: i64) -> Result<bool, Status> {
        let snapshot = self.revalidate().await?;
        if !snapshot.is_wanted(game_id) {
            GuardEvent::mark_owned(game_id, Verdict::Rejected(RejectReason::NotWanted));
            return Ok(false);
        }

        let accepted = self.catalog.mark_owned(game_id).await?;
        GuardEvent::mark_owned(game_id, Verdict::Written { accepted });
        Ok(accepted)
    }
}
