use crate::{documents::Game, Status};
use async_trait::async_trait;

/// Operations offered by the remote catalog service. Implementations hold
/// the access credential and send it along with every call.
///
/// The service enforces no business rules. Any call may fail with a
/// connectivity `Status` that callers must propagate.
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Returns true if the service is reachable and accepts the credential.
    async fn check_access(&self) -> Result<bool, Status>;

    async fn fetch_all_games(&self) -> Result<Vec<Game>, Status>;

    async fn add_vote(&self, game_id: i64) -> Result<bool, Status>;

    /// Creates a wanted game with zero votes.
    async fn add_game(&self, title: &str) -> Result<bool, Status>;

    async fn mark_owned(&self, game_id: i64) -> Result<bool, Status>;
}
