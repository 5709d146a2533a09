use crate::{
    documents::Game,
    logging::{CatalogEvent, CatalogOp},
    traits::CatalogService,
    util::settings::Settings,
    Status,
};
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{instrument, warn};

use super::session::CatalogSession;

/// Client of the remote catalog service speaking JSON over HTTP. Every call
/// runs in its own `CatalogSession`.
#[derive(Clone)]
pub struct CatalogApi {
    url: String,
    api_key: String,
}

impl CatalogApi {
    pub fn new(url: &str, api_key: &str) -> Self {
        CatalogApi {
            url: String::from(url),
            api_key: String::from(api_key),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        CatalogApi::new(&settings.catalog_url, &settings.api_key)
    }

    async fn call<B: Serialize, R: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: B,
    ) -> Result<R, Status> {
        let result = match CatalogSession::open(&self.url, endpoint) {
            Ok(mut session) => session.call(&body).await,
            Err(status) => Err(status),
        };
        result.map_err(|status| self.handle_service_fault(endpoint, status))
    }

    /// Inspects a failed call before it is handed back to the caller. The
    /// status is returned unchanged.
    fn handle_service_fault(&self, endpoint: &str, status: Status) -> Status {
        warn!("catalog call '{endpoint}' failed: {status}");
        status
    }
}

#[async_trait]
impl CatalogService for CatalogApi {
    #[instrument(level = "trace", skip(self))]
    async fn check_access(&self) -> Result<bool, Status> {
        let response = self
            .call(
                CHECK_KEY,
                KeyRequest {
                    api_key: &self.api_key,
                },
            )
            .await;
        CatalogEvent::check_access(&response);
        response
    }

    #[instrument(level = "trace", skip(self))]
    async fn fetch_all_games(&self) -> Result<Vec<Game>, Status> {
        let response = self
            .call(
                GET_GAMES,
                KeyRequest {
                    api_key: &self.api_key,
                },
            )
            .await;
        CatalogEvent::fetch_all_games(&response);
        response
    }

    #[instrument(level = "trace", skip(self))]
    async fn add_vote(&self, game_id: i64) -> Result<bool, Status> {
        let response = self
            .call(
                ADD_VOTE,
                GameRequest {
                    game_id,
                    api_key: &self.api_key,
                },
            )
            .await;
        CatalogEvent::write(CatalogOp::AddVote(game_id), &response);
        response
    }

    #[instrument(level = "trace", skip(self))]
    async fn add_game(&self, title: &str) -> Result<bool, Status> {
        let response = self
            .call(
                ADD_GAME,
                TitleRequest {
                    title,
                    api_key: &self.api_key,
                },
            )
            .await;
        CatalogEvent::write(CatalogOp::AddGame(title.to_owned()), &response);
        response
    }

    #[instrument(level = "trace", skip(self))]
    async fn mark_owned(&self, game_id: i64) -> Result<bool, Status> {
        let response = self
            .call(
                SET_GOT_IT,
                GameRequest {
                    game_id,
                    api_key: &self.api_key,
                },
            )
            .await;
        CatalogEvent::write(CatalogOp::MarkOwned(game_id), &response);
        response
    }
}

#[derive(Serialize)]
struct KeyRequest<'a> {
    api_key: &'a str,
}

#[derive(Serialize)]
struct GameRequest<'a> {
    game_id: i64,
    api_key: &'a str,
}

#[derive(Serialize)]
struct TitleRequest<'a> {
    title: &'a str,
    api_key: &'a str,
}

const CHECK_KEY: &str = "check_key";
const GET_GAMES: &str = "games";
const ADD_VOTE: &str = "add_vote";
const ADD_GAME: &str = "add_game";
const SET_GOT_IT: &str = "set_got_it";
