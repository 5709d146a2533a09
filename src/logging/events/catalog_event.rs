use serde::{Deserialize, Serialize};

use crate::{documents::Game, log_event, logging::LogEvent, Status};

/// A single call made to the remote catalog service.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct CatalogEvent {
    op: CatalogOp,
    result: Response,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub enum CatalogOp {
    CheckAccess,
    FetchAllGames,
    AddVote(i64),
    AddGame(String),
    MarkOwned(i64),
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
enum Response {
    Accepted(bool),
    Games(usize),
    Error(String),
}

impl CatalogEvent {
    pub fn check_access(response: &Result<bool, Status>) {
        log_event!(LogEvent::Catalog(CatalogEvent {
            op: CatalogOp::CheckAccess,
            result: accepted(response),
        }))
    }

    pub fn fetch_all_games(response: &Result<Vec<Game>, Status>) {
        log_event!(LogEvent::Catalog(CatalogEvent {
            op: CatalogOp::FetchAllGames,
            result: match response {
                Ok(games) => Response::Games(games.len()),
                Err(status) => Response::Error(status.to_string()),
            },
        }))
    }

    pub fn write(op: CatalogOp, response: &Result<bool, Status>) {
        log_event!(LogEvent::Catalog(CatalogEvent {
            op,
            result: accepted(response),
        }))
    }
}

fn accepted(response: &Result<bool, Status>) -> Response {
    match response {
        Ok(accepted) => Response::Accepted(*accepted),
        Err(status) => Response::Error(status.to_string()),
    }
}
