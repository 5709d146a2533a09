use crate::{
    documents::Snapshot,
    http::{
        messages::*,
        models::{self, Message, StorePage, WantedPage},
        resources::last_entry_cookie,
    },
    logging::EntryEvent,
    voting::VotingManager,
};
use chrono::{DateTime, Utc};
use std::{convert::Infallible, sync::Arc};
use tracing::{error, info, instrument, warn};
use warp::http::StatusCode;

#[instrument(level = "trace")]
pub async fn welcome() -> Result<impl warp::Reply, Infallible> {
    info!(
        http_request.request_method = "GET",
        http_request.request_url = "/",
        "welcome"
    );
    Ok("welcome")
}

#[instrument(level = "info", name = "get_games", skip(manager))]
pub async fn get_games(
    last_entry: Option<DateTime<Utc>>,
    manager: Arc<VotingManager>,
) -> Result<Box<dyn warp::Reply>, Infallible> {
    if let Some(reply) = check_connection(&manager).await {
        return Ok(reply);
    }

    // One fetch serves both lists.
    let (owned, wanted) = match manager.get_all_games().await {
        Ok(games) => Snapshot::new(games).split(),
        Err(status) => {
            error!("get_games: {status}");
            return Ok(message(
                Message::error(ERROR_MESSAGE_FETCH_GAMES),
                StatusCode::SERVICE_UNAVAILABLE,
            ));
        }
    };

    let eligibility = manager.eligibility(last_entry);
    Ok(Box::new(warp::reply::json(&StorePage::new(
        owned,
        wanted,
        eligibility,
    ))))
}

#[instrument(level = "info", name = "get_wanted", skip(manager))]
pub async fn get_wanted(manager: Arc<VotingManager>) -> Result<Box<dyn warp::Reply>, Infallible> {
    if let Some(reply) = check_connection(&manager).await {
        return Ok(reply);
    }

    match manager.get_all_games().await {
        Ok(games) => Ok(Box::new(warp::reply::json(&WantedPage {
            wanted: Snapshot::new(games).wanted().cloned().collect(),
        }))),
        Err(status) => {
            error!("get_wanted: {status}");
            Ok(message(
                Message::error(ERROR_MESSAGE_FETCH_GAMES),
                StatusCode::SERVICE_UNAVAILABLE,
            ))
        }
    }
}

#[instrument(level = "info", name = "post_vote", skip(manager))]
pub async fn post_vote(
    vote: models::Vote,
    last_entry: Option<DateTime<Utc>>,
    manager: Arc<VotingManager>,
) -> Result<Box<dyn warp::Reply>, Infallible> {
    if vote.game_id < 0 {
        return Ok(message(
            Message::error(ERROR_MESSAGE_CHOOSE_GAME),
            StatusCode::BAD_REQUEST,
        ));
    }
    if let Some(reply) = gate_entry(&manager, last_entry) {
        return Ok(reply);
    }

    match manager.vote_for_game(vote.game_id).await {
        Ok(true) => Ok(entry_recorded(&manager, Message::info(MESSAGE_VOTED))),
        Ok(false) => Ok(message(
            Message::error(ERROR_MESSAGE_VOTE_GAME),
            StatusCode::CONFLICT,
        )),
        Err(status) => {
            error!("post_vote: {status}");
            Ok(message(
                Message::error(ERROR_MESSAGE_VOTE_GAME),
                StatusCode::SERVICE_UNAVAILABLE,
            ))
        }
    }
}

#[instrument(
    level = "info",
    name = "post_title",
    skip(new_title, manager),
    fields(title = %new_title)
)]
pub async fn post_title(
    new_title: models::NewTitle,
    last_entry: Option<DateTime<Utc>>,
    manager: Arc<VotingManager>,
) -> Result<Box<dyn warp::Reply>, Infallible> {
    let title = new_title.title.trim();
    if title.is_empty() {
        return Ok(message(
            Message::error(ERROR_MESSAGE_EMPTY_TITLE),
            StatusCode::BAD_REQUEST,
        ));
    }
    if let Some(reply) = gate_entry(&manager, last_entry) {
        return Ok(reply);
    }

    match manager.add_new_game_to_voting_list(title).await {
        Ok(true) => Ok(entry_recorded(&manager, Message::info(title_added(title)))),
        Ok(false) => Ok(message(
            Message::error(title_exists(title)),
            StatusCode::CONFLICT,
        )),
        Err(status) => {
            error!("post_title: {status}");
            Ok(message(
                Message::error(ERROR_MESSAGE_ADD_NEW_TITLE),
                StatusCode::SERVICE_UNAVAILABLE,
            ))
        }
    }
}

/// Marking a game as owned is not an entry and is not throttled.
#[instrument(level = "info", name = "post_owned", skip(manager))]
pub async fn post_owned(
    mark: models::MarkOwned,
    manager: Arc<VotingManager>,
) -> Result<Box<dyn warp::Reply>, Infallible> {
    if mark.game_id < 0 {
        return Ok(message(
            Message::error(ERROR_MESSAGE_CHOOSE_GAME),
            StatusCode::BAD_REQUEST,
        ));
    }

    match manager.mark_existing_game_as_owned(mark.game_id).await {
        Ok(true) => Ok(message(
            Message::info(marked_owned(mark.title.as_deref())),
            StatusCode::OK,
        )),
        Ok(false) => Ok(message(
            Message::error(ERROR_MESSAGE_MARK_OWNED),
            StatusCode::CONFLICT,
        )),
        Err(status) => {
            error!("post_owned: {status}");
            Ok(message(
                Message::error(ERROR_MESSAGE_MARK_OWNED),
                StatusCode::SERVICE_UNAVAILABLE,
            ))
        }
    }
}

/// Returns the reply to send if the catalog service is not usable.
async fn check_connection(manager: &VotingManager) -> Option<Box<dyn warp::Reply>> {
    match manager.is_connection_working().await {
        Ok(true) => None,
        Ok(false) => {
            warn!("catalog service rejected the api key");
            Some(message(
                Message::error(ERROR_MESSAGE_CONNECTION),
                StatusCode::SERVICE_UNAVAILABLE,
            ))
        }
        Err(status) => {
            error!("check_connection: {status}");
            Some(message(
                Message::error(ERROR_MESSAGE_CONNECTION),
                StatusCode::SERVICE_UNAVAILABLE,
            ))
        }
    }
}

/// Returns the reply to send if the client may not make an entry now.
fn gate_entry(
    manager: &VotingManager,
    last_entry: Option<DateTime<Utc>>,
) -> Option<Box<dyn warp::Reply>> {
    let eligibility = manager.eligibility(last_entry);
    let denial = eligibility.denial()?;

    EntryEvent::denied(eligibility.denials());
    Some(message(
        Message::error(denial.message()),
        StatusCode::FORBIDDEN,
    ))
}

fn entry_recorded(manager: &VotingManager, msg: Message) -> Box<dyn warp::Reply> {
    EntryEvent::recorded();
    Box::new(warp::reply::with_header(
        warp::reply::with_status(warp::reply::json(&msg), StatusCode::OK),
        "set-cookie",
        last_entry_cookie(manager.now()),
    ))
}

fn message(msg: Message, code: StatusCode) -> Box<dyn warp::Reply> {
    Box::new(warp::reply::with_status(warp::reply::json(&msg), code))
}
