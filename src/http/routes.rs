use crate::voting::VotingManager;
use std::sync::Arc;
use tracing::warn;
use warp::{self, Filter};

use super::{handlers, models, resources::*};

/// Returns a Filter with all available routes.
pub fn routes(
    manager: Arc<VotingManager>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    home()
        .or(get_wanted(Arc::clone(&manager)))
        .or(get_games(Arc::clone(&manager)))
        .or(post_vote(Arc::clone(&manager)))
        .or(post_title(Arc::clone(&manager)))
        .or(post_owned(manager))
        .or_else(|e| async {
            warn! {"Rejected route: {:?}", e};
            Err(e)
        })
}

/// GET /
fn home() -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path!().and(warp::get()).and_then(handlers::welcome)
}

/// GET /games
fn get_games(
    manager: Arc<VotingManager>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path!("games")
        .and(warp::get())
        .and(with_last_entry())
        .and(with_manager(manager))
        .and_then(handlers::get_games)
}

/// GET /games/wanted
fn get_wanted(
    manager: Arc<VotingManager>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path!("games" / "wanted")
        .and(warp::get())
        .and(with_manager(manager))
        .and_then(handlers::get_wanted)
}

/// POST /vote
fn post_vote(
    manager: Arc<VotingManager>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path!("vote")
        .and(warp::post())
        .and(json_body::<models::Vote>())
        .and(with_last_entry())
        .and(with_manager(manager))
        .and_then(handlers::post_vote)
}

/// POST /games
fn post_title(
    manager: Arc<VotingManager>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path!("games")
        .and(warp::post())
        .and(json_body::<models::NewTitle>())
        .and(with_last_entry())
        .and(with_manager(manager))
        .and_then(handlers::post_title)
}

/// POST /owned
fn post_owned(
    manager: Arc<VotingManager>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path!("owned")
        .and(warp::post())
        .and(json_body::<models::MarkOwned>())
        .and(with_manager(manager))
        .and_then(handlers::post_owned)
}

fn json_body<T: serde::de::DeserializeOwned + Send>(
) -> impl Filter<Extract = (T,), Error = warp::Rejection> + Clone {
    warp::body::content_length_limit(16 * 1024).and(warp::body::json())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        http::{
            messages::*,
            models::{Message, StorePage, WantedPage},
        },
        voting::{
            testing::{game, halo_and_forza, FakeCatalog, Write},
            Denial, FixedClock, VotingCalendar,
        },
        documents::GameStatus,
        traits::CatalogService,
        Status,
    };
    use chrono::{DateTime, TimeZone, Utc, Weekday};
    use warp::http::StatusCode;

    // Wednesday 2024-06-12 10:00 in Chicago.
    fn wednesday() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 12, 15, 0, 0).unwrap()
    }

    // Saturday 2024-06-15 10:00 in Chicago.
    fn saturday() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 15, 0, 0).unwrap()
    }

    fn manager(catalog: &Arc<FakeCatalog>, now: DateTime<Utc>) -> Arc<VotingManager> {
        Arc::new(VotingManager::with_clock(
            Arc::clone(catalog) as Arc<dyn CatalogService>,
            VotingCalendar::new(
                chrono_tz::America::Chicago,
                vec![
                    Weekday::Mon,
                    Weekday::Tue,
                    Weekday::Wed,
                    Weekday::Thu,
                    Weekday::Fri,
                ],
            ),
            Arc::new(FixedClock(now)),
        ))
    }

    fn cookie(time: &str) -> String {
        format!("{LAST_ENTRY_COOKIE}={time}")
    }

    fn message(body: &[u8]) -> Message {
        serde_json::from_slice(body).unwrap()
    }

    #[tokio::test]
    async fn store_page_splits_catalog() {
        let catalog = Arc::new(FakeCatalog::new(halo_and_forza()));
        let resp = warp::test::request()
            .method("GET")
            .path("/games")
            .reply(&routes(manager(&catalog, wednesday())))
            .await;

        assert_eq!(resp.status(), StatusCode::OK);
        let page: StorePage = serde_json::from_slice(resp.body()).unwrap();
        assert_eq!(page.owned.len(), 1);
        assert_eq!(page.owned[0].title, "Forza");
        assert_eq!(page.wanted.len(), 1);
        assert_eq!(page.wanted[0].votes, 3);
        assert!(page.entries_enabled);
        assert_eq!(page.message, None);
        assert_eq!(catalog.fetches(), 1);
    }

    #[tokio::test]
    async fn store_page_shows_voting_day_first() {
        let catalog = Arc::new(FakeCatalog::new(halo_and_forza()));
        let resp = warp::test::request()
            .method("GET")
            .path("/games")
            .header("cookie", cookie("2024-06-15T14:00:00Z"))
            .reply(&routes(manager(&catalog, saturday())))
            .await;

        let page: StorePage = serde_json::from_slice(resp.body()).unwrap();
        assert!(!page.entries_enabled);
        assert_eq!(
            page.message,
            Some(Message::error(Denial::NotVotingDay.message()))
        );
    }

    #[tokio::test]
    async fn store_page_reports_entry_made_today() {
        let catalog = Arc::new(FakeCatalog::new(halo_and_forza()));
        let resp = warp::test::request()
            .method("GET")
            .path("/games")
            .header("cookie", cookie("2024-06-12T09:00:00Z"))
            .reply(&routes(manager(&catalog, wednesday())))
            .await;

        let page: StorePage = serde_json::from_slice(resp.body()).unwrap();
        assert!(!page.entries_enabled);
        assert_eq!(
            page.message,
            Some(Message::error(Denial::AlreadyEntered.message()))
        );
    }

    #[tokio::test]
    async fn rejected_credential_stops_page_load() {
        let catalog = Arc::new(FakeCatalog::new(halo_and_forza()).with_access(Ok(false)));
        let resp = warp::test::request()
            .method("GET")
            .path("/games")
            .reply(&routes(manager(&catalog, wednesday())))
            .await;

        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            message(resp.body()),
            Message::error(ERROR_MESSAGE_CONNECTION)
        );
        assert_eq!(catalog.fetches(), 0);
    }

    #[tokio::test]
    async fn unreachable_service_stops_page_load() {
        let catalog = Arc::new(
            FakeCatalog::new(halo_and_forza()).with_access(Err(Status::unavailable("refused"))),
        );
        let resp = warp::test::request()
            .method("GET")
            .path("/games/wanted")
            .reply(&routes(manager(&catalog, wednesday())))
            .await;

        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(catalog.fetches(), 0);
    }

    #[tokio::test]
    async fn wanted_page_lists_wanted_games() {
        let catalog = Arc::new(FakeCatalog::new(vec![
            game(1, "Halo", GameStatus::Wanted, 3),
            game(2, "Forza", GameStatus::Owned, 0),
            game(3, "Gears", GameStatus::Wanted, 0),
        ]));
        let resp = warp::test::request()
            .method("GET")
            .path("/games/wanted")
            .reply(&routes(manager(&catalog, wednesday())))
            .await;

        let page: WantedPage = serde_json::from_slice(resp.body()).unwrap();
        assert_eq!(
            page.wanted.iter().map(|g| g.id).collect::<Vec<_>>(),
            vec![1, 3]
        );
    }

    #[tokio::test]
    async fn first_vote_sets_entry_cookie() {
        let catalog = Arc::new(FakeCatalog::new(halo_and_forza()));
        let resp = warp::test::request()
            .method("POST")
            .path("/vote")
            .json(&serde_json::json!({"game_id": 1}))
            .reply(&routes(manager(&catalog, wednesday())))
            .await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(message(resp.body()), Message::info(MESSAGE_VOTED));
        assert_eq!(
            resp.headers()["set-cookie"],
            last_entry_cookie(wednesday()).as_str()
        );
        assert_eq!(catalog.writes(), vec![Write::AddVote(1)]);
    }

    #[tokio::test]
    async fn vote_for_owned_game_keeps_cookie() {
        let catalog = Arc::new(FakeCatalog::new(halo_and_forza()));
        let resp = warp::test::request()
            .method("POST")
            .path("/vote")
            .json(&serde_json::json!({"game_id": 2}))
            .reply(&routes(manager(&catalog, wednesday())))
            .await;

        assert_eq!(resp.status(), StatusCode::CONFLICT);
        assert!(resp.headers().get("set-cookie").is_none());
        assert!(catalog.writes().is_empty());
    }

    #[tokio::test]
    async fn second_vote_same_day_is_denied() {
        let catalog = Arc::new(FakeCatalog::new(halo_and_forza()));
        let resp = warp::test::request()
            .method("POST")
            .path("/vote")
            .header("cookie", cookie("2024-06-12T00:01:00Z"))
            .json(&serde_json::json!({"game_id": 1}))
            .reply(&routes(manager(&catalog, wednesday())))
            .await;

        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            message(resp.body()),
            Message::error(Denial::AlreadyEntered.message())
        );
        assert!(resp.headers().get("set-cookie").is_none());
        assert_eq!(catalog.fetches(), 0);
        assert!(catalog.writes().is_empty());
    }

    #[tokio::test]
    async fn vote_on_weekend_is_denied() {
        let catalog = Arc::new(FakeCatalog::new(halo_and_forza()));
        let resp = warp::test::request()
            .method("POST")
            .path("/vote")
            .json(&serde_json::json!({"game_id": 1}))
            .reply(&routes(manager(&catalog, saturday())))
            .await;

        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            message(resp.body()),
            Message::error(Denial::NotVotingDay.message())
        );
        assert!(catalog.writes().is_empty());
    }

    #[tokio::test]
    async fn negative_game_id_is_bad_request() {
        let catalog = Arc::new(FakeCatalog::new(halo_and_forza()));
        let resp = warp::test::request()
            .method("POST")
            .path("/vote")
            .json(&serde_json::json!({"game_id": -1}))
            .reply(&routes(manager(&catalog, wednesday())))
            .await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            message(resp.body()),
            Message::error(ERROR_MESSAGE_CHOOSE_GAME)
        );
    }

    #[tokio::test]
    async fn vote_fault_is_generic_error() {
        let catalog = Arc::new(
            FakeCatalog::new(halo_and_forza()).failing_fetch(Status::fault("500")),
        );
        let resp = warp::test::request()
            .method("POST")
            .path("/vote")
            .json(&serde_json::json!({"game_id": 1}))
            .reply(&routes(manager(&catalog, wednesday())))
            .await;

        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            message(resp.body()),
            Message::error(ERROR_MESSAGE_VOTE_GAME)
        );
        assert!(resp.headers().get("set-cookie").is_none());
    }

    #[tokio::test]
    async fn new_title_is_trimmed_and_escaped() {
        let catalog = Arc::new(FakeCatalog::new(halo_and_forza()));
        let resp = warp::test::request()
            .method("POST")
            .path("/games")
            .json(&serde_json::json!({"title": "  Banjo & Kazooie "}))
            .reply(&routes(manager(&catalog, wednesday())))
            .await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            message(resp.body()),
            Message::info("Game [Banjo &amp; Kazooie] successfully added!")
        );
        assert!(resp.headers().get("set-cookie").is_some());
        assert_eq!(
            catalog.writes(),
            vec![Write::AddGame("Banjo & Kazooie".to_owned())]
        );
    }

    #[tokio::test]
    async fn duplicate_title_is_conflict() {
        let catalog = Arc::new(FakeCatalog::new(halo_and_forza()));
        let resp = warp::test::request()
            .method("POST")
            .path("/games")
            .json(&serde_json::json!({"title": "Halo"}))
            .reply(&routes(manager(&catalog, wednesday())))
            .await;

        assert_eq!(resp.status(), StatusCode::CONFLICT);
        assert_eq!(message(resp.body()), Message::error(title_exists("Halo")));
        assert!(resp.headers().get("set-cookie").is_none());
        assert!(catalog.writes().is_empty());
    }

    #[tokio::test]
    async fn blank_title_is_bad_request() {
        let catalog = Arc::new(FakeCatalog::new(halo_and_forza()));
        let resp = warp::test::request()
            .method("POST")
            .path("/games")
            .json(&serde_json::json!({"title": "   "}))
            .reply(&routes(manager(&catalog, wednesday())))
            .await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(catalog.fetches(), 0);
    }

    #[tokio::test]
    async fn mark_owned_ignores_entry_throttle() {
        let catalog = Arc::new(FakeCatalog::new(halo_and_forza()));
        let resp = warp::test::request()
            .method("POST")
            .path("/owned")
            .header("cookie", cookie("2024-06-15T14:00:00Z"))
            .json(&serde_json::json!({"game_id": 1, "title": "Halo"}))
            .reply(&routes(manager(&catalog, saturday())))
            .await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            message(resp.body()),
            Message::info("Game [Halo] successfully marked as owned!")
        );
        assert!(resp.headers().get("set-cookie").is_none());
        assert_eq!(catalog.writes(), vec![Write::MarkOwned(1)]);
    }

    #[tokio::test]
    async fn mark_owned_twice_is_conflict() {
        let catalog = Arc::new(FakeCatalog::new(halo_and_forza()));
        let resp = warp::test::request()
            .method("POST")
            .path("/owned")
            .json(&serde_json::json!({"game_id": 2}))
            .reply(&routes(manager(&catalog, wednesday())))
            .await;

        assert_eq!(resp.status(), StatusCode::CONFLICT);
        assert_eq!(
            message(resp.body()),
            Message::error(ERROR_MESSAGE_MARK_OWNED)
        );
        assert!(catalog.writes().is_empty());
    }
}
