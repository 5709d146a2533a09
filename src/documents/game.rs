use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// A catalog entry as tracked by the remote catalog service.
#[derive(Serialize, Deserialize, Default, Clone, PartialEq, Eq, Debug)]
pub struct Game {
    pub id: i64,
    pub title: String,
    pub status: GameStatus,

    #[serde(default)]
    pub votes: u32,
}

impl Game {
    pub fn is_wanted(&self) -> bool {
        self.status == GameStatus::Wanted
    }
}

#[derive(Serialize, Deserialize, Default, Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum GameStatus {
    #[default]
    #[serde(rename = "wantit")]
    Wanted,

    #[serde(rename = "gotit")]
    Owned,
}

/// All games returned by a single fetch of the catalog, in service order.
#[derive(Serialize, Deserialize, Default, Clone, Debug)]
#[serde(transparent)]
pub struct Snapshot {
    pub games: Vec<Game>,
}

impl Snapshot {
    pub fn new(games: Vec<Game>) -> Self {
        Snapshot { games }
    }

    pub fn wanted(&self) -> impl Iterator<Item = &Game> {
        self.games.iter().filter(|game| game.is_wanted())
    }

    /// True if `id` names a game that still collects votes.
    pub fn is_wanted(&self, id: i64) -> bool {
        self.wanted().any(|game| game.id == id)
    }

    /// Exact, case-sensitive title lookup across all statuses.
    pub fn has_title(&self, title: &str) -> bool {
        self.games.iter().any(|game| game.title == title)
    }

    /// Splits the snapshot into (owned, wanted) preserving service order.
    pub fn split(self) -> (Vec<Game>, Vec<Game>) {
        self.games.into_iter().partition_map(|game| match game.status {
            GameStatus::Owned => itertools::Either::Left(game),
            GameStatus::Wanted => itertools::Either::Right(game),
        })
    }
}
