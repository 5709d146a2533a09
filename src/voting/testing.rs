use crate::{
    documents::{Game, GameStatus},
    traits::CatalogService,
    Status,
};
use async_trait::async_trait;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Mutex,
};

#[derive(Clone, PartialEq, Debug)]
pub enum Write {
    AddVote(i64),
    AddGame(String),
    MarkOwned(i64),
}

/// In-memory catalog that records every write it receives.
pub struct FakeCatalog {
    games: Vec<Game>,
    access: Result<bool, Status>,
    fetch_error: Option<Status>,
    write_error: Option<Status>,
    accept: bool,
    fetches: AtomicUsize,
    writes: Mutex<Vec<Write>>,
}

impl FakeCatalog {
    pub fn new(games: Vec<Game>) -> Self {
        FakeCatalog {
            games,
            access: Ok(true),
            fetch_error: None,
            write_error: None,
            accept: true,
            fetches: AtomicUsize::new(0),
            writes: Mutex::new(vec![]),
        }
    }

    pub fn accepting(mut self, accept: bool) -> Self {
        self.accept = accept;
        self
    }

    pub fn with_access(mut self, access: Result<bool, Status>) -> Self {
        self.access = access;
        self
    }

    pub fn failing_fetch(mut self, status: Status) -> Self {
        self.fetch_error = Some(status);
        self
    }

    pub fn failing_writes(mut self, status: Status) -> Self {
        self.write_error = Some(status);
        self
    }

    pub fn writes(&self) -> Vec<Write> {
        self.writes.lock().unwrap().clone()
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    fn write(&self, write: Write) -> Result<bool, Status> {
        if let Some(status) = &self.write_error {
            return Err(status.clone());
        }
        self.writes.lock().unwrap().push(write);
        Ok(self.accept)
    }
}

#[async_trait]
impl CatalogService for FakeCatalog {
    async fn check_access(&self) -> Result<bool, Status> {
        self.access.clone()
    }

    async fn fetch_all_games(&self) -> Result<Vec<Game>, Status> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        match &self.fetch_error {
            Some(status) => Err(status.clone()),
            None => Ok(self.games.clone()),
        }
    }

    async fn add_vote(&self, game_id: i64) -> Result<bool, Status> {
        self.write(Write::AddVote(game_id))
    }

    async fn add_game(&self, title: &str) -> Result<bool, Status> {
        self.write(Write::AddGame(title.to_owned()))
    }

    async fn mark_owned(&self, game_id: i64) -> Result<bool, Status> {
        self.write(Write::MarkOwned(game_id))
    }
}

pub fn game(id: i64, title: &str, status: GameStatus, votes: u32) -> Game {
    Game {
        id,
        title: title.to_owned(),
        status,
        votes,
    }
}

pub fn halo_and_forza() -> Vec<Game> {
    vec![
        game(1, "Halo", GameStatus::Wanted, 3),
        game(2, "Forza", GameStatus::Owned, 0),
    ]
}
