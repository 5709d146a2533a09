mod game;

pub use game::{Game, GameStatus, Snapshot};
