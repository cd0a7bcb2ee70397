pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod logger;
pub mod search;

pub use board::{Board, GameStatus, Mark, Position, WinningLine};
pub use config::EngineSettings;
pub use error::{ConfigError, EngineError};
pub use game::Game;
pub use search::{ParallelCoordinator, RootScore, SearchOutcome, Searcher};
