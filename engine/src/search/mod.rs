mod coordinator;
mod evaluator;
mod move_generator;
mod searcher;

pub use coordinator::{ParallelCoordinator, SearchOutcome};
pub use evaluator::{MAX_LINE_EXPONENT, WIN_SCORE, heuristic_score, terminal_score};
pub use move_generator::generate_moves;
pub use searcher::{RootScore, Searcher};

pub const DEFAULT_SEARCH_DEPTH: usize = 4;
pub const DEFAULT_PROXIMITY_RADIUS: usize = 1;
