use std::sync::atomic::{AtomicBool, Ordering};

use crate::board::{Board, Mark, Position, check_win};
use crate::error::EngineError;
use super::evaluator::{heuristic_score, terminal_score};
use super::move_generator::generate_moves;
use super::{DEFAULT_PROXIMITY_RADIUS, DEFAULT_SEARCH_DEPTH};

/// A root candidate and the minimax value of playing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RootScore {
    pub position: Position,
    pub score: i64,
}

impl RootScore {
    pub fn new(position: Position, score: i64) -> Self {
        Self { position, score }
    }

    /// Strictly better for `side`. Equal scores keep the incumbent, so the
    /// first candidate in generator order wins ties.
    pub fn improves_on(&self, incumbent: Option<&RootScore>, side: Mark) -> bool {
        match incumbent {
            None => true,
            Some(best) if side.is_maximizing() => self.score > best.score,
            Some(best) => self.score < best.score,
        }
    }
}

/// Depth-limited minimax with alpha-beta pruning. Player maximizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Searcher {
    search_depth: usize,
    proximity_radius: usize,
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_DEPTH, DEFAULT_PROXIMITY_RADIUS)
    }
}

impl Searcher {
    pub fn new(search_depth: usize, proximity_radius: usize) -> Self {
        Self {
            search_depth: search_depth.max(1),
            proximity_radius: proximity_radius.max(1),
        }
    }

    pub fn search_depth(&self) -> usize {
        self.search_depth
    }

    pub fn proximity_radius(&self) -> usize {
        self.proximity_radius
    }

    pub fn candidates(&self, board: &Board) -> Vec<Position> {
        generate_moves(board, self.proximity_radius)
    }

    /// Scores `board` with `depth` plies left to search.
    ///
    /// Moves are applied and undone in place; on return the board is exactly as
    /// it was passed in. Fails only if the board refuses an apply or undo.
    pub fn search(
        &self,
        board: &mut Board,
        depth: usize,
        alpha: i64,
        beta: i64,
        maximizing: bool,
    ) -> Result<i64, EngineError> {
        self.search_node(board, depth, alpha, beta, maximizing, None)
    }

    /// Like [`Searcher::search`], but gives up with `SearchCancelled` once
    /// `stop` is raised. The flag is read once per node.
    pub fn search_until(
        &self,
        board: &mut Board,
        depth: usize,
        alpha: i64,
        beta: i64,
        maximizing: bool,
        stop: &AtomicBool,
    ) -> Result<i64, EngineError> {
        self.search_node(board, depth, alpha, beta, maximizing, Some(stop))
    }

    fn search_node(
        &self,
        board: &mut Board,
        depth: usize,
        mut alpha: i64,
        mut beta: i64,
        maximizing: bool,
        stop: Option<&AtomicBool>,
    ) -> Result<i64, EngineError> {
        if stop.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
            return Err(EngineError::SearchCancelled);
        }
        if let Some(last) = board.last_move() {
            if let Some(winner) = check_win(board, last) {
                return Ok(terminal_score(Some(winner), depth));
            }
        }
        if board.is_full() {
            return Ok(terminal_score(None, depth));
        }
        if depth == 0 {
            return Ok(heuristic_score(board));
        }

        let mark = if maximizing { Mark::Player } else { Mark::Computer };
        let mut best: Option<i64> = None;

        for pos in self.candidates(board) {
            board.apply(pos, mark)?;
            let result = self.search_node(board, depth - 1, alpha, beta, !maximizing, stop);
            board.undo(pos)?;
            let score = result?;

            if maximizing {
                best = Some(best.map_or(score, |b| b.max(score)));
                alpha = alpha.max(score);
            } else {
                best = Some(best.map_or(score, |b| b.min(score)));
                beta = beta.min(score);
            }

            if alpha >= beta {
                break;
            }
        }

        Ok(best.unwrap_or_else(|| heuristic_score(board)))
    }

    /// Plays `pos` for `side` on a private board and searches the reply with a
    /// full window. This is the unit of work for one parallel root task.
    pub fn score_root_move(&self, board: Board, pos: Position, side: Mark) -> Result<i64, EngineError> {
        self.score_root(board, pos, side, None)
    }

    /// [`Searcher::score_root_move`] that can be abandoned through `stop`.
    pub fn score_root_move_until(
        &self,
        board: Board,
        pos: Position,
        side: Mark,
        stop: &AtomicBool,
    ) -> Result<i64, EngineError> {
        self.score_root(board, pos, side, Some(stop))
    }

    fn score_root(
        &self,
        mut board: Board,
        pos: Position,
        side: Mark,
        stop: Option<&AtomicBool>,
    ) -> Result<i64, EngineError> {
        board.apply(pos, side)?;
        self.search_node(
            &mut board,
            self.search_depth - 1,
            i64::MIN,
            i64::MAX,
            !side.is_maximizing(),
            stop,
        )
    }

    /// Single-threaded root search for `side`, carrying the alpha-beta window
    /// across root siblings.
    pub fn best_move(&self, board: &mut Board, side: Mark) -> Result<RootScore, EngineError> {
        let mut alpha = i64::MIN;
        let mut beta = i64::MAX;
        let mut best: Option<RootScore> = None;

        for pos in self.candidates(board) {
            board.apply(pos, side)?;
            let result = self.search(board, self.search_depth - 1, alpha, beta, !side.is_maximizing());
            board.undo(pos)?;
            let candidate = RootScore::new(pos, result?);

            if candidate.improves_on(best.as_ref(), side) {
                best = Some(candidate);
            }
            if side.is_maximizing() {
                alpha = alpha.max(candidate.score);
            } else {
                beta = beta.min(candidate.score);
            }
        }

        best.ok_or(EngineError::NoMovesAvailable)
    }
}
