use std::collections::BTreeSet;

use crate::error::EngineError;
use super::types::{Mark, Position};
use super::{MIN_BOARD_SIZE, MIN_WIN_LENGTH};

/// Square grid plus per-side move sets and the order moves were applied in.
///
/// Search mutates a board in place with [`Board::apply`] and reverts with
/// [`Board::undo`]; parallel root tasks each get their own clone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    win_length: usize,
    cells: Vec<Mark>,
    player_moves: BTreeSet<Position>,
    computer_moves: BTreeSet<Position>,
    history: Vec<Position>,
}

impl Board {
    pub fn new(size: usize, win_length: usize) -> Result<Self, EngineError> {
        validate_dimensions(size, win_length).map_err(EngineError::Configuration)?;

        Ok(Self {
            size,
            win_length,
            cells: vec![Mark::Empty; size * size],
            player_moves: BTreeSet::new(),
            computer_moves: BTreeSet::new(),
            history: Vec::new(),
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn win_length(&self) -> usize {
        self.win_length
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.size && pos.col < self.size
    }

    /// Mark at `pos`; out-of-range coordinates read as `Empty`.
    pub fn get(&self, pos: Position) -> Mark {
        if !self.contains(pos) {
            return Mark::Empty;
        }
        self.cells[self.index(pos)]
    }

    pub fn is_valid_move(&self, pos: Position) -> bool {
        self.contains(pos) && self.cells[self.index(pos)] == Mark::Empty
    }

    pub fn apply(&mut self, pos: Position, mark: Mark) -> Result<(), EngineError> {
        if !self.contains(pos) {
            return Err(EngineError::InvalidMove {
                position: pos,
                reason: "position out of bounds",
            });
        }
        let moves = match mark {
            Mark::Player => &mut self.player_moves,
            Mark::Computer => &mut self.computer_moves,
            Mark::Empty => {
                return Err(EngineError::InvalidMove {
                    position: pos,
                    reason: "cannot place an empty mark",
                });
            }
        };
        let index = pos.row * self.size + pos.col;
        if self.cells[index] != Mark::Empty {
            return Err(EngineError::InvalidMove {
                position: pos,
                reason: "cell is already marked",
            });
        }

        moves.insert(pos);
        self.cells[index] = mark;
        self.history.push(pos);
        Ok(())
    }

    /// Reverts the most recent [`Board::apply`]. Returns the mark that was removed.
    pub fn undo(&mut self, pos: Position) -> Result<Mark, EngineError> {
        if self.history.last() != Some(&pos) {
            return Err(EngineError::UndoMismatch(pos));
        }

        let index = self.index(pos);
        let mark = self.cells[index];
        match mark {
            Mark::Player => self.player_moves.remove(&pos),
            Mark::Computer => self.computer_moves.remove(&pos),
            Mark::Empty => return Err(EngineError::UndoMismatch(pos)),
        };
        self.cells[index] = Mark::Empty;
        self.history.pop();
        Ok(mark)
    }

    pub fn last_move(&self) -> Option<Position> {
        self.history.last().copied()
    }

    pub fn history(&self) -> &[Position] {
        &self.history
    }

    pub fn player_moves(&self) -> &BTreeSet<Position> {
        &self.player_moves
    }

    pub fn computer_moves(&self) -> &BTreeSet<Position> {
        &self.computer_moves
    }

    pub fn moves_of(&self, mark: Mark) -> Option<&BTreeSet<Position>> {
        match mark {
            Mark::Player => Some(&self.player_moves),
            Mark::Computer => Some(&self.computer_moves),
            Mark::Empty => None,
        }
    }

    pub fn occupied_count(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.occupied_count() == self.size * self.size
    }

    /// All empty cells in row-major order.
    pub fn empty_positions(&self) -> Vec<Position> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, mark)| **mark == Mark::Empty)
            .map(|(index, _)| Position::new(index / self.size, index % self.size))
            .collect()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Mark]> {
        self.cells.chunks(self.size)
    }

    fn index(&self, pos: Position) -> usize {
        pos.row * self.size + pos.col
    }
}

pub(crate) fn validate_dimensions(size: usize, win_length: usize) -> Result<(), String> {
    if size < MIN_BOARD_SIZE {
        return Err(format!("Board size must be at least {}", MIN_BOARD_SIZE));
    }
    if win_length < MIN_WIN_LENGTH {
        return Err(format!("Win length must be at least {}", MIN_WIN_LENGTH));
    }
    if win_length > size {
        return Err(format!(
            "Win length ({}) cannot exceed board size ({})",
            win_length, size
        ));
    }
    Ok(())
}
