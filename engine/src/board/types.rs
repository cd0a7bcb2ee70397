use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mark {
    #[default]
    Empty,
    Player,
    Computer,
}

impl Mark {
    pub fn opponent(&self) -> Option<Mark> {
        match self {
            Mark::Player => Some(Mark::Computer),
            Mark::Computer => Some(Mark::Player),
            Mark::Empty => None,
        }
    }

    /// Player maximizes, Computer minimizes.
    pub fn is_maximizing(&self) -> bool {
        matches!(self, Mark::Player)
    }

    pub fn symbol(&self) -> char {
        match self {
            Mark::Player => 'X',
            Mark::Computer => 'O',
            Mark::Empty => '-',
        }
    }
}

/// Board coordinate. Ordering is row-major, which is also the canonical
/// candidate order used for tie-breaking during search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Steps `distance` cells along `(dr, dc)`, or `None` when leaving a `size`×`size` board.
    pub fn offset(&self, dr: isize, dc: isize, distance: isize, size: usize) -> Option<Position> {
        let row = self.row as isize + dr * distance;
        let col = self.col as isize + dc * distance;
        if row < 0 || col < 0 || row >= size as isize || col >= size as isize {
            return None;
        }
        Some(Position::new(row as usize, col as usize))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    PlayerWin,
    ComputerWin,
    Draw,
}

impl GameStatus {
    pub fn from_winner(winner: Mark) -> Self {
        match winner {
            Mark::Player => GameStatus::PlayerWin,
            Mark::Computer => GameStatus::ComputerWin,
            Mark::Empty => GameStatus::InProgress,
        }
    }

    pub fn is_over(&self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WinningLine {
    pub mark: Mark,
    pub start: Position,
    pub end: Position,
}

impl WinningLine {
    pub fn new(mark: Mark, start: Position, end: Position) -> Self {
        Self { mark, start, end }
    }
}
