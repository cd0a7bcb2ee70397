mod board_state;
mod types;
mod win_detector;

pub use board_state::Board;
pub(crate) use board_state::validate_dimensions;
pub use types::{GameStatus, Mark, Position, WinningLine};
pub use win_detector::{check_win, find_winning_line, scan_for_winner, winning_line};

pub const MIN_BOARD_SIZE: usize = 3;
pub const MIN_WIN_LENGTH: usize = 3;

/// Line axes as `(row step, col step)`: horizontal, vertical, both diagonals.
pub(crate) const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];
