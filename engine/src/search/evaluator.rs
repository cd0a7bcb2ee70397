use crate::board::{Board, DIRECTIONS, Mark, Position};

/// Magnitude of a decided game before depth weighting.
pub const WIN_SCORE: i64 = 1_000_000_000;

/// `10^n` line weights stop growing past this many same-mark cells.
pub const MAX_LINE_EXPONENT: u32 = 15;

/// Score of a finished position, from the Player's point of view.
///
/// `depth_factor` is the number of plies still left to search when the game
/// ended, so an earlier win scores higher and an earlier loss scores lower. A
/// result found on the horizon weighs 0, as does a draw (`winner == None`).
pub fn terminal_score(winner: Option<Mark>, depth_factor: usize) -> i64 {
    let magnitude = WIN_SCORE.saturating_mul(depth_factor as i64);
    match winner {
        Some(Mark::Player) => magnitude,
        Some(Mark::Computer) => -magnitude,
        Some(Mark::Empty) | None => 0,
    }
}

/// Pattern heuristic over every line of `win_length` cells on the board.
///
/// A line holding only Player marks adds `10^n`, only Computer marks subtracts
/// `10^n`; mixed or empty lines contribute nothing.
pub fn heuristic_score(board: &Board) -> i64 {
    let size = board.size();
    let mut score = 0i64;

    for row in 0..size {
        for col in 0..size {
            for (dr, dc) in DIRECTIONS {
                score = score.saturating_add(line_score(board, Position::new(row, col), dr, dc));
            }
        }
    }

    score
}

#[inline]
fn line_score(board: &Board, start: Position, dr: isize, dc: isize) -> i64 {
    let win_length = board.win_length() as isize;
    if start.offset(dr, dc, win_length - 1, board.size()).is_none() {
        return 0;
    }

    let mut player_count = 0u32;
    let mut computer_count = 0u32;

    for step in 0..win_length {
        let Some(pos) = start.offset(dr, dc, step, board.size()) else {
            return 0;
        };
        match board.get(pos) {
            Mark::Player => player_count += 1,
            Mark::Computer => computer_count += 1,
            Mark::Empty => {}
        }
    }

    match (player_count, computer_count) {
        (0, 0) => 0,
        (n, 0) => line_weight(n),
        (0, n) => -line_weight(n),
        _ => 0,
    }
}

fn line_weight(count: u32) -> i64 {
    10i64.pow(count.min(MAX_LINE_EXPONENT))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(size: usize, win_length: usize, moves: &[(usize, usize, Mark)]) -> Board {
        let mut board = Board::new(size, win_length).unwrap();
        for &(row, col, mark) in moves {
            board.apply(Position::new(row, col), mark).unwrap();
        }
        board
    }

    #[test]
    fn test_heuristic_empty_board_is_zero() {
        for (size, win_length) in [(3, 3), (5, 4), (9, 5)] {
            let board = Board::new(size, win_length).unwrap();
            assert_eq!(heuristic_score(&board), 0);
        }
    }

    #[test]
    fn test_heuristic_single_center_mark() {
        // Center of 3x3 lies on 4 lines: its row, column and both diagonals.
        let board = board_with(3, 3, &[(1, 1, Mark::Player)]);
        assert_eq!(heuristic_score(&board), 40);

        let board = board_with(3, 3, &[(1, 1, Mark::Computer)]);
        assert_eq!(heuristic_score(&board), -40);
    }

    #[test]
    fn test_heuristic_corner_mark_and_dead_lines() {
        // Corner lies on row, column and one diagonal.
        let board = board_with(3, 3, &[(0, 0, Mark::Player)]);
        assert_eq!(heuristic_score(&board), 30);

        // Shared row 0 becomes dead; remaining: X column + X diagonal, O column.
        let board = board_with(3, 3, &[(0, 0, Mark::Player), (0, 2, Mark::Computer)]);
        assert_eq!(heuristic_score(&board), 10 + 10 - 10 - 10);
    }

    #[test]
    fn test_heuristic_weights_grow_exponentially() {
        // Row 0 holds two X: 100. Columns 0 and 1 plus the main diagonal: 10 each.
        let board = board_with(3, 3, &[(0, 0, Mark::Player), (0, 1, Mark::Player)]);
        assert_eq!(heuristic_score(&board), 100 + 10 + 10 + 10);
    }

    #[test]
    fn test_heuristic_exponent_is_capped() {
        // 19 X in row 0: the row is capped at 10^15 instead of 10^19, columns
        // 0..=18 and the main diagonal add 10 each.
        let size = 20;
        let mut board = Board::new(size, size).unwrap();
        for col in 0..size - 1 {
            board.apply(Position::new(0, col), Mark::Player).unwrap();
        }
        assert_eq!(heuristic_score(&board), 10i64.pow(MAX_LINE_EXPONENT) + 200);
    }

    #[test]
    fn test_heuristic_saturates_instead_of_overflowing() {
        // 9450 complete lines of 16 at 10^15 each exceed i64::MAX.
        let size = 60;
        let mut board = Board::new(size, 16).unwrap();
        for pos in board.empty_positions() {
            board.apply(pos, Mark::Player).unwrap();
        }
        assert_eq!(heuristic_score(&board), i64::MAX);

        let mut mirrored = Board::new(size, 16).unwrap();
        for pos in mirrored.empty_positions() {
            mirrored.apply(pos, Mark::Computer).unwrap();
        }
        assert_eq!(heuristic_score(&mirrored), i64::MIN);
    }

    #[test]
    fn test_terminal_score_depth_weighting() {
        assert_eq!(terminal_score(Some(Mark::Player), 3), 3 * WIN_SCORE);
        assert_eq!(terminal_score(Some(Mark::Computer), 2), -2 * WIN_SCORE);
        assert_eq!(terminal_score(None, 4), 0);
        assert!(terminal_score(Some(Mark::Player), 4) > terminal_score(Some(Mark::Player), 1));
        assert!(terminal_score(Some(Mark::Computer), 4) < terminal_score(Some(Mark::Computer), 1));
    }
}
