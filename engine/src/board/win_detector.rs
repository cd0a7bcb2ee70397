use super::DIRECTIONS;
use super::board_state::Board;
use super::types::{Mark, Position, WinningLine};

/// Checks whether the mark at `pos` completes a line of `win_length`.
/// Only the four axes through `pos` are walked, so the cost is O(L).
pub fn check_win(board: &Board, pos: Position) -> Option<Mark> {
    winning_line(board, pos).map(|line| line.mark)
}

pub fn winning_line(board: &Board, pos: Position) -> Option<WinningLine> {
    let mark = board.get(pos);
    if mark == Mark::Empty {
        return None;
    }

    let win_length = board.win_length() as isize;

    for (dr, dc) in DIRECTIONS {
        let forward = run_length(board, pos, mark, dr, dc, win_length);
        let backward = run_length(board, pos, mark, -dr, -dc, win_length);

        if (1 + forward + backward) as usize >= board.win_length() {
            let start = pos.offset(-dr, -dc, backward, board.size()).unwrap_or(pos);
            let end = pos.offset(dr, dc, forward, board.size()).unwrap_or(pos);
            return Some(WinningLine::new(mark, start, end));
        }
    }

    None
}

/// Same-mark cells strictly beyond `pos` along `(dr, dc)`, capped at `limit - 1`.
fn run_length(board: &Board, pos: Position, mark: Mark, dr: isize, dc: isize, limit: isize) -> isize {
    let mut count = 0;
    for step in 1..limit {
        match pos.offset(dr, dc, step, board.size()) {
            Some(next) if board.get(next) == mark => count += 1,
            _ => break,
        }
    }
    count
}

/// Full-board scan for any completed line.
pub fn scan_for_winner(board: &Board) -> Option<Mark> {
    find_winning_line(board).map(|line| line.mark)
}

/// First completed line found scanning cells in row-major order. Unlike
/// [`winning_line`] it does not need to know which move won.
pub fn find_winning_line(board: &Board) -> Option<WinningLine> {
    let size = board.size();
    let win_length = board.win_length() as isize;

    for row in 0..size {
        for col in 0..size {
            let start = Position::new(row, col);
            let mark = board.get(start);
            if mark == Mark::Empty {
                continue;
            }

            for (dr, dc) in DIRECTIONS {
                let complete = (1..win_length).all(|step| {
                    start
                        .offset(dr, dc, step, size)
                        .is_some_and(|next| board.get(next) == mark)
                });
                if complete {
                    return winning_line(board, start);
                }
            }
        }
    }

    None
}
