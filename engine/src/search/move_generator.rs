use crate::board::{Board, Position};

/// Candidate moves: empty cells within Chebyshev distance `radius` of any
/// occupied cell, in row-major order. Falls back to every empty cell when the
/// board is empty or nothing qualifies.
pub fn generate_moves(board: &Board, radius: usize) -> Vec<Position> {
    if board.is_empty() {
        return board.empty_positions();
    }

    let size = board.size();
    let mut near = vec![false; size * size];

    for &pos in board.player_moves().iter().chain(board.computer_moves()) {
        let row_start = pos.row.saturating_sub(radius);
        let row_end = (pos.row + radius).min(size - 1);
        let col_start = pos.col.saturating_sub(radius);
        let col_end = (pos.col + radius).min(size - 1);

        for row in row_start..=row_end {
            for col in col_start..=col_end {
                near[row * size + col] = true;
            }
        }
    }

    let candidates: Vec<Position> = board
        .empty_positions()
        .into_iter()
        .filter(|pos| near[pos.row * size + pos.col])
        .collect();

    if candidates.is_empty() {
        return board.empty_positions();
    }
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Mark;

    #[test]
    fn test_empty_board_returns_all_cells() {
        let board = Board::new(4, 3).unwrap();
        let moves = generate_moves(&board, 1);
        assert_eq!(moves.len(), 16);
        assert_eq!(moves, board.empty_positions());
    }

    #[test]
    fn test_single_center_mark_yields_eight_neighbors() {
        let mut board = Board::new(5, 3).unwrap();
        board.apply(Position::new(2, 2), Mark::Player).unwrap();

        let moves = generate_moves(&board, 1);
        let expected = vec![
            Position::new(1, 1),
            Position::new(1, 2),
            Position::new(1, 3),
            Position::new(2, 1),
            Position::new(2, 3),
            Position::new(3, 1),
            Position::new(3, 2),
            Position::new(3, 3),
        ];
        assert_eq!(moves, expected);
    }

    #[test]
    fn test_radius_two_and_edge_clipping() {
        let mut board = Board::new(5, 3).unwrap();
        board.apply(Position::new(0, 0), Mark::Computer).unwrap();

        assert_eq!(generate_moves(&board, 1).len(), 3);
        assert_eq!(generate_moves(&board, 2).len(), 8);
    }

    #[test]
    fn test_overlapping_neighborhoods_are_deduplicated_and_ordered() {
        let mut board = Board::new(5, 3).unwrap();
        board.apply(Position::new(2, 1), Mark::Player).unwrap();
        board.apply(Position::new(2, 2), Mark::Computer).unwrap();

        let moves = generate_moves(&board, 1);
        assert_eq!(moves.len(), 10);
        assert!(moves.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(moves.iter().all(|&pos| board.is_valid_move(pos)));
    }

    #[test]
    fn test_filled_top_row_offers_only_the_next_row() {
        let mut board = Board::new(3, 3).unwrap();
        let marks = [Mark::Player, Mark::Computer];
        for (i, col) in (0..3).enumerate() {
            board.apply(Position::new(0, col), marks[i % 2]).unwrap();
        }
        let moves = generate_moves(&board, 1);
        assert_eq!(moves.len(), 3);
        assert!(moves.iter().all(|pos| pos.row == 1));
    }
}
