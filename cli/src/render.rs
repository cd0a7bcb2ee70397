use tictactoe_engine::{Board, Position};

/// Grid with row and column indices, `X` for the Player and `O` for the Computer.
pub fn render_board(board: &Board) -> String {
    let width = (board.size().saturating_sub(1)).to_string().len();
    let mut out = String::new();

    out.push_str(&" ".repeat(width + 1));
    for col in 0..board.size() {
        out.push_str(&format!("{:>width$} ", col, width = width));
    }
    out.push('\n');

    for (row, cells) in board.rows().enumerate() {
        out.push_str(&format!("{:>width$} ", row, width = width));
        for mark in cells {
            out.push_str(&format!("{:>width$} ", mark.symbol(), width = width));
        }
        out.push('\n');
    }

    out
}

/// Accepts `row col` or `row,col`.
pub fn parse_move(input: &str, size: usize) -> Result<Position, String> {
    let parts: Vec<&str> = input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect();

    let [row, col] = parts.as_slice() else {
        return Err("Enter a move as: row col".to_string());
    };

    let row: usize = row.parse().map_err(|_| format!("Invalid row: {}", row))?;
    let col: usize = col.parse().map_err(|_| format!("Invalid column: {}", col))?;
    if row >= size || col >= size {
        return Err(format!("Row and column must be between 0 and {}", size - 1));
    }

    Ok(Position::new(row, col))
}
