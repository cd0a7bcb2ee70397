use tictactoe_engine::{EngineError, Game, GameStatus, Position, log};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};

use crate::render::{parse_move, render_board};

type InputLines = Lines<BufReader<Stdin>>;

pub async fn run(mut game: Game, player_first: bool, selfplay: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut input = BufReader::new(tokio::io::stdin()).lines();
    let mut player_turn = player_first;

    while !game.status().is_over() {
        println!("{}", render_board(game.board()));

        if player_turn {
            let pos = if selfplay {
                engine_player_move(&game).await?
            } else {
                match read_player_move(&mut input, &game).await? {
                    Some(pos) => pos,
                    None => {
                        println!("Input closed, leaving the game");
                        return Ok(());
                    }
                }
            };
            game.apply_player_move(pos)?;
            println!("Player plays {}", pos);
        } else {
            let pos = computer_turn(&mut game).await?;
            println!("Computer plays {}", pos);
        }

        player_turn = !player_turn;
    }

    println!("{}", render_board(game.board()));
    match game.status() {
        GameStatus::PlayerWin => println!("Player wins!"),
        GameStatus::ComputerWin => println!("Computer wins!"),
        GameStatus::Draw => println!("Game ends in a draw"),
        GameStatus::InProgress => {}
    }
    if let Some(line) = game.winning_line() {
        println!("Winning line: {} to {}", line.start, line.end);
    }

    Ok(())
}

/// Prompts until a legal move arrives. `None` when stdin is exhausted.
async fn read_player_move(input: &mut InputLines, game: &Game) -> Result<Option<Position>, std::io::Error> {
    let mut stdout = tokio::io::stdout();
    loop {
        stdout.write_all(b"Enter row col: ").await?;
        stdout.flush().await?;

        let Some(line) = input.next_line().await? else {
            return Ok(None);
        };

        match parse_move(&line, game.board().size()) {
            Ok(pos) if game.board().is_valid_move(pos) => return Ok(Some(pos)),
            Ok(pos) => println!("Cell {} is already taken", pos),
            Err(e) => println!("{}", e),
        }
    }
}

async fn computer_turn(game: &mut Game) -> Result<Position, EngineError> {
    match game.compute_computer_move(None).await {
        Ok(pos) => Ok(pos),
        Err(e @ (EngineError::SearchTimedOut | EngineError::SearchFailure(_))) => {
            let pos = game.fallback_move().ok_or(EngineError::NoMovesAvailable)?;
            log!("Search gave no move ({}), falling back to {}", e, pos);
            game.apply_computer_move(pos)?;
            Ok(pos)
        }
        Err(e) => Err(e),
    }
}

async fn engine_player_move(game: &Game) -> Result<Position, EngineError> {
    match game.suggest_player_move(None).await {
        Ok(outcome) => Ok(outcome.best.position),
        Err(e @ (EngineError::SearchTimedOut | EngineError::SearchFailure(_))) => {
            let pos = game.fallback_move().ok_or(EngineError::NoMovesAvailable)?;
            log!("Search gave no move ({}), falling back to {}", e, pos);
            Ok(pos)
        }
        Err(e) => Err(e),
    }
}
