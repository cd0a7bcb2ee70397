use std::time::Duration;

use crate::board::{
    Board, GameStatus, Mark, Position, WinningLine, check_win, find_winning_line, scan_for_winner, winning_line,
};
use crate::config::{EngineSettings, Validate};
use crate::error::EngineError;
use crate::log;
use crate::search::{ParallelCoordinator, SearchOutcome, Searcher};

/// One game between a human Player and the engine-driven Computer.
///
/// Turn order is left to the caller; the game only refuses moves once it is over.
pub struct Game {
    settings: EngineSettings,
    board: Board,
    status: GameStatus,
    coordinator: ParallelCoordinator,
}

impl Game {
    pub fn new(settings: EngineSettings) -> Result<Self, EngineError> {
        settings.validate().map_err(EngineError::Configuration)?;

        let board = Board::new(settings.board_size, settings.win_length)?;
        let searcher = Searcher::new(settings.search_depth, settings.proximity_radius);
        let coordinator = ParallelCoordinator::new(searcher, settings.resolved_worker_count());

        log!(
            "[game] New {}x{} game, win length {}, depth {}, radius {}, {} workers",
            settings.board_size,
            settings.board_size,
            settings.win_length,
            settings.search_depth,
            settings.proximity_radius,
            coordinator.worker_count()
        );

        Ok(Self {
            settings,
            board,
            status: GameStatus::InProgress,
            coordinator,
        })
    }

    pub fn new_game(
        board_size: usize,
        win_length: usize,
        proximity_radius: usize,
        search_depth: usize,
        worker_count: Option<usize>,
    ) -> Result<Self, EngineError> {
        Self::new(EngineSettings {
            board_size,
            win_length,
            proximity_radius,
            search_depth,
            worker_count,
            move_timeout_ms: None,
        })
    }

    /// Rebuilds a game already in progress elsewhere, e.g. joined after the
    /// opponent has moved.
    pub fn resume(
        settings: EngineSettings,
        player_moves: &[Position],
        computer_moves: &[Position],
    ) -> Result<Self, EngineError> {
        let mut game = Self::new(settings)?;

        for &pos in player_moves {
            game.board.apply(pos, Mark::Player)?;
        }
        for &pos in computer_moves {
            game.board.apply(pos, Mark::Computer)?;
        }

        game.status = match scan_for_winner(&game.board) {
            Some(winner) => GameStatus::from_winner(winner),
            None if game.board.is_full() => GameStatus::Draw,
            None => GameStatus::InProgress,
        };
        Ok(game)
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn apply_player_move(&mut self, pos: Position) -> Result<GameStatus, EngineError> {
        self.place(pos, Mark::Player)
    }

    /// Commits a Computer move chosen outside the search, such as [`Game::fallback_move`].
    pub fn apply_computer_move(&mut self, pos: Position) -> Result<GameStatus, EngineError> {
        self.place(pos, Mark::Computer)
    }

    /// Searches for and plays the Computer's move. `timeout` overrides the
    /// configured per-move budget.
    ///
    /// On `SearchTimedOut` or `SearchFailure` the board is untouched and the
    /// caller is expected to play [`Game::fallback_move`] instead.
    pub async fn compute_computer_move(&mut self, timeout: Option<Duration>) -> Result<Position, EngineError> {
        self.ensure_in_progress()?;

        let position = if self.board.is_empty() {
            self.opening_move()
        } else {
            let timeout = timeout.or(self.settings.move_timeout());
            self.coordinator
                .choose_move(&self.board, Mark::Computer, timeout)
                .await?
                .best
                .position
        };

        self.apply_computer_move(position)?;
        Ok(position)
    }

    /// Runs the same search for the Player side without playing it.
    pub async fn suggest_player_move(&self, timeout: Option<Duration>) -> Result<SearchOutcome, EngineError> {
        self.ensure_in_progress()?;
        let timeout = timeout.or(self.settings.move_timeout());
        self.coordinator
            .choose_move(&self.board, Mark::Player, timeout)
            .await
    }

    /// First candidate in generator order.
    pub fn fallback_move(&self) -> Option<Position> {
        self.coordinator.searcher().candidates(&self.board).first().copied()
    }

    /// The completed line of a won game. Resumed games may not have won on
    /// their last recorded move, so the board is scanned when needed.
    pub fn winning_line(&self) -> Option<WinningLine> {
        if !matches!(self.status, GameStatus::PlayerWin | GameStatus::ComputerWin) {
            return None;
        }
        self.board
            .last_move()
            .and_then(|pos| winning_line(&self.board, pos))
            .or_else(|| find_winning_line(&self.board))
    }

    fn opening_move(&self) -> Position {
        let center = self.board.size() / 2;
        Position::new(center, center)
    }

    fn place(&mut self, pos: Position, mark: Mark) -> Result<GameStatus, EngineError> {
        self.ensure_in_progress()?;
        self.board.apply(pos, mark)?;

        if let Some(winner) = check_win(&self.board, pos) {
            self.status = GameStatus::from_winner(winner);
        } else if self.board.is_full() {
            self.status = GameStatus::Draw;
        }

        if self.status.is_over() {
            log!("[game] {:?} after {:?} played {}", self.status, mark, pos);
        }
        Ok(self.status)
    }

    fn ensure_in_progress(&self) -> Result<(), EngineError> {
        if self.status.is_over() {
            return Err(EngineError::GameOver);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(board_size: usize, win_length: usize, search_depth: usize) -> Game {
        Game::new_game(board_size, win_length, 1, search_depth, Some(2)).unwrap()
    }

    #[test]
    fn test_new_game_rejects_bad_configuration() {
        for (size, win_length) in [(2, 2), (3, 4), (5, 2)] {
            let result = Game::new_game(size, win_length, 1, 4, None);
            assert!(matches!(result, Err(EngineError::Configuration(_))));
        }
        assert!(matches!(
            Game::new_game(3, 3, 1, 0, None),
            Err(EngineError::Configuration(_))
        ));
        assert!(matches!(
            Game::new_game(3, 3, 1, 4, Some(0)),
            Err(EngineError::Configuration(_))
        ));
    }

    #[test]
    fn test_invalid_player_move_leaves_game_unchanged() {
        let mut game = game(3, 3, 4);
        game.apply_player_move(Position::new(1, 1)).unwrap();
        let before = game.board().clone();

        assert!(matches!(
            game.apply_player_move(Position::new(1, 1)),
            Err(EngineError::InvalidMove { .. })
        ));
        assert!(matches!(
            game.apply_player_move(Position::new(0, 3)),
            Err(EngineError::InvalidMove { .. })
        ));
        assert_eq!(game.board(), &before);
        assert_eq!(game.status(), GameStatus::InProgress);
    }

    #[test]
    fn test_player_win_ends_the_game() {
        let mut game = game(3, 3, 4);
        game.apply_player_move(Position::new(0, 0)).unwrap();
        game.apply_player_move(Position::new(0, 1)).unwrap();

        assert_eq!(game.apply_player_move(Position::new(0, 2)).unwrap(), GameStatus::PlayerWin);
        assert_eq!(
            game.winning_line(),
            Some(WinningLine::new(Mark::Player, Position::new(0, 0), Position::new(0, 2)))
        );
        assert_eq!(game.apply_player_move(Position::new(2, 2)), Err(EngineError::GameOver));
    }

    #[tokio::test]
    async fn test_computer_opens_in_the_center() {
        let mut game = game(7, 4, 4);
        let pos = game.compute_computer_move(None).await.unwrap();

        assert_eq!(pos, Position::new(3, 3));
        assert_eq!(game.board().get(pos), Mark::Computer);
    }

    #[tokio::test]
    async fn test_computer_blocks_and_then_wins() {
        let mut game = game(3, 3, 4);
        game.apply_player_move(Position::new(0, 0)).unwrap();
        game.apply_computer_move(Position::new(1, 1)).unwrap();
        game.apply_player_move(Position::new(0, 1)).unwrap();

        let block = game.compute_computer_move(None).await.unwrap();
        assert_eq!(block, Position::new(0, 2));

        game.apply_player_move(Position::new(1, 0)).unwrap();
        let win = game.compute_computer_move(None).await.unwrap();
        assert_eq!(win, Position::new(2, 0));
        assert_eq!(game.status(), GameStatus::ComputerWin);
        assert!(matches!(
            game.compute_computer_move(None).await,
            Err(EngineError::GameOver)
        ));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_optimal_self_play_on_3x3_is_a_draw() {
        // At depth 4 a loss four plies out sits on the horizon and weighs the
        // same as a draw, so one more ply is needed to see it.
        let mut game = game(3, 3, 5);

        while game.status() == GameStatus::InProgress {
            let suggestion = game.suggest_player_move(None).await.unwrap();
            if game.apply_player_move(suggestion.best.position).unwrap().is_over() {
                break;
            }
            game.compute_computer_move(None).await.unwrap();
        }

        assert_eq!(game.status(), GameStatus::Draw);
        assert!(game.board().is_full());
    }

    #[tokio::test]
    async fn test_timeout_without_results_defers_to_fallback() {
        let mut game = game(9, 5, 4);
        game.apply_player_move(Position::new(4, 4)).unwrap();
        let before = game.board().clone();

        let result = game.compute_computer_move(Some(Duration::ZERO)).await;
        assert_eq!(result, Err(EngineError::SearchTimedOut));
        assert_eq!(game.board(), &before);

        let fallback = game.fallback_move().unwrap();
        assert_eq!(fallback, Position::new(3, 3));
        game.apply_computer_move(fallback).unwrap();
        assert_eq!(game.board().get(fallback), Mark::Computer);
    }

    #[test]
    fn test_resume_rebuilds_status() {
        let settings = EngineSettings::default();

        let ongoing = Game::resume(
            settings.clone(),
            &[Position::new(0, 0)],
            &[Position::new(1, 1)],
        )
        .unwrap();
        assert_eq!(ongoing.status(), GameStatus::InProgress);
        assert_eq!(ongoing.board().occupied_count(), 2);

        let won = Game::resume(
            settings.clone(),
            &[Position::new(0, 0), Position::new(2, 2)],
            &[Position::new(0, 2), Position::new(1, 1), Position::new(2, 0)],
        )
        .unwrap();
        assert_eq!(won.status(), GameStatus::ComputerWin);

        let overlapping = Game::resume(settings, &[Position::new(0, 0)], &[Position::new(0, 0)]);
        assert!(matches!(overlapping, Err(EngineError::InvalidMove { .. })));
    }

    #[test]
    fn test_resumed_win_reports_its_line() {
        let won = Game::resume(
            EngineSettings::default(),
            &[Position::new(0, 0), Position::new(0, 1), Position::new(0, 2)],
            &[Position::new(1, 1)],
        )
        .unwrap();
        assert_eq!(won.status(), GameStatus::PlayerWin);
        assert_eq!(won.board().last_move(), Some(Position::new(1, 1)));

        let line = won.winning_line().unwrap();
        assert_eq!(line.mark, Mark::Player);
        assert_eq!(line.start, Position::new(0, 0));
        assert_eq!(line.end, Position::new(0, 2));
    }
}
