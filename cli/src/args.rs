use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use rand::Rng;
use tictactoe_engine::EngineSettings;

#[derive(Parser, Debug)]
#[command(name = "tictactoe", about = "Generalized tic-tac-toe against a minimax engine")]
pub struct Args {
    /// YAML settings file; missing file means defaults
    #[arg(long, default_value = "tictactoe.yaml")]
    pub config: PathBuf,

    #[arg(long)]
    pub board_size: Option<usize>,

    #[arg(long)]
    pub win_length: Option<usize>,

    #[arg(long)]
    pub proximity: Option<usize>,

    #[arg(long)]
    pub depth: Option<usize>,

    #[arg(long)]
    pub workers: Option<usize>,

    #[arg(long)]
    pub timeout_ms: Option<u64>,

    #[arg(long, value_enum, default_value_t = FirstPlayerMode::Player)]
    pub first: FirstPlayerMode,

    /// Let the engine play both sides
    #[arg(long)]
    pub selfplay: bool,

    /// Write the effective settings back to the config file
    #[arg(long)]
    pub save_config: bool,

    #[arg(long)]
    pub use_log_prefix: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FirstPlayerMode {
    Player,
    Computer,
    Random,
}

impl FirstPlayerMode {
    pub fn player_moves_first(&self) -> bool {
        match self {
            FirstPlayerMode::Player => true,
            FirstPlayerMode::Computer => false,
            FirstPlayerMode::Random => rand::rng().random_bool(0.5),
        }
    }
}

impl Args {
    pub fn apply_overrides(&self, settings: &mut EngineSettings) {
        if let Some(board_size) = self.board_size {
            settings.board_size = board_size;
        }
        if let Some(win_length) = self.win_length {
            settings.win_length = win_length;
        }
        if let Some(proximity) = self.proximity {
            settings.proximity_radius = proximity;
        }
        if let Some(depth) = self.depth {
            settings.search_depth = depth;
        }
        if self.workers.is_some() {
            settings.worker_count = self.workers;
        }
        if self.timeout_ms.is_some() {
            settings.move_timeout_ms = self.timeout_ms;
        }
    }
}
