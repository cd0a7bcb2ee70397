mod args;
mod play;
mod render;

use clap::Parser;
use tictactoe_engine::config::{ConfigManager, FileContentConfigProvider, Validate};
use tictactoe_engine::{EngineSettings, Game, log, logger};

use args::Args;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Engine".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let config_manager: ConfigManager<FileContentConfigProvider, EngineSettings> =
        ConfigManager::from_yaml_file(args.config.clone());
    let mut settings = config_manager.get_config()?;
    args.apply_overrides(&mut settings);
    let settings = settings.validated()?;

    if args.save_config {
        config_manager.set_config(&settings)?;
        log!("Saved settings to {}", args.config.display());
    }

    let game = Game::new(settings)?;
    let player_first = args.first.player_moves_first();
    log!(
        "{} moves first{}",
        if player_first { "Player" } else { "Computer" },
        if args.selfplay { " (self-play)" } else { "" }
    );

    play::run(game, player_first, args.selfplay).await
}
