use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use snack_snake::game::{GameConfig, GameEngine};
use snack_snake::modes::HumanMode;
use std::fs::File;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "snack_snake")]
#[command(version, about = "Wrap-around snake for your break")]
struct Cli {
    /// JSON game config; missing fields use defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid side length, overrides the config file
    #[arg(long)]
    grid_size: Option<usize>,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (the terminal is taken by the game)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let mut builder = env_logger::Builder::new();

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {:?}", path))?;
            builder
                .filter_level(LevelFilter::Info)
                .parse_default_env()
                .target(env_logger::Target::Pipe(Box::new(file)));
        }
        None => {
            // Stderr belongs to the TUI, so stay silent unless asked
            builder.filter_level(LevelFilter::Off).parse_default_env();
        }
    }

    builder.init();
    Ok(())
}

fn load_config(cli: &Cli) -> Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            log::info!("loading config from {:?}", path);
            GameConfig::load(path)?
        }
        None => GameConfig::default(),
    };

    if let Some(grid_size) = cli.grid_size {
        config.grid_size = grid_size;
    }

    config.validate().context("Invalid game configuration")?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.log_file.as_deref())?;

    let config = load_config(&cli)?;
    let engine = match cli.seed {
        Some(seed) => GameEngine::with_seed(config, seed)?,
        None => GameEngine::new(config)?,
    };

    let mut human_mode = HumanMode::new(engine);
    human_mode.run().await?;

    println!(
        "Games played: {}  High score: {}",
        human_mode.metrics().games_played,
        human_mode.engine().high_score()
    );

    Ok(())
}
