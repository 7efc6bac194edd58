use anyhow::{Context, Result, anyhow};
use clap::{Parser, ValueEnum};
use grid_snake::game::{Difficulty, FoodPlacer, GameConfig, GameEngine, Variant};
use grid_snake::modes::HumanMode;
use grid_snake::score::{FileScoreStore, MemoryScoreStore, ScoreStore};
use log::info;
use std::fs::File;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Terminal Snake with big food and a persisted top score")]
struct Cli {
    /// Rule preset
    #[arg(long, default_value = "classic")]
    variant: VariantArg,

    /// Game speed (can be changed in game with 1-3)
    #[arg(long, default_value = "medium")]
    difficulty: DifficultyArg,

    /// Override the board size of the preset
    #[arg(long)]
    board_size: Option<usize>,

    /// JSON file holding top scores
    #[arg(long, default_value = "snake_scores.json")]
    scores_file: PathBuf,

    /// Keep the top score in memory only
    #[arg(long)]
    no_persist: bool,

    /// Write logs to this file (RUST_LOG filters, default info)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Clone, ValueEnum)]
enum VariantArg {
    /// 20x20, moving from the start, big food every 15 points and every 15 s
    Classic,
    /// 12x12, waits for the first arrow key, big food every 5 points
    Compact,
}

#[derive(Clone, ValueEnum)]
enum DifficultyArg {
    Easy,
    Medium,
    Hard,
}

impl From<VariantArg> for Variant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::Classic => Variant::Classic,
            VariantArg::Compact => Variant::Compact,
        }
    }
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Medium => Difficulty::Medium,
            DifficultyArg::Hard => Difficulty::Hard,
        }
    }
}

/// The terminal UI owns the screen, so logs only go to a file
fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create log file {:?}", path))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    // Create game configuration from CLI arguments
    let mut config = GameConfig::for_variant(cli.variant.into());
    if let Some(size) = cli.board_size {
        config = config.with_board_size(size);
    }
    config
        .validate()
        .map_err(|e| anyhow!("Invalid game configuration: {}", e))?;

    let scores: Box<dyn ScoreStore> = if cli.no_persist {
        Box::new(MemoryScoreStore::new())
    } else {
        Box::new(FileScoreStore::new(&cli.scores_file, config.score_key.clone()))
    };

    let placer = match cli.seed {
        Some(seed) => FoodPlacer::seeded(seed),
        None => FoodPlacer::new(),
    };

    info!(
        "Starting {}x{} board, score key {:?}",
        config.board_size, config.board_size, config.score_key
    );

    let engine = GameEngine::with_placer(config, scores, placer);
    let mut human_mode = HumanMode::new(engine, cli.difficulty.into());
    human_mode.run().await?;

    Ok(())
}
