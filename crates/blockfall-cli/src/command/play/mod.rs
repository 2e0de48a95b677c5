use std::{
    fs::File,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use blockfall_engine::{Engine, GameConfig, RandomPicker};
use env_logger::{Env, Target};

use crate::{command::play::app::PlayApp, tui::Runtime, util};

mod app;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Configuration file (JSON); fields it omits keep their defaults
    #[clap(long)]
    config: Option<PathBuf>,
    /// Number of board rows
    #[clap(long)]
    height: Option<usize>,
    /// Number of board columns
    #[clap(long)]
    width: Option<usize>,
    /// Seconds between automatic drops
    #[clap(long, value_name = "SECS")]
    fall_interval: Option<f64>,
    /// Seed for the shape sequence (random when omitted)
    #[clap(long)]
    seed: Option<u64>,
    /// Write diagnostics to this file; filter with `RUST_LOG` (default `info`)
    #[clap(long)]
    log_file: Option<PathBuf>,
}

impl PlayArg {
    /// Reads the configuration file, if any, and applies command-line overrides on top.
    fn load_config(&self) -> anyhow::Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => util::read_json_file("config", path)?,
            None => GameConfig::default(),
        };
        if let Some(height) = self.height {
            config.board.height = height;
        }
        if let Some(width) = self.width {
            config.board.width = width;
        }
        if let Some(fall_interval) = self.fall_interval {
            config.timing.fall_interval_secs = fall_interval;
        }
        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }

    fn picker(&self) -> RandomPicker {
        match self.seed {
            Some(seed) => RandomPicker::seed_from_u64(seed),
            None => RandomPicker::from_os_rng(),
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    if let Some(path) = &arg.log_file {
        init_logger(path)?;
    }

    let config = arg.load_config()?;
    log::info!(
        "starting {}x{} game, fall interval {}s, seed {:?}",
        config.board.width,
        config.board.height,
        config.timing.fall_interval_secs,
        arg.seed
    );
    let engine = Engine::with_picker(config, Box::new(arg.picker()))
        .context("Failed to create the game engine")?;

    let mut app = PlayApp::new(engine);
    Runtime::new()
        .run(&mut app)
        .context("Terminal I/O failed")?;

    let stats = app.engine().stats();
    log::info!(
        "session ended: score {}, lines {}, pieces {}, game over: {}",
        stats.score(),
        stats.total_cleared_lines(),
        stats.completed_pieces(),
        app.engine().is_game_over()
    );
    Ok(())
}

fn init_logger(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file: {}", path.display()))?;
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .context("Failed to initialize the logger")?;
    Ok(())
}
