//! # syspet - a terminal pet that lives on your system metrics
//!
//! The pet's mood follows CPU load, temperature and memory pressure. Its
//! energy and hunger drift as time passes; feed it and play with it to
//! keep it going.

mod app;
mod config;
pub mod constants;
mod engine;
mod logging;
mod models;
mod monitor;
mod pet;
mod sprite;
mod ui;
mod utils;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use app::{App, RunOptions};
use config::{ClockMode, Config};
use constants::{log_file_path, MIN_REFRESH_MS};
use logging::LogTarget;
use monitor::SourceKind;

/// syspet - a digital pet driven by system metrics
#[derive(Parser, Debug)]
#[command(name = "syspet", version, about = "A terminal pet whose mood follows your system metrics")]
struct Cli {
    /// Color theme (lagoon, nord, dracula, midnight, or a custom theme name)
    #[arg(long, short = 't')]
    theme: Option<String>,

    /// Frame interval in milliseconds
    #[arg(long, short = 'r')]
    refresh_rate: Option<u64>,

    /// Read real system metrics instead of the simulated ones
    #[arg(long)]
    live: bool,

    /// Drive the pet's motion from the wall clock instead of frame time
    #[arg(long)]
    wall_clock: bool,

    /// Run without a terminal UI and print JSON reports to stdout
    #[arg(long)]
    headless: bool,

    /// Stop after this many frames
    #[arg(long, value_name = "N")]
    ticks: Option<u64>,

    /// Sprite art file (TOML)
    #[arg(long, value_name = "PATH")]
    sprite: Option<PathBuf>,

    /// Log level when RUST_LOG is unset (error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,
}

impl Cli {
    /// Apply CLI overrides on top of the loaded config.
    fn apply(&self, config: &mut Config) {
        if let Some(rate) = self.refresh_rate {
            config.refresh_interval_ms = rate.max(MIN_REFRESH_MS);
        }
        if let Some(ref theme_name) = self.theme {
            config.theme = theme_name.clone();
        }
        if self.live {
            config.metrics_source = SourceKind::Live;
        }
        if self.wall_clock {
            config.motion_clock = ClockMode::Wall;
        }
        if let Some(ref path) = self.sprite {
            config.sprite_file = Some(path.clone());
        }
        if let Some(ref level) = self.log_level {
            config.log_level = level.clone();
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let mut config = Config::load();
    cli.apply(&mut config);

    let log_path = log_file_path();
    let target = if cli.headless {
        LogTarget::Stderr
    } else {
        LogTarget::File(&log_path)
    };
    if let Err(e) = logging::init(&config.log_level, target) {
        eprintln!("syspet: {:#}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(&cli, &config).await {
        error!(error = %format!("{:#}", e), "syspet failed");
        eprintln!("syspet: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: &Cli, config: &Config) -> Result<()> {
    let options = RunOptions {
        headless: cli.headless,
        max_ticks: cli.ticks,
    };
    let (mut app, disposer) = App::new(config, options)?;

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("interrupt received");
            disposer.dispose();
        }
    });

    app.run().await
}
