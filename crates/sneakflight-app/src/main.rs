use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use sneakflight_app::{
    TerminalRenderer,
    renderer::{Renderer, RendererContext},
};
use sneakflight_core::{GameConfig, GameWorld, MapId};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "sneakflight",
    version,
    about = "Stay out of sight of your parents until the clock runs out"
)]
struct Cli {
    /// Seed for reproducible parent behaviour.
    #[arg(long, env = "SNEAKFLIGHT_SEED")]
    seed: Option<u64>,

    /// Milliseconds between simulation ticks.
    #[arg(
        long,
        env = "SNEAKFLIGHT_TICK_MS",
        default_value_t = 100,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    tick_ms: u64,

    /// Map played by headless runs (1-3, europe-us, vienna-hotel or japan).
    #[arg(long, env = "SNEAKFLIGHT_MAP", default_value = "europe-us")]
    map: MapId,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = GameConfig {
        rng_seed: cli.seed,
        starting_map: cli.map,
        ..GameConfig::default()
    };
    let mut world = GameWorld::new(config).context("failed to build game world")?;
    let renderer = TerminalRenderer::new(Duration::from_millis(cli.tick_ms));

    info!(
        renderer = renderer.name(),
        tick_ms = renderer.tick_interval().as_millis() as u64,
        seed = ?cli.seed,
        map = %cli.map,
        "Starting sneakflight"
    );
    renderer.run(RendererContext { world: &mut world })
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}
