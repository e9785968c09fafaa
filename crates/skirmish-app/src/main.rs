use std::io::BufRead;
use std::sync::{mpsc, Arc, Mutex};

use tracing::{info, warn};

use skirmish_app::config::AppConfig;
use skirmish_app::game_loop::{spawn_game_loop, LoopSettings};
use skirmish_app::state::{GameLoopCommand, SharedSnapshot};
use skirmish_core::commands::HostCommand;
use skirmish_sim::SimulationEngine;

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();
    init_tracing();

    info!("Skirmish v{}", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load_or_default();
    let sim_config = config.sim_config()?;
    info!(
        scenario = ?config.scenario,
        seed = sim_config.seed,
        ticks = ?config.ticks,
        tick_rate = config.tick_rate,
        "Configuration loaded"
    );

    let engine = SimulationEngine::new(sim_config)?;
    let latest: SharedSnapshot = Arc::new(Mutex::new(None));
    let settings = LoopSettings {
        ticks: config.ticks,
        tick_rate: config.tick_rate,
        report_every: config.report_every,
    };
    let (cmd_tx, handle) = spawn_game_loop(engine, settings, latest)?;

    if config.stdin_commands {
        let reader = cmd_tx.clone();
        std::thread::Builder::new()
            .name("skirmish-stdin".into())
            .spawn(move || forward_stdin(reader))?;
    }

    let summary = handle
        .join()
        .map_err(|_| anyhow::anyhow!("game loop thread panicked"))?;
    // Held until here so an unbounded run never sees a disconnect
    drop(cmd_tx);
    info!(ticks = summary.ticks, "Simulation finished");
    println!("{}", serde_json::to_string_pretty(&summary.tally)?);
    Ok(())
}

/// Read one JSON host command per line until EOF, then shut the loop down.
fn forward_stdin(cmd_tx: mpsc::Sender<GameLoopCommand>) {
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<HostCommand>(line) {
            Ok(cmd) => {
                if cmd_tx.send(GameLoopCommand::Host(cmd)).is_err() {
                    return;
                }
            }
            Err(e) => warn!("Ignoring malformed command '{}': {}", line, e),
        }
    }
    let _ = cmd_tx.send(GameLoopCommand::Shutdown);
}
