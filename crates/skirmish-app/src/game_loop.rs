//! Game loop thread: runs the simulation engine at a fixed rate and publishes
//! snapshots.
//!
//! Commands arrive via `mpsc` channel. The latest snapshot is stored in
//! shared state for polling, and a summary line is logged periodically.

use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use skirmish_core::events::SimEvent;
use skirmish_sim::SimulationEngine;

use crate::state::{GameLoopCommand, LoopSummary, SharedSnapshot};

/// How the loop is paced and when it stops.
#[derive(Debug, Clone, Copy)]
pub struct LoopSettings {
    /// Stop after this many ticks; `None` runs until shut down.
    pub ticks: Option<u64>,
    /// Ticks per second; 0 runs unpaced.
    pub tick_rate: u32,
    /// Log a summary every N ticks (0 disables).
    pub report_every: u64,
}

impl LoopSettings {
    /// Nominal duration of one tick, `None` when unpaced.
    pub fn tick_duration(&self) -> Option<Duration> {
        (self.tick_rate > 0).then(|| Duration::from_nanos(1_000_000_000 / self.tick_rate as u64))
    }
}

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and a handle yielding the final summary.
pub fn spawn_game_loop(
    engine: SimulationEngine,
    settings: LoopSettings,
    latest_snapshot: SharedSnapshot,
) -> std::io::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<LoopSummary>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("skirmish-game-loop".into())
        .spawn(move || run_game_loop(engine, cmd_rx, settings, &latest_snapshot))?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until the tick limit, a Shutdown command, or channel
/// disconnect when no limit is set.
pub fn run_game_loop(
    mut engine: SimulationEngine,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    settings: LoopSettings,
    latest_snapshot: &SharedSnapshot,
) -> LoopSummary {
    let tick_duration = settings.tick_duration();
    let mut next_tick_time = Instant::now();
    let mut ticks = 0u64;

    loop {
        if settings.ticks.is_some_and(|limit| ticks >= limit) {
            break;
        }

        // 1. Drain all pending commands
        let mut shutdown = false;
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::Host(cmd)) => engine.queue_command(cmd),
                Ok(GameLoopCommand::Shutdown) => {
                    shutdown = true;
                    break;
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    // A bounded run keeps going without a host attached
                    shutdown = settings.ticks.is_none();
                    break;
                }
            }
        }
        if shutdown {
            break;
        }

        // 2. Advance one tick (engine handles pause semantics internally)
        engine.advance();
        ticks += 1;
        log_events(&engine.take_events());

        // 3. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(engine.snapshot());
        }

        if settings.report_every > 0 && ticks % settings.report_every == 0 {
            report(&engine);
        }

        // 4. Sleep until next tick
        if let Some(duration) = tick_duration {
            next_tick_time += duration;
            let now = Instant::now();
            if next_tick_time > now {
                std::thread::sleep(next_tick_time - now);
            } else if now - next_tick_time > duration * 2 {
                // Too far behind; reset to avoid catch-up spiral
                next_tick_time = now;
            }
        }
    }

    report(&engine);
    LoopSummary {
        ticks,
        tally: engine.tally(),
    }
}

fn report(engine: &SimulationEngine) {
    let snapshot = engine.snapshot();
    let tally = snapshot.tally;
    info!(
        tick = snapshot.time.tick,
        ships = snapshot.ships.len(),
        cannonballs = snapshot.projectiles.len(),
        rowboats = snapshot.transports.len(),
        shots = tally.shots_fired,
        hits = tally.hits,
        sunk = tally.ships_sunk,
        respawned = tally.ships_respawned,
        "skirmish status"
    );
}

fn log_events(events: &[SimEvent]) {
    for event in events {
        match event {
            SimEvent::ShipSunk { faction, position } => {
                debug!(faction = faction.name(), x = position.x, y = position.y, "ship sunk");
            }
            SimEvent::ShipRespawned { faction, .. } => {
                debug!(faction = faction.name(), "ship back in service");
            }
            _ => {}
        }
    }
}
