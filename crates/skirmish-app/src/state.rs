//! Messages and shared state between the host and the game loop thread.

use std::sync::{Arc, Mutex};

use skirmish_core::commands::HostCommand;
use skirmish_core::state::{Tally, WorldSnapshot};

/// Commands sent from the host to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A host command to forward to the simulation engine.
    Host(HostCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Latest snapshot, written by the game loop after each tick.
pub type SharedSnapshot = Arc<Mutex<Option<WorldSnapshot>>>;

/// What the loop reports when it stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopSummary {
    pub ticks: u64,
    pub tally: Tally,
}
