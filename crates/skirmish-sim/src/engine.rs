//! Simulation engine: the tick coordinator.
//!
//! `SimulationEngine` owns the hecs ECS world, the island map, the route
//! planner and the RNG. It processes host commands, runs all systems in a
//! fixed order, and produces `WorldSnapshot`s. Completely headless, enabling
//! deterministic testing.

use std::collections::VecDeque;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{info, trace, warn};

use skirmish_core::commands::HostCommand;
use skirmish_core::enums::SimPhase;
use skirmish_core::events::SimEvent;
use skirmish_core::state::{Tally, WorldSnapshot};
use skirmish_core::types::SimTime;
use skirmish_nav::{pathfinder_for, ObstacleMap, Pathfinder};

use crate::config::SimConfig;
use crate::error::ConfigError;
use crate::systems;
use crate::systems::lifecycle::LifecycleContext;
use crate::systems::transports::Arrival;
use crate::world_setup;

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    obstacles: ObstacleMap,
    pathfinder: Box<dyn Pathfinder>,
    config: SimConfig,
    time: SimTime,
    phase: SimPhase,
    rng: ChaCha8Rng,
    command_queue: VecDeque<HostCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    arrivals: Vec<Arrival>,
    events: Vec<SimEvent>,
    tally: Tally,
}

impl SimulationEngine {
    /// Validate the config, lay out the islands and place the starting fleet.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let obstacles = world_setup::build_obstacles(&config, &mut rng);
        let mut world = World::new();
        world_setup::setup_fleet(&mut world, &obstacles, config.ships_per_faction, &mut rng);

        info!(
            seed = config.seed,
            islands = obstacles.islands().len(),
            ships = config.ships_per_faction as usize * obstacles.islands().len(),
            pathfinding = ?config.pathfinding,
            "simulation initialised"
        );

        Ok(Self {
            world,
            obstacles,
            pathfinder: pathfinder_for(config.pathfinding),
            config,
            time: SimTime::default(),
            phase: SimPhase::default(),
            rng,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            arrivals: Vec::new(),
            events: Vec::new(),
            tally: Tally::default(),
        })
    }

    /// Queue a host command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: HostCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = HostCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick.
    ///
    /// Events from the previous tick are discarded unless taken first.
    pub fn advance(&mut self) {
        self.events.clear();
        self.process_commands();

        if self.phase == SimPhase::Running {
            self.run_systems();
            self.time.advance();
        }
    }

    /// Build a snapshot of every population plus the last tick's events.
    pub fn snapshot(&self) -> WorldSnapshot {
        systems::snapshot::build_snapshot(
            &self.world,
            &self.obstacles,
            &self.time,
            self.phase,
            self.events.clone(),
            &self.tally,
        )
    }

    /// Drain the events produced by the last tick.
    pub fn take_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn phase(&self) -> SimPhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn tally(&self) -> Tally {
        self.tally
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn obstacles(&self) -> &ObstacleMap {
        &self.obstacles
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    #[cfg(test)]
    pub(crate) fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Spawn a ship exactly where a test wants it (validated like any spawn).
    #[cfg(test)]
    pub(crate) fn spawn_test_ship(
        &mut self,
        faction: skirmish_core::enums::Faction,
        at: skirmish_core::types::Position,
    ) -> hecs::Entity {
        world_setup::spawn_ship(&mut self.world, &self.obstacles, faction, at, &mut self.rng)
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single host command.
    fn handle_command(&mut self, command: HostCommand) {
        match command {
            HostCommand::Pause => {
                if self.phase == SimPhase::Running {
                    self.phase = SimPhase::Paused;
                }
            }
            HostCommand::Resume => {
                if self.phase == SimPhase::Paused {
                    self.phase = SimPhase::Running;
                }
            }
            HostCommand::SpawnPickup { position } => {
                let at = self.obstacles.bounds().clamp(&position, 0.0);
                world_setup::spawn_pickup(&mut self.world, at);
            }
            HostCommand::SpawnShip { faction } => match self.obstacles.home_port(faction) {
                Some((_, port)) => {
                    world_setup::spawn_ship(
                        &mut self.world,
                        &self.obstacles,
                        faction,
                        port,
                        &mut self.rng,
                    );
                }
                None => warn!(faction = faction.name(), "no home port, ship not spawned"),
            },
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        trace!(tick = self.time.tick, "advancing");

        // 1. Ship AI (decide, move, queue fire)
        systems::ship_ai::run(
            &mut self.world,
            &self.obstacles,
            &self.config.behavior,
            &mut self.rng,
            &mut self.tally,
            &mut self.events,
        );
        // 2. Cannonball flight, hits and animation
        systems::projectiles::run(
            &mut self.world,
            self.config.splash,
            &mut self.rng,
            &mut self.tally,
            &mut self.events,
        );
        // 3. Wrecks age and sink
        systems::wrecks::run(&mut self.world, &mut self.despawn_buffer);
        // 4. Pickups age and get collected
        systems::pickups::run(
            &mut self.world,
            &mut self.despawn_buffer,
            &mut self.tally,
            &mut self.events,
        );
        // 5. Rowboats row
        self.arrivals.clear();
        systems::transports::run(
            &mut self.world,
            &self.obstacles,
            self.pathfinder.as_ref(),
            &mut self.rng,
            &mut self.despawn_buffer,
            &mut self.arrivals,
        );
        // 6. Dead ships out, replacement ships in, as one batch
        let ctx = LifecycleContext {
            map: &self.obstacles,
            pathfinder: self.pathfinder.as_ref(),
            drop_pickup_on_death: self.config.drop_pickup_on_death,
        };
        systems::lifecycle::run(
            &mut self.world,
            &ctx,
            &mut self.rng,
            &self.arrivals,
            &mut self.tally,
            &mut self.events,
        );
        // 7. Finished cannonballs removed
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);
    }
}
