//! Tests for the simulation engine, cannonball physics, AI and the
//! sink/rowboat/respawn cycle.

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use skirmish_core::commands::HostCommand;
use skirmish_core::components::{Hull, Projectile};
use skirmish_core::constants::*;
use skirmish_core::enums::*;
use skirmish_core::events::SimEvent;
use skirmish_core::state::Tally;
use skirmish_core::types::Position;

use crate::config::{IslandSpec, SimConfig};
use crate::engine::SimulationEngine;
use crate::error::ConfigError;
use crate::systems::projectiles;
use crate::world_setup::{self, is_navigable};

fn empty_sea(seed: u64) -> SimConfig {
    SimConfig {
        seed,
        islands: Vec::new(),
        ships_per_faction: 0,
        ..Default::default()
    }
}

fn one_island(strategy: PathStrategy, bearing: f64) -> SimConfig {
    SimConfig {
        seed: 5,
        islands: vec![IslandSpec {
            port_bearing: Some(bearing),
            ..IslandSpec::new(900.0, 500.0, 60.0, Faction::Red)
        }],
        ships_per_faction: 0,
        pathfinding: strategy,
        ..Default::default()
    }
}

fn set_health(engine: &mut SimulationEngine, ship: hecs::Entity, health: u32) {
    engine
        .world_mut()
        .get::<&mut Hull>(ship)
        .expect("ship exists")
        .health = health;
}

fn ship_position(engine: &SimulationEngine, ship: hecs::Entity) -> Position {
    *engine.world().get::<&Position>(ship).expect("ship exists")
}

fn target_ship(world: &mut World, at: Position) -> hecs::Entity {
    world.spawn((
        at,
        Hull {
            faction: Faction::Blue,
            health: SHIP_MAX_HEALTH,
            max_health: SHIP_MAX_HEALTH,
        },
    ))
}

fn ball_phase(world: &World, ball: hecs::Entity) -> ProjectilePhase {
    world.get::<&Projectile>(ball).expect("ball exists").phase
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let mut engine_a = SimulationEngine::new(SimConfig {
        seed: 12345,
        ..Default::default()
    })
    .unwrap();
    let mut engine_b = SimulationEngine::new(SimConfig {
        seed: 12345,
        ..Default::default()
    })
    .unwrap();

    for _ in 0..300 {
        engine_a.advance();
        engine_b.advance();
        let json_a = serde_json::to_string(&engine_a.snapshot()).unwrap();
        let json_b = serde_json::to_string(&engine_b.snapshot()).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let mut engine_a = SimulationEngine::new(SimConfig {
        seed: 111,
        ..Default::default()
    })
    .unwrap();
    let mut engine_b = SimulationEngine::new(SimConfig {
        seed: 222,
        ..Default::default()
    })
    .unwrap();

    let mut diverged = false;
    for _ in 0..300 {
        engine_a.advance();
        engine_b.advance();
        let json_a = serde_json::to_string(&engine_a.snapshot()).unwrap();
        let json_b = serde_json::to_string(&engine_b.snapshot()).unwrap();
        if json_a != json_b {
            diverged = true;
            break;
        }
    }
    assert!(diverged, "Different seeds should produce divergent output");
}

// ---- Construction and commands ----

#[test]
fn test_invalid_config_is_rejected() {
    let result = SimulationEngine::new(SimConfig {
        world_height: -1.0,
        ..Default::default()
    });
    assert!(matches!(result, Err(ConfigError::InvalidWorld { .. })));
}

#[test]
fn test_initial_fleet_sits_at_home_ports() {
    let engine = SimulationEngine::new(SimConfig::default()).unwrap();
    let snap = engine.snapshot();
    assert_eq!(snap.ships.len(), SHIPS_PER_FACTION as usize * snap.islands.len());
    for ship in &snap.ships {
        let home = snap
            .islands
            .iter()
            .find(|i| i.faction == ship.faction)
            .expect("every ship has a home island");
        assert_eq!(ship.position, home.port);
        assert_eq!(ship.health, SHIP_MAX_HEALTH);
    }
}

#[test]
fn test_pause_stops_simulation() {
    let mut engine = SimulationEngine::new(SimConfig::default()).unwrap();
    engine.advance();
    let before = serde_json::to_string(&engine.snapshot().ships).unwrap();

    engine.queue_command(HostCommand::Pause);
    for _ in 0..10 {
        engine.advance();
    }
    assert_eq!(engine.phase(), SimPhase::Paused);
    assert_eq!(engine.time().tick, 1);
    let during = serde_json::to_string(&engine.snapshot().ships).unwrap();
    assert_eq!(before, during, "Paused world must not change");

    engine.queue_command(HostCommand::Resume);
    engine.advance();
    assert_eq!(engine.phase(), SimPhase::Running);
    assert_eq!(engine.time().tick, 2);
}

#[test]
fn test_spawn_commands() {
    let mut engine = SimulationEngine::new(one_island(PathStrategy::Grid, 0.0)).unwrap();
    engine.queue_commands([
        HostCommand::SpawnShip {
            faction: Faction::Red,
        },
        HostCommand::SpawnShip {
            faction: Faction::Purple,
        },
        HostCommand::SpawnPickup {
            position: Position::new(200.0, 200.0),
        },
    ]);
    engine.advance();
    let snap = engine.snapshot();
    assert_eq!(snap.ships.len(), 1, "Purple has no port");
    assert_eq!(snap.ships[0].faction, Faction::Red);
    assert_eq!(snap.pickups.len(), 1);
}

// ---- Projectile simulator ----

#[test]
fn test_hit_applies_exactly_one_damage() {
    // Scenario A
    let mut world = World::new();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut tally = Tally::default();
    let mut events = Vec::new();
    let ship = target_ship(&mut world, Position::new(100.0, 100.0));
    let ball = world_setup::spawn_projectile(
        &mut world,
        Position::new(60.0, 100.0),
        ship,
        Position::new(100.0, 100.0),
    );

    for _ in 0..8 {
        projectiles::run(&mut world, SplashMode::Animated, &mut rng, &mut tally, &mut events);
        assert_eq!(ball_phase(&world, ball), ProjectilePhase::Flying);
    }
    projectiles::run(&mut world, SplashMode::Animated, &mut rng, &mut tally, &mut events);
    assert_eq!(ball_phase(&world, ball), ProjectilePhase::Exploded);
    assert_eq!(world.get::<&Hull>(ship).unwrap().health, SHIP_MAX_HEALTH - 1);
    assert_eq!(
        world.get::<&Projectile>(ball).unwrap().debris.len(),
        DEBRIS_COUNT
    );

    for _ in 0..EXPLOSION_DURATION {
        projectiles::run(&mut world, SplashMode::Animated, &mut rng, &mut tally, &mut events);
        assert_eq!(ball_phase(&world, ball), ProjectilePhase::Exploded);
    }
    projectiles::run(&mut world, SplashMode::Animated, &mut rng, &mut tally, &mut events);
    assert_eq!(ball_phase(&world, ball), ProjectilePhase::Expired);

    assert_eq!(world.get::<&Hull>(ship).unwrap().health, SHIP_MAX_HEALTH - 1);
    assert_eq!(tally.hits, 1);
    let explosions = events
        .iter()
        .filter(|e| matches!(e, SimEvent::ProjectileExploded { .. }))
        .count();
    assert_eq!(explosions, 1);
}

#[test]
fn test_out_of_range_ball_splashes_without_damage() {
    // Scenario E
    let mut world = World::new();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut tally = Tally::default();
    let mut events = Vec::new();
    let ship = target_ship(&mut world, Position::new(300.0, 100.0));
    let ball = world_setup::spawn_projectile(
        &mut world,
        Position::new(100.0, 100.0),
        ship,
        Position::new(300.0, 100.0),
    );

    for _ in 0..37 {
        projectiles::run(&mut world, SplashMode::Animated, &mut rng, &mut tally, &mut events);
    }
    assert_eq!(ball_phase(&world, ball), ProjectilePhase::Flying);
    projectiles::run(&mut world, SplashMode::Animated, &mut rng, &mut tally, &mut events);
    assert_eq!(ball_phase(&world, ball), ProjectilePhase::Splashed);
    assert_eq!(world.get::<&Hull>(ship).unwrap().health, SHIP_MAX_HEALTH);

    for _ in 0..SPLASH_DURATION {
        projectiles::run(&mut world, SplashMode::Animated, &mut rng, &mut tally, &mut events);
    }
    assert_eq!(ball_phase(&world, ball), ProjectilePhase::Expired);
    assert_eq!(tally.misses, 1);
    assert_eq!(tally.hits, 0);
}

#[test]
fn test_instant_splash_expires_immediately() {
    let mut world = World::new();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut tally = Tally::default();
    let mut events = Vec::new();
    let ship = target_ship(&mut world, Position::new(300.0, 100.0));
    let ball = world_setup::spawn_projectile(
        &mut world,
        Position::new(100.0, 100.0),
        ship,
        Position::new(300.0, 100.0),
    );
    for _ in 0..38 {
        projectiles::run(&mut world, SplashMode::Instant, &mut rng, &mut tally, &mut events);
    }
    assert_eq!(ball_phase(&world, ball), ProjectilePhase::Expired);
    assert_eq!(events, vec![SimEvent::ProjectileSplashed {
        position: Position::new(252.0, 100.0)
    }]);
}

#[test]
fn test_ball_survives_target_sinking() {
    let mut world = World::new();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut tally = Tally::default();
    let mut events = Vec::new();
    let ship = target_ship(&mut world, Position::new(140.0, 100.0));
    let ball = world_setup::spawn_projectile(
        &mut world,
        Position::new(100.0, 100.0),
        ship,
        Position::new(140.0, 100.0),
    );
    world.despawn(ship).unwrap();

    for _ in 0..38 {
        projectiles::run(&mut world, SplashMode::Animated, &mut rng, &mut tally, &mut events);
    }
    assert_eq!(ball_phase(&world, ball), ProjectilePhase::Splashed);
    assert_eq!(tally.hits, 0);
    assert_eq!(tally.misses, 1);
}

#[test]
fn test_zero_length_shot_still_runs_out_of_range() {
    let mut world = World::new();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut tally = Tally::default();
    let mut events = Vec::new();
    let at = Position::new(200.0, 200.0);
    let ship = target_ship(&mut world, at);
    let ball = world_setup::spawn_projectile(&mut world, at, ship, at);
    world.despawn(ship).unwrap();

    for _ in 0..37 {
        projectiles::run(&mut world, SplashMode::Animated, &mut rng, &mut tally, &mut events);
    }
    assert_eq!(ball_phase(&world, ball), ProjectilePhase::Flying);
    projectiles::run(&mut world, SplashMode::Animated, &mut rng, &mut tally, &mut events);
    assert_eq!(ball_phase(&world, ball), ProjectilePhase::Splashed);
    assert_eq!(*world.get::<&Position>(ball).unwrap(), at);
    assert_eq!(tally.misses, 1);
}

// ---- Combat AI in the engine ----

#[test]
fn test_same_faction_ships_never_engage() {
    // Scenario C
    let mut engine = SimulationEngine::new(empty_sea(3)).unwrap();
    engine.spawn_test_ship(Faction::Red, Position::new(500.0, 500.0));
    engine.spawn_test_ship(Faction::Red, Position::new(520.0, 500.0));

    for _ in 0..300 {
        engine.advance();
        for ship in engine.snapshot().ships {
            assert!(!ship.attack_mode);
            assert!(ship.target.is_none());
        }
    }
    assert_eq!(engine.tally().shots_fired, 0);
}

#[test]
fn test_targets_are_always_hostile() {
    let mut engine = SimulationEngine::new(empty_sea(8)).unwrap();
    engine.spawn_test_ship(Faction::Red, Position::new(500.0, 500.0));
    engine.spawn_test_ship(Faction::Red, Position::new(510.0, 500.0));
    engine.spawn_test_ship(Faction::Blue, Position::new(600.0, 500.0));

    let mut engaged = false;
    for _ in 0..300 {
        engine.advance();
        let snap = engine.snapshot();
        for ship in &snap.ships {
            let Some(target) = ship.target else { continue };
            engaged = true;
            if let Some(other) = snap.ships.iter().find(|s| s.id == target) {
                assert_ne!(other.faction, ship.faction);
            }
        }
    }
    assert!(engaged, "ships 100 apart should engage");
}

#[test]
fn test_duel_opens_fire_on_first_tick() {
    let mut engine = SimulationEngine::new(empty_sea(4)).unwrap();
    let red = engine.spawn_test_ship(Faction::Red, Position::new(500.0, 500.0));
    let blue = engine.spawn_test_ship(Faction::Blue, Position::new(580.0, 500.0));

    engine.advance();
    let events = engine.take_events();
    let fired: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            SimEvent::ShipFired { ship, target, .. } => Some((*ship, *target)),
            _ => None,
        })
        .collect();
    assert_eq!(fired.len(), 2);
    assert!(fired.contains(&(red.to_bits().get(), blue.to_bits().get())));
    assert!(fired.contains(&(blue.to_bits().get(), red.to_bits().get())));
    assert!(engine.take_events().is_empty());

    let snap = engine.snapshot();
    assert_eq!(snap.projectiles.len(), 2);
    assert!(snap.ships.iter().all(|s| s.attack_mode && s.firing));
}

#[test]
fn test_damaged_ship_seeks_pickup() {
    // Scenario D
    let mut engine = SimulationEngine::new(empty_sea(6)).unwrap();
    let ship = engine.spawn_test_ship(Faction::Green, Position::new(500.0, 500.0));
    set_health(&mut engine, ship, 5);
    let pickup = Position::new(500.0, 300.0);
    engine.queue_command(HostCommand::SpawnPickup { position: pickup });

    let mut prev = ship_position(&engine, ship).distance_to(&pickup);
    let mut collected = false;
    for _ in 0..150 {
        engine.advance();
        if engine.snapshot().pickups.is_empty() {
            collected = true;
            break;
        }
        let dist = ship_position(&engine, ship).distance_to(&pickup);
        assert!(dist < prev, "seeking ship must close in every tick");
        prev = dist;
    }
    assert!(collected);
    assert_eq!(
        engine.world().get::<&Hull>(ship).unwrap().health,
        SHIP_MAX_HEALTH
    );
    assert_eq!(engine.tally().pickups_collected, 1);
}

#[test]
fn test_ship_sunk_this_tick_cannot_collect_pickup() {
    let mut engine = SimulationEngine::new(empty_sea(6)).unwrap();
    let ship = engine.spawn_test_ship(Faction::Green, Position::new(500.0, 500.0));
    set_health(&mut engine, ship, 1);
    engine.queue_command(HostCommand::SpawnPickup {
        position: Position::new(500.0, 517.0),
    });
    // The ship seeks 2 units south to (500, 502), where this ball lands
    world_setup::spawn_projectile(
        engine.world_mut(),
        Position::new(496.0, 502.0),
        ship,
        Position::new(500.0, 502.0),
    );

    engine.advance();

    let tally = engine.tally();
    assert_eq!(tally.hits, 1);
    assert_eq!(tally.pickups_collected, 0);
    assert_eq!(tally.ships_sunk, 1);
    assert!(engine.world().get::<&Hull>(ship).is_err());
    let snap = engine.snapshot();
    assert!(snap.ships.is_empty());
    assert_eq!(snap.wrecks.len(), 1);
    assert!(!snap
        .events
        .iter()
        .any(|e| matches!(e, SimEvent::PickupCollected { .. })));
}

// ---- Sink, rowboat, respawn ----

fn sink_and_follow(strategy: PathStrategy, bearing: f64) {
    // Scenario B
    let mut engine = SimulationEngine::new(one_island(strategy, bearing)).unwrap();
    let ship = engine.spawn_test_ship(Faction::Red, Position::new(400.0, 500.0));
    set_health(&mut engine, ship, 0);

    engine.advance();
    let snap = engine.snapshot();
    let port = snap.islands[0].port;
    assert!(snap.ships.is_empty());
    assert_eq!(snap.wrecks.len(), 1);
    assert!(snap.wrecks[0].position.distance_to(&Position::new(400.0, 500.0)) <= 1.0);
    assert_eq!(snap.pickups.len(), 1);
    assert_eq!(snap.transports.len(), 1);
    assert_eq!(snap.transports[0].destination, port);
    assert!(snap.events.iter().any(|e| matches!(e, SimEvent::ShipSunk { faction: Faction::Red, .. })));
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, SimEvent::TransportLaunched { faction: Faction::Red, .. })));

    let mut arrived = false;
    for _ in 0..3000 {
        engine.advance();
        let snap = engine.snapshot();
        if snap.transports.iter().any(|t| t.arrived) {
            arrived = true;
            assert_eq!(snap.ships.len(), 1);
            assert_eq!(snap.ships[0].faction, Faction::Red);
            assert_eq!(snap.ships[0].position, port);
            break;
        }
        assert!(snap.ships.is_empty(), "no ship before the rowboat docks");
    }
    assert!(arrived, "rowboat never reached port");

    for _ in 0..TRANSPORT_LINGER_TICKS + 10 {
        engine.advance();
    }
    let snap = engine.snapshot();
    assert!(snap.transports.is_empty(), "rowboat removed after lingering");
    assert_eq!(engine.tally().ships_sunk, 1);
    assert_eq!(engine.tally().ships_respawned, 1);
}

#[test]
fn test_sunk_ship_is_rowed_home_and_respawned() {
    sink_and_follow(PathStrategy::Grid, 0.0);
}

#[test]
fn test_detour_rowboat_respawns_ship() {
    // Port on the near side keeps the straight line clear of the island
    sink_and_follow(PathStrategy::Detour, std::f64::consts::PI);
}

#[test]
fn test_grid_route_avoids_island() {
    let mut engine = SimulationEngine::new(one_island(PathStrategy::Grid, 0.0)).unwrap();
    let ship = engine.spawn_test_ship(Faction::Red, Position::new(400.0, 500.0));
    set_health(&mut engine, ship, 0);
    engine.advance();

    let island = engine.obstacles().islands()[0].clone();
    for _ in 0..3000 {
        let snap = engine.snapshot();
        let Some(boat) = snap.transports.first() else { break };
        if boat.arrived {
            break;
        }
        assert!(
            boat.position.distance_to(&island.center) >= island.radius,
            "routed rowboat clipped the island"
        );
        engine.advance();
    }
}

#[test]
fn test_faction_without_port_gets_no_rowboat() {
    let mut engine = SimulationEngine::new(one_island(PathStrategy::Grid, 0.0)).unwrap();
    let ship = engine.spawn_test_ship(Faction::Purple, Position::new(400.0, 500.0));
    set_health(&mut engine, ship, 0);
    engine.advance();
    let snap = engine.snapshot();
    assert_eq!(snap.wrecks.len(), 1);
    assert!(snap.transports.is_empty());
    assert_eq!(snap.tally.ships_sunk, 1);
}

#[test]
fn test_wreck_sinks_after_its_life() {
    let mut engine = SimulationEngine::new(SimConfig {
        drop_pickup_on_death: false,
        ..one_island(PathStrategy::Grid, 0.0)
    })
    .unwrap();
    let ship = engine.spawn_test_ship(Faction::Purple, Position::new(400.0, 500.0));
    set_health(&mut engine, ship, 0);
    engine.advance();
    assert_eq!(engine.snapshot().wrecks.len(), 1);
    assert!(engine.snapshot().pickups.is_empty());

    for _ in 0..WRECK_LIFE_TICKS - 1 {
        engine.advance();
    }
    assert_eq!(engine.snapshot().wrecks.len(), 1);
    engine.advance();
    assert!(engine.snapshot().wrecks.is_empty());
}

#[test]
fn test_population_is_conserved_through_deaths() {
    let config = SimConfig {
        seed: 77,
        islands: vec![
            IslandSpec::new(300.0, 300.0, 48.0, Faction::Red),
            IslandSpec::new(1500.0, 700.0, 48.0, Faction::Blue),
        ],
        ships_per_faction: 0,
        ..Default::default()
    };
    let mut engine = SimulationEngine::new(config).unwrap();
    for i in 0..3 {
        let y = 400.0 + 60.0 * i as f64;
        engine.spawn_test_ship(Faction::Red, Position::new(800.0, y));
        engine.spawn_test_ship(Faction::Blue, Position::new(870.0, y));
    }

    let mut launched = 0u32;
    for _ in 0..3000 {
        engine.advance();
        launched += engine
            .take_events()
            .iter()
            .filter(|e| matches!(e, SimEvent::TransportLaunched { .. }))
            .count() as u32;
        let tally = engine.tally();
        let snap = engine.snapshot();
        assert_eq!(
            snap.ships.len() as u32,
            6 + tally.ships_respawned - tally.ships_sunk
        );
        assert_eq!(launched, tally.ships_sunk, "one rowboat per sinking");
        assert!(tally.ships_respawned <= tally.ships_sunk);
        assert!(tally.hits + tally.misses <= tally.shots_fired);
    }
    assert!(engine.tally().shots_fired > 0);
}

// ---- Invariants over a full skirmish ----

#[test]
fn test_health_and_clearance_invariants() {
    let mut engine = SimulationEngine::new(SimConfig {
        seed: 2024,
        ..Default::default()
    })
    .unwrap();
    for _ in 0..2000 {
        engine.advance();
        for ship in engine.snapshot().ships {
            assert!(ship.health <= ship.max_health);
            assert!(
                is_navigable(engine.obstacles(), &ship.position),
                "ship {} at {:?} is aground or off the map",
                ship.id,
                ship.position
            );
            assert!(ship.wake.len() <= WAKE_MAX);
        }
    }
}
