//! Entity spawn factories for setting up the simulation world.
//!
//! Builds the obstacle map from a scenario and creates ships, cannonballs,
//! wrecks, pickups and rowboats with their component bundles.

use std::collections::VecDeque;

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::warn;

use skirmish_core::components::*;
use skirmish_core::constants::*;
use skirmish_core::enums::*;
use skirmish_core::types::{Position, Velocity};
use skirmish_nav::{port_point, ObstacleMap, Pathfinder};

use crate::config::SimConfig;

/// Build the immutable island set. Islands without a configured port
/// bearing get one from the simulation RNG.
pub fn build_obstacles(config: &SimConfig, rng: &mut ChaCha8Rng) -> ObstacleMap {
    let bounds = config.bounds();
    let islands = config
        .islands
        .iter()
        .map(|spec| {
            let center = spec.center();
            let bearing = spec
                .port_bearing
                .unwrap_or_else(|| rng.gen_range(0.0..std::f64::consts::TAU));
            Island {
                center,
                radius: spec.radius,
                faction: spec.faction,
                port: port_point(&center, spec.radius, bearing, &bounds),
            }
        })
        .collect();
    ObstacleMap::new(bounds, islands)
}

/// Place the starting fleet: `ships_per_faction` ships at every island's port.
pub fn setup_fleet(
    world: &mut World,
    map: &ObstacleMap,
    ships_per_faction: u32,
    rng: &mut ChaCha8Rng,
) {
    for island in map.islands() {
        for _ in 0..ships_per_faction {
            spawn_ship(world, map, island.faction, island.port, rng);
        }
    }
}

/// Spawn a full-health ship for `faction` at (or near) `at`.
pub fn spawn_ship(
    world: &mut World,
    map: &ObstacleMap,
    faction: Faction,
    at: Position,
    rng: &mut ChaCha8Rng,
) -> Entity {
    let position = find_spawn_point(map, at, rng);
    let mut wake = WakeTrail::default();
    wake.positions.push_front(position);
    world.spawn((
        position,
        Hull {
            faction,
            health: SHIP_MAX_HEALTH,
            max_health: SHIP_MAX_HEALTH,
        },
        Helm {
            direction: Direction::random(rng),
            attack_mode: false,
        },
        Gunnery::default(),
        wake,
    ))
}

/// Where a ship may legally sit: clear of every island by the hull radius
/// and inside the map by the same margin.
pub fn is_navigable(map: &ObstacleMap, point: &Position) -> bool {
    !map.blocks(point, HULL_RADIUS) && map.bounds().contains(point, HULL_RADIUS)
}

/// Choose a spawn point. The requested point is used as-is when navigable.
/// Otherwise random candidates are drawn and validated with the wider spawn
/// buffers; if every attempt fails the roomiest candidate is used.
pub fn find_spawn_point(map: &ObstacleMap, at: Position, rng: &mut ChaCha8Rng) -> Position {
    if is_navigable(map, &at) {
        return at;
    }

    let bounds = map.bounds();
    let inset = 2.0 * SPAWN_BORDER_MARGIN;
    let mut best: Option<(Position, f64)> = None;
    for _ in 0..MAX_SPAWN_ATTEMPTS {
        let candidate = Position::new(
            random_coordinate(rng, inset, bounds.width),
            random_coordinate(rng, inset, bounds.height),
        );
        let valid = !map.blocks(&candidate, HULL_RADIUS + SPAWN_ISLAND_BUFFER)
            && bounds.contains(&candidate, HULL_RADIUS + SPAWN_BORDER_MARGIN);
        if valid {
            return candidate;
        }
        let room = map.clearance_at(&candidate, HULL_RADIUS);
        if best.map_or(true, |(_, r)| room > r) {
            best = Some((candidate, room));
        }
    }

    let fallback = best.map(|(p, _)| p).unwrap_or(at);
    warn!(
        x = fallback.x,
        y = fallback.y,
        attempts = MAX_SPAWN_ATTEMPTS,
        "no validated spawn point, using best candidate"
    );
    fallback
}

fn random_coordinate(rng: &mut ChaCha8Rng, inset: f64, extent: f64) -> f64 {
    if extent > 2.0 * inset {
        rng.gen_range(inset..extent - inset)
    } else {
        extent / 2.0
    }
}

/// Spawn a cannonball aimed at where `target` is right now.
pub fn spawn_projectile(
    world: &mut World,
    from: Position,
    target: Entity,
    aim: Position,
) -> Entity {
    world.spawn((
        from,
        Projectile {
            velocity: Velocity::aimed(&from, &aim, CANNONBALL_SPEED),
            range_left: CANNONBALL_MAX_RANGE,
            target,
            phase: ProjectilePhase::Flying,
            phase_ticks: 0,
            debris: Vec::new(),
        },
    ))
}

pub fn spawn_wreck(world: &mut World, at: Position) -> Entity {
    world.spawn((
        at,
        Wreck {
            life: WRECK_LIFE_TICKS,
            age: 0,
        },
    ))
}

pub fn spawn_pickup(world: &mut World, at: Position) -> Entity {
    world.spawn((
        at,
        Pickup {
            life: PICKUP_LIFE_TICKS,
            age: 0,
        },
    ))
}

/// A rowboat that was launched, with the data needed for its event.
pub struct LaunchedTransport {
    pub entity: Entity,
    pub port: Position,
    pub route_len: usize,
}

/// Launch a rowboat from `from` toward `faction`'s home port.
/// `None` when the faction has no island.
pub fn spawn_transport(
    world: &mut World,
    map: &ObstacleMap,
    pathfinder: &dyn Pathfinder,
    faction: Faction,
    from: Position,
) -> Option<LaunchedTransport> {
    let (destination, port) = map.home_port(faction)?;
    let route: VecDeque<Position> = pathfinder.plan(map, from, port).into();
    let route_len = route.len();
    let entity = world.spawn((
        from,
        Transport {
            faction,
            destination,
            port,
            speed: TRANSPORT_SPEED,
            routed: !route.is_empty(),
            route,
            arrived: false,
            respawned: None,
            linger: TRANSPORT_LINGER_TICKS,
        },
    ));
    Some(LaunchedTransport {
        entity,
        port,
        route_len,
    })
}
