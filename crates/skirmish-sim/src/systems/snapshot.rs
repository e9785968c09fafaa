//! Snapshot system: queries the ECS world and builds a complete WorldSnapshot.
//!
//! This system is read-only; it never modifies the world.

use hecs::World;

use skirmish_core::components::*;
use skirmish_core::enums::SimPhase;
use skirmish_core::events::SimEvent;
use skirmish_core::state::*;
use skirmish_core::types::{Position, SimTime};
use skirmish_nav::ObstacleMap;

/// Build a complete WorldSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    map: &ObstacleMap,
    time: &SimTime,
    phase: SimPhase,
    events: Vec<SimEvent>,
    tally: &Tally,
) -> WorldSnapshot {
    WorldSnapshot {
        time: *time,
        phase,
        bounds: Some(map.bounds()),
        islands: build_islands(map),
        ships: build_ships(world),
        projectiles: build_projectiles(world),
        wrecks: build_wrecks(world),
        transports: build_transports(world),
        pickups: build_pickups(world),
        events,
        tally: *tally,
    }
}

fn build_islands(map: &ObstacleMap) -> Vec<IslandView> {
    map.islands()
        .iter()
        .map(|island| IslandView {
            center: island.center,
            radius: island.radius,
            faction: island.faction,
            port: island.port,
        })
        .collect()
}

/// Build ShipView list, ordered by entity id.
fn build_ships(world: &World) -> Vec<ShipView> {
    let mut ships: Vec<ShipView> = world
        .query::<(&Position, &Hull, &Helm, &Gunnery, &WakeTrail)>()
        .iter()
        .map(|(entity, (pos, hull, helm, gunnery, wake))| ShipView {
            id: entity.to_bits().get(),
            position: *pos,
            direction: helm.direction,
            health: hull.health,
            max_health: hull.max_health,
            faction: hull.faction,
            attack_mode: helm.attack_mode,
            target: gunnery.target.map(|t| t.to_bits().get()),
            firing: gunnery.muzzle_flash > 0,
            wake: wake.positions.iter().copied().collect(),
        })
        .collect();

    ships.sort_by_key(|s| s.id);
    ships
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    world
        .query::<(&Position, &Projectile)>()
        .iter()
        .map(|(_, (pos, ball))| ProjectileView {
            position: *pos,
            phase: ball.phase,
            phase_ticks: ball.phase_ticks,
            debris: ball.debris.iter().map(|d| d.position).collect(),
        })
        .collect()
}

fn build_wrecks(world: &World) -> Vec<WreckView> {
    world
        .query::<(&Position, &Wreck)>()
        .iter()
        .map(|(_, (pos, wreck))| WreckView {
            position: *pos,
            age: wreck.age,
        })
        .collect()
}

fn build_transports(world: &World) -> Vec<TransportView> {
    world
        .query::<(&Position, &Transport)>()
        .iter()
        .map(|(_, (pos, boat))| TransportView {
            position: *pos,
            faction: boat.faction,
            destination: boat.port,
            route: boat.route.iter().copied().collect(),
            arrived: boat.arrived,
        })
        .collect()
}

fn build_pickups(world: &World) -> Vec<PickupView> {
    world
        .query::<(&Position, &Pickup)>()
        .iter()
        .map(|(_, (pos, pickup))| PickupView {
            position: *pos,
            age: pickup.age,
        })
        .collect()
}
