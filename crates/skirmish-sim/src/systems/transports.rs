//! Rowboat system: moves transports along their routes and reports arrivals.
//!
//! A routed boat commits to each waypoint once it is within one speed step.
//! A boat with no route rows straight for its port, clipping terrain if it
//! must. Arrived boats linger at the dock, then are removed.

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use skirmish_core::components::Transport;
use skirmish_core::enums::Faction;
use skirmish_core::types::Position;
use skirmish_nav::{ObstacleMap, Pathfinder};

/// A boat that has reached its port and still owes a ship.
#[derive(Debug, Clone, Copy)]
pub struct Arrival {
    pub transport: Entity,
    pub faction: Faction,
    pub port: Position,
}

pub fn run(
    world: &mut World,
    map: &ObstacleMap,
    pathfinder: &dyn Pathfinder,
    rng: &mut ChaCha8Rng,
    despawn_buffer: &mut Vec<Entity>,
    arrivals: &mut Vec<Arrival>,
) {
    despawn_buffer.clear();

    for (entity, (pos, boat)) in world.query_mut::<(&mut Position, &mut Transport)>() {
        if boat.arrived {
            if boat.respawned.is_none() {
                arrivals.push(Arrival {
                    transport: entity,
                    faction: boat.faction,
                    port: boat.port,
                });
            } else {
                boat.linger = boat.linger.saturating_sub(1);
                if boat.linger == 0 {
                    despawn_buffer.push(entity);
                }
            }
            continue;
        }

        if boat.routed {
            pathfinder.adjust(map, *pos, &mut boat.route, boat.speed, rng);
        }

        match boat.route.front().copied() {
            Some(waypoint) if boat.routed => {
                *pos = pos.step_toward(&waypoint, boat.speed);
                if *pos == waypoint {
                    boat.route.pop_front();
                }
                if boat.route.is_empty() {
                    *pos = boat.port;
                    boat.arrived = true;
                }
            }
            _ => {
                *pos = pos.step_toward(&boat.port, boat.speed);
                if *pos == boat.port {
                    boat.arrived = true;
                }
            }
        }

        if boat.arrived {
            arrivals.push(Arrival {
                transport: entity,
                faction: boat.faction,
                port: boat.port,
            });
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
