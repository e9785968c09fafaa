//! Death and rebirth, applied as one batch after every population has moved.
//!
//! A sunk ship leaves exactly one wreck and launches exactly one rowboat
//! toward its faction's port. Each arrived rowboat produces exactly one new
//! ship; recording it in `Transport::respawned` stops a second.

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, warn};

use skirmish_core::components::{Hull, Transport};
use skirmish_core::enums::Faction;
use skirmish_core::events::SimEvent;
use skirmish_core::state::Tally;
use skirmish_core::types::Position;
use skirmish_nav::{ObstacleMap, Pathfinder};

use crate::systems::transports::Arrival;
use crate::world_setup;

/// Shared state the batch needs besides the world.
pub struct LifecycleContext<'a> {
    pub map: &'a ObstacleMap,
    pub pathfinder: &'a dyn Pathfinder,
    pub drop_pickup_on_death: bool,
}

pub fn run(
    world: &mut World,
    ctx: &LifecycleContext<'_>,
    rng: &mut ChaCha8Rng,
    arrivals: &[Arrival],
    tally: &mut Tally,
    events: &mut Vec<SimEvent>,
) {
    let sunk: Vec<(Entity, Position, Faction)> = world
        .query::<(&Position, &Hull)>()
        .iter()
        .filter(|(_, (_, hull))| hull.health == 0)
        .map(|(entity, (pos, hull))| (entity, *pos, hull.faction))
        .collect();

    for (entity, at, faction) in sunk {
        if world.despawn(entity).is_err() {
            continue;
        }
        world_setup::spawn_wreck(world, at);
        if ctx.drop_pickup_on_death {
            world_setup::spawn_pickup(world, at);
        }
        tally.ships_sunk += 1;
        events.push(SimEvent::ShipSunk {
            faction,
            position: at,
        });

        match world_setup::spawn_transport(world, ctx.map, ctx.pathfinder, faction, at) {
            Some(launched) => {
                debug!(
                    faction = faction.name(),
                    x = at.x,
                    y = at.y,
                    route_len = launched.route_len,
                    "ship sunk, rowboat launched"
                );
                events.push(SimEvent::TransportLaunched {
                    faction,
                    from: at,
                    to: launched.port,
                    route_len: launched.route_len,
                });
            }
            None => {
                warn!(
                    faction = faction.name(),
                    "ship sunk but faction has no home port; no rowboat launched"
                );
            }
        }
    }

    for arrival in arrivals {
        let already = world
            .get::<&Transport>(arrival.transport)
            .map(|boat| boat.respawned.is_some())
            .unwrap_or(true);
        if already {
            continue;
        }

        let ship = world_setup::spawn_ship(world, ctx.map, arrival.faction, arrival.port, rng);
        if let Ok(mut boat) = world.get::<&mut Transport>(arrival.transport) {
            boat.respawned = Some(ship);
        }
        let position = world
            .get::<&Position>(ship)
            .map(|p| *p)
            .unwrap_or(arrival.port);

        tally.ships_respawned += 1;
        debug!(
            faction = arrival.faction.name(),
            x = position.x,
            y = position.y,
            "ship respawned at port"
        );
        events.push(SimEvent::ShipRespawned {
            ship: ship.to_bits().get(),
            faction: arrival.faction,
            position,
        });
    }
}
