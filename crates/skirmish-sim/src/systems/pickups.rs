//! Pickup system: ages health drops and lets ships collect them.
//!
//! A ship collects a pickup when their bounding circles overlap; the first
//! ship in iteration order wins. Collection restores full health. A ship
//! already at zero health is sinking this tick and cannot collect.

use hecs::{Entity, World};

use skirmish_core::components::{Hull, Pickup};
use skirmish_core::constants::{HULL_RADIUS, PICKUP_SIZE};
use skirmish_core::events::SimEvent;
use skirmish_core::state::Tally;
use skirmish_core::types::{circles_overlap, Position};

pub fn run(
    world: &mut World,
    despawn_buffer: &mut Vec<Entity>,
    tally: &mut Tally,
    events: &mut Vec<SimEvent>,
) {
    despawn_buffer.clear();

    let mut live: Vec<(Entity, Position)> = Vec::new();
    for (entity, (pos, pickup)) in world.query_mut::<(&Position, &mut Pickup)>() {
        pickup.age += 1;
        pickup.life = pickup.life.saturating_sub(1);
        if pickup.life == 0 {
            despawn_buffer.push(entity);
        } else {
            live.push((entity, *pos));
        }
    }

    let ships: Vec<(Entity, Position)> = world
        .query::<(&Position, &Hull)>()
        .iter()
        .filter(|(_, (_, hull))| hull.health > 0)
        .map(|(entity, (pos, _))| (entity, *pos))
        .collect();

    for (pickup, at) in live {
        let Some((ship, _)) = ships
            .iter()
            .find(|(_, pos)| circles_overlap(pos, HULL_RADIUS, &at, PICKUP_SIZE / 2.0))
        else {
            continue;
        };
        if let Ok(mut hull) = world.get::<&mut Hull>(*ship) {
            hull.health = hull.max_health;
        }
        despawn_buffer.push(pickup);
        tally.pickups_collected += 1;
        events.push(SimEvent::PickupCollected {
            ship: ship.to_bits().get(),
            position: at,
        });
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
