//! Ship AI system: runs the behaviour FSM for every ship, moves it, and
//! queues cannonballs for ships that fire.
//!
//! Contacts and pickups are snapshotted before any ship moves, so every ship
//! decides against the same picture of the world.

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use skirmish_ai::fsm::{self, Maneuver, ShipContext, StepOutcome, TargetInfo};
use skirmish_ai::profiles::BehaviorProfile;
use skirmish_ai::targeting::{self, Contact};
use skirmish_core::components::{Gunnery, Helm, Hull, Pickup, WakeTrail};
use skirmish_core::constants::WAKE_MAX;
use skirmish_core::events::SimEvent;
use skirmish_core::state::Tally;
use skirmish_core::types::Position;
use skirmish_nav::ObstacleMap;

use crate::world_setup::{self, is_navigable};

/// A shot decided this tick, spawned once every ship has moved.
struct FireOrder {
    ship: Entity,
    from: Position,
    target: Entity,
    aim: Position,
}

/// Run the ship AI for one tick.
pub fn run(
    world: &mut World,
    map: &ObstacleMap,
    profile: &BehaviorProfile,
    rng: &mut ChaCha8Rng,
    tally: &mut Tally,
    events: &mut Vec<SimEvent>,
) {
    let ships: Vec<(Entity, Contact)> = world
        .query::<(&Position, &Hull)>()
        .iter()
        .map(|(entity, (pos, hull))| {
            (
                entity,
                Contact {
                    position: *pos,
                    faction: hull.faction,
                },
            )
        })
        .collect();
    let contacts: Vec<Contact> = ships.iter().map(|(_, c)| *c).collect();
    let pickups: Vec<Position> = world
        .query::<(&Position, &Pickup)>()
        .iter()
        .map(|(_, (pos, _))| *pos)
        .collect();

    let mut orders: Vec<FireOrder> = Vec::new();

    for (index, (entity, contact)) in ships.iter().enumerate() {
        let Ok((pos, hull, helm, gunnery, wake)) = world
            .query_one_mut::<(&mut Position, &Hull, &mut Helm, &mut Gunnery, &mut WakeTrail)>(
                *entity,
            )
        else {
            continue;
        };

        let candidate = targeting::select_target(index, &contacts);
        let ctx = ShipContext {
            position: contact.position,
            direction: helm.direction,
            attack_mode: helm.attack_mode,
            health: hull.health,
            max_health: hull.max_health,
            cooldown: gunnery.cooldown,
            muzzle_flash: gunnery.muzzle_flash,
            target: candidate.map(|c| TargetInfo {
                position: c.position,
                distance: c.distance,
            }),
            pickup: targeting::nearest_pickup(
                &contact.position,
                &pickups,
                profile.pickup_detect_range,
            ),
        };
        let update = fsm::evaluate(&ctx, profile, rng);

        helm.direction = update.direction;
        helm.attack_mode = update.attack_mode;
        gunnery.cooldown = update.cooldown;
        gunnery.muzzle_flash = update.muzzle_flash;
        gunnery.target = candidate
            .filter(|_| update.attack_mode)
            .map(|c| ships[c.index].0);

        let moved = match update.maneuver {
            Maneuver::Seek(pickup) => fsm::seek_step(
                pos,
                &pickup,
                profile.pickup_seek_speed,
                |p| is_navigable(map, p),
            ),
            Maneuver::Sail => {
                match fsm::sail_step(pos, helm.direction, |p| is_navigable(map, p), rng) {
                    StepOutcome::Moved(next) => Some(next),
                    StepOutcome::Blocked(direction) => {
                        helm.direction = direction;
                        None
                    }
                }
            }
        };
        if let Some(next) = moved {
            *pos = next;
            wake.positions.push_front(next);
            wake.positions.truncate(WAKE_MAX);
        }

        if update.fire {
            if let (Some(choice), Some(target)) = (candidate, gunnery.target) {
                orders.push(FireOrder {
                    ship: *entity,
                    from: *pos,
                    target,
                    aim: choice.position,
                });
            }
        }
    }

    for order in orders {
        world_setup::spawn_projectile(world, order.from, order.target, order.aim);
        tally.shots_fired += 1;
        events.push(SimEvent::ShipFired {
            ship: order.ship.to_bits().get(),
            target: order.target.to_bits().get(),
            position: order.from,
        });
    }
}
