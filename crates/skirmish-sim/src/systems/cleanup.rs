//! Cleanup system: removes cannonballs whose animation has finished.

use hecs::{Entity, World};

use skirmish_core::components::Projectile;
use skirmish_core::enums::ProjectilePhase;

/// Single filtering pass over projectiles.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, ball) in world.query_mut::<&Projectile>() {
        if ball.phase == ProjectilePhase::Expired {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
