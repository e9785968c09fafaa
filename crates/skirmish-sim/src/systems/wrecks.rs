//! Wreck system: ages wrecks and sinks them when their life runs out.

use hecs::{Entity, World};

use skirmish_core::components::Wreck;

pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, wreck) in world.query_mut::<&mut Wreck>() {
        wreck.age += 1;
        wreck.life = wreck.life.saturating_sub(1);
        if wreck.life == 0 {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
