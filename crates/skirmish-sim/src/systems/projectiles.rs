//! Cannonball system: ballistic flight, hit test, damage, and the
//! explosion/splash animation counters.
//!
//! Phase progression: Flying -> Exploded | Splashed -> Expired.
//! Damage is applied only on the Flying -> Exploded transition, so a ball
//! can never hurt its target twice.

use std::collections::HashMap;

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use skirmish_core::components::{Debris, Hull, Projectile};
use skirmish_core::constants::*;
use skirmish_core::enums::{ProjectilePhase, SplashMode};
use skirmish_core::events::SimEvent;
use skirmish_core::state::Tally;
use skirmish_core::types::{Position, Velocity};

/// Run one tick of projectile flight and animation.
pub fn run(
    world: &mut World,
    splash: SplashMode,
    rng: &mut ChaCha8Rng,
    tally: &mut Tally,
    events: &mut Vec<SimEvent>,
) {
    let ships: HashMap<Entity, Position> = world
        .query::<(&Position, &Hull)>()
        .iter()
        .map(|(entity, (pos, _))| (entity, *pos))
        .collect();

    let mut hits: Vec<Entity> = Vec::new();
    let hit_radius_sq = (SHIP_SIZE / 2.0) * (SHIP_SIZE / 2.0);

    for (_entity, (pos, ball)) in world.query_mut::<(&mut Position, &mut Projectile)>() {
        match ball.phase {
            ProjectilePhase::Flying => {
                pos.x += ball.velocity.x;
                pos.y += ball.velocity.y;
                // Balls fly at a fixed speed, even one aimed at its own origin
                ball.range_left -= CANNONBALL_SPEED;

                // A sunk target is just a missing lookup; the ball flies on
                let struck = ships
                    .get(&ball.target)
                    .is_some_and(|target| pos.distance_sq_to(target) < hit_radius_sq);

                if struck {
                    ball.phase = ProjectilePhase::Exploded;
                    ball.phase_ticks = 0;
                    ball.debris = burst(*pos, rng);
                    hits.push(ball.target);
                    tally.hits += 1;
                    events.push(SimEvent::ProjectileExploded {
                        target: ball.target.to_bits().get(),
                        position: *pos,
                    });
                } else if ball.range_left <= 0.0 {
                    ball.phase = match splash {
                        SplashMode::Animated => ProjectilePhase::Splashed,
                        SplashMode::Instant => ProjectilePhase::Expired,
                    };
                    ball.phase_ticks = 0;
                    tally.misses += 1;
                    events.push(SimEvent::ProjectileSplashed { position: *pos });
                }
            }
            ProjectilePhase::Exploded => {
                animate_debris(&mut ball.debris);
                ball.phase_ticks += 1;
                if ball.phase_ticks > EXPLOSION_DURATION {
                    ball.phase = ProjectilePhase::Expired;
                }
            }
            ProjectilePhase::Splashed => {
                ball.phase_ticks += 1;
                if ball.phase_ticks >= SPLASH_DURATION {
                    ball.phase = ProjectilePhase::Expired;
                }
            }
            ProjectilePhase::Expired => {}
        }
    }

    for target in hits {
        if let Ok(mut hull) = world.get::<&mut Hull>(target) {
            hull.health = hull.health.saturating_sub(CANNONBALL_DAMAGE);
        }
    }
}

/// Debris fanned out evenly around the impact point with a little jitter.
fn burst(at: Position, rng: &mut ChaCha8Rng) -> Vec<Debris> {
    (0..DEBRIS_COUNT)
        .map(|i| {
            let spread = std::f64::consts::TAU / DEBRIS_COUNT as f64;
            let angle = i as f64 * spread + rng.gen_range(-0.17..0.17);
            let speed = rng.gen_range(0.7..1.4);
            Debris {
                position: at,
                velocity: Velocity::new(angle.cos() * speed, angle.sin() * speed),
                life: DEBRIS_MIN_LIFE + rng.gen_range(0..DEBRIS_LIFE_SPREAD),
            }
        })
        .collect()
}

fn animate_debris(debris: &mut Vec<Debris>) {
    for d in debris.iter_mut() {
        d.position.x += d.velocity.x;
        d.position.y += d.velocity.y;
        d.velocity.y += DEBRIS_GRAVITY;
        d.life = d.life.saturating_sub(1);
    }
    debris.retain(|d| d.life > 0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_debris_burst_count_and_life() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let debris = burst(Position::new(50.0, 50.0), &mut rng);
        assert_eq!(debris.len(), DEBRIS_COUNT);
        for d in &debris {
            assert!(d.life >= DEBRIS_MIN_LIFE);
            assert!(d.life < DEBRIS_MIN_LIFE + DEBRIS_LIFE_SPREAD);
        }
    }

    #[test]
    fn test_debris_expires_independently() {
        let mut debris = vec![
            Debris {
                position: Position::default(),
                velocity: Velocity::new(1.0, 0.0),
                life: 2,
            },
            Debris {
                position: Position::default(),
                velocity: Velocity::new(0.0, 0.0),
                life: 5,
            },
        ];
        animate_debris(&mut debris);
        assert_eq!(debris.len(), 2);
        animate_debris(&mut debris);
        assert_eq!(debris.len(), 1);
        assert!(debris[0].velocity.y > 0.0, "gravity pulls debris down");
        for _ in 0..3 {
            animate_debris(&mut debris);
        }
        assert!(debris.is_empty());
    }
}
