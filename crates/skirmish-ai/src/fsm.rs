//! Ship behaviour finite state machine.
//!
//! Pure functions that decide, for one ship on one tick, whether it seeks a
//! pickup or sails, which way it heads, whether it is in attack mode and
//! whether it fires. No ECS dependency: the caller gathers the situation into
//! a [`ShipContext`] and applies the returned [`ShipUpdate`].

use rand::Rng;

use skirmish_core::enums::Direction;
use skirmish_core::types::Position;

use crate::profiles::BehaviorProfile;

/// The nearest hostile ship, as seen before this tick's movement.
#[derive(Debug, Clone, Copy)]
pub struct TargetInfo {
    pub position: Position,
    pub distance: f64,
}

/// Input to the FSM for a single ship.
#[derive(Debug, Clone, Copy)]
pub struct ShipContext {
    pub position: Position,
    pub direction: Direction,
    pub attack_mode: bool,
    pub health: u32,
    pub max_health: u32,
    pub cooldown: u32,
    pub muzzle_flash: u32,
    pub target: Option<TargetInfo>,
    /// Nearest pickup within detection range.
    pub pickup: Option<Position>,
}

/// What the ship does with its hull this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Maneuver {
    /// Head straight for a pickup at seek speed.
    Seek(Position),
    /// Take one unit step along the (possibly new) direction.
    Sail,
}

/// Output from the FSM.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShipUpdate {
    pub maneuver: Maneuver,
    pub direction: Direction,
    pub attack_mode: bool,
    pub cooldown: u32,
    pub muzzle_flash: u32,
    /// Fire one cannonball at the target's current position.
    pub fire: bool,
}

impl ShipContext {
    /// Whether health is low enough for pickups to override combat.
    pub fn wants_repair(&self, profile: &BehaviorProfile) -> bool {
        (self.health as f64) < profile.seek_health_fraction * self.max_health as f64
    }
}

/// Evaluate the FSM for one ship.
pub fn evaluate<R: Rng + ?Sized>(
    ctx: &ShipContext,
    profile: &BehaviorProfile,
    rng: &mut R,
) -> ShipUpdate {
    let cooldown = ctx.cooldown.saturating_sub(1);
    let muzzle_flash = ctx.muzzle_flash.saturating_sub(1);

    if ctx.wants_repair(profile) {
        if let Some(pickup) = ctx.pickup {
            return ShipUpdate {
                maneuver: Maneuver::Seek(pickup),
                direction: ctx.direction,
                attack_mode: false,
                cooldown,
                muzzle_flash,
                fire: false,
            };
        }
    }

    let engaged = ctx
        .target
        .filter(|t| t.distance < profile.engagement_radius);

    let (direction, attack_mode) = match engaged {
        Some(target) => (evaluate_attack(ctx, &target, profile, rng), true),
        None => (evaluate_wander(ctx, profile, rng), false),
    };

    let fire = attack_mode
        && cooldown == 0
        && engaged.is_some_and(|t| t.distance < profile.firing_radius);

    ShipUpdate {
        maneuver: Maneuver::Sail,
        direction,
        attack_mode,
        cooldown: if fire { profile.fire_cooldown_ticks } else { cooldown },
        muzzle_flash: if fire { profile.muzzle_flash_ticks } else { muzzle_flash },
        fire,
    }
}

fn evaluate_attack<R: Rng + ?Sized>(
    ctx: &ShipContext,
    target: &TargetInfo,
    profile: &BehaviorProfile,
    rng: &mut R,
) -> Direction {
    let dx = target.position.x - ctx.position.x;
    let dy = target.position.y - ctx.position.y;

    if target.distance > profile.approach_distance {
        Direction::toward(dx, dy)
    } else if target.distance < profile.too_close_distance {
        Direction::away_from(dx, dy)
    } else if rng.gen_range(0..profile.orbit_turn_odds) == 0 {
        Direction::random(rng)
    } else {
        ctx.direction
    }
}

fn evaluate_wander<R: Rng + ?Sized>(
    ctx: &ShipContext,
    profile: &BehaviorProfile,
    rng: &mut R,
) -> Direction {
    // Leaving attack mode always picks a fresh heading
    if ctx.attack_mode || rng.gen_range(0..profile.wander_turn_odds) == 0 {
        Direction::random(rng)
    } else {
        ctx.direction
    }
}

/// Result of trying to move a ship.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    Moved(Position),
    /// The step was rejected and the ship stays put with a new heading.
    Blocked(Direction),
}

/// One unit step along `direction`. A rejected step re-randomises the heading.
pub fn sail_step<R: Rng + ?Sized>(
    position: &Position,
    direction: Direction,
    is_clear: impl Fn(&Position) -> bool,
    rng: &mut R,
) -> StepOutcome {
    let (dx, dy) = direction.step();
    let next = position.offset(dx, dy);
    if is_clear(&next) {
        StepOutcome::Moved(next)
    } else {
        StepOutcome::Blocked(Direction::random(rng))
    }
}

/// Move up to `speed` toward `pickup`. `None` if the step is not clear.
pub fn seek_step(
    position: &Position,
    pickup: &Position,
    speed: f64,
    is_clear: impl Fn(&Position) -> bool,
) -> Option<Position> {
    let next = position.step_toward(pickup, speed);
    is_clear(&next).then_some(next)
}
