//! Simulation constants and tuning parameters.
//!
//! Distances are in pixels, durations in ticks.

/// Reference host tick rate (Hz). The core itself is rate-agnostic.
pub const TICK_RATE: u32 = 60;

// --- World bounds ---

/// Default map width.
pub const WORLD_WIDTH: f64 = 1800.0;

/// Default map height.
pub const WORLD_HEIGHT: f64 = 1000.0;

// --- Ships ---

/// Hull size (bounding square edge).
pub const SHIP_SIZE: f64 = 16.0;

/// Hull clearance used for island and border collision.
pub const HULL_RADIUS: f64 = SHIP_SIZE / 2.0;

/// Maximum (and starting) ship health.
pub const SHIP_MAX_HEALTH: u32 = 10;

/// Number of wake samples kept per ship.
pub const WAKE_MAX: usize = 20;

// --- Spawning ---

/// Extra clearance from islands required for a validated random spawn.
pub const SPAWN_ISLAND_BUFFER: f64 = 24.0;

/// Distance a validated spawn must keep from the map edge (beyond the hull).
pub const SPAWN_BORDER_MARGIN: f64 = 16.0;

/// Random candidates tried before accepting the best one seen.
pub const MAX_SPAWN_ATTEMPTS: u32 = 256;

/// Distance of a port point beyond its island's edge.
pub const PORT_STANDOFF: f64 = 24.0;

/// Ships placed at each faction's port at start-up.
pub const SHIPS_PER_FACTION: u32 = 5;

// --- Combat AI ---

/// Enemy distance below which a ship enters attack mode.
pub const ENGAGEMENT_RADIUS: f64 = 120.0;

/// Beyond this distance an attacking ship closes in.
pub const APPROACH_DISTANCE: f64 = 80.0;

/// Below this distance an attacking ship backs off.
pub const TOO_CLOSE_DISTANCE: f64 = 48.0;

/// Enemy distance below which a ship may fire.
pub const FIRING_RADIUS: f64 = 100.0;

/// 1-in-N chance per tick of a new heading while orbiting a target.
pub const ORBIT_TURN_ODDS: u32 = 20;

/// 1-in-N chance per tick of a new heading while wandering.
pub const WANDER_TURN_ODDS: u32 = 60;

/// Ticks between shots.
pub const FIRE_COOLDOWN_TICKS: u32 = 30;

/// Ticks the muzzle flash stays lit after a shot.
pub const MUZZLE_FLASH_TICKS: u32 = 5;

// --- Pickups ---

/// Health fraction below which a ship goes looking for pickups.
pub const SEEK_HEALTH_FRACTION: f64 = 0.8;

/// How far a damaged ship can see a pickup.
pub const PICKUP_DETECT_RANGE: f64 = 400.0;

/// Movement per tick while seeking a pickup.
pub const PICKUP_SEEK_SPEED: f64 = 2.0;

/// Pickup bounding size; collection uses half of it as a radius.
pub const PICKUP_SIZE: f64 = 16.0;

/// Ticks before an uncollected pickup disappears.
pub const PICKUP_LIFE_TICKS: u32 = 300;

// --- Cannonballs ---

/// Cannonball speed (pixels per tick).
pub const CANNONBALL_SPEED: f64 = 4.0;

/// Distance a cannonball travels before splashing.
pub const CANNONBALL_MAX_RANGE: f64 = 150.0;

/// Damage dealt by one hit.
pub const CANNONBALL_DAMAGE: u32 = 1;

/// Ticks an explosion persists after a hit.
pub const EXPLOSION_DURATION: u32 = 12;

/// Ticks a splash persists after a miss.
pub const SPLASH_DURATION: u32 = 15;

/// Debris particles spawned per explosion.
pub const DEBRIS_COUNT: usize = 8;

/// Minimum debris lifetime.
pub const DEBRIS_MIN_LIFE: u32 = 10;

/// Debris lifetime spread (exclusive upper bound added to the minimum).
pub const DEBRIS_LIFE_SPREAD: u32 = 6;

/// Downward acceleration applied to debris each tick.
pub const DEBRIS_GRAVITY: f64 = 0.2;

// --- Wrecks ---

/// Ticks a wreck stays afloat.
pub const WRECK_LIFE_TICKS: u32 = 600;

// --- Transports ---

/// Rowboat speed (pixels per tick).
pub const TRANSPORT_SPEED: f64 = 2.0;

/// Ticks a rowboat stays at the dock after delivering its crew.
pub const TRANSPORT_LINGER_TICKS: u32 = 60;

// --- Navigation ---

/// Edge length of a pathfinding grid cell.
pub const NAV_CELL_SIZE: f64 = 4.0;

/// Island clearance for pathfinding (larger than the hull).
pub const NAV_CLEARANCE: f64 = 18.0;

/// Step samples checked ahead of a rowboat by the detour strategy.
pub const DETOUR_LOOKAHEAD_STEPS: u32 = 8;

/// Distance beyond an island's edge at which a detour waypoint is placed.
pub const DETOUR_BUFFER: f64 = 24.0;

/// Upper bound on detour waypoints queued ahead of the destination.
pub const MAX_PENDING_DETOURS: usize = 4;
