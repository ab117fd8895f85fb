//! Simulation constants and tuning defaults.

/// Default epsilon for the interception solver.
pub const INTERCEPT_EPSILON: f64 = 0.001;

/// Default mission RNG seed.
pub const DEFAULT_SEED: u64 = 42;

// --- Mission ---

/// Default player health pool.
pub const DEFAULT_PLAYER_HEALTH: i32 = 1000;

// --- Enemies ---

/// Default enemy health.
pub const DEFAULT_ENEMY_HEALTH: i32 = 100;

/// Default damage an enemy inflicts on the player when it reaches the path end.
pub const DEFAULT_PLAYER_DAMAGE: i32 = 100;

/// Default movement speed along a path (m/s).
pub const DEFAULT_ENEMY_SPEED: f64 = 1.0;

/// Default hit box radius (m).
pub const DEFAULT_HIT_RADIUS: f64 = 0.5;

/// Height of the point towers aim at, above the enemy's path position (m).
pub const DEFAULT_TRACKING_HEIGHT: f64 = 0.5;

/// Distance further along the path an enemy faces toward (m).
pub const LOOK_AHEAD_DISTANCE: f64 = 0.25;

// --- Towers ---

/// Seconds a tower spends in Init after spawn.
pub const DEFAULT_TOWER_INIT_DURATION: f64 = 1.0;

/// Default tower engagement range (m).
pub const DEFAULT_TOWER_RANGE: f64 = 6.0;

/// Default seconds between attacks.
pub const DEFAULT_ATTACK_INTERVAL: f64 = 1.0;

/// Shortest attack interval a weapon may have (s).
pub const MIN_ATTACK_INTERVAL: f64 = 0.001;

/// Default damage per projectile.
pub const DEFAULT_TOWER_DAMAGE: i32 = 50;

/// Height of the muzzle above the tower base (m).
pub const DEFAULT_MUZZLE_HEIGHT: f64 = 1.0;

// --- Projectiles ---

/// Default projectile speed (m/s).
pub const DEFAULT_PROJECTILE_SPEED: f64 = 10.0;

/// Default projectile lifetime (s).
pub const DEFAULT_PROJECTILE_LIFETIME: f64 = 1.0;

/// Damage amount carried by a projectile's own resolve record.
pub const RESOLVE_MARKER_DAMAGE: i32 = 1;
