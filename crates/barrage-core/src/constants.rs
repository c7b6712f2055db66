//! Simulation constants and tuning parameters.
//!
//! Units are pixels and ticks: velocities are pixels per tick, gravity is
//! pixels per tick squared.

/// Simulation tick rate (Hz). One tick per rendered frame.
pub const TICK_RATE: u32 = 60;

// --- World bounds ---

/// Default world width in pixels (one terrain column per pixel).
pub const WORLD_WIDTH: usize = 1200;

/// Default world height in pixels (one terrain row per pixel).
pub const WORLD_HEIGHT: usize = 600;

/// How far below the bottom row a shell may fall before it counts as lost.
pub const OUT_OF_BOUNDS_MARGIN: f64 = 500.0;

// --- Ballistics ---

/// Downward acceleration added to vy every tick.
pub const GRAVITY: f64 = 0.2;

/// Maximum magnitude of the lateral wind drift per tick.
pub const WIND_MAX: f64 = 0.5;

/// Launch speed per unit of power.
pub const POWER_SCALE: f64 = 0.25;

/// Maximum launch power.
pub const MAX_POWER: f64 = 150.0;

/// Aim angle bounds in degrees.
pub const MIN_ANGLE_DEG: f64 = 0.0;
pub const MAX_ANGLE_DEG: f64 = 180.0;

/// Barrel length from the turret pivot to the muzzle.
pub const MUZZLE_LENGTH: f64 = 30.0;

/// Height of the turret pivot above the combatant's resting point.
pub const TURRET_PIVOT_HEIGHT: f64 = 15.0;

// --- Combatants ---

/// Radius of the circle used for shell-vs-combatant hit tests.
pub const HIT_RADIUS: f64 = 24.0;

/// A shell that strikes a combatant detonates this far above its resting point.
pub const HIT_SNAP_HEIGHT: f64 = 10.0;

/// Starting and maximum health.
pub const MAX_HEALTH: u32 = 100;

/// Rows per tick a combatant drops while it is above the ground.
pub const SETTLE_SPEED: f64 = 4.0;

/// Horizontal inset of the default spawn columns from each world edge.
pub const SPAWN_INSET: f64 = 100.0;

/// Default aim for a freshly spawned combatant.
pub const DEFAULT_POWER: f64 = 60.0;

// --- Explosions ---

/// Nominal crater radius.
pub const EXPLOSION_RADIUS: f64 = 28.0;

/// Damage at distance zero; falls off linearly to zero at EXPLOSION_RADIUS + HIT_RADIUS.
pub const MAX_DAMAGE: f64 = 45.0;

/// Number of overlapping circles that make up one crater.
pub const CRATER_LOBES: usize = 12;

/// Lobe centres are scattered up to this fraction of the base radius from the impact.
pub const CRATER_CENTER_JITTER: f64 = 0.5;

/// Lobe radius range as fractions of the base radius.
pub const CRATER_LOBE_MIN: f64 = 0.6;
pub const CRATER_LOBE_MAX: f64 = 1.0;

// --- Terrain generation ---

/// Sinusoidal octaves as (frequency, amplitude) pairs. Phases are random.
pub const TERRAIN_OCTAVES: [(f64, f64); 4] = [
    (0.003, 200.0),
    (0.01, 80.0),
    (0.02, 40.0),
    (0.08, 15.0),
];

/// Base surface level as a fraction of world height.
pub const TERRAIN_BASE_LEVEL: f64 = 0.7;

/// Highest allowed surface row.
pub const TERRAIN_MIN_SURFACE_ROW: f64 = 100.0;

/// Minimum rows of ground kept below the surface.
pub const TERRAIN_BOTTOM_MARGIN: f64 = 50.0;

// --- AI targeting ---

/// Integration steps per simulated trial shot.
pub const AI_MAX_STEPS: usize = 400;

/// A landing within EXPLOSION_RADIUS + this margin of the target counts as a good shot.
pub const AI_LANDING_MARGIN: f64 = 10.0;

/// Cost added to shots that land on terrain far from the target.
pub const AI_OBSTRUCTION_PENALTY: f64 = 10_000.0;

/// Coarse grid: angle range and step (degrees).
pub const AI_COARSE_ANGLE_MIN: f64 = 10.0;
pub const AI_COARSE_ANGLE_MAX: f64 = 170.0;
pub const AI_COARSE_ANGLE_STEP: f64 = 10.0;

/// Coarse grid: power range and step.
pub const AI_COARSE_POWER_MIN: f64 = 20.0;
pub const AI_COARSE_POWER_STEP: f64 = 10.0;

/// Fine grid: half-width of the window around the coarse optimum, and step.
pub const AI_FINE_WINDOW: f64 = 12.0;
pub const AI_FINE_STEP: f64 = 2.0;

/// Post-search aim error per difficulty tier: (degrees, power units).
pub const AI_EASY_ERROR: (f64, f64) = (12.0, 15.0);
pub const AI_MEDIUM_ERROR: (f64, f64) = (5.0, 8.0);
pub const AI_HARD_ERROR: (f64, f64) = (1.0, 2.0);

/// Ticks an AI combatant "thinks" before firing (1.5 s at 60 Hz).
pub const AI_THINK_TICKS: u64 = 90;
