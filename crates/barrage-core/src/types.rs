//! Fundamental geometric and simulation types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::constants::{MAX_ANGLE_DEG, MAX_POWER, MIN_ANGLE_DEG, TICK_RATE};

/// 2D position in world space (pixels).
/// x grows to the right, y grows downward (row 0 is the top of the world).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position(pub DVec2);

/// 2D velocity in world space (pixels per tick).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity(pub DVec2);

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self(DVec2::new(x, y))
    }

    pub fn x(&self) -> f64 {
        self.0.x
    }

    pub fn y(&self) -> f64 {
        self.0.y
    }
}

impl Velocity {
    pub fn new(x: f64, y: f64) -> Self {
        Self(DVec2::new(x, y))
    }
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Seconds per tick at the default tick rate.
    pub fn dt(&self) -> f64 {
        1.0 / TICK_RATE as f64
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}

/// Stable identifier of a combatant for the lifetime of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CombatantId(pub u32);

impl std::fmt::Display for CombatantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The only controllable inputs to a shot.
///
/// Angle is in degrees, 0 = pointing right, 90 = straight up, 180 = pointing left.
/// Both fields are clamped on construction so an out-of-range shot cannot exist.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShotParameters {
    pub angle: f64,
    pub power: f64,
}

impl ShotParameters {
    pub fn new(angle: f64, power: f64) -> Self {
        Self {
            angle: clamp_angle(angle),
            power: clamp_power(power),
        }
    }

    /// Angle in radians.
    pub fn radians(&self) -> f64 {
        self.angle.to_radians()
    }
}

impl Default for ShotParameters {
    fn default() -> Self {
        Self::new(45.0, 50.0)
    }
}

/// Clamp an aim angle into `[MIN_ANGLE_DEG, MAX_ANGLE_DEG]`. NaN maps to the lower bound.
pub fn clamp_angle(angle: f64) -> f64 {
    if angle.is_nan() {
        return MIN_ANGLE_DEG;
    }
    angle.clamp(MIN_ANGLE_DEG, MAX_ANGLE_DEG)
}

/// Clamp a launch power into `[0, MAX_POWER]`. NaN maps to zero.
pub fn clamp_power(power: f64) -> f64 {
    if power.is_nan() {
        return 0.0;
    }
    power.clamp(0.0, MAX_POWER)
}

/// Outcome record of one resolved shot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnResult {
    /// Who fired.
    pub shooter: CombatantId,
    /// Non-shooter combatant caught inside the blast, if any.
    pub hit: Option<CombatantId>,
    /// Damage dealt to `hit` (0 on a miss).
    pub damage: u32,
    pub missed: bool,
    /// Distance from the nearest living non-shooter at the closest approach.
    /// `None` when no other combatant was alive to measure against.
    pub distance_from_target: Option<f64>,
}

impl TurnResult {
    /// A miss with no terrain change, e.g. a shell that left the world.
    pub fn miss(shooter: CombatantId, distance_from_target: Option<f64>) -> Self {
        Self {
            shooter,
            hit: None,
            damage: 0,
            missed: true,
            distance_from_target,
        }
    }
}
