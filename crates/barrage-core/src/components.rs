//! ECS components for hecs entities.
//!
//! Components are plain data structs with no game logic.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::constants::MAX_HEALTH;
use crate::enums::ControlMode;
use crate::types::{clamp_angle, clamp_power, CombatantId, ShotParameters};

/// Identity of a combatant entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Combatant {
    pub id: CombatantId,
    pub name: String,
    pub control: ControlMode,
}

/// Current aim of a combatant's turret.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aim {
    /// Degrees, 0..=180.
    pub angle: f64,
    /// 0..=MAX_POWER.
    pub power: f64,
}

impl Aim {
    pub fn set_angle(&mut self, angle: f64) {
        self.angle = clamp_angle(angle);
    }

    pub fn set_power(&mut self, power: f64) {
        self.power = clamp_power(power);
    }

    pub fn shot(&self) -> ShotParameters {
        ShotParameters::new(self.angle, self.power)
    }
}

impl From<ShotParameters> for Aim {
    fn from(shot: ShotParameters) -> Self {
        Self {
            angle: shot.angle,
            power: shot.power,
        }
    }
}

/// Hit points. `alive` flips to false exactly when `current` reaches zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub current: u32,
    pub alive: bool,
}

impl Default for Health {
    fn default() -> Self {
        Self {
            current: MAX_HEALTH,
            alive: true,
        }
    }
}

impl Health {
    /// Subtract damage without going below zero. Returns the damage actually absorbed.
    pub fn apply_damage(&mut self, damage: u32) -> u32 {
        let absorbed = damage.min(self.current);
        self.current -= absorbed;
        if self.current == 0 {
            self.alive = false;
        }
        absorbed
    }
}

/// The shell in flight. At most one exists at a time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub shooter: CombatantId,
    /// Smallest distance to any living non-shooter seen so far this flight.
    pub closest_approach: Option<f64>,
}
