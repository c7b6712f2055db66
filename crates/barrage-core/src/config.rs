//! Match configuration.
//!
//! Everything here is data: loadable from JSON, defaulted field by field,
//! and validated once before a match engine is built.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::{ControlMode, Difficulty, SanitizeMode, WindPolicy};
use crate::error::{ConfigError, Result};

/// One sinusoidal component of the terrain profile. Phase is rolled per match.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Octave {
    pub frequency: f64,
    pub amplitude: f64,
}

/// Terrain dimensions and generation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    pub width: usize,
    pub height: usize,
    pub octaves: Vec<Octave>,
    /// Mean surface level as a fraction of `height`.
    pub base_level: f64,
    /// Highest row the surface may reach.
    pub min_surface_row: f64,
    /// Rows kept solid at the bottom of every column.
    pub bottom_margin: f64,
    pub sanitize: SanitizeMode,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            width: WORLD_WIDTH,
            height: WORLD_HEIGHT,
            octaves: TERRAIN_OCTAVES
                .iter()
                .map(|&(frequency, amplitude)| Octave {
                    frequency,
                    amplitude,
                })
                .collect(),
            base_level: TERRAIN_BASE_LEVEL,
            min_surface_row: TERRAIN_MIN_SURFACE_ROW,
            bottom_margin: TERRAIN_BOTTOM_MARGIN,
            sanitize: SanitizeMode::default(),
        }
    }
}

impl TerrainConfig {
    /// Lowest row the surface may reach.
    pub fn max_surface_row(&self) -> f64 {
        self.height as f64 - self.bottom_margin
    }
}

/// Initial state of one combatant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatantSpec {
    pub name: String,
    /// Spawn column. The combatant is placed on the surface below it.
    pub x: f64,
    pub angle: f64,
    pub power: f64,
    pub control: ControlMode,
}

/// Configuration for starting a new match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// RNG seed for determinism. Same seed = same match.
    pub seed: u64,
    pub terrain: TerrainConfig,
    pub roster: Vec<CombatantSpec>,
    /// Idle ticks before an AI combatant fires.
    pub ai_think_ticks: u64,
    pub wind: WindPolicy,
}

impl Default for MatchConfig {
    fn default() -> Self {
        let terrain = TerrainConfig::default();
        let roster = default_roster(terrain.width);
        Self {
            seed: 42,
            terrain,
            roster,
            ai_think_ticks: AI_THINK_TICKS,
            wind: WindPolicy::default(),
        }
    }
}

impl MatchConfig {
    /// Parse and validate a JSON configuration. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: MatchConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let t = &self.terrain;
        if t.width == 0 || t.height == 0 {
            return Err(ConfigError::EmptyWorld {
                width: t.width,
                height: t.height,
            });
        }
        if t.min_surface_row < 0.0 || t.min_surface_row > t.max_surface_row() {
            return Err(ConfigError::TerrainBand {
                min_surface: t.min_surface_row,
                max_surface: t.max_surface_row(),
                height: t.height,
            });
        }
        if self.roster.len() < 2 {
            return Err(ConfigError::RosterTooSmall(self.roster.len()));
        }
        if let Some(spec) = self
            .roster
            .iter()
            .find(|s| !(s.x >= 0.0 && s.x < t.width as f64))
        {
            return Err(ConfigError::SpawnOutOfBounds {
                name: spec.name.clone(),
                x: spec.x,
                width: t.width,
            });
        }
        Ok(())
    }
}

/// Two combatants facing each other from opposite ends: a human on the
/// left, an AI on the right.
pub fn default_roster(width: usize) -> Vec<CombatantSpec> {
    vec![
        CombatantSpec {
            name: "Red Baron".to_string(),
            x: SPAWN_INSET,
            angle: 45.0,
            power: DEFAULT_POWER,
            control: ControlMode::Human,
        },
        CombatantSpec {
            name: "Blue Phantom".to_string(),
            x: width as f64 - SPAWN_INSET,
            angle: 135.0,
            power: DEFAULT_POWER,
            control: ControlMode::Ai {
                difficulty: Difficulty::default(),
            },
        },
    ]
}
