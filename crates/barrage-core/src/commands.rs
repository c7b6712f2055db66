//! Player commands sent from the frontend to the simulation.
//!
//! Commands are queued and processed at the next tick boundary. Commands
//! that do not apply in the current state are ignored.

use serde::{Deserialize, Serialize};

use crate::enums::Difficulty;
use crate::types::CombatantId;

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Match lifecycle ---
    /// Generate fresh terrain, place the roster, start turn 0.
    StartMatch,
    /// Abandon the current match.
    ReturnToLobby,

    // --- Aiming (current human combatant, shot idle) ---
    /// Set turret angle in degrees. Clamped to 0..=180.
    SetAngle { angle: f64 },
    /// Set launch power. Clamped to 0..=MAX_POWER.
    SetPower { power: f64 },
    /// Fire with the current aim.
    Fire,

    // --- Turn inputs ---
    /// Change an AI combatant's difficulty tier.
    SetDifficulty {
        combatant: CombatantId,
        difficulty: Difficulty,
    },
    /// Override the wind for the current turn. Clamped to ±WIND_MAX.
    SetWind { wind: f64 },
}
