//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// AI difficulty tier. Ordered from loosest to tightest aim.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

/// Who supplies the shot parameters for a combatant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode")]
pub enum ControlMode {
    /// Aim and fire come from player commands.
    #[default]
    Human,
    /// Aim comes from the targeting solver.
    Ai { difficulty: Difficulty },
}

impl ControlMode {
    pub fn is_ai(&self) -> bool {
        matches!(self, ControlMode::Ai { .. })
    }
}

/// Lifecycle of the single projectile of a turn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShotPhase {
    /// Waiting for shot parameters.
    #[default]
    Idle,
    /// Projectile in the air.
    Flight,
    /// Projectile struck a combatant or terrain; explosion resolved this tick.
    Exploding,
    /// Projectile left the world. Automatic miss.
    OutOfBounds,
}

/// What a shell struck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ImpactKind {
    Combatant { id: crate::types::CombatantId },
    Terrain,
}

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Lobby,
    Active,
    MatchOver,
}

/// How the floating-terrain pass cleans up after a mutation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SanitizeMode {
    /// Best-effort column scan: every second column is scanned bottom-up and
    /// solid cells above a gap are cleared along with their left neighbour.
    /// Odd columns can keep small floating fragments.
    #[default]
    ColumnHeuristic,
    /// Flood fill from the bottom row; anything not 4-connected to it is cleared.
    Connected,
}

/// How wind is chosen at the start of each turn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy")]
pub enum WindPolicy {
    /// Uniform in [-WIND_MAX, WIND_MAX].
    #[default]
    Random,
    /// Constant value, clamped to the wind bounds.
    Fixed { wind: f64 },
}
