//! Match state snapshot: the complete visible state handed to presentation each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::SimEvent;
use crate::types::{CombatantId, Position, SimTime, TurnResult, Velocity};

/// Complete match state broadcast after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub shot_phase: ShotPhase,
    /// Combatant whose turn it is.
    pub current: Option<CombatantId>,
    /// Lateral drift per tick for the current turn.
    pub wind: f64,
    /// Number of completed turns.
    pub turn_count: u32,
    pub combatants: Vec<CombatantView>,
    pub projectile: Option<ProjectileView>,
    pub terrain: TerrainView,
    /// Outcome of the most recently resolved shot.
    pub last_result: Option<TurnResult>,
    /// Set once the match is over and someone survived.
    pub winner: Option<CombatantId>,
    pub events: Vec<SimEvent>,
}

/// A combatant as presentation sees it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatantView {
    pub id: CombatantId,
    pub name: String,
    pub control: ControlMode,
    pub position: Position,
    pub angle: f64,
    pub power: f64,
    pub health: u32,
    pub alive: bool,
}

/// The shell in flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub shooter: CombatantId,
    pub position: Position,
    pub velocity: Velocity,
}

/// 1D terrain profile. Recomputed after every mutation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TerrainView {
    pub width: usize,
    pub height: usize,
    /// Bumped on every mutation; unchanged revision means unchanged heights.
    pub revision: u64,
    /// Topmost solid row per column, `height` where the column is empty.
    pub heights: Vec<usize>,
}
