//! Events emitted by the simulation for presentation, audio and commentary.
//!
//! The core never calls into those layers directly; it queues these and
//! hands them out with each snapshot.

use serde::{Deserialize, Serialize};

use crate::enums::ImpactKind;
use crate::types::{CombatantId, Position, TurnResult, Velocity};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// New terrain generated and the roster placed.
    MatchStarted { seed: u64 },
    /// A combatant is up. Wind for the turn is fixed from here on.
    TurnStarted {
        combatant: CombatantId,
        wind: f64,
        turn: u32,
    },
    /// Shell left the muzzle.
    ShotFired {
        shooter: CombatantId,
        origin: Position,
        velocity: Velocity,
    },
    /// Shell struck something.
    Impact { point: Position, struck: ImpactKind },
    /// Crater carved and damage applied.
    ExplosionResolved { point: Position, result: TurnResult },
    /// Shell left the world without striking anything.
    ShotOutOfBounds { result: TurnResult },
    /// A combatant's health reached zero.
    CombatantDestroyed { combatant: CombatantId },
    /// The occupancy grid changed; consumers should refresh their height map.
    TerrainChanged { revision: u64, cells_cleared: usize },
    /// At most one combatant remains. `winner` is `None` on a draw.
    MatchOver {
        winner: Option<CombatantId>,
        turns: u32,
    },
}
