//! Turn bookkeeping: whose turn it is, the wind, and how the last shot went.
//!
//! Stored in `MatchEngine`, NOT as ECS entities.

use hecs::Entity;

use barrage_core::enums::ShotPhase;
use barrage_core::types::{CombatantId, TurnResult};

/// Per-match turn state tracked by the engine.
#[derive(Debug, Clone, Default)]
pub struct TurnState {
    /// Combatant whose turn it is.
    pub current: Option<CombatantId>,
    pub shot_phase: ShotPhase,
    /// Lateral drift per tick, fixed for the turn.
    pub wind: f64,
    /// Completed turns.
    pub turn_count: u32,
    /// Idle ticks since the turn started (drives the AI think delay).
    pub idle_ticks: u64,
    /// Live shell entity while in Flight.
    pub projectile: Option<Entity>,
    pub last_result: Option<TurnResult>,
    /// Set at match over when exactly one combatant survives.
    pub winner: Option<CombatantId>,
}

impl TurnState {
    /// True when the current combatant may aim and fire.
    pub fn awaiting_shot(&self) -> bool {
        self.current.is_some() && self.shot_phase == ShotPhase::Idle
    }
}
