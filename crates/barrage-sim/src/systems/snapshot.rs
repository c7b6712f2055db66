//! Snapshot system: queries the ECS world and builds a complete MatchSnapshot.
//!
//! This system is read-only. It never modifies the world.

use hecs::World;

use barrage_core::components::*;
use barrage_core::enums::GamePhase;
use barrage_core::events::SimEvent;
use barrage_core::state::*;
use barrage_core::types::{Position, SimTime, Velocity};
use barrage_terrain::TerrainField;

use crate::turn::TurnState;

/// Build a complete MatchSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    terrain: &TerrainField,
    time: &SimTime,
    phase: GamePhase,
    turn: &TurnState,
    events: Vec<SimEvent>,
) -> MatchSnapshot {
    MatchSnapshot {
        time: *time,
        phase,
        shot_phase: turn.shot_phase,
        current: turn.current,
        wind: turn.wind,
        turn_count: turn.turn_count,
        combatants: build_combatants(world),
        projectile: build_projectile(world),
        terrain: terrain.view(),
        last_result: turn.last_result.clone(),
        winner: turn.winner,
        events,
    }
}

/// Build CombatantView list, ordered by id.
fn build_combatants(world: &World) -> Vec<CombatantView> {
    let mut combatants: Vec<CombatantView> = world
        .query::<(&Combatant, &Position, &Aim, &Health)>()
        .iter()
        .map(|(_, (combatant, pos, aim, health))| CombatantView {
            id: combatant.id,
            name: combatant.name.clone(),
            control: combatant.control,
            position: *pos,
            angle: aim.angle,
            power: aim.power,
            health: health.current,
            alive: health.alive,
        })
        .collect();

    combatants.sort_by_key(|c| c.id);
    combatants
}

/// Build the ProjectileView for the shell in flight, if any.
fn build_projectile(world: &World) -> Option<ProjectileView> {
    world
        .query::<(&Projectile, &Position, &Velocity)>()
        .iter()
        .next()
        .map(|(_, (projectile, pos, vel))| ProjectileView {
            shooter: projectile.shooter,
            position: *pos,
            velocity: *vel,
        })
}
