//! Explosion system: carves the crater and applies blast damage.

use glam::DVec2;
use hecs::World;
use rand::Rng;

use barrage_core::components::{Combatant, Health};
use barrage_core::constants::*;
use barrage_core::types::{CombatantId, Position, TurnResult};
use barrage_terrain::TerrainField;

/// Everything one explosion changed.
#[derive(Debug, Clone)]
pub struct Blast {
    pub result: TurnResult,
    /// Combatants whose health reached zero in this blast.
    pub destroyed: Vec<CombatantId>,
    pub cells_cleared: usize,
}

/// Linear falloff: MAX_DAMAGE at the centre, zero at EXPLOSION_RADIUS + HIT_RADIUS.
pub fn damage_at(distance: f64) -> u32 {
    let reach = EXPLOSION_RADIUS + HIT_RADIUS;
    if distance.is_nan() || distance >= reach {
        return 0;
    }
    (((reach - distance.max(0.0)) / reach) * MAX_DAMAGE).floor() as u32
}

/// Resolve an explosion at `point` fired by `shooter`.
///
/// Every living combatant in reach takes damage, the shooter included. The
/// reported hit is the nearest non-shooter in reach; the reported distance
/// is to the nearest living non-shooter whether or not it was in reach.
pub fn resolve<R: Rng + ?Sized>(
    world: &mut World,
    terrain: &mut TerrainField,
    point: DVec2,
    shooter: CombatantId,
    rng: &mut R,
) -> Blast {
    let cells_cleared = terrain.carve_crater(point, EXPLOSION_RADIUS, rng);

    let mut nearest: Option<f64> = None;
    let mut hit: Option<(CombatantId, f64, u32)> = None;
    let mut destroyed = Vec::new();

    let mut victims: Vec<(CombatantId, f64, hecs::Entity)> = world
        .query::<(&Combatant, &Position, &Health)>()
        .iter()
        .filter(|(_, (_, _, health))| health.alive)
        .map(|(entity, (combatant, pos, _))| (combatant.id, pos.0.distance(point), entity))
        .collect();
    victims.sort_by_key(|(id, _, _)| *id);

    let reach = EXPLOSION_RADIUS + HIT_RADIUS;
    for (id, distance, entity) in victims {
        if id != shooter {
            nearest = Some(nearest.map_or(distance, |n| n.min(distance)));
        }
        if distance.is_nan() || distance >= reach {
            continue;
        }

        // In reach counts as a hit even when the falloff floors to zero.
        let damage = damage_at(distance);
        if damage > 0 {
            if let Ok(health) = world.query_one_mut::<&mut Health>(entity) {
                health.apply_damage(damage);
                if !health.alive {
                    destroyed.push(id);
                }
            }
        }
        if id != shooter && hit.map_or(true, |(_, d, _)| distance < d) {
            hit = Some((id, distance, damage));
        }
    }

    let result = match hit {
        Some((id, _, damage)) => TurnResult {
            shooter,
            hit: Some(id),
            damage,
            missed: false,
            distance_from_target: nearest,
        },
        None => TurnResult::miss(shooter, nearest),
    };

    tracing::debug!(
        x = point.x,
        y = point.y,
        cells_cleared,
        hit = ?result.hit,
        damage = result.damage,
        "explosion resolved"
    );

    Blast {
        result,
        destroyed,
        cells_cleared,
    }
}
