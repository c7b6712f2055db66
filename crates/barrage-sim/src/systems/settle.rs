//! Settle system: drops combatants onto the ground after the terrain under them erodes.

use hecs::World;

use barrage_core::components::Health;
use barrage_core::constants::SETTLE_SPEED;
use barrage_core::types::Position;
use barrage_terrain::TerrainField;

/// Move every living combatant up to SETTLE_SPEED rows toward the surface
/// below it. A combatant never ends up below the surface. Returns how many
/// combatants are still falling.
pub fn run(world: &mut World, terrain: &TerrainField) -> usize {
    let mut falling = 0;
    for (_entity, (pos, health)) in world.query_mut::<(&mut Position, &Health)>() {
        if !health.alive {
            continue;
        }
        let ground = terrain.height_at(pos.0.x.floor() as i64) as f64;
        if pos.0.y < ground {
            pos.0.y = (pos.0.y + SETTLE_SPEED).min(ground);
            if pos.0.y < ground {
                falling += 1;
            }
        } else {
            pos.0.y = ground;
        }
    }
    falling
}

#[cfg(test)]
mod tests {
    use super::*;
    use barrage_core::components::Projectile;
    use barrage_core::types::{CombatantId, Velocity};
    use glam::DVec2;

    #[test]
    fn test_drops_four_rows_per_tick() {
        let mut world = World::new();
        let mut terrain = TerrainField::flat(100, 100, 50);
        let e = world.spawn((Position::new(40.0, 50.0), Health::default()));
        terrain.carve_circle(DVec2::new(40.0, 50.0), 10.0);
        let ground = terrain.height_at(40) as f64;
        assert_eq!(ground, 61.0);

        assert_eq!(run(&mut world, &terrain), 1);
        assert_eq!(world.get::<&Position>(e).unwrap().0.y, 54.0);
        for _ in 0..2 {
            run(&mut world, &terrain);
        }
        assert_eq!(world.get::<&Position>(e).unwrap().0.y, 61.0);
        assert_eq!(run(&mut world, &terrain), 0);
    }

    #[test]
    fn test_ignores_dead_and_projectiles() {
        let mut world = World::new();
        let terrain = TerrainField::flat(100, 100, 80);
        let dead = world.spawn((
            Position::new(10.0, 20.0),
            Health {
                current: 0,
                alive: false,
            },
        ));
        let shell = world.spawn((
            Projectile {
                shooter: CombatantId(0),
                closest_approach: None,
            },
            Position::new(30.0, 20.0),
            Velocity::new(1.0, 0.0),
        ));
        assert_eq!(run(&mut world, &terrain), 0);
        assert_eq!(world.get::<&Position>(dead).unwrap().0.y, 20.0);
        assert_eq!(world.get::<&Position>(shell).unwrap().0.y, 20.0);
    }
}
