//! Entity spawn factories for setting up a match.
//!
//! Creates combatant entities resting on the generated terrain.

use hecs::{Entity, World};

use barrage_core::components::*;
use barrage_core::config::CombatantSpec;
use barrage_core::types::{CombatantId, Position, ShotParameters};
use barrage_terrain::TerrainField;

/// Spawn every combatant in `roster`, in order. Ids follow roster position.
pub fn spawn_roster(
    world: &mut World,
    terrain: &TerrainField,
    roster: &[CombatantSpec],
) -> Vec<Entity> {
    roster
        .iter()
        .enumerate()
        .map(|(i, spec)| spawn_combatant(world, terrain, CombatantId(i as u32), spec))
        .collect()
}

/// Spawn one combatant on the surface below its spawn column.
pub fn spawn_combatant(
    world: &mut World,
    terrain: &TerrainField,
    id: CombatantId,
    spec: &CombatantSpec,
) -> Entity {
    let ground = terrain.height_at(spec.x.floor() as i64) as f64;
    let aim = Aim::from(ShotParameters::new(spec.angle, spec.power));

    world.spawn((
        Combatant {
            id,
            name: spec.name.clone(),
            control: spec.control,
        },
        Position::new(spec.x, ground),
        aim,
        Health::default(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use barrage_core::config::default_roster;
    use barrage_core::constants::*;

    #[test]
    fn test_default_roster_rests_on_ground() {
        let mut world = World::new();
        let terrain = TerrainField::flat(WORLD_WIDTH, WORLD_HEIGHT, 420);
        let entities = spawn_roster(&mut world, &terrain, &default_roster(WORLD_WIDTH));
        assert_eq!(entities.len(), 2);

        let pos = world.get::<&Position>(entities[1]).unwrap();
        assert_eq!(pos.0.x, WORLD_WIDTH as f64 - SPAWN_INSET);
        assert_eq!(pos.0.y, 420.0);

        let aim = world.get::<&Aim>(entities[0]).unwrap();
        assert_eq!(aim.angle, 45.0);
        assert_eq!(aim.power, DEFAULT_POWER);
    }

    #[test]
    fn test_spawn_clamps_aim() {
        let mut world = World::new();
        let terrain = TerrainField::flat(200, 200, 100);
        let spec = CombatantSpec {
            name: "wild".into(),
            x: 50.0,
            angle: 270.0,
            power: -5.0,
            control: Default::default(),
        };
        let e = spawn_combatant(&mut world, &terrain, CombatantId(7), &spec);
        let aim = world.get::<&Aim>(e).unwrap();
        assert_eq!(aim.angle, 180.0);
        assert_eq!(aim.power, 0.0);
        assert_eq!(world.get::<&Health>(e).unwrap().current, MAX_HEALTH);
    }
}
