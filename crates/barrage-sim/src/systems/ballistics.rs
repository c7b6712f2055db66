//! Ballistics system: launches the shell and flies it one tick at a time.
//!
//! Each tick the shell is integrated with the shared kinematic model, then
//! the segment it swept is walked in unit-length substeps so fast shells
//! cannot tunnel through a combatant or a thin wall of terrain.

use glam::DVec2;
use hecs::{Entity, World};

use barrage_core::components::{Aim, Combatant, Health, Projectile};
use barrage_core::constants::*;
use barrage_core::enums::ImpactKind;
use barrage_core::kinematics::{is_out_of_bounds, ShellState};
use barrage_core::types::{CombatantId, Position, Velocity};
use barrage_terrain::TerrainField;

/// Result of advancing the shell by one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlightOutcome {
    InFlight,
    Impact { point: DVec2, struck: ImpactKind },
    OutOfBounds,
}

/// Spawn a shell from `shooter`'s turret using its current aim.
/// Returns `None` if the entity is not a living combatant.
pub fn fire(world: &mut World, shooter: Entity) -> Option<(Entity, ShellState)> {
    let (id, base, shot) = {
        let mut query = world
            .query_one::<(&Combatant, &Position, &Aim, &Health)>(shooter)
            .ok()?;
        let (combatant, pos, aim, health) = query.get()?;
        if !health.alive {
            return None;
        }
        (combatant.id, pos.0, aim.shot())
    };

    let shell = ShellState::launch(base, shot);
    let entity = world.spawn((
        Projectile {
            shooter: id,
            closest_approach: None,
        },
        Position(shell.position),
        Velocity(shell.velocity),
    ));
    tracing::debug!(
        shooter = %id,
        angle = shot.angle,
        power = shot.power,
        "shot fired"
    );
    Some((entity, shell))
}

/// Living combatants as (id, resting point) pairs, in spawn order.
pub fn living_targets(world: &World) -> Vec<(CombatantId, DVec2)> {
    let mut targets: Vec<(CombatantId, DVec2)> = world
        .query::<(&Combatant, &Position, &Health)>()
        .iter()
        .filter(|(_, (_, _, health))| health.alive)
        .map(|(_, (combatant, pos, _))| (combatant.id, pos.0))
        .collect();
    targets.sort_by_key(|(id, _)| *id);
    targets
}

/// Walk the segment `from -> to` in `max(1, ceil(len))` substeps, endpoints
/// included, and report the first contact.
///
/// At each substep living combatants are tested before terrain, so a
/// combatant standing on the surface can still be hit. A combatant hit
/// snaps the impact point to just above that combatant; a terrain hit
/// keeps the exact substep point.
pub fn first_contact(
    from: DVec2,
    to: DVec2,
    targets: &[(CombatantId, DVec2)],
    terrain: &TerrainField,
) -> Option<(DVec2, ImpactKind)> {
    let delta = to - from;
    let steps = (delta.length().ceil() as usize).max(1);
    let step = delta / steps as f64;

    for s in 0..=steps {
        let point = from + step * s as f64;

        if let Some((id, base)) = targets
            .iter()
            .find(|(_, base)| base.distance(point) < HIT_RADIUS)
        {
            let snapped = *base - DVec2::new(0.0, HIT_SNAP_HEIGHT);
            return Some((snapped, ImpactKind::Combatant { id: *id }));
        }

        if terrain.occupied_at_point(point) {
            return Some((point, ImpactKind::Terrain));
        }
    }
    None
}

/// Advance the shell one tick.
///
/// Integrates, records the closest approach to any living non-shooter,
/// checks the world bounds, then sweeps for contacts. While the shell is
/// above the top of the world nothing can be struck.
pub fn run(world: &mut World, terrain: &TerrainField, shell: Entity, wind: f64) -> FlightOutcome {
    let targets = living_targets(world);

    let Ok((projectile, pos, vel)) =
        world.query_one_mut::<(&mut Projectile, &mut Position, &mut Velocity)>(shell)
    else {
        return FlightOutcome::OutOfBounds;
    };

    let from = pos.0;
    let mut state = ShellState {
        position: pos.0,
        velocity: vel.0,
    };
    state.step(wind);
    pos.0 = state.position;
    vel.0 = state.velocity;
    let to = state.position;

    let nearest = targets
        .iter()
        .filter(|(id, _)| *id != projectile.shooter)
        .map(|(_, base)| base.distance(to))
        .min_by(f64::total_cmp);
    if let Some(d) = nearest {
        projectile.closest_approach = Some(projectile.closest_approach.map_or(d, |c| c.min(d)));
    }

    if is_out_of_bounds(to, terrain.width(), terrain.height()) {
        return FlightOutcome::OutOfBounds;
    }
    if to.y < 0.0 {
        return FlightOutcome::InFlight;
    }

    match first_contact(from, to, &targets, terrain) {
        Some((point, struck)) => {
            pos.0 = point;
            FlightOutcome::Impact { point, struck }
        }
        None => FlightOutcome::InFlight,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_contact_prefers_combatant_on_surface() {
        let terrain = TerrainField::flat(200, 200, 100);
        let targets = [(CombatantId(1), DVec2::new(50.0, 100.0))];
        let hit = first_contact(
            DVec2::new(50.0, 60.0),
            DVec2::new(50.0, 110.0),
            &targets,
            &terrain,
        );
        let (point, struck) = hit.expect("segment passes through the combatant");
        assert_eq!(struck, ImpactKind::Combatant { id: CombatantId(1) });
        assert_eq!(point, DVec2::new(50.0, 100.0 - HIT_SNAP_HEIGHT));
    }

    #[test]
    fn test_first_contact_terrain_exact_point() {
        let terrain = TerrainField::flat(200, 200, 100);
        let hit = first_contact(DVec2::new(10.0, 90.0), DVec2::new(10.0, 130.0), &[], &terrain);
        let (point, struck) = hit.expect("segment enters the ground");
        assert_eq!(struck, ImpactKind::Terrain);
        assert_eq!(point, DVec2::new(10.0, 100.0));
    }

    #[test]
    fn test_fast_shell_does_not_tunnel() {
        // One-cell-thick wall, crossed in a single 60-pixel tick.
        let mut surface = vec![200; 100];
        surface[50] = 0;
        let terrain = TerrainField::from_heights(100, 200, &surface);
        let hit = first_contact(DVec2::new(20.0, 100.0), DVec2::new(80.0, 100.0), &[], &terrain);
        let (point, _) = hit.expect("wall must be detected");
        assert!((point.x - 50.0).abs() < 1.0);
    }

    #[test]
    fn test_zero_length_segment_still_checked() {
        let terrain = TerrainField::flat(20, 20, 10);
        let p = DVec2::new(5.0, 12.0);
        assert!(first_contact(p, p, &[], &terrain).is_some());
    }

    #[test]
    fn test_fire_spawns_projectile_at_muzzle() {
        let mut world = World::new();
        let shooter = world.spawn((
            Combatant {
                id: CombatantId(0),
                name: "test".into(),
                control: Default::default(),
            },
            Position::new(100.0, 300.0),
            Aim {
                angle: 90.0,
                power: 40.0,
            },
            Health::default(),
        ));
        let (entity, shell) = fire(&mut world, shooter).expect("living combatant fires");
        let pos = world.get::<&Position>(entity).unwrap();
        assert_eq!(pos.0, shell.position);
        assert!((pos.0.y - (300.0 - TURRET_PIVOT_HEIGHT - MUZZLE_LENGTH)).abs() < 1e-9);
    }

    #[test]
    fn test_dead_combatant_cannot_fire() {
        let mut world = World::new();
        let shooter = world.spawn((
            Combatant {
                id: CombatantId(0),
                name: "wreck".into(),
                control: Default::default(),
            },
            Position::new(100.0, 300.0),
            Aim {
                angle: 45.0,
                power: 40.0,
            },
            Health {
                current: 0,
                alive: false,
            },
        ));
        assert!(fire(&mut world, shooter).is_none());
    }

    #[test]
    fn test_run_reports_out_of_bounds() {
        let mut world = World::new();
        let terrain = TerrainField::flat(100, 100, 90);
        let shell = world.spawn((
            Projectile {
                shooter: CombatantId(0),
                closest_approach: None,
            },
            Position::new(98.0, 10.0),
            Velocity::new(5.0, 0.0),
        ));
        assert_eq!(run(&mut world, &terrain, shell, 0.0), FlightOutcome::OutOfBounds);
    }
}
