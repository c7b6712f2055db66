//! Shell kinematics shared by the live simulator and the targeting solver.
//!
//! Semi-implicit per-tick integration with constant gravity and a constant
//! lateral wind drift. Both consumers must step through this module so that
//! a solved shot flies the same arc when it is actually fired.

use glam::DVec2;

use crate::constants::*;
use crate::types::ShotParameters;

/// Position and velocity of a shell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShellState {
    pub position: DVec2,
    pub velocity: DVec2,
}

impl ShellState {
    /// Launch from a combatant resting at `base`.
    ///
    /// The muzzle sits MUZZLE_LENGTH along the aim direction from a pivot
    /// TURRET_PIVOT_HEIGHT above the resting point. y grows downward, hence
    /// the negated sine.
    pub fn launch(base: DVec2, shot: ShotParameters) -> Self {
        let rad = shot.radians();
        let dir = DVec2::new(rad.cos(), -rad.sin());
        let pivot = base - DVec2::new(0.0, TURRET_PIVOT_HEIGHT);
        Self {
            position: pivot + dir * MUZZLE_LENGTH,
            velocity: dir * shot.power * POWER_SCALE,
        }
    }

    /// Advance one tick. Wind drifts position directly; it never accumulates into velocity.
    pub fn step(&mut self, wind: f64) {
        self.position.x += self.velocity.x + wind;
        self.position.y += self.velocity.y;
        self.velocity.y += GRAVITY;
    }
}

/// True once a shell has left the world: off either side, or fallen well below the bottom.
pub fn is_out_of_bounds(position: DVec2, width: usize, height: usize) -> bool {
    position.x < 0.0
        || position.x >= width as f64
        || position.y > height as f64 + OUT_OF_BOUNDS_MARGIN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_launch_straight_up() {
        let shell = ShellState::launch(DVec2::new(100.0, 400.0), ShotParameters::new(90.0, 100.0));
        assert!((shell.position.x - 100.0).abs() < 1e-9);
        assert!((shell.position.y - (400.0 - TURRET_PIVOT_HEIGHT - MUZZLE_LENGTH)).abs() < 1e-9);
        assert!(shell.velocity.x.abs() < 1e-9);
        assert!((shell.velocity.y + 100.0 * POWER_SCALE).abs() < 1e-9);
    }

    #[test]
    fn test_launch_left_mirrors_right() {
        let base = DVec2::new(600.0, 400.0);
        let right = ShellState::launch(base, ShotParameters::new(30.0, 80.0));
        let left = ShellState::launch(base, ShotParameters::new(150.0, 80.0));
        assert!((right.velocity.x + left.velocity.x).abs() < 1e-9);
        assert!((right.velocity.y - left.velocity.y).abs() < 1e-9);
    }

    #[test]
    fn test_step_applies_gravity_and_wind() {
        let mut shell = ShellState {
            position: DVec2::new(10.0, 10.0),
            velocity: DVec2::new(1.0, -2.0),
        };
        shell.step(0.5);
        assert!((shell.position.x - 11.5).abs() < 1e-9);
        assert!((shell.position.y - 8.0).abs() < 1e-9);
        assert!((shell.velocity.y - (-2.0 + GRAVITY)).abs() < 1e-9);
        // Wind is a drift, not an acceleration.
        assert!((shell.velocity.x - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_out_of_bounds_edges() {
        assert!(is_out_of_bounds(DVec2::new(-0.1, 10.0), 100, 100));
        assert!(is_out_of_bounds(DVec2::new(100.0, 10.0), 100, 100));
        assert!(!is_out_of_bounds(DVec2::new(99.9, 10.0), 100, 100));
        assert!(!is_out_of_bounds(DVec2::new(50.0, -1000.0), 100, 100));
        assert!(is_out_of_bounds(DVec2::new(50.0, 100.0 + OUT_OF_BOUNDS_MARGIN + 1.0), 100, 100));
    }
}
