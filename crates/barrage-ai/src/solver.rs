//! Shot solver.
//!
//! Pure functions over a read-only height profile. Trial shots are flown
//! through the same kinematics the live simulator uses, so the chosen
//! angle and power behave identically once fired. No ECS dependency.

use std::borrow::Cow;

use glam::DVec2;
use rand::Rng;

use barrage_core::constants::*;
use barrage_core::enums::Difficulty;
use barrage_core::kinematics::{is_out_of_bounds, ShellState};
use barrage_core::types::ShotParameters;

use crate::profiles::{error_margin, ErrorMargin};

/// Read-only surface profile the solver flies trial shots over.
#[derive(Debug, Clone)]
pub struct HeightProfile<'a> {
    heights: Cow<'a, [usize]>,
    floor: usize,
}

impl<'a> HeightProfile<'a> {
    /// Wrap a height-map snapshot of a `width`-column world. `floor` is the
    /// world-bottom row.
    ///
    /// An empty snapshot falls back to a flat world of `width` columns, all
    /// at `floor`, so the solver can always answer.
    pub fn new(heights: &'a [usize], width: usize, floor: usize) -> Self {
        if heights.is_empty() {
            tracing::debug!(width, floor, "no height data, solving against a flat world");
            return Self::flat(width, floor);
        }
        Self {
            heights: Cow::Borrowed(heights),
            floor,
        }
    }

    pub fn flat(width: usize, floor: usize) -> Self {
        Self {
            heights: Cow::Owned(vec![floor; width]),
            floor,
        }
    }

    pub fn width(&self) -> usize {
        self.heights.len()
    }

    pub fn floor(&self) -> usize {
        self.floor
    }

    /// Surface row under world coordinate `x`, if `x` lies over a column.
    pub fn surface_at(&self, x: f64) -> Option<usize> {
        if x.is_nan() || x < 0.0 {
            return None;
        }
        self.heights.get(x.floor() as usize).copied()
    }
}

/// Input to the solver for one AI turn.
#[derive(Debug, Clone)]
pub struct TargetingContext<'a> {
    /// Resting point of the firing combatant.
    pub shooter: DVec2,
    /// Resting point of the combatant being aimed at.
    pub target: DVec2,
    pub wind: f64,
    pub terrain: HeightProfile<'a>,
}

/// Best shot found by the grid search, before any difficulty error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult {
    pub shot: ShotParameters,
    pub cost: f64,
    /// Trial shots flown.
    pub evaluations: usize,
}

/// Fly a trial shot and score it. Lower is better.
///
/// - Lands near the target (within EXPLOSION_RADIUS + AI_LANDING_MARGIN):
///   the landing distance.
/// - Lands anywhere else: AI_OBSTRUCTION_PENALTY + landing distance.
/// - Leaves the world or runs out of steps: the closest approach seen in flight.
pub fn simulate_shot(ctx: &TargetingContext, shot: ShotParameters) -> f64 {
    let mut shell = ShellState::launch(ctx.shooter, shot);
    let mut closest = f64::INFINITY;

    for _ in 0..AI_MAX_STEPS {
        shell.step(ctx.wind);
        let p = shell.position;
        let dist = p.distance(ctx.target);
        closest = closest.min(dist);

        if is_out_of_bounds(p, ctx.terrain.width(), ctx.terrain.floor()) {
            break;
        }

        if let Some(surface) = ctx.terrain.surface_at(p.x) {
            if p.y >= surface as f64 {
                return if dist <= EXPLOSION_RADIUS + AI_LANDING_MARGIN {
                    dist
                } else {
                    AI_OBSTRUCTION_PENALTY + dist
                };
            }
        }
    }

    closest
}

/// Inclusive grid `lo, lo + step, ...` up to `hi`.
fn grid(lo: f64, hi: f64, step: f64) -> impl Iterator<Item = f64> {
    let n = if hi >= lo {
        ((hi - lo) / step).floor() as usize + 1
    } else {
        0
    };
    (0..n).map(move |i| lo + i as f64 * step)
}

fn consider(ctx: &TargetingContext, best: &mut SearchResult, angle: f64, power: f64) {
    let shot = ShotParameters::new(angle, power);
    let cost = simulate_shot(ctx, shot);
    best.evaluations += 1;
    if cost < best.cost {
        best.shot = shot;
        best.cost = cost;
    }
}

/// Two-pass grid search: a coarse sweep of the whole firing envelope, then
/// a dense window around the coarse optimum. Ties keep the earlier candidate.
pub fn search(ctx: &TargetingContext) -> SearchResult {
    let mut best = SearchResult {
        shot: ShotParameters::default(),
        cost: f64::INFINITY,
        evaluations: 0,
    };

    // Coarse pass
    for angle in grid(AI_COARSE_ANGLE_MIN, AI_COARSE_ANGLE_MAX, AI_COARSE_ANGLE_STEP) {
        for power in grid(AI_COARSE_POWER_MIN, MAX_POWER, AI_COARSE_POWER_STEP) {
            consider(ctx, &mut best, angle, power);
        }
    }

    // Fine pass, centred on the coarse optimum
    let center = best.shot;
    let angles = grid(
        (center.angle - AI_FINE_WINDOW).max(MIN_ANGLE_DEG),
        (center.angle + AI_FINE_WINDOW).min(MAX_ANGLE_DEG),
        AI_FINE_STEP,
    );
    for angle in angles {
        let powers = grid(
            (center.power - AI_FINE_WINDOW).max(0.0),
            (center.power + AI_FINE_WINDOW).min(MAX_POWER),
            AI_FINE_STEP,
        );
        for power in powers {
            consider(ctx, &mut best, angle, power);
        }
    }

    tracing::trace!(
        angle = best.shot.angle,
        power = best.shot.power,
        cost = best.cost,
        evaluations = best.evaluations,
        "search complete"
    );
    best
}

/// Add uniform, rounded error to a shot and clamp it back into range.
/// A zero margin leaves the shot untouched and draws nothing from `rng`.
pub fn apply_error<R: Rng + ?Sized>(
    shot: ShotParameters,
    margin: ErrorMargin,
    rng: &mut R,
) -> ShotParameters {
    if margin.is_zero() {
        return shot;
    }
    let angle_error = ((rng.gen::<f64>() * 2.0 - 1.0) * margin.angle).round();
    let power_error = ((rng.gen::<f64>() * 2.0 - 1.0) * margin.power).round();
    ShotParameters::new(shot.angle + angle_error, shot.power + power_error)
}

/// Choose angle and power for an AI turn.
pub fn calculate_shot<R: Rng + ?Sized>(
    ctx: &TargetingContext,
    difficulty: Difficulty,
    rng: &mut R,
) -> ShotParameters {
    let result = search(ctx);
    let shot = apply_error(result.shot, error_margin(difficulty), rng);
    tracing::debug!(
        ?difficulty,
        optimum_angle = result.shot.angle,
        optimum_power = result.shot.power,
        cost = result.cost,
        angle = shot.angle,
        power = shot.power,
        "AI shot chosen"
    );
    shot
}
