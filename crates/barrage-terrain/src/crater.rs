//! Irregular crater shapes.

use std::f64::consts::TAU;

use glam::DVec2;
use rand::Rng;

use barrage_core::constants::*;

/// One circular component of a crater.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CraterLobe {
    pub center: DVec2,
    pub radius: f64,
}

impl CraterLobe {
    /// Scatter CRATER_LOBES circles around `center`.
    ///
    /// Lobe `i` sits on bearing `TAU * i / CRATER_LOBES`, pushed out by up to
    /// `CRATER_CENTER_JITTER * base_radius`, with a radius between
    /// `CRATER_LOBE_MIN` and `CRATER_LOBE_MAX` times `base_radius`. Every
    /// point within `CRATER_CENTER_JITTER * base_radius` of `center` is
    /// covered by at least one lobe.
    pub fn scatter<R: Rng + ?Sized>(center: DVec2, base_radius: f64, rng: &mut R) -> Vec<Self> {
        (0..CRATER_LOBES)
            .map(|i| {
                let bearing = TAU * i as f64 / CRATER_LOBES as f64;
                let offset = rng.gen::<f64>() * base_radius * CRATER_CENTER_JITTER;
                let scale =
                    CRATER_LOBE_MIN + rng.gen::<f64>() * (CRATER_LOBE_MAX - CRATER_LOBE_MIN);
                Self {
                    center: center + DVec2::new(bearing.cos(), bearing.sin()) * offset,
                    radius: base_radius * scale,
                }
            })
            .collect()
    }

    pub fn contains(&self, point: DVec2) -> bool {
        point.distance_squared(self.center) <= self.radius * self.radius
    }
}
