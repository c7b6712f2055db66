//! Procedural terrain generation.

use std::f64::consts::TAU;

use rand::Rng;

use barrage_core::config::TerrainConfig;

use crate::field::TerrainField;

/// Continuous surface row for every column: a sum of sinusoids around
/// `base_level * height`, clamped to the configured band.
///
/// `phases` pairs up with `config.octaves`; missing phases count as zero.
pub fn surface_profile(config: &TerrainConfig, phases: &[f64]) -> Vec<f64> {
    let base = config.height as f64 * config.base_level;
    let (lo, hi) = (config.min_surface_row, config.max_surface_row());
    (0..config.width)
        .map(|x| {
            let x = x as f64;
            let wave: f64 = config
                .octaves
                .iter()
                .enumerate()
                .map(|(i, o)| {
                    let phase = phases.get(i).copied().unwrap_or(0.0);
                    (x * o.frequency + phase).sin() * o.amplitude
                })
                .sum();
            (base + wave).clamp(lo, hi)
        })
        .collect()
}

/// Roll one phase per octave and build the field.
///
/// A cell is solid when its row is at or below the column's surface, so each
/// column is a single contiguous run down to the bottom edge.
pub fn generate<R: Rng + ?Sized>(config: &TerrainConfig, rng: &mut R) -> TerrainField {
    let phases: Vec<f64> = config.octaves.iter().map(|_| rng.gen::<f64>() * TAU).collect();
    let surface: Vec<usize> = surface_profile(config, &phases)
        .into_iter()
        .map(|row| (row.ceil().max(0.0) as usize).min(config.height))
        .collect();

    let mut field = TerrainField::from_heights(config.width, config.height, &surface)
        .with_sanitize(config.sanitize);
    field.sanitize();

    tracing::debug!(
        width = config.width,
        height = config.height,
        octaves = config.octaves.len(),
        solid = field.solid_count(),
        "terrain generated"
    );
    field
}
