//! Property tests for terrain destruction.

use glam::DVec2;
use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use barrage_core::config::TerrainConfig;
use barrage_core::constants::*;
use barrage_core::enums::SanitizeMode;

use crate::field::TerrainField;
use crate::generate::generate;

fn small_config(sanitize: SanitizeMode) -> TerrainConfig {
    TerrainConfig {
        width: 160,
        height: 120,
        min_surface_row: 30.0,
        bottom_margin: 20.0,
        sanitize,
        ..Default::default()
    }
}

fn sanitize_mode() -> impl Strategy<Value = SanitizeMode> {
    prop_oneof![
        Just(SanitizeMode::ColumnHeuristic),
        Just(SanitizeMode::Connected)
    ]
}

proptest! {
    #[test]
    fn carving_never_adds_terrain(
        seed in any::<u64>(),
        mode in sanitize_mode(),
        blasts in prop::collection::vec(
            (-20.0f64..180.0, -20.0f64..140.0, 1.0f64..40.0),
            1..12,
        ),
    ) {
        let config = small_config(mode);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut field = generate(&config, &mut rng);
        let mut solid = field.solid_count();
        for (x, y, r) in blasts {
            let rev = field.revision();
            let cleared = field.carve_crater(DVec2::new(x, y), r, &mut rng);
            let now = field.solid_count();
            prop_assert!(now <= solid, "solid count grew from {} to {}", solid, now);
            prop_assert_eq!(solid - now, cleared);
            prop_assert_eq!(field.revision(), rev + 1);
            solid = now;
        }
    }

    #[test]
    fn crater_clears_inner_disk(
        seed in any::<u64>(),
        cx in 40.0f64..120.0,
        cy in 40.0f64..100.0,
        r in 4.0f64..40.0,
    ) {
        let mut field = TerrainField::flat(160, 120, 20);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let center = DVec2::new(cx, cy);
        field.carve_crater(center, r, &mut rng);

        let inner = r * CRATER_CENTER_JITTER;
        let x0 = (cx - inner).floor() as i64;
        let x1 = (cx + inner).ceil() as i64;
        let y0 = (cy - inner).floor() as i64;
        let y1 = (cy + inner).ceil() as i64;
        for y in y0..=y1 {
            for x in x0..=x1 {
                if DVec2::new(x as f64, y as f64).distance(center) <= inner {
                    prop_assert!(!field.occupied_at(x, y), "({}, {}) still solid", x, y);
                }
            }
        }
    }

    #[test]
    fn height_map_tracks_grid(seed in any::<u64>(), mode in sanitize_mode()) {
        let config = small_config(mode);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut field = generate(&config, &mut rng);
        for _ in 0..4 {
            let x = rng.gen_range(0.0..config.width as f64);
            let y = field.height_at(x as i64) as f64;
            field.carve_crater(DVec2::new(x, y), EXPLOSION_RADIUS, &mut rng);
        }
        for x in 0..config.width {
            prop_assert_eq!(field.height_map()[x], field.height_at(x as i64));
        }
    }
}

/// Solid cells with no 4-connected path to the bottom row.
fn floating_cells(field: &TerrainField) -> usize {
    let (w, h) = (field.width() as i64, field.height() as i64);
    let mut anchored = vec![false; (w * h) as usize];
    let mut stack: Vec<(i64, i64)> = (0..w)
        .filter(|&x| field.occupied_at(x, h - 1))
        .map(|x| (x, h - 1))
        .collect();
    for &(x, y) in &stack {
        anchored[(y * w + x) as usize] = true;
    }
    while let Some((x, y)) = stack.pop() {
        for (nx, ny) in [(x - 1, y), (x + 1, y), (x, y - 1), (x, y + 1)] {
            if field.occupied_at(nx, ny) && !anchored[(ny * w + nx) as usize] {
                anchored[(ny * w + nx) as usize] = true;
                stack.push((nx, ny));
            }
        }
    }
    (0..h)
        .flat_map(|y| (0..w).map(move |x| (x, y)))
        .filter(|&(x, y)| field.occupied_at(x, y) && !anchored[(y * w + x) as usize])
        .count()
}

#[test]
fn test_connected_mode_leaves_no_floating_cells() {
    let config = small_config(SanitizeMode::Connected);
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let mut field = generate(&config, &mut rng);
    // Blasts under the surface dig out overhangs on slopes.
    for x in (10..150).step_by(23) {
        let y = field.height_at(x) as f64 + 15.0;
        field.carve_crater(DVec2::new(x as f64, y), 18.0, &mut rng);
    }
    assert_eq!(floating_cells(&field), 0);
}

#[test]
fn test_heuristic_even_columns_have_single_run() {
    let config = small_config(SanitizeMode::ColumnHeuristic);
    let mut rng = ChaCha8Rng::seed_from_u64(77);
    let mut field = generate(&config, &mut rng);
    for x in (5..155).step_by(17) {
        let y = field.height_at(x) as f64 + 12.0;
        field.carve_crater(DVec2::new(x as f64, y), EXPLOSION_RADIUS, &mut rng);
    }
    for x in (0..config.width as i64).step_by(2) {
        let top = field.height_at(x);
        for y in top..config.height {
            assert!(
                field.occupied_at(x, y as i64),
                "even column {x} has a gap at row {y} below its surface {top}"
            );
        }
    }
}

#[test]
fn test_craters_are_seeded() {
    let mut a = TerrainField::flat(100, 100, 50);
    let mut b = TerrainField::flat(100, 100, 50);
    let center = DVec2::new(50.0, 50.0);
    a.carve_crater(center, EXPLOSION_RADIUS, &mut ChaCha8Rng::seed_from_u64(1));
    b.carve_crater(center, EXPLOSION_RADIUS, &mut ChaCha8Rng::seed_from_u64(1));
    assert_eq!(a.height_map(), b.height_map());
    assert_eq!(a.solid_count(), b.solid_count());
}
