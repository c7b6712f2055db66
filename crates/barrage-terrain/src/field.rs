//! TerrainField: destructible occupancy grid with column-profile queries.

use glam::DVec2;
use rand::Rng;

use barrage_core::enums::SanitizeMode;
use barrage_core::state::TerrainView;

use crate::crater::CraterLobe;

/// Dense boolean occupancy grid. Row 0 is the top of the world.
///
/// Cells only ever go from solid to empty after construction; every
/// mutating method clears cells and never sets them.
#[derive(Debug, Clone)]
pub struct TerrainField {
    pub(crate) width: usize,
    pub(crate) height: usize,
    /// Solid flags, row-major (top-to-bottom, left-to-right).
    pub(crate) cells: Vec<bool>,
    /// Cached topmost solid row per column, refreshed after every mutation.
    heights: Vec<usize>,
    revision: u64,
    sanitize: SanitizeMode,
}

impl TerrainField {
    /// All-sky field.
    pub fn empty(width: usize, height: usize) -> Self {
        let mut field = Self {
            width,
            height,
            cells: vec![false; width * height],
            heights: Vec::new(),
            revision: 0,
            sanitize: SanitizeMode::default(),
        };
        field.recompute_heights();
        field
    }

    /// Level ground: every row from `ground_row` down is solid.
    pub fn flat(width: usize, height: usize, ground_row: usize) -> Self {
        Self::from_heights(width, height, &vec![ground_row; width])
    }

    /// Fill each column from its surface row to the bottom.
    /// Columns beyond `surface.len()` stay empty; rows past the bottom are ignored.
    pub fn from_heights(width: usize, height: usize, surface: &[usize]) -> Self {
        let mut field = Self::empty(width, height);
        for (x, &top) in surface.iter().enumerate().take(width) {
            for y in top.min(height)..height {
                field.cells[y * width + x] = true;
            }
        }
        field.recompute_heights();
        field
    }

    /// Choose the floating-terrain pass used after each carve.
    pub fn with_sanitize(mut self, mode: SanitizeMode) -> Self {
        self.sanitize = mode;
        self
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn sanitize_mode(&self) -> SanitizeMode {
        self.sanitize
    }

    /// Mutation counter. Unchanged revision means an unchanged grid.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[inline]
    pub(crate) fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Point-in-solid test. Anything outside the grid is sky.
    pub fn occupied_at(&self, x: i64, y: i64) -> bool {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return false;
        }
        self.cells[self.index(x as usize, y as usize)]
    }

    /// Point-in-solid test for a continuous world position (the containing cell).
    pub fn occupied_at_point(&self, point: DVec2) -> bool {
        if !point.x.is_finite() || !point.y.is_finite() {
            return false;
        }
        self.occupied_at(point.x.floor() as i64, point.y.floor() as i64)
    }

    /// Topmost solid row of column `x`, found by scanning down from the top.
    /// Returns `height()` when the column is empty or `x` is outside the grid.
    pub fn height_at(&self, x: i64) -> usize {
        if x < 0 || x >= self.width as i64 {
            return self.height;
        }
        let x = x as usize;
        (0..self.height)
            .find(|&y| self.cells[self.index(x, y)])
            .unwrap_or(self.height)
    }

    /// Topmost solid row of every column, left to right.
    pub fn height_map(&self) -> &[usize] {
        &self.heights
    }

    /// Height map plus dimensions and revision, as handed to presentation.
    pub fn view(&self) -> TerrainView {
        TerrainView {
            width: self.width,
            height: self.height,
            revision: self.revision,
            heights: self.heights.clone(),
        }
    }

    /// Number of solid cells.
    pub fn solid_count(&self) -> usize {
        self.cells.iter().filter(|&&solid| solid).count()
    }

    /// Clear one cell. Returns true if it was solid.
    pub(crate) fn clear_cell(&mut self, x: usize, y: usize) -> bool {
        let idx = self.index(x, y);
        std::mem::replace(&mut self.cells[idx], false)
    }

    /// Clear every cell whose coordinates lie within `radius` of `center`.
    /// Does not run the floating-terrain pass or refresh the height map.
    fn clear_disk(&mut self, center: DVec2, radius: f64) -> usize {
        if radius <= 0.0 || !center.is_finite() {
            return 0;
        }
        let r_sq = radius * radius;
        let x0 = ((center.x - radius).floor() as i64).max(0);
        let x1 = ((center.x + radius).ceil() as i64).min(self.width as i64 - 1);
        let y0 = ((center.y - radius).floor() as i64).max(0);
        let y1 = ((center.y + radius).ceil() as i64).min(self.height as i64 - 1);

        let mut cleared = 0;
        for y in y0..=y1 {
            for x in x0..=x1 {
                let d = DVec2::new(x as f64, y as f64) - center;
                if d.length_squared() <= r_sq && self.clear_cell(x as usize, y as usize) {
                    cleared += 1;
                }
            }
        }
        cleared
    }

    /// Carve a single circular hole, then clean up and refresh.
    pub fn carve_circle(&mut self, center: DVec2, radius: f64) -> usize {
        self.carve_lobes(&[CraterLobe { center, radius }])
    }

    /// Carve an irregular crater around `center` built from overlapping lobes.
    /// Returns the number of cells cleared, including floating debris.
    pub fn carve_crater<R: Rng + ?Sized>(
        &mut self,
        center: DVec2,
        base_radius: f64,
        rng: &mut R,
    ) -> usize {
        let lobes = CraterLobe::scatter(center, base_radius, rng);
        self.carve_lobes(&lobes)
    }

    /// Carve the union of `lobes`, run the floating-terrain pass, refresh the height map.
    pub fn carve_lobes(&mut self, lobes: &[CraterLobe]) -> usize {
        let mut cleared: usize = lobes
            .iter()
            .map(|lobe| self.clear_disk(lobe.center, lobe.radius))
            .sum();
        cleared += self.remove_floating();
        self.refresh();
        tracing::debug!(
            lobes = lobes.len(),
            cleared,
            revision = self.revision,
            "terrain carved"
        );
        cleared
    }

    /// Run the configured floating-terrain pass on its own. Returns cells cleared.
    pub fn sanitize(&mut self) -> usize {
        let cleared = self.remove_floating();
        if cleared > 0 {
            self.refresh();
        }
        cleared
    }

    fn remove_floating(&mut self) -> usize {
        match self.sanitize {
            SanitizeMode::ColumnHeuristic => crate::sanitize::column_heuristic(self),
            SanitizeMode::Connected => crate::sanitize::connected(self),
        }
    }

    fn refresh(&mut self) {
        self.recompute_heights();
        self.revision += 1;
    }

    fn recompute_heights(&mut self) {
        self.heights = (0..self.width as i64).map(|x| self.height_at(x)).collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_field_queries() {
        let field = TerrainField::flat(10, 20, 15);
        assert_eq!(field.height_at(0), 15);
        assert_eq!(field.height_at(9), 15);
        assert!(field.occupied_at(3, 15));
        assert!(field.occupied_at(3, 19));
        assert!(!field.occupied_at(3, 14));
        assert_eq!(field.solid_count(), 10 * 5);
        assert_eq!(field.height_map(), &[15; 10]);
    }

    #[test]
    fn test_out_of_range_queries_degrade() {
        let field = TerrainField::flat(10, 20, 15);
        assert!(!field.occupied_at(-1, 18));
        assert!(!field.occupied_at(10, 18));
        assert!(!field.occupied_at(3, 20));
        assert!(!field.occupied_at(3, -5));
        assert_eq!(field.height_at(-1), 20);
        assert_eq!(field.height_at(10), 20);
        assert!(!field.occupied_at_point(DVec2::new(f64::NAN, 18.0)));
    }

    #[test]
    fn test_empty_column_reports_bottom() {
        let field = TerrainField::from_heights(4, 10, &[5, 5]);
        assert_eq!(field.height_at(1), 5);
        assert_eq!(field.height_at(2), 10);
        assert_eq!(field.height_at(3), 10);
    }

    #[test]
    fn test_occupied_at_point_floors() {
        let field = TerrainField::flat(10, 20, 15);
        assert!(field.occupied_at_point(DVec2::new(2.9, 15.0)));
        assert!(!field.occupied_at_point(DVec2::new(2.9, 14.99)));
    }

    #[test]
    fn test_carve_circle_clears_and_refreshes() {
        let mut field = TerrainField::flat(40, 40, 20);
        let before = field.solid_count();
        let rev = field.revision();
        let cleared = field.carve_circle(DVec2::new(20.0, 20.0), 5.0);
        assert!(cleared > 0);
        assert_eq!(field.solid_count(), before - cleared);
        assert_eq!(field.revision(), rev + 1);
        assert!(!field.occupied_at(20, 24));
        assert_eq!(field.height_at(20), 26);
        assert_eq!(field.height_map()[20], 26);
        // Outside the circle untouched.
        assert_eq!(field.height_at(5), 20);
    }

    #[test]
    fn test_carve_partly_outside_grid() {
        let mut field = TerrainField::flat(20, 20, 10);
        let cleared = field.carve_circle(DVec2::new(-3.0, 12.0), 6.0);
        assert!(cleared > 0);
        assert!(!field.occupied_at(0, 12));
    }

    #[test]
    fn test_height_map_matches_column_scan() {
        let mut field = TerrainField::flat(60, 50, 30);
        field.carve_circle(DVec2::new(10.0, 30.0), 8.0);
        field.carve_circle(DVec2::new(45.0, 35.0), 6.0);
        for x in 0..60 {
            assert_eq!(field.height_map()[x], field.height_at(x as i64), "column {x}");
        }
    }
}
