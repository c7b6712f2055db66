//! Floating-terrain removal passes.

use std::collections::VecDeque;

use crate::field::TerrainField;

/// Per-column pass over even columns.
///
/// Each even column is scanned from the bottom row up. Once an empty cell
/// has been seen, every solid cell above it is cleared together with the
/// cell at the same row in the column to its left. Odd columns are only
/// touched through their right neighbour, so thin slivers can survive there.
pub(crate) fn column_heuristic(field: &mut TerrainField) -> usize {
    let mut cleared = 0;
    for x in (0..field.width).step_by(2) {
        let mut seen_sky = false;
        for y in (0..field.height).rev() {
            if !field.cells[field.index(x, y)] {
                seen_sky = true;
                continue;
            }
            if seen_sky {
                cleared += field.clear_cell(x, y) as usize;
                if x > 0 {
                    cleared += field.clear_cell(x - 1, y) as usize;
                }
            }
        }
    }
    cleared
}

/// Clear every solid cell not 4-connected to the bottom row.
pub(crate) fn connected(field: &mut TerrainField) -> usize {
    let (w, h) = (field.width, field.height);
    if w == 0 || h == 0 {
        return 0;
    }
    let mut anchored = vec![false; w * h];
    let mut queue = VecDeque::new();
    for x in 0..w {
        let idx = field.index(x, h - 1);
        if field.cells[idx] {
            anchored[idx] = true;
            queue.push_back((x, h - 1));
        }
    }

    while let Some((x, y)) = queue.pop_front() {
        let neighbours = [
            (x.wrapping_sub(1), y),
            (x + 1, y),
            (x, y.wrapping_sub(1)),
            (x, y + 1),
        ];
        for (nx, ny) in neighbours {
            if nx >= w || ny >= h {
                continue;
            }
            let idx = field.index(nx, ny);
            if field.cells[idx] && !anchored[idx] {
                anchored[idx] = true;
                queue.push_back((nx, ny));
            }
        }
    }

    let mut cleared = 0;
    for (cell, keep) in field.cells.iter_mut().zip(&anchored) {
        if *cell && !keep {
            *cell = false;
            cleared += 1;
        }
    }
    cleared
}

#[cfg(test)]
mod tests {
    use barrage_core::enums::SanitizeMode;

    use crate::field::TerrainField;

    /// 10x10 with solid ground from row 6, plus a detached 2-row slab over columns 2..=5.
    fn overhang(mode: SanitizeMode) -> TerrainField {
        let mut surface = vec![6; 10];
        for s in surface.iter_mut().take(6).skip(2) {
            *s = 2;
        }
        let mut field = TerrainField::from_heights(10, 10, &surface).with_sanitize(mode);
        // Cut rows 4..=5 under the slab so rows 2..=3 float.
        for x in 2..=5 {
            for y in 4..=5 {
                field.clear_cell(x, y);
            }
        }
        field
    }

    #[test]
    fn test_heuristic_clears_even_columns_and_left_neighbours() {
        let mut field = overhang(SanitizeMode::ColumnHeuristic);
        let cleared = field.sanitize();
        // Columns 2 and 4 clear themselves plus 1 and 3; column 5 keeps its sliver.
        assert_eq!(cleared, 6, "columns 2, 3, 4 cleared over two rows");
        for x in 2..=4 {
            assert_eq!(field.height_at(x), 6, "column {x} should be back at ground");
        }
        assert_eq!(field.height_at(5), 2, "odd column without an even right neighbour survives");
    }

    #[test]
    fn test_connected_clears_all_floating() {
        let mut field = overhang(SanitizeMode::Connected);
        let cleared = field.sanitize();
        assert_eq!(cleared, 8);
        for x in 0..10 {
            assert_eq!(field.height_at(x), 6, "column {x}");
        }
    }

    #[test]
    fn test_connected_keeps_supported_overhang() {
        // An L-shaped ledge joined to a pillar stays put.
        let mut surface = vec![8; 6];
        surface[0] = 2;
        surface[1] = 2;
        let mut field =
            TerrainField::from_heights(6, 10, &surface).with_sanitize(SanitizeMode::Connected);
        for y in 3..=7 {
            field.clear_cell(1, y);
        }
        assert_eq!(field.sanitize(), 0);
        assert_eq!(field.height_at(1), 2);
    }

    #[test]
    fn test_sanitize_on_clean_ground_is_noop() {
        for mode in [SanitizeMode::ColumnHeuristic, SanitizeMode::Connected] {
            let mut field = TerrainField::flat(16, 16, 9).with_sanitize(mode);
            let rev = field.revision();
            assert_eq!(field.sanitize(), 0);
            assert_eq!(field.revision(), rev, "no change should not bump the revision");
        }
    }
}
