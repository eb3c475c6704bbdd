use std::collections::VecDeque;

use crate::error::Result;
use crate::grid::PixelGrid;
use crate::neighbors::NEIGHBOR_OFFSETS;

/**
 * Returns a grid of the same size as `grid` where `true` marks every black pixel
 * 8-connected to `(row, col)` whose row and column both lie within `distance` of
 * the seed. A white seed yields an empty region.
 */
pub fn connected_region(grid: &PixelGrid, row: usize, col: usize, distance: usize) -> Result<PixelGrid> {
    grid.check_bounds(row as i64, col as i64)?;

    let (height, width) = grid.dims();
    let mut region = PixelGrid::new(height, width);
    if !grid.is_black(row as i64, col as i64) {
        return Ok(region);
    }

    let distance = distance as i64;
    let (seed_row, seed_col) = (row as i64, col as i64);
    let in_window = |r: i64, c: i64| (r - seed_row).abs() <= distance && (c - seed_col).abs() <= distance;

    let mut queue = VecDeque::new();
    queue.push_back((seed_row, seed_col));
    region.put(row, col, true);

    while let Some((r, c)) = queue.pop_front() {
        for (dr, dc) in NEIGHBOR_OFFSETS {
            let (nr, nc) = (r + dr, c + dc);
            if in_window(nr, nc) && grid.is_black(nr, nc) && !region.is_black(nr, nc) {
                region.put(nr as usize, nc as usize, true);
                queue.push_back((nr, nc));
            }
        }
    }

    Ok(region)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FingerprintError;

    #[test]
    fn collects_only_connected_pixels() {
        let grid = PixelGrid::from_ascii(
            "
            #....
            .#..#
            ..#.#
            .....
            ",
        )
        .unwrap();
        let region = connected_region(&grid, 1, 1, 5).unwrap();
        let pixels: Vec<_> = region.iter_black().collect();
        assert_eq!(pixels, vec![(0, 0), (1, 1), (2, 2)]);
    }

    #[test]
    fn window_is_a_square() {
        let grid = PixelGrid::from_ascii(
            "
            #######
            ",
        )
        .unwrap();
        let region = connected_region(&grid, 0, 3, 2).unwrap();
        let pixels: Vec<_> = region.iter_black().collect();
        assert_eq!(pixels, vec![(0, 1), (0, 2), (0, 3), (0, 4), (0, 5)]);
    }

    #[test]
    fn pixels_reachable_only_outside_the_window_are_skipped() {
        // (0, 1) joins the rest only through column 0
        let grid = PixelGrid::from_ascii(
            "
            ##.#
            #..#
            ####
            ",
        )
        .unwrap();
        let region = connected_region(&grid, 0, 3, 3).unwrap();
        assert_eq!(region.black_count(), grid.black_count());

        let small = connected_region(&grid, 0, 3, 2).unwrap();
        let pixels: Vec<_> = small.iter_black().collect();
        assert_eq!(pixels, vec![(0, 3), (1, 3), (2, 1), (2, 2), (2, 3)]);
    }

    #[test]
    fn white_seed_gives_empty_region() {
        let grid = PixelGrid::from_ascii("#.#").unwrap();
        assert_eq!(connected_region(&grid, 0, 1, 4).unwrap().black_count(), 0);
    }

    #[test]
    fn seed_outside_grid_fails() {
        let grid = PixelGrid::new(4, 4);
        assert!(matches!(
            connected_region(&grid, 0, 9, 2),
            Err(FingerprintError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn dense_block_does_not_exhaust_the_stack() {
        let grid = PixelGrid::from_fn(400, 400, |_, _| true);
        let region = connected_region(&grid, 200, 200, 500).unwrap();
        assert_eq!(region.black_count(), 400 * 400);
    }
}
