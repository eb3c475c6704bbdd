use lib::matcher::rotate;
use lib::neighbors::{neighbors, NeighborVector, NEIGHBOR_OFFSETS};
use lib::orientation::compute_orientation;
use lib::{skeletonize, Minutia, PixelGrid};
use proptest::prelude::*;

fn grid_strategy() -> impl Strategy<Value = PixelGrid> {
    (1..14usize, 1..14usize).prop_flat_map(|(height, width)| {
        prop::collection::vec(prop::bool::weighted(0.6), height * width).prop_map(move |pixels| {
            PixelGrid::from_fn(height, width, |row, col| pixels[row * width + col])
        })
    })
}

proptest! {
    #[test]
    fn prop_skeleton_is_a_fixed_point(grid in grid_strategy()) {
        let once = skeletonize(&grid);
        let twice = skeletonize(&once);
        prop_assert!(twice.identical(&once));
    }

    #[test]
    fn prop_thinning_only_erodes(grid in grid_strategy()) {
        let skeleton = skeletonize(&grid);
        prop_assert!(skeleton.black_count() <= grid.black_count());
        for (row, col) in skeleton.iter_black() {
            prop_assert!(grid.is_black(row as i64, col as i64));
        }
    }

    #[test]
    fn prop_transitions_stay_in_range(values in prop::array::uniform8(prop::bool::ANY)) {
        let t = NeighborVector(values).transitions();
        prop_assert!(t <= 4);
    }

    #[test]
    fn prop_neighbors_mirror_the_grid(grid in grid_strategy(), r in 0..14usize, c in 0..14usize) {
        let (row, col) = (r % grid.height(), c % grid.width());
        let v = neighbors(&grid, row, col).unwrap();
        for (i, (dr, dc)) in NEIGHBOR_OFFSETS.iter().enumerate() {
            let (nr, nc) = (row as i64 + dr, col as i64 + dc);
            let expected = grid.contains(nr, nc) && grid.get(nr as usize, nc as usize).unwrap();
            prop_assert_eq!(v.is_black(i), expected);
        }
    }

    #[test]
    fn prop_orientation_is_normalized(grid in grid_strategy(), distance in 0..8usize) {
        for (row, col) in grid.iter_black() {
            let angle = compute_orientation(&grid, row, col, distance).unwrap();
            prop_assert!((0..360).contains(&angle));
        }
    }

    #[test]
    fn prop_rotation_round_trip(
        row in -200..200i32,
        col in -200..200i32,
        angle in 0..360i32,
        center_row in -50..50i32,
        center_col in -50..50i32,
        degrees in -360..360i32,
    ) {
        let m = Minutia::new(row, col, angle);
        let back = rotate(&rotate(&m, center_row, center_col, degrees), center_row, center_col, -degrees);
        prop_assert!((back.row() - m.row()).abs() <= 1);
        prop_assert!((back.col() - m.col()).abs() <= 1);
        prop_assert_eq!(back.angle(), m.angle());
    }
}
