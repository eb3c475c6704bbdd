use log::{debug, trace};

use crate::grid::PixelGrid;
use crate::neighbors::neighbors_unchecked;

/// The two alternating erosion passes of one thinning iteration.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SubStep {
    First,
    Second,
}

impl SubStep {
    /// Triads of neighbor positions that must each contain a white pixel.
    fn triads(self) -> [[usize; 3]; 2] {
        match self {
            SubStep::First => [[0, 2, 4], [2, 4, 6]],
            SubStep::Second => [[0, 2, 6], [0, 4, 6]],
        }
    }
}

/// Receives every intermediate grid produced while thinning.
pub trait ThinningObserver {
    fn on_step(&mut self, iteration: usize, sub_step: SubStep, before: &PixelGrid, after: &PixelGrid);
}

/// Observer that ignores everything.
pub struct NoopObserver;

impl ThinningObserver for NoopObserver {
    fn on_step(&mut self, _: usize, _: SubStep, _: &PixelGrid, _: &PixelGrid) {}
}

/// Keeps a copy of the grid before and after each sub-step.
#[derive(Default, Debug)]
pub struct SnapshotCollector {
    pub snapshots: Vec<Snapshot>,
}

#[derive(Clone, Debug)]
pub struct Snapshot {
    pub iteration: usize,
    pub sub_step: SubStep,
    pub before: PixelGrid,
    pub after: PixelGrid,
}

impl SnapshotCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

impl ThinningObserver for SnapshotCollector {
    fn on_step(&mut self, iteration: usize, sub_step: SubStep, before: &PixelGrid, after: &PixelGrid) {
        self.snapshots.push(Snapshot {
            iteration,
            sub_step,
            before: before.clone(),
            after: after.clone(),
        });
    }
}

fn is_deletable(grid: &PixelGrid, row: usize, col: usize, sub_step: SubStep) -> bool {
    if !grid.is_black(row as i64, col as i64) {
        return false;
    }
    let n = neighbors_unchecked(grid, row as i64, col as i64);
    let black = n.black_count();
    (2..=6).contains(&black)
        && n.transitions() == 1
        && sub_step.triads().iter().all(|&triad| n.any_white(triad))
}

/**
 * Applies one erosion pass. Every decision reads the input grid only, so the
 * result does not depend on scan order.
 */
pub fn thinning_step(grid: &PixelGrid, sub_step: SubStep) -> PixelGrid {
    let mut out = grid.clone();
    for (row, col) in grid.iter_black() {
        if is_deletable(grid, row, col, sub_step) {
            out.put(row, col, false);
        }
    }
    out
}

/// Thins a binary ridge image down to one-pixel-wide curves.
pub fn skeletonize(grid: &PixelGrid) -> PixelGrid {
    skeletonize_observed(grid, &mut NoopObserver)
}

/// Same as [`skeletonize`], reporting every sub-step to `observer`.
pub fn skeletonize_observed<O: ThinningObserver + ?Sized>(grid: &PixelGrid, observer: &mut O) -> PixelGrid {
    let mut current = grid.clone();
    let mut iteration = 0;
    loop {
        let intermediate = thinning_step(&current, SubStep::First);
        observer.on_step(iteration, SubStep::First, &current, &intermediate);
        let next = thinning_step(&intermediate, SubStep::Second);
        observer.on_step(iteration, SubStep::Second, &intermediate, &next);

        let removed = current.black_count() - next.black_count();
        trace!("thinning iteration {} removed {} pixels", iteration, removed);
        iteration += 1;

        if next.identical(&current) {
            debug!(
                "skeleton reached after {} iterations, {} of {} pixels kept",
                iteration,
                next.black_count(),
                grid.black_count()
            );
            return next;
        }
        current = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn white_grid_is_its_own_skeleton() {
        let grid = PixelGrid::new(3, 3);
        assert!(skeletonize(&grid).identical(&grid));
    }

    #[test]
    fn thick_bar_thins_to_single_pixel_line() {
        let grid = PixelGrid::from_ascii(
            "
            ..........
            .########.
            .########.
            .########.
            ..........
            ",
        )
        .unwrap();
        let skeleton = skeletonize(&grid);
        assert!(skeleton.black_count() > 0);
        assert!(skeleton.black_count() < grid.black_count());
        // one pixel per column at most
        for col in 0..skeleton.width() {
            let count = (0..skeleton.height())
                .filter(|&row| skeleton.is_black(row as i64, col as i64))
                .count();
            assert!(count <= 1, "column {} keeps {} pixels", col, count);
        }
    }

    #[test]
    fn single_line_is_stable() {
        let grid = PixelGrid::from_ascii(
            "
            .......
            .#####.
            .......
            ",
        )
        .unwrap();
        let skeleton = skeletonize(&grid);
        // end points have a single black neighbor and survive
        assert!(skeleton.is_black(1, 1));
        assert!(skeleton.is_black(1, 5));
        assert!(skeleton.identical(&grid));
    }

    #[test]
    fn sub_step_reads_only_its_input() {
        let grid = PixelGrid::from_ascii(
            "
            .....
            .###.
            .###.
            .###.
            .....
            ",
        )
        .unwrap();
        let first = thinning_step(&grid, SubStep::First);
        // the input is untouched and the pass only clears pixels
        assert_eq!(grid.black_count(), 9);
        assert!(first.black_count() <= grid.black_count());
        for (row, col) in first.iter_black() {
            assert!(grid.is_black(row as i64, col as i64));
        }
    }

    #[test]
    fn collector_sees_both_sub_steps_each_iteration() {
        let grid = PixelGrid::from_ascii(
            "
            ......
            .####.
            .####.
            .####.
            ......
            ",
        )
        .unwrap();
        let mut collector = SnapshotCollector::new();
        let skeleton = skeletonize_observed(&grid, &mut collector);
        assert!(!collector.is_empty());
        assert_eq!(collector.len() % 2, 0);
        assert_eq!(collector.snapshots[0].sub_step, SubStep::First);
        assert_eq!(collector.snapshots[1].sub_step, SubStep::Second);
        let last = collector.snapshots.last().unwrap();
        assert!(last.after.identical(&skeleton));
    }
}
