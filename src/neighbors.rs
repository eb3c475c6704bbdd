use crate::error::{FingerprintError, Result};
use crate::grid::PixelGrid;

pub const NEIGHBOR_COUNT: usize = 8;

/// `(row, col)` offsets of the eight neighbors, indexed clockwise from the
/// pixel directly above:
///
/// ```text
/// | 7 | 0 | 1 |
/// | 6 | _ | 2 |
/// | 5 | 4 | 3 |
/// ```
pub const NEIGHBOR_OFFSETS: [(i64, i64); NEIGHBOR_COUNT] = [
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
];

/// The eight neighbors of a pixel, laid out as in [`NEIGHBOR_OFFSETS`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct NeighborVector(pub [bool; NEIGHBOR_COUNT]);

impl NeighborVector {
    pub fn is_black(&self, position: usize) -> bool {
        self.0[position]
    }

    pub fn is_white(&self, position: usize) -> bool {
        !self.0[position]
    }

    pub fn black_count(&self) -> usize {
        self.0.iter().filter(|&&p| p).count()
    }

    /// White to black transitions walking 0..7 and wrapping back to 0.
    pub fn transitions(&self) -> usize {
        (0..NEIGHBOR_COUNT)
            .filter(|&i| self.is_white(i) && self.is_black((i + 1) % NEIGHBOR_COUNT))
            .count()
    }

    /// `true` when at least one of the given positions is white.
    pub fn any_white(&self, positions: [usize; 3]) -> bool {
        positions.iter().any(|&p| self.is_white(p))
    }
}

impl TryFrom<&[bool]> for NeighborVector {
    type Error = FingerprintError;

    fn try_from(values: &[bool]) -> Result<Self> {
        let array: [bool; NEIGHBOR_COUNT] = values
            .try_into()
            .map_err(|_| FingerprintError::MalformedNeighborVector { len: values.len() })?;
        Ok(Self(array))
    }
}

/**
 * Returns the neighbors of the pixel at `(row, col)`. Positions that fall outside
 * the grid are white. The pixel itself must lie inside the grid.
 */
pub fn neighbors(grid: &PixelGrid, row: usize, col: usize) -> Result<NeighborVector> {
    grid.check_bounds(row as i64, col as i64)?;
    Ok(neighbors_unchecked(grid, row as i64, col as i64))
}

pub(crate) fn neighbors_unchecked(grid: &PixelGrid, row: i64, col: i64) -> NeighborVector {
    let mut values = [false; NEIGHBOR_COUNT];
    for (value, (dr, dc)) in values.iter_mut().zip(NEIGHBOR_OFFSETS.iter()) {
        *value = grid.is_black(row + dr, col + dc);
    }
    NeighborVector(values)
}

pub fn black_count(vector: &NeighborVector) -> usize {
    vector.black_count()
}

pub fn transitions(vector: &NeighborVector) -> usize {
    vector.transitions()
}

/// Transition count over an arbitrary slice, which must hold exactly eight values.
pub fn transitions_of(values: &[bool]) -> Result<usize> {
    NeighborVector::try_from(values).map(|v| v.transitions())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_white_vector() {
        let v = NeighborVector([false; 8]);
        assert_eq!(black_count(&v), 0);
        assert_eq!(transitions(&v), 0);
    }

    #[test]
    fn all_black_vector_has_no_transitions() {
        let v = NeighborVector([true; 8]);
        assert_eq!(v.black_count(), 8);
        assert_eq!(v.transitions(), 0);
    }

    #[test]
    fn transitions_wrap_from_last_to_first() {
        let v = NeighborVector([true, false, false, false, false, false, false, false]);
        assert_eq!(v.transitions(), 1);

        let alternating = NeighborVector([true, false, true, false, true, false, true, false]);
        assert_eq!(alternating.transitions(), 4);
    }

    #[test]
    fn transitions_of_rejects_wrong_length() {
        assert!(matches!(
            transitions_of(&[true; 7]),
            Err(FingerprintError::MalformedNeighborVector { len: 7 })
        ));
        assert!(matches!(
            transitions_of(&[false; 9]),
            Err(FingerprintError::MalformedNeighborVector { len: 9 })
        ));
        assert_eq!(transitions_of(&[false, true, false, false, false, false, false, false]).unwrap(), 1);
    }

    #[test]
    fn layout_is_clockwise_from_above() {
        let grid = PixelGrid::from_ascii(
            "
            .#.
            ...
            ..#
            ",
        )
        .unwrap();
        let v = neighbors(&grid, 1, 1).unwrap();
        assert_eq!(v.0, [true, false, false, true, false, false, false, false]);
    }

    #[test]
    fn corner_pixel_treats_off_grid_as_white() {
        let grid = PixelGrid::from_ascii("##\n##").unwrap();
        let v = neighbors(&grid, 0, 0).unwrap();
        assert_eq!(v.0, [false, false, true, true, true, false, false, false]);
    }

    #[test]
    fn neighbors_outside_grid_fails() {
        let grid = PixelGrid::new(2, 2);
        assert!(matches!(
            neighbors(&grid, 2, 1),
            Err(FingerprintError::OutOfBounds { row: 2, col: 1, .. })
        ));
    }
}
