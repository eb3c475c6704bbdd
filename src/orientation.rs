use std::f64::consts::{FRAC_PI_2, PI};

use crate::error::Result;
use crate::grid::PixelGrid;
use crate::linalg::{normalize_degrees, Moments};
use crate::region::connected_region;

/// Slopes steeper than this are treated as vertical.
pub const MAX_SLOPE: f64 = 100.0;

/// Offsets of the region's pixels from the anchor, with `y` pointing up.
fn relative_points(region: &PixelGrid, row: usize, col: usize) -> impl Iterator<Item = (f64, f64)> + '_ {
    region
        .iter_black()
        .map(move |(i, j)| (j as f64 - col as f64, row as f64 - i as f64))
}

/**
 * Least-squares slope of the region around `(row, col)`. Vertical regions (and
 * slopes beyond [`MAX_SLOPE`]) give `f64::INFINITY`.
 */
pub fn compute_slope(region: &PixelGrid, row: usize, col: usize) -> f64 {
    let mut moments = Moments::default();
    let mut vertical = true;
    for (x, y) in relative_points(region, row, col) {
        if x != 0.0 {
            vertical = false;
        }
        moments.add(x, y);
    }
    if vertical {
        return f64::INFINITY;
    }

    let slope = moments.slope();
    match slope.is_finite() && slope.abs() <= MAX_SLOPE {
        true => slope,
        false => f64::INFINITY,
    }
}

/// Pixels on each side of the line through the anchor perpendicular to `slope`.
/// The anchor itself is not counted.
///
/// The region lies along the fitted line, so splitting it along that line would
/// say nothing about direction. The perpendicular separates the two ends instead.
fn side_counts(region: &PixelGrid, row: usize, col: usize, slope: f64) -> (usize, usize) {
    let mut above = 0;
    let mut below = 0;
    for (x, y) in relative_points(region, row, col) {
        if x == 0.0 && y == 0.0 {
            continue;
        }
        let is_above = if slope.is_infinite() {
            y >= 0.0
        } else if slope == 0.0 {
            x >= 0.0
        } else {
            y >= -x / slope
        };
        match is_above {
            true => above += 1,
            false => below += 1,
        }
    }
    (above, below)
}

/**
 * Turns a slope into a direction in radians, choosing between the two opposite
 * directions by which side of the anchor holds more of the region.
 */
pub fn compute_angle(region: &PixelGrid, row: usize, col: usize, slope: f64) -> f64 {
    let (above, below) = side_counts(region, row, col, slope);

    if slope.is_infinite() {
        return if above > below { FRAC_PI_2 } else { -FRAC_PI_2 };
    }
    if slope == 0.0 {
        return if above > below { 0.0 } else { PI };
    }

    let angle = slope.atan();
    if (angle > 0.0 && below > above) || (angle < 0.0 && above > below) {
        angle + PI
    } else {
        angle
    }
}

/// Radians to whole degrees in `[0, 360)`.
pub fn to_degrees(angle: f64) -> i32 {
    normalize_degrees(angle.to_degrees().round() as i32)
}

/// Ridge direction at `(row, col)` in whole degrees, sampled over the connected
/// pixels within `distance`.
pub fn compute_orientation(grid: &PixelGrid, row: usize, col: usize, distance: usize) -> Result<i32> {
    let region = connected_region(grid, row, col, distance)?;
    let slope = compute_slope(&region, row, col);
    Ok(to_degrees(compute_angle(&region, row, col, slope)))
}
