use log::{debug, warn};

use crate::config::FingerprintConfig;
use crate::fingerprint::{Minutia, Signature};
use crate::grid::PixelGrid;
use crate::neighbors::neighbors_unchecked;
use crate::orientation::compute_orientation;

/// Crossing number of a ridge ending.
pub const RIDGE_ENDING: usize = 1;
/// Crossing number of a bifurcation.
pub const BIFURCATION: usize = 3;

fn is_minutia(skeleton: &PixelGrid, row: usize, col: usize) -> bool {
    if !skeleton.is_black(row as i64, col as i64) {
        return false;
    }
    let crossing = neighbors_unchecked(skeleton, row as i64, col as i64).transitions();
    crossing == RIDGE_ENDING || crossing == BIFURCATION
}

/// Finds the ridge endings and bifurcations of a skeleton using the default
/// orientation sampling distance.
pub fn extract(skeleton: &PixelGrid) -> Signature {
    extract_with(skeleton, &FingerprintConfig::default())
}

/**
 * Scans the pixels strictly inside the border for crossing numbers of 1 or 3 and
 * attaches an orientation to each hit. Neighboring hits are all kept.
 */
pub fn extract_with(skeleton: &PixelGrid, config: &FingerprintConfig) -> Signature {
    let (height, width) = skeleton.dims();
    let mut signature = Signature::new();

    for row in 1..height.saturating_sub(1) {
        for col in 1..width.saturating_sub(1) {
            if !is_minutia(skeleton, row, col) {
                continue;
            }
            match compute_orientation(skeleton, row, col, config.orientation_distance) {
                Ok(angle) => signature.push(Minutia::new(row as i32, col as i32, angle)),
                Err(e) => warn!("dropped minutia at ({}, {}): {}", row, col, e),
            }
        }
    }

    debug!(
        "extracted {} minutiae from a {}x{} skeleton",
        signature.len(),
        height,
        width
    );
    signature
}
