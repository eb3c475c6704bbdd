pub mod config;
pub mod error;
pub mod fingerprint;
pub mod grid;
pub mod imageio;
pub mod linalg;
pub mod matcher;
pub mod minutiae;
pub mod neighbors;
pub mod orientation;
pub mod region;
pub mod thinning;

pub use config::FingerprintConfig;
pub use error::{FingerprintError, Result};
pub use fingerprint::{Minutia, Signature};
pub use grid::PixelGrid;
pub use matcher::{match_report_with, match_signatures, match_signatures_with, Alignment, MatchReport};
pub use minutiae::{extract as extract_minutiae, extract_with as extract_minutiae_with};
pub use thinning::{skeletonize, skeletonize_observed, SnapshotCollector, ThinningObserver};

/**
 * Skeletonizes a ridge image and extracts its minutiae.
 */
pub fn signature_of(grid: &PixelGrid, config: &FingerprintConfig) -> Signature {
    minutiae::extract_with(&skeletonize(grid), config)
}

#[test]
fn white_square_scenario() {
    let grid = PixelGrid::new(3, 3);
    let skeleton = skeletonize(&grid);
    assert!(skeleton.identical(&grid));
    assert!(extract_minutiae(&skeleton).is_empty());
}

#[test]
fn signature_read_back_still_matches() {
    let signature: Signature = (0..24)
        .map(|i| Minutia::new(10 + (i * 37) % 90, 10 + (i * 53) % 90, (i * 29) % 360))
        .collect();
    let json = serde_json::to_string(&signature).unwrap();
    let read: Signature = serde_json::from_str(&json).unwrap();
    assert!(match_signatures(&signature, &read));
}
