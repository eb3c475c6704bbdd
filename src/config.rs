use std::fs::File;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Pixels sampled in each direction when estimating a minutia's orientation.
pub const ORIENTATION_DISTANCE: usize = 16;
/// Largest distance between two minutiae that still overlap.
pub const DISTANCE_THRESHOLD: u32 = 5;
/// Largest orientation difference, in degrees, between two overlapping minutiae.
pub const ORIENTATION_THRESHOLD: i32 = 20;
/// Overlapping minutiae needed to declare two signatures the same finger.
pub const FOUND_THRESHOLD: usize = 20;
/// Degrees tried on each side of the rotation implied by an anchor pair.
pub const MATCH_ANGLE_OFFSET: i32 = 2;

/// Tunables for extraction and matching. Missing fields fall back to the defaults
/// when read from JSON.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FingerprintConfig {
    pub orientation_distance: usize,
    pub distance_threshold: u32,
    pub orientation_threshold: i32,
    pub found_threshold: usize,
    pub match_angle_offset: i32,
    /// Upper bound on alignment trials in one match. `None` searches everything.
    pub max_trials: Option<usize>,
}

impl Default for FingerprintConfig {
    fn default() -> Self {
        Self {
            orientation_distance: ORIENTATION_DISTANCE,
            distance_threshold: DISTANCE_THRESHOLD,
            orientation_threshold: ORIENTATION_THRESHOLD,
            found_threshold: FOUND_THRESHOLD,
            match_angle_offset: MATCH_ANGLE_OFFSET,
            max_trials: None,
        }
    }
}

impl FingerprintConfig {
    pub fn from_file(path: &str) -> Result<Self> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(file)?)
    }

    pub fn to_file(&self, path: &str) -> Result<&Self> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(self)
    }
}
