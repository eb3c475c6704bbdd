use log::{debug, info, trace, warn};

use crate::config::FingerprintConfig;
use crate::fingerprint::{Minutia, Signature};
use crate::linalg::{angular_distance, rotate_point};

/**
 * Rotates a minutia by `degrees` counter-clockwise about `(center_row, center_col)`.
 * Rows grow downwards, so they are flipped before rotating. The rotation is added
 * to the minutia's orientation.
 */
pub fn rotate(minutia: &Minutia, center_row: i32, center_col: i32, degrees: i32) -> Minutia {
    let x = (minutia.col() - center_col) as f64;
    let y = (center_row - minutia.row()) as f64;
    let (x, y) = rotate_point(x, y, degrees as f64);
    Minutia::new(
        center_row - y.round() as i32,
        center_col + x.round() as i32,
        minutia.angle() + degrees,
    )
}

/// Moves a minutia by `(-d_row, -d_col)`.
pub fn translate(minutia: &Minutia, d_row: i32, d_col: i32) -> Minutia {
    Minutia::new(minutia.row() - d_row, minutia.col() - d_col, minutia.angle())
}

/// Rotation about the center followed by the translation.
pub fn transform(
    minutia: &Minutia,
    center_row: i32,
    center_col: i32,
    d_row: i32,
    d_col: i32,
    rotation: i32,
) -> Minutia {
    translate(&rotate(minutia, center_row, center_col, rotation), d_row, d_col)
}

pub fn transform_all(
    signature: &Signature,
    center_row: i32,
    center_col: i32,
    d_row: i32,
    d_col: i32,
    rotation: i32,
) -> Signature {
    signature
        .iter()
        .map(|m| transform(m, center_row, center_col, d_row, d_col, rotation))
        .collect()
}

fn overlaps(a: &Minutia, b: &Minutia, max_distance: u32, max_orientation_delta: i32) -> bool {
    a.distance(b) <= max_distance as f64 && angular_distance(a.angle(), b.angle()) <= max_orientation_delta
}

/// Number of minutiae of `a` that have a counterpart in `b` within `max_distance`
/// and `max_orientation_delta` degrees. A minutia of `b` pairs with at most one of `a`,
/// the first one that reaches it.
pub fn count_overlap(a: &Signature, b: &Signature, max_distance: u32, max_orientation_delta: i32) -> usize {
    count_overlap_bounded(a, b, max_distance, max_orientation_delta, 0)
}

/**
 * Like [`count_overlap`], but gives up as soon as the minutiae of `a` left to scan
 * can no longer lift the count to `threshold`. The returned count is then only
 * what was found before stopping.
 */
pub fn count_overlap_bounded(
    a: &Signature,
    b: &Signature,
    max_distance: u32,
    max_orientation_delta: i32,
    threshold: usize,
) -> usize {
    let mut used = vec![false; b.len()];
    let mut matches = 0;
    for (scanned, ma) in a.iter().enumerate() {
        let partner = b
            .iter()
            .enumerate()
            .position(|(j, mb)| !used[j] && overlaps(ma, mb, max_distance, max_orientation_delta));
        if let Some(j) = partner {
            used[j] = true;
            matches += 1;
        }
        let remaining = a.len() - scanned - 1;
        if matches + remaining < threshold {
            break;
        }
    }
    matches
}

/// Anchor pair and rotation of one alignment trial.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Alignment {
    pub anchor_a: Minutia,
    pub anchor_b: Minutia,
    pub rotation: i32,
}

impl Alignment {
    /// Maps the second signature onto the first one: rotates about `anchor_b`,
    /// then moves `anchor_b` onto `anchor_a`.
    pub fn apply(&self, signature: &Signature) -> Signature {
        transform_all(
            signature,
            self.anchor_b.row(),
            self.anchor_b.col(),
            self.anchor_b.row() - self.anchor_a.row(),
            self.anchor_b.col() - self.anchor_a.col(),
            -self.rotation,
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchReport {
    pub matched: bool,
    /// Highest overlap seen. Trials cut short by pruning report a lower bound.
    pub best_count: usize,
    pub best_alignment: Option<Alignment>,
    pub trials: usize,
    pub budget_exhausted: bool,
}

pub fn match_signatures(a: &Signature, b: &Signature) -> bool {
    match_signatures_with(a, b, &FingerprintConfig::default())
}

pub fn match_signatures_with(a: &Signature, b: &Signature, config: &FingerprintConfig) -> bool {
    match_report_with(a, b, config).matched
}

/**
 * Searches for an alignment of `b` onto `a`. Every pair of minutiae, one from each
 * signature, is used as an anchor; the rotation implied by their orientations is
 * tried along with every whole degree within `match_angle_offset` of it. The search
 * stops at the first trial reaching `found_threshold`, or when `max_trials` runs out.
 */
pub fn match_report_with(a: &Signature, b: &Signature, config: &FingerprintConfig) -> MatchReport {
    let threshold = config.found_threshold;
    let offset = config.match_angle_offset.abs();
    let mut report = MatchReport {
        matched: threshold == 0,
        best_count: 0,
        best_alignment: None,
        trials: 0,
        budget_exhausted: false,
    };
    if report.matched {
        return report;
    }

    for anchor_a in a {
        for anchor_b in b {
            let implied = anchor_b.angle() - anchor_a.angle();
            for rotation in (implied - offset)..=(implied + offset) {
                if config.max_trials.is_some_and(|max| report.trials >= max) {
                    warn!(
                        "match search stopped after {} trials, best overlap {}",
                        report.trials, report.best_count
                    );
                    report.budget_exhausted = true;
                    return report;
                }
                report.trials += 1;

                let alignment = Alignment {
                    anchor_a: *anchor_a,
                    anchor_b: *anchor_b,
                    rotation,
                };
                let aligned = alignment.apply(b);
                let count = count_overlap_bounded(
                    a,
                    &aligned,
                    config.distance_threshold,
                    config.orientation_threshold,
                    threshold,
                );
                trace!("trial {:?} overlaps {}", alignment, count);

                if count > report.best_count || report.best_alignment.is_none() {
                    report.best_count = count;
                    report.best_alignment = Some(alignment);
                }
                if count >= threshold {
                    info!(
                        "match found after {} trials: {} overlapping minutiae, rotation {}",
                        report.trials, count, rotation
                    );
                    report.matched = true;
                    return report;
                }
            }
        }
    }

    debug!(
        "no match after {} trials, best overlap {} of {} needed",
        report.trials, report.best_count, threshold
    );
    report
}
