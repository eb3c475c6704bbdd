use std::fs::File;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A ridge ending or bifurcation: position and ridge direction in degrees.
/// The angle is always in `[0, 360)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "StoredMinutia")]
pub struct Minutia {
    row: i32,
    col: i32,
    angle: i32,
}

/// On-disk form of a [`Minutia`], normalized on the way in.
#[derive(Deserialize)]
struct StoredMinutia {
    row: i32,
    col: i32,
    angle: i32,
}

impl From<StoredMinutia> for Minutia {
    fn from(stored: StoredMinutia) -> Self {
        Minutia::new(stored.row, stored.col, stored.angle)
    }
}

impl Minutia {
    pub fn new(row: i32, col: i32, angle: i32) -> Self {
        Self {
            row,
            col,
            angle: crate::linalg::normalize_degrees(angle),
        }
    }

    pub fn row(&self) -> i32 {
        self.row
    }

    pub fn col(&self) -> i32 {
        self.col
    }

    pub fn angle(&self) -> i32 {
        self.angle
    }

    pub fn distance(&self, other: &Minutia) -> f64 {
        let dr = (self.row - other.row) as f64;
        let dc = (self.col - other.col) as f64;
        (dr * dr + dc * dc).sqrt()
    }
}

/**
 * The minutiae extracted from one fingerprint image. Order carries no meaning
 * but is kept stable so results are reproducible.
 */
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Signature {
    minutiae: Vec<Minutia>,
}

impl Signature {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, minutia: Minutia) {
        self.minutiae.push(minutia)
    }

    pub fn len(&self) -> usize {
        self.minutiae.len()
    }

    pub fn is_empty(&self) -> bool {
        self.minutiae.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Minutia> {
        self.minutiae.iter()
    }

    pub fn as_slice(&self) -> &[Minutia] {
        &self.minutiae
    }

    pub fn from_file(path: &str) -> Result<Self> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(file)?)
    }

    pub fn to_file(&self, path: &str) -> Result<&Self> {
        let file = File::create(path)?;
        serde_json::to_writer(file, self)?;
        Ok(self)
    }
}

impl From<Vec<Minutia>> for Signature {
    fn from(minutiae: Vec<Minutia>) -> Self {
        Self { minutiae }
    }
}

impl FromIterator<Minutia> for Signature {
    fn from_iter<I: IntoIterator<Item = Minutia>>(iter: I) -> Self {
        Self {
            minutiae: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Signature {
    type Item = &'a Minutia;
    type IntoIter = std::slice::Iter<'a, Minutia>;

    fn into_iter(self) -> Self::IntoIter {
        self.minutiae.iter()
    }
}
