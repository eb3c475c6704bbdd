use crate::error::{FingerprintError, Result};

/// Rectangular binary image. `true` is ridge (black), `false` is background.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelGrid {
    height: usize,
    width: usize,
    pixels: Vec<bool>,
}

impl PixelGrid {
    /// An all-white grid.
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            pixels: vec![false; height * width],
        }
    }

    pub fn from_fn<F>(height: usize, width: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> bool,
    {
        let mut pixels = Vec::with_capacity(height * width);
        for row in 0..height {
            for col in 0..width {
                pixels.push(f(row, col));
            }
        }
        Self {
            height,
            width,
            pixels,
        }
    }

    /**
     * Builds a grid from nested rows. Every row must have the width of the first one.
     */
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        let mut pixels = Vec::with_capacity(height * width);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != width {
                return Err(FingerprintError::RaggedGrid {
                    row,
                    expected: width,
                    found: values.len(),
                });
            }
            pixels.extend(values);
        }
        Ok(Self {
            height,
            width,
            pixels,
        })
    }

    /// Parses a picture where `#` is black and any other character is white.
    /// Blank lines and surrounding whitespace are ignored.
    pub fn from_ascii(text: &str) -> Result<Self> {
        let rows: Vec<Vec<bool>> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| line.chars().map(|c| c == '#').collect())
            .collect();
        Self::from_rows(rows)
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn dims(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    pub fn contains(&self, row: i64, col: i64) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.height && (col as usize) < self.width
    }

    pub fn check_bounds(&self, row: i64, col: i64) -> Result<()> {
        match self.contains(row, col) {
            true => Ok(()),
            false => Err(FingerprintError::OutOfBounds {
                row,
                col,
                height: self.height,
                width: self.width,
            }),
        }
    }

    pub fn get(&self, row: usize, col: usize) -> Result<bool> {
        self.check_bounds(row as i64, col as i64)?;
        Ok(self.pixels[row * self.width + col])
    }

    pub fn set(&mut self, row: usize, col: usize, value: bool) -> Result<()> {
        self.check_bounds(row as i64, col as i64)?;
        self.pixels[row * self.width + col] = value;
        Ok(())
    }

    /// Off-grid positions read as white.
    pub fn is_black(&self, row: i64, col: i64) -> bool {
        self.contains(row, col) && self.pixels[row as usize * self.width + col as usize]
    }

    pub(crate) fn put(&mut self, row: usize, col: usize, value: bool) {
        self.pixels[row * self.width + col] = value;
    }

    pub fn black_count(&self) -> usize {
        self.pixels.iter().filter(|&&p| p).count()
    }

    pub fn iter_black(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let width = self.width;
        self.pixels
            .iter()
            .enumerate()
            .filter(|(_, &p)| p)
            .map(move |(i, _)| (i / width, i % width))
    }

    /// Pixel-wise equality. Grids of different shapes are never identical.
    pub fn identical(&self, other: &PixelGrid) -> bool {
        self.dims() == other.dims() && self.pixels == other.pixels
    }

    /**
     * Returns the coordinates of every pixel whose value differs between the two grids.
     */
    pub fn changed_pixels(&self, other: &PixelGrid) -> Result<Vec<(usize, usize)>> {
        if self.dims() != other.dims() {
            return Err(FingerprintError::DimensionMismatch {
                expected: self.dims(),
                found: other.dims(),
            });
        }
        let width = self.width;
        Ok(self
            .pixels
            .iter()
            .zip(other.pixels.iter())
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .map(|(i, _)| (i / width, i % width))
            .collect())
    }
}
