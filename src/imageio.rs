use image::{GrayImage, Luma, Rgb, RgbImage};

use crate::error::Result;
use crate::fingerprint::Signature;
use crate::grid::PixelGrid;
use crate::thinning::SnapshotCollector;

/// Gray levels below this are ridge pixels.
pub const LUMA_THRESHOLD: u8 = 128;

pub const RED: Rgb<u8> = Rgb([255, 0, 0]);
pub const GREEN: Rgb<u8> = Rgb([0, 200, 0]);
const RIDGE: Rgb<u8> = Rgb([0, 0, 0]);
const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);

/// Reads an image file as a binary grid.
pub fn load(path: &str) -> Result<PixelGrid> {
    let gray = image::open(path)?.to_luma8();
    Ok(from_luma(&gray))
}

pub fn from_luma(gray: &GrayImage) -> PixelGrid {
    PixelGrid::from_fn(gray.height() as usize, gray.width() as usize, |row, col| {
        gray.get_pixel(col as u32, row as u32).0[0] < LUMA_THRESHOLD
    })
}

pub fn to_luma(grid: &PixelGrid) -> GrayImage {
    GrayImage::from_fn(grid.width() as u32, grid.height() as u32, |x, y| {
        match grid.is_black(y as i64, x as i64) {
            true => Luma([0]),
            false => Luma([255]),
        }
    })
}

pub fn save(grid: &PixelGrid, path: &str) -> Result<()> {
    to_luma(grid).save(path)?;
    Ok(())
}

/// Color canvas drawn over a grid, used for debug artifacts.
pub struct Overlay {
    pub image: RgbImage,
}

impl Overlay {
    pub fn from_grid(grid: &PixelGrid) -> Self {
        let image = RgbImage::from_fn(grid.width() as u32, grid.height() as u32, |x, y| {
            match grid.is_black(y as i64, x as i64) {
                true => RIDGE,
                false => BACKGROUND,
            }
        });
        Self { image }
    }

    fn paint(&mut self, row: i64, col: i64, color: Rgb<u8>) {
        if row >= 0 && col >= 0 && (row as u32) < self.image.height() && (col as u32) < self.image.width() {
            self.image.put_pixel(col as u32, row as u32, color);
        }
    }

    /// Circle outline around `(row, col)`; parts outside the canvas are dropped.
    pub fn draw_marker(&mut self, row: i64, col: i64, radius: u32, color: Rgb<u8>) {
        let r = radius as i64;
        for dr in -r..=r {
            for dc in -r..=r {
                let d = ((dr * dr + dc * dc) as f64).sqrt();
                if (d - radius as f64).abs() < 0.5 {
                    self.paint(row + dr, col + dc, color);
                }
            }
        }
    }

    /// Segment from `(row, col)` in the direction `angle_degrees`, counter-clockwise
    /// from the positive column axis.
    pub fn draw_ray(&mut self, row: i64, col: i64, angle_degrees: i32, length: u32, color: Rgb<u8>) {
        let (sin, cos) = (angle_degrees as f64).to_radians().sin_cos();
        for t in 0..=length {
            let t = t as f64;
            let r = row as f64 - t * sin;
            let c = col as f64 + t * cos;
            self.paint(r.round() as i64, c.round() as i64, color);
        }
    }

    pub fn save(&self, path: &str) -> Result<()> {
        self.image.save(path)?;
        Ok(())
    }
}

/**
 * Draws every minutia of the signature over its skeleton: a circle at the
 * position and a ray along the orientation.
 */
pub fn annotate(grid: &PixelGrid, signature: &Signature) -> Overlay {
    let mut overlay = Overlay::from_grid(grid);
    for m in signature {
        overlay.draw_marker(m.row() as i64, m.col() as i64, 5, RED);
        overlay.draw_ray(m.row() as i64, m.col() as i64, m.angle(), 10, GREEN);
    }
    overlay
}

/**
 * Lays every collected thinning step side by side, with the pixels each step
 * removed shown in red. Returns `None` when nothing was collected.
 */
pub fn difference_strip(collector: &SnapshotCollector) -> Result<Option<Overlay>> {
    let Some(first) = collector.snapshots.first() else {
        return Ok(None);
    };
    let (height, width) = first.before.dims();
    let mut strip = RgbImage::from_pixel((width * collector.len()) as u32, height as u32, BACKGROUND);

    for (i, snapshot) in collector.snapshots.iter().enumerate() {
        let offset = (i * width) as u32;
        for (row, col) in snapshot.before.iter_black() {
            strip.put_pixel(offset + col as u32, row as u32, RIDGE);
        }
        for (row, col) in snapshot.before.changed_pixels(&snapshot.after)? {
            strip.put_pixel(offset + col as u32, row as u32, RED);
        }
    }
    Ok(Some(Overlay { image: strip }))
}
