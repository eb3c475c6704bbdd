/// Second-order moments of a point cloud around an anchor, with `y` pointing up.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Moments {
    pub sxx: f64,
    pub syy: f64,
    pub sxy: f64,
}

impl Moments {
    pub fn add(&mut self, x: f64, y: f64) {
        self.sxx += x * x;
        self.syy += y * y;
        self.sxy += x * y;
    }

    /// Least-squares slope of the line through the origin. Picks the regression
    /// axis with the larger spread so near-vertical clouds stay well conditioned.
    pub fn slope(&self) -> f64 {
        match self.sxx >= self.syy {
            true => self.sxy / self.sxx,
            false => self.syy / self.sxy,
        }
    }
}

/// Counter-clockwise rotation of `(x, y)` about the origin.
pub fn rotate_point(x: f64, y: f64, degrees: f64) -> (f64, f64) {
    let (sin, cos) = degrees.to_radians().sin_cos();
    (x * cos - y * sin, x * sin + y * cos)
}

pub fn normalize_degrees(degrees: i32) -> i32 {
    degrees.rem_euclid(360)
}

/// Smallest angle between two orientations, in `[0, 180]`.
pub fn angular_distance(a: i32, b: i32) -> i32 {
    let d = normalize_degrees(a - b);
    d.min(360 - d)
}
