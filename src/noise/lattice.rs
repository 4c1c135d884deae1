//! Lattice value noise with multi-octave turbulence.

use rand::Rng;

use crate::geometry::GeometryError;

/// A 2D grid of random samples in `[0, 1)` with smooth interpolation.
///
/// The grid is filled once at construction and never changes, so every
/// query is a pure function of its coordinates. Lookups wrap around the
/// grid edges, which makes negative and out-of-range coordinates valid.
#[derive(Debug, Clone, PartialEq)]
pub struct NoiseField {
    width: usize,
    height: usize,
    lattice: Vec<f32>,
}

fn lattice_extent(extent: f32) -> usize {
    if extent.is_finite() && extent >= 1.0 {
        extent.ceil() as usize
    } else {
        1
    }
}

impl NoiseField {
    /// Creates a field covering `width × height` lattice cells.
    ///
    /// Callers typically pass twice the radius of the shape being
    /// displaced, so that coordinates shifted into `[0, 2 * extent)` map
    /// onto distinct cells. Extents are rounded up; anything below one
    /// cell yields a 1×1 lattice.
    ///
    /// # Errors
    /// Returns [`GeometryError::LatticeTooLarge`] if the cell count does not
    /// fit in `usize`.
    pub fn new<R: Rng + ?Sized>(
        width: f32,
        height: f32,
        rng: &mut R,
    ) -> Result<Self, GeometryError> {
        let width = lattice_extent(width);
        let height = lattice_extent(height);
        let cells = width
            .checked_mul(height)
            .ok_or(GeometryError::LatticeTooLarge { width, height })?;
        let lattice = (0..cells).map(|_| rng.random::<f32>()).collect();
        Ok(Self { width, height, lattice })
    }

    /// Lattice dimensions as `(width, height)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn sample(&self, x: i64, y: i64) -> f32 {
        let x = x.rem_euclid(self.width as i64) as usize;
        let y = y.rem_euclid(self.height as i64) as usize;
        self.lattice[y * self.width + x]
    }

    /// Bilinearly interpolated lattice value at `(x, y)`, in `[0, 1)`.
    pub fn smooth_noise(&self, x: f32, y: f32) -> f32 {
        let x0 = x.floor();
        let y0 = y.floor();
        let fx = x - x0;
        let fy = y - y0;
        let (ix, iy) = (x0 as i64, y0 as i64);

        let top = self.sample(ix, iy) * (1.0 - fx) + self.sample(ix + 1, iy) * fx;
        let bottom = self.sample(ix, iy + 1) * (1.0 - fx) + self.sample(ix + 1, iy + 1) * fx;
        top * (1.0 - fy) + bottom * fy
    }

    /// Sums smoothed noise over octaves `scale, scale/2, ...` down to 1.
    ///
    /// Each octave is weighted by its own size, so coarse features dominate
    /// and finer octaves add detail. The result is normalized by `scale`
    /// and lies in `[0, 2)`. Larger `scale` gives smoother variation.
    /// A non-positive or non-finite scale samples a single octave at unit
    /// size.
    pub fn turbulence(&self, x: f32, y: f32, scale: f32) -> f32 {
        if !(scale.is_finite() && scale > 0.0) {
            return self.smooth_noise(x, y);
        }

        let mut value = 0.0f32;
        let mut size = scale;
        loop {
            value += self.smooth_noise(x / size, y / size) * size;
            size /= 2.0;
            if size < 1.0 {
                break;
            }
        }

        value / scale
    }
}
