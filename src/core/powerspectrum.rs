//! Turn a point set into a picture of its Fourier power spectrum.
//!
//! The points are rasterized onto a square occupancy grid whose side is
//! a power of two, the grid mean is removed, and the magnitude of the
//! 2D DFT is shifted so that the zero frequency ends up in the center.
//! Magnitudes are scaled so that their mean lands on a brightness of
//! 64 and then clamped to a byte.
//!
//! A well distributed low-discrepancy set shows a dark disk around the
//! center (little low-frequency energy) on a flat noise floor. Clumps
//! light up the low frequencies and lattice structure shows up as
//! isolated bright spots.

// others
use image::{GrayImage, Luma, Rgba, RgbaImage};
use num_complex::Complex64;
use rustfft::FftPlanner;
use tracing::{debug, warn};
// viewpoints
use crate::core::geometry::PointSet;
use crate::core::viewpoints::{
    clamp_t, is_power_of_2, prev_power_of_two, DEFAULT_GRID_SIZE, MAX_GRID_SIZE, TARGET_BRIGHTNESS,
};

/// Square grid of byte intensities, stored row by row.
///
/// Row *r* holds the cells whose u coordinate falls into bucket *r*,
/// column *c* those whose v coordinate falls into bucket *c*; both are
/// already shifted so that the zero frequency sits at `(size/2, size/2)`.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectrumImage {
    pub size: usize,
    pub pixels: Vec<u8>,
}

impl SpectrumImage {
    pub fn width(&self) -> usize {
        self.size
    }
    pub fn height(&self) -> usize {
        self.size
    }
    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.pixels[row * self.size + col]
    }
    pub fn to_luma_image(&self) -> GrayImage {
        GrayImage::from_fn(self.size as u32, self.size as u32, |x, y| {
            Luma([self.get(y as usize, x as usize)])
        })
    }
    /// Opaque gray: equal color channels, full alpha.
    pub fn to_rgba_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.size as u32, self.size as u32, |x, y| {
            let value: u8 = self.get(y as usize, x as usize);
            Rgba([value, value, value, 0xff])
        })
    }
}

/// Pick the FFT grid side for a viewport of *width* x *height* pixels,
/// at most `MAX_GRID_SIZE`.
pub fn grid_size(width: u32, height: u32) -> usize {
    let w: i64 = prev_power_of_two(width.min(height) as i64);
    if w <= 0 {
        DEFAULT_GRID_SIZE
    } else {
        (w as usize).min(MAX_GRID_SIZE)
    }
}

pub struct SpectrumSynthesizer {
    planner: FftPlanner<f64>,
}

impl Default for SpectrumSynthesizer {
    fn default() -> Self {
        SpectrumSynthesizer::new()
    }
}

impl SpectrumSynthesizer {
    pub fn new() -> Self {
        SpectrumSynthesizer {
            planner: FftPlanner::new(),
        }
    }
    /// Spectrum image for a viewport of *target_size* = (width, height).
    /// The result is always square; fitting it into the viewport is up to
    /// the caller.
    pub fn synthesize(&mut self, points: &PointSet, target_size: (u32, u32)) -> SpectrumImage {
        let w: usize = grid_size(target_size.0, target_size.1);
        debug!(w, n = points.len(), "synthesizing power spectrum");
        let mut grid: Vec<Complex64> = rasterize(points, w);
        remove_mean(&mut grid);
        self.fft_2d(&mut grid, w);
        let magnitude: Vec<f64> = fft_shift(&grid, w)
            .iter()
            .map(|c| c.norm())
            .collect();
        SpectrumImage {
            size: w,
            pixels: normalize(&magnitude),
        }
    }
    /// In-place forward 2D DFT of a row-major *w* x *w* grid: all rows,
    /// then all columns.
    fn fft_2d(&mut self, grid: &mut [Complex64], w: usize) {
        debug_assert!(is_power_of_2(w));
        let fft = self.planner.plan_fft_forward(w);
        // rustfft processes consecutive chunks of length w
        fft.process(grid);
        let mut column: Vec<Complex64> = vec![Complex64::new(0.0, 0.0); w];
        for c in 0..w {
            for r in 0..w {
                column[r] = grid[r * w + c];
            }
            fft.process(&mut column);
            for r in 0..w {
                grid[r * w + c] = column[r];
            }
        }
    }
}

/// Occupancy grid: a cell is 1 if at least one point falls into it.
/// Points outside [0, 1)^2 are dropped.
fn rasterize(points: &PointSet, w: usize) -> Vec<Complex64> {
    let mut grid: Vec<Complex64> = vec![Complex64::new(0.0, 0.0); w * w];
    let mut dropped: usize = 0;
    for p in points {
        if !p.inside_unit_square() {
            dropped += 1;
            continue;
        }
        let row: usize = ((p.x as f64 * w as f64) as usize).min(w - 1);
        let col: usize = ((p.y as f64 * w as f64) as usize).min(w - 1);
        grid[row * w + col] = Complex64::new(1.0, 0.0);
    }
    if dropped > 0 {
        debug!(dropped, "points outside the unit square");
    }
    grid
}

fn remove_mean(grid: &mut [Complex64]) {
    if grid.is_empty() {
        return;
    }
    let mean: f64 = grid.iter().map(|c| c.re).sum::<f64>() / grid.len() as f64;
    for c in grid.iter_mut() {
        c.re -= mean;
    }
}

/// Move the zero frequency from (0, 0) to (w/2, w/2).
fn fft_shift(grid: &[Complex64], w: usize) -> Vec<Complex64> {
    let half: usize = w / 2;
    let mut shifted: Vec<Complex64> = vec![Complex64::new(0.0, 0.0); w * w];
    for r in 0..w {
        for c in 0..w {
            shifted[((r + half) % w) * w + (c + half) % w] = grid[r * w + c];
        }
    }
    shifted
}

/// Scale so the mean magnitude maps to `TARGET_BRIGHTNESS`, clamp to
/// [0, 255] and truncate. A grid without energy stays black.
fn normalize(magnitude: &[f64]) -> Vec<u8> {
    if magnitude.is_empty() {
        return Vec::new();
    }
    let mean: f64 = magnitude.iter().sum::<f64>() / magnitude.len() as f64;
    if !(mean > 0.0_f64) || !mean.is_finite() {
        warn!("power spectrum without energy, emitting a black image");
        return vec![0_u8; magnitude.len()];
    }
    let scale: f64 = TARGET_BRIGHTNESS / mean;
    magnitude
        .iter()
        .map(|m| clamp_t(m * scale, 0.0_f64, 255.0_f64) as u8)
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::geometry::Point2f;
    use crate::core::viewpoints::Float;

    fn stratified(n: usize) -> PointSet {
        let mut points: Vec<Point2f> = Vec::with_capacity(n * n);
        for i in 0..n {
            for j in 0..n {
                points.push(Point2f {
                    x: (i as Float + 0.5) / n as Float,
                    y: (j as Float + 0.5) / n as Float,
                });
            }
        }
        PointSet::new(points)
    }

    #[test]
    fn grid_size_is_largest_power_of_two_in_viewport() {
        assert_eq!(grid_size(512, 512), 512);
        assert_eq!(grid_size(800, 600), 512);
        assert_eq!(grid_size(300, 1000), 256);
        assert_eq!(grid_size(1, 7), 1);
    }

    #[test]
    fn grid_size_falls_back_for_empty_viewport() {
        assert_eq!(grid_size(0, 0), DEFAULT_GRID_SIZE);
        assert_eq!(grid_size(640, 0), DEFAULT_GRID_SIZE);
    }

    #[test]
    fn grid_size_is_capped_for_huge_viewports() {
        assert_eq!(grid_size(u32::MAX, u32::MAX), MAX_GRID_SIZE);
        assert_eq!(grid_size(20000, 9000), MAX_GRID_SIZE);
        assert_eq!(grid_size(8191, 20000), 4096);
    }

    #[test]
    fn empty_set_gives_black_image() {
        let mut synthesizer = SpectrumSynthesizer::new();
        for &size in &[(64, 64), (100, 37), (0, 0), (1, 1)] {
            let image = synthesizer.synthesize(&PointSet::default(), size);
            let w = grid_size(size.0, size.1);
            assert_eq!(image.size, w);
            assert_eq!(image.pixels.len(), w * w);
            assert!(image.pixels.iter().all(|p| *p == 0));
        }
    }

    #[test]
    fn image_is_square_power_of_two() {
        let mut synthesizer = SpectrumSynthesizer::new();
        let points = stratified(8);
        for &(width, height) in &[(64, 48), (33, 200), (128, 128), (5, 3)] {
            let image = synthesizer.synthesize(&points, (width, height));
            assert_eq!(image.width(), image.height());
            assert!(is_power_of_2(image.size));
            assert!(image.size as u32 <= width.min(height));
            assert_eq!(image.pixels.len(), image.size * image.size);
        }
    }

    #[test]
    fn full_grid_has_no_energy() {
        // every cell occupied: nothing left after removing the mean
        let mut synthesizer = SpectrumSynthesizer::new();
        let image = synthesizer.synthesize(&stratified(16), (16, 16));
        assert_eq!(image.size, 16);
        assert!(image.pixels.iter().all(|p| *p == 0));
    }

    #[test]
    fn out_of_range_points_are_dropped() {
        let mut synthesizer = SpectrumSynthesizer::new();
        let inside = PointSet::from(vec![(0.25, 0.5), (0.75, 0.125)]);
        let mut with_outliers = inside.clone();
        with_outliers.points.push(Point2f { x: 1.0, y: 0.5 });
        with_outliers.points.push(Point2f { x: -0.5, y: 0.5 });
        with_outliers.points.push(Point2f { x: 0.5, y: 2.0 });
        assert_eq!(
            synthesizer.synthesize(&inside, (32, 32)),
            synthesizer.synthesize(&with_outliers, (32, 32))
        );
    }

    #[test]
    fn dc_is_removed() {
        let mut synthesizer = SpectrumSynthesizer::new();
        let points = PointSet::from(vec![(0.1, 0.2), (0.6, 0.3), (0.4, 0.9)]);
        let image = synthesizer.synthesize(&points, (16, 16));
        assert_eq!(image.get(8, 8), 0);
        assert!(image.pixels.iter().any(|p| *p > 0));
    }

    #[test]
    fn single_point_spectrum_is_flat() {
        // a lone impulse has |F| = 1 everywhere except the removed DC
        // term; mean = (w^2 - 1) / w^2, so each cell is 64 * w^2 / (w^2 - 1)
        let mut synthesizer = SpectrumSynthesizer::new();
        let points = PointSet::from(vec![(0.3, 0.7)]);
        let image = synthesizer.synthesize(&points, (8, 8));
        let w = image.size;
        for r in 0..w {
            for c in 0..w {
                if r == w / 2 && c == w / 2 {
                    assert_eq!(image.get(r, c), 0);
                } else {
                    assert_eq!(image.get(r, c), 65);
                }
            }
        }
    }

    #[test]
    fn lattice_shows_bright_peaks() {
        // a 4x4 lattice on a 16x16 grid only has energy at multiples of 4
        let mut synthesizer = SpectrumSynthesizer::new();
        let image = synthesizer.synthesize(&stratified(4), (16, 16));
        assert_eq!(image.get(8, 9), 0);
        assert_eq!(image.get(8, 12), 255);
        assert_eq!(image.get(12, 8), 255);
        assert_eq!(image.get(8, 8), 0);
    }

    #[test]
    fn rgba_image_is_opaque_gray() {
        let mut synthesizer = SpectrumSynthesizer::new();
        let points = PointSet::from(vec![(0.1, 0.2), (0.6, 0.3), (0.4, 0.9)]);
        let image = synthesizer.synthesize(&points, (16, 16));
        let rgba = image.to_rgba_image();
        assert_eq!(rgba.dimensions(), (16, 16));
        for (x, y, pixel) in rgba.enumerate_pixels() {
            let value = image.get(y as usize, x as usize);
            assert_eq!(pixel.0, [value, value, value, 0xff]);
        }
        let luma = image.to_luma_image();
        assert_eq!(luma.get_pixel(3, 5).0[0], image.get(5, 3));
    }
}
