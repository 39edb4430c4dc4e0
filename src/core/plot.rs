//! Raster pictures for a front end: the point set drawn over a
//! reference grid, and the spectrum fitted into a viewport.

// others
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
// viewpoints
use crate::core::geometry::PointSet;
use crate::core::powerspectrum::SpectrumImage;
use crate::core::viewpoints::Float;

const BACKGROUND: Rgba<u8> = Rgba([0xff, 0xff, 0xff, 0xff]);
const POINTS: Rgba<u8> = Rgba([0x00, 0x00, 0x00, 0xff]);
const OUTLINE: Rgba<u8> = Rgba([0xa0, 0xa0, 0xa4, 0xff]);
const GRID_MINOR: Rgba<u8> = Rgba([0xd3, 0xd3, 0xd3, 0xff]);
const GRID_MAJOR: Rgba<u8> = Rgba([0xa0, 0xa0, 0xa4, 0xff]);

/// Distance between the plot square and the view border.
pub const PLOT_MARGIN: u32 = 31;
/// Distance of the axis tick marks from the plot square.
pub const TICK_OFFSET: u32 = 10;

/// Subdivision of the reference grid: (cells per side, cells per major
/// line). Base 5 sequences get a 25x25 grid, everything else 16x16.
pub fn grid_divisions(family: &str) -> (u32, u32) {
    if family.starts_with("faure05") {
        (25, 5)
    } else {
        (16, 4)
    }
}

struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    fn put(&mut self, x: i64, y: i64, color: Rgba<u8>) {
        if x >= 0
            && y >= 0
            && x < i64::from(self.image.width())
            && y < i64::from(self.image.height())
        {
            self.image.put_pixel(x as u32, y as u32, color);
        }
    }
    fn hline(&mut self, x0: i64, x1: i64, y: i64, color: Rgba<u8>) {
        for x in x0..=x1 {
            self.put(x, y, color);
        }
    }
    fn vline(&mut self, x: i64, y0: i64, y1: i64, color: Rgba<u8>) {
        for y in y0..=y1 {
            self.put(x, y, color);
        }
    }
    /// 3x3 pixel dot.
    fn dot(&mut self, x: i64, y: i64, color: Rgba<u8>) {
        for dy in -1..=1 {
            for dx in -1..=1 {
                self.put(x + dx, y + dy, color);
            }
        }
    }
}

/// Draw *points* into a *width* x *height* view. The plot square is
/// centered, u grows to the right and v grows upwards; every point also
/// leaves a tick mark on the top and left margins.
pub fn render_points(points: &PointSet, family: &str, width: u32, height: u32) -> RgbaImage {
    let mut canvas = Canvas {
        image: RgbaImage::from_pixel(width, height, BACKGROUND),
    };
    let w: u32 = width.min(height);
    if w <= 2 * PLOT_MARGIN {
        return canvas.image;
    }
    let s: Float = (w - 2 * PLOT_MARGIN) as Float;
    let ox: Float = (width - w) as Float / 2.0;
    let oy: Float = (height - w) as Float / 2.0;
    let s0: Float = (w as Float - s) / 2.0;
    let s1: Float = s0 + s;
    let to_x = |u: Float| (ox + (u - 0.5) * s + w as Float / 2.0) as i64;
    let to_y = |v: Float| (oy + (0.5 - v) * s + w as Float / 2.0) as i64;
    // grid
    let (divisions, major) = grid_divisions(family);
    for i in 1..divisions {
        let color = if i % major == 0 { GRID_MAJOR } else { GRID_MINOR };
        let su: Float = s0 + i as Float / divisions as Float * s;
        canvas.vline((ox + su) as i64, (oy + s0) as i64, (oy + s1) as i64, color);
        canvas.hline((ox + s0) as i64, (ox + s1) as i64, (oy + su) as i64, color);
    }
    // outline
    let (left, top) = ((ox + s0) as i64, (oy + s0) as i64);
    let (right, bottom) = ((ox + s1) as i64, (oy + s1) as i64);
    canvas.hline(left, right, top, OUTLINE);
    canvas.hline(left, right, bottom, OUTLINE);
    canvas.vline(left, top, bottom, OUTLINE);
    canvas.vline(right, top, bottom, OUTLINE);
    // points and their projections onto the margins
    let tick: Float = s0 - TICK_OFFSET as Float;
    for p in points {
        if p.has_nans() {
            continue;
        }
        canvas.put((ox + tick) as i64, to_y(p.y), POINTS);
        canvas.put(to_x(p.x), (oy + tick) as i64, POINTS);
        canvas.dot(to_x(p.x), to_y(p.y), POINTS);
    }
    canvas.image
}

/// Scale the square spectrum to the largest size that fits into
/// *width* x *height* and center it.
pub fn fit_spectrum(spectrum: &SpectrumImage, width: u32, height: u32) -> RgbaImage {
    let mut view = RgbaImage::from_pixel(width, height, BACKGROUND);
    let side: u32 = width.min(height);
    if side == 0 || spectrum.size == 0 {
        return view;
    }
    let scaled = imageops::resize(&spectrum.to_rgba_image(), side, side, FilterType::Nearest);
    let x: i64 = ((width - side) / 2) as i64;
    let y: i64 = ((height - side) / 2) as i64;
    imageops::overlay(&mut view, &scaled, x, y);
    view
}
