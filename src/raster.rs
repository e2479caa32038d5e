//! Software rasterizer over a packed pixel buffer
//!
//! `Canvas` borrows the buffer owned by the windowing layer for the length of
//! one render call. Pixels are stored B, G, R followed by an optional unused
//! fourth byte, matching the little-endian layout of SDL's RGB888 format.

use crate::error::RenderError;

// ============================================================================
// Color
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Grayscale color (same value for R, G, B)
    #[inline]
    pub const fn gray(v: u8) -> Self {
        Self::rgb(v, v, v)
    }
}

/// Write a pixel's three color bytes in B, G, R order
#[inline]
fn write_pixel(dest: &mut [u8], color: Color) {
    dest[0] = color.b;
    dest[1] = color.g;
    dest[2] = color.r;
}

/// Signed offsets 0, ±1, ... up to `range` inclusive, keeping only those
/// where `start + offset` lands in `[0, limit)`
fn clipped_steps(start: i64, range: i64, limit: i64) -> impl Iterator<Item = i64> {
    let sign = range.signum();
    let (lo, hi) = if sign >= 0 {
        ((-start).max(0), range.abs().min(limit - 1 - start))
    } else {
        ((start - (limit - 1)).max(0), range.abs().min(start))
    };
    (lo..=hi).map(move |k| k * sign)
}

// ============================================================================
// Canvas
// ============================================================================

/// Mutable view of a rectangular pixel buffer
pub struct Canvas<'a> {
    pixels: &'a mut [u8],
    width: u32,
    height: u32,
    stride: usize,
    bytes_per_pixel: usize,
}

impl<'a> Canvas<'a> {
    /// Wrap a raw buffer. `stride` is the byte length of one row.
    pub fn new(
        pixels: &'a mut [u8],
        width: u32,
        height: u32,
        stride: usize,
        bytes_per_pixel: usize,
    ) -> Result<Self, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::Surface(format!(
                "canvas must be non-empty, got {}x{}",
                width, height
            )));
        }
        if bytes_per_pixel != 3 && bytes_per_pixel != 4 {
            return Err(RenderError::Surface(format!(
                "unsupported pixel size of {} bytes",
                bytes_per_pixel
            )));
        }
        if stride < width as usize * bytes_per_pixel {
            return Err(RenderError::Surface(format!(
                "stride {} too small for {} pixels of {} bytes",
                stride, width, bytes_per_pixel
            )));
        }
        let required = height as usize * stride;
        if pixels.len() < required {
            return Err(RenderError::Surface(format!(
                "buffer holds {} bytes, canvas needs {}",
                pixels.len(),
                required
            )));
        }

        Ok(Self {
            pixels,
            width,
            height,
            stride,
            bytes_per_pixel,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    #[inline]
    pub fn bytes_per_pixel(&self) -> usize {
        self.bytes_per_pixel
    }

    /// Total bytes covered by the canvas rows
    #[inline]
    pub fn byte_len(&self) -> usize {
        self.height as usize * self.stride
    }

    /// Check if coordinates are within bounds
    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32
    }

    /// Calculate byte offset for pixel at (x, y)
    #[inline]
    fn pixel_index(&self, x: u32, y: u32) -> usize {
        y as usize * self.stride + x as usize * self.bytes_per_pixel
    }

    /// Zero every byte of every row, padding included
    pub fn clear(&mut self) {
        let len = self.byte_len();
        self.pixels[..len].fill(0);
    }

    /// Set a single pixel, failing on coordinates outside the canvas
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) -> Result<(), RenderError> {
        if self.plot(x, y, color) {
            Ok(())
        } else {
            Err(RenderError::OutOfRangeCoordinate {
                x,
                y,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Clipped write. Returns whether the pixel was inside the canvas.
    #[inline]
    fn plot(&mut self, x: i32, y: i32, color: Color) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        let idx = self.pixel_index(x as u32, y as u32);
        write_pixel(&mut self.pixels[idx..idx + 3], color);
        true
    }

    /// Read a pixel from the buffer (bounds checked)
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Color> {
        if !self.in_bounds(x, y) {
            return None;
        }
        let idx = self.pixel_index(x as u32, y as u32);
        Some(Color::rgb(
            self.pixels[idx + 2],
            self.pixels[idx + 1],
            self.pixels[idx],
        ))
    }

    /// Draw a straight segment with a DDA scan along the major axis.
    ///
    /// Both endpoints are included. The minor coordinate is `start + slope * i`
    /// rounded down. A zero-length segment draws nothing. Steps whose major
    /// coordinate falls off the canvas are skipped before the scan, and the
    /// minor coordinate is clipped per pixel.
    pub fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Color) {
        let (x1, y1, x2, y2) = (x1 as i64, y1 as i64, x2 as i64, y2 as i64);
        let dx = x2 - x1;
        let dy = y2 - y1;
        if dx == 0 && dy == 0 {
            return;
        }
        let width = self.width as f64;
        let height = self.height as f64;

        if dx.abs() < dy.abs() {
            let slope = dx as f64 / dy as f64;
            for i in clipped_steps(y1, dy, self.height as i64) {
                let x = (x1 as f64 + slope * i as f64).floor();
                if x >= 0.0 && x < width {
                    self.plot(x as i32, (y1 + i) as i32, color);
                }
            }
        } else {
            let slope = dy as f64 / dx as f64;
            for i in clipped_steps(x1, dx, self.width as i64) {
                let y = (y1 as f64 + slope * i as f64).floor();
                if y >= 0.0 && y < height {
                    self.plot((x1 + i) as i32, y as i32, color);
                }
            }
        }
    }

    /// Fill a disk around (cx, cy).
    ///
    /// Scans the `(2r-1) x (2r-1)` box and keeps pixels strictly closer than
    /// `radius - 1` to the center, so the outermost ring of the nominal radius
    /// is never drawn. Self-clipping.
    pub fn draw_point(&mut self, cx: i32, cy: i32, radius: i32, color: Color) {
        if radius <= 1 {
            return;
        }
        let reach = radius - 1;
        let limit = reach as f64;

        for py in (cy - reach)..=(cy + reach) {
            for px in (cx - reach)..=(cx + reach) {
                if !self.in_bounds(px, py) {
                    continue;
                }
                let dx = (px - cx) as f64;
                let dy = (py - cy) as f64;
                if (dx * dx + dy * dy).sqrt() < limit {
                    self.plot(px, py, color);
                }
            }
        }
    }
}
