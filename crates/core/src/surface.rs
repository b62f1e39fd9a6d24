//! Drawing surfaces.
//!
//! A [`Surface`] exposes the two primitives the animation needs: filling an
//! axis-aligned rectangle and filling a circle, each with a translucent
//! [`Color`]. Presentation (double buffering, vsync) belongs to the host.
//!
//! Two implementations live here:
//! - [`RasterSurface`]: a CPU pixel buffer with source-over compositing, used
//!   by the headless renderer and for checking pixel-level behavior.
//! - [`RecordingSurface`]: records every call as a [`DrawCommand`], used to
//!   check draw order and paint parameters.

use crate::color::{Color, Srgb};
use crate::error::FlowError;

/// Drawing primitives consumed by the animation.
///
/// Coordinates are in surface units with the origin at the top-left corner.
/// Painting outside the surface is clipped, never an error.
pub trait Surface {
    /// Surface width in surface units.
    fn width(&self) -> f64;

    /// Surface height in surface units.
    fn height(&self) -> f64;

    /// Fills the rectangle `[x, x + w) x [y, y + h)`.
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color);

    /// Fills a circle of `radius` centered at `(x, y)`.
    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color);
}

/// Largest pixel count a [`RasterSurface`] accepts (an 8K UHD frame).
pub const MAX_PIXELS: usize = 7680 * 4320;

/// CPU pixel buffer with an opaque background.
///
/// Each pixel is an [`Srgb`] value; fills composite source-over in sRGB space
/// the way a 2D canvas does. A pixel is covered by a shape when its center
/// lies inside it. A circle too small to cover any pixel center still paints
/// the pixel containing its center, so sub-pixel dots stay visible.
#[derive(Debug, Clone)]
pub struct RasterSurface {
    width: usize,
    height: usize,
    pixels: Vec<Srgb>,
}

impl RasterSurface {
    /// Creates a surface filled with `background`.
    ///
    /// Returns `FlowError::InvalidDimensions` if either dimension is zero or
    /// if `width * height` exceeds [`MAX_PIXELS`].
    pub fn new(width: usize, height: usize, background: Srgb) -> Result<Self, FlowError> {
        if width == 0 || height == 0 {
            return Err(FlowError::InvalidDimensions);
        }
        let len = width
            .checked_mul(height)
            .filter(|&len| len <= MAX_PIXELS)
            .ok_or(FlowError::InvalidDimensions)?;
        Ok(Self {
            width,
            height,
            pixels: vec![background; len],
        })
    }

    /// Width in pixels.
    pub fn pixel_width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn pixel_height(&self) -> usize {
        self.height
    }

    /// Color of the pixel at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Srgb> {
        (x < self.width && y < self.height).then(|| self.pixels[y * self.width + x])
    }

    /// Read-only access to the row-major pixel data.
    pub fn pixels(&self) -> &[Srgb] {
        &self.pixels
    }

    /// Replaces every pixel with `color`.
    pub fn clear(&mut self, color: Srgb) {
        self.pixels.fill(color);
    }

    /// Mean brightness over all pixels, in [0, 1].
    pub fn mean_brightness(&self) -> f64 {
        self.pixels.iter().map(|p| p.brightness()).sum::<f64>() / self.pixels.len() as f64
    }

    /// Quantizes the surface to an RGBA8 buffer (alpha always 255).
    ///
    /// The buffer length is `width * height * 4`.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|p| {
                let [r, g, b] = p.to_rgb8();
                [r, g, b, 255u8]
            })
            .collect()
    }

    /// Pixel index range `[lo, hi)` whose centers fall in `[start, end)`.
    fn covered_span(start: f64, end: f64, limit: usize) -> (usize, usize) {
        let lo = (start - 0.5).ceil().max(0.0);
        let hi = (end - 0.5).ceil().max(0.0);
        (
            (lo as usize).min(limit),
            (hi as usize).min(limit),
        )
    }

    fn blend_at(&mut self, x: usize, y: usize, src: Srgb, alpha: f64) {
        let idx = y * self.width + x;
        self.pixels[idx] = self.pixels[idx].blend(src, alpha);
    }
}

impl Surface for RasterSurface {
    fn width(&self) -> f64 {
        self.width as f64
    }

    fn height(&self) -> f64 {
        self.height as f64
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color) {
        if !(x.is_finite() && y.is_finite() && w.is_finite() && h.is_finite()) {
            return;
        }
        let (src, alpha) = color.resolve();
        let (x0, x1) = Self::covered_span(x, x + w, self.width);
        let (y0, y1) = Self::covered_span(y, y + h, self.height);
        for py in y0..y1 {
            for px in x0..x1 {
                self.blend_at(px, py, src, alpha);
            }
        }
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color) {
        if !(x.is_finite() && y.is_finite() && radius.is_finite()) || radius <= 0.0 {
            return;
        }
        let (src, alpha) = color.resolve();
        let (x0, x1) = Self::covered_span(x - radius, x + radius, self.width);
        let (y0, y1) = Self::covered_span(y - radius, y + radius, self.height);
        let r2 = radius * radius;
        let mut painted = false;
        for py in y0..y1 {
            for px in x0..x1 {
                let dx = px as f64 + 0.5 - x;
                let dy = py as f64 + 0.5 - y;
                if dx * dx + dy * dy <= r2 {
                    self.blend_at(px, py, src, alpha);
                    painted = true;
                }
            }
        }
        if !painted && x >= 0.0 && y >= 0.0 {
            let (px, py) = (x.floor() as usize, y.floor() as usize);
            if px < self.width && py < self.height {
                self.blend_at(px, py, src, alpha);
            }
        }
    }
}

/// A single recorded surface call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Rect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        color: Color,
    },
    Circle {
        x: f64,
        y: f64,
        radius: f64,
        color: Color,
    },
}

/// Surface that records calls instead of painting.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: f64,
    height: f64,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    /// All recorded commands in call order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Recorded circle fills, in call order.
    pub fn circles(&self) -> impl Iterator<Item = &DrawCommand> + '_ {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
    }

    /// Recorded rectangle fills, in call order.
    pub fn rects(&self) -> impl Iterator<Item = &DrawCommand> + '_ {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Rect { .. }))
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color) {
        self.commands.push(DrawCommand::Rect { x, y, w, h, color });
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color) {
        self.commands.push(DrawCommand::Circle {
            x,
            y,
            radius,
            color,
        });
    }
}
