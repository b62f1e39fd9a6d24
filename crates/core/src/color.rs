//! Color types used by drawing surfaces.
//!
//! [`Srgb`] is an opaque color with components in [0, 1]. [`Rgba`] and
//! [`Hsla`] are the two translucent paint forms a [`Surface`](crate::Surface)
//! accepts, wrapped together as [`Color`]. Both render to CSS strings for the
//! browser canvas and resolve to sRGB + alpha for the CPU raster.

/// sRGB color with components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Srgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Srgb {
    pub const BLACK: Srgb = Srgb {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    pub const WHITE: Srgb = Srgb {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    /// Quantizes to 8-bit channels with rounding, clamping out-of-range values.
    pub fn to_rgb8(self) -> [u8; 3] {
        let q = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b)]
    }

    /// Relative luminance-like brightness (Rec. 709 weights on sRGB values).
    pub fn brightness(self) -> f64 {
        0.2126 * self.r + 0.7152 * self.g + 0.0722 * self.b
    }

    /// Source-over compositing of `src` at opacity `alpha` onto `self`.
    pub fn blend(self, src: Srgb, alpha: f64) -> Srgb {
        let a = alpha.clamp(0.0, 1.0);
        Srgb {
            r: src.r * a + self.r * (1.0 - a),
            g: src.g * a + self.g * (1.0 - a),
            b: src.b * a + self.b * (1.0 - a),
        }
    }
}

/// Translucent RGB paint, as in CSS `rgba(r, g, b, a)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub rgb: Srgb,
    pub alpha: f64,
}

impl Rgba {
    /// Builds a paint from 8-bit channels and an alpha in [0, 1].
    pub fn new(r: u8, g: u8, b: u8, alpha: f64) -> Self {
        Self {
            rgb: Srgb {
                r: r as f64 / 255.0,
                g: g as f64 / 255.0,
                b: b as f64 / 255.0,
            },
            alpha: alpha.clamp(0.0, 1.0),
        }
    }

    pub fn to_css(self) -> String {
        let [r, g, b] = self.rgb.to_rgb8();
        format!("rgba({r}, {g}, {b}, {})", self.alpha)
    }
}

/// Translucent HSL paint, as in CSS `hsla(h, s%, l%, a)`.
///
/// `hue` is in degrees; `saturation` and `lightness` are percentages in
/// [0, 100]; `alpha` is in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsla {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
    pub alpha: f64,
}

impl Hsla {
    pub fn new(hue: f64, saturation: f64, lightness: f64, alpha: f64) -> Self {
        Self {
            hue,
            saturation,
            lightness,
            alpha,
        }
    }

    pub fn to_css(self) -> String {
        format!(
            "hsla({}, {}%, {}%, {})",
            self.hue, self.saturation, self.lightness, self.alpha
        )
    }

    /// Resolves the HSL triple to sRGB. Alpha is dropped.
    pub fn to_srgb(self) -> Srgb {
        hsl_to_srgb(self.hue, self.saturation / 100.0, self.lightness / 100.0)
    }
}

/// A paint accepted by [`Surface`](crate::Surface) fill operations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Color {
    Rgba(Rgba),
    Hsla(Hsla),
}

impl Color {
    /// CSS color string suitable for a canvas `fillStyle`.
    pub fn to_css(self) -> String {
        match self {
            Color::Rgba(c) => c.to_css(),
            Color::Hsla(c) => c.to_css(),
        }
    }

    /// Opaque color and alpha used for compositing.
    pub fn resolve(self) -> (Srgb, f64) {
        match self {
            Color::Rgba(c) => (c.rgb, c.alpha.clamp(0.0, 1.0)),
            Color::Hsla(c) => (c.to_srgb(), c.alpha.clamp(0.0, 1.0)),
        }
    }

    pub fn alpha(self) -> f64 {
        self.resolve().1
    }
}

impl From<Rgba> for Color {
    fn from(c: Rgba) -> Self {
        Color::Rgba(c)
    }
}

impl From<Hsla> for Color {
    fn from(c: Hsla) -> Self {
        Color::Hsla(c)
    }
}

/// Converts hue (degrees), saturation and lightness (both in [0, 1]) to sRGB.
///
/// Hue wraps modulo 360; saturation and lightness are clamped.
pub fn hsl_to_srgb(hue: f64, saturation: f64, lightness: f64) -> Srgb {
    let h = hue.rem_euclid(360.0) / 60.0;
    let s = saturation.clamp(0.0, 1.0);
    let l = lightness.clamp(0.0, 1.0);

    let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = l - chroma / 2.0;
    Srgb {
        r: r + m,
        g: g + m,
        b: b + m,
    }
}
