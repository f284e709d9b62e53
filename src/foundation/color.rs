//! Color model: 8-bit RGB/RGBA, floating-point HSV and the alpha-blend primitive.
//!
//! Colors are **straight alpha** (not premultiplied). Sprites, shaders and frames all exchange
//! [`Rgba`] values.

use crate::foundation::error::{RenderError, RenderResult};
use crate::foundation::math::{DEG_PER_RAD, mul_div255_u16};

/// Opaque 8-bit RGB color.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Create an RGB color.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Attach an alpha channel.
    pub const fn with_alpha(self, a: u8) -> Rgba {
        Rgba::new(self.r, self.g, self.b, a)
    }

    /// Convert to HSV (hue in degrees, saturation/value in `[0, 1]`).
    pub fn to_hsv(self) -> Hsv {
        let (r, g, b) = (f64::from(self.r), f64::from(self.g), f64::from(self.b));
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);

        let v = max / 255.0;
        let s = if max > 0.0 { 1.0 - min / max } else { 0.0 };

        let denom = (r * r + g * g + b * b - r * g - r * b - g * b).sqrt();
        let mut h = if denom > 0.0 {
            ((r - 0.5 * g - 0.5 * b) / denom).clamp(-1.0, 1.0).acos() * DEG_PER_RAD
        } else {
            0.0
        };
        if b > g {
            h = 360.0 - h;
        }

        Hsv { h, s, v }
    }
}

/// 8-bit RGBA color with straight alpha.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Rgba {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (255 is opaque).
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);

    /// Create an RGBA color.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Drop the alpha channel.
    pub const fn rgb(self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }

    /// Replace the alpha channel.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Multiply the color channels by per-channel factors, truncating towards zero.
    ///
    /// Alpha is left untouched.
    pub fn scale_rgb(self, factors: [f64; 3]) -> Self {
        fn scale(c: u8, f: f64) -> u8 {
            (f64::from(c) * f).clamp(0.0, 255.0) as u8
        }

        Self::new(
            scale(self.r, factors[0]),
            scale(self.g, factors[1]),
            scale(self.b, factors[2]),
            self.a,
        )
    }

    /// Channels as a byte array `[r, g, b, a]`.
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Build from a byte array `[r, g, b, a]`.
    pub const fn from_array(px: [u8; 4]) -> Self {
        Self::new(px[0], px[1], px[2], px[3])
    }
}

impl From<Rgb> for Rgba {
    fn from(c: Rgb) -> Self {
        c.with_alpha(255)
    }
}

/// Hue/saturation/value color.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Hsv {
    /// Hue in degrees, nominally `[0, 360)`.
    pub h: f64,
    /// Saturation in `[0, 1]`.
    pub s: f64,
    /// Value in `[0, 1]`.
    pub v: f64,
}

impl Hsv {
    /// Create an HSV color.
    pub const fn new(h: f64, s: f64, v: f64) -> Self {
        Self { h, s, v }
    }

    /// Convert to 8-bit RGB. Channel values are truncated, not rounded.
    pub fn to_rgb(self) -> Rgb {
        let Hsv { h, s, v } = self;
        let max = 255.0 * v;
        let min = max * (1.0 - s);
        let z = (max - min) * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());

        let to_u8 = |x: f64| x.clamp(0.0, 255.0) as u8;
        let (r, g, b) = if h < 60.0 {
            (max, z + min, min)
        } else if h < 120.0 {
            (z + min, max, min)
        } else if h < 180.0 {
            (min, max, z + min)
        } else if h < 240.0 {
            (min, z + min, max)
        } else if h < 300.0 {
            (z + min, min, max)
        } else {
            (max, min, z + min)
        };
        Rgb::new(to_u8(r), to_u8(g), to_u8(b))
    }
}

/// How a foreground fragment is combined with what is already in the output.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    /// The foreground replaces the background regardless of its alpha.
    #[default]
    Replace,
    /// Straight-alpha source-over compositing.
    SourceOver,
}

/// Combine `front` over `back` according to `mode`.
pub fn alpha_blend(front: Rgba, back: Rgba, mode: BlendMode) -> Rgba {
    match mode {
        BlendMode::Replace => front,
        BlendMode::SourceOver => source_over(front, back),
    }
}

fn source_over(front: Rgba, back: Rgba) -> Rgba {
    if front.a == 255 || back.a == 0 {
        return front;
    }
    if front.a == 0 {
        return back;
    }

    if back.a == 255 {
        let fa = u16::from(front.a);
        let inv = 255 - fa;
        let mix = |f: u8, b: u8| {
            (mul_div255_u16(u16::from(f), fa) + mul_div255_u16(u16::from(b), inv)).min(255) as u8
        };
        return Rgba::new(
            mix(front.r, back.r),
            mix(front.g, back.g),
            mix(front.b, back.b),
            255,
        );
    }

    let fa = f64::from(front.a) / 255.0;
    let ba = f64::from(back.a) / 255.0;
    let out_a = fa + ba * (1.0 - fa);
    let mix = |f: u8, b: u8| {
        ((f64::from(f) * fa + f64::from(b) * ba * (1.0 - fa)) / out_a)
            .round()
            .clamp(0.0, 255.0) as u8
    };
    Rgba::new(
        mix(front.r, back.r),
        mix(front.g, back.g),
        mix(front.b, back.b),
        (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
    )
}

/// `"#rrggbb"`, `"#rrggbbaa"`, `[r, g, b]` or `[r, g, b, a]`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum ColorDef {
    Hex(String),
    Channels(Vec<u8>),
}

impl Default for ColorDef {
    fn default() -> Self {
        Self::Channels(vec![0, 0, 0])
    }
}

impl ColorDef {
    pub fn to_rgba(&self) -> RenderResult<Rgba> {
        let bytes = match self {
            Self::Channels(ch) => ch.clone(),
            Self::Hex(s) => parse_hex(s)?,
        };
        match bytes.as_slice() {
            [r, g, b] => Ok(Rgba::new(*r, *g, *b, 255)),
            [r, g, b, a] => Ok(Rgba::new(*r, *g, *b, *a)),
            _ => Err(RenderError::validation(format!(
                "color must have 3 or 4 channels, got {}",
                bytes.len()
            ))),
        }
    }
}

fn parse_hex(s: &str) -> RenderResult<Vec<u8>> {
    let digits = s.strip_prefix('#').unwrap_or(s);
    if !matches!(digits.len(), 6 | 8) || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(RenderError::validation(format!(
            "hex color '{s}' must be #rrggbb or #rrggbbaa"
        )));
    }
    (0..digits.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|e| RenderError::validation(format!("hex color '{s}': {e}")))
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/color.rs"]
mod tests;
