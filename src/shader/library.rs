//! Built-in shaders.
//!
//! Each shader is a small parameter struct; its fields are the uniforms captured at definition
//! time. [`ShaderDef`] is the serializable tagged form used by scene description files.

use crate::foundation::color::{ColorDef, Hsv, Rgb, Rgba};
use crate::foundation::error::RenderResult;
use crate::shader::{Fragment, FragmentShader, Shader};

const ESCAPE_RADIUS: f64 = 2.0;

/// Replace every fragment with a constant color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fill {
    /// Output color.
    pub color: Rgba,
}

impl FragmentShader for Fill {
    fn shade(&self, _input: Rgba, _frag: &Fragment) -> Rgba {
        self.color
    }
}

/// Multiply color channels by `color / 255`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tint {
    /// Tint color.
    pub color: Rgb,
}

impl FragmentShader for Tint {
    fn shade(&self, input: Rgba, _frag: &Fragment) -> Rgba {
        input.scale_rgb([
            f64::from(self.color.r) / 255.0,
            f64::from(self.color.g) / 255.0,
            f64::from(self.color.b) / 255.0,
        ])
    }
}

/// Multiply color channels by a scalar.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scale {
    /// Channel multiplier.
    pub factor: f64,
}

impl FragmentShader for Scale {
    fn shade(&self, input: Rgba, _frag: &Fragment) -> Rgba {
        input.scale_rgb([self.factor; 3])
    }
}

/// Invert color channels, keeping alpha.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Invert;

impl FragmentShader for Invert {
    fn shade(&self, input: Rgba, _frag: &Fragment) -> Rgba {
        Rgba::new(255 - input.r, 255 - input.g, 255 - input.b, input.a)
    }
}

/// Rec. 601 luma grayscale.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Grayscale;

impl FragmentShader for Grayscale {
    fn shade(&self, input: Rgba, _frag: &Fragment) -> Rgba {
        let y = 0.299 * f64::from(input.r) + 0.587 * f64::from(input.g) + 0.114 * f64::from(input.b);
        let y = y.round().clamp(0.0, 255.0) as u8;
        Rgba::new(y, y, y, input.a)
    }
}

/// Modulate the input by a fully saturated hue that cycles over time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rainbow {
    /// Hue rotation speed in degrees per second.
    pub degrees_per_sec: f64,
}

impl Default for Rainbow {
    fn default() -> Self {
        Self {
            degrees_per_sec: 180.0,
        }
    }
}

impl FragmentShader for Rainbow {
    fn shade(&self, input: Rgba, frag: &Fragment) -> Rgba {
        let hue = (self.degrees_per_sec * frag.time).rem_euclid(360.0);
        let c = Hsv::new(hue, 1.0, 1.0).to_rgb();
        input.scale_rgb([
            f64::from(c.r) / 255.0,
            f64::from(c.g) / 255.0,
            f64::from(c.b) / 255.0,
        ])
    }
}

/// Escape-time fractal fill over the fragment's normalized coordinate.
///
/// The fragment is mapped into the complex plane as `((coord / res) * aspect - center) / scale`.
/// Points that stay bounded are black; escaping points are colored by their final modulus.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mandelbrot {
    /// Offset subtracted from the normalized coordinate.
    pub center: [f64; 2],
    /// Normalized units per complex unit.
    pub scale: f64,
    /// Iteration cap.
    pub max_iterations: u32,
}

impl Default for Mandelbrot {
    fn default() -> Self {
        Self {
            center: [1.25, 0.5],
            scale: 0.2,
            max_iterations: 100,
        }
    }
}

impl FragmentShader for Mandelbrot {
    fn shade(&self, _input: Rgba, frag: &Fragment) -> Rgba {
        let c = plane_point(frag, self.center, self.scale);
        escape_color(escape_modulus(c, self.max_iterations, |z| z.square()))
    }
}

/// Multibrot fractal whose exponent oscillates over time as `3 cos(t) + 4`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Multibrot {
    /// Offset subtracted from the normalized coordinate.
    pub center: [f64; 2],
    /// Normalized units per complex unit.
    pub scale: f64,
    /// Iteration cap.
    pub max_iterations: u32,
}

impl Default for Multibrot {
    fn default() -> Self {
        let m = Mandelbrot::default();
        Self {
            center: m.center,
            scale: m.scale,
            max_iterations: m.max_iterations,
        }
    }
}

impl FragmentShader for Multibrot {
    fn shade(&self, _input: Rgba, frag: &Fragment) -> Rgba {
        let c = plane_point(frag, self.center, self.scale);
        let exponent = 3.0 * frag.time.cos() + 4.0;
        escape_color(escape_modulus(c, self.max_iterations, |z| z.powf(exponent)))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Complex {
    re: f64,
    im: f64,
}

impl Complex {
    fn norm(self) -> f64 {
        self.re.hypot(self.im)
    }

    fn square(self) -> Self {
        Self {
            re: self.re * self.re - self.im * self.im,
            im: 2.0 * self.re * self.im,
        }
    }

    fn powf(self, e: f64) -> Self {
        let r = self.norm();
        if r == 0.0 {
            return Self { re: 0.0, im: 0.0 };
        }
        let theta = self.im.atan2(self.re) * e;
        let r = r.powf(e);
        Self {
            re: r * theta.cos(),
            im: r * theta.sin(),
        }
    }

    fn offset(self, o: Self) -> Self {
        Self {
            re: self.re + o.re,
            im: self.im + o.im,
        }
    }
}

fn plane_point(frag: &Fragment, center: [f64; 2], scale: f64) -> Complex {
    let res = frag.resolution;
    let w = f64::from(res.width.max(1));
    let h = f64::from(res.height.max(1));
    let x = f64::from(frag.coord.x) / w * (w / h);
    let y = f64::from(frag.coord.y) / h;
    Complex {
        re: (x - center[0]) / scale,
        im: (y - center[1]) / scale,
    }
}

fn escape_modulus(c: Complex, max_iterations: u32, step: impl Fn(Complex) -> Complex) -> f64 {
    let mut z = c;
    let mut its = 0u32;
    loop {
        let m = z.norm();
        if m >= ESCAPE_RADIUS || its >= max_iterations {
            return m;
        }
        its += 1;
        z = step(z).offset(c);
    }
}

fn escape_color(modulus: f64) -> Rgba {
    if modulus < ESCAPE_RADIUS {
        Rgba::BLACK
    } else {
        Hsv::new(modulus * 5.0, 1.0, 1.0).to_rgb().with_alpha(255)
    }
}

/// Serializable description of a built-in shader.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShaderDef {
    /// [`Fill`].
    Fill {
        /// Output color.
        color: ColorDef,
    },
    /// [`Tint`].
    Tint {
        /// Tint color; alpha is ignored.
        color: ColorDef,
    },
    /// [`Scale`].
    Scale {
        /// Channel multiplier.
        factor: f64,
    },
    /// [`Invert`].
    Invert,
    /// [`Grayscale`].
    Grayscale,
    /// [`Rainbow`].
    Rainbow {
        /// Hue rotation speed in degrees per second.
        #[serde(default = "default_rainbow_speed")]
        degrees_per_sec: f64,
    },
    /// [`Mandelbrot`] with default framing.
    Mandelbrot,
    /// [`Multibrot`] with default framing.
    Multibrot,
}

fn default_rainbow_speed() -> f64 {
    Rainbow::default().degrees_per_sec
}

impl ShaderDef {
    /// Build the shader this definition describes. Fails on a malformed color.
    pub fn to_shader(&self) -> RenderResult<Shader> {
        Ok(match self {
            Self::Fill { color } => Shader::new(Fill {
                color: color.to_rgba()?,
            }),
            Self::Tint { color } => Shader::new(Tint {
                color: color.to_rgba()?.rgb(),
            }),
            Self::Scale { factor } => Shader::new(Scale { factor: *factor }),
            Self::Invert => Shader::new(Invert),
            Self::Grayscale => Shader::new(Grayscale),
            Self::Rainbow { degrees_per_sec } => Shader::new(Rainbow {
                degrees_per_sec: *degrees_per_sec,
            }),
            Self::Mandelbrot => Shader::new(Mandelbrot::default()),
            Self::Multibrot => Shader::new(Multibrot::default()),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shader/library.rs"]
mod tests;
