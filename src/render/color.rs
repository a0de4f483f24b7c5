//! RGBA8 colour value shared by tiles, textures and the framebuffer.

/// 8-bit RGBA colour. `repr(C)` so a `[Color]` can be uploaded as RGBA8 bytes.
///
/// Named constants carry raylib's values; with the `window` feature the two
/// types convert losslessly in both directions.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0, 255);
    pub const WHITE: Color = Color::new(255, 255, 255, 255);
    pub const BLANK: Color = Color::new(0, 0, 0, 0);
    pub const GRAY: Color = Color::new(130, 130, 130, 255);
    pub const RED: Color = Color::new(230, 41, 55, 255);
    pub const GREEN: Color = Color::new(0, 228, 48, 255);
    pub const BLUE: Color = Color::new(0, 121, 241, 255);
    pub const YELLOW: Color = Color::new(253, 249, 0, 255);
    pub const MAGENTA: Color = Color::new(255, 0, 255, 255);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Black with the given opacity in `0.0..=1.0` (clamped).
    #[inline]
    pub fn shade(alpha: f64) -> Self {
        Self::new(0, 0, 0, (alpha.clamp(0.0, 1.0) * 255.0).round() as u8)
    }

    /// Multiply the colour channels by `k`, saturating at 255. Alpha is kept.
    #[inline]
    pub fn brightness(self, k: f64) -> Self {
        let k = k.max(0.0);
        let mul = |v: u8| -> u8 { (v as f64 * k).min(255.0) as u8 };
        Self::new(mul(self.r), mul(self.g), mul(self.b), self.a)
    }

    #[inline]
    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Linear mix towards `other`; `t = 0` keeps `self`, `t = 255` gives `other`.
    #[inline]
    pub fn mix(self, other: Color, t: u8) -> Color {
        let ta = t as u16;
        let na = 255u16 - ta;
        let mixc = |x: u8, y: u8| -> u8 { (((x as u16) * na + (y as u16) * ta) / 255) as u8 };
        Color::new(
            mixc(self.r, other.r),
            mixc(self.g, other.g),
            mixc(self.b, other.b),
            mixc(self.a, other.a),
        )
    }

    /// Source-over composite of `self` onto an opaque `dst`.
    #[inline]
    pub fn over(self, dst: Color) -> Color {
        match self.a {
            255 => self,
            0 => dst,
            a => dst.mix(self.with_alpha(dst.a), a),
        }
    }
}

#[cfg(feature = "window")]
impl From<Color> for raylib::prelude::Color {
    fn from(c: Color) -> Self {
        raylib::prelude::Color::new(c.r, c.g, c.b, c.a)
    }
}

#[cfg(feature = "window")]
impl From<raylib::prelude::Color> for Color {
    fn from(c: raylib::prelude::Color) -> Self {
        Color::new(c.r, c.g, c.b, c.a)
    }
}
