//! 2D vector math for world-space points and directions.
use std::ops::{Add, Sub};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2::new(0.0, 0.0);

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn scalar(v: f64) -> Self {
        Self { x: v, y: v }
    }

    /// Unit vector pointing at `angle` radians (y grows downwards on screen).
    #[inline]
    pub fn from_angle(angle: f64) -> Self {
        Self::new(angle.cos(), angle.sin())
    }

    #[inline]
    pub fn scale(self, k: f64) -> Self {
        Self::new(self.x * k, self.y * k)
    }

    #[inline]
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Rotate by +90 degrees: (x, y) -> (-y, x).
    #[inline]
    pub fn rot90(self) -> Self {
        Self::new(-self.y, self.x)
    }

    #[inline]
    pub fn sqr_length(self) -> f64 {
        self.dot(self)
    }

    #[inline]
    pub fn length(self) -> f64 {
        self.sqr_length().sqrt()
    }

    /// Unit vector in the same direction. The zero vector stays zero.
    #[inline]
    pub fn norm(self) -> Self {
        let l = self.length();
        if l == 0.0 { Self::ZERO } else { self.scale(1.0 / l) }
    }

    #[inline]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        self + (other - self).scale(t)
    }

    #[inline]
    pub fn sqr_distance_to(self, other: Self) -> f64 {
        (other - self).sqr_length()
    }

    #[inline]
    pub fn distance_to(self, other: Self) -> f64 {
        (other - self).length()
    }

    #[inline]
    pub fn map(self, f: impl Fn(f64) -> f64) -> Self {
        Self::new(f(self.x), f(self.y))
    }

    #[inline]
    pub fn floor(self) -> Self {
        self.map(f64::floor)
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    #[inline]
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn norm_of_zero_is_zero() {
        assert_eq!(Vec2::ZERO.norm(), Vec2::ZERO);
    }

    #[test]
    fn norm_has_unit_length() {
        let v = Vec2::new(3.0, -4.0).norm();
        assert!((v.length() - 1.0).abs() < 1e-12);
        assert!((v.x - 0.6).abs() < 1e-12);
    }

    #[test]
    fn rot90_is_perpendicular() {
        let v = Vec2::new(2.0, 5.0);
        assert_eq!(v.rot90(), Vec2::new(-5.0, 2.0));
        assert_eq!(v.dot(v.rot90()), 0.0);
    }

    #[test]
    fn lerp_endpoints_and_midpoint() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(4.0, 2.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Vec2::new(2.0, 1.0));
    }

    #[test]
    fn distance_and_floor() {
        let a = Vec2::new(1.0, 1.0);
        let b = Vec2::new(4.0, 5.0);
        assert_eq!(a.distance_to(b), 5.0);
        assert_eq!(a.sqr_distance_to(b), 25.0);
        assert_eq!(Vec2::new(1.7, -0.2).floor(), Vec2::new(1.0, -1.0));
    }
}
