//! Drawing-surface abstraction the renderers issue primitives to.
use crate::core::vector::Vec2;
use crate::render::color::Color;
use crate::render::textures::TextureId;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    #[inline]
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }
}

/// Translate-then-scale mapping from drawing coordinates to surface pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translate: Vec2,
    pub scale: Vec2,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        translate: Vec2::ZERO,
        scale: Vec2::new(1.0, 1.0),
    };

    pub fn new(translate: Vec2, scale: f64) -> Self {
        Self {
            translate,
            scale: Vec2::scalar(scale),
        }
    }

    #[inline]
    pub fn apply(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            p.x * self.scale.x + self.translate.x,
            p.y * self.scale.y + self.translate.y,
        )
    }

    #[inline]
    pub fn apply_rect(&self, r: Rect) -> Rect {
        let p = self.apply(Vec2::new(r.x, r.y));
        Rect::new(p.x, p.y, r.w * self.scale.x, r.h * self.scale.y)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Primitive 2D drawing operations. All coordinates pass through the current transform.
pub trait Surface {
    fn clear(&mut self, color: Color);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    /// Draws region `src` (texture pixels) of `texture` stretched over `dst`.
    fn draw_image(&mut self, texture: TextureId, src: Rect, dst: Rect);
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f64, color: Color);
    fn fill_circle(&mut self, center: Vec2, radius: f64, color: Color);
    fn set_transform(&mut self, transform: Transform);

    fn reset_transform(&mut self) {
        self.set_transform(Transform::IDENTITY);
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_translates_after_scaling() {
        let t = Transform::new(Vec2::new(10.0, 20.0), 4.0);
        assert_eq!(t.apply(Vec2::new(1.0, 2.0)), Vec2::new(14.0, 28.0));
        assert_eq!(
            t.apply_rect(Rect::new(1.0, 1.0, 0.5, 2.0)),
            Rect::new(14.0, 24.0, 2.0, 8.0)
        );
        assert_eq!(Transform::default().apply(Vec2::new(3.0, 3.0)), Vec2::new(3.0, 3.0));
    }
}
