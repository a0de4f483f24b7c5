//! Grid ray marching (DDA) and ray casting against a [`Scene`].
use crate::core::scene::{Scene, Tile};
use crate::core::vector::Vec2;

/// Nudge that keeps the marcher from re-selecting the grid line it sits on.
pub const EPS: f64 = 1e-6;

/// Next grid coordinate strictly beyond `x` in the direction of `dx`.
#[inline]
pub fn snap(x: f64, dx: f64) -> f64 {
    if dx > 0.0 {
        (x + EPS).ceil()
    } else if dx < 0.0 {
        (x - EPS).floor()
    } else {
        x
    }
}

/// Advances the ray through `p1 -> p2` to the nearest grid line crossing past `p2`.
///
/// `p1` and `p2` must differ.
pub fn step(p1: Vec2, p2: Vec2) -> Vec2 {
    let d = p2 - p1;
    if d.x == 0.0 {
        return Vec2::new(p2.x, snap(p2.y, d.y));
    }

    let k = d.y / d.x;
    let c = p1.y - k * p1.x;

    let x3 = snap(p2.x, d.x);
    let mut p3 = Vec2::new(x3, x3 * k + c);

    if k != 0.0 {
        let y3 = snap(p2.y, d.y);
        let horizontal = Vec2::new((y3 - c) / k, y3);
        if p2.sqr_distance_to(horizontal) < p2.sqr_distance_to(p3) {
            p3 = horizontal;
        }
    }
    p3
}

/// Cell the ray `p1 -> p2` is entering at `p2`.
///
/// Points on a grid line are nudged along the ray so they belong to the cell ahead.
#[inline]
pub fn hitting_cell(p1: Vec2, p2: Vec2) -> Vec2 {
    let d = p2 - p1;
    Vec2::new(
        (p2.x + sign(d.x) * EPS).floor(),
        (p2.y + sign(d.y) * EPS).floor(),
    )
}

// `f64::signum` maps 0.0 to 1.0; a ray with no motion along an axis must not be nudged.
#[inline]
fn sign(v: f64) -> f64 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Restartable producer of successive grid crossings along a ray.
///
/// `through` only fixes the direction. Each item is the segment
/// `(previous, current)`; the first ends at `origin` itself so the origin's
/// own cell is checked before any grid line is crossed.
#[derive(Clone, Copy, Debug)]
pub struct RayMarch {
    p1: Vec2,
    p2: Vec2,
    started: bool,
}

impl RayMarch {
    pub fn new(origin: Vec2, through: Vec2) -> Self {
        Self {
            p1: origin - (through - origin),
            p2: origin,
            started: false,
        }
    }
}

impl Iterator for RayMarch {
    type Item = (Vec2, Vec2);

    fn next(&mut self) -> Option<Self::Item> {
        if self.started {
            let p3 = step(self.p1, self.p2);
            self.p1 = self.p2;
            self.p2 = p3;
        }
        self.started = true;
        Some((self.p1, self.p2))
    }
}

/// A wall struck by a ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    pub point: Vec2,
    /// Integer origin of the struck cell.
    pub cell: Vec2,
    pub tile: Tile,
}

/// Marches from `origin` towards `through` until a wall is hit or `far` is passed.
///
/// The hit point lies on the boundary of the struck cell, except when
/// `origin` itself is inside a wall, in which case it is `origin`.
pub fn trace(scene: &Scene, origin: Vec2, through: Vec2, far: f64) -> Option<Hit> {
    if origin == through {
        return None;
    }
    let far2 = far * far;
    for (p1, p2) in RayMarch::new(origin, through) {
        if p2.sqr_distance_to(origin) > far2 {
            return None;
        }
        let cell = hitting_cell(p1, p2);
        if let Some(tile) = scene.get(cell).filter(|t| t.is_wall()) {
            return Some(Hit {
                point: p2,
                cell,
                tile,
            });
        }
    }
    None
}

/// Point where the ray from `origin` through `through` meets a wall.
///
/// A ray that reaches `far` without hitting anything ends at exactly `far`
/// along its direction.
pub fn cast_ray(scene: &Scene, origin: Vec2, through: Vec2, far: f64) -> Vec2 {
    match trace(scene, origin, through, far) {
        Some(hit) => hit.point,
        None => origin + (through - origin).norm().scale(far),
    }
}
