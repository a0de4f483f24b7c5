//! CPU-resident texture pixmaps with procedural fallbacks.
use std::collections::HashMap;

use tracing::{info, warn};

use crate::core::scene::Tile;
use crate::error::TextureError;
use crate::render::color::Color;

/// Handle into a [`TextureManager`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureId(pub u16);

/// Immutable pixel grid sampled by the renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct Pixmap {
    w: u32,
    h: u32,
    px: Vec<Color>,
}

impl Pixmap {
    /// `px` must hold `w * h` colours in row-major order.
    pub fn new(w: u32, h: u32, px: Vec<Color>) -> Result<Self, TextureError> {
        if w == 0 || h == 0 || px.len() != (w * h) as usize {
            return Err(TextureError::Empty {
                path: format!("<{w}x{h} pixmap, {} pixels>", px.len()),
            });
        }
        Ok(Self { w, h, px })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.w
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.h
    }

    /// Pixel at `(x, y)`, wrapping both coordinates.
    #[inline]
    pub fn sample(&self, x: u32, y: u32) -> Color {
        let xi = (x % self.w) as usize;
        let yi = (y % self.h) as usize;
        self.px[(yi * self.w as usize) + xi]
    }

    /// Pixel at normalised coordinates; values outside `[0, 1)` repeat.
    #[inline]
    pub fn sample_uv(&self, u: f64, v: f64) -> Color {
        let x = (u.rem_euclid(1.0) * self.w as f64) as u32;
        let y = (v.rem_euclid(1.0) * self.h as f64) as u32;
        self.sample(x.min(self.w - 1), y.min(self.h - 1))
    }

    /// Checkerboard with 8px cells lightened from `base`.
    pub fn checker(w: u32, h: u32, base: Color) -> Pixmap {
        let w = w.max(1);
        let h = h.max(1);
        let mut px = vec![base; (w * h) as usize];
        let cell = 8u32;
        for y in 0..h {
            for x in 0..w {
                if ((x / cell) + (y / cell)) % 2 == 0 {
                    let i = (y * w + x) as usize;
                    px[i] = px[i].mix(Color::WHITE, 24);
                }
            }
        }
        Pixmap { w, h, px }
    }

    /// Running-bond brick pattern with dark mortar lines.
    pub fn bricks(w: u32, h: u32, brick: Color) -> Pixmap {
        let w = w.max(1);
        let h = h.max(1);
        let mortar = brick.mix(Color::BLACK, 160);
        let row_h = (h / 4).max(2);
        let brick_w = (w / 2).max(2);
        let mut px = vec![brick; (w * h) as usize];
        for y in 0..h {
            let row = y / row_h;
            let offset = if row % 2 == 0 { 0 } else { brick_w / 2 };
            for x in 0..w {
                let i = (y * w + x) as usize;
                if y % row_h == 0 || (x + offset) % brick_w == 0 {
                    px[i] = mortar;
                } else if (x * 7 + y * 13) % 11 == 0 {
                    px[i] = brick.mix(Color::BLACK, 30);
                }
            }
        }
        Pixmap { w, h, px }
    }
}

/// Registry of named pixmaps addressed by [`TextureId`].
#[derive(Debug, Default)]
pub struct TextureManager {
    maps: Vec<Pixmap>,
    names: HashMap<String, TextureId>,
}

impl TextureManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `pixmap` under `name`, replacing any previous pixmap of that name.
    pub fn insert(&mut self, name: &str, pixmap: Pixmap) -> TextureId {
        if let Some(&id) = self.names.get(name) {
            self.maps[id.0 as usize] = pixmap;
            return id;
        }
        let id = TextureId(self.maps.len() as u16);
        self.maps.push(pixmap);
        self.names.insert(name.to_owned(), id);
        id
    }

    /// Turns a load result into a tile: a texture on success, `fallback` as a flat colour otherwise.
    pub fn resolve(
        &mut self,
        name: &str,
        loaded: Result<Pixmap, TextureError>,
        fallback: Color,
    ) -> Tile {
        match loaded {
            Ok(pixmap) => {
                info!(name, width = pixmap.w, height = pixmap.h, "registered texture");
                Tile::Texture(self.insert(name, pixmap))
            }
            Err(err) => {
                warn!(name, %err, "texture unavailable, using flat colour");
                Tile::Color(fallback)
            }
        }
    }

    pub fn get(&self, id: TextureId) -> Option<&Pixmap> {
        self.maps.get(id.0 as usize)
    }

    pub fn id(&self, name: &str) -> Option<TextureId> {
        self.names.get(name).copied()
    }

    pub fn image_size(&self, id: TextureId) -> Option<(u32, u32)> {
        self.get(id).map(|p| (p.w, p.h))
    }

    pub fn len(&self) -> usize {
        self.maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }
}

/// Decodes an image file into a [`Pixmap`] through raylib.
#[cfg(feature = "window")]
pub fn load_pixmap(path: &str) -> Result<Pixmap, TextureError> {
    use raylib::prelude::Image;

    let img = Image::load_image(path).map_err(|e| TextureError::Load {
        path: path.to_owned(),
        reason: format!("{e:?}"),
    })?;
    let w = img.width().max(0) as u32;
    let h = img.height().max(0) as u32;
    let px = img
        .get_image_data()
        .iter()
        .map(|&c| Color::from(c))
        .collect();
    Pixmap::new(w, h, px).map_err(|_| TextureError::Empty {
        path: path.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(w: u32, h: u32) -> Pixmap {
        let px = (0..w * h)
            .map(|i| Color::rgb((i % w) as u8, (i / w) as u8, 0))
            .collect();
        Pixmap::new(w, h, px).unwrap()
    }

    #[test]
    fn pixmap_rejects_mismatched_buffers() {
        assert!(Pixmap::new(2, 2, vec![Color::BLACK; 3]).is_err());
        assert!(Pixmap::new(0, 4, Vec::new()).is_err());
    }

    #[test]
    fn sample_wraps() {
        let pm = gradient(4, 2);
        assert_eq!(pm.sample(1, 1), Color::rgb(1, 1, 0));
        assert_eq!(pm.sample(5, 3), Color::rgb(1, 1, 0));
        assert_eq!(pm.sample_uv(0.5, 0.0), Color::rgb(2, 0, 0));
        assert_eq!(pm.sample_uv(1.25, -0.25), Color::rgb(1, 1, 0));
    }

    #[test]
    fn resolve_registers_or_falls_back() {
        let mut tm = TextureManager::new();
        let tile = tm.resolve("wall", Ok(gradient(4, 4)), Color::RED);
        let id = tm.id("wall").unwrap();
        assert_eq!(tile, Tile::Texture(id));
        assert_eq!(tm.image_size(id), Some((4, 4)));

        let missing = Err(TextureError::Load {
            path: "nope.png".into(),
            reason: "not found".into(),
        });
        assert_eq!(tm.resolve("door", missing, Color::RED), Tile::Color(Color::RED));
        assert_eq!(tm.len(), 1);
    }

    #[test]
    fn reinserting_a_name_keeps_its_id() {
        let mut tm = TextureManager::new();
        let a = tm.insert("floor", Pixmap::checker(16, 16, Color::GRAY));
        let b = tm.insert("floor", Pixmap::bricks(32, 32, Color::RED));
        assert_eq!(a, b);
        assert_eq!(tm.image_size(a), Some((32, 32)));
        assert!(tm.get(TextureId(9)).is_none());
    }
}
