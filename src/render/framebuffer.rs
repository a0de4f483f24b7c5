//! CPU framebuffer and the software [`Surface`] drawing into it.
use crate::core::vector::Vec2;
use crate::render::color::Color;
use crate::render::line::bresenham;
use crate::render::surface::{Rect, Surface, Transform};
use crate::render::textures::{TextureId, TextureManager};

pub struct Framebuffer {
    pub color_buffer: Vec<Color>,
    pub width: u32,
    pub height: u32,
    pub background_color: Color,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> Self {
        let size = (width * height) as usize;
        let bg = Color::BLACK;
        Self {
            color_buffer: vec![bg; size],
            width,
            height,
            background_color: bg,
        }
    }

    #[inline]
    pub fn clear(&mut self) {
        self.color_buffer.fill(self.background_color);
    }

    #[inline]
    pub fn set_background_color(&mut self, c: Color) {
        self.background_color = c;
    }

    #[inline]
    pub fn set_pixel_color(&mut self, x: u32, y: u32, color: Color) {
        if x < self.width && y < self.height {
            self.color_buffer[(y * self.width + x) as usize] = color;
        }
    }

    /// Composites `color` over the existing pixel.
    #[inline]
    pub fn blend_pixel(&mut self, x: u32, y: u32, color: Color) {
        if x < self.width && y < self.height {
            let i = (y * self.width + x) as usize;
            self.color_buffer[i] = color.over(self.color_buffer[i]);
        }
    }

    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Color {
        if x < self.width && y < self.height {
            return self.color_buffer[(y * self.width + x) as usize];
        }
        self.background_color
    }

    /// Pixels as tightly packed RGBA8 bytes, ready for a texture upload.
    pub fn as_bytes(&self) -> &[u8] {
        let byte_len = self.color_buffer.len() * std::mem::size_of::<Color>();
        // SAFETY: `Color` is `repr(C)` with four `u8` fields, so it has size 4,
        // alignment 1 and no padding.
        unsafe { std::slice::from_raw_parts(self.color_buffer.as_ptr() as *const u8, byte_len) }
    }

    /// Pixel index range covered by `[start, start + len)` along an axis of size `limit`.
    fn span(start: f64, len: f64, limit: u32) -> (u32, u32) {
        let (a, b) = if len < 0.0 { (start + len, start) } else { (start, start + len) };
        let lo = (a - 0.5).ceil().max(0.0);
        let hi = (b - 0.5).ceil().min(limit as f64);
        if hi <= lo { (0, 0) } else { (lo as u32, hi as u32) }
    }
}

/// Software drawing surface over a [`Framebuffer`], sampling images from a [`TextureManager`].
pub struct Canvas<'a> {
    fb: &'a mut Framebuffer,
    textures: &'a TextureManager,
    transform: Transform,
}

impl<'a> Canvas<'a> {
    pub fn new(fb: &'a mut Framebuffer, textures: &'a TextureManager) -> Self {
        Self {
            fb,
            textures,
            transform: Transform::IDENTITY,
        }
    }
}

impl Surface for Canvas<'_> {
    fn clear(&mut self, color: Color) {
        self.fb.color_buffer.fill(color);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let r = self.transform.apply_rect(rect);
        let (x0, x1) = Framebuffer::span(r.x, r.w, self.fb.width);
        let (y0, y1) = Framebuffer::span(r.y, r.h, self.fb.height);
        for y in y0..y1 {
            for x in x0..x1 {
                self.fb.blend_pixel(x, y, color);
            }
        }
    }

    fn draw_image(&mut self, texture: TextureId, src: Rect, dst: Rect) {
        let Some(pm) = self.textures.get(texture) else {
            return;
        };
        let d = self.transform.apply_rect(dst);
        if d.w == 0.0 || d.h == 0.0 {
            return;
        }
        let (x0, x1) = Framebuffer::span(d.x, d.w, self.fb.width);
        let (y0, y1) = Framebuffer::span(d.y, d.h, self.fb.height);
        for y in y0..y1 {
            let v = (y as f64 + 0.5 - d.y) / d.h;
            let ty = (src.y + v * src.h).floor().max(0.0) as u32;
            for x in x0..x1 {
                let u = (x as f64 + 0.5 - d.x) / d.w;
                let tx = (src.x + u * src.w).floor().max(0.0) as u32;
                self.fb.blend_pixel(x, y, pm.sample(tx, ty));
            }
        }
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f64, color: Color) {
        let a = self.transform.apply(from);
        let b = self.transform.apply(to);
        let brush = (width * self.transform.scale.x).round().max(1.0) as i64;
        let off = brush / 2;
        let (w, h) = (self.fb.width as i64, self.fb.height as i64);
        bresenham(
            a.x.floor() as i64,
            a.y.floor() as i64,
            b.x.floor() as i64,
            b.y.floor() as i64,
            |x, y| {
                for py in y - off..y - off + brush {
                    for px in x - off..x - off + brush {
                        if px >= 0 && py >= 0 && px < w && py < h {
                            self.fb.blend_pixel(px as u32, py as u32, color);
                        }
                    }
                }
            },
        );
    }

    fn fill_circle(&mut self, center: Vec2, radius: f64, color: Color) {
        let c = self.transform.apply(center);
        let r = radius * self.transform.scale.x;
        let (x0, x1) = Framebuffer::span(c.x - r, 2.0 * r, self.fb.width);
        let (y0, y1) = Framebuffer::span(c.y - r, 2.0 * r, self.fb.height);
        for y in y0..y1 {
            for x in x0..x1 {
                let p = Vec2::new(x as f64 + 0.5, y as f64 + 0.5);
                if p.sqr_distance_to(c) <= r * r {
                    self.fb.blend_pixel(x, y, color);
                }
            }
        }
    }

    fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }
}
