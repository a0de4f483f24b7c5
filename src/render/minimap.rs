//! Top-down diagnostic view of the grid, the player and the FOV wedge.
use crate::config::{CameraConfig, MinimapConfig};
use crate::core::player::Player;
use crate::core::scene::{Scene, Tile};
use crate::core::vector::Vec2;
use crate::render::casters::{self, RayMarch};
use crate::render::color::Color;
use crate::render::render3d::Viewport;
use crate::render::surface::{Rect, Surface, Transform};
use crate::render::textures::TextureManager;

const MARGIN: f64 = 2.0;
const GRID_WIDTH: f64 = 0.05;
const BACKGROUND: Color = Color::new(24, 24, 24, 200);
const GRID: Color = Color::new(80, 80, 80, 255);
const TRACE_RADIUS: f64 = 0.1;

pub struct Minimap {
    /// Top-left corner in surface pixels.
    pub origin: Vec2,
    /// Side of one grid cell in surface pixels.
    pub cell_size: f64,
    pub player_size: f64,
    pub trace_ray: bool,
}

impl Minimap {
    /// Fits the whole scene into `config.scale` of the viewport width,
    /// without exceeding the viewport height.
    pub fn fit(viewport: Viewport, scene: &Scene, config: &MinimapConfig, player_size: f64) -> Self {
        let (w, h) = scene.size();
        let avail_w = viewport.width as f64 * config.scale;
        let avail_h = viewport.height as f64 - 2.0 * MARGIN;
        let cell_size = (avail_w / w.max(1) as f64)
            .min(avail_h / h.max(1) as f64)
            .max(0.0);
        Self {
            origin: Vec2::scalar(MARGIN),
            cell_size,
            player_size,
            trace_ray: config.trace_ray,
        }
    }

    /// End points of the two FOV edge rays: where each meets a wall or the far clip.
    pub fn wedge(scene: &Scene, player: &Player, camera: &CameraConfig) -> (Vec2, Vec2) {
        let (left, right) = player.fov_range(camera.fov, camera.near_plane);
        let pos = player.position;
        (
            casters::cast_ray(scene, pos, left, camera.far_clip),
            casters::cast_ray(scene, pos, right, camera.far_clip),
        )
    }

    pub fn render<S: Surface>(
        &self,
        surface: &mut S,
        scene: &Scene,
        player: &Player,
        camera: &CameraConfig,
        textures: &TextureManager,
    ) {
        let (w, h) = scene.size();
        let (w, h) = (w as f64, h as f64);
        surface.set_transform(Transform::new(self.origin, self.cell_size));
        surface.fill_rect(Rect::new(0.0, 0.0, w, h), BACKGROUND);

        for (cell, tile) in scene.cells() {
            draw_cell(surface, cell, tile, textures);
        }

        for x in 0..=w as usize {
            let x = x as f64;
            surface.stroke_line(Vec2::new(x, 0.0), Vec2::new(x, h), GRID_WIDTH, GRID);
        }
        for y in 0..=h as usize {
            let y = y as f64;
            surface.stroke_line(Vec2::new(0.0, y), Vec2::new(w, y), GRID_WIDTH, GRID);
        }

        let pos = player.position;
        let half = self.player_size * 0.5;
        surface.fill_rect(
            Rect::new(pos.x - half, pos.y - half, self.player_size, self.player_size),
            Color::YELLOW,
        );

        let (left, right) = player.fov_range(camera.fov, camera.near_plane);
        surface.stroke_line(left, right, GRID_WIDTH, Color::GREEN);
        let (a, b) = Self::wedge(scene, player, camera);
        surface.stroke_line(pos, a, GRID_WIDTH, Color::GREEN);
        surface.stroke_line(pos, b, GRID_WIDTH, Color::GREEN);

        if self.trace_ray {
            draw_trace(surface, scene, pos, left.lerp(right, 0.5), camera.far_clip);
        }

        surface.reset_transform();
    }
}

fn draw_cell<S: Surface>(surface: &mut S, cell: Vec2, tile: Tile, textures: &TextureManager) {
    let dst = Rect::new(cell.x, cell.y, 1.0, 1.0);
    match tile {
        Tile::Empty => {}
        Tile::Color(color) => surface.fill_rect(dst, color),
        Tile::Texture(id) => match textures.image_size(id) {
            Some((tw, th)) => surface.draw_image(id, Rect::new(0.0, 0.0, tw as f64, th as f64), dst),
            None => surface.fill_rect(dst, Color::MAGENTA),
        },
    }
}

/// Marks every grid crossing of the ray until it enters a wall or passes `far`.
fn draw_trace<S: Surface>(surface: &mut S, scene: &Scene, origin: Vec2, through: Vec2, far: f64) {
    if origin == through {
        return;
    }
    for (p1, p2) in RayMarch::new(origin, through) {
        if p2.distance_to(origin) > far {
            break;
        }
        surface.fill_circle(p2, TRACE_RADIUS, Color::RED);
        if scene.is_wall(casters::hitting_cell(p1, p2)) {
            break;
        }
    }
}
