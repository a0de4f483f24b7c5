//! 3D renderer: one wall strip per screen column, plus floor and ceiling rows.
use tracing::trace;

use crate::config::CameraConfig;
use crate::core::player::Player;
use crate::core::scene::{Plane, Scene, Tile};
use crate::core::vector::Vec2;
use crate::render::casters::{self, EPS};
use crate::render::color::Color;
use crate::render::surface::{Rect, Surface};
use crate::render::textures::TextureManager;

/// Resolution of the rendered image, in surface pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub width: usize,
    pub height: usize,
}

impl Viewport {
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }
}

impl From<(usize, usize)> for Viewport {
    fn from((width, height): (usize, usize)) -> Self {
        Self::new(width, height)
    }
}

/// Wall slice visible in one screen column.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Strip {
    pub column: usize,
    pub tile: Tile,
    /// Distance along the view direction, not the Euclidean ray length.
    pub depth: f64,
    pub height: f64,
    pub top: f64,
    /// Horizontal texture coordinate in `[0, 1]` along the struck face.
    pub u: f64,
}

/// Point on the near plane the ray for `column` passes through.
pub fn column_ray(player: &Player, camera: &CameraConfig, column: usize, width: usize) -> Vec2 {
    let (left, right) = player.fov_range(camera.fov, camera.near_plane);
    left.lerp(right, column as f64 / width.max(1) as f64)
}

/// Texture coordinate of `point` on the face of `cell` it lies on.
pub fn face_coordinate(point: Vec2, cell: Vec2) -> f64 {
    let t = point - cell;
    if t.x.abs() < EPS || (t.x - 1.0).abs() < EPS {
        t.y
    } else {
        t.x
    }
}

pub fn strip_for_column(
    scene: &Scene,
    player: &Player,
    camera: &CameraConfig,
    column: usize,
    viewport: Viewport,
) -> Option<Strip> {
    let through = column_ray(player, camera, column, viewport.width);
    let hit = casters::trace(scene, player.position, through, camera.far_clip)?;
    let depth = (hit.point - player.position).dot(player.forward());
    if depth <= 0.0 {
        return None;
    }
    let height = viewport.height as f64 / depth;
    Some(Strip {
        column,
        tile: hit.tile,
        depth,
        height,
        top: (viewport.height as f64 - height) * 0.5,
        u: face_coordinate(hit.point, hit.cell).clamp(0.0, 1.0),
    })
}

pub fn draw_strip<S: Surface>(surface: &mut S, strip: &Strip, textures: &TextureManager) {
    let dst = Rect::new(strip.column as f64, strip.top, 1.0, strip.height);
    match strip.tile {
        Tile::Empty => {}
        Tile::Color(color) => surface.fill_rect(dst, color.brightness(1.0 / strip.depth)),
        Tile::Texture(id) => match textures.image_size(id) {
            Some((tw, th)) => {
                let tx = (strip.u * tw as f64).floor().min(tw as f64 - 1.0);
                surface.draw_image(id, Rect::new(tx, 0.0, 1.0, th as f64), dst);
                surface.fill_rect(dst, Color::shade(1.0 - 1.0 / strip.depth));
            }
            None => surface.fill_rect(dst, Color::MAGENTA),
        },
    }
}

pub fn render_walls<S: Surface>(
    surface: &mut S,
    scene: &Scene,
    player: &Player,
    camera: &CameraConfig,
    textures: &TextureManager,
    viewport: Viewport,
) {
    let mut misses = 0usize;
    for column in 0..viewport.width {
        match strip_for_column(scene, player, camera, column, viewport) {
            Some(strip) => draw_strip(surface, &strip, textures),
            None => misses += 1,
        }
    }
    if misses > 0 {
        trace!(misses, "columns reached the far clip");
    }
}

fn plane_color(plane: Plane, p: Vec2, textures: &TextureManager) -> Color {
    match plane {
        Plane::Checker { even, odd } => {
            let cell = p.floor();
            if (cell.x as i64 + cell.y as i64).rem_euclid(2) == 0 {
                even
            } else {
                odd
            }
        }
        Plane::Texture(id) => textures
            .get(id)
            .map_or(Color::MAGENTA, |pm| pm.sample_uv(p.x.fract(), p.y.fract())),
    }
}

/// Paints floor rows below the horizon and ceiling rows above it.
///
/// A row `dy` pixels from the horizon shows the plane at view depth
/// `height / (2 * dy)`, the same projection the wall strips use.
pub fn render_floor_and_ceiling<S: Surface>(
    surface: &mut S,
    scene: &Scene,
    player: &Player,
    camera: &CameraConfig,
    textures: &TextureManager,
    viewport: Viewport,
) {
    if !scene.has_planes() || viewport.width == 0 {
        return;
    }
    let (left, right) = player.fov_range(camera.fov, camera.near_plane);
    let origin = player.position;
    let half = viewport.height as f64 * 0.5;

    for y in 0..viewport.height {
        let dy = y as f64 + 0.5 - half;
        let is_floor = dy > 0.0;
        let plane = if is_floor { scene.floor() } else { scene.ceiling() };
        if plane.is_none() {
            continue;
        }
        let depth = half / dy.abs();
        if depth > camera.far_clip {
            continue;
        }
        let k = depth / camera.near_plane;
        let t1 = origin + (left - origin).scale(k);
        let t2 = origin + (right - origin).scale(k);
        for x in 0..viewport.width {
            let p = t1.lerp(t2, x as f64 / viewport.width as f64);
            let plane = if is_floor { scene.floor_at(p) } else { scene.ceiling_at(p) };
            if let Some(plane) = plane {
                let color = plane_color(plane, p, textures).brightness(1.0 / depth);
                surface.fill_rect(Rect::new(x as f64, y as f64, 1.0, 1.0), color);
            }
        }
    }
}

/// Full first-person frame: background, floor and ceiling, then walls.
pub fn render_3d<S: Surface>(
    surface: &mut S,
    scene: &Scene,
    player: &Player,
    camera: &CameraConfig,
    textures: &TextureManager,
    viewport: Viewport,
    background: Color,
) {
    surface.reset_transform();
    surface.clear(background);
    render_floor_and_ceiling(surface, scene, player, camera, textures, viewport);
    render_walls(surface, scene, player, camera, textures, viewport);
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

    use super::*;
    use crate::core::maze::{Legend, parse_maze};
    use crate::core::process_events::can_move_to;
    use crate::render::surface::recording::{DrawCommand, Recorder};
    use crate::render::textures::Pixmap;

    const VIEW: Viewport = Viewport::new(64, 40);

    fn camera() -> CameraConfig {
        CameraConfig {
            fov: FRAC_PI_2,
            near_plane: 0.25,
            far_clip: 20.0,
        }
    }

    fn corridor() -> Scene {
        parse_maze(
            "##########\n\
             #........#\n\
             #........#\n\
             #........#\n\
             ##########",
            &Legend::default(),
        )
        .unwrap()
        .scene
    }

    #[test]
    fn wall_straight_ahead_has_inverse_height() {
        let scene = corridor();
        let player = Player::new(2.5, 2.5, 0.0);
        let strip = strip_for_column(&scene, &player, &camera(), VIEW.width / 2, VIEW).unwrap();
        assert!((strip.depth - 6.5).abs() < 1e-9);
        assert!((strip.height - VIEW.height as f64 / 6.5).abs() < 1e-9);
        assert!((strip.top + strip.height * 0.5 - VIEW.height as f64 * 0.5).abs() < 1e-9);
    }

    #[test]
    fn strip_height_shrinks_with_distance() {
        let scene = corridor();
        let mut last = f64::INFINITY;
        for x in [7.5, 6.0, 4.5, 3.0, 1.5] {
            let player = Player::new(x, 2.5, 0.0);
            let strip = strip_for_column(&scene, &player, &camera(), VIEW.width / 2, VIEW).unwrap();
            assert!(strip.height < last, "height did not drop at x = {x}");
            last = strip.height;
        }
    }

    #[test]
    fn flat_wall_has_no_fisheye() {
        let scene = corridor();
        let player = Player::new(4.5, 2.5, 0.0);
        // Columns whose rays land on the east wall all share its view depth.
        let depths: Vec<f64> = (VIEW.width * 3 / 8..VIEW.width * 5 / 8)
            .filter_map(|x| strip_for_column(&scene, &player, &camera(), x, VIEW))
            .map(|s| s.depth)
            .collect();
        assert!(!depths.is_empty());
        assert!(depths.iter().all(|d| (d - 4.5).abs() < 1e-9), "{depths:?}");
    }

    #[test]
    fn corner_close_up_uses_true_wall_depth() {
        let scene = parse_maze("#####\n#...#\n#...#\n#####", &Legend::default())
            .unwrap()
            .scene;
        let player = Player::new(3.74, 2.74, FRAC_PI_4);
        assert!(can_move_to(&scene, player.position, 0.5));
        let cam = camera();
        let pos = player.position;

        // The open interior spans x in [1, 4] and y in [1, 3], so the first
        // wall face is the nearest of those four lines along the ray.
        let exit = |p: f64, d: f64, lo: f64, hi: f64| {
            if d > 0.0 {
                (hi - p) / d
            } else if d < 0.0 {
                (lo - p) / d
            } else {
                f64::INFINITY
            }
        };
        for column in 0..VIEW.width {
            let d = column_ray(&player, &cam, column, VIEW.width) - pos;
            let t = exit(pos.x, d.x, 1.0, 4.0).min(exit(pos.y, d.y, 1.0, 3.0));
            let expected = d.scale(t).dot(player.forward());

            let strip = strip_for_column(&scene, &player, &cam, column, VIEW).unwrap();
            assert!(
                (strip.depth - expected).abs() < 1e-9,
                "column {column}: depth {} expected {expected}",
                strip.depth
            );
            assert!((0.0..=1.0).contains(&strip.u));
        }
    }

    #[test]
    fn edge_columns_follow_fov_range() {
        let player = Player::new(3.0, 3.0, 0.4);
        let cam = camera();
        let (left, right) = player.fov_range(cam.fov, cam.near_plane);
        assert_eq!(column_ray(&player, &cam, 0, VIEW.width), left);
        let last = column_ray(&player, &cam, VIEW.width - 1, VIEW.width);
        let tolerance = left.distance_to(right) / VIEW.width as f64 + 1e-12;
        assert!(last.distance_to(right) <= tolerance);
        let a = (last - player.position).norm();
        let b = (right - player.position).norm();
        assert!(a.dot(b) > 0.999);
    }

    #[test]
    fn open_scene_draws_nothing() {
        let scene = Scene::new(vec![vec![Tile::Empty; 3]; 3]);
        let player = Player::new(1.5, 1.5, 0.0);
        let mut rec = Recorder::default();
        render_walls(&mut rec, &scene, &player, &camera(), &TextureManager::new(), VIEW);
        assert!(rec.commands.is_empty());
    }

    #[test]
    fn flat_walls_fill_one_rect_per_column() {
        let scene = corridor();
        let player = Player::new(2.5, 2.5, 0.3);
        let mut rec = Recorder::default();
        render_walls(&mut rec, &scene, &player, &camera(), &TextureManager::new(), VIEW);
        let fills: Vec<_> = rec.fills().collect();
        assert_eq!(fills.len(), VIEW.width);
        for (i, (rect, _)) in fills.iter().enumerate() {
            assert_eq!(rect.x, i as f64);
            assert_eq!(rect.w, 1.0);
        }
    }

    #[test]
    fn textured_strip_samples_face_column_and_darkens() {
        let mut textures = TextureManager::new();
        let id = textures.insert("bricks", Pixmap::bricks(16, 16, Color::RED));
        let mut legend = Legend::default();
        legend.insert('b', Tile::Texture(id));
        let scene = parse_maze("bbbbb\nb...b\nb...b\nb...b\nbbbbb", &legend)
            .unwrap()
            .scene;
        // Facing east at y = 2.25: the east wall face is struck at u = 0.25.
        let player = Player::new(1.5, 2.25, 0.0);
        let strip = strip_for_column(&scene, &player, &camera(), VIEW.width / 2, VIEW).unwrap();
        assert!((strip.u - 0.25).abs() < 1e-9);
        assert!((strip.depth - 2.5).abs() < 1e-9);

        let mut rec = Recorder::default();
        draw_strip(&mut rec, &strip, &textures);
        match rec.commands.as_slice() {
            [
                DrawCommand::DrawImage(tex, src, dst),
                DrawCommand::FillRect(overlay, shade),
            ] => {
                assert_eq!(*tex, id);
                assert_eq!(*src, Rect::new(4.0, 0.0, 1.0, 16.0));
                assert_eq!(dst, overlay);
                assert_eq!(*shade, Color::shade(1.0 - 1.0 / 2.5));
            }
            other => panic!("unexpected commands {other:?}"),
        }
    }

    #[test]
    fn face_coordinate_picks_the_struck_edge() {
        let cell = Vec2::new(3.0, 4.0);
        assert!((face_coordinate(Vec2::new(3.0, 4.7), cell) - 0.7).abs() < 1e-12);
        assert!((face_coordinate(Vec2::new(4.0, 4.2), cell) - 0.2).abs() < 1e-12);
        assert!((face_coordinate(Vec2::new(3.6, 4.0), cell) - 0.6).abs() < 1e-12);
    }

    #[test]
    fn checker_floor_alternates_by_cell_parity() {
        let even = Color::rgb(200, 200, 200);
        let odd = Color::rgb(40, 40, 40);
        let scene = corridor().with_floor(Plane::Checker { even, odd });
        let player = Player::new(2.5, 2.5, 0.0);
        let view = Viewport::new(8, 8);
        let mut rec = Recorder::default();
        render_floor_and_ceiling(&mut rec, &scene, &player, &camera(), &TextureManager::new(), view);

        // Only floor rows (below the horizon) are painted.
        assert!(rec.fills().all(|(r, _)| r.y >= 4.0));
        // Bottom row sits at depth 4 / 3.5; the centre column looks straight ahead.
        let depth = 4.0 / 3.5;
        let (_, color) = rec
            .fills()
            .find(|(r, _)| r.x == 4.0 && r.y == 7.0)
            .unwrap();
        let expected = if ((2.5 + depth) as i64 + 2) % 2 == 0 { even } else { odd };
        assert_eq!(*color, expected.brightness(1.0 / depth));
    }

    #[test]
    fn render_3d_clears_then_draws() {
        let scene = corridor();
        let player = Player::new(2.5, 2.5, 0.0);
        let mut rec = Recorder::default();
        render_3d(&mut rec, &scene, &player, &camera(), &TextureManager::new(), VIEW, Color::BLACK);
        assert!(matches!(rec.commands[0], DrawCommand::SetTransform(_)));
        assert_eq!(rec.commands[1], DrawCommand::Clear(Color::BLACK));
        assert_eq!(rec.fills().count(), VIEW.width);
    }
}
