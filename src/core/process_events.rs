//! Per-frame movement with square-footprint collision.
use crate::config::PlayerConfig;
use crate::core::player::Player;
use crate::core::scene::Scene;
use crate::core::vector::Vec2;

/// Input flags sampled once per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Controls {
    pub forward: bool,
    pub backward: bool,
    pub turn_left: bool,
    pub turn_right: bool,
}

/// True if a square of side `size` centred on `target` overlaps no wall cell.
pub fn can_move_to(scene: &Scene, target: Vec2, size: f64) -> bool {
    let half = Vec2::scalar(size * 0.5);
    let min = (target - half).floor();
    let max = (target + half).floor();
    let mut y = min.y;
    while y <= max.y {
        let mut x = min.x;
        while x <= max.x {
            if scene.is_wall(Vec2::new(x, y)) {
                return false;
            }
            x += 1.0;
        }
        y += 1.0;
    }
    true
}

/// Applies one frame of input: turn first, then move with per-axis sliding.
pub fn update_player(
    player: &mut Player,
    scene: &Scene,
    controls: Controls,
    dt: f64,
    config: &PlayerConfig,
) {
    let mut angular = 0.0;
    if controls.turn_left {
        angular -= config.turn_speed;
    }
    if controls.turn_right {
        angular += config.turn_speed;
    }
    player.direction += angular * dt;

    let mut velocity = Vec2::ZERO;
    if controls.forward {
        velocity = velocity + player.forward().scale(config.speed);
    }
    if controls.backward {
        velocity = velocity - player.forward().scale(config.speed);
    }
    move_and_slide(player, scene, velocity.scale(dt), config.size);
}

/// Moves along x, then along y, keeping each axis only if it stays clear.
pub fn move_and_slide(player: &mut Player, scene: &Scene, delta: Vec2, size: f64) {
    let nx = player.position.x + delta.x;
    if can_move_to(scene, Vec2::new(nx, player.position.y), size) {
        player.position.x = nx;
    }
    let ny = player.position.y + delta.y;
    if can_move_to(scene, Vec2::new(player.position.x, ny), size) {
        player.position.y = ny;
    }
}
