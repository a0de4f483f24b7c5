use crate::core::vector::Vec2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Player {
    pub position: Vec2,
    pub direction: f64, // heading in radians
}

impl Player {
    pub fn new(x: f64, y: f64, direction: f64) -> Self {
        Self {
            position: Vec2::new(x, y),
            direction,
        }
    }

    /// Unit vector along the heading.
    #[inline]
    pub fn forward(&self) -> Vec2 {
        Vec2::from_angle(self.direction)
    }

    /// Left and right ends of the camera's near plane.
    ///
    /// Screen columns interpolate from the first point to the second. The
    /// right edge is the heading rotated by +90 degrees (y points down).
    pub fn fov_range(&self, fov: f64, near_plane: f64) -> (Vec2, Vec2) {
        let half = (fov * 0.5).tan() * near_plane;
        let ahead = self.position + self.forward().scale(near_plane);
        let wing = self.forward().rot90().scale(half);
        (ahead - wing, ahead + wing)
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use super::*;

    fn close(a: Vec2, b: Vec2) -> bool {
        a.distance_to(b) < 1e-9
    }

    #[test]
    fn fov_range_facing_east() {
        let player = Player::new(1.0, 1.0, 0.0);
        let (left, right) = player.fov_range(FRAC_PI_2, 1.0);
        assert!(close(left, Vec2::new(2.0, 0.0)));
        assert!(close(right, Vec2::new(2.0, 2.0)));
    }

    #[test]
    fn fov_range_is_symmetric_about_heading() {
        let player = Player::new(3.0, 4.0, 0.7);
        let (left, right) = player.fov_range(1.2, 0.5);
        let mid = left.lerp(right, 0.5);
        assert!(close(mid, player.position + player.forward().scale(0.5)));
        let half_width = (left.distance_to(right)) * 0.5;
        assert!((half_width - 0.6f64.tan() * 0.5).abs() < 1e-9);
    }

    #[test]
    fn edges_subtend_the_field_of_view() {
        let player = Player::new(0.0, 0.0, -1.1);
        let fov = 1.3;
        let (left, right) = player.fov_range(fov, 0.25);
        let a = (left - player.position).norm();
        let b = (right - player.position).norm();
        assert!((a.dot(b).acos() - fov).abs() < 1e-9);
    }
}
