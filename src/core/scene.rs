//! Tile grid the rays are marched through.

use crate::core::vector::Vec2;
use crate::render::color::Color;
use crate::render::textures::TextureId;

/// Content of one grid cell. Anything but `Empty` is a solid wall.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tile {
    #[default]
    Empty,
    Color(Color),
    Texture(TextureId),
}

impl Tile {
    #[inline]
    pub fn is_wall(self) -> bool {
        !matches!(self, Tile::Empty)
    }
}

/// Pattern painted on the floor or ceiling plane.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Plane {
    /// Alternates by `(floor(x) + floor(y)) % 2`.
    Checker { even: Color, odd: Color },
    /// Repeats once per cell.
    Texture(TextureId),
}

/// Row-major grid of tiles plus optional floor and ceiling planes.
///
/// Built once at startup and read-only afterwards. Lookups outside the grid
/// yield `None` and are treated as open space by every caller.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    width: usize,
    height: usize,
    walls: Vec<Tile>,
    floor: Option<Plane>,
    ceiling: Option<Plane>,
}

impl Scene {
    /// Builds a scene from possibly jagged rows; short rows are padded with `Tile::Empty`.
    pub fn new(rows: Vec<Vec<Tile>>) -> Self {
        let height = rows.len();
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut walls = Vec::with_capacity(width * height);
        for mut row in rows {
            row.resize(width, Tile::Empty);
            walls.extend(row);
        }
        Self {
            width,
            height,
            walls,
            floor: None,
            ceiling: None,
        }
    }

    pub fn with_floor(mut self, floor: Plane) -> Self {
        self.floor = Some(floor);
        self
    }

    pub fn with_ceiling(mut self, ceiling: Plane) -> Self {
        self.ceiling = Some(ceiling);
        self
    }

    /// `(width, height)` in cells.
    #[inline]
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= 0.0 && p.y >= 0.0 && p.x < self.width as f64 && p.y < self.height as f64
    }

    /// Tile of the cell containing `p`, or `None` outside the grid.
    pub fn get(&self, p: Vec2) -> Option<Tile> {
        if !self.contains(p) {
            return None;
        }
        let p = p.floor();
        self.walls.get(p.y as usize * self.width + p.x as usize).copied()
    }

    #[inline]
    pub fn is_wall(&self, p: Vec2) -> bool {
        self.get(p).is_some_and(Tile::is_wall)
    }

    /// Floor plane at `p`; `None` when the scene has no floor or `p` is off the grid.
    pub fn floor_at(&self, p: Vec2) -> Option<Plane> {
        self.floor.filter(|_| self.contains(p))
    }

    pub fn ceiling_at(&self, p: Vec2) -> Option<Plane> {
        self.ceiling.filter(|_| self.contains(p))
    }

    #[inline]
    pub fn floor(&self) -> Option<Plane> {
        self.floor
    }

    #[inline]
    pub fn ceiling(&self) -> Option<Plane> {
        self.ceiling
    }

    pub fn has_planes(&self) -> bool {
        self.floor.is_some() || self.ceiling.is_some()
    }

    /// All cells in row-major order as `(cell origin, tile)`.
    pub fn cells(&self) -> impl Iterator<Item = (Vec2, Tile)> + '_ {
        self.walls.iter().enumerate().map(move |(i, &tile)| {
            let x = (i % self.width.max(1)) as f64;
            let y = (i / self.width.max(1)) as f64;
            (Vec2::new(x, y), tile)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WALL: Tile = Tile::Color(Color::GRAY);

    #[test]
    fn jagged_rows_are_padded() {
        let scene = Scene::new(vec![
            vec![WALL, WALL, WALL],
            vec![WALL],
            vec![Tile::Empty, WALL],
        ]);
        assert_eq!(scene.size(), (3, 3));
        assert_eq!(scene.get(Vec2::new(1.5, 1.5)), Some(Tile::Empty));
        assert_eq!(scene.get(Vec2::new(2.0, 1.0)), Some(Tile::Empty));
        assert_eq!(scene.get(Vec2::new(1.2, 2.9)), Some(WALL));
    }

    #[test]
    fn out_of_bounds_is_no_tile() {
        let scene = Scene::new(vec![vec![WALL, WALL]]);
        assert_eq!(scene.get(Vec2::new(-0.1, 0.5)), None);
        assert_eq!(scene.get(Vec2::new(2.0, 0.5)), None);
        assert_eq!(scene.get(Vec2::new(0.5, 1.0)), None);
        assert!(!scene.is_wall(Vec2::new(5.0, 5.0)));
        assert!(scene.is_wall(Vec2::new(1.99, 0.0)));
    }

    #[test]
    fn empty_scene_has_zero_size() {
        let scene = Scene::new(Vec::new());
        assert_eq!(scene.size(), (0, 0));
        assert!(!scene.contains(Vec2::ZERO));
        assert_eq!(scene.cells().count(), 0);
    }

    #[test]
    fn planes_only_inside_grid() {
        let checker = Plane::Checker {
            even: Color::WHITE,
            odd: Color::BLACK,
        };
        let scene = Scene::new(vec![vec![Tile::Empty; 2]; 2]).with_floor(checker);
        assert_eq!(scene.floor_at(Vec2::new(1.5, 0.5)), Some(checker));
        assert_eq!(scene.floor_at(Vec2::new(2.5, 0.5)), None);
        assert_eq!(scene.ceiling_at(Vec2::new(1.5, 0.5)), None);
        assert!(scene.has_planes());
    }

    #[test]
    fn cells_enumerate_row_major() {
        let scene = Scene::new(vec![vec![Tile::Empty, WALL], vec![WALL]]);
        let walls: Vec<Vec2> = scene
            .cells()
            .filter(|(_, tile)| tile.is_wall())
            .map(|(p, _)| p)
            .collect();
        assert_eq!(walls, vec![Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)]);
    }
}
