//! Maze loading from a one-character-per-cell text layout.
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::core::scene::{Scene, Tile};
use crate::core::vector::Vec2;
use crate::error::SceneError;
use crate::render::color::Color;

/// Marks the player's start cell; the cell itself is empty.
pub const SPAWN: char = 'P';

/// Maps layout characters to tiles. `' '`, `'.'` and [`SPAWN`] are always empty.
#[derive(Clone, Debug)]
pub struct Legend {
    tiles: HashMap<char, Tile>,
}

impl Legend {
    pub fn empty() -> Self {
        Self {
            tiles: HashMap::new(),
        }
    }

    pub fn insert(&mut self, ch: char, tile: Tile) -> &mut Self {
        self.tiles.insert(ch, tile);
        self
    }

    pub fn lookup(&self, ch: char) -> Option<Tile> {
        match ch {
            ' ' | '.' | SPAWN => Some(Tile::Empty),
            _ => self.tiles.get(&ch).copied(),
        }
    }
}

impl Default for Legend {
    /// `'#'` is a plain grey wall.
    fn default() -> Self {
        let mut legend = Self::empty();
        legend.insert('#', Tile::Color(Color::GRAY));
        legend
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Maze {
    pub scene: Scene,
    /// Centre of the [`SPAWN`] cell, if the layout has one.
    pub spawn: Option<Vec2>,
}

pub fn parse_maze(text: &str, legend: &Legend) -> Result<Maze, SceneError> {
    let mut lines: Vec<&str> = text.lines().collect();
    while lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }

    let mut rows = Vec::with_capacity(lines.len());
    let mut spawn = None;
    for (j, line) in lines.iter().enumerate() {
        let mut row = Vec::with_capacity(line.len());
        for (i, ch) in line.trim_end_matches('\r').chars().enumerate() {
            let tile = legend.lookup(ch).ok_or(SceneError::UnknownTile {
                ch,
                line: j + 1,
                column: i + 1,
            })?;
            if ch == SPAWN {
                spawn = Some(Vec2::new(i as f64 + 0.5, j as f64 + 0.5));
            }
            row.push(tile);
        }
        rows.push(row);
    }

    let scene = Scene::new(rows);
    debug!(size = ?scene.size(), ?spawn, "parsed maze");
    Ok(Maze { scene, spawn })
}

pub fn load_maze(path: impl AsRef<Path>, legend: &Legend) -> Result<Maze, SceneError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| SceneError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let maze = parse_maze(&text, legend)?;
    if maze.scene.size().1 == 0 {
        return Err(SceneError::Empty {
            path: path.to_path_buf(),
        });
    }
    Ok(maze)
}
