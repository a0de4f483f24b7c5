//! Error types for loading scenes, textures and configuration.
//!
//! The per-frame core (ray marching, casting, rendering, collision) is total
//! and never fails; errors only arise while assembling a scene at startup.

use std::path::PathBuf;

use thiserror::Error;

/// Failures while reading or parsing a maze layout.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("failed to read maze {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unknown tile {ch:?} at line {line}, column {column}")]
    UnknownTile { ch: char, line: usize, column: usize },

    #[error("maze {path} contains no rows")]
    Empty { path: PathBuf },
}

/// Failures while loading a texture image.
#[derive(Debug, Error)]
pub enum TextureError {
    #[error("failed to load texture {path}: {reason}")]
    Load { path: String, reason: String },

    #[error("texture {path} has no pixels")]
    Empty { path: String },
}

/// Invalid camera, viewport or player settings.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("near clipping plane must be positive, got {0}")]
    NonPositiveNearPlane(f64),

    #[error("far clip {far} must lie beyond the near plane {near}")]
    FarBeforeNear { near: f64, far: f64 },

    #[error("field of view must be within (0, pi) radians, got {0}")]
    InvalidFov(f64),

    #[error("viewport {width}x{height} is empty")]
    EmptyViewport { width: usize, height: usize },

    #[error("player size must be positive, got {0}")]
    NonPositivePlayerSize(f64),
}
