//! Grid raycaster: DDA ray marching over a tile grid, perspective-correct
//! column rendering, a top-down minimap and square-footprint movement.
//!
//! Everything renders through [`render::surface::Surface`], so the library
//! runs headless; the `window` feature adds the raylib front end.

pub mod config;
pub mod core;
pub mod error;
pub mod render;

pub use config::Config;
