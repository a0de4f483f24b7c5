//! Rendering utilities and the 3D renderer.
//!
//! Re-exports:
//! - `color`: RGBA colour value
//! - `surface`: Drawing-surface trait and transform
//! - `framebuffer`: CPU framebuffer and its software surface
//! - `line`: Bresenham integer line drawing
//! - `textures`: Pixmap registry with fallbacks
//! - `casters`: Grid ray marching and ray casting
//! - `render3d`: Column renderer for walls, floor and ceiling
//! - `minimap`: Top-down diagnostic view

pub mod color;
pub mod surface;
pub mod framebuffer;
pub mod line;
pub mod textures;
pub mod casters;
pub mod render3d;
pub mod minimap;
