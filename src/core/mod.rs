//! World model and per-frame logic.
//!
//! Re-exports:
//! - `vector`: 2D vector math
//! - `scene`: Tile grid with floor and ceiling planes
//! - `maze`: Text layout loading
//! - `player`: Player data and field-of-view projection
//! - `process_events`: Input flags, collision and movement

pub mod vector;
pub mod scene;
pub mod maze;
pub mod player;
pub mod process_events;
