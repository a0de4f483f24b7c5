//! Runtime configuration: screen, camera, player and minimap settings.

use std::env;
use std::f64::consts::{FRAC_PI_2, PI};
use std::path::PathBuf;

use crate::error::ConfigError;

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub screen: ScreenConfig,
    pub camera: CameraConfig,
    pub player: PlayerConfig,
    pub minimap: MinimapConfig,
    pub scene_path: PathBuf,
}

impl Config {
    pub const DEFAULT_SCENE: &'static str = "assets/maze.txt";

    pub fn new() -> Self {
        Self {
            screen: ScreenConfig::default(),
            camera: CameraConfig::default(),
            player: PlayerConfig::default(),
            minimap: MinimapConfig::default(),
            scene_path: PathBuf::from(Self::DEFAULT_SCENE),
        }
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `GRIDCASTER_WIDTH` / `GRIDCASTER_HEIGHT` - window size in pixels (default: 1280x720)
    /// - `GRIDCASTER_FACTOR` - window pixels per rendered pixel (default: 4)
    /// - `GRIDCASTER_FOV_DEG` - horizontal field of view in degrees (default: 90)
    /// - `GRIDCASTER_NEAR` / `GRIDCASTER_FAR` - clipping distances in cells (default: 0.25 / 20)
    /// - `GRIDCASTER_PLAYER_SIZE` - side of the collision square (default: 0.5)
    /// - `GRIDCASTER_PLAYER_SPEED` - cells per second (default: 2.0)
    /// - `GRIDCASTER_TURN_SPEED` - radians per second (default: 0.75 pi)
    /// - `GRIDCASTER_MINIMAP` - show the minimap (default: true)
    /// - `GRIDCASTER_MINIMAP_SCALE` - minimap width as a fraction of the viewport (default: 0.25)
    /// - `GRIDCASTER_TRACE_RAY` - draw the centre ray's grid crossings (default: false)
    /// - `GRIDCASTER_SCENE` - maze layout file (default: assets/maze.txt)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Config::from_env`] with an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| lookup(key);
        let mut config = Self::new();

        if let Some(width) = parse(read("GRIDCASTER_WIDTH")) {
            config.screen.width = width;
        }
        if let Some(height) = parse(read("GRIDCASTER_HEIGHT")) {
            config.screen.height = height;
        }
        if let Some(factor) = parse::<usize>(read("GRIDCASTER_FACTOR")) {
            config.screen.factor = factor.max(1);
        }

        if let Some(degrees) = parse::<f64>(read("GRIDCASTER_FOV_DEG")) {
            config.camera.fov = degrees.to_radians();
        }
        if let Some(near) = parse(read("GRIDCASTER_NEAR")) {
            config.camera.near_plane = near;
        }
        if let Some(far) = parse(read("GRIDCASTER_FAR")) {
            config.camera.far_clip = far;
        }

        if let Some(size) = parse(read("GRIDCASTER_PLAYER_SIZE")) {
            config.player.size = size;
        }
        if let Some(speed) = parse(read("GRIDCASTER_PLAYER_SPEED")) {
            config.player.speed = speed;
        }
        if let Some(turn) = parse(read("GRIDCASTER_TURN_SPEED")) {
            config.player.turn_speed = turn;
        }

        if let Some(enabled) = parse_bool(read("GRIDCASTER_MINIMAP")) {
            config.minimap.enabled = enabled;
        }
        if let Some(scale) = parse::<f64>(read("GRIDCASTER_MINIMAP_SCALE")) {
            config.minimap.scale = scale.clamp(0.05, 1.0);
        }
        if let Some(trace) = parse_bool(read("GRIDCASTER_TRACE_RAY")) {
            config.minimap.trace_ray = trace;
        }

        if let Some(path) = read("GRIDCASTER_SCENE") {
            config.scene_path = PathBuf::from(path);
        }

        config
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.camera.validate()?;
        let (width, height) = self.screen.viewport();
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyViewport { width, height });
        }
        if !(self.player.size > 0.0) {
            return Err(ConfigError::NonPositivePlayerSize(self.player.size));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScreenConfig {
    pub width: usize,
    pub height: usize,
    /// Window pixels per rendered pixel.
    pub factor: usize,
}

impl ScreenConfig {
    /// Resolution of the rendered image before it is scaled to the window.
    pub fn viewport(&self) -> (usize, usize) {
        let factor = self.factor.max(1);
        (self.width / factor, self.height / factor)
    }
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            factor: 4,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CameraConfig {
    /// Horizontal field of view in radians.
    pub fov: f64,
    pub near_plane: f64,
    /// Maximum marched distance before a ray gives up.
    pub far_clip: f64,
}

impl CameraConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.near_plane > 0.0) {
            return Err(ConfigError::NonPositiveNearPlane(self.near_plane));
        }
        if !(self.far_clip > self.near_plane) {
            return Err(ConfigError::FarBeforeNear {
                near: self.near_plane,
                far: self.far_clip,
            });
        }
        if !(self.fov > 0.0 && self.fov < PI) {
            return Err(ConfigError::InvalidFov(self.fov));
        }
        Ok(())
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov: FRAC_PI_2,
            near_plane: 0.25,
            far_clip: 20.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlayerConfig {
    /// Side length of the square collision footprint, in cells.
    pub size: f64,
    pub speed: f64,
    pub turn_speed: f64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            size: 0.5,
            speed: 2.0,
            turn_speed: PI * 0.75,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MinimapConfig {
    pub enabled: bool,
    /// Minimap width as a fraction of the viewport width.
    pub scale: f64,
    pub trace_ray: bool,
}

impl Default for MinimapConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            scale: 0.25,
            trace_ray: false,
        }
    }
}

fn parse<T>(value: Option<String>) -> Option<T>
where
    T: std::str::FromStr,
{
    value?.trim().parse().ok()
}

fn parse_bool(value: Option<String>) -> Option<bool> {
    match value?.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
