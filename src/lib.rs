//! Joystick Pan - a virtual joystick that flies a tiled map view
//!
//! Core modules:
//! - `sim`: Deterministic controller (bounds, animations, joystick, map motion)
//! - `map`: Tiled map grid and viewport culling
//! - `renderer`: Conversion of controller state into view transforms
//! - `session`: Seeded, scripted drag sessions
//! - `settings`: Variant presets and tunables

pub mod map;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use map::TileGrid;
pub use settings::{Settings, SettingsError, Variant};

use glam::Vec2;

/// Controller configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz, finer than a display frame)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Joystick avatar (the draggable knob)
    pub const AVATAR_SIZE: f32 = 30.0;
    /// Square the avatar is allowed to travel in
    pub const AVATAR_BOUNDS_SIZE: f32 = 120.0;
    /// Disc radius for the circular joystick variants
    pub const AVATAR_DISC_RADIUS: f32 = 60.0;

    /// Map tile dimensions
    pub const TILE_SIZE: f32 = 800.0;
    pub const TILES_PER_SIDE: u32 = 10;

    /// Continuous map loop: one retarget every 200 ms
    pub const MAP_MOTION_MS: f32 = 200.0;
    /// Map travel per unit of joystick offset per retarget
    pub const MAP_SPEED: f32 = 0.8;

    /// Throttled map loop
    pub const THROTTLE_INTERVAL_MS: f32 = 100.0;
    pub const THROTTLE_MOTION_MS: f32 = 500.0;

    /// Release spring (origami-style tension/friction)
    pub const SPRING_TENSION: f32 = 40.0;
    pub const SPRING_FRICTION: f32 = 100.0;

    /// Heading icon points up, so zero heading is a quarter turn from +x
    pub const HEADING_OFFSET_DEG: f32 = 90.0;
}

/// Convert cartesian (x, y) to polar (r, theta)
#[inline]
pub fn cartesian_to_polar(pos: Vec2) -> (f32, f32) {
    (pos.length(), pos.y.atan2(pos.x))
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Screen-space heading of an offset in degrees (y grows downward)
#[inline]
pub fn heading_degrees(offset: Vec2) -> f32 {
    offset.y.atan2(offset.x).to_degrees() + consts::HEADING_OFFSET_DEG
}
