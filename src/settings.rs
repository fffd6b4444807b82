//! Screen settings and variant presets
//!
//! Persisted in LocalStorage on the web, read from a JSON file natively.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::{Bounds, MotionStrategy, SpringConfig};

/// Shape of the region the joystick may travel in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoundsShape {
    Box,
    Disc,
}

/// The four screen variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Variant {
    /// Square joystick, continuous map loop
    #[default]
    BoxLoop,
    /// Square joystick, timer-throttled map loop
    BoxThrottled,
    /// Round joystick, map confined to the tile
    DiscClamped,
    /// Round joystick with heading icon
    DiscHeading,
}

impl Variant {
    pub const ALL: [Variant; 4] = [
        Variant::BoxLoop,
        Variant::BoxThrottled,
        Variant::DiscClamped,
        Variant::DiscHeading,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::BoxLoop => "box-loop",
            Variant::BoxThrottled => "box-throttled",
            Variant::DiscClamped => "disc-clamped",
            Variant::DiscHeading => "disc-heading",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "box-loop" | "1" => Some(Variant::BoxLoop),
            "box-throttled" | "2" => Some(Variant::BoxThrottled),
            "disc-clamped" | "3" => Some(Variant::DiscClamped),
            "disc-heading" | "4" => Some(Variant::DiscHeading),
            _ => None,
        }
    }

    pub fn bounds_shape(&self) -> BoundsShape {
        match self {
            Variant::BoxLoop | Variant::BoxThrottled => BoundsShape::Box,
            Variant::DiscClamped | Variant::DiscHeading => BoundsShape::Disc,
        }
    }

    pub fn throttled(&self) -> bool {
        *self == Variant::BoxThrottled
    }

    /// Whether map targets are confined to the tile
    pub fn clamps_map(&self) -> bool {
        *self == Variant::DiscClamped
    }

    pub fn shows_heading(&self) -> bool {
        *self == Variant::DiscHeading
    }
}

/// Rejected settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("{field} must be finite")]
    NotFinite { field: &'static str },

    #[error("avatar ({avatar}px) does not fit inside its bounds ({bounds}px)")]
    AvatarExceedsBounds { avatar: f32, bounds: f32 },

    #[error("tiles per side must be at least 1")]
    NoTiles,

    #[error("release spring would never settle (stiffness {stiffness}, damping {damping})")]
    SpringNeverSettles { stiffness: f32, damping: f32 },

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Screen settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub variant: Variant,

    // === Joystick ===
    /// Avatar edge length (px)
    pub avatar_size: f32,
    /// Square bounds edge length (px), box variants
    pub bounds_size: f32,
    /// Bounds radius (px), disc variants
    pub disc_radius: f32,

    // === Map ===
    /// Tile edge length (px)
    pub tile_size: f32,
    /// Cells per tile side
    pub tiles_per_side: u32,
    /// Continuous loop retarget duration (ms)
    pub map_motion_ms: f32,
    /// Map travel per unit joystick offset per retarget
    pub map_speed: f32,
    /// Throttled loop timer period (ms)
    pub throttle_interval_ms: f32,
    /// Throttled loop retarget duration (ms)
    pub throttle_motion_ms: f32,

    // === Release spring ===
    pub spring_tension: f32,
    pub spring_friction: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            variant: Variant::BoxLoop,

            avatar_size: AVATAR_SIZE,
            bounds_size: AVATAR_BOUNDS_SIZE,
            disc_radius: AVATAR_DISC_RADIUS,

            tile_size: TILE_SIZE,
            tiles_per_side: TILES_PER_SIDE,
            map_motion_ms: MAP_MOTION_MS,
            map_speed: MAP_SPEED,
            throttle_interval_ms: THROTTLE_INTERVAL_MS,
            throttle_motion_ms: THROTTLE_MOTION_MS,

            spring_tension: SPRING_TENSION,
            spring_friction: SPRING_FRICTION,
        }
    }
}

impl Settings {
    /// Default tunables for a variant
    pub fn from_variant(variant: Variant) -> Self {
        Self {
            variant,
            ..Self::default()
        }
    }

    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that every tunable is usable
    pub fn validate(&self) -> Result<(), SettingsError> {
        let positive = [
            ("avatar_size", self.avatar_size),
            ("bounds_size", self.bounds_size),
            ("disc_radius", self.disc_radius),
            ("tile_size", self.tile_size),
            ("map_motion_ms", self.map_motion_ms),
            ("throttle_interval_ms", self.throttle_interval_ms),
            ("throttle_motion_ms", self.throttle_motion_ms),
        ];
        for (field, value) in positive {
            if !value.is_finite() {
                return Err(SettingsError::NotFinite { field });
            }
            if value <= 0.0 {
                return Err(SettingsError::NotPositive { field, value });
            }
        }

        for (field, value) in [
            ("map_speed", self.map_speed),
            ("spring_tension", self.spring_tension),
            ("spring_friction", self.spring_friction),
        ] {
            if !value.is_finite() {
                return Err(SettingsError::NotFinite { field });
            }
        }

        let spring = self.spring();
        let (stiffness, damping) = (spring.stiffness(), spring.damping());
        if stiffness <= 0.0 || damping <= 0.0 {
            return Err(SettingsError::SpringNeverSettles { stiffness, damping });
        }

        if self.avatar_size > self.bounds_size {
            return Err(SettingsError::AvatarExceedsBounds {
                avatar: self.avatar_size,
                bounds: self.bounds_size,
            });
        }
        if self.tiles_per_side == 0 {
            return Err(SettingsError::NoTiles);
        }
        Ok(())
    }

    /// Region the joystick offset is confined to
    pub fn joystick_bounds(&self) -> Bounds {
        match self.variant.bounds_shape() {
            BoundsShape::Box => Bounds::avatar_box(self.bounds_size, self.avatar_size),
            BoundsShape::Disc => Bounds::disc(self.disc_radius),
        }
    }

    /// Map loop strategy (durations converted to seconds)
    pub fn map_strategy(&self) -> MotionStrategy {
        if self.variant.throttled() {
            MotionStrategy::Throttled {
                interval: self.throttle_interval_ms / 1000.0,
                duration: self.throttle_motion_ms / 1000.0,
            }
        } else {
            MotionStrategy::Continuous {
                duration: self.map_motion_ms / 1000.0,
                speed: self.map_speed,
            }
        }
    }

    /// Half a tile per axis when the variant confines the map
    pub fn map_clamp(&self) -> Option<Bounds> {
        self.variant
            .clamps_map()
            .then(|| Bounds::square(self.tile_size / 2.0))
    }

    pub fn spring(&self) -> SpringConfig {
        SpringConfig {
            tension: self.spring_tension,
            friction: self.spring_friction,
        }
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "joystick_pan_settings";

    /// Settings file read by the native binary
    pub const FILE_NAME: &'static str = "joystick_pan.json";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            match self.to_json() {
                Ok(json) => {
                    let _ = storage.set_item(Self::STORAGE_KEY, &json);
                    log::info!("Settings saved");
                }
                Err(e) => log::warn!("Could not save settings: {}", e),
            }
        }
    }

    /// Read settings from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings from `FILE_NAME` in the working directory, falling back to defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let path = std::path::Path::new(Self::FILE_NAME);
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Write settings as JSON to `path`
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to(&self, path: &std::path::Path) -> Result<(), SettingsError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Save settings to `FILE_NAME` in the working directory
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        let path = std::path::Path::new(Self::FILE_NAME);
        match self.save_to(path) {
            Ok(()) => log::info!("Settings saved to {}", path.display()),
            Err(e) => log::warn!("Could not save settings: {}", e),
        }
    }
}
