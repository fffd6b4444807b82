//! Screen controller state
//!
//! Everything the screen mutates lives in `ScreenState` and is only
//! written by `tick`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::joystick::{Joystick, JoystickPhase};
use super::map_motion::MapMotion;
use super::rotation::Heading;
use crate::settings::Settings;

/// Things that happened during a tick, drained by the front-end
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ScreenEvent {
    /// Finger went down on the joystick
    DragStarted,
    /// Finger lifted; the spring takes over from `from`
    Released { from: Vec2 },
    /// Joystick came back to rest
    Settled,
    /// A new map animation was started toward `target`
    MapRetargeted { generation: u64, target: Vec2 },
    /// Map loop went idle
    MapStopped,
    /// A superseded map animation ended and was ignored
    StaleCompletion { generation: u64 },
}

/// Complete controller state for one screen
#[derive(Debug, Clone)]
pub struct ScreenState {
    pub joystick: Joystick,
    /// Map offset; written only by `map_motion`
    pub map: Vec2,
    pub map_motion: MapMotion,
    /// Present only when the variant shows a heading icon
    pub heading: Option<Heading>,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events since the last drain
    pub events: Vec<ScreenEvent>,
}

impl ScreenState {
    /// Create the controller for the configured variant
    pub fn new(settings: &Settings) -> Self {
        Self {
            joystick: Joystick::new(settings.joystick_bounds(), settings.spring()),
            map: Vec2::ZERO,
            map_motion: MapMotion::new(settings.map_strategy(), settings.map_clamp()),
            heading: settings.variant.shows_heading().then(Heading::default),
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    /// Drain events accumulated since the last call
    pub fn drain_events(&mut self) -> Vec<ScreenEvent> {
        std::mem::take(&mut self.events)
    }

    /// True when nothing is moving and nothing will move without input
    pub fn is_at_rest(&self) -> bool {
        self.joystick.phase == JoystickPhase::Idle && !self.map_motion.is_running()
    }
}
