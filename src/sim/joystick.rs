//! Joystick position state machine
//!
//! Idle -> Dragging on gesture start, Dragging -> Releasing on gesture end,
//! Releasing -> Idle once the spring settles. The offset has exactly one
//! writer at a time: the live gesture while dragging, the spring while
//! releasing.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::anim::{AnimationSlot, Driver, Spring, SpringConfig};
use super::bounds::Bounds;

/// Current phase of the joystick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum JoystickPhase {
    /// At rest in the center
    #[default]
    Idle,
    /// Following the finger
    Dragging,
    /// Springing back to center
    Releasing,
}

/// The draggable avatar
#[derive(Debug, Clone)]
pub struct Joystick {
    /// Offset from the rest position (always within `bounds`)
    pub offset: Vec2,
    pub phase: JoystickPhase,
    pub bounds: Bounds,
    pub spring: SpringConfig,
    release: AnimationSlot,
}

impl Joystick {
    pub fn new(bounds: Bounds, spring: SpringConfig) -> Self {
        Self {
            offset: Vec2::ZERO,
            phase: JoystickPhase::Idle,
            bounds,
            spring,
            release: AnimationSlot::new(),
        }
    }

    /// Touch down: take the offset over from any in-flight release spring
    pub fn begin_drag(&mut self) {
        if self.release.stop().is_some() {
            log::debug!("Release spring interrupted at {:?}", self.offset);
        }
        self.phase = JoystickPhase::Dragging;
    }

    /// Finger moved; `delta` is cumulative since touch down.
    /// Returns true if the offset changed.
    pub fn drag_to(&mut self, delta: Vec2) -> bool {
        if self.phase != JoystickPhase::Dragging {
            return false;
        }
        let clamped = self.bounds.clamp(delta);
        let changed = clamped != self.offset;
        self.offset = clamped;
        changed
    }

    /// Touch up: spring back toward the rest position
    pub fn release(&mut self) {
        if self.phase != JoystickPhase::Dragging {
            return;
        }
        let spring = Spring::new(self.offset, Vec2::ZERO, Vec2::ZERO, self.spring);
        self.release.start(Driver::Spring(spring));
        self.phase = JoystickPhase::Releasing;
    }

    /// Advance the release spring. Returns true if the offset changed.
    pub fn step(&mut self, dt: f32) -> bool {
        if self.phase != JoystickPhase::Releasing {
            return false;
        }
        let before = self.offset;
        if let Some(completion) = self.release.step(&mut self.offset, dt) {
            if completion.finished {
                self.offset = Vec2::ZERO;
                self.phase = JoystickPhase::Idle;
                log::debug!("Joystick settled at center");
            }
        }
        self.offset != before
    }

    pub fn is_centered(&self) -> bool {
        self.offset == Vec2::ZERO
    }
}
