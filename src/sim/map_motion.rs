//! Map motion loop: flies the map opposite to the joystick offset
//!
//! Two strategies:
//! - Continuous: a fixed-duration linear retarget re-armed on completion
//!   for as long as the joystick is off center.
//! - Throttled: a periodic timer supersedes the running retarget on every
//!   fire; completions from superseded retargets are ignored by comparing
//!   their generation to the latest one issued.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::anim::{AnimationSlot, Completion, Driver, Interval, Timing};
use super::bounds::Bounds;
use super::state::ScreenEvent;

/// How the map offset follows the joystick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MotionStrategy {
    /// Re-arm on completion. `duration` in seconds.
    Continuous { duration: f32, speed: f32 },
    /// Retarget on a fixed timer. Both values in seconds.
    Throttled { interval: f32, duration: f32 },
}

impl MotionStrategy {
    fn duration(&self) -> f32 {
        match *self {
            MotionStrategy::Continuous { duration, .. } => duration,
            MotionStrategy::Throttled { duration, .. } => duration,
        }
    }

    fn speed(&self) -> f32 {
        match *self {
            MotionStrategy::Continuous { speed, .. } => speed,
            MotionStrategy::Throttled { .. } => 1.0,
        }
    }
}

/// Drives the map offset from the joystick offset
#[derive(Debug, Clone)]
pub struct MapMotion {
    pub strategy: MotionStrategy,
    /// Region map targets are clamped to, if any
    pub clamp: Option<Bounds>,
    slot: AnimationSlot,
    timer: Option<Interval>,
    /// Generation of the latest retarget; older completions are stale
    latest: u64,
}

impl MapMotion {
    pub fn new(strategy: MotionStrategy, clamp: Option<Bounds>) -> Self {
        let timer = match strategy {
            MotionStrategy::Throttled { interval, .. } => Some(Interval::new(interval)),
            MotionStrategy::Continuous { .. } => None,
        };
        Self {
            strategy,
            clamp,
            slot: AnimationSlot::new(),
            timer,
            latest: 0,
        }
    }

    /// Where the next retarget should head from `map` for a given joystick offset
    pub fn target_for(&self, map: Vec2, joystick: Vec2) -> Vec2 {
        let target = map - joystick * self.strategy.speed();
        match self.clamp {
            Some(bounds) => bounds.clamp(target),
            None => target,
        }
    }

    pub fn is_running(&self) -> bool {
        self.slot.is_running()
    }

    /// Generation of the latest retarget issued
    pub fn latest_generation(&self) -> u64 {
        self.latest
    }

    /// Joystick offset changed. Only the continuous loop reacts here, and
    /// only to arm itself when idle.
    pub fn on_joystick_changed(&mut self, map: Vec2, joystick: Vec2, events: &mut Vec<ScreenEvent>) {
        if let MotionStrategy::Continuous { .. } = self.strategy {
            if !self.slot.is_running() && joystick != Vec2::ZERO {
                log::debug!("Map loop armed by joystick {:?}", joystick);
                self.retarget(map, joystick, events);
            }
        }
    }

    /// Advance the timer (throttled) and the running retarget
    pub fn step(&mut self, map: &mut Vec2, joystick: Vec2, dt: f32, events: &mut Vec<ScreenEvent>) {
        let fires = self.timer.as_mut().map_or(0, |t| t.step(dt));
        for _ in 0..fires {
            self.on_timer(*map, joystick, events);
        }

        if let Some(completion) = self.slot.step(map, dt) {
            self.on_completion(completion, *map, joystick, events);
        }
    }

    fn on_timer(&mut self, map: Vec2, joystick: Vec2, events: &mut Vec<ScreenEvent>) {
        if joystick != Vec2::ZERO {
            self.retarget(map, joystick, events);
        } else if let Some(stopped) = self.slot.stop() {
            events.push(ScreenEvent::MapStopped);
            self.on_completion(stopped, map, joystick, events);
        }
    }

    fn retarget(&mut self, map: Vec2, joystick: Vec2, events: &mut Vec<ScreenEvent>) {
        let target = self.target_for(map, joystick);
        let timing = Timing::linear(map, target, self.strategy.duration());
        let (generation, superseded) = self.slot.start(Driver::Timing(timing));
        self.latest = generation;
        events.push(ScreenEvent::MapRetargeted { generation, target });
        if let Some(superseded) = superseded {
            self.on_completion(superseded, map, joystick, events);
        }
    }

    fn on_completion(
        &mut self,
        completion: Completion,
        map: Vec2,
        joystick: Vec2,
        events: &mut Vec<ScreenEvent>,
    ) {
        if let MotionStrategy::Throttled { .. } = self.strategy {
            if completion.generation != self.latest {
                log::trace!(
                    "Ignoring stale map completion {} (latest {})",
                    completion.generation,
                    self.latest
                );
                events.push(ScreenEvent::StaleCompletion {
                    generation: completion.generation,
                });
                return;
            }
            if !completion.finished {
                return;
            }
        }

        if joystick == Vec2::ZERO {
            log::debug!("Map loop stopped at {:?}", map);
            events.push(ScreenEvent::MapStopped);
        } else {
            self.retarget(map, joystick, events);
        }
    }
}
