//! Scripted drag sessions
//!
//! Generates reproducible finger strokes from a seed and plays them through
//! the controller. Used by the native binary (there is no touch screen
//! there) and by integration tests.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::SIM_DT;
use crate::polar_to_cartesian;
use crate::sim::{GestureEvent, ScreenEvent, ScreenState, TickInput, tick};

/// Ticks a stroke takes to reach full reach
pub const RAMP_TICKS: u32 = 12;

/// One touch: press, slide out along `direction`, hold, lift, rest
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    /// Radians, screen space (y down)
    pub direction: f32,
    /// Raw finger travel in px (may exceed the joystick bounds)
    pub reach: f32,
    /// Ticks between touch down and lift
    pub hold_ticks: u32,
    /// Idle ticks after lift
    pub rest_ticks: u32,
}

impl Stroke {
    /// Cumulative finger delta `t` ticks after touch down
    pub fn delta_at(&self, t: u32) -> Vec2 {
        let progress = (t as f32 / RAMP_TICKS as f32).min(1.0);
        polar_to_cartesian(self.reach * progress, self.direction)
    }

    pub fn len_ticks(&self) -> u32 {
        self.hold_ticks + self.rest_ticks + 1
    }
}

/// A sequence of strokes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DragScript {
    pub seed: u64,
    pub strokes: Vec<Stroke>,
}

impl DragScript {
    /// Random strokes from `seed`; the same seed always gives the same script
    pub fn random(seed: u64, count: usize) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let strokes = (0..count)
            .map(|_| Stroke {
                direction: rng.random_range(-std::f32::consts::PI..std::f32::consts::PI),
                reach: rng.random_range(10.0..150.0),
                hold_ticks: rng.random_range(30..240),
                rest_ticks: rng.random_range(0..360),
            })
            .collect();
        Self { seed, strokes }
    }

    /// Per-tick inputs for the whole script
    pub fn inputs(&self) -> impl Iterator<Item = TickInput> + '_ {
        self.strokes.iter().flat_map(|stroke| {
            (0..stroke.len_ticks()).map(move |t| {
                let gestures = if t == 0 {
                    vec![GestureEvent::Start]
                } else if t < stroke.hold_ticks {
                    let d = stroke.delta_at(t);
                    vec![GestureEvent::Move { dx: d.x, dy: d.y }]
                } else if t == stroke.hold_ticks {
                    vec![GestureEvent::End]
                } else {
                    Vec::new()
                };
                TickInput { gestures }
            })
        })
    }
}

/// Summary of a played session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionReport {
    pub ticks: u64,
    pub strokes: usize,
    pub retargets: usize,
    pub stale_completions: usize,
    pub settles: usize,
    /// Largest joystick distance from center seen
    pub max_reach: f32,
    pub final_map: Vec2,
}

impl SessionReport {
    fn record(&mut self, events: &[ScreenEvent]) {
        for event in events {
            match event {
                ScreenEvent::DragStarted => self.strokes += 1,
                ScreenEvent::MapRetargeted { .. } => self.retargets += 1,
                ScreenEvent::StaleCompletion { .. } => self.stale_completions += 1,
                ScreenEvent::Settled => self.settles += 1,
                ScreenEvent::Released { .. } | ScreenEvent::MapStopped => {}
            }
        }
    }
}

/// Play `script` through `state`, then idle for `cooldown_ticks`
pub fn play(state: &mut ScreenState, script: &DragScript, cooldown_ticks: u32) -> SessionReport {
    let mut report = SessionReport::default();
    let idle = TickInput::default();

    let inputs = script
        .inputs()
        .chain(std::iter::repeat_n(idle, cooldown_ticks as usize));
    for input in inputs {
        tick(state, &input, SIM_DT);
        report.max_reach = report.max_reach.max(state.joystick.offset.length());
        let events = state.drain_events();
        report.record(&events);
    }

    report.ticks = state.time_ticks;
    report.final_map = state.map;
    log::debug!("Session seed {} finished: {:?}", script.seed, report);
    report
}
