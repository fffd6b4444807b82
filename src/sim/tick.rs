//! Fixed timestep controller tick
//!
//! Order within a tick:
//! 1. Apply the gesture (start / move / end)
//! 2. Advance the release spring
//! 3. If the joystick moved: update the heading and notify the map loop
//! 4. Advance the map timer and the running map animation

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::joystick::JoystickPhase;
use super::state::{ScreenEvent, ScreenState};

/// Touch gesture delivered by the host. Deltas are cumulative since touch down.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GestureEvent {
    Start,
    Move { dx: f32, dy: f32 },
    End,
}

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Gestures received since the previous tick, in arrival order
    pub gestures: Vec<GestureEvent>,
}

impl TickInput {
    pub fn gesture(event: GestureEvent) -> Self {
        Self {
            gestures: vec![event],
        }
    }
}

/// Advance the controller by one fixed timestep
pub fn tick(state: &mut ScreenState, input: &TickInput, dt: f32) {
    let mut joystick_moved = false;

    for gesture in &input.gestures {
        match *gesture {
            GestureEvent::Start => {
                state.joystick.begin_drag();
                state.events.push(ScreenEvent::DragStarted);
                log::debug!("Drag started");
            }
            GestureEvent::Move { dx, dy } => {
                joystick_moved |= state.joystick.drag_to(Vec2::new(dx, dy));
            }
            GestureEvent::End => {
                if state.joystick.phase == JoystickPhase::Dragging {
                    let from = state.joystick.offset;
                    state.joystick.release();
                    state.events.push(ScreenEvent::Released { from });
                    log::debug!("Released at {:?}", from);
                }
            }
        }
    }

    let was_releasing = state.joystick.phase == JoystickPhase::Releasing;
    joystick_moved |= state.joystick.step(dt);
    if was_releasing && state.joystick.phase == JoystickPhase::Idle {
        state.events.push(ScreenEvent::Settled);
    }

    let joystick = state.joystick.offset;
    if joystick_moved {
        if let Some(heading) = state.heading.as_mut() {
            heading.update(joystick);
        }
        state
            .map_motion
            .on_joystick_changed(state.map, joystick, &mut state.events);
    }

    state
        .map_motion
        .step(&mut state.map, joystick, dt, &mut state.events);

    state.time_ticks += 1;
}
