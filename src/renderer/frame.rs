//! View transforms for one rendered frame
//!
//! The controller state is read once per frame and turned into the
//! translations and rotation the host applies to its views.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::{JoystickPhase, ScreenState};

/// Everything the host needs to draw a frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    /// Avatar translation from the joystick center
    pub avatar: Vec2,
    /// Map translation
    pub map: Vec2,
    /// Icon heading in degrees, for variants that show one
    pub heading: Option<f32>,
    pub phase: JoystickPhase,
}

impl RenderFrame {
    pub fn capture(state: &ScreenState) -> Self {
        Self {
            avatar: state.joystick.offset,
            map: state.map,
            heading: state.heading.map(|h| h.degrees),
            phase: state.joystick.phase,
        }
    }

    /// Heading as a fraction of a full turn (360 degrees = 1 turn, linear)
    pub fn heading_turns(&self) -> Option<f32> {
        self.heading.map(|deg| deg / 360.0)
    }

    pub fn avatar_transform(&self) -> String {
        translate(self.avatar)
    }

    pub fn map_transform(&self) -> String {
        translate(self.map)
    }

    pub fn heading_transform(&self) -> Option<String> {
        self.heading_turns().map(|turns| format!("rotate({:.4}turn)", turns))
    }
}

fn translate(v: Vec2) -> String {
    format!("translate({:.2}px, {:.2}px)", v.x, v.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{Settings, Variant};
    use crate::sim::Heading;

    #[test]
    fn test_capture_box_variant() {
        let mut state = ScreenState::new(&Settings::from_variant(Variant::BoxLoop));
        state.joystick.offset = Vec2::new(45.0, -10.0);
        state.map = Vec2::new(-8.0, 0.0);
        let frame = RenderFrame::capture(&state);
        assert_eq!(frame.avatar_transform(), "translate(45.00px, -10.00px)");
        assert_eq!(frame.map_transform(), "translate(-8.00px, 0.00px)");
        assert_eq!(frame.heading_transform(), None);
    }

    #[test]
    fn test_heading_maps_full_turn() {
        let mut state = ScreenState::new(&Settings::from_variant(Variant::DiscHeading));
        state.heading = Some(Heading { degrees: 90.0 });
        let frame = RenderFrame::capture(&state);
        assert_eq!(frame.heading_turns(), Some(0.25));
        assert_eq!(frame.heading_transform().as_deref(), Some("rotate(0.2500turn)"));

        state.heading = Some(Heading { degrees: 450.0 });
        assert_eq!(RenderFrame::capture(&state).heading_turns(), Some(1.25));
    }
}
