//! Heading feedback for the directional icon

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::heading_degrees;

/// Heading of the directional icon in degrees (0 = pointing up)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Heading {
    pub degrees: f32,
}

impl Heading {
    /// Follow the joystick. Near-center offsets (rounding to zero) leave the
    /// last heading in place, so the icon keeps pointing where it last flew.
    /// Halves round up (toward +inf) on both axes.
    pub fn update(&mut self, offset: Vec2) -> bool {
        if (offset + Vec2::splat(0.5)).floor() == Vec2::ZERO {
            return false;
        }
        self.degrees = heading_degrees(offset);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_up_is_zero() {
        let mut heading = Heading::default();
        assert!(heading.update(Vec2::new(0.0, -10.0)));
        assert!(heading.degrees.abs() < 1e-4);
    }

    #[test]
    fn test_left_is_three_quarter_turn() {
        let mut heading = Heading::default();
        heading.update(Vec2::new(-10.0, 0.0));
        assert!((heading.degrees - 270.0).abs() < 1e-3);
    }

    #[test]
    fn test_keeps_last_heading_near_center() {
        let mut heading = Heading::default();
        heading.update(Vec2::new(10.0, 0.0));
        assert!(!heading.update(Vec2::new(0.3, -0.4)));
        assert!(!heading.update(Vec2::ZERO));
        assert!((heading.degrees - 90.0).abs() < 1e-4);
    }

    #[test]
    fn test_halves_round_up() {
        let mut heading = Heading::default();
        heading.update(Vec2::new(0.0, -10.0));
        // -0.5 rounds to 0: still centered
        assert!(!heading.update(Vec2::new(-0.5, 0.0)));
        assert!(!heading.update(Vec2::new(0.0, -0.5)));
        assert!(heading.degrees.abs() < 1e-4);
        // 0.5 rounds to 1: off center
        assert!(heading.update(Vec2::new(0.5, 0.0)));
        assert!((heading.degrees - 90.0).abs() < 1e-4);
    }
}
