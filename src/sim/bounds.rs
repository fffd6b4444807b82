//! Bound clamping for joystick offsets and map targets
//!
//! Two shapes are supported:
//! - Box: each axis clamped independently to its own min/max
//! - Disc: magnitude capped at a radius, direction preserved

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::{cartesian_to_polar, polar_to_cartesian};

/// Allowed range along one axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub min: f32,
    pub max: f32,
}

impl AxisRange {
    pub fn symmetric(extent: f32) -> Self {
        Self {
            min: -extent,
            max: extent,
        }
    }

    #[inline]
    pub fn clamp(&self, v: f32) -> f32 {
        if v > self.max {
            self.max
        } else if v < self.min {
            self.min
        } else {
            v
        }
    }

    #[inline]
    pub fn contains(&self, v: f32) -> bool {
        v >= self.min && v <= self.max
    }
}

/// Region an offset is constrained to, centered on the rest position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Bounds {
    Box { x: AxisRange, y: AxisRange },
    Disc { radius: f32 },
}

impl Bounds {
    /// Square bounds for an avatar of `avatar_size` travelling inside a
    /// square of `bounds_size`: the avatar edge stops at the bounds edge.
    pub fn avatar_box(bounds_size: f32, avatar_size: f32) -> Self {
        let m = bounds_size / 2.0 - avatar_size / 2.0;
        Self::square(m)
    }

    /// Square of half-extent `m` per axis
    pub fn square(m: f32) -> Self {
        Bounds::Box {
            x: AxisRange::symmetric(m),
            y: AxisRange::symmetric(m),
        }
    }

    pub fn disc(radius: f32) -> Self {
        Bounds::Disc { radius }
    }

    /// Clamp a raw gesture delta into the region.
    ///
    /// Out-of-bounds disc input is projected onto the circle at the same
    /// angle; in-bounds input is returned unchanged for both shapes.
    /// Non-finite components fall back to the rest position on that axis.
    pub fn clamp(&self, raw: Vec2) -> Vec2 {
        let raw = Vec2::new(finite_or_rest(raw.x), finite_or_rest(raw.y));
        match *self {
            Bounds::Box { x, y } => Vec2::new(x.clamp(raw.x), y.clamp(raw.y)),
            Bounds::Disc { radius } => {
                let (distance, theta) = cartesian_to_polar(raw);
                if distance > radius {
                    polar_to_cartesian(radius, theta)
                } else {
                    raw
                }
            }
        }
    }

    /// Whether `p` lies inside the region (with a small tolerance on the disc rim)
    pub fn contains(&self, p: Vec2) -> bool {
        match *self {
            Bounds::Box { x, y } => x.contains(p.x) && y.contains(p.y),
            Bounds::Disc { radius } => p.length() <= radius + 1e-3,
        }
    }
}

#[inline]
fn finite_or_rest(v: f32) -> f32 {
    if v.is_finite() { v } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_avatar_box_extent() {
        let bounds = Bounds::avatar_box(120.0, 30.0);
        assert_eq!(
            bounds,
            Bounds::Box {
                x: AxisRange { min: -45.0, max: 45.0 },
                y: AxisRange { min: -45.0, max: 45.0 },
            }
        );
    }

    #[test]
    fn test_box_clamps_each_axis() {
        let bounds = Bounds::avatar_box(120.0, 30.0);
        assert_eq!(bounds.clamp(Vec2::new(100.0, -10.0)), Vec2::new(45.0, -10.0));
        assert_eq!(bounds.clamp(Vec2::new(-80.0, -90.0)), Vec2::new(-45.0, -45.0));
    }

    #[test]
    fn test_disc_rescales_to_rim() {
        let bounds = Bounds::disc(60.0);
        let out = bounds.clamp(Vec2::new(60.0, 80.0));
        assert!((out.x - 36.0).abs() < 1e-3);
        assert!((out.y - 48.0).abs() < 1e-3);
    }

    #[test]
    fn test_disc_leaves_inside_point() {
        let bounds = Bounds::disc(60.0);
        let p = Vec2::new(-20.0, 30.0);
        assert_eq!(bounds.clamp(p), p);
    }

    #[test]
    fn test_disc_zero_stays_zero() {
        assert_eq!(Bounds::disc(60.0).clamp(Vec2::ZERO), Vec2::ZERO);
    }

    #[test]
    fn test_non_finite_input_falls_back_to_rest() {
        let box_bounds = Bounds::avatar_box(120.0, 30.0);
        assert_eq!(box_bounds.clamp(Vec2::new(f32::NAN, 5.0)), Vec2::new(0.0, 5.0));
        assert_eq!(box_bounds.clamp(Vec2::new(10.0, f32::INFINITY)), Vec2::new(10.0, 0.0));

        let disc = Bounds::disc(60.0);
        let out = disc.clamp(Vec2::new(f32::NEG_INFINITY, 80.0));
        assert!(out.x.abs() < 1e-3 && (out.y - 60.0).abs() < 1e-3);
        assert_eq!(disc.clamp(Vec2::splat(f32::NAN)), Vec2::ZERO);
    }

    fn any_axis() -> impl Strategy<Value = f32> {
        prop_oneof![
            4 => -1000.0f32..1000.0,
            1 => Just(f32::NAN),
            1 => Just(f32::INFINITY),
            1 => Just(f32::NEG_INFINITY),
        ]
    }

    proptest! {
        #[test]
        fn output_is_finite_and_within_bounds(dx in any_axis(), dy in any_axis()) {
            for bounds in [Bounds::avatar_box(120.0, 30.0), Bounds::disc(60.0)] {
                let out = bounds.clamp(Vec2::new(dx, dy));
                prop_assert!(out.is_finite());
                prop_assert!(bounds.contains(out));
            }
        }

        #[test]
        fn box_output_within_bounds(dx in -1000.0f32..1000.0, dy in -1000.0f32..1000.0) {
            let bounds = Bounds::avatar_box(120.0, 30.0);
            let out = bounds.clamp(Vec2::new(dx, dy));
            prop_assert!(out.x.abs() <= 45.0 && out.y.abs() <= 45.0);
        }

        #[test]
        fn disc_output_within_radius(dx in -1000.0f32..1000.0, dy in -1000.0f32..1000.0) {
            let out = Bounds::disc(60.0).clamp(Vec2::new(dx, dy));
            prop_assert!(out.length() <= 60.0 + 1e-3);
        }

        #[test]
        fn disc_preserves_direction(dx in -1000.0f32..1000.0, dy in -1000.0f32..1000.0) {
            let raw = Vec2::new(dx, dy);
            prop_assume!(raw.length() > 60.0);
            let out = Bounds::disc(60.0).clamp(raw);
            let diff = (out.y.atan2(out.x) - dy.atan2(dx)).abs();
            prop_assert!(diff < 1e-3 || (diff - std::f32::consts::TAU).abs() < 1e-3);
        }

        #[test]
        fn clamp_is_idempotent(dx in -1000.0f32..1000.0, dy in -1000.0f32..1000.0) {
            for bounds in [Bounds::avatar_box(120.0, 30.0), Bounds::disc(60.0)] {
                let once = bounds.clamp(Vec2::new(dx, dy));
                let twice = bounds.clamp(once);
                prop_assert!((once - twice).length() < 1e-3);
            }
        }
    }
}
