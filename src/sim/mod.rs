//! Deterministic screen controller
//!
//! All joystick and map logic lives here. This module must stay pure:
//! - Fixed timestep only
//! - Animations advance only through `tick`
//! - No rendering or platform dependencies

pub mod anim;
pub mod bounds;
pub mod joystick;
pub mod map_motion;
pub mod rotation;
pub mod state;
pub mod tick;

pub use anim::{AnimationSlot, Completion, Driver, Interval, Spring, SpringConfig, Timing};
pub use bounds::{AxisRange, Bounds};
pub use joystick::{Joystick, JoystickPhase};
pub use map_motion::{MapMotion, MotionStrategy};
pub use rotation::Heading;
pub use state::{ScreenEvent, ScreenState};
pub use tick::{GestureEvent, TickInput, tick};
