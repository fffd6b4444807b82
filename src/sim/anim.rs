//! Animation primitives stepped by the simulation clock
//!
//! Every animated value owns exactly one `AnimationSlot`. Starting a new
//! driver on a slot stops the previous one first, so a value never has two
//! writers. Completions are returned from `step`/`stop` instead of being
//! delivered through callbacks; the caller handles them in the same tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Displacement below which a spring is considered settled
pub const REST_DISPLACEMENT: f32 = 0.001;
/// Speed below which a spring is considered settled
pub const REST_SPEED: f32 = 0.001;

/// Fixed-duration linear interpolation between two points
#[derive(Debug, Clone, PartialEq)]
pub struct Timing {
    pub from: Vec2,
    pub to: Vec2,
    /// Seconds
    pub duration: f32,
    elapsed: f32,
}

impl Timing {
    pub fn linear(from: Vec2, to: Vec2, duration: f32) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: 0.0,
        }
    }

    /// Advance by `dt`, returning the new value and whether the end was reached
    fn step(&mut self, dt: f32) -> (Vec2, bool) {
        self.elapsed += dt;
        if self.duration <= 0.0 || self.elapsed >= self.duration {
            return (self.to, true);
        }
        let t = self.elapsed / self.duration;
        (self.from + (self.to - self.from) * t, false)
    }
}

/// Spring parameters in origami units (the values designers tune)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpringConfig {
    pub tension: f32,
    pub friction: f32,
}

impl SpringConfig {
    /// Physical stiffness for unit mass
    pub fn stiffness(&self) -> f32 {
        (self.tension - 30.0) * 3.62 + 194.0
    }

    /// Physical damping coefficient for unit mass
    pub fn damping(&self) -> f32 {
        (self.friction - 8.0) * 3.0 + 25.0
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            tension: crate::consts::SPRING_TENSION,
            friction: crate::consts::SPRING_FRICTION,
        }
    }
}

/// Damped harmonic oscillator toward a target, solved analytically.
///
/// The heavily damped release spring has a fast mode far beyond what an
/// explicit integrator at 120 Hz can follow, so the closed form is used.
#[derive(Debug, Clone, PartialEq)]
pub struct Spring {
    pub target: Vec2,
    /// Displacement from target at start
    d0: Vec2,
    /// Velocity at start
    v0: Vec2,
    stiffness: f32,
    damping: f32,
    elapsed: f32,
}

impl Spring {
    pub fn new(from: Vec2, target: Vec2, velocity: Vec2, config: SpringConfig) -> Self {
        Self {
            target,
            d0: from - target,
            v0: velocity,
            stiffness: config.stiffness().max(f32::EPSILON),
            damping: config.damping().max(0.0),
            elapsed: 0.0,
        }
    }

    /// Displacement and velocity at time `t` since start
    fn solve(&self, t: f32) -> (Vec2, Vec2) {
        let omega = self.stiffness.sqrt();
        let zeta = self.damping / (2.0 * omega);
        let (d0, v0) = (self.d0, self.v0);

        if zeta < 1.0 {
            let omega1 = omega * (1.0 - zeta * zeta).sqrt();
            let envelope = (-zeta * omega * t).exp();
            let (sin, cos) = (omega1 * t).sin_cos();
            let b = (v0 + d0 * (zeta * omega)) / omega1;
            let d = (d0 * cos + b * sin) * envelope;
            let v = (b * (omega1 * cos) - d0 * (omega1 * sin)) * envelope - d * (zeta * omega);
            (d, v)
        } else if zeta == 1.0 {
            let envelope = (-omega * t).exp();
            let b = v0 + d0 * omega;
            let d = (d0 + b * t) * envelope;
            let v = b * envelope - d * omega;
            (d, v)
        } else {
            let root = (zeta * zeta - 1.0).sqrt();
            let r1 = -omega * (zeta - root);
            let r2 = -omega * (zeta + root);
            let a = (v0 - d0 * r2) / (r1 - r2);
            let b = d0 - a;
            let (e1, e2) = ((r1 * t).exp(), (r2 * t).exp());
            (a * e1 + b * e2, a * (r1 * e1) + b * (r2 * e2))
        }
    }

    fn step(&mut self, dt: f32) -> (Vec2, bool) {
        self.elapsed += dt;
        let (d, v) = self.solve(self.elapsed);
        let at_rest = d.abs().max_element() <= REST_DISPLACEMENT
            && v.abs().max_element() <= REST_SPEED;
        if at_rest {
            (self.target, true)
        } else {
            (self.target + d, false)
        }
    }
}

/// What is currently driving a slot
#[derive(Debug, Clone, PartialEq)]
pub enum Driver {
    Timing(Timing),
    Spring(Spring),
}

impl Driver {
    fn step(&mut self, dt: f32) -> (Vec2, bool) {
        match self {
            Driver::Timing(t) => t.step(dt),
            Driver::Spring(s) => s.step(dt),
        }
    }
}

/// End of an animation, tagged with the generation it was started under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    pub generation: u64,
    /// False when the animation was stopped or superseded
    pub finished: bool,
}

#[derive(Debug, Clone)]
struct Running {
    driver: Driver,
    generation: u64,
}

/// Single-owner animation slot for one animated value
#[derive(Debug, Clone, Default)]
pub struct AnimationSlot {
    running: Option<Running>,
    generation: u64,
}

impl AnimationSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start `driver`, stopping whatever ran before.
    ///
    /// Returns the new generation and the completion of the superseded
    /// animation, if there was one.
    pub fn start(&mut self, driver: Driver) -> (u64, Option<Completion>) {
        let superseded = self.stop();
        self.generation += 1;
        self.running = Some(Running {
            driver,
            generation: self.generation,
        });
        (self.generation, superseded)
    }

    /// Stop the running animation. Stopping an idle slot is a no-op.
    pub fn stop(&mut self) -> Option<Completion> {
        self.running.take().map(|r| Completion {
            generation: r.generation,
            finished: false,
        })
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Generation of the most recently started animation
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Advance the running animation, writing into `value`
    pub fn step(&mut self, value: &mut Vec2, dt: f32) -> Option<Completion> {
        let running = self.running.as_mut()?;
        let (next, done) = running.driver.step(dt);
        *value = next;
        if done {
            let generation = running.generation;
            self.running = None;
            Some(Completion {
                generation,
                finished: true,
            })
        } else {
            None
        }
    }
}

/// Periodic timer on the simulation clock
#[derive(Debug, Clone)]
pub struct Interval {
    /// Seconds between fires
    pub period: f32,
    accumulator: f32,
}

impl Interval {
    pub fn new(period: f32) -> Self {
        Self {
            period,
            accumulator: 0.0,
        }
    }

    /// Advance by `dt` and return how many times the timer fired
    pub fn step(&mut self, dt: f32) -> u32 {
        if self.period <= 0.0 {
            return 0;
        }
        self.accumulator += dt;
        let mut fired = 0;
        while self.accumulator >= self.period {
            self.accumulator -= self.period;
            fired += 1;
        }
        fired
    }
}
