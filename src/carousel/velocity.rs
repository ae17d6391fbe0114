//! Single-coin velocity model on a tilted ellipse.
//!
//! The coin's place on the loop is `progress` in [0, 1). Each frame reads a
//! velocity from the profile below, integrates `progress += v·Δt` and wraps.
//! There is no fixed schedule, so uneven frame deltas are fine.
//!
//! ```text
//! progress 0 ─ fast ─┬─ transition ─┬─ slow ─┬─ transition ─ 1
//!                    f              f+t      f+t+s
//! velocity   fast    │  fast → slow │  slow  │  slow → fast
//! ```
//!
//! with `t = (1 − f − s)/2`. The profile is closed at the fast and slow
//! segment ends, so transitions are strictly between the two speeds.
//!
//! Position, tilted by `tilt_angle` degrees about the horizontal axis:
//!
//! ```text
//! θ     = (progress + offset)·2π
//! x     = a·cosθ + offset_x
//! y     = b·sinθ·cos(tilt) + offset_y
//! z     = b·sinθ·sin(tilt)
//! scale = 1 + 0.3·z/(2b)
//! ```
//!
//! `offset` rotates the path so the middle of the slow segment sits on the
//! point of greatest depth.

use super::controller::Motion;
use super::geometry::{Ellipse, Transform};
use super::{CarouselError, require_positive, require_unit};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

const DEPTH_SCALE: f64 = 0.3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VelocityConfig {
    /// Progress per second on the fast segment.
    pub fast_velocity: f64,
    /// Progress per second on the slow segment.
    pub slow_velocity: f64,
    /// Share of the loop spent fast.
    pub fast_path_percent: f64,
    /// Share of the loop spent slow.
    pub slow_path_percent: f64,
    /// Tilt about the horizontal axis, in degrees.
    pub tilt_angle: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    pub ellipse_width: f64,
    pub ellipse_height: f64,
    pub coin_size: f64,
}

impl Default for VelocityConfig {
    fn default() -> Self {
        Self {
            fast_velocity: 0.2,
            slow_velocity: 0.05,
            fast_path_percent: 0.5,
            slow_path_percent: 0.2,
            tilt_angle: 20.0,
            offset_x: 0.0,
            offset_y: 0.0,
            ellipse_width: 600.0,
            ellipse_height: 300.0,
            coin_size: 120.0,
        }
    }
}

impl VelocityConfig {
    pub fn validate(&self) -> Result<(), CarouselError> {
        require_positive("velocity.fast_velocity", self.fast_velocity)?;
        require_positive("velocity.slow_velocity", self.slow_velocity)?;
        require_unit("velocity.fast_path_percent", self.fast_path_percent)?;
        require_unit("velocity.slow_path_percent", self.slow_path_percent)?;
        let total = self.fast_path_percent + self.slow_path_percent;
        if total > 1.0 {
            return Err(CarouselError::PathOverflow(total));
        }
        require_positive("velocity.ellipse_width", self.ellipse_width)?;
        require_positive("velocity.ellipse_height", self.ellipse_height)?;
        Ok(())
    }

    /// Width of each transition segment.
    pub fn transition_percent(&self) -> f64 {
        (1.0 - self.fast_path_percent - self.slow_path_percent) / 2.0
    }
}

/// Part of the loop a progress value falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Fast,
    /// Fast → slow.
    TransitionDown,
    Slow,
    /// Slow → fast.
    TransitionUp,
}

/// Per-frame state of the coin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarouselState {
    /// Position along the loop, in [0, 1).
    pub progress: f64,
    /// Velocity used for the last step, progress per second.
    pub velocity: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VelocityModel {
    config: VelocityConfig,
    ellipse: Ellipse,
    /// Progress added before converting to an angle.
    offset: f64,
}

impl VelocityModel {
    pub fn new(config: VelocityConfig) -> Result<Self, CarouselError> {
        config.validate()?;
        let ellipse = Ellipse::from_size(config.ellipse_width, config.ellipse_height);

        // Depth b·sinθ·sin(tilt) peaks at θ = π/2 (quarter turn) for a
        // forward tilt and at 3π/2 for a backward one.
        let deepest = if config.tilt_angle < 0.0 { 0.75 } else { 0.25 };
        let slow_middle = config.fast_path_percent
            + config.transition_percent()
            + config.slow_path_percent / 2.0;
        let offset = (deepest - slow_middle).rem_euclid(1.0);

        Ok(Self {
            config,
            ellipse,
            offset,
        })
    }

    pub fn config(&self) -> &VelocityConfig {
        &self.config
    }

    /// Progress offset applied before converting to an angle.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn segment_at(&self, progress: f64) -> Segment {
        let p = progress.rem_euclid(1.0);
        let fast = self.config.fast_path_percent;
        let transition = self.config.transition_percent();
        let slow = self.config.slow_path_percent;

        if p <= fast {
            Segment::Fast
        } else if p < fast + transition {
            Segment::TransitionDown
        } else if p <= fast + transition + slow {
            Segment::Slow
        } else {
            Segment::TransitionUp
        }
    }

    /// Velocity at `progress`; linear across the transition segments.
    pub fn velocity_at(&self, progress: f64) -> f64 {
        let p = progress.rem_euclid(1.0);
        let VelocityConfig {
            fast_velocity: fast_v,
            slow_velocity: slow_v,
            fast_path_percent: fast,
            slow_path_percent: slow,
            ..
        } = self.config;
        let transition = self.config.transition_percent();

        match self.segment_at(p) {
            Segment::Fast => fast_v,
            Segment::Slow => slow_v,
            Segment::TransitionDown => {
                let local = (p - fast) / transition;
                fast_v + (slow_v - fast_v) * local
            }
            Segment::TransitionUp => {
                let local = (p - fast - transition - slow) / transition;
                slow_v + (fast_v - slow_v) * local
            }
        }
    }

    /// State at the start of the loop.
    pub fn initial_state(&self) -> CarouselState {
        CarouselState {
            progress: 0.0,
            velocity: self.velocity_at(0.0),
        }
    }

    /// Advance `state` by `dt` seconds. Non-positive or non-finite deltas
    /// leave it untouched.
    pub fn step(&self, state: &mut CarouselState, dt: f64) {
        if !(dt > 0.0 && dt.is_finite()) {
            return;
        }
        state.velocity = self.velocity_at(state.progress);
        state.progress = (state.progress + state.velocity * dt).rem_euclid(1.0);
    }

    /// Angle on the ellipse for `progress`.
    pub fn angle_at(&self, progress: f64) -> f64 {
        (progress + self.offset) * TAU
    }

    pub fn transform_at(&self, progress: f64) -> Transform {
        let Ellipse { a, b } = self.ellipse;
        let angle = self.angle_at(progress);
        let tilt = self.config.tilt_angle.to_radians();

        let z = b * angle.sin() * tilt.sin();
        Transform {
            x: a * angle.cos() + self.config.offset_x,
            y: b * angle.sin() * tilt.cos() + self.config.offset_y,
            z,
            scale: 1.0 + (z / (2.0 * b)) * DEPTH_SCALE,
        }
    }
}

/// [`VelocityModel`] with its per-frame state, for
/// [`super::CarouselController`].
#[derive(Debug, Clone)]
pub struct VelocityMotion {
    model: VelocityModel,
    state: CarouselState,
}

impl VelocityMotion {
    pub fn new(model: VelocityModel) -> Self {
        let state = model.initial_state();
        Self { model, state }
    }

    pub fn model(&self) -> &VelocityModel {
        &self.model
    }

    pub fn state(&self) -> CarouselState {
        self.state
    }
}

impl Motion for VelocityMotion {
    fn element_count(&self) -> usize {
        1
    }

    fn reset(&mut self) {
        self.state = self.model.initial_state();
    }

    fn advance(&mut self, dt: f64) {
        self.model.step(&mut self.state, dt);
    }

    fn transform(&self, _index: usize) -> Transform {
        self.model.transform_at(self.state.progress)
    }
}
