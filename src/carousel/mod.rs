//! Coin carousel motion.
//!
//! Elements travel around an ellipse and get larger as they come forward.
//! Two motion strategies share the same geometry and lifecycle:
//!
//! | Model | Elements | Driven by |
//! |-------|----------|-----------|
//! | [`showcase`] | N, evenly spaced | keyframe timeline over a fixed loop period, with a "pop" near the front |
//! | [`velocity`] | 1 | per-frame integration of a piecewise velocity profile over a tilted ellipse |
//!
//! Both implement [`Motion`], and [`CarouselController`] runs either one
//! against a host frame clock. The module is split into:
//! - **Geometry**: [`Ellipse`] and [`Transform`] (pure, unit testable)
//! - **Easing**: named easing curves used between keyframes
//! - **Models**: [`ShowcaseModel`], [`VelocityModel`]
//! - **Controller**: start/stop lifecycle that never leaves two tickers
//!   writing the same element

pub mod controller;
pub mod easing;
mod geometry;
pub mod showcase;
pub mod velocity;

pub use controller::{
    CarouselController, FrameScheduler, MAX_SAMPLES, Motion, TickHandle, TickRegistry,
    TransformTarget, sample_poses,
};
pub use easing::Easing;
pub use geometry::{Ellipse, Transform};
pub use showcase::{ShowcaseConfig, ShowcaseModel, ShowcaseMotion};
pub use velocity::{CarouselState, Segment, VelocityConfig, VelocityModel, VelocityMotion};

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CarouselError {
    #[error("{0} must be positive, got {1}")]
    NonPositive(&'static str, f64),
    #[error("{0} must be between 0 and 1, got {1}")]
    OutOfUnitRange(&'static str, f64),
    #[error("fast_path_percent + slow_path_percent must not exceed 1, got {0}")]
    PathOverflow(f64),
    #[error("showcase_duration ({showcase}) must not exceed loop_duration ({period})")]
    ShowcaseTooLong { showcase: f64, period: f64 },
    #[error("unknown easing '{0}'")]
    UnknownEasing(String),
    #[error("{0} must be finite and non-negative, got {1}")]
    Negative(&'static str, f64),
    #[error("{requested} samples requested, at most {max} allowed")]
    TooManySamples { requested: f64, max: usize },
}

fn require_positive(name: &'static str, value: f64) -> Result<(), CarouselError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(CarouselError::NonPositive(name, value))
    }
}

fn require_unit(name: &'static str, value: f64) -> Result<(), CarouselError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(CarouselError::OutOfUnitRange(name, value))
    }
}
