//! Multi-coin showcase model.
//!
//! `coin_count` coins sit evenly around the ellipse (coin `i` starts at
//! `2π·i/N`) and all rotate forward together, one full turn per
//! `loop_duration` seconds, forever. Depth and scale follow the angle:
//!
//! ```text
//! z     = b·(1 − cosθ) − b          ∈ [−b, b]
//! scale = 0.4 + 0.6·(z + b)/(2b)    ∈ [0.4, 1.0]
//! ```
//!
//! Inside the showcase window around angle 0 (total width
//! `2π·showcase_duration/loop_duration`) a quadratic ease pushes the coin
//! forward by up to `0.6·b` and adds up to `0.6` to its scale.
//!
//! Each coin's turn is sampled into `keyframes` poses and the pose between
//! two keyframes is interpolated with the configured easing.

use super::controller::Motion;
use super::easing::{Easing, quad_in_out};
use super::geometry::{Ellipse, Transform, distance_from_front};
use super::{CarouselError, require_positive};
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};

const MIN_SCALE: f64 = 0.4;
const SCALE_RANGE: f64 = 0.6;
const SHOWCASE_PUSH: f64 = 0.6;
const SHOWCASE_SCALE: f64 = 0.6;

/// Options for the showcase carousel. All are optional in `config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShowcaseConfig {
    /// Number of coins on the ellipse.
    pub coin_count: usize,
    /// Seconds per full turn.
    pub loop_duration: f64,
    /// Seconds a coin spends inside the showcase window.
    pub showcase_duration: f64,
    /// Start moving as soon as the carousel is mounted.
    pub autoplay: bool,
    /// CSS perspective of the container, in pixels.
    pub perspective: f64,
    /// Easing between keyframes.
    pub easing: Easing,
    pub ellipse_width: f64,
    pub ellipse_height: f64,
    /// Coin edge length, in pixels.
    pub coin_size: f64,
    /// Keyframes per turn.
    pub keyframes: usize,
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        Self {
            coin_count: 5,
            loop_duration: 10.0,
            showcase_duration: 1.5,
            autoplay: true,
            perspective: 1000.0,
            easing: Easing::Power1InOut,
            ellipse_width: 600.0,
            ellipse_height: 300.0,
            coin_size: 120.0,
            keyframes: 40,
        }
    }
}

impl ShowcaseConfig {
    pub fn validate(&self) -> Result<(), CarouselError> {
        require_positive("carousel.loop_duration", self.loop_duration)?;
        require_positive("carousel.ellipse_width", self.ellipse_width)?;
        require_positive("carousel.ellipse_height", self.ellipse_height)?;
        require_positive("carousel.coin_size", self.coin_size)?;
        require_positive("carousel.keyframes", self.keyframes as f64)?;
        if !(self.showcase_duration >= 0.0) {
            return Err(CarouselError::NonPositive(
                "carousel.showcase_duration",
                self.showcase_duration,
            ));
        }
        if self.showcase_duration > self.loop_duration {
            return Err(CarouselError::ShowcaseTooLong {
                showcase: self.showcase_duration,
                period: self.loop_duration,
            });
        }
        Ok(())
    }
}

/// Pose calculator for the showcase carousel.
#[derive(Debug, Clone, PartialEq)]
pub struct ShowcaseModel {
    config: ShowcaseConfig,
    ellipse: Ellipse,
}

impl ShowcaseModel {
    pub fn new(config: ShowcaseConfig) -> Result<Self, CarouselError> {
        config.validate()?;
        let ellipse = Ellipse::from_size(config.ellipse_width, config.ellipse_height);
        Ok(Self { config, ellipse })
    }

    pub fn config(&self) -> &ShowcaseConfig {
        &self.config
    }

    /// Starting angle of coin `index`.
    pub fn start_angle(&self, index: usize) -> f64 {
        TAU * index as f64 / self.config.coin_count.max(1) as f64
    }

    /// Half-width of the showcase window, in radians.
    pub fn showcase_half_width(&self) -> f64 {
        PI * self.config.showcase_duration / self.config.loop_duration
    }

    /// Pose at `angle`, showcase enhancement included.
    pub fn transform_at_angle(&self, angle: f64) -> Transform {
        let Ellipse { b, .. } = self.ellipse;
        let (x, y) = self.ellipse.point(angle);

        let mut z = b * (1.0 - angle.cos()) - b;
        let depth = (z + b) / (2.0 * b);
        let mut scale = MIN_SCALE + depth * SCALE_RANGE;

        let half = self.showcase_half_width();
        let distance = distance_from_front(angle);
        if distance < half {
            let ease = quad_in_out(1.0 - distance / half);
            z += b * SHOWCASE_PUSH * ease;
            scale += SHOWCASE_SCALE * ease;
        }

        Transform { x, y, z, scale }
    }

    /// Sampled poses for one full turn of coin `index`; `keyframes + 1`
    /// entries, the last equal in angle to the first.
    pub fn keyframes(&self, index: usize) -> Vec<Transform> {
        let count = self.config.keyframes;
        let start = self.start_angle(index);
        (0..=count)
            .map(|i| self.transform_at_angle(start + TAU * i as f64 / count as f64))
            .collect()
    }

    /// Pose of coin `index` at `time` seconds after the animation started.
    pub fn transform_at(&self, index: usize, time: f64) -> Transform {
        let count = self.config.keyframes;
        let period = self.config.loop_duration;
        let segment_duration = period / count as f64;

        let local = time.rem_euclid(period);
        let segment = ((local / segment_duration) as usize).min(count - 1);
        let frac = (local - segment as f64 * segment_duration) / segment_duration;

        let start = self.start_angle(index);
        let angle_of = |k: usize| start + TAU * k as f64 / count as f64;
        let from = self.transform_at_angle(angle_of(segment));
        let to = self.transform_at_angle(angle_of(segment + 1));
        from.lerp(to, self.config.easing.apply(frac))
    }

    /// Container `perspective` CSS value.
    pub fn perspective_css(&self) -> String {
        format!("{}px", self.config.perspective)
    }
}

/// [`ShowcaseModel`] with its clock, for [`super::CarouselController`].
#[derive(Debug, Clone)]
pub struct ShowcaseMotion {
    model: ShowcaseModel,
    elapsed: f64,
}

impl ShowcaseMotion {
    pub fn new(model: ShowcaseModel) -> Self {
        Self {
            model,
            elapsed: 0.0,
        }
    }

    pub fn model(&self) -> &ShowcaseModel {
        &self.model
    }

    /// Seconds into the current turn.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }
}

impl Motion for ShowcaseMotion {
    fn element_count(&self) -> usize {
        self.model.config.coin_count
    }

    fn reset(&mut self) {
        self.elapsed = 0.0;
    }

    /// Non-positive or non-finite deltas are ignored.
    fn advance(&mut self, dt: f64) {
        if !(dt > 0.0 && dt.is_finite()) {
            return;
        }
        self.elapsed = (self.elapsed + dt).rem_euclid(self.model.config.loop_duration);
    }

    fn transform(&self, index: usize) -> Transform {
        self.model.transform_at(index, self.elapsed)
    }

    fn autoplay(&self) -> bool {
        self.model.config.autoplay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> ShowcaseModel {
        ShowcaseModel::new(ShowcaseConfig::default()).unwrap()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    #[test]
    fn coins_are_evenly_spaced() {
        let m = model();
        for i in 0..5 {
            assert!(close(m.start_angle(i), TAU * i as f64 / 5.0));
        }
    }

    #[test]
    fn depth_spans_minus_b_to_b() {
        let m = model();
        // Angle π is outside the showcase window, so only base geometry applies.
        let at_pi = m.transform_at_angle(PI);
        assert!(close(at_pi.z, 150.0));
        assert!(close(at_pi.scale, 1.0));

        // Just outside the window on the front side: z near −b.
        let edge = m.showcase_half_width() + 1e-6;
        let near_zero = m.transform_at_angle(edge);
        assert!(near_zero.z < -130.0);
        assert!(near_zero.scale < 0.45);
    }

    #[test]
    fn showcase_peaks_at_angle_zero() {
        let m = model();
        let t = m.transform_at_angle(0.0);
        // Base z = −b, then pushed forward by 0.6·b.
        assert!(close(t.z, -150.0 + 0.6 * 150.0));
        assert!(close(t.scale, 0.4 + 0.6));
        assert!(close(t.x, 300.0));
        assert!(close(t.y, 0.0));
    }

    #[test]
    fn showcase_window_matches_duration_ratio() {
        let m = model();
        // 1.5 s of a 10 s loop: half-width 0.15π on each side.
        assert!(close(m.showcase_half_width(), 0.15 * PI));
    }

    #[test]
    fn zero_showcase_duration_disables_pop() {
        let m = ShowcaseModel::new(ShowcaseConfig {
            showcase_duration: 0.0,
            ..Default::default()
        })
        .unwrap();
        let t = m.transform_at_angle(0.0);
        assert!(close(t.z, -150.0));
        assert!(close(t.scale, 0.4));
    }

    #[test]
    fn showcase_is_symmetric_around_front() {
        let m = model();
        let ahead = m.transform_at_angle(0.2);
        let behind = m.transform_at_angle(-0.2);
        assert!(close(ahead.z, behind.z));
        assert!(close(ahead.scale, behind.scale));
        assert!(close(ahead.y, -behind.y));
    }

    // =========================================================================
    // Timeline
    // =========================================================================

    #[test]
    fn keyframes_cover_one_turn() {
        let m = model();
        let frames = m.keyframes(0);
        assert_eq!(frames.len(), 41);
        assert!(close(frames[0].x, frames[40].x));
        assert!(close(frames[0].z, frames[40].z));
    }

    #[test]
    fn timeline_hits_keyframes_exactly() {
        let m = model();
        let frames = m.keyframes(2);
        // Keyframe 10 is at 10 * (10 s / 40) = 2.5 s.
        let t = m.transform_at(2, 2.5);
        assert!(close(t.x, frames[10].x));
        assert!(close(t.scale, frames[10].scale));
    }

    #[test]
    fn timeline_repeats_every_loop() {
        let m = model();
        let a = m.transform_at(1, 3.3);
        let b = m.transform_at(1, 13.3);
        assert!((a.x - b.x).abs() < 1e-6);
        assert!((a.z - b.z).abs() < 1e-6);
    }

    #[test]
    fn timeline_starts_at_start_angle() {
        let m = model();
        for i in 0..5 {
            let t = m.transform_at(i, 0.0);
            let expected = m.transform_at_angle(m.start_angle(i));
            assert!(close(t.x, expected.x) && close(t.y, expected.y));
        }
    }

    #[test]
    fn interpolation_stays_between_keyframes() {
        let m = model();
        let frames = m.keyframes(0);
        let t = m.transform_at(0, 0.125); // halfway through segment 0
        let (lo, hi) = if frames[0].y < frames[1].y {
            (frames[0].y, frames[1].y)
        } else {
            (frames[1].y, frames[0].y)
        };
        assert!(t.y >= lo && t.y <= hi);
    }

    // =========================================================================
    // Config
    // =========================================================================

    #[test]
    fn rejects_non_positive_loop() {
        let err = ShowcaseModel::new(ShowcaseConfig {
            loop_duration: 0.0,
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(err, CarouselError::NonPositive("carousel.loop_duration", 0.0));
    }

    #[test]
    fn rejects_showcase_longer_than_loop() {
        let err = ShowcaseConfig {
            showcase_duration: 12.0,
            ..Default::default()
        }
        .validate()
        .unwrap_err();
        assert!(matches!(err, CarouselError::ShowcaseTooLong { .. }));
    }

    #[test]
    fn config_reads_easing_by_name() {
        let cfg: ShowcaseConfig = toml::from_str("easing = \"sine.inOut\"\ncoin_count = 3").unwrap();
        assert_eq!(cfg.easing, Easing::SineInOut);
        assert_eq!(cfg.coin_count, 3);
        assert_eq!(cfg.loop_duration, 10.0);
    }

    #[test]
    fn motion_wraps_elapsed_time() {
        let mut motion = ShowcaseMotion::new(model());
        motion.advance(7.0);
        motion.advance(7.0);
        assert!(close(motion.elapsed(), 4.0));
        motion.reset();
        assert_eq!(motion.elapsed(), 0.0);
    }

    #[test]
    fn motion_ignores_bad_frame_deltas() {
        let mut motion = ShowcaseMotion::new(model());
        motion.reset();
        motion.advance(0.5);
        let before = motion.transform(0);

        for dt in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, -0.25, 0.0] {
            motion.advance(dt);
            assert!(close(motion.elapsed(), 0.5), "dt = {dt}");
            assert_eq!(motion.transform(0), before);
        }

        motion.advance(0.1);
        let after = motion.transform(0);
        assert!(after.x.is_finite() && after.y.is_finite());
        assert!(after.z.is_finite() && after.scale.is_finite());
        assert!(close(motion.elapsed(), 0.6));
    }

    #[test]
    fn perspective_css() {
        assert_eq!(model().perspective_css(), "1000px");
    }
}
