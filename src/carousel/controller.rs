//! Start/stop lifecycle for a carousel against a host frame clock.
//!
//! The host owns the frame loop. A controller asks the host's
//! [`FrameScheduler`] for a [`TickHandle`] when it starts and hands it back
//! when it stops; the host then calls [`CarouselController::tick`] with that
//! handle and the frame delta on every frame.
//!
//! Rules the controller keeps:
//! - the initial pose is written synchronously in `start`, before any tick
//! - `start` always stops first, so one controller never holds two handles
//! - `stop` is idempotent
//! - ticks carrying a handle other than the current one are ignored

use super::CarouselError;
use super::geometry::Transform;
use tracing::debug;

/// Upper bound on the poses [`sample_poses`] will record.
pub const MAX_SAMPLES: usize = 100_000;

/// Host-side registration for per-frame callbacks.
pub trait FrameScheduler {
    fn register(&mut self) -> TickHandle;
    /// Cancelling an unknown or already-cancelled handle is a no-op.
    fn cancel(&mut self, handle: TickHandle);
}

/// Identifies one frame-callback registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickHandle(u64);

impl TickHandle {
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Where poses are written, one element per index.
pub trait TransformTarget {
    fn apply(&mut self, index: usize, transform: Transform);
}

impl TransformTarget for Vec<Transform> {
    fn apply(&mut self, index: usize, transform: Transform) {
        if index >= self.len() {
            self.resize(
                index + 1,
                Transform {
                    x: 0.0,
                    y: 0.0,
                    z: 0.0,
                    scale: 1.0,
                },
            );
        }
        self[index] = transform;
    }
}

/// A motion model with its own clock or state.
pub trait Motion {
    /// Number of animated elements.
    fn element_count(&self) -> usize;
    /// Return to the state at time zero.
    fn reset(&mut self);
    /// Advance by `dt` seconds.
    fn advance(&mut self, dt: f64);
    /// Current pose of element `index`.
    fn transform(&self, index: usize) -> Transform;
    /// Whether `start` should begin ticking, or only place elements.
    fn autoplay(&self) -> bool {
        true
    }
}

/// In-process [`FrameScheduler`] that tracks live registrations.
///
/// Hosts with their own frame loop can drive it directly: keep the
/// registry, and call `tick` on controllers whose handle is in
/// [`TickRegistry::active`].
#[derive(Debug, Default)]
pub struct TickRegistry {
    next: u64,
    active: Vec<TickHandle>,
}

impl TickRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> &[TickHandle] {
        &self.active
    }

    pub fn is_active(&self, handle: TickHandle) -> bool {
        self.active.contains(&handle)
    }
}

impl FrameScheduler for TickRegistry {
    fn register(&mut self) -> TickHandle {
        self.next += 1;
        let handle = TickHandle(self.next);
        self.active.push(handle);
        handle
    }

    fn cancel(&mut self, handle: TickHandle) {
        self.active.retain(|h| *h != handle);
    }
}

#[derive(Debug)]
pub struct CarouselController<M> {
    motion: M,
    handle: Option<TickHandle>,
}

impl<M: Motion> CarouselController<M> {
    pub fn new(motion: M) -> Self {
        Self {
            motion,
            handle: None,
        }
    }

    pub fn motion(&self) -> &M {
        &self.motion
    }

    /// Handle of the running animation, if any.
    pub fn handle(&self) -> Option<TickHandle> {
        self.handle
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Place every element at its starting pose, then begin ticking if the
    /// motion autoplays. A running animation is stopped first.
    pub fn start<S, T>(&mut self, scheduler: &mut S, target: &mut T)
    where
        S: FrameScheduler + ?Sized,
        T: TransformTarget + ?Sized,
    {
        self.stop(scheduler);
        self.motion.reset();
        self.write(target);

        if self.motion.autoplay() {
            let handle = scheduler.register();
            debug!(handle = handle.id(), "carousel started");
            self.handle = Some(handle);
        }
    }

    /// Release the frame registration. Safe to call at any time.
    pub fn stop<S>(&mut self, scheduler: &mut S)
    where
        S: FrameScheduler + ?Sized,
    {
        if let Some(handle) = self.handle.take() {
            scheduler.cancel(handle);
            debug!(handle = handle.id(), "carousel stopped");
        }
    }

    /// Advance by one frame and write the new poses.
    ///
    /// Returns `false`, writing nothing, when `handle` isn't the current
    /// registration.
    pub fn tick<T>(&mut self, handle: TickHandle, dt: f64, target: &mut T) -> bool
    where
        T: TransformTarget + ?Sized,
    {
        if self.handle != Some(handle) {
            return false;
        }
        self.motion.advance(dt);
        self.write(target);
        true
    }

    /// Swap in a new motion (new parameters) and restart. The old
    /// registration is released before the new one is made.
    pub fn reconfigure<S, T>(&mut self, motion: M, scheduler: &mut S, target: &mut T)
    where
        S: FrameScheduler + ?Sized,
        T: TransformTarget + ?Sized,
    {
        self.stop(scheduler);
        self.motion = motion;
        self.start(scheduler, target);
    }

    fn write<T>(&self, target: &mut T)
    where
        T: TransformTarget + ?Sized,
    {
        for index in 0..self.motion.element_count() {
            target.apply(index, self.motion.transform(index));
        }
    }
}

/// Run `motion` under a controller and record every element's pose each
/// `step` seconds up to `duration`, starting with the placement written by
/// `start`. A motion that doesn't autoplay yields only that placement.
pub fn sample_poses<M: Motion>(
    motion: M,
    duration: f64,
    step: f64,
) -> Result<Vec<(f64, Vec<Transform>)>, CarouselError> {
    super::require_positive("step", step)?;
    if !(duration >= 0.0 && duration.is_finite()) {
        return Err(CarouselError::Negative("duration", duration));
    }
    let requested = (duration / step).floor();
    if requested > MAX_SAMPLES as f64 {
        return Err(CarouselError::TooManySamples {
            requested,
            max: MAX_SAMPLES,
        });
    }

    let mut scheduler = TickRegistry::new();
    let mut controller = CarouselController::new(motion);
    let mut poses: Vec<Transform> = Vec::new();

    controller.start(&mut scheduler, &mut poses);
    let mut frames = vec![(0.0, poses.clone())];

    if let Some(handle) = controller.handle() {
        for n in 1..=requested as usize {
            controller.tick(handle, step, &mut poses);
            frames.push((n as f64 * step, poses.clone()));
        }
    }

    controller.stop(&mut scheduler);
    Ok(frames)
}
