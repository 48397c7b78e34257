// Copyright 2026 the Glidepane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The frame-paced friction decay.

use kurbo::Vec2;

use crate::buffer::{SampleBuffer, VelocitySample};

/// Milliseconds of gesture time folded into one velocity unit.
///
/// Velocities are expressed in pixels per `VELOCITY_TIME_SCALE`
/// milliseconds, and decay exponents are measured in the same unit. Tuned
/// against real gesture traces; changing it rescales `min_velocity` and the
/// effective friction together.
pub const VELOCITY_TIME_SCALE: f64 = 8.0;

/// One `on_frame` outcome.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum KineticTick {
    /// No run is live.
    Idle,
    /// The run is coasting; apply this velocity as a translation and report
    /// it to velocity subscribers.
    Coasting(Vec2),
    /// The run just fell below the minimum velocity. Emitted exactly once
    /// per run, so subscribers get a terminal zero-velocity event.
    Settled,
}

#[derive(Copy, Clone, Debug)]
struct KineticRun {
    generation: u64,
    velocity: Vec2,
    last_tick: Option<f64>,
}

/// Derives a release velocity from sampled gesture frames and decays it
/// across host-driven frames.
#[derive(Clone, Debug)]
pub struct KineticEngine {
    /// Fraction of velocity lost per [`VELOCITY_TIME_SCALE`] milliseconds,
    /// in `0.0..=1.0`.
    pub friction: f64,
    /// Speed below which a run settles, in pixels per
    /// [`VELOCITY_TIME_SCALE`] milliseconds.
    pub min_velocity: f64,
    smoothing: SampleBuffer,
    generation: u64,
    run: Option<KineticRun>,
}

impl KineticEngine {
    /// The default friction.
    pub const DEFAULT_FRICTION: f64 = 0.05;
    /// The default minimum velocity.
    pub const DEFAULT_MIN_VELOCITY: f64 = 1.0;

    /// Creates an idle engine with default tuning.
    #[must_use]
    pub fn new() -> Self {
        Self {
            friction: Self::DEFAULT_FRICTION,
            min_velocity: Self::DEFAULT_MIN_VELOCITY,
            smoothing: SampleBuffer::default(),
            generation: 0,
            run: None,
        }
    }

    /// Buffers one gesture frame for the release velocity.
    pub fn push_sample(&mut self, sample: VelocitySample) {
        self.smoothing.push(sample);
    }

    /// Resizes the smoothing window, discarding buffered samples.
    pub fn set_smoothing_capacity(&mut self, capacity: usize) {
        self.smoothing.set_capacity(capacity);
    }

    /// The smoothing window size.
    #[must_use]
    pub const fn smoothing_capacity(&self) -> usize {
        self.smoothing.capacity()
    }

    /// Arms a run from the buffered samples and returns the initial
    /// velocity.
    ///
    /// The velocity is total displacement over total duration across the
    /// window (a zero duration sum counts as one millisecond, so a
    /// single-sample release still coasts). The buffer is cleared; the next
    /// gesture starts fresh.
    pub fn start(&mut self) -> Vec2 {
        self.generation += 1;
        let mut displacement = Vec2::ZERO;
        let mut duration = 0.0;
        for sample in self.smoothing.iter() {
            displacement += Vec2::new(sample.dx, sample.dy);
            duration += sample.dt;
        }
        self.smoothing.clear();
        if duration == 0.0 {
            duration = 1.0;
        }
        let velocity = displacement / (duration / VELOCITY_TIME_SCALE);
        self.run = Some(KineticRun {
            generation: self.generation,
            velocity,
            last_tick: None,
        });
        velocity
    }

    /// Cancels any live run without arming a new one.
    ///
    /// The run itself is dropped at its next wake; until then
    /// [`is_coasting`](Self::is_coasting) already reports `false`.
    pub fn stop(&mut self) {
        self.generation += 1;
        self.smoothing.clear();
    }

    /// `true` while a live (non-stale) run exists.
    #[must_use]
    pub fn is_coasting(&self) -> bool {
        self.run
            .as_ref()
            .is_some_and(|run| run.generation == self.generation)
    }

    /// Advances the live run to `now` (milliseconds, monotonic).
    ///
    /// The first tick of a run emits the undecayed release velocity;
    /// subsequent ticks decay by `(1 - friction) ^ (dt / 8)`. A stale run
    /// (superseded by `start` or `stop`) exits silently.
    pub fn on_frame(&mut self, now: f64) -> KineticTick {
        let Some(run) = self.run.as_mut() else {
            return KineticTick::Idle;
        };
        if run.generation != self.generation {
            self.run = None;
            return KineticTick::Idle;
        }
        if let Some(last) = run.last_tick {
            let dt = now - last;
            let decay = (1.0 - self.friction).powf(dt / VELOCITY_TIME_SCALE);
            run.velocity = run.velocity * decay;
        }
        run.last_tick = Some(now);
        if run.velocity.length() < self.min_velocity {
            self.run = None;
            return KineticTick::Settled;
        }
        KineticTick::Coasting(run.velocity)
    }
}

impl Default for KineticEngine {
    fn default() -> Self {
        Self::new()
    }
}
