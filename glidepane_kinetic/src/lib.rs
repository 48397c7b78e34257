// Copyright 2026 the Glidepane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glidepane Kinetic: coasting after a release.
//!
//! While a drag is live the surface pushes [`VelocitySample`]s into the
//! engine's smoothing buffer. On release, [`KineticEngine::start`] derives
//! an initial velocity from the buffered samples and arms a run; the host
//! then calls [`KineticEngine::on_frame`] once per paint frame and applies
//! the returned velocity as a translation. Velocity decays exponentially
//! with the configured friction until it falls below the minimum, which
//! produces a single terminal [`KineticTick::Settled`] so subscribers can
//! distinguish "moving" from "came to rest".
//!
//! Cancellation is a generation counter: any new gesture bumps it via
//! [`KineticEngine::stop`], and a stale run exits silently at its next
//! wake. This keeps exactly one run observable at a time without the engine
//! holding onto frame callbacks.

mod buffer;
mod engine;

pub use buffer::{SampleBuffer, VelocitySample};
pub use engine::{KineticEngine, KineticTick, VELOCITY_TIME_SCALE};
