// Copyright 2026 the Glidepane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The gesture sampling state machine.

use kurbo::{Point, Vec2};

use crate::contact::{centroid, total_spread};

/// One frame of a single-pointer drag: movement since the previous sample.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PanFrame {
    /// Pointer movement since the previous sample, in document pixels.
    pub delta: Vec2,
    /// Time since the previous sample, in milliseconds.
    pub dt: f64,
}

/// One frame of a multi-contact pinch.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PinchFrame {
    /// Centroid movement since the previous sample.
    pub delta: Vec2,
    /// Spread ratio since the previous sample. Always finite;
    /// degenerate ratios (zero or non-finite) collapse to `1.0`.
    pub factor: f64,
    /// Current centroid, the anchor for the zoom.
    pub anchor: Point,
    /// Time since the previous sample, in milliseconds.
    pub dt: f64,
}

/// Result of feeding a contact-lift to the sampler.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TouchRelease {
    /// No pinch was in progress; nothing to do.
    Inactive,
    /// Contacts remain; the gesture continues (the next move refreshes
    /// baselines against the reduced set).
    Continuing,
    /// The last contact lifted. Carries the final emitted frame, replayed
    /// once so the release position contributes to the velocity samples.
    Ended(Option<PinchFrame>),
}

#[derive(Copy, Clone, Debug)]
struct PointerTrack {
    last: Point,
    last_time: f64,
}

#[derive(Copy, Clone, Debug)]
struct TouchTrack {
    centroid: Point,
    spread: f64,
    count: usize,
    last_time: f64,
    last_emitted: Option<PinchFrame>,
}

/// Reduces pointer and contact streams to per-frame deltas.
///
/// One modality is tracked at a time per kind: a second `pointer_down`
/// while a drag is live is ignored, as is a `touch_start` while a pinch is
/// live. Pan frames are incremental from the previous sample (not the
/// gesture origin), so they can be applied directly to the live transform.
///
/// When the number of contacts changes mid-pinch, output is suppressed for
/// exactly one frame while the centroid/spread baselines are refreshed;
/// comparing spreads across different contact counts would read as a zoom
/// jump.
#[derive(Copy, Clone, Debug, Default)]
pub struct GestureSampler {
    pointer: Option<PointerTrack>,
    touch: Option<TouchTrack>,
}

impl GestureSampler {
    /// Creates an idle sampler.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pointer: None,
            touch: None,
        }
    }

    /// `true` while a single-pointer drag is live.
    #[must_use]
    pub const fn is_panning(&self) -> bool {
        self.pointer.is_some()
    }

    /// `true` while a multi-contact gesture is live.
    #[must_use]
    pub const fn is_pinching(&self) -> bool {
        self.touch.is_some()
    }

    /// Starts a drag at `pos`. Non-primary presses and presses during a
    /// live drag are ignored. Returns whether the press was consumed.
    pub fn pointer_down(&mut self, pos: Point, time: f64, primary: bool) -> bool {
        if !primary || self.pointer.is_some() {
            return false;
        }
        self.pointer = Some(PointerTrack {
            last: pos,
            last_time: time,
        });
        true
    }

    /// Advances a live drag to `pos`, returning the incremental frame.
    ///
    /// Returns `None` when no drag is live (moves without a press).
    pub fn pointer_move(&mut self, pos: Point, time: f64) -> Option<PanFrame> {
        let track = self.pointer.as_mut()?;
        let delta = pos - track.last;
        let dt = time - track.last_time;
        track.last = pos;
        track.last_time = time;
        Some(PanFrame { delta, dt })
    }

    /// Ends a live drag. Returns whether one was live.
    pub fn pointer_up(&mut self) -> bool {
        self.pointer.take().is_some()
    }

    /// Starts a multi-contact gesture. Ignored while one is already live or
    /// when `contacts` is empty.
    pub fn touch_start(&mut self, contacts: &[Point], time: f64) {
        if self.touch.is_some() {
            return;
        }
        let Some(center) = centroid(contacts) else {
            return;
        };
        self.touch = Some(TouchTrack {
            centroid: center,
            spread: total_spread(center, contacts),
            count: contacts.len(),
            last_time: time,
            last_emitted: None,
        });
    }

    /// Advances a live multi-contact gesture to the current contact set.
    ///
    /// Emits a frame only when the contact count matches the previous
    /// sample; a count change refreshes the baselines and yields `None` for
    /// that one frame.
    pub fn touch_move(&mut self, contacts: &[Point], time: f64) -> Option<PinchFrame> {
        let track = self.touch.as_mut()?;
        let center = centroid(contacts)?;
        let spread = total_spread(center, contacts);

        let mut frame = None;
        if contacts.len() == track.count {
            let mut factor = spread / track.spread;
            if !factor.is_finite() || factor == 0.0 {
                factor = 1.0;
            }
            let emitted = PinchFrame {
                delta: center - track.centroid,
                factor,
                anchor: center,
                dt: time - track.last_time,
            };
            track.last_emitted = Some(emitted);
            frame = Some(emitted);
        }

        track.centroid = center;
        track.spread = spread;
        track.count = contacts.len();
        track.last_time = time;
        frame
    }

    /// Feeds a contact lift with the contacts that remain pressed.
    ///
    /// The gesture ends only when `remaining` is empty; the final emitted
    /// frame is handed back for a one-shot replay.
    pub fn touch_end(&mut self, remaining: &[Point]) -> TouchRelease {
        if self.touch.is_none() {
            return TouchRelease::Inactive;
        }
        if !remaining.is_empty() {
            // The next touch_move sees the count change and re-baselines.
            return TouchRelease::Continuing;
        }
        let track = self.touch.take();
        TouchRelease::Ended(track.and_then(|t| t.last_emitted))
    }

    /// Drops any live tracks without emitting anything. Used for
    /// platform-level cancellation.
    pub fn reset(&mut self) {
        self.pointer = None;
        self.touch = None;
    }
}
