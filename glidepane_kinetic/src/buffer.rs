// Copyright 2026 the Glidepane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The velocity smoothing ring buffer.

/// One gesture frame's displacement and duration.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct VelocitySample {
    /// Horizontal displacement, in document pixels.
    pub dx: f64,
    /// Vertical displacement, in document pixels.
    pub dy: f64,
    /// Frame duration, in milliseconds.
    pub dt: f64,
}

/// A fixed-capacity ring buffer of recent [`VelocitySample`]s.
///
/// Once full, new samples overwrite the oldest, so the buffer always holds
/// the tail of the gesture. Smoothing over the last few frames filters the
/// jitter of a single noisy frame out of the release velocity.
#[derive(Clone, Debug)]
pub struct SampleBuffer {
    samples: Vec<VelocitySample>,
    head: usize,
    capacity: usize,
}

impl SampleBuffer {
    /// The default capacity.
    pub const DEFAULT_CAPACITY: usize = 5;

    /// Creates an empty buffer holding up to `capacity` samples.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: Vec::with_capacity(capacity),
            head: 0,
            capacity,
        }
    }

    /// Appends a sample, overwriting the oldest when full.
    pub fn push(&mut self, sample: VelocitySample) {
        if self.capacity == 0 {
            return;
        }
        if self.samples.len() < self.capacity {
            self.samples.push(sample);
        } else {
            self.samples[self.head] = sample;
        }
        self.head = (self.head + 1) % self.capacity;
    }

    /// Removes every sample.
    pub fn clear(&mut self) {
        self.samples.clear();
        self.head = 0;
    }

    /// Replaces the capacity. Buffered samples are discarded; a resize
    /// mid-gesture would otherwise mix windows of different lengths.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        self.samples = Vec::with_capacity(capacity);
        self.head = 0;
    }

    /// The maximum number of retained samples.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// The number of buffered samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// `true` when nothing is buffered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Iterates over the buffered samples.
    ///
    /// Order is unspecified; the consumers sum over the window.
    pub fn iter(&self) -> impl Iterator<Item = &VelocitySample> {
        self.samples.iter()
    }
}

impl Default for SampleBuffer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}
