// Copyright 2026 the Glidepane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glidepane Gesture: reduces pointer and contact streams to per-frame
//! kinematic deltas.
//!
//! [`GestureSampler`] is a small state machine with two modalities:
//! - a single-pointer drag, emitting incremental [`PanFrame`]s, and
//! - a multi-contact pinch, emitting [`PinchFrame`]s with the centroid
//!   delta, the spread ratio, and the centroid as the zoom anchor.
//!
//! Frames are raw kinematics. The sampler knows nothing about zoom limits,
//! anchor correction, or the committed transform; the surface layer pipes
//! its frames through those. Contact positions are `kurbo::Point`s in
//! document coordinates.
//!
//! ## Example
//!
//! ```rust
//! use glidepane_gesture::GestureSampler;
//! use kurbo::Point;
//!
//! let mut sampler = GestureSampler::new();
//! assert!(sampler.pointer_down(Point::new(100.0, 100.0), 0.0, true));
//! let frame = sampler.pointer_move(Point::new(150.0, 130.0), 16.0).unwrap();
//! assert_eq!(frame.delta.x, 50.0);
//! assert_eq!(frame.delta.y, 30.0);
//! assert_eq!(frame.dt, 16.0);
//! assert!(sampler.pointer_up());
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

mod contact;
mod sampler;

pub use contact::{centroid, total_spread};
pub use sampler::{GestureSampler, PanFrame, PinchFrame, TouchRelease};
