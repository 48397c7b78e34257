// Copyright 2026 the Glidepane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glidepane Transform: the pan/zoom transform value and its committed state.
//!
//! This crate provides the innermost pieces of a pan/zoom surface:
//! - [`Transform`]: a translation plus a uniform zoom factor.
//! - [`TransformState`]: the single owner of the live transform. Every
//!   mutation goes through [`TransformState::commit`] as a pure
//!   `Transform -> Transform` function, and subscribers are notified
//!   synchronously with a copy of the committed value.
//! - [`anchor_correction`]: the translation error introduced by scaling
//!   about a point other than the origin, so zoom gestures can keep the
//!   point under the pointer (or pinch centroid) visually fixed.
//! - [`encode_matrix`] / [`parse_matrix`]: the `matrix(a, b, c, d, e, f)`
//!   wire format used to hand transforms to a paint sink and to read live
//!   values back from an interpolation engine.
//!
//! It owns no platform resources and performs no input interpretation;
//! higher-level crates feed it.
//!
//! ## Example
//!
//! ```rust
//! use glidepane_transform::{Transform, TransformState};
//!
//! let mut state = TransformState::new();
//! let id = state.subscribe(|t| assert_eq!(t.zoom, 2.0));
//! state.commit(|t| Transform { zoom: t.zoom * 2.0, ..t });
//! state.unsubscribe(id);
//! assert_eq!(state.snapshot().zoom, 2.0);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod matrix;
mod observers;
mod state;
mod transform;

pub use matrix::{ParseMatrixError, encode_matrix, parse_matrix};
pub use observers::{Observers, SubscriberId};
pub use state::TransformState;
pub use transform::{
    Transform, anchor_correction, child_to_container, container_to_child, container_to_doc,
    doc_to_container,
};
