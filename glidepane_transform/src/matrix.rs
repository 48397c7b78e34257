// Copyright 2026 the Glidepane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The `matrix(a, b, c, d, e, f)` wire format.
//!
//! Paint sinks and interpolation engines speak this serialized form; the
//! parser is the readback path for interrupting a transition at its live
//! value. Parsing is strict: six comma-separated finite numbers, zero shear
//! terms. A malformed value is surfaced as [`ParseMatrixError`] rather than
//! silently coerced, since a bad readback means the engine and the committed
//! state have diverged.

use alloc::format;
use alloc::string::{String, ToString};
use core::fmt;

use crate::transform::Transform;

/// Serializes a transform as `matrix(zoom, 0, 0, zoom, x, y)`.
#[must_use]
pub fn encode_matrix(transform: &Transform) -> String {
    format!(
        "matrix({}, 0, 0, {}, {}, {})",
        transform.zoom, transform.zoom, transform.x, transform.y
    )
}

/// Parses the output of [`encode_matrix`] (or an engine's interpolation of
/// it) back into a [`Transform`].
///
/// Fails on anything but `matrix(a, b, c, d, e, f)` with `b == c == 0` and
/// all remaining components finite.
pub fn parse_matrix(raw: &str) -> Result<Transform, ParseMatrixError> {
    let err = || ParseMatrixError {
        raw: raw.to_string(),
    };

    let inner = raw
        .trim()
        .strip_prefix("matrix(")
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(err)?;

    let mut components = [0.0_f64; 6];
    let mut count = 0;
    for part in inner.split(',') {
        if count == components.len() {
            return Err(err());
        }
        components[count] = part.trim().parse::<f64>().map_err(|_| err())?;
        count += 1;
    }
    if count != components.len() {
        return Err(err());
    }

    let [a, b, c, d, e, f] = components;
    // Shear/rotation terms must be exactly zero; uniform scale is assumed
    // from `a` (the engines we read back from interpolate `a` and `d` in
    // lockstep).
    if b != 0.0 || c != 0.0 {
        return Err(err());
    }
    // `parse` accepts "NaN" and "inf" spellings.
    if !(a.is_finite() && d.is_finite() && e.is_finite() && f.is_finite()) {
        return Err(err());
    }

    Ok(Transform {
        x: e,
        y: f,
        zoom: a,
    })
}

/// A matrix string that could not be parsed.
///
/// Carries the raw offending input for diagnostics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseMatrixError {
    raw: String,
}

impl ParseMatrixError {
    /// The raw string that failed to parse.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for ParseMatrixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "malformed transform matrix: {:?}", self.raw)
    }
}

impl core::error::Error for ParseMatrixError {}
