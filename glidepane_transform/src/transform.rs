// Copyright 2026 the Glidepane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The transform value type and anchored-zoom math.

use kurbo::{Point, Rect, Vec2};

/// A 2D pan/zoom transform: a translation in document pixels plus a uniform
/// zoom factor.
///
/// This is a plain value. It is owned by
/// [`TransformState`](crate::TransformState); everything else works on
/// copies. Equivalent to the affine `matrix(zoom, 0, 0, zoom, x, y)` — no
/// rotation or shear, and the two scale components are always equal.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Transform {
    /// Horizontal translation, in document pixels.
    pub x: f64,
    /// Vertical translation, in document pixels.
    pub y: f64,
    /// Uniform scale factor. Greater than zero.
    pub zoom: f64,
}

impl Transform {
    /// The identity transform: no translation, zoom 1.
    pub const IDENTITY: Self = Self {
        x: 0.0,
        y: 0.0,
        zoom: 1.0,
    };

    /// Returns this transform translated by `delta`.
    #[must_use]
    pub fn translated(self, delta: Vec2) -> Self {
        Self {
            x: self.x + delta.x,
            y: self.y + delta.y,
            zoom: self.zoom,
        }
    }

    /// Returns the translation component as a vector.
    #[must_use]
    pub const fn translation(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Translation error introduced by scaling by `factor` about the origin when
/// the intended anchor is `p_child` (in child-local coordinates).
///
/// Scaling moves the anchor to `p_child * factor`; the difference
/// `p_child * (factor - 1)` is returned. Subtract it from the translation to
/// keep the anchor visually fixed:
///
/// ```rust
/// use glidepane_transform::{Transform, anchor_correction};
/// use kurbo::Vec2;
///
/// let t = Transform::IDENTITY;
/// let factor = 2.0;
/// let err = anchor_correction(Vec2::new(100.0, 50.0), factor);
/// let zoomed = Transform {
///     x: t.x - err.x,
///     y: t.y - err.y,
///     zoom: t.zoom * factor,
/// };
/// assert_eq!(zoomed.x, -100.0);
/// assert_eq!(zoomed.y, -50.0);
/// ```
#[must_use]
pub fn anchor_correction(p_child: Vec2, factor: f64) -> Vec2 {
    p_child * (factor - 1.0)
}

/// Converts a document-space position into container space by subtracting
/// the viewport rect's center.
///
/// Container space has its origin at the viewport center, so a transform of
/// `(0, 0)` means "centered".
#[must_use]
pub fn doc_to_container(pos: Point, viewport_rect: Rect) -> Point {
    pos - viewport_rect.center().to_vec2()
}

/// Converts a container-space position into the child's local space by
/// subtracting the transform's translation.
///
/// Note the zoom factor is deliberately not divided out: the anchored-zoom
/// correction wants the anchor in the child's *scaled* frame.
#[must_use]
pub fn container_to_child(pos: Point, transform: &Transform) -> Point {
    pos - transform.translation()
}

/// Inverse of [`container_to_child`].
#[must_use]
pub fn child_to_container(pos: Point, transform: &Transform) -> Point {
    pos + transform.translation()
}

/// Inverse of [`doc_to_container`].
#[must_use]
pub fn container_to_doc(pos: Point, viewport_rect: Rect) -> Point {
    pos + viewport_rect.center().to_vec2()
}
