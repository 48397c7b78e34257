// Copyright 2026 the Glidepane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glidepane Bounds: pure clamping of proposed transforms.
//!
//! Two constraints are applied, in order:
//! - **Zoom limits**: the committed zoom always lands in
//!   [`ZoomLimits::min`]`..=`[`ZoomLimits::max`]. For multiplicative
//!   gestures, [`clamp_zoom_factor`] rescales the *factor* so the anchored
//!   zoom correction is computed from the factor that will actually apply.
//! - **Visibility margin** (optional): at least [`BoundsConfig::visible_margin`]
//!   pixels of the scaled surface must remain inside the viewport on each
//!   axis, so content cannot be flung out of reach.
//!
//! Everything here is a pure function of the proposed transform and the two
//! rects; clamping never fails and is applied on every commit path.
//!
//! The visibility pass intentionally favors the top-left: left/top is fixed
//! first, right/bottom is derived from that result, and only left/top is
//! re-validated. When the two constraints of an axis cannot both hold (a
//! surface smaller than the required margins), the axis recenters to zero.
//! Hosts rely on this deterministic bias; see `clamp_visibility`.

#![cfg_attr(not(feature = "std"), no_std)]

use glidepane_transform::Transform;
use kurbo::Rect;

/// Inclusive zoom range.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ZoomLimits {
    /// Smallest committable zoom.
    pub min: f64,
    /// Largest committable zoom.
    pub max: f64,
}

impl ZoomLimits {
    /// The default maximum zoom.
    pub const DEFAULT_MAX: f64 = 512.0;

    /// Returns `zoom` clamped into this range.
    #[must_use]
    pub fn clamp(&self, zoom: f64) -> f64 {
        zoom.clamp(self.min, self.max)
    }
}

impl Default for ZoomLimits {
    /// `1 / 512 ..= 512`.
    fn default() -> Self {
        Self {
            min: 1.0 / Self::DEFAULT_MAX,
            max: Self::DEFAULT_MAX,
        }
    }
}

/// Clamping configuration.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct BoundsConfig {
    /// Zoom range.
    pub limits: ZoomLimits,
    /// Minimum number of pixels of the scaled surface that must stay visible
    /// inside the viewport, per edge. `None` disables the visibility clamp.
    pub visible_margin: Option<f64>,
}

/// Rescales a multiplicative zoom change so the resulting zoom lands inside
/// `limits`, and returns the adjusted factor.
///
/// At a limit, further zooming in that direction yields exactly `1.0`, so
/// the anchored-zoom correction computed from the returned factor is a
/// no-op rather than a translation glitch.
#[must_use]
pub fn clamp_zoom_factor(factor: f64, current_zoom: f64, limits: &ZoomLimits) -> f64 {
    limits.clamp(current_zoom * factor) / current_zoom
}

/// Applies zoom limits and, when configured, the visibility margin to a
/// proposed transform. Pure; never fails.
///
/// `surface_rect` and `viewport_rect` are both in document coordinates. The
/// scaled surface is modeled as `surface_rect` scaled by `zoom` about its
/// own center, then translated by `(x, y)`.
#[must_use]
pub fn clamp(
    proposed: Transform,
    surface_rect: Rect,
    viewport_rect: Rect,
    config: &BoundsConfig,
) -> Transform {
    let mut next = proposed;
    next.zoom = config.limits.clamp(next.zoom);
    if let Some(margin) = config.visible_margin {
        next = clamp_visibility(next, surface_rect, viewport_rect, margin);
    }
    next
}

/// Adjusts the translation so at least `margin` pixels of the scaled surface
/// remain visible inside the viewport on each axis.
///
/// Per axis: the left/top constraint is satisfied first, the right/bottom
/// constraint is then satisfied from that result, and left/top is
/// re-validated; if it is violated again the axis recenters to zero. The
/// right/bottom constraint is deliberately not re-checked after the
/// recenter, so the top-left edge wins whenever the constraints conflict.
#[must_use]
pub fn clamp_visibility(
    proposed: Transform,
    surface_rect: Rect,
    viewport_rect: Rect,
    margin: f64,
) -> Transform {
    // Work in container coordinates (origin at the viewport center), where a
    // translation of zero means "centered".
    let base = surface_rect.center() - viewport_rect.center();
    let half_w = surface_rect.width() * proposed.zoom / 2.0;
    let half_h = surface_rect.height() * proposed.zoom / 2.0;

    Transform {
        x: clamp_axis(
            proposed.x,
            base.x,
            half_w,
            viewport_rect.width() / 2.0,
            margin,
        ),
        y: clamp_axis(
            proposed.y,
            base.y,
            half_h,
            viewport_rect.height() / 2.0,
            margin,
        ),
        zoom: proposed.zoom,
    }
}

/// One axis of the visibility clamp. The viewport spans
/// `-view_half..=view_half`; the scaled surface spans
/// `base + pos ± half`.
fn clamp_axis(pos: f64, base: f64, half: f64, view_half: f64, margin: f64) -> f64 {
    let mut pos = pos;
    // The near (left/top) edge of the surface must sit at least `margin`
    // pixels before the viewport's far edge, and the far (right/bottom)
    // edge at least `margin` pixels past the viewport's near edge.
    let near_limit = view_half - margin;
    let far_limit = -view_half + margin;

    let surface_min = base + pos - half;
    if surface_min > near_limit {
        pos -= surface_min - near_limit;
    }
    let surface_max = base + pos + half;
    if surface_max < far_limit {
        pos += far_limit - surface_max;
    }
    // Re-validate the near edge only; the far edge keeps whatever it got.
    if base + pos - half > near_limit {
        pos = 0.0;
    }
    pos
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Rect;

    const EPS: f64 = 1e-9;

    fn viewport() -> Rect {
        Rect::new(0.0, 0.0, 200.0, 200.0)
    }

    #[test]
    fn default_limits_are_reciprocal() {
        let limits = ZoomLimits::default();
        assert_eq!(limits.max, 512.0);
        assert!((limits.min - 1.0 / 512.0).abs() < EPS);
    }

    #[test]
    fn factor_passes_through_inside_limits() {
        let limits = ZoomLimits::default();
        assert!((clamp_zoom_factor(1.1, 1.0, &limits) - 1.1).abs() < EPS);
        assert!((clamp_zoom_factor(0.5, 2.0, &limits) - 0.5).abs() < EPS);
    }

    #[test]
    fn factor_at_max_zoom_collapses_to_one() {
        let limits = ZoomLimits::default();
        let factor = clamp_zoom_factor(1.1, 512.0, &limits);
        assert!((factor - 1.0).abs() < EPS);
    }

    #[test]
    fn factor_overshooting_max_is_rescaled() {
        let limits = ZoomLimits::default();
        // 500 * 1.1 = 550 would overshoot; the factor that lands on 512 is
        // 512 / 500.
        let factor = clamp_zoom_factor(1.1, 500.0, &limits);
        assert!((factor - 512.0 / 500.0).abs() < EPS);
        assert!((500.0 * factor - 512.0).abs() < EPS);
    }

    #[test]
    fn factor_undershooting_min_is_rescaled() {
        let limits = ZoomLimits::default();
        let current = 1.0 / 256.0;
        let factor = clamp_zoom_factor(0.25, current, &limits);
        assert!((current * factor - limits.min).abs() < EPS);
    }

    #[test]
    fn clamp_bounds_zoom() {
        let config = BoundsConfig::default();
        let t = clamp(
            Transform {
                x: 0.0,
                y: 0.0,
                zoom: 10_000.0,
            },
            viewport(),
            viewport(),
            &config,
        );
        assert_eq!(t.zoom, 512.0);
    }

    #[test]
    fn no_margin_means_translation_is_untouched() {
        let config = BoundsConfig::default();
        let t = clamp(
            Transform {
                x: 1e6,
                y: -1e6,
                zoom: 1.0,
            },
            viewport(),
            viewport(),
            &config,
        );
        assert_eq!(t.x, 1e6);
        assert_eq!(t.y, -1e6);
    }

    #[test]
    fn in_bounds_transform_is_unchanged() {
        let t = Transform {
            x: 5.0,
            y: -3.0,
            zoom: 1.0,
        };
        let surface = Rect::new(0.0, 0.0, 300.0, 300.0);
        let clamped = clamp_visibility(t, surface, viewport(), 20.0);
        assert_eq!(clamped, t);
    }

    #[test]
    fn near_edge_pulled_back_to_margin() {
        // Surface 300 wide at zoom 1 (half 150) centered 50 right of the
        // viewport center, viewport 200 (half 100), margin 20: the surface's
        // left edge may sit at most at 100 - 20 = 80 in container
        // coordinates, i.e. 50 + x - 150 <= 80.
        let surface = Rect::new(0.0, 0.0, 300.0, 300.0);
        let t = Transform {
            x: 300.0,
            y: 0.0,
            zoom: 1.0,
        };
        let clamped = clamp_visibility(t, surface, viewport(), 20.0);
        assert!((clamped.x - 180.0).abs() < EPS);
        assert_eq!(clamped.y, 0.0);
    }

    #[test]
    fn far_edge_pushed_forward_to_margin() {
        let surface = Rect::new(0.0, 0.0, 300.0, 300.0);
        let t = Transform {
            x: -300.0,
            y: 0.0,
            zoom: 1.0,
        };
        let clamped = clamp_visibility(t, surface, viewport(), 20.0);
        // Right edge must reach -100 + 20 = -80: 50 + x + 150 = -80.
        assert!((clamped.x - (-280.0)).abs() < EPS);
    }

    #[test]
    fn margin_scales_with_zoom() {
        // At zoom 2 the scaled surface is 600 wide, so it can travel further
        // before violating the near-edge constraint.
        let surface = Rect::new(0.0, 0.0, 300.0, 300.0);
        let t = Transform {
            x: 1000.0,
            y: 0.0,
            zoom: 2.0,
        };
        let clamped = clamp_visibility(t, surface, viewport(), 20.0);
        // Left edge at 50 + x - 300 must be <= 80.
        assert!((clamped.x - 330.0).abs() < EPS);
    }

    #[test]
    fn conflicting_constraints_recenter_the_axis() {
        // Surface 10 wide centered on the viewport, margin 150 on a
        // 200-wide viewport: the near-edge constraint wants x <= -45, the
        // far-edge constraint wants x >= 45. Left is fixed, right is fixed
        // from that result, the left re-check fails, and the axis recenters
        // to zero. The far edge is deliberately not re-checked.
        let surface = Rect::new(95.0, 95.0, 105.0, 105.0);
        let t = Transform {
            x: 100.0,
            y: 0.0,
            zoom: 1.0,
        };
        let clamped = clamp_visibility(t, surface, viewport(), 150.0);
        assert_eq!(clamped.x, 0.0);
    }

    #[test]
    fn axes_clamp_independently() {
        let surface = Rect::new(0.0, 0.0, 300.0, 300.0);
        let t = Transform {
            x: 300.0,
            y: -2.0,
            zoom: 1.0,
        };
        let clamped = clamp_visibility(t, surface, viewport(), 20.0);
        assert!((clamped.x - 180.0).abs() < EPS);
        assert_eq!(clamped.y, -2.0);
    }

    #[test]
    fn offset_surface_center_is_accounted_for() {
        // This surface is centered 100 right of the viewport center, so it
        // tolerates 100 less translation than a centered one would.
        let surface = Rect::new(50.0, 0.0, 350.0, 300.0);
        let t = Transform {
            x: 300.0,
            y: 0.0,
            zoom: 1.0,
        };
        let clamped = clamp_visibility(t, surface, viewport(), 20.0);
        assert!((clamped.x - 130.0).abs() < EPS);
    }
}
