// Copyright 2026 the Glidepane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Contact-set math: centroid and spread.

use kurbo::Point;

/// Arithmetic mean of a contact set, or `None` when it is empty.
#[must_use]
pub fn centroid(contacts: &[Point]) -> Option<Point> {
    if contacts.is_empty() {
        return None;
    }
    let mut sum = kurbo::Vec2::ZERO;
    for contact in contacts {
        sum += contact.to_vec2();
    }
    #[expect(clippy::cast_precision_loss, reason = "contact counts are tiny")]
    let n = contacts.len() as f64;
    Some((sum / n).to_point())
}

/// Sum of distances from `center` to each contact.
///
/// This is the pinch "spread": the ratio of consecutive spreads is the zoom
/// factor. Zero for a single contact sitting on the centroid; ratios of
/// degenerate spreads are normalized by the sampler.
#[must_use]
pub fn total_spread(center: Point, contacts: &[Point]) -> f64 {
    contacts
        .iter()
        .map(|contact| center.distance(*contact))
        .sum()
}
