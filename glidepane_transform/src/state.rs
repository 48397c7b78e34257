// Copyright 2026 the Glidepane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The committed transform and its change notifications.

use crate::observers::{Observers, SubscriberId};
use crate::transform::Transform;

/// Owner of the live [`Transform`].
///
/// All mutation flows through [`commit`](Self::commit), which applies a pure
/// function to a snapshot, sanitizes the result, stores it, and notifies
/// subscribers synchronously before returning. There is no other writer, so
/// subscribers always observe a totally ordered sequence of values.
#[derive(Debug, Default)]
pub struct TransformState {
    value: Transform,
    observers: Observers<Transform>,
}

impl TransformState {
    /// Creates a state holding the identity transform.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a state holding `initial`.
    #[must_use]
    pub fn with_initial(initial: Transform) -> Self {
        Self {
            value: initial,
            observers: Observers::new(),
        }
    }

    /// Returns a copy of the live transform.
    #[must_use]
    pub const fn snapshot(&self) -> Transform {
        self.value
    }

    /// Applies `mutate` to a snapshot and commits the result.
    ///
    /// Non-finite `x`/`y` in the result are normalized to `0.0` before the
    /// commit, so a degenerate gesture frame recenters that axis instead of
    /// poisoning every later frame. Subscribers are notified with a copy of
    /// the committed value, in registration order, before this returns.
    pub fn commit(&mut self, mutate: impl FnOnce(Transform) -> Transform) -> Transform {
        let mut next = mutate(self.value);
        if !next.x.is_finite() {
            next.x = 0.0;
        }
        if !next.y.is_finite() {
            next.y = 0.0;
        }
        self.value = next;
        self.observers.notify(&next);
        next
    }

    /// Registers a callback invoked after every commit.
    pub fn subscribe(&mut self, callback: impl FnMut(&Transform) + 'static) -> SubscriberId {
        self.observers.subscribe(callback)
    }

    /// Removes a subscription. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Removes every subscription. Used on disposal.
    pub fn clear_subscribers(&mut self) {
        self.observers.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    #[test]
    fn commit_applies_pure_mutator_and_returns_result() {
        let mut state = TransformState::new();
        let next = state.commit(|t| Transform {
            x: t.x + 50.0,
            y: t.y + 30.0,
            ..t
        });
        assert_eq!(next.x, 50.0);
        assert_eq!(next.y, 30.0);
        assert_eq!(state.snapshot(), next);
    }

    #[test]
    fn subscribers_see_each_commit_in_order() {
        let seen: Rc<RefCell<Vec<f64>>> = Rc::new(RefCell::new(Vec::new()));
        let mut state = TransformState::new();
        let seen2 = seen.clone();
        state.subscribe(move |t| seen2.borrow_mut().push(t.x));
        state.commit(|t| Transform { x: 1.0, ..t });
        state.commit(|t| Transform { x: 2.0, ..t });
        assert_eq!(*seen.borrow(), alloc::vec![1.0, 2.0]);
    }

    #[test]
    fn unsubscribed_callback_is_not_called() {
        let hits = Rc::new(RefCell::new(0));
        let mut state = TransformState::new();
        let hits2 = hits.clone();
        let id = state.subscribe(move |_| *hits2.borrow_mut() += 1);
        state.commit(|t| t);
        assert!(state.unsubscribe(id));
        state.commit(|t| t);
        assert_eq!(*hits.borrow(), 1);
    }

    #[test]
    fn non_finite_translation_recenters_that_axis() {
        let mut state = TransformState::with_initial(Transform {
            x: 10.0,
            y: 20.0,
            zoom: 2.0,
        });
        let next = state.commit(|t| Transform {
            x: f64::NAN,
            y: f64::INFINITY,
            ..t
        });
        assert_eq!(next.x, 0.0);
        assert_eq!(next.y, 0.0);
        assert_eq!(next.zoom, 2.0);
    }

    #[test]
    fn notification_carries_the_sanitized_value() {
        let seen = Rc::new(RefCell::new(None));
        let mut state = TransformState::new();
        let seen2 = seen.clone();
        state.subscribe(move |t| *seen2.borrow_mut() = Some(*t));
        state.commit(|t| Transform { x: f64::NAN, ..t });
        assert_eq!(seen.borrow().map(|t| t.x), Some(0.0));
    }
}
