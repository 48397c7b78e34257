// Copyright 2026 the Glidepane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A small observer registry with explicit subscription ids.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

/// Identifies a subscription in an [`Observers`] registry.
///
/// Ids are unique per registry for its lifetime; an id is never reused, so a
/// stale unsubscribe is a harmless no-op.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

/// An ordered registry of callbacks observing values of type `T`.
///
/// Callbacks are invoked synchronously, in registration order, by
/// [`notify`](Observers::notify). Used for transform-changed and velocity
/// notifications.
pub struct Observers<T> {
    next_id: u64,
    entries: Vec<(SubscriberId, Box<dyn FnMut(&T)>)>,
}

impl<T> Observers<T> {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }

    /// Registers a callback and returns its id.
    pub fn subscribe(&mut self, callback: impl FnMut(&T) + 'static) -> SubscriberId {
        let id = SubscriberId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(callback)));
        id
    }

    /// Removes the subscription with the given id.
    ///
    /// Returns `false` if the id was not registered (already removed).
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    /// Invokes every callback with `value`, in registration order.
    pub fn notify(&mut self, value: &T) {
        for (_, callback) in &mut self.entries {
            callback(value);
        }
    }

    /// Removes every subscription.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns the number of live subscriptions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no subscriptions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for Observers<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Observers<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("next_id", &self.next_id)
            .field("len", &self.entries.len())
            .finish()
    }
}
