// Copyright 2026 the Lookout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Observable cell: a value plus listeners notified when it changes.
//!
//! ## Minimal example
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use lookout_tracker::signal::Signal;
//!
//! let seen = Rc::new(Cell::new(0));
//! let mut s = Signal::new(1_u32);
//! let sink = Rc::clone(&seen);
//! s.subscribe(move |v| sink.set(*v));
//!
//! assert!(s.set(2));
//! assert!(!s.set(2)); // same value, no notification
//! assert_eq!(seen.get(), 2);
//! ```

use alloc::boxed::Box;
use alloc::vec::Vec;

/// Handle returned by [`Signal::subscribe`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ListenerId(u64);

type Listener<T> = Box<dyn FnMut(&T)>;

/// A mutable cell that pushes every change to its listeners.
///
/// Listeners run synchronously inside [`Signal::set`], in subscription order,
/// and only when the new value differs from the old one.
pub struct Signal<T> {
    value: T,
    listeners: Vec<(ListenerId, Listener<T>)>,
    next_id: u64,
}

impl<T: core::fmt::Debug> core::fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Signal")
            .field("value", &self.value)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl<T: Default + PartialEq> Default for Signal<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: PartialEq> Signal<T> {
    /// Create a signal holding `value` with no listeners.
    pub fn new(value: T) -> Self {
        Self {
            value,
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    /// Current value.
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Store `value` and notify listeners. Returns false, without notifying,
    /// when the value is unchanged.
    pub fn set(&mut self, value: T) -> bool {
        if self.value == value {
            return false;
        }
        self.value = value;
        for (_, listener) in &mut self.listeners {
            listener(&self.value);
        }
        true
    }

    /// Register a listener for future changes.
    pub fn subscribe(&mut self, listener: impl FnMut(&T) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(l, _)| *l != id);
        self.listeners.len() != before
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}
