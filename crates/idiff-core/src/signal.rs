//! Synchronous change notification with scoped suppression.
//!
//! Every interactive control owns a [`Notifier`]. User-driven updates emit
//! into it; the owning view drains it on the event thread and reacts. While a
//! [`SignalBlocker`] is alive, emissions are dropped, so a handler can update
//! the control it is reacting to without re-triggering itself.

use std::ops::{Deref, DerefMut};

/// Queue of pending events for a single emitter.
#[derive(Debug)]
pub struct Notifier<E> {
    pending: Vec<E>,
    blocked: bool,
}

impl<E> Default for Notifier<E> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
            blocked: false,
        }
    }
}

impl<E> Notifier<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `event` unless notifications are blocked. Returns whether it was queued.
    pub fn emit(&mut self, event: E) -> bool {
        if self.blocked {
            return false;
        }
        self.pending.push(event);
        true
    }

    /// Take all pending events in emission order.
    pub fn drain(&mut self) -> Vec<E> {
        std::mem::take(&mut self.pending)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn is_blocked(&self) -> bool {
        self.blocked
    }

    /// Suppress emissions until the returned guard is dropped.
    pub fn block(&mut self) -> SignalBlocker<'_, Self> {
        SignalBlocker::new(self)
    }
}

/// Anything that owns a [`Notifier`] and can therefore be blocked.
pub trait Notifies {
    type Event;

    fn notifier_mut(&mut self) -> &mut Notifier<Self::Event>;
}

impl<E> Notifies for Notifier<E> {
    type Event = E;

    fn notifier_mut(&mut self) -> &mut Notifier<E> {
        self
    }
}

/// Scoped suppression guard. Dereferences to the blocked target and restores
/// the previous blocked state on drop, so guards nest.
pub struct SignalBlocker<'a, T: Notifies> {
    target: &'a mut T,
    previous: bool,
}

impl<'a, T: Notifies> SignalBlocker<'a, T> {
    pub fn new(target: &'a mut T) -> Self {
        let notifier = target.notifier_mut();
        let previous = notifier.blocked;
        notifier.blocked = true;
        Self { target, previous }
    }
}

impl<T: Notifies> Deref for SignalBlocker<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.target
    }
}

impl<T: Notifies> DerefMut for SignalBlocker<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        self.target
    }
}

impl<T: Notifies> Drop for SignalBlocker<'_, T> {
    fn drop(&mut self) {
        self.target.notifier_mut().blocked = self.previous;
    }
}

#[cfg(test)]
mod tests {
    use super::Notifier;

    #[test]
    fn blocked_emissions_are_dropped() {
        let mut notifier = Notifier::new();
        assert!(notifier.emit(1));
        {
            let mut guard = notifier.block();
            assert!(!guard.emit(2));
            assert!(guard.is_blocked());
        }
        assert!(!notifier.is_blocked());
        assert!(notifier.emit(3));
        assert_eq!(notifier.drain(), vec![1, 3]);
        assert!(!notifier.has_pending());
    }

    #[test]
    fn nested_guards_restore_outer_state() {
        let mut notifier: Notifier<u8> = Notifier::new();
        let mut outer = notifier.block();
        {
            let inner = outer.block();
            assert!(inner.is_blocked());
        }
        assert!(outer.is_blocked());
        drop(outer);
        assert!(!notifier.is_blocked());
    }
}
