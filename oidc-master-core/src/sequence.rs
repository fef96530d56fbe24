//! Request-generation tracking for views with asynchronous results.
//!
//! Every outgoing request takes a [`Ticket`] from the view's
//! [`RequestSequence`]. When the response arrives it is applied only if its
//! ticket is still the newest one issued; responses to superseded requests
//! are dropped, whatever order they complete in.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Sequence number attached to one outgoing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn number(self) -> u64 {
        self.0
    }
}

/// Monotonic per-view request counter.
#[derive(Debug, Default)]
pub struct RequestSequence {
    latest: AtomicU64,
}

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the ticket for a new request. Tickets start at 1.
    pub fn issue(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether `ticket` is the most recent one issued.
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }
}

/// Result holder that only accepts the response to the newest request.
#[derive(Debug)]
pub struct LatestSlot<T> {
    sequence: RequestSequence,
    value: Mutex<Option<T>>,
}

impl<T> Default for LatestSlot<T> {
    fn default() -> Self {
        Self {
            sequence: RequestSequence::new(),
            value: Mutex::new(None),
        }
    }
}

impl<T> LatestSlot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request; any response still in flight becomes stale.
    pub fn begin(&self) -> Ticket {
        self.sequence.issue()
    }

    /// Whether a response for `ticket` would still be applied.
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.sequence.is_current(ticket)
    }

    /// Store `value` if `ticket` is current. Returns whether it was applied.
    pub fn complete(&self, ticket: Ticket, value: T) -> bool {
        let mut slot = self.value.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        // Checked under the lock so a stale writer cannot race a newer one.
        if !self.sequence.is_current(ticket) {
            tracing::debug!(ticket = ticket.number(), "Discarding stale response");
            return false;
        }
        *slot = Some(value);
        true
    }

    /// Remove and return the stored value.
    pub fn take(&self) -> Option<T> {
        self.value
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take()
    }

    /// Drop the stored value.
    pub fn clear(&self) {
        let _ = self.take();
    }
}

impl<T: Clone> LatestSlot<T> {
    /// Clone of the stored value.
    pub fn get(&self) -> Option<T> {
        self.value
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tickets_increase() {
        let seq = RequestSequence::new();
        let a = seq.issue();
        let b = seq.issue();
        assert!(b > a);
        assert_eq!(a.number(), 1);
        assert!(!seq.is_current(a));
        assert!(seq.is_current(b));
    }
}
