//! Monotonic request sequencing.
//!
//! Backend calls are dispatched from UI events with no coordination between
//! outstanding requests; two quick index switches can otherwise finish out
//! of order and leave the older response in control of the panel. A
//! [`SeqGuard`] hands out a [`Ticket`] when a logical operation begins, and
//! only the newest ticket is allowed to commit its response ("latest wins").

use std::sync::atomic::{AtomicU64, Ordering};

/// A ticket for one logical operation (index change, search, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Latest-wins guard for one kind of logical operation.
#[derive(Debug, Default)]
pub struct SeqGuard {
    /// Sequence number of the newest operation.
    current: AtomicU64,
}

impl SeqGuard {
    /// Creates a guard with no outstanding operations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new operation, superseding every earlier ticket.
    pub fn begin(&self) -> Ticket {
        Ticket(self.current.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Returns true if `ticket` is still the newest operation.
    ///
    /// Call this when a response arrives: a `false` means a newer operation
    /// began in the meantime and this response must be dropped.
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.current.load(Ordering::SeqCst) == ticket.0
    }
}
