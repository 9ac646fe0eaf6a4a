//! Latest-wins slot for asynchronous results.
//!
//! Every request takes a [`Ticket`] from the slot. When its result arrives,
//! [`LatestSlot::settle`] hands the value back only if no newer ticket was
//! issued in the meantime. Older results are dropped. There is no real
//! cancellation; the collaborator still finishes the work.

/// Identifies one issued request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    pub fn seq(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
pub struct LatestSlot {
    issued: u64,
    pending: bool,
}

impl LatestSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new request, superseding any in flight.
    pub fn issue(&mut self) -> Ticket {
        self.issued += 1;
        self.pending = true;
        Ticket(self.issued)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.issued
    }

    /// True while the newest ticket has not been settled.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Returns `value` if `ticket` is the newest unsettled ticket.
    pub fn settle<T>(&mut self, ticket: Ticket, value: T) -> Option<T> {
        if !self.pending || !self.is_current(ticket) {
            tracing::trace!(
                ticket = ticket.0,
                current = self.issued,
                "discarding stale result"
            );
            return None;
        }
        self.pending = false;
        Some(value)
    }

    /// Forgets the in-flight request without issuing a new one.
    pub fn abandon(&mut self) {
        if self.pending {
            self.issued += 1;
            self.pending = false;
        }
    }
}
