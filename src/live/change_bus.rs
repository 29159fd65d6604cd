//! Broadcast channel for table-change notices.
//!
//! [`ChangeBus`] wraps a [`tokio::sync::broadcast`] channel. Every committed
//! write publishes the [`Table`] it touched, and all live queries subscribe
//! to re-evaluate on relevant changes.

use tokio::sync::broadcast;

/// The three persisted tables a write can touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Events,
    Attendees,
    Attendance,
}

/// Broadcast bus for [`Table`] change notices.
///
/// When the ring buffer is full, the oldest notices are dropped for lagging
/// receivers; a lagged live query simply refreshes unconditionally.
#[derive(Debug, Clone)]
pub struct ChangeBus {
    sender: broadcast::Sender<Table>,
}

impl ChangeBus {
    /// Creates a new `ChangeBus` with the given channel capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publishes a change notice to all subscribers.
    ///
    /// Returns the number of receivers that received the notice.
    /// If there are no active receivers, the notice is silently dropped.
    pub fn publish(&self, table: Table) -> usize {
        self.sender.send(table).unwrap_or(0)
    }

    /// Creates a new receiver that will receive all future notices.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Table> {
        self.sender.subscribe()
    }

    /// Returns the current number of active receivers.
    #[must_use]
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for ChangeBus {
    fn default() -> Self {
        Self::new(256)
    }
}
