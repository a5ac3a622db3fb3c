//! Latest-snapshot broadcast for canvas observers.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;

use crate::draw::CanvasSnapshot;

/// Single-slot channel holding the most recent [`CanvasSnapshot`].
///
/// Observers get the value current at the time they subscribe plus every
/// later one; no history is kept. Publishing never blocks and succeeds even
/// when nobody is listening.
#[derive(Clone)]
pub struct CanvasPublisher {
    sender: Arc<watch::Sender<Option<CanvasSnapshot>>>,
    published: Arc<AtomicU64>,
}

impl Default for CanvasPublisher {
    fn default() -> Self {
        Self::new()
    }
}

impl CanvasPublisher {
    pub fn new() -> Self {
        let (sender, _receiver) = watch::channel(None);
        Self {
            sender: Arc::new(sender),
            published: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Replaces the current snapshot and wakes every observer.
    pub fn publish(&self, snapshot: CanvasSnapshot) {
        self.sender.send_replace(Some(snapshot));
        self.published.fetch_add(1, Ordering::AcqRel);
    }

    /// Returns the snapshot currently in the slot, if any was published.
    pub fn latest(&self) -> Option<CanvasSnapshot> {
        self.sender.borrow().clone()
    }

    /// Attaches a new observer.
    pub fn subscribe(&self) -> watch::Receiver<Option<CanvasSnapshot>> {
        self.sender.subscribe()
    }

    /// Number of snapshots published since creation.
    pub fn publish_count(&self) -> u64 {
        self.published.load(Ordering::Acquire)
    }

    pub fn observer_count(&self) -> usize {
        self.sender.receiver_count()
    }
}
