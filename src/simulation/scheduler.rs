//! Per-frame callback subscriptions.
//!
//! The engine never loops on its own. It subscribes to the host's next
//! display refresh through a [`FrameScheduler`], and the host calls
//! [`Engine::frame`](super::engine::Engine::frame) with the handle it was given.

use std::collections::BTreeSet;

/// Identifies one pending frame subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameHandle(pub u64);

/// A source of per-refresh callbacks.
pub trait FrameScheduler {
    /// Subscribes to the next display refresh.
    fn request_frame(&mut self) -> FrameHandle;

    /// Drops a pending subscription. Unknown or already fired handles are ignored.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Scheduler for hosts that drive frames from their own loop, and for tests.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    pending: BTreeSet<FrameHandle>,
}

impl ManualScheduler {
    /// Creates a scheduler with no pending subscriptions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns the oldest pending subscription, as the host would
    /// when the display refreshes.
    pub fn take_pending(&mut self) -> Option<FrameHandle> {
        self.pending.pop_first()
    }

    /// Number of subscriptions waiting for a refresh.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next_id);
        self.next_id += 1;
        self.pending.insert(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.pending.remove(&handle);
    }
}
