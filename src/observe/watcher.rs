//! Throttled position and size watchers.
//!
//! Both watchers keep a snapshot and an interval. A poll before the interval
//! has elapsed returns `None` regardless of the underlying value; a poll at
//! or past the interval compares against the snapshot and reports the new
//! value only when it actually changed. Repeated movement within one
//! interval therefore collapses into a single report.

use std::time::{Duration, Instant};

use crate::dom::{Dom, NodeId};
use crate::geometry::{Offset, Size};

/// Watches a node's absolute offset, reporting throttled changes.
#[derive(Debug)]
pub struct PositionWatcher {
    target: NodeId,
    snapshot: Offset,
    interval: Duration,
    last_poll: Option<Instant>,
}

impl PositionWatcher {
    /// Start watching. The current offset becomes the baseline snapshot.
    pub fn new(dom: &Dom, target: NodeId, interval: Duration) -> Self {
        Self {
            target,
            snapshot: dom.absolute_offset(target),
            interval,
            last_poll: None,
        }
    }

    /// Poll for a position change. Returns the new offset if the node moved
    /// and the throttle interval has elapsed since the last accepted poll.
    pub fn poll(&mut self, dom: &Dom, now: Instant) -> Option<Offset> {
        if let Some(last) = self.last_poll {
            if now.duration_since(last) < self.interval {
                return None;
            }
        }
        self.last_poll = Some(now);

        let current = dom.absolute_offset(self.target);
        if current != self.snapshot {
            self.snapshot = current;
            Some(current)
        } else {
            None
        }
    }

    /// The most recently observed offset.
    pub fn snapshot(&self) -> Offset {
        self.snapshot
    }
}

/// Watches a node's size, reporting throttled changes.
#[derive(Debug)]
pub struct SizeWatcher {
    target: NodeId,
    snapshot: Size,
    interval: Duration,
    last_poll: Option<Instant>,
}

impl SizeWatcher {
    /// Start watching. The current size becomes the baseline snapshot.
    pub fn new(dom: &Dom, target: NodeId, interval: Duration) -> Self {
        let snapshot = dom.get(target).map(|n| n.size).unwrap_or(Size::ZERO);
        Self {
            target,
            snapshot,
            interval,
            last_poll: None,
        }
    }

    /// The node whose size is being watched.
    pub fn target(&self) -> NodeId {
        self.target
    }

    /// Poll for a size change, throttled like [`PositionWatcher::poll`].
    pub fn poll(&mut self, dom: &Dom, now: Instant) -> Option<Size> {
        if let Some(last) = self.last_poll {
            if now.duration_since(last) < self.interval {
                return None;
            }
        }
        self.last_poll = Some(now);

        let current = dom.get(self.target).map(|n| n.size).unwrap_or(Size::ZERO);
        if current != self.snapshot {
            self.snapshot = current;
            Some(current)
        } else {
            None
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
