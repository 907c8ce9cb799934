// Copyright 2026 the Deeplist Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Timestamp-driven trailing-edge debouncing.

/// Trailing-edge debouncer carrying a snapshot value.
///
/// Each [`arm`](Self::arm) restarts the quiet period and replaces the
/// snapshot, so a burst of events collapses into the latest one. The
/// snapshot is released by [`poll`](Self::poll) once the quiet period has
/// elapsed. Timestamps are caller-supplied milliseconds; the debouncer
/// never reads a clock.
#[derive(Clone, Debug)]
pub struct Debounce<T> {
    quiet_ms: u64,
    armed: Option<Armed<T>>,
}

#[derive(Clone, Debug)]
struct Armed<T> {
    deadline: u64,
    snapshot: T,
}

impl<T> Debounce<T> {
    /// Creates a debouncer that fires after `quiet_ms` without re-arming.
    pub fn new(quiet_ms: u64) -> Self {
        Self {
            quiet_ms,
            armed: None,
        }
    }

    /// The configured quiet period in milliseconds.
    pub fn quiet_ms(&self) -> u64 {
        self.quiet_ms
    }

    /// Whether a snapshot is waiting to fire.
    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Starts (or restarts) the quiet period, replacing any held snapshot.
    pub fn arm(&mut self, snapshot: T, now_ms: u64) {
        self.armed = Some(Armed {
            deadline: now_ms.saturating_add(self.quiet_ms),
            snapshot,
        });
    }

    /// Releases the snapshot if the quiet period has elapsed.
    pub fn poll(&mut self, now_ms: u64) -> Option<T> {
        if self.armed.as_ref().is_some_and(|armed| now_ms >= armed.deadline) {
            self.armed.take().map(|armed| armed.snapshot)
        } else {
            None
        }
    }

    /// Disarms without firing, returning the held snapshot if any.
    pub fn cancel(&mut self) -> Option<T> {
        self.armed.take().map(|armed| armed.snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_only_after_the_quiet_period() {
        let mut debounce = Debounce::new(50);
        debounce.arm("a", 100);
        assert!(debounce.is_armed());
        assert_eq!(debounce.poll(149), None);
        assert_eq!(debounce.poll(150), Some("a"));
        assert!(!debounce.is_armed());
        assert_eq!(debounce.poll(200), None);
    }

    #[test]
    fn rearming_extends_the_deadline_and_replaces_the_snapshot() {
        let mut debounce = Debounce::new(50);
        debounce.arm(1, 100);
        debounce.arm(2, 140);
        assert_eq!(debounce.poll(160), None);
        assert_eq!(debounce.poll(190), Some(2));
    }

    #[test]
    fn cancel_disarms_without_firing() {
        let mut debounce = Debounce::new(50);
        debounce.arm("a", 0);
        assert_eq!(debounce.cancel(), Some("a"));
        assert_eq!(debounce.poll(1_000), None);
        assert_eq!(debounce.cancel(), None);
    }
}
