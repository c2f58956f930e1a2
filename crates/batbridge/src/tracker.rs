//! Node identity tracking.
//!
//! Remembers which node ids have been observed at least once during this
//! process lifetime. The first sighting of an id is the exactly-once
//! transition the discovery trigger hangs off; reconnects of any downstream
//! transport never reset it.

use parking_lot::Mutex;
use std::collections::BTreeSet;

/// The set of node ids seen so far. Monotonically grows; never cleared.
#[derive(Debug, Default)]
pub struct NodeTracker {
    seen: Mutex<BTreeSet<u8>>,
}

impl NodeTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        NodeTracker::default()
    }

    /// Record a sighting of `node_id`. Returns `true` exactly once per id,
    /// on its first sighting. The seen-check and insert happen under one
    /// lock, so two callers can never both observe "not seen" for the same
    /// id.
    pub fn observe(&self, node_id: u8) -> bool {
        self.seen.lock().insert(node_id)
    }

    /// Whether `node_id` has been seen before.
    pub fn has_seen(&self, node_id: u8) -> bool {
        self.seen.lock().contains(&node_id)
    }

    /// Number of distinct node ids observed so far.
    pub fn count(&self) -> usize {
        self.seen.lock().len()
    }

    /// All observed ids, ascending. Used to replay discovery announcements
    /// on downstream reconnect.
    pub fn seen_ids(&self) -> Vec<u8> {
        self.seen.lock().iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_sighting_reported_exactly_once() {
        let tracker = NodeTracker::new();
        assert!(tracker.observe(3));
        assert!(!tracker.observe(3));
        assert!(!tracker.observe(3));
        assert!(tracker.observe(4));
        assert_eq!(tracker.count(), 2);
    }

    #[test]
    fn test_count_tracks_distinct_ids() {
        let tracker = NodeTracker::new();
        for id in [1u8, 2, 3, 2, 1, 3, 3] {
            tracker.observe(id);
        }
        assert_eq!(tracker.count(), 3);
        assert_eq!(tracker.seen_ids(), vec![1, 2, 3]);
    }

    #[test]
    fn test_has_seen() {
        let tracker = NodeTracker::new();
        assert!(!tracker.has_seen(9));
        tracker.observe(9);
        assert!(tracker.has_seen(9));
    }

    #[test]
    fn test_concurrent_observers_agree_on_one_winner() {
        use std::sync::Arc;

        let tracker = Arc::new(NodeTracker::new());
        let mut handles = Vec::new();
        for _ in 0..8 {
            let tracker = tracker.clone();
            handles.push(std::thread::spawn(move || {
                let mut firsts = 0u32;
                for _ in 0..1000 {
                    if tracker.observe(42) {
                        firsts += 1;
                    }
                }
                firsts
            }));
        }
        let total: u32 = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(total, 1);
        assert_eq!(tracker.count(), 1);
    }
}
