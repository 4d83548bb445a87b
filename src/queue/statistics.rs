//! Queue Statistics
//!
//! Point-in-time counts for the priority queue. A snapshot is always taken
//! under a single guard entry, so its three counts agree with each other.

use serde::Serialize;

/// Consistent snapshot of queue counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct QueueSnapshot {
    /// Total messages across both levels
    pub total: usize,

    /// Messages waiting in the high priority sequence
    pub high: usize,

    /// Messages waiting in the normal priority sequence
    pub normal: usize,
}

impl QueueSnapshot {
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Whether the counts satisfy `total == high + normal`
    pub fn is_consistent(&self) -> bool {
        self.total == self.high + self.normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_snapshot_is_empty() {
        let snapshot = QueueSnapshot::default();
        assert!(snapshot.is_empty());
        assert!(snapshot.is_consistent());
    }

    #[test]
    fn test_snapshot_json() {
        let snapshot = QueueSnapshot { total: 3, high: 1, normal: 2 };
        let json = serde_json::to_string(&snapshot).unwrap();
        assert_eq!(json, r#"{"total":3,"high":1,"normal":2}"#);
    }
}
