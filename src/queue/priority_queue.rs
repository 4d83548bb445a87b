//! Two-Level Priority Message Queue
//!
//! The engine owns two FIFO sequences, `high` and `normal`, plus a total
//! count. All three are guarded by one exclusive lock and change together,
//! so no observer can see the count disagree with the sequences.
//!
//! Critical sections never allocate or free. A message and the list node
//! that carries it are built before the lock is taken and linked in with an
//! O(1) splice; removed nodes are dropped after the lock is released, and
//! all logging happens outside the lock.

use std::collections::LinkedList;
use std::mem;
use log::{debug, info, warn};
use parking_lot::Mutex;

use crate::queue::config::QueueConfig;
use crate::queue::error::{QueueError, QueueResult};
use crate::queue::message::{Message, PriorityLevel, DEFAULT_HIGH_THRESHOLD, MAX_PAYLOAD_LEN};
use crate::queue::statistics::QueueSnapshot;

/// State protected by the queue guard
#[derive(Debug, Default)]
struct QueueState {
    high: LinkedList<Message>,
    normal: LinkedList<Message>,
    count: usize,
}

impl QueueState {
    fn sequence_mut(&mut self, level: PriorityLevel) -> &mut LinkedList<Message> {
        match level {
            PriorityLevel::High => &mut self.high,
            PriorityLevel::Normal => &mut self.normal,
        }
    }

    /// Splice a prebuilt node onto the tail of its level, leaving `node` empty.
    /// Returns the new total.
    fn link(&mut self, level: PriorityLevel, node: &mut LinkedList<Message>) -> usize {
        let linked = node.len();
        self.sequence_mut(level).append(node);
        self.count += linked;
        self.count
    }

    /// Detach the head node of the high sequence, or failing that the normal
    /// one. The node is returned whole so it is freed after the guard drops.
    fn unlink_next(&mut self) -> Option<LinkedList<Message>> {
        let sequence = if !self.high.is_empty() {
            &mut self.high
        } else if !self.normal.is_empty() {
            &mut self.normal
        } else {
            return None;
        };

        let rest = sequence.split_off(1);
        let node = mem::replace(sequence, rest);
        self.count -= 1;
        Some(node)
    }

    fn snapshot(&self) -> QueueSnapshot {
        QueueSnapshot {
            total: self.count,
            high: self.high.len(),
            normal: self.normal.len(),
        }
    }
}

/// Priority message queue engine
///
/// Any number of threads may send, receive and snapshot concurrently through
/// a shared reference; operations are linearizable with respect to the guard.
/// There is no capacity limit and no starvation protection: a continuous
/// stream of high priority sends keeps normal messages waiting.
#[derive(Debug)]
pub struct PriorityMessageQueue {
    state: Mutex<QueueState>,
    threshold: i32,
    max_payload: usize,
}

impl PriorityMessageQueue {
    /// Create an empty queue with the given classification threshold and payload bound
    pub fn new(threshold: i32, max_payload: usize) -> Self {
        Self {
            state: Mutex::new(QueueState::default()),
            threshold,
            max_payload,
        }
    }

    /// Create an empty queue from validated configuration
    pub fn from_config(config: &QueueConfig) -> Self {
        Self::new(config.high_threshold, config.max_payload)
    }

    pub fn threshold(&self) -> i32 {
        self.threshold
    }

    pub fn max_payload(&self) -> usize {
        self.max_payload
    }

    /// Add a message to the tail of the sequence its type selects.
    ///
    /// Text beyond the payload bound is dropped silently. Returns the level
    /// the message was filed under. On failure nothing is enqueued.
    pub fn enqueue(&self, sender_id: i32, priority_type: i32, text: &str) -> QueueResult<PriorityLevel> {
        let message = Message::new(sender_id, priority_type, text, self.threshold, self.max_payload)
            .inspect_err(|_| warn!("Failed to allocate message from PID {}", sender_id))?;
        let level = message.level();

        let mut node = LinkedList::new();
        node.push_back(message);

        let total = self.state.lock().link(level, &mut node);

        match level {
            PriorityLevel::High => info!("High priority message from PID {}", sender_id),
            PriorityLevel::Normal => info!("Normal priority message from PID {}", sender_id),
        }
        debug!("Queue now holds {} messages", total);
        Ok(level)
    }

    /// Remove and return the oldest high priority message, or failing that
    /// the oldest normal one. Ownership passes to the caller.
    pub fn dequeue(&self) -> QueueResult<Message> {
        let node = self.state.lock().unlink_next();

        match node.and_then(|mut node| node.pop_front()) {
            Some(message) => {
                info!("Received {} priority message: {}", message.level(), message.text());
                Ok(message)
            }
            None => {
                info!("No messages available");
                Err(QueueError::EmptyQueue)
            }
        }
    }

    /// Counts taken in one critical section
    pub fn snapshot(&self) -> QueueSnapshot {
        self.state.lock().snapshot()
    }

    pub fn len(&self) -> usize {
        self.state.lock().count
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Free every remaining message and return how many there were.
    ///
    /// The sequences are swapped out under the guard and dropped after it is
    /// released.
    pub fn drain(&self) -> usize {
        let (high, normal) = {
            let mut state = self.state.lock();
            state.count = 0;
            (mem::take(&mut state.high), mem::take(&mut state.normal))
        };

        let freed = high.len() + normal.len();
        drop(high);
        drop(normal);

        if freed > 0 {
            info!("Cleaned up {} messages", freed);
        }
        freed
    }
}

impl Default for PriorityMessageQueue {
    fn default() -> Self {
        Self::new(DEFAULT_HIGH_THRESHOLD, MAX_PAYLOAD_LEN)
    }
}
