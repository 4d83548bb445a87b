//! Status Report Rendering
//!
//! Formats a queue snapshot as the fixed-layout text returned by a channel
//! read. Rendering happens after the snapshot is taken, outside the guard.

use std::fmt::Write;
use crate::queue::QueueSnapshot;

/// Render the status report, capped at `capacity` bytes
pub fn render_status(snapshot: &QueueSnapshot, threshold: i32, channel_name: &str, capacity: usize) -> String {
    let mut report = String::with_capacity(capacity);

    // Writing into a String cannot fail
    let _ = write!(
        report,
        "=== IPC Priority Message Queue ===\n\n\
         Current Status:\n\
         \x20 Total messages: {total}\n\
         \x20 High priority (type >= {threshold}): {high} messages\n\
         \x20 Normal priority (type < {threshold}): {normal} messages\n\n\
         Available Commands (write to {channel_name}):\n\
         \x20 S <pid> <type> <message> - Send message\n\
         \x20 R                        - Receive message\n\n\
         Priority Rules:\n\
         \x20 - Messages with type >= {threshold} are HIGH priority\n\
         \x20 - Messages with type < {threshold} are NORMAL priority\n\
         \x20 - HIGH priority messages are received first\n\
         \x20 - Within same priority: FIFO order\n",
        total = snapshot.total,
        high = snapshot.high,
        normal = snapshot.normal,
    );

    if report.len() > capacity {
        let mut end = capacity;
        while !report.is_char_boundary(end) {
            end -= 1;
        }
        report.truncate(end);
    }
    report
}
