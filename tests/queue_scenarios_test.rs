// Integration tests for the priority queue engine
// Covers the reference scenarios, precedence, FIFO order and truncation

use pmq::queue::{PriorityLevel, PriorityMessageQueue, QueueError, MAX_PAYLOAD_LEN};
use proptest::prelude::*;

#[test]
fn test_scenario_a_high_before_normal() {
    let queue = PriorityMessageQueue::default();
    queue.enqueue(1001, 3, "HelloNormal").unwrap();
    queue.enqueue(1002, 10, "HelloHigh").unwrap();

    let first = queue.dequeue().unwrap();
    assert_eq!(first.priority_type(), 10);
    assert_eq!(first.sender_id(), 1002);
    assert_eq!(first.text(), "HelloHigh");

    let second = queue.dequeue().unwrap();
    assert_eq!(second.priority_type(), 3);
    assert_eq!(second.text(), "HelloNormal");

    assert_eq!(queue.dequeue(), Err(QueueError::EmptyQueue));
}

#[test]
fn test_scenario_b_fifo_within_high_level() {
    let queue = PriorityMessageQueue::default();
    for (pid, priority_type) in [(1, 2), (2, 8), (3, 3), (4, 10)] {
        queue.enqueue(pid, priority_type, &format!("type {}", priority_type)).unwrap();
    }

    // 8 was enqueued before 10, both high
    assert_eq!(queue.dequeue().unwrap().priority_type(), 8);
    assert_eq!(queue.dequeue().unwrap().priority_type(), 10);
    assert_eq!(queue.dequeue().unwrap().priority_type(), 2);
    assert_eq!(queue.dequeue().unwrap().priority_type(), 3);
}

#[test]
fn test_scenario_c_truncation() {
    let filler = "a".repeat(250);

    let queue = PriorityMessageQueue::new(5, 63);
    queue.enqueue(1, 1, &filler).unwrap();
    let message = queue.dequeue().unwrap();
    assert_eq!(message.text().len(), 63);
    assert_eq!(message.text(), &filler[..63]);

    let long = "b".repeat(400);
    let queue = PriorityMessageQueue::default();
    queue.enqueue(1, 1, &long).unwrap();
    let message = queue.dequeue().unwrap();
    assert_eq!(message.text().len(), MAX_PAYLOAD_LEN);
    assert_eq!(message.text(), &long[..MAX_PAYLOAD_LEN]);
}

#[test]
fn test_threshold_boundary() {
    let queue = PriorityMessageQueue::default();
    assert_eq!(queue.enqueue(1, 4, "four").unwrap(), PriorityLevel::Normal);
    assert_eq!(queue.enqueue(1, 5, "five").unwrap(), PriorityLevel::High);
    assert_eq!(queue.enqueue(1, -7, "negative").unwrap(), PriorityLevel::Normal);
    assert_eq!(queue.enqueue(1, i32::MAX, "max").unwrap(), PriorityLevel::High);

    let snapshot = queue.snapshot();
    assert_eq!(snapshot.high, 2);
    assert_eq!(snapshot.normal, 2);
    assert_eq!(snapshot.total, 4);
}

#[test]
fn test_empty_receive_is_idempotent() {
    let queue = PriorityMessageQueue::default();
    for _ in 0..5 {
        assert_eq!(queue.dequeue(), Err(QueueError::EmptyQueue));
        let snapshot = queue.snapshot();
        assert!(snapshot.is_empty());
        assert!(snapshot.is_consistent());
    }

    queue.enqueue(9, 9, "after").unwrap();
    assert_eq!(queue.dequeue().unwrap().text(), "after");
    assert_eq!(queue.dequeue(), Err(QueueError::EmptyQueue));
}

#[test]
fn test_drain_then_reuse() {
    let queue = PriorityMessageQueue::default();
    for i in 0..10 {
        queue.enqueue(i, i, "x").unwrap();
    }
    assert_eq!(queue.drain(), 10);
    assert!(queue.is_empty());
    assert_eq!(queue.drain(), 0);

    queue.enqueue(1, 1, "again").unwrap();
    assert_eq!(queue.len(), 1);
}

#[derive(Debug, Clone)]
enum Op {
    Send(i32),
    Receive,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (-20i32..20).prop_map(Op::Send),
        Just(Op::Receive),
    ]
}

proptest! {
    #[test]
    fn prop_count_matches_sequences(ops in prop::collection::vec(op_strategy(), 0..200)) {
        let queue = PriorityMessageQueue::default();
        let mut expected = 0usize;

        for op in ops {
            match op {
                Op::Send(priority_type) => {
                    queue.enqueue(1, priority_type, "p").unwrap();
                    expected += 1;
                }
                Op::Receive => {
                    if queue.dequeue().is_ok() {
                        expected -= 1;
                    }
                }
            }
            let snapshot = queue.snapshot();
            prop_assert!(snapshot.is_consistent());
            prop_assert_eq!(snapshot.total, expected);
        }
    }

    #[test]
    fn prop_dequeue_order_is_high_fifo_then_normal_fifo(types in prop::collection::vec(-20i32..20, 0..100)) {
        let queue = PriorityMessageQueue::default();
        for (seq, priority_type) in types.iter().enumerate() {
            queue.enqueue(seq as i32, *priority_type, "p").unwrap();
        }

        let mut expected: Vec<i32> = (0..types.len() as i32)
            .filter(|&seq| types[seq as usize] >= 5)
            .collect();
        expected.extend((0..types.len() as i32).filter(|&seq| types[seq as usize] < 5));

        let mut actual = Vec::new();
        while let Ok(message) = queue.dequeue() {
            actual.push(message.sender_id());
        }
        prop_assert_eq!(actual, expected);
    }
}
