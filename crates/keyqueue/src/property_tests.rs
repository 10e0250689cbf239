//! Property-based tests for the key queue
//!
//! Every operation sequence is replayed against a `Vec` model; the queue must
//! agree with it on order, length and return values, and its links must stay
//! consistent after each step.

use proptest::prelude::*;

use crate::KeyQueue;

// == Strategies ==
#[derive(Debug, Clone)]
enum QueueOp {
    Enqueue(u8),
    Dequeue,
    Remove(u8),
    MoveToTail(u8),
}

/// Small key space so operations keep hitting keys that are queued
fn queue_op_strategy() -> impl Strategy<Value = QueueOp> {
    let key = 0u8..16;
    prop_oneof![
        3 => key.clone().prop_map(QueueOp::Enqueue),
        1 => Just(QueueOp::Dequeue),
        2 => key.clone().prop_map(QueueOp::Remove),
        2 => key.prop_map(QueueOp::MoveToTail),
    ]
}

// == Model ==
fn model_remove(model: &mut Vec<u8>, key: u8) -> bool {
    match model.iter().position(|&k| k == key) {
        Some(pos) => {
            model.remove(pos);
            true
        }
        None => false,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    // Queue order and return values match a Vec model for any sequence
    #[test]
    fn prop_matches_vec_model(ops in prop::collection::vec(queue_op_strategy(), 1..200)) {
        let mut queue = KeyQueue::new();
        let mut model: Vec<u8> = Vec::new();

        for op in ops {
            match op {
                QueueOp::Enqueue(key) => {
                    let expected = !model.contains(&key);
                    if expected {
                        model.push(key);
                    }
                    prop_assert_eq!(queue.enqueue_tail(key), expected);
                }
                QueueOp::Dequeue => {
                    let expected = if model.is_empty() { None } else { Some(model.remove(0)) };
                    prop_assert_eq!(queue.dequeue_head(), expected);
                }
                QueueOp::Remove(key) => {
                    let expected = model_remove(&mut model, key);
                    prop_assert_eq!(queue.remove(&key), expected);
                }
                QueueOp::MoveToTail(key) => {
                    let expected = model_remove(&mut model, key);
                    if expected {
                        model.push(key);
                    }
                    prop_assert_eq!(queue.move_to_tail(&key), expected);
                }
            }

            queue.assert_consistent();
            prop_assert_eq!(queue.len(), model.len());
            prop_assert_eq!(queue.peek_head(), model.first());
            prop_assert_eq!(queue.peek_tail(), model.last());
        }

        let order: Vec<u8> = queue.iter().copied().collect();
        prop_assert_eq!(order, model);
    }

    // Reverse iteration is the exact mirror of forward iteration
    #[test]
    fn prop_reverse_iteration_mirrors_forward(ops in prop::collection::vec(queue_op_strategy(), 1..100)) {
        let mut queue = KeyQueue::new();
        for op in ops {
            match op {
                QueueOp::Enqueue(key) => { queue.enqueue_tail(key); }
                QueueOp::Dequeue => { queue.dequeue_head(); }
                QueueOp::Remove(key) => { queue.remove(&key); }
                QueueOp::MoveToTail(key) => { queue.move_to_tail(&key); }
            }
        }

        let forward: Vec<u8> = queue.iter().copied().collect();
        let mut backward: Vec<u8> = queue.iter().rev().copied().collect();
        backward.reverse();
        prop_assert_eq!(forward, backward);
    }

    // The arena never holds more slots than the peak number of queued keys
    #[test]
    fn prop_slots_bounded_by_peak_len(ops in prop::collection::vec(queue_op_strategy(), 1..200)) {
        let mut queue = KeyQueue::new();
        let mut peak = 0;
        for op in ops {
            match op {
                QueueOp::Enqueue(key) => { queue.enqueue_tail(key); }
                QueueOp::Dequeue => { queue.dequeue_head(); }
                QueueOp::Remove(key) => { queue.remove(&key); }
                QueueOp::MoveToTail(key) => { queue.move_to_tail(&key); }
            }
            peak = peak.max(queue.len());
        }

        prop_assert!(queue.slot_count() <= peak);
    }
}
