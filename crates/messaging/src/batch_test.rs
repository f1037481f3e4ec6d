//! Tests for MessageBatch

use crate::batch::MessageBatch;
use crate::message::{OutboundMessage, TASK_MESSAGE_HEADER_LEN, TaskMessage};

/// Build a message whose encoded length is exactly `encoded_len` bytes
fn msg(task: u16, encoded_len: usize) -> TaskMessage {
    assert!(encoded_len >= TASK_MESSAGE_HEADER_LEN);
    TaskMessage::new(task, vec![0xABu8; encoded_len - TASK_MESSAGE_HEADER_LEN])
}

// =============================================================================
// Construction tests
// =============================================================================

#[test]
fn test_new_batch_is_empty() {
    let batch: MessageBatch<TaskMessage> = MessageBatch::new(1024);

    assert!(batch.is_empty());
    assert!(!batch.is_full());
    assert_eq!(batch.len(), 0);
    assert_eq!(batch.encoded_len(), 0);
    assert_eq!(batch.capacity(), 1024);
}

#[test]
fn test_empty_is_independent_of_capacity() {
    // A degenerate capacity makes an empty batch "full", but never non-empty
    let batch: MessageBatch<TaskMessage> = MessageBatch::new(0);

    assert!(batch.is_empty());
    assert!(batch.is_full()); // 0 >= 0
}

// =============================================================================
// append tests
// =============================================================================

#[test]
fn test_append_tracks_encoded_len() {
    let mut batch = MessageBatch::new(1024);

    batch.append(msg(1, 10));
    assert_eq!(batch.encoded_len(), 10);

    batch.append(msg(2, 25));
    assert_eq!(batch.encoded_len(), 35);

    batch.append(msg(3, 7));
    assert_eq!(batch.encoded_len(), 42);
    assert_eq!(batch.len(), 3);
}

#[test]
fn test_append_preserves_insertion_order() {
    let mut batch = MessageBatch::new(1024);

    batch.append(TaskMessage::new(10, "first"));
    batch.append(TaskMessage::new(20, "second"));
    batch.append(TaskMessage::new(30, "third"));

    let tasks: Vec<u16> = batch.iter().map(|m| m.task()).collect();
    assert_eq!(tasks, vec![10, 20, 30]);
}

#[test]
fn test_append_all_matches_repeated_append() {
    let mut bulk = MessageBatch::new(1024);
    let mut single = MessageBatch::new(1024);

    let msgs = vec![msg(1, 10), msg(2, 20), msg(3, 30)];
    bulk.append_all(msgs.clone());
    for m in msgs {
        single.append(m);
    }

    assert_eq!(bulk.len(), single.len());
    assert_eq!(bulk.encoded_len(), single.encoded_len());
    assert_eq!(bulk.messages(), single.messages());
}

#[test]
fn test_append_all_empty_sequence() {
    let mut batch: MessageBatch<TaskMessage> = MessageBatch::new(64);

    batch.append_all(Vec::new());

    assert!(batch.is_empty());
    assert_eq!(batch.encoded_len(), 0);
}

// =============================================================================
// Fullness tests
// =============================================================================

#[test]
fn test_is_full_flips_at_first_reach_of_capacity() {
    let mut batch = MessageBatch::new(20);

    assert!(!batch.is_full());

    batch.append(msg(1, 10));
    assert!(!batch.is_full()); // 10 < 20

    batch.append(msg(2, 10));
    assert!(batch.is_full()); // 20 >= 20, exact boundary counts
}

#[test]
fn test_single_oversized_message_fills_batch() {
    let mut batch = MessageBatch::new(50);

    batch.append(msg(1, 200));

    // Threshold is crossed, not clamped: the oversized message is carried
    assert!(batch.is_full());
    assert_eq!(batch.len(), 1);
    assert_eq!(batch.encoded_len(), 200);
}

#[test]
fn test_full_batch_keeps_accepting_appends() {
    let mut batch = MessageBatch::new(10);

    batch.append(msg(1, 10));
    assert!(batch.is_full());

    // The batch itself never rejects; flushing is the owner's decision
    batch.append(msg(2, 10));
    assert_eq!(batch.len(), 2);
    assert_eq!(batch.encoded_len(), 20);
}

// =============================================================================
// Read-side tests
// =============================================================================

#[test]
fn test_messages_and_into_messages() {
    let mut batch = MessageBatch::new(1024);
    batch.append(TaskMessage::new(1, "a"));
    batch.append(TaskMessage::new(2, "bb"));

    assert_eq!(batch.messages().len(), 2);
    assert_eq!(batch.messages()[1].payload().as_ref(), b"bb");

    let messages = batch.into_messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].task(), 1);
}

#[test]
fn test_into_iterator() {
    let mut batch = MessageBatch::new(1024);
    batch.append(TaskMessage::new(1, "x"));
    batch.append(TaskMessage::new(2, "y"));

    let by_ref: Vec<u16> = (&batch).into_iter().map(|m| m.task()).collect();
    assert_eq!(by_ref, vec![1, 2]);

    let by_value: Vec<TaskMessage> = batch.into_iter().collect();
    assert_eq!(by_value.len(), 2);
}

#[test]
fn test_encoded_len_sum_at_every_observation_point() {
    let mut batch = MessageBatch::new(usize::MAX);
    let mut expected = 0;

    for i in 0..50u16 {
        let m = msg(i, 6 + i as usize);
        expected += m.encoded_len();
        batch.append(m);
        assert_eq!(batch.encoded_len(), expected);
    }
}
