//! Outbound message types
//!
//! The batching layer treats messages as opaque units: all it needs is a
//! stable encoded size, known before the message is appended. `TaskMessage`
//! is the concrete unit Rivulet sends between tasks; other message kinds
//! only have to implement [`OutboundMessage`].

use bytes::Bytes;

/// Encoded-size header of a task message: 2-byte task id + 4-byte payload length
pub const TASK_MESSAGE_HEADER_LEN: usize = 6;

/// A unit the outbound buffer can account for
///
/// `encoded_len` must be stable: the value returned at append time is the
/// value the batch's running sum is built from, and the wire framing is
/// expected to produce exactly that many bytes later.
pub trait OutboundMessage {
    /// Byte length this message occupies once serialized for transmission
    fn encoded_len(&self) -> usize;
}

/// An outbound message addressed to a single task
///
/// The payload is held as `Bytes`, so the message is cheap to move around
/// and the payload is immutable once appended to a batch.
///
/// # Example
///
/// ```
/// use rivulet_messaging::{OutboundMessage, TaskMessage, TASK_MESSAGE_HEADER_LEN};
///
/// let msg = TaskMessage::new(7, "hello");
/// assert_eq!(msg.task(), 7);
/// assert_eq!(msg.encoded_len(), TASK_MESSAGE_HEADER_LEN + 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskMessage {
    /// Destination task id
    task: u16,

    /// Opaque payload, already serialized by the producer
    payload: Bytes,
}

impl TaskMessage {
    /// Create a new task message
    #[inline]
    pub fn new(task: u16, payload: impl Into<Bytes>) -> Self {
        Self {
            task,
            payload: payload.into(),
        }
    }

    /// Get the destination task id
    #[inline]
    pub fn task(&self) -> u16 {
        self.task
    }

    /// Get the payload
    #[inline]
    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    /// Consume the message and return its payload
    #[inline]
    pub fn into_payload(self) -> Bytes {
        self.payload
    }
}

impl OutboundMessage for TaskMessage {
    #[inline]
    fn encoded_len(&self) -> usize {
        TASK_MESSAGE_HEADER_LEN + self.payload.len()
    }
}

impl From<(u16, Bytes)> for TaskMessage {
    fn from((task, payload): (u16, Bytes)) -> Self {
        Self { task, payload }
    }
}
