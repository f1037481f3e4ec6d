//! MessageBatch - ordered accumulator for outbound messages
//!
//! A batch is an append-only sequence of messages plus a running sum of
//! their encoded sizes. Wire order matters, so insertion order is preserved
//! all the way to the network writer.
//!
//! # Fullness
//!
//! The capacity is a threshold that gets crossed, not a hard cap: the batch
//! that trips `is_full` already contains the message that pushed it over.
//! Downstream size assumptions rely on this, so an oversized message is
//! carried rather than rejected or split.

use crate::message::OutboundMessage;

/// A bounded, ordered group of outbound messages treated as one
/// transmission unit
///
/// Created empty by its owning buffer, mutated only by appends, and handed
/// off by value once full. After the hand-off the receiver owns the batch
/// outright: it frames, transmits and drops it, and nothing else holds a
/// reference to it.
#[derive(Debug)]
pub struct MessageBatch<M> {
    /// Fullness threshold in encoded bytes, fixed at construction
    capacity: usize,

    /// Running sum of the encoded sizes of contained messages
    encoded_len: usize,

    /// Contained messages in insertion order
    messages: Vec<M>,
}

impl<M: OutboundMessage> MessageBatch<M> {
    /// Create an empty batch with the given capacity
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            encoded_len: 0,
            messages: Vec::new(),
        }
    }

    /// Append one message, growing the encoded length by its encoded size
    pub fn append(&mut self, msg: M) {
        self.encoded_len += msg.encoded_len();
        self.messages.push(msg);
    }

    /// Append an ordered sequence of messages, preserving relative order
    ///
    /// Equivalent to repeated [`append`](Self::append) calls.
    pub fn append_all<I>(&mut self, msgs: I)
    where
        I: IntoIterator<Item = M>,
    {
        for msg in msgs {
            self.append(msg);
        }
    }

    /// Check if the encoded length has reached or exceeded the capacity
    #[inline]
    pub fn is_full(&self) -> bool {
        self.encoded_len >= self.capacity
    }

    /// Check if the batch contains no messages
    ///
    /// Independent of capacity: a zero-length batch is empty even though a
    /// degenerate capacity would also report it as full.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Get the current encoded length in bytes
    #[inline]
    pub fn encoded_len(&self) -> usize {
        self.encoded_len
    }

    /// Get the number of contained messages
    #[inline]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Get the capacity threshold in bytes
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Get the contained messages in insertion order
    #[inline]
    pub fn messages(&self) -> &[M] {
        &self.messages
    }

    /// Iterate over the contained messages
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, M> {
        self.messages.iter()
    }

    /// Consume the batch and return its messages for transmission
    #[inline]
    pub fn into_messages(self) -> Vec<M> {
        self.messages
    }
}

impl<M: OutboundMessage> IntoIterator for MessageBatch<M> {
    type Item = M;
    type IntoIter = std::vec::IntoIter<M>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.into_iter()
    }
}

impl<'a, M: OutboundMessage> IntoIterator for &'a MessageBatch<M> {
    type Item = &'a M;
    type IntoIter = std::slice::Iter<'a, M>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}
