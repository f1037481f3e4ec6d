//! MessageBuffer - accumulate-then-swap batching for the outbound path
//!
//! The buffer owns exactly one live [`MessageBatch`] at a time. Messages are
//! appended to it until the encoded-byte threshold is crossed; the full
//! batch is then detached and returned to the caller while a fresh empty
//! batch takes its place, so producers never wait for the network writer to
//! drain the previous one.
//!
//! # Hand-off
//!
//! ```text
//! add(msg)          add(msg)            add(msg) -> Some(batch)
//!   │                  │                   │
//!   ▼                  ▼                   ▼
//! [ live batch ]  [ live batch ]   [ fresh empty batch ]
//!                                          └─ old batch moves out, once
//! ```
//!
//! The swap is a `mem::replace`: the detached batch moves out by value and
//! the buffer keeps no reference to it, so a double hand-off cannot be
//! expressed.
//!
//! # Concurrency
//!
//! The buffer assumes a single-writer discipline. Calls to `add`, `add_all`,
//! `drain` and `clear` against one instance must be serialized by the
//! caller, e.g. confined to one connection's write task or guarded by an
//! external lock. None of its operations block, suspend or synchronize
//! internally.

use std::mem;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::batch::MessageBatch;
use crate::error::{MessagingError, Result};
use crate::message::OutboundMessage;

/// What to do once an append has made the live batch full
///
/// Replaces the trailing boolean the operation would otherwise take: the
/// call site spells out whether a full batch is handed off or kept growing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushPolicy {
    /// Detach and return the live batch as soon as it is full
    FlushOnFull,

    /// Only buffer; the caller flushes explicitly via `drain`
    BufferOnly,
}

/// Counters for buffer activity
///
/// Shared via `Arc` so a metrics reporter can observe the buffer without
/// touching the single-writer mutation path.
#[derive(Debug, Default)]
pub struct BufferMetrics {
    /// Total messages appended
    pub messages_buffered: AtomicU64,

    /// Batches handed off because they reached the size threshold
    pub batches_flushed: AtomicU64,

    /// Batches handed off by an explicit drain
    pub batches_drained: AtomicU64,

    /// Total messages handed off (flush and drain)
    pub messages_flushed: AtomicU64,

    /// Total encoded bytes handed off (flush and drain)
    pub bytes_flushed: AtomicU64,

    /// Messages discarded by `clear` without a hand-off
    pub messages_discarded: AtomicU64,
}

impl BufferMetrics {
    /// Create new metrics instance
    pub const fn new() -> Self {
        Self {
            messages_buffered: AtomicU64::new(0),
            batches_flushed: AtomicU64::new(0),
            batches_drained: AtomicU64::new(0),
            messages_flushed: AtomicU64::new(0),
            bytes_flushed: AtomicU64::new(0),
            messages_discarded: AtomicU64::new(0),
        }
    }

    /// Record appended messages
    #[inline]
    pub fn record_buffered(&self, count: u64) {
        self.messages_buffered.fetch_add(count, Ordering::Relaxed);
    }

    /// Record a size-triggered hand-off
    #[inline]
    pub fn record_flushed(&self, message_count: u64, byte_count: u64) {
        self.batches_flushed.fetch_add(1, Ordering::Relaxed);
        self.messages_flushed
            .fetch_add(message_count, Ordering::Relaxed);
        self.bytes_flushed.fetch_add(byte_count, Ordering::Relaxed);
    }

    /// Record a drain hand-off
    #[inline]
    pub fn record_drained(&self, message_count: u64, byte_count: u64) {
        self.batches_drained.fetch_add(1, Ordering::Relaxed);
        self.messages_flushed
            .fetch_add(message_count, Ordering::Relaxed);
        self.bytes_flushed.fetch_add(byte_count, Ordering::Relaxed);
    }

    /// Record messages discarded without a hand-off
    #[inline]
    pub fn record_discarded(&self, count: u64) {
        self.messages_discarded.fetch_add(count, Ordering::Relaxed);
    }

    /// Get snapshot of metrics
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            messages_buffered: self.messages_buffered.load(Ordering::Relaxed),
            batches_flushed: self.batches_flushed.load(Ordering::Relaxed),
            batches_drained: self.batches_drained.load(Ordering::Relaxed),
            messages_flushed: self.messages_flushed.load(Ordering::Relaxed),
            bytes_flushed: self.bytes_flushed.load(Ordering::Relaxed),
            messages_discarded: self.messages_discarded.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time snapshot of buffer metrics
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsSnapshot {
    pub messages_buffered: u64,
    pub batches_flushed: u64,
    pub batches_drained: u64,
    pub messages_flushed: u64,
    pub bytes_flushed: u64,
    pub messages_discarded: u64,
}

/// Size-triggered batching buffer owning one live batch
///
/// Created per outbound connection and destroyed with it. Every successful
/// flush, drain, clear or replace installs a successor batch; the buffer is
/// never without a live batch while it exists.
#[derive(Debug)]
pub struct MessageBuffer<M> {
    /// Capacity propagated to every batch this buffer creates
    batch_capacity: usize,

    /// The single live batch
    current: MessageBatch<M>,

    /// Activity counters (Arc for sharing with a metrics reporter)
    metrics: Arc<BufferMetrics>,
}

impl<M: OutboundMessage> MessageBuffer<M> {
    /// Create a buffer owning one empty batch of the given capacity
    ///
    /// # Errors
    ///
    /// Returns [`MessagingError::InvalidBatchCapacity`] if `batch_capacity`
    /// is zero. A zero threshold would mark every batch full on the first
    /// append and silently defeat batching, so it fails fast here instead.
    pub fn new(batch_capacity: usize) -> Result<Self> {
        if batch_capacity == 0 {
            return Err(MessagingError::invalid_batch_capacity(batch_capacity));
        }

        Ok(Self {
            batch_capacity,
            current: MessageBatch::new(batch_capacity),
            metrics: Arc::new(BufferMetrics::new()),
        })
    }

    /// Append one message to the live batch
    ///
    /// With [`FlushPolicy::FlushOnFull`], a batch that is full after the
    /// append is detached and returned, and a fresh empty batch is
    /// installed. The returned batch is a one-time, exclusive hand-off: the
    /// buffer holds no further reference to it.
    ///
    /// With [`FlushPolicy::BufferOnly`] the message is buffered regardless
    /// of fullness and `None` is returned.
    pub fn add(&mut self, msg: M, policy: FlushPolicy) -> Option<MessageBatch<M>> {
        self.current.append(msg);
        self.metrics.record_buffered(1);
        self.flush_if_full(policy)
    }

    /// Append an ordered sequence of messages, then apply the flush policy
    ///
    /// Fullness is evaluated once, after all messages are appended, not
    /// after each one. A burst can therefore overshoot the threshold before
    /// the swap happens; the whole burst stays in the one returned batch.
    pub fn add_all<I>(&mut self, msgs: I, policy: FlushPolicy) -> Option<MessageBatch<M>>
    where
        I: IntoIterator<Item = M>,
    {
        let before = self.current.len();
        self.current.append_all(msgs);
        self.metrics
            .record_buffered((self.current.len() - before) as u64);
        self.flush_if_full(policy)
    }

    /// Unconditionally flush the live batch if it holds anything
    ///
    /// Used at shutdown and idle-flush points where waiting for the size
    /// threshold would delay delivery indefinitely. On an empty buffer this
    /// is a no-op returning `None`, leaving the live batch untouched.
    pub fn drain(&mut self) -> Option<MessageBatch<M>> {
        if self.current.is_empty() {
            return None;
        }

        let batch = self.detach();
        self.metrics
            .record_drained(batch.len() as u64, batch.encoded_len() as u64);
        tracing::debug!(
            messages = batch.len(),
            encoded_bytes = batch.encoded_len(),
            "draining partial batch"
        );
        Some(batch)
    }

    /// Discard the live batch's contents without a hand-off
    ///
    /// Used for abandonment, e.g. a connection reset where pending data
    /// must not be transmitted.
    pub fn clear(&mut self) {
        if !self.current.is_empty() {
            self.metrics.record_discarded(self.current.len() as u64);
            tracing::debug!(
                discarded = self.current.len(),
                encoded_bytes = self.current.encoded_len(),
                "clearing buffered messages"
            );
        }
        self.current = MessageBatch::new(self.batch_capacity);
    }

    /// Force-install a caller-supplied batch as the live one
    ///
    /// Returns the displaced batch so its messages are not silently lost;
    /// dropping it is then an explicit decision at the call site. Intended
    /// for reset and recovery paths only.
    pub fn replace_current(&mut self, batch: MessageBatch<M>) -> MessageBatch<M> {
        let displaced = mem::replace(&mut self.current, batch);
        if !displaced.is_empty() {
            tracing::debug!(
                displaced = displaced.len(),
                encoded_bytes = displaced.encoded_len(),
                "replacing non-empty live batch"
            );
        }
        displaced
    }

    /// Check if the live batch is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    /// Get the encoded length of the live batch in bytes
    ///
    /// Reflects only unflushed content; batches already handed off are the
    /// receiver's to account for.
    #[inline]
    pub fn buffered_len(&self) -> usize {
        self.current.encoded_len()
    }

    /// Get the capacity propagated to every batch this buffer creates
    #[inline]
    pub fn batch_capacity(&self) -> usize {
        self.batch_capacity
    }

    /// Get the shared metrics handle
    #[inline]
    pub fn metrics(&self) -> Arc<BufferMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Detach the live batch and install a fresh empty replacement
    fn detach(&mut self) -> MessageBatch<M> {
        mem::replace(&mut self.current, MessageBatch::new(self.batch_capacity))
    }

    /// Hand off the live batch if the policy allows it and it is full
    fn flush_if_full(&mut self, policy: FlushPolicy) -> Option<MessageBatch<M>> {
        if policy == FlushPolicy::BufferOnly || !self.current.is_full() {
            return None;
        }

        let batch = self.detach();
        self.metrics
            .record_flushed(batch.len() as u64, batch.encoded_len() as u64);
        tracing::trace!(
            messages = batch.len(),
            encoded_bytes = batch.encoded_len(),
            capacity = self.batch_capacity,
            "batch full, detaching for transmission"
        );
        Some(batch)
    }
}

impl<M: OutboundMessage> Default for MessageBuffer<M> {
    /// A buffer with [`DEFAULT_BATCH_CAPACITY`](crate::DEFAULT_BATCH_CAPACITY)
    fn default() -> Self {
        Self {
            batch_capacity: crate::DEFAULT_BATCH_CAPACITY,
            current: MessageBatch::new(crate::DEFAULT_BATCH_CAPACITY),
            metrics: Arc::new(BufferMetrics::new()),
        }
    }
}
