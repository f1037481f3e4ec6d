//! Rivulet Messaging - Outbound batch accumulation
//!
//! This crate provides the size-triggered batching layer on the outbound path
//! of Rivulet's network messaging subsystem. Producers emit many small
//! messages; the network writer wants fewer, larger writes. The buffer sits
//! between them and decides when a batch is "full", nothing more.
//!
//! # Architecture
//!
//! ```text
//! [Producers]                [MessageBuffer]              [Network writer]
//!    task A ──┐                                        full batch
//!    task B ──┼──→ add() ──→ live MessageBatch ──────────────→ frame + send
//!    task C ──┘               (swap on full)    (ownership moves out)
//! ```
//!
//! # Key Design
//!
//! - **Ownership hand-off**: a full batch is detached with `mem::replace` and
//!   returned by value. The buffer keeps no reference to it, so a batch can
//!   never be handed off twice.
//! - **Threshold crossing, not capping**: a batch is full once its encoded
//!   length reaches or exceeds the capacity. A single oversized message
//!   flushes immediately rather than being rejected or split.
//! - **Single writer**: the buffer performs no internal synchronization.
//!   Mutations against one buffer must be serialized by the caller, e.g.
//!   confined to one connection's write task.
//! - **No I/O**: encoding, framing and socket writes belong to the
//!   collaborators that receive the detached batch.
//!
//! # Example
//!
//! ```
//! use rivulet_messaging::{FlushPolicy, MessageBuffer, TaskMessage};
//!
//! let mut buffer = MessageBuffer::new(32).unwrap();
//!
//! // Small messages accumulate without a hand-off.
//! let none = buffer.add(TaskMessage::new(1, "hello"), FlushPolicy::FlushOnFull);
//! assert!(none.is_none());
//!
//! // Crossing the threshold detaches the full batch.
//! let batch = buffer
//!     .add(TaskMessage::new(2, "a much longer payload"), FlushPolicy::FlushOnFull)
//!     .expect("batch should be full");
//! assert_eq!(batch.len(), 2);
//! assert!(buffer.is_empty());
//! ```

mod batch;
mod buffer;
mod config;
mod error;
mod message;

pub use batch::MessageBatch;
pub use buffer::{BufferMetrics, FlushPolicy, MessageBuffer, MetricsSnapshot};
pub use config::MessagingConfig;
pub use error::{MessagingError, Result};
pub use message::{OutboundMessage, TASK_MESSAGE_HEADER_LEN, TaskMessage};

// Re-export bytes for convenience
pub use bytes::Bytes;

/// Default batch capacity in bytes (256KB)
pub const DEFAULT_BATCH_CAPACITY: usize = 256 * 1024;

// Test modules - only compiled during testing
#[cfg(test)]
mod batch_test;
