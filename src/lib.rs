//! A fixed-capacity, thread-safe blocking FIFO queue for Rust.
//!
//! Conveyor provides a single queue type, [`BoundedQueue`], implementing the
//! classic bounded-buffer pattern: producers block while the queue is full,
//! consumers block while it is empty, and a cooperative [`shutdown`] protocol
//! releases blocked consumers once the queue has drained — without losing
//! items and without deadlock.
//!
//! [`shutdown`]: BoundedQueue::shutdown

pub mod error;
pub mod queue;

pub mod telemetry;

// Public re-exports for convenience.
pub use error::{CapacityError, DequeueError, DequeueTimeoutError, TryDequeueError, TryEnqueueError};
pub use queue::BoundedQueue;
