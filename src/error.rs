// src/error.rs

use core::fmt;

/// Error returned by [`BoundedQueue::new`](crate::BoundedQueue::new) when the
/// requested capacity is zero.
///
/// A zero-capacity queue could never hold an item and its modular index
/// arithmetic would be undefined, so construction rejects it outright.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct CapacityError;
impl std::error::Error for CapacityError {}
impl fmt::Display for CapacityError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "queue capacity must be greater than zero")
  }
}

/// Error returned by `try_enqueue` when the operation could not be completed
/// immediately. The item being enqueued is returned.
#[derive(PartialEq, Eq, Clone)]
pub enum TryEnqueueError<T> {
  /// The queue is full and cannot accept more items at this time.
  /// The item being enqueued is returned.
  Full(T),
}

impl<T> TryEnqueueError<T> {
  /// Consumes the error, returning the inner value.
  #[inline]
  pub fn into_inner(self) -> T {
    match self {
      TryEnqueueError::Full(v) => v,
    }
  }
}

impl<T> fmt::Debug for TryEnqueueError<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      TryEnqueueError::Full(_) => write!(f, "TryEnqueueError::Full(..)"),
    }
  }
}

impl<T> fmt::Display for TryEnqueueError<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      TryEnqueueError::Full(_) => f.write_str("queue full"),
    }
  }
}

impl<T: fmt::Debug> std::error::Error for TryEnqueueError<T> {}

/// The terminal result of `dequeue`.
///
/// Not a failure: `Shutdown` is the defined "no more items will ever arrive"
/// signal consumers use to exit their loop. It is only returned once the
/// queue is both shut down and fully drained.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum DequeueError {
  Shutdown,
}
impl std::error::Error for DequeueError {}
impl fmt::Display for DequeueError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      DequeueError::Shutdown => write!(f, "queue shut down and drained"),
    }
  }
}

/// Error returned by `try_dequeue` when an item could not be removed
/// immediately.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TryDequeueError {
  /// The queue is empty but still live; an item may yet arrive.
  Empty,
  /// The queue is shut down and fully drained.
  Shutdown,
}
impl std::error::Error for TryDequeueError {}
impl fmt::Display for TryDequeueError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      TryDequeueError::Empty => write!(f, "queue empty"),
      TryDequeueError::Shutdown => write!(f, "queue shut down and drained"),
    }
  }
}

/// Error returned by `dequeue_timeout`.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum DequeueTimeoutError {
  /// The queue is shut down and fully drained.
  Shutdown,
  /// The timeout elapsed before an item could be removed.
  Timeout,
}
impl std::error::Error for DequeueTimeoutError {}
impl fmt::Display for DequeueTimeoutError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      DequeueTimeoutError::Shutdown => write!(f, "queue shut down and drained"),
      DequeueTimeoutError::Timeout => write!(f, "dequeue operation timed out"),
    }
  }
}
