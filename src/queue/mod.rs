// src/queue/mod.rs

//! A fixed-capacity, thread-safe blocking FIFO queue.
//!
//! [`BoundedQueue`] is a classic monitor: one mutex over the ring state and
//! two condition variables, "not full" (producers wait here) and "not empty"
//! (consumers wait here). Every operation holds the lock for its full
//! critical section and loops on its predicate after each wake, so spurious
//! wakes and multi-waiter races cannot break the blocking contract.
//!
//! ### Shutdown protocol
//!
//! [`shutdown`](BoundedQueue::shutdown) marks the queue terminal and
//! broadcasts to all blocked consumers. Items already queued are never
//! discarded: `dequeue` keeps returning them in FIFO order, and only once the
//! queue is observed empty *and* shut down does it return the terminal
//! [`DequeueError::Shutdown`]. Producers are deliberately not part of the
//! protocol — `enqueue` ignores the shutdown flag, and a producer blocked on
//! a full queue is not released by `shutdown` (see the method docs).
//!
//! # Examples
//!
//! ```
//! use conveyor::{BoundedQueue, DequeueError};
//! use std::sync::Arc;
//! use std::thread;
//!
//! let queue = Arc::new(BoundedQueue::new(4).unwrap());
//!
//! let producer = {
//!   let queue = Arc::clone(&queue);
//!   thread::spawn(move || {
//!     for i in 0..8 {
//!       queue.enqueue(i);
//!     }
//!     queue.shutdown();
//!   })
//! };
//!
//! let mut received = Vec::new();
//! loop {
//!   match queue.dequeue() {
//!     Ok(item) => received.push(item),
//!     Err(DequeueError::Shutdown) => break,
//!   }
//! }
//! producer.join().unwrap();
//! assert_eq!(received, (0..8).collect::<Vec<_>>());
//! ```

// Re-export relevant errors.
pub use crate::error::{
  CapacityError, DequeueError, DequeueTimeoutError, TryDequeueError, TryEnqueueError,
};

mod core; // Internal ring state

use self::core::RingState;
use crate::telemetry;

use parking_lot::{Condvar, Mutex};
use std::fmt;
use std::time::{Duration, Instant};

// --- Telemetry Constants ---
const LOC_ENQUEUE: &str = "BoundedQueue::enqueue";
const LOC_DEQUEUE: &str = "BoundedQueue::dequeue";
const LOC_SHUTDOWN: &str = "BoundedQueue::shutdown";

const EVT_C_TERMINAL: &str = "C:Terminal";
const EVT_SHUTDOWN_BROADCAST: &str = "Shutdown:Broadcast";
const EVT_SHUTDOWN_REPEAT: &str = "Shutdown:AlreadyDown";

const CTR_P_PARKS: &str = "ProducerParks";
const CTR_C_PARKS: &str = "ConsumerParks";
const CTR_ITEMS_IN: &str = "ItemsEnqueued";
const CTR_ITEMS_OUT: &str = "ItemsDequeued";

/// A fixed-capacity, thread-safe blocking FIFO queue.
///
/// Share it between threads with an `Arc`. All methods take `&self`; the
/// internal mutex serializes every state access, which also totally orders
/// mutations — items are dequeued in exactly the order they were enqueued,
/// even under concurrent multi-producer/multi-consumer use. No fairness
/// guarantee is made about which of several blocked threads wakes first.
///
/// Dropping the queue drops any items still stored in it. The owner's
/// exclusive access at drop time guarantees no operation is in flight.
pub struct BoundedQueue<T> {
  capacity: usize,
  state: Mutex<RingState<T>>,
  not_full: Condvar,
  not_empty: Condvar,
}

impl<T> fmt::Debug for BoundedQueue<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let state = self.state.lock();
    f.debug_struct("BoundedQueue")
      .field("capacity", &self.capacity)
      .field("len", &state.len())
      .field("shutdown", &state.is_shutdown())
      .finish_non_exhaustive()
  }
}

impl<T> BoundedQueue<T> {
  /// Creates a queue holding at most `capacity` items.
  ///
  /// # Errors
  ///
  /// Returns [`CapacityError`] if `capacity` is zero. A zero-capacity queue
  /// would be simultaneously always-full and always-empty, and its modular
  /// index arithmetic would be undefined.
  pub fn new(capacity: usize) -> Result<Self, CapacityError> {
    if capacity == 0 {
      return Err(CapacityError);
    }
    Ok(BoundedQueue {
      capacity,
      state: Mutex::new(RingState::new(capacity)),
      not_full: Condvar::new(),
      not_empty: Condvar::new(),
    })
  }

  /// Adds an item at the back of the queue, blocking the current thread
  /// while the queue is full.
  ///
  /// Wakes exactly one thread waiting in [`dequeue`](Self::dequeue) once the
  /// item is stored.
  ///
  /// `enqueue` does not check the shutdown flag: shutdown releases blocked
  /// consumers, it does not stop producers. Callers that want producers to
  /// stop must arrange that themselves. In particular, a producer blocked
  /// here on a full queue is **not** released by
  /// [`shutdown`](Self::shutdown) and stays parked until a consumer frees a
  /// slot.
  pub fn enqueue(&self, item: T) {
    let mut state = self.state.lock();
    while state.is_full() {
      telemetry::increment_counter(LOC_ENQUEUE, CTR_P_PARKS);
      self.not_full.wait(&mut state);
    }
    state.push(item);
    telemetry::increment_counter(LOC_ENQUEUE, CTR_ITEMS_IN);
    self.not_empty.notify_one();
  }

  /// Attempts to add an item without blocking.
  ///
  /// # Errors
  ///
  /// - `Err(TryEnqueueError::Full(item))` if no slot is free; the rejected
  ///   item is returned.
  pub fn try_enqueue(&self, item: T) -> Result<(), TryEnqueueError<T>> {
    let mut state = self.state.lock();
    if state.is_full() {
      return Err(TryEnqueueError::Full(item));
    }
    state.push(item);
    telemetry::increment_counter(LOC_ENQUEUE, CTR_ITEMS_IN);
    self.not_empty.notify_one();
    Ok(())
  }

  /// Removes and returns the item at the front of the queue, blocking the
  /// current thread while the queue is empty and live.
  ///
  /// Wakes exactly one thread waiting in [`enqueue`](Self::enqueue) once a
  /// slot is freed.
  ///
  /// # Errors
  ///
  /// - `Err(DequeueError::Shutdown)` once the queue is shut down **and**
  ///   fully drained. Items queued before shutdown are always delivered
  ///   first, in FIFO order.
  pub fn dequeue(&self) -> Result<T, DequeueError> {
    let mut state = self.state.lock();
    loop {
      if let Some(item) = state.pop() {
        telemetry::increment_counter(LOC_DEQUEUE, CTR_ITEMS_OUT);
        self.not_full.notify_one();
        return Ok(item);
      }
      if state.is_shutdown() {
        telemetry::log_event(None, LOC_DEQUEUE, EVT_C_TERMINAL, None);
        return Err(DequeueError::Shutdown);
      }
      telemetry::increment_counter(LOC_DEQUEUE, CTR_C_PARKS);
      self.not_empty.wait(&mut state);
    }
  }

  /// Attempts to remove the front item without blocking.
  ///
  /// # Errors
  ///
  /// - `Err(TryDequeueError::Empty)` if the queue is empty but live.
  /// - `Err(TryDequeueError::Shutdown)` if the queue is empty and shut down.
  pub fn try_dequeue(&self) -> Result<T, TryDequeueError> {
    let mut state = self.state.lock();
    match state.pop() {
      Some(item) => {
        telemetry::increment_counter(LOC_DEQUEUE, CTR_ITEMS_OUT);
        self.not_full.notify_one();
        Ok(item)
      }
      None if state.is_shutdown() => Err(TryDequeueError::Shutdown),
      None => Err(TryDequeueError::Empty),
    }
  }

  /// Removes and returns the front item, blocking for at most `timeout`.
  ///
  /// # Errors
  ///
  /// - `Err(DequeueTimeoutError::Shutdown)` once the queue is shut down and
  ///   fully drained.
  /// - `Err(DequeueTimeoutError::Timeout)` if the timeout elapses first. The
  ///   predicate is re-checked one final time after the deadline, so an item
  ///   that arrived during the last wake is still delivered.
  pub fn dequeue_timeout(&self, timeout: Duration) -> Result<T, DequeueTimeoutError> {
    let deadline = Instant::now() + timeout;
    let mut state = self.state.lock();
    loop {
      if let Some(item) = state.pop() {
        telemetry::increment_counter(LOC_DEQUEUE, CTR_ITEMS_OUT);
        self.not_full.notify_one();
        return Ok(item);
      }
      if state.is_shutdown() {
        telemetry::log_event(None, LOC_DEQUEUE, EVT_C_TERMINAL, None);
        return Err(DequeueTimeoutError::Shutdown);
      }
      telemetry::increment_counter(LOC_DEQUEUE, CTR_C_PARKS);
      if self.not_empty.wait_until(&mut state, deadline).timed_out() {
        return match state.pop() {
          Some(item) => {
            telemetry::increment_counter(LOC_DEQUEUE, CTR_ITEMS_OUT);
            self.not_full.notify_one();
            Ok(item)
          }
          None if state.is_shutdown() => Err(DequeueTimeoutError::Shutdown),
          None => Err(DequeueTimeoutError::Timeout),
        };
      }
    }
  }

  /// Marks the queue terminal and wakes **all** threads blocked in
  /// [`dequeue`](Self::dequeue).
  ///
  /// Every blocked consumer re-evaluates the drain-before-terminate
  /// condition: remaining items are still delivered in FIFO order, and only
  /// consumers that find the queue empty receive the terminal result. A
  /// single-wake here would strand the other waiters, hence the broadcast.
  ///
  /// Idempotent — repeated calls have no additional effect. Producers
  /// blocked on a full queue are not woken (see [`enqueue`](Self::enqueue)).
  pub fn shutdown(&self) {
    let mut state = self.state.lock();
    if state.is_shutdown() {
      telemetry::log_event(None, LOC_SHUTDOWN, EVT_SHUTDOWN_REPEAT, None);
      return;
    }
    state.set_shutdown();
    telemetry::log_event(None, LOC_SHUTDOWN, EVT_SHUTDOWN_BROADCAST, None);
    self.not_empty.notify_all();
  }

  /// Returns the number of items currently stored.
  ///
  /// Snapshot only: the value is consistent at the instant of the call but
  /// immediately stale under concurrent use. Not a substitute for the
  /// blocking contract of `enqueue`/`dequeue`.
  pub fn len(&self) -> usize {
    self.state.lock().len()
  }

  /// Returns `true` if the queue currently holds no items. Snapshot only.
  pub fn is_empty(&self) -> bool {
    self.state.lock().is_empty()
  }

  /// Returns `true` if every slot is currently occupied. Snapshot only.
  pub fn is_full(&self) -> bool {
    self.state.lock().is_full()
  }

  /// Returns `true` if [`shutdown`](Self::shutdown) has been called.
  pub fn is_shutdown(&self) -> bool {
    self.state.lock().is_shutdown()
  }

  /// Returns the fixed capacity chosen at construction.
  pub fn capacity(&self) -> usize {
    self.capacity
  }
}
