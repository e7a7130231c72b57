// src/queue/core.rs

//! The lock-protected state of the bounded queue: a fixed-size ring of slots
//! plus the shutdown flag. Pure data operations only — the monitor in
//! `queue::mod` owns the mutex and condition variables and is the sole caller.

/// Ring storage and cursors. Every field is read and written only while the
/// owning `BoundedQueue`'s mutex is held.
#[derive(Debug)]
pub(crate) struct RingState<T> {
  /// Fixed-length slot array, reused cyclically. Slots outside the logical
  /// `[head, head+len)` window hold `None`.
  slots: Box<[Option<T>]>,
  /// Dequeue cursor, in `[0, capacity)`.
  head: usize,
  /// Enqueue cursor, in `[0, capacity)`.
  tail: usize,
  /// Occupied slot count. `len == (tail - head) mod capacity`.
  len: usize,
  /// Monotonic: set once by `shutdown`, never reset.
  shutdown: bool,
}

impl<T> RingState<T> {
  /// `capacity` must be non-zero; `BoundedQueue::new` validates it.
  pub(crate) fn new(capacity: usize) -> Self {
    debug_assert!(capacity > 0, "ring capacity must be non-zero");
    RingState {
      slots: (0..capacity).map(|_| None).collect(),
      head: 0,
      tail: 0,
      len: 0,
      shutdown: false,
    }
  }

  /// Stores `item` at the tail cursor. Caller must have checked `!is_full()`
  /// under the lock.
  pub(crate) fn push(&mut self, item: T) {
    debug_assert!(self.len < self.slots.len(), "push on a full ring");
    self.slots[self.tail] = Some(item);
    self.tail = (self.tail + 1) % self.slots.len();
    self.len += 1;
  }

  /// Removes and returns the item at the head cursor, or `None` if the ring
  /// is empty.
  pub(crate) fn pop(&mut self) -> Option<T> {
    if self.len == 0 {
      return None;
    }
    let item = self.slots[self.head].take();
    debug_assert!(item.is_some(), "occupied slot must hold a value");
    self.head = (self.head + 1) % self.slots.len();
    self.len -= 1;
    item
  }

  #[inline]
  pub(crate) fn len(&self) -> usize {
    self.len
  }

  #[inline]
  pub(crate) fn is_empty(&self) -> bool {
    self.len == 0
  }

  #[inline]
  pub(crate) fn is_full(&self) -> bool {
    self.len == self.slots.len()
  }

  #[inline]
  pub(crate) fn is_shutdown(&self) -> bool {
    self.shutdown
  }

  #[inline]
  pub(crate) fn set_shutdown(&mut self) {
    self.shutdown = true;
  }
}
