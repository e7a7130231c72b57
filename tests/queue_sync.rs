mod common;
use common::*;

use conveyor::{BoundedQueue, DequeueError, DequeueTimeoutError, TryDequeueError};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

#[test]
fn zero_capacity_is_a_construction_error() {
  assert!(BoundedQueue::<()>::new(0).is_err());
}

#[test]
fn fifo_order_no_interleaving() {
  let queue = BoundedQueue::new(8).unwrap();
  for i in 0..8 {
    queue.enqueue(i);
  }
  let drained: Vec<_> = (0..8).map(|_| queue.dequeue().unwrap()).collect();
  assert_eq!(drained, (0..8).collect::<Vec<_>>());
}

#[test]
fn enqueue_blocks_when_full_until_dequeue() {
  // capacity=2; A and B fit, C must wait for a free slot.
  let queue = Arc::new(BoundedQueue::new(2).unwrap());
  queue.enqueue("A");
  queue.enqueue("B");

  let third_stored = Arc::new(AtomicBool::new(false));
  let handle = {
    let queue = Arc::clone(&queue);
    let third_stored = Arc::clone(&third_stored);
    thread::spawn(move || {
      queue.enqueue("C"); // This should block
      third_stored.store(true, Ordering::SeqCst);
    })
  };

  thread::sleep(SHORT_TIMEOUT);
  assert!(
    !third_stored.load(Ordering::SeqCst),
    "enqueue completed on a full queue"
  );

  assert_eq!(queue.dequeue(), Ok("A")); // Frees the slot, unblocks C
  handle.join().unwrap();
  assert!(third_stored.load(Ordering::SeqCst));

  assert_eq!(queue.dequeue(), Ok("B"));
  assert_eq!(queue.dequeue(), Ok("C"));
}

#[test]
fn dequeue_blocks_until_enqueue() {
  let queue = Arc::new(BoundedQueue::new(1).unwrap());

  let handle = {
    let queue = Arc::clone(&queue);
    thread::spawn(move || {
      queue.dequeue() // This should block until an item arrives
    })
  };

  thread::sleep(SHORT_TIMEOUT);
  queue.enqueue(42);
  assert_eq!(handle.join().unwrap(), Ok(42));
}

#[test]
fn shutdown_on_empty_queue_returns_terminal_without_blocking() {
  let queue = BoundedQueue::<i32>::new(1).unwrap();
  queue.shutdown();
  assert_eq!(queue.dequeue(), Err(DequeueError::Shutdown));
}

#[test]
fn shutdown_unblocks_every_waiting_consumer() {
  // Broadcast, not single-wake: all parked consumers must observe the
  // terminal state, or the rest would stay deadlocked forever.
  let queue = Arc::new(BoundedQueue::<i32>::new(1).unwrap());
  let mut handles = Vec::new();
  for _ in 0..3 {
    let queue = Arc::clone(&queue);
    handles.push(thread::spawn(move || queue.dequeue()));
  }

  thread::sleep(SHORT_TIMEOUT);
  queue.shutdown();

  for handle in handles {
    assert_eq!(handle.join().unwrap(), Err(DequeueError::Shutdown));
  }
}

#[test]
fn drain_before_terminate() {
  // k items queued at shutdown are still delivered, in order, before the
  // terminal result.
  let queue = BoundedQueue::new(4).unwrap();
  queue.enqueue(1);
  queue.enqueue(2);
  queue.enqueue(3);
  queue.shutdown();

  assert_eq!(queue.dequeue(), Ok(1));
  assert_eq!(queue.dequeue(), Ok(2));
  assert_eq!(queue.dequeue(), Ok(3));
  assert_eq!(queue.dequeue(), Err(DequeueError::Shutdown));
  // Terminal is absorbing.
  assert_eq!(queue.dequeue(), Err(DequeueError::Shutdown));
}

#[test]
fn shutdown_while_consumer_parked_still_drains_first() {
  let queue = Arc::new(BoundedQueue::new(1).unwrap());

  let handle = {
    let queue = Arc::clone(&queue);
    thread::spawn(move || {
      let first = queue.dequeue();
      let second = queue.dequeue();
      (first, second)
    })
  };

  thread::sleep(SHORT_TIMEOUT);
  queue.enqueue('x');
  queue.shutdown();

  let (first, second) = handle.join().unwrap();
  assert_eq!(first, Ok('x'));
  assert_eq!(second, Err(DequeueError::Shutdown));
}

#[test]
fn try_dequeue_honors_drain_before_terminate() {
  let queue = BoundedQueue::new(2).unwrap();
  queue.enqueue(5);
  queue.shutdown();
  assert_eq!(queue.try_dequeue(), Ok(5));
  assert_eq!(queue.try_dequeue(), Err(TryDequeueError::Shutdown));
}

#[test]
fn dequeue_timeout_empty_times_out() {
  let queue = BoundedQueue::<i32>::new(1).unwrap();
  let res = queue.dequeue_timeout(std::time::Duration::from_millis(50));
  assert_eq!(res, Err(DequeueTimeoutError::Timeout));
}

#[test]
fn dequeue_timeout_item_arrives() {
  let queue = Arc::new(BoundedQueue::new(1).unwrap());

  let handle = {
    let queue = Arc::clone(&queue);
    thread::spawn(move || queue.dequeue_timeout(LONG_TIMEOUT))
  };

  thread::sleep(std::time::Duration::from_millis(50));
  queue.enqueue(123);
  assert_eq!(handle.join().unwrap(), Ok(123));
}

#[test]
fn dequeue_timeout_shutdown_drains_then_terminates() {
  let queue = BoundedQueue::new(1).unwrap();
  queue.enqueue(99);
  queue.shutdown();
  assert_eq!(queue.dequeue_timeout(SHORT_TIMEOUT), Ok(99));
  assert_eq!(
    queue.dequeue_timeout(SHORT_TIMEOUT),
    Err(DequeueTimeoutError::Shutdown)
  );
}

#[test]
fn values_are_dropped() {
  struct Droppable(Arc<AtomicUsize>);
  impl Drop for Droppable {
    fn drop(&mut self) {
      self.0.fetch_add(1, Ordering::Relaxed);
    }
  }

  let drop_counter = Arc::new(AtomicUsize::new(0));

  // Items handed to a consumer drop exactly once, when the consumer drops them.
  {
    let queue = BoundedQueue::new(2).unwrap();
    queue.enqueue(Droppable(drop_counter.clone()));
    assert_eq!(drop_counter.load(Ordering::Relaxed), 0);
    let item = queue.dequeue().unwrap();
    assert_eq!(drop_counter.load(Ordering::Relaxed), 0);
    drop(item);
    assert_eq!(drop_counter.load(Ordering::Relaxed), 1);
  }
  // An empty queue drops nothing further.
  assert_eq!(drop_counter.load(Ordering::Relaxed), 1);

  // Items still queued when the queue itself drops are dropped with it.
  drop_counter.store(0, Ordering::Relaxed);
  {
    let queue = BoundedQueue::new(2).unwrap();
    queue.enqueue(Droppable(drop_counter.clone()));
    queue.enqueue(Droppable(drop_counter.clone()));
  }
  assert_eq!(drop_counter.load(Ordering::Relaxed), 2);
}
