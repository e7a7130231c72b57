// demos/producer_consumer.rs
use conveyor::{BoundedQueue, DequeueError};
use std::{
  sync::atomic::{AtomicUsize, Ordering},
  sync::Arc,
  thread,
  time::Duration,
};

fn main() {
  println!("--- BoundedQueue: multi-producer, multi-consumer with shutdown ---");

  let queue = Arc::new(BoundedQueue::new(4).unwrap());
  let num_producers = 3;
  let num_consumers = 2;
  let items_per_producer = 5;
  let total_items = num_producers * items_per_producer;
  let received_count = Arc::new(AtomicUsize::new(0));

  let mut producer_handles = Vec::new();
  for i in 0..num_producers {
    let queue = Arc::clone(&queue);
    producer_handles.push(thread::spawn(move || {
      for j in 0..items_per_producer {
        let msg = format!("P{}-M{}", i, j);
        println!("[Producer {}] Enqueueing: {}", i, msg);
        queue.enqueue(msg);
        thread::sleep(Duration::from_millis(10 + i as u64 * 5));
      }
      println!("[Producer {}] Done.", i);
    }));
  }

  let mut consumer_handles = Vec::new();
  for i in 0..num_consumers {
    let queue = Arc::clone(&queue);
    let received_count = Arc::clone(&received_count);
    consumer_handles.push(thread::spawn(move || loop {
      match queue.dequeue() {
        Ok(msg) => {
          println!("[Consumer {}] Received: {}", i, msg);
          received_count.fetch_add(1, Ordering::Relaxed);
        }
        Err(DequeueError::Shutdown) => {
          println!("[Consumer {}] Queue drained and shut down.", i);
          break;
        }
      }
    }));
  }

  for handle in producer_handles {
    handle.join().unwrap();
  }
  println!("[Main] All producers done, signaling shutdown.");
  queue.shutdown();

  for handle in consumer_handles {
    handle.join().unwrap();
  }

  assert_eq!(received_count.load(Ordering::Relaxed), total_items);
  println!("[Main] All {} items delivered exactly once.", total_items);
}
