// demos/telemetry_report.rs
//
// Run with: cargo run --example telemetry_report --features conveyor_telemetry
use conveyor::{telemetry, BoundedQueue, DequeueError};
use std::sync::Arc;
use std::thread;

fn main() {
  telemetry::clear_telemetry();

  let queue = Arc::new(BoundedQueue::new(2).unwrap());

  let producer = {
    let queue = Arc::clone(&queue);
    thread::spawn(move || {
      for i in 0..10 {
        queue.enqueue(i);
      }
      queue.shutdown();
    })
  };

  let mut sum = 0;
  loop {
    match queue.dequeue() {
      Ok(item) => sum += item,
      Err(DequeueError::Shutdown) => break,
    }
  }
  producer.join().unwrap();

  println!("Consumed sum: {}", sum);
  telemetry::print_telemetry_report();
}
