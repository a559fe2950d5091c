//! Demo scenarios
//!
//! Thin drivers over the public queue API, used by the `slabq` binary:
//! - `handoff`: one reader and one writer trading integers through a small
//!   queue, showing eviction of the oldest element and a reader blocked until
//!   the last push arrives
//! - `timeout`: a bounded pop on an empty queue

use crate::config::DemoConfig;
use crate::errors::{QueueError, Result, SlabqError};
use crate::observability::telemetry::track_scenario;
use crate::queue::BoundedBlockingQueue;
use anyhow::anyhow;
use serde::Serialize;
use std::thread;
use std::time::Instant;
use tracing::debug;

/// Number of pops the handoff reader attempts.
pub const HANDOFF_READS: usize = 4;

/// What the handoff reader observed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HandoffReport {
    pub capacity: usize,
    /// Values popped by the reader, in order.
    pub popped: Vec<i32>,
    /// Elements still queued after both threads joined.
    pub remaining: usize,
    pub elapsed_ms: u64,
}

/// Outcome of a bounded pop on an empty queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeoutReport {
    pub timeout_ms: u64,
    pub timed_out: bool,
    pub message: String,
    pub elapsed_ms: u64,
}

/// Run the reader/writer handoff.
///
/// The writer pushes `1`, waits `short_delay`, pushes `2, 3, 4`, waits
/// `long_delay`, pushes `5`, then closes the queue. The reader pops up to
/// [`HANDOFF_READS`] times, pausing `reader_pause` after the first pop, and
/// stops early if the queue is closed and empty.
pub fn run_handoff(config: &DemoConfig) -> Result<HandoffReport> {
    config.validate()?;
    let queue = BoundedBlockingQueue::new(config.capacity)?;

    track_scenario("handoff", config.capacity, || {
        let started = Instant::now();
        let popped = thread::scope(|s| {
            let reader = s.spawn(|| read_handoff(&queue, config));
            let writer = s.spawn(|| write_handoff(&queue, config));

            writer
                .join()
                .map_err(|_| SlabqError::Other(anyhow!("writer thread panicked")))?;
            reader
                .join()
                .map_err(|_| SlabqError::Other(anyhow!("reader thread panicked")))?
                .map_err(SlabqError::from)
        })?;

        Ok(HandoffReport {
            capacity: queue.capacity(),
            popped,
            remaining: queue.len(),
            elapsed_ms: started.elapsed().as_millis() as u64,
        })
    })
}

fn read_handoff(
    queue: &BoundedBlockingQueue<i32>,
    config: &DemoConfig,
) -> std::result::Result<Vec<i32>, QueueError> {
    let mut popped = Vec::with_capacity(HANDOFF_READS);
    for read in 0..HANDOFF_READS {
        match queue.pop() {
            Ok(value) => {
                debug!(read, value, "Reader popped");
                popped.push(value);
            }
            Err(QueueError::Closed) => break,
            Err(e) => return Err(e),
        }
        if read == 0 {
            thread::sleep(config.reader_pause());
        }
    }
    Ok(popped)
}

fn write_handoff(queue: &BoundedBlockingQueue<i32>, config: &DemoConfig) {
    // Release the reader if eviction left it fewer than HANDOFF_READS values.
    let _closer = queue.close_on_drop();

    queue.push(1);
    thread::sleep(config.short_delay());
    for value in [2, 3, 4] {
        queue.push(value);
    }
    thread::sleep(config.long_delay());
    queue.push(5);
}

/// Pop with `pop_timeout` from a fresh, empty queue.
pub fn run_timeout(config: &DemoConfig) -> Result<TimeoutReport> {
    config.validate()?;
    let queue = BoundedBlockingQueue::<i32>::new(config.capacity)?;

    track_scenario("timeout", config.capacity, || {
        let started = Instant::now();
        let result = queue.pop_timeout(config.pop_timeout());
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match result {
            Err(e) if e.is_timeout() => Ok(TimeoutReport {
                timeout_ms: config.pop_timeout_ms,
                timed_out: true,
                message: e.to_string(),
                elapsed_ms,
            }),
            Err(e) => Err(e.into()),
            Ok(value) => Err(SlabqError::Other(anyhow!(
                "empty queue unexpectedly produced {value}"
            ))),
        }
    })
}
