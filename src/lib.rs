//! slabq - fixed-capacity blocking FIFO queue
//!
//! A thread-safe queue with a capacity fixed at construction:
//!
//! - **Push**: never blocks, never fails; a full queue drops its oldest element
//! - **Pop**: blocks until an element is available
//! - **Pop with timeout**: bounded wait that reports a distinguishable timeout
//! - **Close**: releases every blocked reader at the end of the queue's life
//!
//! # Quick Start
//!
//! ```
//! use slabq::BoundedBlockingQueue;
//! use std::time::Duration;
//!
//! let queue = BoundedBlockingQueue::new(3)?;
//! for value in [1, 2, 3, 10] {
//!     queue.push(value);
//! }
//! assert_eq!(queue.snapshot(), vec![2, 3, 10]);
//! assert_eq!(queue.pop()?, 2);
//! # Ok::<(), slabq::QueueError>(())
//! ```

pub mod cli;
pub mod config;
pub mod demo;
pub mod errors;
pub mod observability;
pub mod queue;

pub use errors::QueueError;
pub use queue::{BoundedBlockingQueue, CloseOnDrop, PushOutcome};
