//! Bounded Blocking Queue
//!
//! A fixed-capacity FIFO shared between threads:
//! - `push` never blocks and never fails; a full queue evicts its oldest element
//! - `pop` blocks until an element exists
//! - `pop_timeout` / `pop_until` block for at most a bounded time
//! - `close` ends the queue's lifecycle and releases every blocked reader
//!
//! Every operation runs under one lock guarding the slab and the closed flag
//! together, so each method is atomic with respect to every other.
//!
//! # Example
//!
//! ```
//! use slabq::BoundedBlockingQueue;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let queue = Arc::new(BoundedBlockingQueue::new(2).unwrap());
//! let reader = {
//!     let queue = Arc::clone(&queue);
//!     thread::spawn(move || queue.pop())
//! };
//! queue.push(7);
//! assert_eq!(reader.join().unwrap(), Ok(7));
//! ```

mod close_guard;
mod outcome;
mod slab;

pub use close_guard::CloseOnDrop;
pub use outcome::PushOutcome;
use slab::Slab;

use crate::errors::QueueError;
use parking_lot::{Condvar, Mutex};
use std::fmt;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};
use tracing::{debug, info, trace};

/// State guarded by the queue lock.
struct State<T> {
    slab: Slab<T>,
    closed: bool,
}

/// Fixed-capacity, drop-oldest, blocking FIFO queue.
pub struct BoundedBlockingQueue<T> {
    state: Mutex<State<T>>,
    /// Signalled when an element is committed or the queue is closed.
    available: Condvar,
    capacity: NonZeroUsize,
}

impl<T> BoundedBlockingQueue<T> {
    /// Create a queue holding at most `capacity` elements.
    ///
    /// A capacity of zero is rejected with [`QueueError::InvalidCapacity`].
    pub fn new(capacity: usize) -> Result<Self, QueueError> {
        NonZeroUsize::new(capacity)
            .map(Self::with_capacity)
            .ok_or(QueueError::InvalidCapacity {
                requested: capacity,
            })
    }

    /// Create a queue from a capacity that is already known to be positive.
    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        Self {
            state: Mutex::new(State {
                slab: Slab::new(capacity),
                closed: false,
            }),
            available: Condvar::new(),
            capacity,
        }
    }

    /// Append `item`, evicting and dropping the oldest element if the queue is full.
    pub fn push(&self, item: T) {
        let _ = self.offer(item);
    }

    /// Append `item` and report whether an element had to be evicted.
    ///
    /// The evicted element is handed back instead of being dropped under the lock.
    pub fn offer(&self, item: T) -> PushOutcome<T> {
        let mut state = self.state.lock();
        let outcome = match state.slab.push_back(item) {
            None => PushOutcome::Enqueued,
            Some(evicted) => PushOutcome::Evicted(evicted),
        };
        let len = state.slab.len();
        drop(state);

        if outcome.is_evicted() {
            debug!(
                outcome = outcome.label(),
                capacity = self.capacity.get(),
                "Queue full, evicted oldest element"
            );
        } else {
            trace!(outcome = outcome.label(), len, "Element pushed");
        }

        // The element is committed before any reader is woken.
        self.available.notify_one();
        outcome
    }

    /// Remove the oldest element, blocking until one is available.
    ///
    /// Returns [`QueueError::Closed`] only once the queue has been closed and
    /// every remaining element has been drained.
    pub fn pop(&self) -> Result<T, QueueError> {
        let mut state = self.state.lock();
        loop {
            if let Some(item) = state.slab.pop_front() {
                trace!(len = state.slab.len(), "Element popped");
                return Ok(item);
            }
            if state.closed {
                return Err(QueueError::Closed);
            }
            self.available.wait(&mut state);
        }
    }

    /// Remove the oldest element, waiting at most `timeout` for one to arrive.
    ///
    /// A zero timeout never suspends. A timeout too large to express as a
    /// deadline waits indefinitely, like [`pop`](Self::pop).
    pub fn pop_timeout(&self, timeout: Duration) -> Result<T, QueueError> {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => self.pop_until(deadline),
            None => self.pop(),
        }
    }

    /// Remove the oldest element, waiting until `deadline` for one to arrive.
    ///
    /// Spurious wakeups never extend the wait past `deadline`.
    pub fn pop_until(&self, deadline: Instant) -> Result<T, QueueError> {
        let started = Instant::now();
        let mut state = self.state.lock();
        loop {
            if let Some(item) = state.slab.pop_front() {
                trace!(len = state.slab.len(), "Element popped");
                return Ok(item);
            }
            if state.closed {
                return Err(QueueError::Closed);
            }
            if Instant::now() >= deadline {
                let waited = started.elapsed();
                debug!(waited_ms = waited.as_millis() as u64, "Queue pop timed out");
                return Err(QueueError::Timeout { waited });
            }
            self.available.wait_until(&mut state, deadline);
        }
    }

    /// Remove the oldest element without blocking.
    pub fn try_pop(&self) -> Option<T> {
        self.state.lock().slab.pop_front()
    }

    /// Close the queue and wake every blocked reader.
    ///
    /// Readers drain whatever is left, then receive [`QueueError::Closed`]
    /// instead of blocking. `push` keeps working after close. Idempotent.
    pub fn close(&self) {
        let mut state = self.state.lock();
        if state.closed {
            return;
        }
        state.closed = true;
        let remaining = state.slab.len();
        drop(state);

        let woken = self.available.notify_all();
        info!(remaining, woken, "Queue closed");
    }

    /// Close the queue when the returned guard goes out of scope.
    pub fn close_on_drop(&self) -> CloseOnDrop<'_, T> {
        CloseOnDrop::new(self)
    }

    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    /// Number of live elements at the time of the call.
    ///
    /// Concurrent pushes and pops may change it as soon as this returns.
    pub fn len(&self) -> usize {
        self.state.lock().slab.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().slab.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.state.lock().slab.is_full()
    }

    /// Maximum number of elements, fixed at construction.
    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Run `f` over the live elements, oldest first, while holding the lock.
    ///
    /// `f` must not call back into this queue.
    pub fn with_items<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        let state = self.state.lock();
        f(state.slab.as_slice())
    }
}

impl<T: Clone> BoundedBlockingQueue<T> {
    /// Copy of the live element at `index`, counted from the oldest.
    pub fn get(&self, index: usize) -> Option<T> {
        self.with_items(|items| items.get(index).cloned())
    }

    /// Copy of every live element, oldest first.
    pub fn snapshot(&self) -> Vec<T> {
        self.with_items(|items| items.to_vec())
    }
}

impl<T: Clone> Clone for BoundedBlockingQueue<T> {
    /// Independent queue with the same capacity and a copy of the live elements.
    ///
    /// The source lock is held while copying, so the copy is a consistent
    /// snapshot. The copy gets its own lock and condvar and starts open.
    fn clone(&self) -> Self {
        let state = self.state.lock();
        Self {
            state: Mutex::new(State {
                slab: state.slab.clone(),
                closed: false,
            }),
            available: Condvar::new(),
            capacity: self.capacity,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for BoundedBlockingQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("BoundedBlockingQueue")
            .field("capacity", &self.capacity)
            .field("len", &state.slab.len())
            .field("closed", &state.closed)
            .field("items", &state.slab.as_slice())
            .finish()
    }
}
