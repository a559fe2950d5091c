use super::BoundedBlockingQueue;

/// Closes its queue when dropped.
///
/// Ties the end of a queue's lifecycle to a scope: once the guard goes away,
/// every reader blocked in `pop` is released with `QueueError::Closed`.
#[must_use = "the queue is closed as soon as the guard is dropped"]
pub struct CloseOnDrop<'a, T> {
    queue: &'a BoundedBlockingQueue<T>,
}

impl<'a, T> CloseOnDrop<'a, T> {
    pub(super) fn new(queue: &'a BoundedBlockingQueue<T>) -> Self {
        Self { queue }
    }

    pub fn queue(&self) -> &BoundedBlockingQueue<T> {
        self.queue
    }
}

impl<T> Drop for CloseOnDrop<'_, T> {
    fn drop(&mut self) {
        self.queue.close();
    }
}
