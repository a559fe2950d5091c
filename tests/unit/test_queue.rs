//! Unit tests for the queue module
//!
//! Tests cover:
//! - Construction and capacity
//! - Copy independence
//! - Push with and without eviction
//! - Pop ordering and compaction

use slabq::{BoundedBlockingQueue, PushOutcome, QueueError};
use std::num::NonZeroUsize;

fn live(queue: &BoundedBlockingQueue<i32>) -> Vec<i32> {
    (0..queue.len()).filter_map(|i| queue.get(i)).collect()
}

// ============================================================================
// Construction Tests
// ============================================================================

mod construction_tests {
    use super::*;

    #[test]
    fn test_construct_with_copy() {
        let queue = BoundedBlockingQueue::new(5).unwrap();
        assert_eq!(queue.len(), 0);
        assert_eq!(queue.capacity(), 5);
        queue.push(2);
        queue.push(3);

        let new_queue = queue.clone();
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.capacity(), 5);
        assert_eq!(live(&new_queue), vec![2, 3]);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert_eq!(
            BoundedBlockingQueue::<i32>::new(0).unwrap_err(),
            QueueError::InvalidCapacity { requested: 0 }
        );
    }

    #[test]
    fn test_with_nonzero_capacity() {
        let queue = BoundedBlockingQueue::<String>::with_capacity(NonZeroUsize::new(7).unwrap());
        assert_eq!(queue.capacity(), 7);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_copy_not_affected_by_later_pushes() {
        let queue = BoundedBlockingQueue::new(5).unwrap();
        queue.push(2);
        queue.push(3);
        let copy = queue.clone();

        for i in 10..20 {
            queue.push(i);
        }

        assert_eq!(live(&copy), vec![2, 3]);
        assert_eq!(copy.len(), 2);
        assert_eq!(copy.capacity(), 5);
        assert_eq!(queue.len(), 5);
    }

    #[test]
    fn test_copy_owns_its_elements() {
        let queue = BoundedBlockingQueue::new(2).unwrap();
        queue.push(String::from("a"));
        let copy = queue.clone();
        assert_eq!(queue.pop().unwrap(), "a");
        assert_eq!(copy.pop().unwrap(), "a");
    }
}

// ============================================================================
// Push Tests
// ============================================================================

mod push_tests {
    use super::*;

    #[test]
    fn test_push_not_full() {
        let queue = BoundedBlockingQueue::new(3).unwrap();
        let expected = vec![1, 2, 3];
        for element in &expected {
            queue.push(*element);
        }

        assert_eq!(queue.len(), queue.capacity());
        assert_eq!(live(&queue), expected);
    }

    #[test]
    fn test_push_full() {
        let queue = BoundedBlockingQueue::new(3).unwrap();
        for element in [1, 2, 3] {
            queue.push(element);
        }

        queue.push(10);
        assert_eq!(live(&queue), vec![2, 3, 10]);

        queue.push(25);
        queue.push(33);
        assert_eq!(live(&queue), vec![10, 25, 33]);
    }

    #[test]
    fn test_offer_sequence_outcomes() {
        let queue = BoundedBlockingQueue::new(2).unwrap();
        let outcomes: Vec<_> = (1..=4).map(|i| queue.offer(i)).collect();
        assert_eq!(
            outcomes,
            vec![
                PushOutcome::Enqueued,
                PushOutcome::Enqueued,
                PushOutcome::Evicted(1),
                PushOutcome::Evicted(2),
            ]
        );
        assert!(queue.is_full());
    }

    #[test]
    fn test_evicted_elements_are_dropped() {
        use std::sync::Arc;

        let tracker = Arc::new(());
        let queue = BoundedBlockingQueue::new(1).unwrap();
        queue.push(Arc::clone(&tracker));
        queue.push(Arc::clone(&tracker));
        assert_eq!(Arc::strong_count(&tracker), 2);
        drop(queue);
        assert_eq!(Arc::strong_count(&tracker), 1);
    }
}

// ============================================================================
// Pop Tests
// ============================================================================

mod pop_tests {
    use super::*;

    #[test]
    fn test_pop_without_timeout() {
        let queue = BoundedBlockingQueue::new(5).unwrap();
        for element in [1, 3, 2, 6] {
            queue.push(element);
        }
        assert_eq!(queue.len(), 4);

        assert_eq!(queue.pop(), Ok(1));
        assert_eq!(queue.len(), 3);
        assert_eq!(live(&queue), vec![3, 2, 6]);

        assert_eq!(queue.pop(), Ok(3));
        assert_eq!(queue.len(), 2);
        assert_eq!(live(&queue), vec![2, 6]);
    }

    #[test]
    fn test_fifo_after_eviction() {
        let queue = BoundedBlockingQueue::new(3).unwrap();
        for i in 1..=5 {
            queue.push(i);
        }
        let drained: Vec<_> = std::iter::from_fn(|| queue.try_pop()).collect();
        assert_eq!(drained, vec![3, 4, 5]);
    }

    #[test]
    fn test_snapshot_and_with_items_agree() {
        let queue = BoundedBlockingQueue::new(4).unwrap();
        for i in [9, 8, 7] {
            queue.push(i);
        }
        let viewed = queue.with_items(|items| items.to_vec());
        assert_eq!(viewed, queue.snapshot());
        assert_eq!(queue.get(3), None);
    }
}
