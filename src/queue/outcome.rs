/// Result of offering an element to a full-or-not queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PushOutcome<T> {
    /// The element was appended without side effects.
    Enqueued,
    /// The queue was full; the oldest element was evicted to make room.
    Evicted(T),
}

impl<T> PushOutcome<T> {
    pub fn is_evicted(&self) -> bool {
        matches!(self, Self::Evicted(_))
    }

    /// The evicted element, if any.
    pub fn into_evicted(self) -> Option<T> {
        match self {
            Self::Enqueued => None,
            Self::Evicted(item) => Some(item),
        }
    }

    /// Short label used in log fields.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Enqueued => "enqueue",
            Self::Evicted(_) => "drop_oldest",
        }
    }
}
