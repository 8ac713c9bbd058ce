use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

use super::message::Message;

/// An unbounded FIFO of messages.
///
/// Every append and removal happens under the queue's own lock, so operations on
/// one queue are linearizable and never contend with other queues.
pub struct MessageQueue {
    name: String,
    messages: Mutex<VecDeque<Message>>,
    stats: QueueStats,
}

#[derive(Debug, Default)]
pub struct QueueStats {
    enqueued_total: AtomicU64,
    dequeued_total: AtomicU64,
}

impl QueueStats {
    pub fn enqueued_total(&self) -> u64 {
        self.enqueued_total.load(Ordering::SeqCst)
    }

    pub fn dequeued_total(&self) -> u64 {
        self.dequeued_total.load(Ordering::SeqCst)
    }
}

impl MessageQueue {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            messages: Mutex::new(VecDeque::new()),
            stats: QueueStats::default(),
        }
    }

    /// Appends `payload` at the tail and returns the depth right after the append.
    pub fn enqueue(&self, payload: serde_json::Value) -> usize {
        let message = Message::new(payload);
        let mut messages = self.messages.lock();
        messages.push_back(message);
        // Counters move under the same lock as the deque.
        self.stats.enqueued_total.fetch_add(1, Ordering::SeqCst);
        messages.len()
    }

    /// Removes the head message, or returns `None` when the queue is empty.
    pub fn dequeue(&self) -> Option<Message> {
        let mut messages = self.messages.lock();
        let message = messages.pop_front()?;
        self.stats.dequeued_total.fetch_add(1, Ordering::SeqCst);
        Some(message)
    }

    pub fn size(&self) -> usize {
        self.messages.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.lock().is_empty()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stats(&self) -> &QueueStats {
        &self.stats
    }
}

impl std::fmt::Debug for MessageQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageQueue")
            .field("name", &self.name)
            .field("size", &self.size())
            .finish()
    }
}
