use std::collections::BTreeMap;
use std::sync::Arc;

use dashmap::DashMap;
use serde::Serialize;

use super::message::Message;
use super::message_queue::MessageQueue;

/// Maps queue names to their queues.
///
/// Queues are created on first reference and live as long as the registry. The
/// map is sharded, so creating one queue only locks the shard holding its name.
#[derive(Debug, Default)]
pub struct QueueRegistry {
    queues: DashMap<String, Arc<MessageQueue>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatsSummary {
    pub total_queues: usize,
    pub queues: BTreeMap<String, QueueStatsInfo>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QueueStatsInfo {
    pub size: usize,
    pub enqueued_total: u64,
    pub dequeued_total: u64,
}

impl QueueRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the queue registered under `name`, creating an empty one if needed.
    pub fn resolve(&self, name: &str) -> Arc<MessageQueue> {
        if let Some(queue) = self.get_queue(name) {
            return queue;
        }

        // The entry holds the shard's write lock, so racing first-time resolves
        // for the same name all end up with the instance inserted here.
        self.queues
            .entry(name.to_string())
            .or_insert_with(|| {
                tracing::debug!(queue = name, "creating queue");
                Arc::new(MessageQueue::new(name))
            })
            .clone()
    }

    pub fn get_queue(&self, name: &str) -> Option<Arc<MessageQueue>> {
        self.queues.get(name).map(|queue| queue.clone())
    }

    /// Appends `payload` to the named queue and returns its new depth.
    pub fn publish(&self, name: &str, payload: serde_json::Value) -> usize {
        let depth = self.resolve(name).enqueue(payload);
        tracing::debug!(queue = name, depth, "message published");
        depth
    }

    /// Takes the oldest message off the named queue, if any.
    pub fn consume(&self, name: &str) -> Option<Message> {
        let message = self.resolve(name).dequeue();
        tracing::debug!(queue = name, empty = message.is_none(), "message consumed");
        message
    }

    /// Names of all known queues, sorted.
    pub fn list_queues(&self) -> Vec<String> {
        let mut names: Vec<String> = self.queues.iter().map(|entry| entry.key().clone()).collect();
        names.sort();
        names
    }

    pub fn queue_count(&self) -> usize {
        self.queues.len()
    }

    pub fn stats_summary(&self) -> StatsSummary {
        let queues: BTreeMap<String, QueueStatsInfo> = self
            .queues
            .iter()
            .map(|entry| {
                let queue = entry.value();
                let info = QueueStatsInfo {
                    size: queue.size(),
                    enqueued_total: queue.stats().enqueued_total(),
                    dequeued_total: queue.stats().dequeued_total(),
                };
                (entry.key().clone(), info)
            })
            .collect();

        StatsSummary {
            total_queues: queues.len(),
            queues,
        }
    }
}
