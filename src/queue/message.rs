use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// A published payload together with the moment the broker accepted it.
///
/// The payload is opaque to the broker and handed back to the consumer verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub payload: serde_json::Value,
    /// Microseconds since the Unix epoch.
    pub enqueued_at: u64,
}

impl Message {
    pub fn new(payload: serde_json::Value) -> Self {
        Self {
            payload,
            enqueued_at: now_micros(),
        }
    }

    pub fn into_payload(self) -> serde_json::Value {
        self.payload
    }
}

fn now_micros() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_micros() as u64)
        .unwrap_or(0)
}
