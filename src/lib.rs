// relayq - in-memory FIFO message queue broker over HTTP
//
// This library provides the queue registry, the HTTP front end and their plumbing.
// Binary entry point is in src/main.rs

pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod queue;

pub use config::{Config, LogFormat};
pub use error::{ApiError, Error, Result};
pub use http::{create_router, Server};
pub use queue::{Message, MessageQueue, QueueRegistry, QueueStats, StatsSummary};
