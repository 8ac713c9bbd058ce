//! HTTP front end: maps `publish` and `consume` requests onto the queue registry.

pub mod handler;
pub mod router;
pub mod server;

pub use router::create_router;
pub use server::{serve, Server};
