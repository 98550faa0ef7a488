//! HTTP facade over the dispatch kernel: one locked world, one endpoint per
//! engine operation, and a WebSocket delta stream for the visualizer.

mod server;

pub use server::{serve, ServerError};
