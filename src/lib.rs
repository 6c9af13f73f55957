// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod aggregate;
pub mod api;
pub mod classify;
pub mod config;
pub mod export;
pub mod filter;
pub mod ingest;
pub mod metrics;
pub mod relevance;
pub mod scoring;
pub mod signal;
pub mod source_weights;

// ---- Re-exports for stable public API ----
pub use crate::aggregate::{Aggregator, Snapshot};
pub use crate::api::{create_router, AppState};
pub use crate::config::SignalConfig;
pub use crate::filter::{SignalDigest, SignalFilter};
pub use crate::signal::SignalRecord;
