//! Data models and structures for the page latency prober

pub mod config;
pub mod probe;

// Re-export main model types
pub use config::{Config, PageSource};
pub use probe::{ProbeResult, ProbeTarget};
