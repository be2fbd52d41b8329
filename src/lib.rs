//! Page Latency Prober
//!
//! Scans a status page for its list of service links, probes every link once
//! with a cache-busted GET, and writes a color-coded round-trip time back onto
//! the marker element that sits next to each link.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod origin;
pub mod output;
pub mod page;
pub mod probe;
pub mod render;
pub mod types;

// Re-export commonly used types
pub use error::{AppError, Result};
pub use models::{Config, ProbeResult, ProbeTarget};
pub use origin::classify_origin;
pub use page::{discover_targets, ElementLookup, MarkerElement, PageDocument};
pub use probe::{Prober, ProbeClient, ReqwestProbeClient, RunSummary};
pub use render::render_result;
pub use types::{OriginKind, RequestMode};

/// Application version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");

/// Fixed probing and rendering constants
pub mod defaults {
    use std::time::Duration;

    /// Deadline for every individual probe
    pub const PROBE_TIMEOUT: Duration = Duration::from_millis(3000);
    /// Successful probes slower than this are rendered in the warning color
    pub const SLOW_THRESHOLD_MS: i64 = 500;
    /// Label rendered for every failure class
    pub const FAILURE_SENTINEL: &str = "999ms";
    /// Selector for the list items scanned on the page
    pub const LIST_ITEM_SELECTOR: &str = ".speedlist li";
    /// Selector for the link inside a list item
    pub const ANCHOR_SELECTOR: &str = "a";
    /// Id prefix of the marker element inside a list item
    pub const MARKER_ID_PREFIX: &str = "lineMs";
    /// Query parameter carrying the cache-busting timestamp
    pub const CACHE_BUST_PARAM: &str = "t";
    /// Page location assumed for local page files
    pub const DEFAULT_BASE_URL: &str = "http://localhost/";
    /// Timeout for downloading the page itself
    pub const PAGE_LOAD_TIMEOUT: Duration = Duration::from_secs(10);
    pub const DEFAULT_ENABLE_COLOR: bool = true;
}
