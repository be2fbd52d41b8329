//! Probe targets discovered on the page and the results derived from them

use crate::defaults::FAILURE_SENTINEL;
use serde::{Deserialize, Serialize};

/// One link to probe and the marker element its result is written to
///
/// Built fresh on every run from the page and dropped once rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeTarget {
    /// Link as written in the page, absolute or relative
    pub url: String,
    /// Id of the marker element that receives the result
    pub display_target_id: String,
}

impl ProbeTarget {
    pub fn new<U: Into<String>, I: Into<String>>(url: U, display_target_id: I) -> Self {
        Self {
            url: url.into(),
            display_target_id: display_target_id.into(),
        }
    }
}

/// Outcome of a single probe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeResult {
    /// Measured round trip; `None` when the probe failed
    pub elapsed_ms: Option<u64>,
    /// Set for timeouts, network errors and non-200 same-origin replies
    pub is_error: bool,
}

impl ProbeResult {
    /// A probe that got an acceptable response after `elapsed_ms`
    pub fn success(elapsed_ms: u64) -> Self {
        Self {
            elapsed_ms: Some(elapsed_ms),
            is_error: false,
        }
    }

    /// A probe that failed for any reason
    pub fn failure() -> Self {
        Self {
            elapsed_ms: None,
            is_error: true,
        }
    }

    /// Text written onto the marker element
    pub fn display_value(&self) -> String {
        match (self.is_error, self.elapsed_ms) {
            (false, Some(ms)) => format!("{}ms", ms),
            _ => FAILURE_SENTINEL.to_string(),
        }
    }
}
