//! Type definitions and aliases

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use crate::error::{AppError, Result};

/// Where a probe URL lives relative to the hosting page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OriginKind {
    /// Same scheme, host and port as the page; the status code is readable
    SameOrigin,
    /// Any other origin; only reachability is observable
    CrossOrigin,
}

impl OriginKind {
    /// Request mode used to probe a URL of this origin kind
    pub fn request_mode(&self) -> RequestMode {
        match self {
            OriginKind::SameOrigin => RequestMode::Cors,
            OriginKind::CrossOrigin => RequestMode::NoCors,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            OriginKind::SameOrigin => "same-origin",
            OriginKind::CrossOrigin => "cross-origin",
        }
    }
}

/// How a probe request is issued and how much of the response is visible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestMode {
    /// Regular readable request: status code is inspected
    Cors,
    /// Opaque request: status and body are hidden, arrival is all we learn
    NoCors,
}

/// Visibility of a received response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseKind {
    /// Status code readable
    Basic,
    /// Status code hidden (reported as 0)
    Opaque,
}

/// Output format for the terminal report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// Machine-readable JSON document
    Json,
}
