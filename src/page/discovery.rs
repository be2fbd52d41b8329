//! Target discovery: turn the page's list items into probe targets

use super::PageDocument;
use crate::models::ProbeTarget;

/// Build the probe list for one run
///
/// Returns a fresh sequence in document order. Items without a linked anchor
/// or without a marker element are skipped without complaint.
pub fn discover_targets(page: &PageDocument) -> Vec<ProbeTarget> {
    page.list_items()
        .iter()
        .filter_map(|item| match (&item.anchor_href, &item.marker_id) {
            (Some(url), Some(id)) => Some(ProbeTarget::new(url.clone(), id.clone())),
            _ => None,
        })
        .collect()
}
