//! Snapshot of the page after a run, shaped for display

use crate::page::{discover_targets, MarkerStyle, PageDocument};
use crate::probe::RunSummary;
use serde::{Deserialize, Serialize};

/// One probed link and what its marker now shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub url: String,
    pub marker_id: String,
    /// Marker text; `None` if the marker element is missing from the page
    pub text: Option<String>,
    /// Style written by the renderer, if any
    pub style: Option<MarkerStyle>,
}

/// Everything the formatters need to describe a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageReport {
    pub page_location: String,
    pub rows: Vec<ReportRow>,
    pub summary: RunSummary,
}

impl PageReport {
    /// Read the marker elements back off the page, in document order
    pub fn from_page(page: &PageDocument, summary: RunSummary) -> Self {
        let rows = discover_targets(page)
            .into_iter()
            .map(|target| {
                let element = page.element_by_id(&target.display_target_id);
                ReportRow {
                    text: element.map(|e| e.text.clone()),
                    style: element.and_then(|e| e.style),
                    url: target.url,
                    marker_id: target.display_target_id,
                }
            })
            .collect();

        Self {
            page_location: page.location().to_string(),
            rows,
            summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{fixtures::STATUS_PAGE, MarkerColor};
    use crate::render::render_result;
    use url::Url;

    #[test]
    fn test_report_reflects_rendered_markers() {
        let mut page = PageDocument::parse(STATUS_PAGE, Url::parse("http://127.0.0.1:9090/").unwrap()).unwrap();
        render_result(&mut page, "lineMs1", "120ms", false);
        render_result(&mut page, "lineMs3", "999ms", true);

        let report = PageReport::from_page(&page, RunSummary::default());
        assert_eq!(report.page_location, "http://127.0.0.1:9090/");
        assert_eq!(report.rows.len(), 3);

        assert_eq!(report.rows[0].text.as_deref(), Some("120ms"));
        assert_eq!(report.rows[0].style.unwrap().color, MarkerColor::Healthy);
        assert_eq!(report.rows[1].text.as_deref(), Some("--"));
        assert!(report.rows[1].style.is_none());
        assert_eq!(report.rows[2].style.unwrap().color, MarkerColor::Alert);
    }
}
