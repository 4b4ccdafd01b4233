//! Report payload consumed by the PDF export on the dashboard.

use serde::Serialize;

use crate::filter::ResponseFilter;
use crate::sorting::SortDirection;
use crate::types::Timestamp;

/// Date format used in the human-readable filter description.
const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

/// Everything a renderer needs to lay out one report.
#[derive(Debug, Clone, Serialize)]
pub struct Report<R, M> {
    pub metrics: M,
    pub filters: ResponseFilter,
    pub sort: SortDirection,
    pub filter_description: String,
    pub responses: Vec<R>,
    pub generated_at: Timestamp,
    /// Size of the unfiltered collection.
    pub total_forms_count: usize,
}

/// One-line summary of the applied filters, e.g.
/// `"From: 01/03/2024 | To: 31/03/2024 | Department: UTI"`.
pub fn describe_filters(filter: &ResponseFilter, sort: SortDirection) -> String {
    let mut parts = Vec::new();

    if let Some(start) = filter.start_date {
        parts.push(format!("From: {}", start.format(DISPLAY_DATE_FORMAT)));
    }
    if let Some(end) = filter.end_date {
        parts.push(format!("To: {}", end.format(DISPLAY_DATE_FORMAT)));
    }
    if let Some(department) = &filter.department {
        parts.push(format!("Department: {department}"));
    }
    match sort {
        SortDirection::Desc => parts.push("Sort: highest to lowest".to_string()),
        SortDirection::Asc => parts.push("Sort: lowest to highest".to_string()),
        SortDirection::None => {}
    }

    if parts.is_empty() {
        "No filters applied".to_string()
    } else {
        parts.join(" | ")
    }
}
