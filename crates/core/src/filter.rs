//! Filter stage: narrows a response collection by creation date and
//! department.
//!
//! Date bounds are calendar days interpreted in UTC. The start bound is
//! midnight of its day; the end bound is expanded to 23:59:59.999 of its day
//! so that every response created on the end date is included.

use chrono::{Duration, NaiveDate, NaiveTime};
use serde::Serialize;

use crate::error::CoreError;
use crate::survey::SurveyRecord;
use crate::types::Timestamp;

/// Date format accepted for `startDate` / `endDate` query parameters.
pub const DATE_PARAM_FORMAT: &str = "%Y-%m-%d";

// ---------------------------------------------------------------------------
// ResponseFilter
// ---------------------------------------------------------------------------

/// Conjunction of optional predicates. Absent fields impose no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResponseFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Exact match on the evaluated department (questionnaire 1 only).
    pub department: Option<String>,
}

impl ResponseFilter {
    /// Build a filter, rejecting a start date that falls after the end date.
    pub fn new(
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        department: Option<String>,
    ) -> Result<Self, CoreError> {
        if let (Some(start), Some(end)) = (start_date, end_date) {
            if start > end {
                return Err(CoreError::Validation(format!(
                    "startDate ({start}) must not be after endDate ({end})"
                )));
            }
        }
        Ok(Self {
            start_date,
            end_date,
            department,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.start_date.is_none() && self.end_date.is_none() && self.department.is_none()
    }

    /// Inclusive lower bound on `created_at`.
    pub fn lower_bound(&self) -> Option<Timestamp> {
        self.start_date.map(start_of_day)
    }

    /// Inclusive upper bound on `created_at`.
    pub fn upper_bound(&self) -> Option<Timestamp> {
        self.end_date.map(end_of_day)
    }

    pub fn matches<R: SurveyRecord>(&self, record: &R) -> bool {
        let created_at = record.created_at();

        if let Some(lower) = self.lower_bound() {
            if created_at < lower {
                return false;
            }
        }
        if let Some(upper) = self.upper_bound() {
            if created_at > upper {
                return false;
            }
        }
        if let Some(department) = &self.department {
            if record.department() != Some(department.as_str()) {
                return false;
            }
        }
        true
    }
}

/// Keep the records matching `filter`, preserving their relative order.
pub fn apply_filter<R: SurveyRecord>(records: Vec<R>, filter: &ResponseFilter) -> Vec<R> {
    if filter.is_empty() {
        return records;
    }
    records.into_iter().filter(|r| filter.matches(r)).collect()
}

// ---------------------------------------------------------------------------
// Day bounds
// ---------------------------------------------------------------------------

/// Midnight UTC at the start of `date`.
pub fn start_of_day(date: NaiveDate) -> Timestamp {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// 23:59:59.999 UTC on `date`.
pub fn end_of_day(date: NaiveDate) -> Timestamp {
    start_of_day(date) + Duration::days(1) - Duration::milliseconds(1)
}

// ---------------------------------------------------------------------------
// Parameter parsing
// ---------------------------------------------------------------------------

/// Parse an optional `YYYY-MM-DD` query parameter.
///
/// Absent or blank values mean "no constraint".
pub fn parse_date_param(name: &str, raw: Option<&str>) -> Result<Option<NaiveDate>, CoreError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    NaiveDate::parse_from_str(raw, DATE_PARAM_FORMAT)
        .map(Some)
        .map_err(|_| {
            CoreError::Validation(format!("{name} must be a date in YYYY-MM-DD format, got '{raw}'"))
        })
}

/// Normalize an optional text parameter: blank becomes `None`.
pub fn parse_text_param(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
