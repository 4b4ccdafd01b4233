//! Sort stage: optional ordering of a response collection by score.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::survey::SurveyRecord;

/// Requested score ordering.
///
/// `None` keeps the store's order (most recent first). Score ordering and
/// recency ordering are never combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    None,
    Asc,
    Desc,
}

impl SortDirection {
    /// Parse the `sortSatisfaction` query parameter (case-insensitive).
    pub fn parse(raw: Option<&str>) -> Result<Self, CoreError> {
        let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return Ok(SortDirection::None);
        };
        match raw.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(CoreError::Validation(format!(
                "sortSatisfaction must be 'asc' or 'desc', got '{raw}'"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::None => "none",
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Reorder `records` by score.
///
/// The sort is stable in both directions: records with equal scores keep
/// their incoming relative order.
pub fn sort_by_score<R: SurveyRecord>(records: Vec<R>, direction: SortDirection) -> Vec<R> {
    if direction == SortDirection::None {
        return records;
    }

    let mut scored: Vec<(f64, R)> = records.into_iter().map(|r| (r.score(), r)).collect();
    match direction {
        SortDirection::Asc => scored.sort_by(|a, b| a.0.total_cmp(&b.0)),
        SortDirection::Desc => scored.sort_by(|a, b| b.0.total_cmp(&a.0)),
        SortDirection::None => {}
    }
    scored.into_iter().map(|(_, r)| r).collect()
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::types::Timestamp;

    #[derive(Debug, Clone, PartialEq)]
    struct Scored {
        tag: &'static str,
        score: f64,
    }

    impl SurveyRecord for Scored {
        fn created_at(&self) -> Timestamp {
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
        }
        fn score(&self) -> f64 {
            self.score
        }
        fn positive_signal(&self) -> bool {
            false
        }
    }

    fn tags(records: &[Scored]) -> Vec<&'static str> {
        records.iter().map(|r| r.tag).collect()
    }

    fn sample() -> Vec<Scored> {
        vec![
            Scored { tag: "four", score: 4.0 },
            Scored { tag: "three", score: 3.0 },
            Scored { tag: "five", score: 5.0 },
        ]
    }

    #[test]
    fn ascending_and_descending() {
        assert_eq!(tags(&sort_by_score(sample(), SortDirection::Asc)), ["three", "four", "five"]);
        assert_eq!(tags(&sort_by_score(sample(), SortDirection::Desc)), ["five", "four", "three"]);
    }

    #[test]
    fn none_keeps_incoming_order() {
        assert_eq!(tags(&sort_by_score(sample(), SortDirection::None)), ["four", "three", "five"]);
    }

    #[test]
    fn reversed_desc_equals_asc_without_ties() {
        let mut desc = sort_by_score(sample(), SortDirection::Desc);
        desc.reverse();
        assert_eq!(desc, sort_by_score(sample(), SortDirection::Asc));
    }

    #[test]
    fn ties_keep_incoming_order_in_both_directions() {
        let records = vec![
            Scored { tag: "a", score: 4.0 },
            Scored { tag: "b", score: 2.0 },
            Scored { tag: "c", score: 4.0 },
            Scored { tag: "d", score: 2.0 },
        ];
        assert_eq!(tags(&sort_by_score(records.clone(), SortDirection::Asc)), ["b", "d", "a", "c"]);
        assert_eq!(tags(&sort_by_score(records, SortDirection::Desc)), ["a", "c", "b", "d"]);
    }

    #[test]
    fn parse_accepts_known_directions() {
        assert_eq!(SortDirection::parse(None).unwrap(), SortDirection::None);
        assert_eq!(SortDirection::parse(Some("")).unwrap(), SortDirection::None);
        assert_eq!(SortDirection::parse(Some("asc")).unwrap(), SortDirection::Asc);
        assert_eq!(SortDirection::parse(Some("DESC")).unwrap(), SortDirection::Desc);
        assert_matches!(SortDirection::parse(Some("up")), Err(CoreError::Validation(_)));
    }
}
