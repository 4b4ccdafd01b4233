//! Aggregate stage: summary metrics over a filtered response collection.
//!
//! Calendar months are evaluated in UTC relative to the `now` passed in by
//! the caller, never relative to the records themselves.

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::filter::start_of_day;
use crate::scoring::{percentage, rounded_mean};
use crate::survey::SurveyRecord;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Month windows
// ---------------------------------------------------------------------------

/// Start instants of the current and previous calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthWindow {
    pub this_month_start: Timestamp,
    pub last_month_start: Timestamp,
}

impl MonthWindow {
    pub fn containing(now: Timestamp) -> Self {
        let this_first = first_of_month(now.date_naive());
        let last_first = first_of_month(this_first - Duration::days(1));
        Self {
            this_month_start: start_of_day(this_first),
            last_month_start: start_of_day(last_first),
        }
    }

    /// `created_at >= first day of the current month`.
    pub fn is_this_month(&self, ts: Timestamp) -> bool {
        ts >= self.this_month_start
    }

    /// Anywhere from the first instant of the previous month through the
    /// last instant of its final day.
    pub fn is_last_month(&self, ts: Timestamp) -> bool {
        ts >= self.last_month_start && ts < self.this_month_start
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.day0()))
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Variant-neutral summary. Mapped onto the questionnaire-specific shapes
/// below before it leaves the API.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregateMetrics {
    pub total_responses: usize,
    /// Mean of per-record scores, one decimal.
    pub average_score: f64,
    /// Percentage of records with a positive signal, one decimal.
    pub positive_rate: f64,
    pub responses_this_month: usize,
    pub responses_last_month: usize,
}

pub fn aggregate<R: SurveyRecord>(records: &[R], now: Timestamp) -> AggregateMetrics {
    let window = MonthWindow::containing(now);
    let total = records.len();

    let positive = records.iter().filter(|r| r.positive_signal()).count();
    let this_month = records
        .iter()
        .filter(|r| window.is_this_month(r.created_at()))
        .count();
    let last_month = records
        .iter()
        .filter(|r| window.is_last_month(r.created_at()))
        .count();

    AggregateMetrics {
        total_responses: total,
        average_score: rounded_mean(records.iter().map(SurveyRecord::score)),
        positive_rate: percentage(positive, total),
        responses_this_month: this_month,
        responses_last_month: last_month,
    }
}

/// Metrics payload for questionnaire 1.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SatisfactionMetrics {
    pub total_responses: usize,
    pub average_satisfaction: f64,
    /// Percentage of responses whose `would_recommend` rating is 4 or 5.
    pub recommendation_rate: f64,
    pub responses_this_month: usize,
    pub responses_last_month: usize,
}

impl From<AggregateMetrics> for SatisfactionMetrics {
    fn from(m: AggregateMetrics) -> Self {
        Self {
            total_responses: m.total_responses,
            average_satisfaction: m.average_score,
            recommendation_rate: m.positive_rate,
            responses_this_month: m.responses_this_month,
            responses_last_month: m.responses_last_month,
        }
    }
}

/// Metrics payload for questionnaire 2.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfrastructureMetrics {
    pub total_responses: usize,
    pub average_infrastructure: f64,
    /// Percentage of responses answering "Sim" to bracelet usage.
    pub identification_rate: f64,
    pub responses_this_month: usize,
    pub responses_last_month: usize,
}

impl From<AggregateMetrics> for InfrastructureMetrics {
    fn from(m: AggregateMetrics) -> Self {
        Self {
            total_responses: m.total_responses,
            average_infrastructure: m.average_score,
            identification_rate: m.positive_rate,
            responses_this_month: m.responses_this_month,
            responses_last_month: m.responses_last_month,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    #[derive(Debug, Clone)]
    struct Row {
        created_at: Timestamp,
        score: f64,
        positive: bool,
    }

    impl SurveyRecord for Row {
        fn created_at(&self) -> Timestamp {
            self.created_at
        }
        fn score(&self) -> f64 {
            self.score
        }
        fn positive_signal(&self) -> bool {
            self.positive
        }
    }

    fn at(y: i32, m: u32, d: u32) -> Timestamp {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn row(created_at: Timestamp, score: f64, positive: bool) -> Row {
        Row {
            created_at,
            score,
            positive,
        }
    }

    #[test]
    fn empty_collection_is_all_zero() {
        let m = aggregate::<Row>(&[], at(2024, 3, 15));
        assert_eq!(m.total_responses, 0);
        assert_eq!(m.average_score, 0.0);
        assert_eq!(m.positive_rate, 0.0);
        assert_eq!(m.responses_this_month, 0);
        assert_eq!(m.responses_last_month, 0);
        assert!(!m.average_score.is_nan());
    }

    #[test]
    fn average_of_three_scores() {
        let now = at(2024, 3, 15);
        let rows = vec![row(now, 3.0, true), row(now, 4.0, false), row(now, 5.0, true)];
        let m = aggregate(&rows, now);
        assert_eq!(m.average_score, 4.0);
        assert_eq!(m.positive_rate, 66.7);
    }

    #[test]
    fn month_counts_ignore_older_months() {
        let now = at(2024, 3, 15);
        let mut rows = vec![
            row(at(2024, 3, 1), 3.0, false),
            row(at(2024, 3, 10), 3.0, false),
            row(at(2024, 3, 14), 3.0, false),
            row(at(2024, 2, 1), 3.0, false),
            row(at(2024, 2, 29), 3.0, false),
        ];
        for month in [1, 1, 12] {
            rows.push(row(at(2023, month, 5), 3.0, false));
        }
        rows.push(row(at(2022, 6, 5), 3.0, false));
        rows.push(row(at(2021, 2, 5), 3.0, false));
        assert_eq!(rows.len(), 10);

        let m = aggregate(&rows, now);
        assert_eq!(m.responses_this_month, 3);
        assert_eq!(m.responses_last_month, 2);
    }

    #[test]
    fn last_month_includes_final_second_of_its_last_day() {
        let window = MonthWindow::containing(at(2024, 3, 15));
        let last_instant = Utc.with_ymd_and_hms(2024, 2, 29, 23, 59, 59).unwrap();
        assert!(window.is_last_month(last_instant));
        assert!(!window.is_this_month(last_instant));
        assert!(window.is_this_month(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()));
    }

    #[test]
    fn january_window_reaches_back_into_december() {
        let window = MonthWindow::containing(at(2025, 1, 20));
        assert_eq!(
            window.last_month_start,
            Utc.with_ymd_and_hms(2024, 12, 1, 0, 0, 0).unwrap()
        );
        assert!(window.is_last_month(at(2024, 12, 31)));
        assert!(!window.is_last_month(at(2024, 11, 30)));
    }

    #[test]
    fn variant_payloads_rename_fields() {
        let base = AggregateMetrics {
            total_responses: 2,
            average_score: 3.5,
            positive_rate: 50.0,
            responses_this_month: 1,
            responses_last_month: 1,
        };
        let q1 = SatisfactionMetrics::from(base);
        assert_eq!(q1.average_satisfaction, 3.5);
        assert_eq!(q1.recommendation_rate, 50.0);

        let q2 = serde_json::to_value(InfrastructureMetrics::from(base)).unwrap();
        assert_eq!(q2["average_infrastructure"], 3.5);
        assert_eq!(q2["identification_rate"], 50.0);
    }
}
