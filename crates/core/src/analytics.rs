//! Dashboard breakdowns computed over a filtered response collection.
//!
//! These feed the charts on the analytics pages: per-department averages,
//! score histograms, per-question averages, monthly volume, and the
//! recommendation / patient-safety splits.

use std::collections::BTreeMap;

use chrono::Datelike;
use serde::Serialize;

use crate::scoring::{round_one_decimal, rounded_mean};
use crate::survey::{
    InfrastructureResponse, PatientSafetyAnswers, RatingGroup, SafetyAnswer,
    SatisfactionResponse, SurveyRecord,
};
use crate::validation::{RATING_MAX, RATING_MIN};

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentStat {
    pub department: String,
    pub responses: usize,
    pub average_satisfaction: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreBucket {
    /// Whole-star bucket, 1..=5.
    pub rating: i32,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldAverage {
    pub field: &'static str,
    pub average: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyCount {
    /// `YYYY-MM`, UTC.
    pub month: String,
    pub responses: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecommendationSplit {
    pub recommending: usize,
    pub not_recommending: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SafetyQuestionStat {
    pub question: &'static str,
    pub yes: usize,
    pub no: usize,
    pub partially: usize,
}

/// Full analytics payload for questionnaire 1.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SatisfactionAnalytics {
    pub departments: Vec<DepartmentStat>,
    pub score_distribution: Vec<ScoreBucket>,
    pub field_averages: Vec<FieldAverage>,
    pub monthly_trend: Vec<MonthlyCount>,
    pub recommendation: RecommendationSplit,
}

/// Full analytics payload for questionnaire 2.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfrastructureAnalytics {
    pub score_distribution: Vec<ScoreBucket>,
    pub field_averages: Vec<FieldAverage>,
    pub monthly_trend: Vec<MonthlyCount>,
    pub patient_safety: Vec<SafetyQuestionStat>,
}

// ---------------------------------------------------------------------------
// Breakdowns
// ---------------------------------------------------------------------------

/// Response count and mean score per department, ordered by department name.
pub fn department_breakdown(records: &[SatisfactionResponse]) -> Vec<DepartmentStat> {
    let mut groups: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for record in records {
        groups
            .entry(record.evaluated_department.as_str())
            .or_default()
            .push(record.score());
    }

    groups
        .into_iter()
        .map(|(department, scores)| DepartmentStat {
            department: department.to_string(),
            responses: scores.len(),
            average_satisfaction: rounded_mean(scores),
        })
        .collect()
}

/// Histogram of `floor(score)` over the five whole-star buckets.
pub fn score_distribution<R: SurveyRecord>(records: &[R]) -> Vec<ScoreBucket> {
    let mut buckets: Vec<ScoreBucket> = (RATING_MIN..=RATING_MAX)
        .map(|rating| ScoreBucket { rating, count: 0 })
        .collect();

    for record in records {
        let star = record.score().floor() as i32;
        if let Some(bucket) = buckets.iter_mut().find(|b| b.rating == star) {
            bucket.count += 1;
        }
    }
    buckets
}

/// Mean of each rating field across the collection. Empty input yields an
/// empty list.
pub fn field_averages<'a, G, I>(groups: I) -> Vec<FieldAverage>
where
    G: RatingGroup + 'a,
    I: IntoIterator<Item = &'a G>,
{
    let mut sums = vec![0_i64; G::FIELDS.len()];
    let mut count = 0_usize;
    for group in groups {
        for (sum, value) in sums.iter_mut().zip(group.values()) {
            *sum += i64::from(value);
        }
        count += 1;
    }
    if count == 0 {
        return Vec::new();
    }

    G::FIELDS
        .iter()
        .zip(sums)
        .map(|(&field, sum)| FieldAverage {
            field,
            average: round_one_decimal(sum as f64 / count as f64),
        })
        .collect()
}

/// Response volume per calendar month, oldest first.
pub fn monthly_trend<R: SurveyRecord>(records: &[R]) -> Vec<MonthlyCount> {
    let mut months: BTreeMap<String, usize> = BTreeMap::new();
    for record in records {
        let ts = record.created_at();
        *months
            .entry(format!("{:04}-{:02}", ts.year(), ts.month()))
            .or_default() += 1;
    }
    months
        .into_iter()
        .map(|(month, responses)| MonthlyCount { month, responses })
        .collect()
}

pub fn recommendation_split(records: &[SatisfactionResponse]) -> RecommendationSplit {
    let recommending = records.iter().filter(|r| r.positive_signal()).count();
    RecommendationSplit {
        recommending,
        not_recommending: records.len() - recommending,
    }
}

/// Sim / Não / Parcialmente counts for each patient-safety question.
pub fn safety_breakdown(records: &[InfrastructureResponse]) -> Vec<SafetyQuestionStat> {
    PatientSafetyAnswers::QUESTIONS
        .iter()
        .enumerate()
        .map(|(idx, &question)| {
            let mut stat = SafetyQuestionStat {
                question,
                yes: 0,
                no: 0,
                partially: 0,
            };
            for record in records {
                match record.patient_safety.answers()[idx] {
                    SafetyAnswer::Yes => stat.yes += 1,
                    SafetyAnswer::No => stat.no += 1,
                    SafetyAnswer::Partially => stat.partially += 1,
                }
            }
            stat
        })
        .collect()
}

pub fn satisfaction_analytics(records: &[SatisfactionResponse]) -> SatisfactionAnalytics {
    SatisfactionAnalytics {
        departments: department_breakdown(records),
        score_distribution: score_distribution(records),
        field_averages: field_averages(records.iter().map(|r| &r.satisfaction)),
        monthly_trend: monthly_trend(records),
        recommendation: recommendation_split(records),
    }
}

pub fn infrastructure_analytics(records: &[InfrastructureResponse]) -> InfrastructureAnalytics {
    InfrastructureAnalytics {
        score_distribution: score_distribution(records),
        field_averages: field_averages(records.iter().map(|r| &r.infrastructure)),
        monthly_trend: monthly_trend(records),
        patient_safety: safety_breakdown(records),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};
    use uuid::Uuid;

    use super::*;
    use crate::survey::{ExperienceAnswers, Gender, PatientInfo, SatisfactionRatings};
    use crate::types::Timestamp;

    fn response(department: &str, rating: i32, recommend: i32, created_at: Timestamp) -> SatisfactionResponse {
        SatisfactionResponse {
            id: Uuid::new_v4(),
            patient: PatientInfo {
                patient_name: "Paciente".to_string(),
                patient_cpf: "52998224725".to_string(),
                patient_age: 30,
                patient_gender: Gender::Other,
                admission_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                discharge_date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            },
            evaluated_department: department.to_string(),
            satisfaction: SatisfactionRatings {
                overall_care: rating,
                nursing_care: rating,
                medical_care: rating,
                welcoming: rating,
                cleanliness: rating,
                comfort: rating,
                response_time: rating,
                would_recommend: recommend,
                overall_satisfaction: rating,
            },
            experience: ExperienceAnswers {
                professionals_identified: true,
                name_verified: true,
                treatment_explained: true,
                participated_in_decisions: true,
                medication_instructions_clear: true,
                discharge_orientation_complete: true,
                knew_who_to_ask: true,
                privacy_respected: true,
            },
            comments: String::new(),
            created_at,
        }
    }

    fn jan() -> Timestamp {
        Utc.with_ymd_and_hms(2024, 1, 10, 9, 0, 0).unwrap()
    }

    #[test]
    fn departments_are_grouped_and_sorted() {
        let records = vec![
            response("UTI", 4, 4, jan()),
            response("Pediatria", 2, 2, jan()),
            response("UTI", 2, 2, jan()),
        ];
        let stats = department_breakdown(&records);
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].department, "Pediatria");
        assert_eq!(stats[1].department, "UTI");
        assert_eq!(stats[1].responses, 2);
        assert_eq!(stats[1].average_satisfaction, 3.0);
    }

    #[test]
    fn distribution_floors_scores() {
        // 8 * 4 + 5 = 37 / 9 = 4.11 -> bucket 4
        let records = vec![response("UTI", 4, 5, jan()), response("UTI", 1, 1, jan())];
        let buckets = score_distribution(&records);
        assert_eq!(buckets.len(), 5);
        assert_eq!(buckets[0], ScoreBucket { rating: 1, count: 1 });
        assert_eq!(buckets[3], ScoreBucket { rating: 4, count: 1 });
        assert_eq!(buckets.iter().map(|b| b.count).sum::<usize>(), 2);
    }

    #[test]
    fn field_averages_follow_field_order() {
        let records = vec![response("UTI", 4, 5, jan()), response("UTI", 3, 2, jan())];
        let averages = field_averages(records.iter().map(|r| &r.satisfaction));
        assert_eq!(averages.len(), 9);
        assert_eq!(averages[0].field, "overall_care");
        assert_eq!(averages[0].average, 3.5);
        assert_eq!(averages[7].field, "would_recommend");
        assert_eq!(averages[7].average, 3.5);
    }

    #[test]
    fn field_averages_empty_input() {
        let records: Vec<SatisfactionResponse> = Vec::new();
        assert!(field_averages(records.iter().map(|r| &r.satisfaction)).is_empty());
    }

    #[test]
    fn monthly_trend_is_chronological() {
        let records = vec![
            response("UTI", 3, 3, Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()),
            response("UTI", 3, 3, jan()),
            response("UTI", 3, 3, Utc.with_ymd_and_hms(2023, 12, 31, 23, 0, 0).unwrap()),
            response("UTI", 3, 3, jan()),
        ];
        let trend = monthly_trend(&records);
        let months: Vec<&str> = trend.iter().map(|m| m.month.as_str()).collect();
        assert_eq!(months, ["2023-12", "2024-01", "2024-03"]);
        assert_eq!(trend[1].responses, 2);
    }

    #[test]
    fn recommendation_split_uses_threshold() {
        let records = vec![
            response("UTI", 3, 4, jan()),
            response("UTI", 3, 3, jan()),
            response("UTI", 3, 5, jan()),
        ];
        let split = recommendation_split(&records);
        assert_eq!(split.recommending, 2);
        assert_eq!(split.not_recommending, 1);
    }
}
