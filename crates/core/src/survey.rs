//! Record types for the two questionnaires.
//!
//! Questionnaire 1 ("satisfaction") rates the care experience and carries an
//! evaluated department. Questionnaire 2 ("infrastructure") rates facilities
//! and records patient-safety identification answers. Both share the same
//! patient descriptors and the same lifecycle: created once, never updated.
//!
//! Keys are snake_case on the wire. Submissions also accept the camelCase
//! names the survey forms send (`patientName`, `evaluatedDepartment`, ...).

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::scoring::mean_rating;
use crate::types::{DbId, Timestamp};

/// A `would_recommend` rating at or above this value counts as a
/// recommendation in the headline rate.
pub const RECOMMEND_THRESHOLD: i32 = 4;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Patient gender. Wire values are the Portuguese labels the survey form
/// submits; English names are accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "Masculino", alias = "Male")]
    Male,
    #[serde(rename = "Feminino", alias = "Female")]
    Female,
    #[serde(rename = "Outro", alias = "Other")]
    Other,
}

impl Gender {
    /// String representation for database storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Masculino",
            Gender::Female => "Feminino",
            Gender::Other => "Outro",
        }
    }

    /// Parse a stored value. Unknown values are an integrity failure, not a
    /// silent default.
    pub fn from_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "Masculino" => Ok(Gender::Male),
            "Feminino" => Ok(Gender::Female),
            "Outro" => Ok(Gender::Other),
            other => Err(CoreError::DataIntegrity(format!(
                "patient_gender: unknown value '{other}'"
            ))),
        }
    }
}

/// Tri-state answer used by the patient-safety questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SafetyAnswer {
    #[serde(rename = "Sim", alias = "Yes")]
    Yes,
    #[serde(rename = "Não", alias = "No")]
    No,
    #[serde(rename = "Parcialmente", alias = "Partially")]
    Partially,
}

// ---------------------------------------------------------------------------
// Rating groups
// ---------------------------------------------------------------------------

/// A fixed-size group of 1..=5 ratings.
pub trait RatingGroup {
    /// Field names, in the same order as [`RatingGroup::values`].
    const FIELDS: &'static [&'static str];

    fn values(&self) -> Vec<i32>;
}

/// Questionnaire 1 satisfaction ratings (nine fields).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SatisfactionRatings {
    #[serde(alias = "overallCare")]
    pub overall_care: i32,
    #[serde(alias = "nursingCare")]
    pub nursing_care: i32,
    #[serde(alias = "medicalCare")]
    pub medical_care: i32,
    pub welcoming: i32,
    pub cleanliness: i32,
    pub comfort: i32,
    #[serde(alias = "responseTime")]
    pub response_time: i32,
    #[serde(alias = "wouldRecommend")]
    pub would_recommend: i32,
    #[serde(alias = "overallSatisfaction")]
    pub overall_satisfaction: i32,
}

impl RatingGroup for SatisfactionRatings {
    const FIELDS: &'static [&'static str] = &[
        "overall_care",
        "nursing_care",
        "medical_care",
        "welcoming",
        "cleanliness",
        "comfort",
        "response_time",
        "would_recommend",
        "overall_satisfaction",
    ];

    fn values(&self) -> Vec<i32> {
        vec![
            self.overall_care,
            self.nursing_care,
            self.medical_care,
            self.welcoming,
            self.cleanliness,
            self.comfort,
            self.response_time,
            self.would_recommend,
            self.overall_satisfaction,
        ]
    }
}

/// Questionnaire 2 infrastructure ratings (twenty-one fields).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfrastructureRatings {
    #[serde(alias = "hospitalOverallInfrastructure")]
    pub hospital_overall_infrastructure: i32,
    #[serde(alias = "commonAreasAdequacy")]
    pub common_areas_adequacy: i32,
    #[serde(alias = "equipmentSafety")]
    pub equipment_safety: i32,
    #[serde(alias = "equipmentCondition")]
    pub equipment_condition: i32,
    #[serde(alias = "bedComfort")]
    pub bed_comfort: i32,
    #[serde(alias = "accommodationNeeds")]
    pub accommodation_needs: i32,
    #[serde(alias = "mealQuality")]
    pub meal_quality: i32,
    #[serde(alias = "mealTimeliness")]
    pub meal_timeliness: i32,
    #[serde(alias = "nutritionTeamCare")]
    pub nutrition_team_care: i32,
    #[serde(alias = "hospitalSignage")]
    pub hospital_signage: i32,
    #[serde(alias = "teamCommunicationClarity")]
    pub team_communication_clarity: i32,
    #[serde(alias = "medicalTeamRelationship")]
    pub medical_team_relationship: i32,
    #[serde(alias = "diagnosisExplanation")]
    pub diagnosis_explanation: i32,
    #[serde(alias = "feltHeardByMedicalTeam")]
    pub felt_heard_by_medical_team: i32,
    #[serde(alias = "nursingTeamCare")]
    pub nursing_team_care: i32,
    #[serde(alias = "nursingTeamAvailability")]
    pub nursing_team_availability: i32,
    #[serde(alias = "feltSafeWithCare")]
    pub felt_safe_with_care: i32,
    #[serde(alias = "technologyAccess")]
    pub technology_access: i32,
    #[serde(alias = "connectivitySatisfaction")]
    pub connectivity_satisfaction: i32,
    #[serde(alias = "laundryCleanlinessOrganization")]
    pub laundry_cleanliness_organization: i32,
    #[serde(alias = "laundryChangeFrequency")]
    pub laundry_change_frequency: i32,
}

impl RatingGroup for InfrastructureRatings {
    const FIELDS: &'static [&'static str] = &[
        "hospital_overall_infrastructure",
        "common_areas_adequacy",
        "equipment_safety",
        "equipment_condition",
        "bed_comfort",
        "accommodation_needs",
        "meal_quality",
        "meal_timeliness",
        "nutrition_team_care",
        "hospital_signage",
        "team_communication_clarity",
        "medical_team_relationship",
        "diagnosis_explanation",
        "felt_heard_by_medical_team",
        "nursing_team_care",
        "nursing_team_availability",
        "felt_safe_with_care",
        "technology_access",
        "connectivity_satisfaction",
        "laundry_cleanliness_organization",
        "laundry_change_frequency",
    ];

    fn values(&self) -> Vec<i32> {
        vec![
            self.hospital_overall_infrastructure,
            self.common_areas_adequacy,
            self.equipment_safety,
            self.equipment_condition,
            self.bed_comfort,
            self.accommodation_needs,
            self.meal_quality,
            self.meal_timeliness,
            self.nutrition_team_care,
            self.hospital_signage,
            self.team_communication_clarity,
            self.medical_team_relationship,
            self.diagnosis_explanation,
            self.felt_heard_by_medical_team,
            self.nursing_team_care,
            self.nursing_team_availability,
            self.felt_safe_with_care,
            self.technology_access,
            self.connectivity_satisfaction,
            self.laundry_cleanliness_organization,
            self.laundry_change_frequency,
        ]
    }
}

// ---------------------------------------------------------------------------
// Answer groups
// ---------------------------------------------------------------------------

/// Questionnaire 1 process and communication answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceAnswers {
    #[serde(alias = "professionalsIdentified")]
    pub professionals_identified: bool,
    #[serde(alias = "nameVerified")]
    pub name_verified: bool,
    #[serde(alias = "treatmentExplained")]
    pub treatment_explained: bool,
    #[serde(alias = "participatedInDecisions")]
    pub participated_in_decisions: bool,
    #[serde(alias = "medicationInstructionsClear")]
    pub medication_instructions_clear: bool,
    #[serde(alias = "dischargeOrientationComplete")]
    pub discharge_orientation_complete: bool,
    #[serde(alias = "knewWhoToAsk")]
    pub knew_who_to_ask: bool,
    #[serde(alias = "privacyRespected")]
    pub privacy_respected: bool,
}

/// Questionnaire 2 identification-bracelet answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientSafetyAnswers {
    #[serde(alias = "usedIdentificationBracelet")]
    pub used_identification_bracelet: SafetyAnswer,
    #[serde(alias = "braceletInfoCorrect")]
    pub bracelet_info_correct: SafetyAnswer,
    #[serde(alias = "bedIdentification")]
    pub bed_identification: SafetyAnswer,
    #[serde(alias = "identityCheckedBeforeProcedures")]
    pub identity_checked_before_procedures: SafetyAnswer,
}

impl PatientSafetyAnswers {
    pub const QUESTIONS: [&'static str; 4] = [
        "used_identification_bracelet",
        "bracelet_info_correct",
        "bed_identification",
        "identity_checked_before_procedures",
    ];

    /// Answers in [`PatientSafetyAnswers::QUESTIONS`] order.
    pub fn answers(&self) -> [SafetyAnswer; 4] {
        [
            self.used_identification_bracelet,
            self.bracelet_info_correct,
            self.bed_identification,
            self.identity_checked_before_procedures,
        ]
    }
}

/// Decode a JSON column into a typed group.
///
/// A missing or non-integer field yields [`CoreError::DataIntegrity`] naming
/// the column; nothing is coerced to zero.
pub fn decode_group<T: DeserializeOwned>(
    column: &str,
    value: serde_json::Value,
) -> Result<T, CoreError> {
    serde_json::from_value(value)
        .map_err(|e| CoreError::DataIntegrity(format!("{column}: {e}")))
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// Patient and episode descriptors shared by both questionnaires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientInfo {
    #[serde(alias = "patientName")]
    pub patient_name: String,
    /// Brazilian national id (CPF), 11 digits.
    #[serde(alias = "patientCpf")]
    pub patient_cpf: String,
    #[serde(alias = "patientAge")]
    pub patient_age: i32,
    #[serde(alias = "patientGender")]
    pub patient_gender: Gender,
    #[serde(alias = "admissionDate")]
    pub admission_date: NaiveDate,
    #[serde(alias = "dischargeDate")]
    pub discharge_date: NaiveDate,
}

/// A persisted questionnaire 1 response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SatisfactionResponse {
    pub id: DbId,
    #[serde(flatten)]
    pub patient: PatientInfo,
    pub evaluated_department: String,
    pub satisfaction: SatisfactionRatings,
    pub experience: ExperienceAnswers,
    pub comments: String,
    pub created_at: Timestamp,
}

/// A persisted questionnaire 2 response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfrastructureResponse {
    pub id: DbId,
    #[serde(flatten)]
    pub patient: PatientInfo,
    pub infrastructure: InfrastructureRatings,
    pub patient_safety: PatientSafetyAnswers,
    pub comments: String,
    pub created_at: Timestamp,
}

/// Submission payload for questionnaire 1.
#[derive(Debug, Clone, Deserialize)]
pub struct NewSatisfactionResponse {
    #[serde(flatten)]
    pub patient: PatientInfo,
    #[serde(alias = "evaluatedDepartment")]
    pub evaluated_department: String,
    pub satisfaction: SatisfactionRatings,
    pub experience: ExperienceAnswers,
    #[serde(default)]
    pub comments: Option<String>,
}

impl NewSatisfactionResponse {
    pub fn comments(&self) -> &str {
        self.comments.as_deref().unwrap_or_default()
    }
}

/// Submission payload for questionnaire 2.
#[derive(Debug, Clone, Deserialize)]
pub struct NewInfrastructureResponse {
    #[serde(flatten)]
    pub patient: PatientInfo,
    pub infrastructure: InfrastructureRatings,
    #[serde(alias = "patientSafety")]
    pub patient_safety: PatientSafetyAnswers,
    #[serde(default)]
    pub comments: Option<String>,
}

impl NewInfrastructureResponse {
    pub fn comments(&self) -> &str {
        self.comments.as_deref().unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// SurveyRecord
// ---------------------------------------------------------------------------

/// The view of a response that the filter, sort and aggregate stages need.
pub trait SurveyRecord {
    fn created_at(&self) -> Timestamp;

    /// Mean of the record's rating group.
    fn score(&self) -> f64;

    /// Evaluated department, for questionnaires that have one.
    fn department(&self) -> Option<&str> {
        None
    }

    /// Whether the record counts toward the questionnaire's headline rate
    /// (recommendation for Q1, bracelet identification for Q2).
    fn positive_signal(&self) -> bool;
}

impl SurveyRecord for SatisfactionResponse {
    fn created_at(&self) -> Timestamp {
        self.created_at
    }

    fn score(&self) -> f64 {
        mean_rating(&self.satisfaction)
    }

    fn department(&self) -> Option<&str> {
        Some(&self.evaluated_department)
    }

    fn positive_signal(&self) -> bool {
        self.satisfaction.would_recommend >= RECOMMEND_THRESHOLD
    }
}

impl SurveyRecord for InfrastructureResponse {
    fn created_at(&self) -> Timestamp {
        self.created_at
    }

    fn score(&self) -> f64 {
        mean_rating(&self.infrastructure)
    }

    fn positive_signal(&self) -> bool {
        self.patient_safety.used_identification_bracelet == SafetyAnswer::Yes
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
