//! Row model for the `form_responses` table (questionnaire 1).

use chrono::NaiveDate;
use sqlx::FromRow;
use survey_core::error::CoreError;
use survey_core::survey::{
    decode_group, Gender, NewSatisfactionResponse, PatientInfo, SatisfactionResponse,
};
use survey_core::types::{DbId, Timestamp};

use super::encode_group;

/// A row from the `form_responses` table.
///
/// Rating and answer groups arrive as raw JSON and are only trusted once
/// [`TryFrom`] has decoded them into [`SatisfactionResponse`].
#[derive(Debug, Clone, FromRow)]
pub struct FormResponseRow {
    pub id: DbId,
    pub patient_name: String,
    pub patient_cpf: String,
    pub patient_age: i32,
    pub patient_gender: String,
    pub admission_date: NaiveDate,
    pub discharge_date: NaiveDate,
    pub evaluated_department: String,
    pub satisfaction: serde_json::Value,
    pub experience: serde_json::Value,
    pub comments: String,
    pub created_at: Timestamp,
}

impl TryFrom<FormResponseRow> for SatisfactionResponse {
    type Error = CoreError;

    fn try_from(row: FormResponseRow) -> Result<Self, Self::Error> {
        Ok(SatisfactionResponse {
            id: row.id,
            patient: PatientInfo {
                patient_name: row.patient_name,
                patient_cpf: row.patient_cpf,
                patient_age: row.patient_age,
                patient_gender: Gender::from_db(&row.patient_gender)?,
                admission_date: row.admission_date,
                discharge_date: row.discharge_date,
            },
            evaluated_department: row.evaluated_department,
            satisfaction: decode_group("satisfaction", row.satisfaction)?,
            experience: decode_group("experience", row.experience)?,
            comments: row.comments,
            created_at: row.created_at,
        })
    }
}

impl FormResponseRow {
    /// Build the row an insert of `input` would produce.
    pub fn from_new(
        input: &NewSatisfactionResponse,
        id: DbId,
        created_at: Timestamp,
    ) -> Result<Self, CoreError> {
        Ok(Self {
            id,
            patient_name: input.patient.patient_name.clone(),
            patient_cpf: input.patient.patient_cpf.clone(),
            patient_age: input.patient.patient_age,
            patient_gender: input.patient.patient_gender.as_str().to_string(),
            admission_date: input.patient.admission_date,
            discharge_date: input.patient.discharge_date,
            evaluated_department: input.evaluated_department.clone(),
            satisfaction: encode_group("satisfaction", &input.satisfaction)?,
            experience: encode_group("experience", &input.experience)?,
            comments: input.comments().to_string(),
            created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::Utc;
    use serde_json::json;

    use super::*;

    fn row(satisfaction: serde_json::Value) -> FormResponseRow {
        FormResponseRow {
            id: DbId::new_v4(),
            patient_name: "João Lima".to_string(),
            patient_cpf: "11144477735".to_string(),
            patient_age: 61,
            patient_gender: "Masculino".to_string(),
            admission_date: NaiveDate::from_ymd_opt(2024, 2, 10).unwrap(),
            discharge_date: NaiveDate::from_ymd_opt(2024, 2, 12).unwrap(),
            evaluated_department: "Ortopedia".to_string(),
            satisfaction,
            experience: json!({
                "professionals_identified": true, "name_verified": true,
                "treatment_explained": true, "participated_in_decisions": true,
                "medication_instructions_clear": true, "discharge_orientation_complete": true,
                "knew_who_to_ask": true, "privacy_respected": true
            }),
            comments: String::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn well_formed_row_converts() {
        let satisfaction = json!({
            "overall_care": 5, "nursing_care": 4, "medical_care": 5, "welcoming": 4,
            "cleanliness": 4, "comfort": 3, "response_time": 4, "would_recommend": 5,
            "overall_satisfaction": 5
        });
        let record = SatisfactionResponse::try_from(row(satisfaction)).unwrap();
        assert_eq!(record.satisfaction.comfort, 3);
        assert_eq!(record.patient.patient_gender, Gender::Male);
    }

    #[test]
    fn missing_rating_is_an_integrity_error() {
        let satisfaction = json!({ "overall_care": 5 });
        let result = SatisfactionResponse::try_from(row(satisfaction));
        assert_matches!(result, Err(CoreError::DataIntegrity(msg)) if msg.starts_with("satisfaction"));
    }
}
