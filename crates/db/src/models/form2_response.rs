//! Row model for the `form2_responses` table (questionnaire 2).

use chrono::NaiveDate;
use sqlx::FromRow;
use survey_core::error::CoreError;
use survey_core::survey::{
    decode_group, Gender, InfrastructureResponse, NewInfrastructureResponse, PatientInfo,
};
use survey_core::types::{DbId, Timestamp};

use super::encode_group;

/// A row from the `form2_responses` table.
#[derive(Debug, Clone, FromRow)]
pub struct Form2ResponseRow {
    pub id: DbId,
    pub patient_name: String,
    pub patient_cpf: String,
    pub patient_age: i32,
    pub patient_gender: String,
    pub admission_date: NaiveDate,
    pub discharge_date: NaiveDate,
    pub infrastructure: serde_json::Value,
    pub patient_safety: serde_json::Value,
    pub comments: String,
    pub created_at: Timestamp,
}

impl TryFrom<Form2ResponseRow> for InfrastructureResponse {
    type Error = CoreError;

    fn try_from(row: Form2ResponseRow) -> Result<Self, Self::Error> {
        Ok(InfrastructureResponse {
            id: row.id,
            patient: PatientInfo {
                patient_name: row.patient_name,
                patient_cpf: row.patient_cpf,
                patient_age: row.patient_age,
                patient_gender: Gender::from_db(&row.patient_gender)?,
                admission_date: row.admission_date,
                discharge_date: row.discharge_date,
            },
            infrastructure: decode_group("infrastructure", row.infrastructure)?,
            patient_safety: decode_group("patient_safety", row.patient_safety)?,
            comments: row.comments,
            created_at: row.created_at,
        })
    }
}

impl Form2ResponseRow {
    /// Build the row an insert of `input` would produce.
    pub fn from_new(
        input: &NewInfrastructureResponse,
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
            infrastructure: encode_group("infrastructure", &input.infrastructure)?,
            patient_safety: encode_group("patient_safety", &input.patient_safety)?,
            comments: input.comments().to_string(),
            created_at,
        })
    }
}
