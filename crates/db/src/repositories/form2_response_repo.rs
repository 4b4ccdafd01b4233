//! Repository for the `form2_responses` table.

use sqlx::types::Json;
use sqlx::PgPool;
use survey_core::survey::NewInfrastructureResponse;
use survey_core::types::DbId;

use crate::models::form2_response::Form2ResponseRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, patient_name, patient_cpf, patient_age, patient_gender, \
                       admission_date, discharge_date, infrastructure, patient_safety, \
                       comments, created_at";

/// Insert and read operations for questionnaire 2 responses.
pub struct Form2ResponseRepo;

impl Form2ResponseRepo {
    pub async fn create(
        pool: &PgPool,
        input: &NewInfrastructureResponse,
    ) -> Result<Form2ResponseRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO form2_responses
                (id, patient_name, patient_cpf, patient_age, patient_gender,
                 admission_date, discharge_date, infrastructure, patient_safety, comments)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Form2ResponseRow>(&query)
            .bind(DbId::new_v4())
            .bind(&input.patient.patient_name)
            .bind(&input.patient.patient_cpf)
            .bind(input.patient.patient_age)
            .bind(input.patient.patient_gender.as_str())
            .bind(input.patient.admission_date)
            .bind(input.patient.discharge_date)
            .bind(Json(&input.infrastructure))
            .bind(Json(&input.patient_safety))
            .bind(input.comments())
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Form2ResponseRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM form2_responses WHERE id = $1");
        sqlx::query_as::<_, Form2ResponseRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every response, most recent first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Form2ResponseRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM form2_responses ORDER BY created_at DESC");
        sqlx::query_as::<_, Form2ResponseRow>(&query)
            .fetch_all(pool)
            .await
    }
}
