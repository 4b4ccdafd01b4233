//! Repository for the `form_responses` table.

use sqlx::types::Json;
use sqlx::PgPool;
use survey_core::survey::NewSatisfactionResponse;
use survey_core::types::DbId;

use crate::models::form_response::FormResponseRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, patient_name, patient_cpf, patient_age, patient_gender, \
                       admission_date, discharge_date, evaluated_department, \
                       satisfaction, experience, comments, created_at";

/// Insert and read operations for questionnaire 1 responses.
///
/// There is no update or delete: responses are immutable once submitted.
pub struct FormResponseRepo;

impl FormResponseRepo {
    /// Insert a validated submission. `id` and `created_at` are assigned here.
    pub async fn create(
        pool: &PgPool,
        input: &NewSatisfactionResponse,
    ) -> Result<FormResponseRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO form_responses
                (id, patient_name, patient_cpf, patient_age, patient_gender,
                 admission_date, discharge_date, evaluated_department,
                 satisfaction, experience, comments)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FormResponseRow>(&query)
            .bind(DbId::new_v4())
            .bind(&input.patient.patient_name)
            .bind(&input.patient.patient_cpf)
            .bind(input.patient.patient_age)
            .bind(input.patient.patient_gender.as_str())
            .bind(input.patient.admission_date)
            .bind(input.patient.discharge_date)
            .bind(&input.evaluated_department)
            .bind(Json(&input.satisfaction))
            .bind(Json(&input.experience))
            .bind(input.comments())
            .fetch_one(pool)
            .await
    }

    /// Find a response by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<FormResponseRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM form_responses WHERE id = $1");
        sqlx::query_as::<_, FormResponseRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every response, most recent first.
    pub async fn list(pool: &PgPool) -> Result<Vec<FormResponseRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM form_responses ORDER BY created_at DESC");
        sqlx::query_as::<_, FormResponseRow>(&query)
            .fetch_all(pool)
            .await
    }
}
