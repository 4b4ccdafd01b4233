pub mod form2_response;
pub mod form_response;
pub mod user;

use serde::Serialize;
use survey_core::error::CoreError;

/// Encode a typed group for a JSONB column.
pub(crate) fn encode_group<T: Serialize>(column: &str, group: &T) -> Result<serde_json::Value, CoreError> {
    serde_json::to_value(group).map_err(|e| CoreError::Internal(format!("{column}: {e}")))
}
