//! Query parameters shared by the questionnaire list, metrics, analytics
//! and report endpoints.

use serde::Deserialize;
use survey_core::error::CoreError;
use survey_core::filter::{parse_date_param, parse_text_param, ResponseFilter};
use survey_core::sorting::SortDirection;

/// `?startDate=&endDate=&department=&sortSatisfaction=`
///
/// Values stay raw strings here so that a malformed date comes back as a
/// `VALIDATION_ERROR` naming the parameter instead of a generic rejection.
/// Both the dashboard's camelCase names and snake_case are accepted.
#[derive(Debug, Default, Deserialize)]
pub struct ResponseQueryParams {
    #[serde(default, alias = "startDate")]
    pub start_date: Option<String>,
    #[serde(default, alias = "endDate")]
    pub end_date: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default, alias = "evaluatedDepartment")]
    pub evaluated_department: Option<String>,
    #[serde(default, alias = "sortSatisfaction")]
    pub sort_satisfaction: Option<String>,
}

impl ResponseQueryParams {
    /// Build the filter for questionnaire 1, which has a department field.
    pub fn filter(&self) -> Result<ResponseFilter, CoreError> {
        ResponseFilter::new(
            parse_date_param("startDate", self.start_date.as_deref())?,
            parse_date_param("endDate", self.end_date.as_deref())?,
            self.department()?,
        )
    }

    /// `department` and `evaluatedDepartment` name the same filter; at most
    /// one of them may carry a value.
    fn department(&self) -> Result<Option<String>, CoreError> {
        match (
            parse_text_param(self.department.as_deref()),
            parse_text_param(self.evaluated_department.as_deref()),
        ) {
            (Some(_), Some(_)) => Err(CoreError::Validation(
                "department and evaluatedDepartment are both set; send only one".to_string(),
            )),
            (department, evaluated) => Ok(department.or(evaluated)),
        }
    }

    /// Build the filter for questionnaire 2. A department is ignored there.
    pub fn filter_without_department(&self) -> Result<ResponseFilter, CoreError> {
        ResponseFilter::new(
            parse_date_param("startDate", self.start_date.as_deref())?,
            parse_date_param("endDate", self.end_date.as_deref())?,
            None,
        )
    }

    pub fn sort(&self) -> Result<SortDirection, CoreError> {
        SortDirection::parse(self.sort_satisfaction.as_deref())
    }
}
