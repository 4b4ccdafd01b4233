//! Submission validation.
//!
//! Each check is a plain function returning `Result<(), CoreError>`; the
//! `validate_new_*` functions compose them and run once, at the write
//! boundary, before a record reaches the store. The `normalize_new_*`
//! functions run just before them.

use chrono::NaiveDate;

use crate::error::CoreError;
use crate::survey::{NewInfrastructureResponse, NewSatisfactionResponse, PatientInfo, RatingGroup};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const RATING_MIN: i32 = 1;
pub const RATING_MAX: i32 = 5;

/// Minimum patient name length (characters, after trimming).
pub const MIN_NAME_LENGTH: usize = 2;

pub const MIN_AGE: i32 = 0;
pub const MAX_AGE: i32 = 150;

/// Maximum length of the free-text comments field (characters).
pub const MAX_COMMENTS_LENGTH: usize = 5_000;

const CPF_LENGTH: usize = 11;

// ---------------------------------------------------------------------------
// National id (CPF)
// ---------------------------------------------------------------------------

/// Check an 11-digit CPF: numeric shape, not a repeated digit, and both
/// mod-11 check digits.
pub fn is_valid_cpf(cpf: &str) -> bool {
    if cpf.len() != CPF_LENGTH || !cpf.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    let digits: Vec<u32> = cpf.bytes().map(|b| u32::from(b - b'0')).collect();

    if digits.iter().all(|&d| d == digits[0]) {
        return false;
    }

    cpf_check_digit(&digits[..9]) == digits[9] && cpf_check_digit(&digits[..10]) == digits[10]
}

/// Weighted sum with weights `len+1 ..= 2`, then `11 - sum % 11`, with 10
/// and 11 collapsing to 0.
fn cpf_check_digit(digits: &[u32]) -> u32 {
    let top = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, d)| d * (top - i as u32))
        .sum();
    let check = 11 - sum % 11;
    if check >= 10 {
        0
    } else {
        check
    }
}

pub fn validate_cpf(cpf: &str) -> Result<(), CoreError> {
    if cpf.len() != CPF_LENGTH || !cpf.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CoreError::Validation(
            "patient_cpf must contain exactly 11 numeric digits".to_string(),
        ));
    }
    if !is_valid_cpf(cpf) {
        return Err(CoreError::Validation("patient_cpf is not a valid CPF".to_string()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Patient descriptors
// ---------------------------------------------------------------------------

pub fn validate_patient_name(name: &str) -> Result<(), CoreError> {
    if name.trim().chars().count() < MIN_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "patient_name must be at least {MIN_NAME_LENGTH} characters long"
        )));
    }
    Ok(())
}

pub fn validate_age(age: i32) -> Result<(), CoreError> {
    if !(MIN_AGE..=MAX_AGE).contains(&age) {
        return Err(CoreError::Validation(format!(
            "patient_age must be between {MIN_AGE} and {MAX_AGE} (got {age})"
        )));
    }
    Ok(())
}

pub fn validate_stay_dates(admission: NaiveDate, discharge: NaiveDate) -> Result<(), CoreError> {
    if discharge < admission {
        return Err(CoreError::Validation(format!(
            "discharge_date ({discharge}) must not be before admission_date ({admission})"
        )));
    }
    Ok(())
}

pub fn validate_patient(patient: &PatientInfo) -> Result<(), CoreError> {
    validate_patient_name(&patient.patient_name)?;
    validate_cpf(&patient.patient_cpf)?;
    validate_age(patient.patient_age)?;
    validate_stay_dates(patient.admission_date, patient.discharge_date)
}

// ---------------------------------------------------------------------------
// Answers
// ---------------------------------------------------------------------------

/// Every rating in the group must lie in `[RATING_MIN, RATING_MAX]`.
pub fn validate_ratings<G: RatingGroup>(group_name: &str, group: &G) -> Result<(), CoreError> {
    for (field, value) in G::FIELDS.iter().zip(group.values()) {
        if !(RATING_MIN..=RATING_MAX).contains(&value) {
            return Err(CoreError::Validation(format!(
                "{group_name}.{field} must be between {RATING_MIN} and {RATING_MAX} (got {value})"
            )));
        }
    }
    Ok(())
}

pub fn validate_department(department: &str) -> Result<(), CoreError> {
    if department.trim().is_empty() {
        return Err(CoreError::Validation(
            "evaluated_department must not be empty".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_comments(comments: &str) -> Result<(), CoreError> {
    let len = comments.chars().count();
    if len > MAX_COMMENTS_LENGTH {
        return Err(CoreError::Validation(format!(
            "comments exceed maximum length of {MAX_COMMENTS_LENGTH} characters (got {len})"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Trim the free-text keys of a submission. The department is stored
/// trimmed so the exact-match department filter can reach it.
pub fn normalize_new_satisfaction(input: &mut NewSatisfactionResponse) {
    normalize_patient(&mut input.patient);
    trim_in_place(&mut input.evaluated_department);
}

pub fn normalize_new_infrastructure(input: &mut NewInfrastructureResponse) {
    normalize_patient(&mut input.patient);
}

fn normalize_patient(patient: &mut PatientInfo) {
    trim_in_place(&mut patient.patient_name);
    trim_in_place(&mut patient.patient_cpf);
}

fn trim_in_place(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}

// ---------------------------------------------------------------------------
// Composed validators
// ---------------------------------------------------------------------------

pub fn validate_new_satisfaction(input: &NewSatisfactionResponse) -> Result<(), CoreError> {
    validate_patient(&input.patient)?;
    validate_department(&input.evaluated_department)?;
    validate_ratings("satisfaction", &input.satisfaction)?;
    validate_comments(input.comments())
}

pub fn validate_new_infrastructure(input: &NewInfrastructureResponse) -> Result<(), CoreError> {
    validate_patient(&input.patient)?;
    validate_ratings("infrastructure", &input.infrastructure)?;
    validate_comments(input.comments())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
