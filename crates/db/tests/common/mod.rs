//! Sample submissions shared by the store tests.

#![allow(dead_code)]

use chrono::NaiveDate;
use survey_core::survey::{
    ExperienceAnswers, Gender, InfrastructureRatings, NewInfrastructureResponse,
    NewSatisfactionResponse, PatientInfo, PatientSafetyAnswers, SafetyAnswer,
    SatisfactionRatings,
};

pub fn patient(name: &str) -> PatientInfo {
    PatientInfo {
        patient_name: name.to_string(),
        patient_cpf: "52998224725".to_string(),
        patient_age: 47,
        patient_gender: Gender::Female,
        admission_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        discharge_date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
    }
}

/// Questionnaire 1 submission with every rating set to `rating`.
pub fn satisfaction(name: &str, department: &str, rating: i32) -> NewSatisfactionResponse {
    NewSatisfactionResponse {
        patient: patient(name),
        evaluated_department: department.to_string(),
        satisfaction: SatisfactionRatings {
            overall_care: rating,
            nursing_care: rating,
            medical_care: rating,
            welcoming: rating,
            cleanliness: rating,
            comfort: rating,
            response_time: rating,
            would_recommend: rating,
            overall_satisfaction: rating,
        },
        experience: ExperienceAnswers {
            professionals_identified: true,
            name_verified: true,
            treatment_explained: false,
            participated_in_decisions: true,
            medication_instructions_clear: true,
            discharge_orientation_complete: false,
            knew_who_to_ask: true,
            privacy_respected: true,
        },
        comments: Some("Atendimento excelente".to_string()),
    }
}

/// Questionnaire 2 submission with every rating set to `rating`.
pub fn infrastructure(name: &str, rating: i32, bracelet: SafetyAnswer) -> NewInfrastructureResponse {
    NewInfrastructureResponse {
        patient: patient(name),
        infrastructure: InfrastructureRatings {
            hospital_overall_infrastructure: rating,
            common_areas_adequacy: rating,
            equipment_safety: rating,
            equipment_condition: rating,
            bed_comfort: rating,
            accommodation_needs: rating,
            meal_quality: rating,
            meal_timeliness: rating,
            nutrition_team_care: rating,
            hospital_signage: rating,
            team_communication_clarity: rating,
            medical_team_relationship: rating,
            diagnosis_explanation: rating,
            felt_heard_by_medical_team: rating,
            nursing_team_care: rating,
            nursing_team_availability: rating,
            felt_safe_with_care: rating,
            technology_access: rating,
            connectivity_satisfaction: rating,
            laundry_cleanliness_organization: rating,
            laundry_change_frequency: rating,
        },
        patient_safety: PatientSafetyAnswers {
            used_identification_bracelet: bracelet,
            bracelet_info_correct: SafetyAnswer::Yes,
            bed_identification: SafetyAnswer::Partially,
            identity_checked_before_procedures: SafetyAnswer::No,
        },
        comments: None,
    }
}
