//! Domain logic for the patient-satisfaction survey service.
//!
//! Everything here is pure: record types, submission validation, and the
//! filter / sort / aggregate pipeline that every read endpoint runs over an
//! already-fetched response collection. Persistence lives in `survey-db`.

pub mod analytics;
pub mod error;
pub mod filter;
pub mod metrics;
pub mod report;
pub mod roles;
pub mod scoring;
pub mod sorting;
pub mod survey;
pub mod types;
pub mod validation;
