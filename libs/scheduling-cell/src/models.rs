use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use patient_cell::models::{NewPatient, PatientError};
use shared_models::ApiError;
use specialist_cell::models::SpecialistLookupError;

/// Specialist code used for exams when the specialist list comes back empty.
/// A placeholder assignment, not a scheduling decision.
pub const FALLBACK_EXAM_SPECIALIST_CODE: i64 = 1;

/// Consultation form as submitted by the portal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsultationRequest {
    pub patient: NewPatient,
    pub specialty: String,
    /// Display name of the chosen specialist; resolved by exact match.
    pub specialist_name: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Exam form as submitted by the portal. Either a period of day or an
/// explicit time may be given; the period wins when both are present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamRequest {
    pub patient: NewPatient,
    pub exam_type: String,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<ExamPeriod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExamPeriod {
    #[serde(alias = "manha")]
    Morning,
    #[serde(alias = "tarde")]
    Afternoon,
}

impl ExamPeriod {
    pub fn start_time(&self) -> NaiveTime {
        match self {
            ExamPeriod::Morning => NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            ExamPeriod::Afternoon => NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
        }
    }
}

#[derive(Error, Debug)]
pub enum SchedulingError {
    #[error("could not resolve the patient: {0}")]
    Patient(#[from] PatientError),

    #[error("could not resolve the specialist: {0}")]
    Specialist(#[from] SpecialistLookupError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("patient record came back without an identifier")]
    MissingPatientCode,
}
