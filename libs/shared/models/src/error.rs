use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

/// Every way a clinic operation can be refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationError {
    #[error("Patient not found")]
    PatientNotRegistered,

    #[error("A patient with this CPF is already registered")]
    PatientAlreadyRegistered,

    #[error("Invalid CPF")]
    InvalidPatientDocument,

    #[error("Invalid name, it is shorter than the minimum length")]
    InvalidPatientName,

    #[error("Invalid birth date, the patient is younger than the minimum age")]
    InvalidPatientBirthdate,

    #[error("Patient already has a future appointment")]
    AlreadyScheduled,

    #[error("There is already an appointment at this time")]
    ScheduleConflict,

    #[error("Appointment not found")]
    ScheduleNotRegistered,

    #[error("Appointment must be scheduled in the future")]
    ScheduleDateInThePast,

    #[error("Start time must be before end time")]
    ScheduleInitialDateAfterEndDate,

    #[error("Start time must fall on a slot boundary")]
    ScheduleInitialTimeIncorrect,

    #[error("End time must fall on a slot boundary")]
    ScheduleEndTimeIncorrect,

    #[error("Appointment is outside the clinic opening hours")]
    ScheduleOutsideOpeningHours,

    #[error("Appointment does not belong to this patient")]
    ScheduleNotBelongPatient,
}

impl OperationError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            OperationError::PatientNotRegistered | OperationError::ScheduleNotRegistered => {
                StatusCode::NOT_FOUND
            }
            OperationError::PatientAlreadyRegistered
            | OperationError::AlreadyScheduled
            | OperationError::ScheduleConflict => StatusCode::CONFLICT,
            _ => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationStatus {
    Success,
    Failure,
}

/// Outcome of a clinic operation: success, or failure with the refused rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationResult {
    pub status: OperationStatus,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<OperationError>,
}

impl OperationResult {
    pub fn success() -> Self {
        Self {
            status: OperationStatus::Success,
            errors: Vec::new(),
        }
    }

    pub fn failure(error: OperationError) -> Self {
        Self::failures(vec![error])
    }

    pub fn failures(errors: Vec<OperationError>) -> Self {
        Self {
            status: OperationStatus::Failure,
            errors,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == OperationStatus::Success
    }
}

impl From<Result<(), OperationError>> for OperationResult {
    fn from(result: Result<(), OperationError>) -> Self {
        match result {
            Ok(()) => Self::success(),
            Err(error) => Self::failure(error),
        }
    }
}

impl From<Result<(), Vec<OperationError>>> for OperationResult {
    fn from(result: Result<(), Vec<OperationError>>) -> Self {
        match result {
            Ok(()) => Self::success(),
            Err(errors) => Self::failures(errors),
        }
    }
}

impl IntoResponse for OperationResult {
    fn into_response(self) -> Response {
        let status = match self.errors.first() {
            Some(error) if !self.is_success() => error.status_code(),
            _ => StatusCode::OK,
        };

        if !self.is_success() {
            tracing::warn!("Operation refused: {:?}", self.errors);
        }

        (status, Json(self)).into_response()
    }
}

/// Transport-level failures of the HTTP surface.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad Request: {0}")]
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        tracing::warn!("Request rejected: {}: {}", status, message);

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
