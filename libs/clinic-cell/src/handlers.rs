// libs/clinic-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDateTime;
use serde_json::{json, Value};
use tracing::debug;

use appointment_cell::{AgendaQuery, CancelAppointmentRequest, ScheduleAppointmentRequest};
use patient_cell::RegisterPatientRequest;
use shared_models::{AppError, Cpf, OperationResult};

use crate::models::PatientListQuery;
use crate::state::ClinicState;

fn parse_cpf(raw: &str) -> Result<Cpf, AppError> {
    raw.parse::<Cpf>()
        .map_err(|e| AppError::BadRequest(format!("Invalid CPF '{}': {}", raw, e)))
}

// ==============================================================================
// PATIENT HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn register_patient(
    State(state): State<Arc<ClinicState>>,
    Json(request): Json<RegisterPatientRequest>,
) -> OperationResult {
    let mut clinic = state.clinic.write().await;
    state.patients.register(&mut clinic, request)
}

#[axum::debug_handler]
pub async fn check_registration(
    State(state): State<Arc<ClinicState>>,
    Path(cpf): Path<String>,
) -> Result<OperationResult, AppError> {
    let cpf = parse_cpf(&cpf)?;
    let clinic = state.clinic.read().await;
    Ok(state.patients.can_register(&clinic, cpf))
}

#[axum::debug_handler]
pub async fn remove_patient(
    State(state): State<Arc<ClinicState>>,
    Path(cpf): Path<String>,
) -> Result<OperationResult, AppError> {
    let cpf = parse_cpf(&cpf)?;
    let mut clinic = state.clinic.write().await;
    Ok(state.patients.remove(&mut clinic, cpf))
}

#[axum::debug_handler]
pub async fn list_patients(
    State(state): State<Arc<ClinicState>>,
    Query(query): Query<PatientListQuery>,
) -> Json<Value> {
    let clinic = state.clinic.read().await;
    let patients = state.patients.list(&clinic, query.sort.unwrap_or_default());

    Json(json!({
        "patients": patients,
        "total": patients.len(),
    }))
}

// ==============================================================================
// APPOINTMENT HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn schedule_appointment(
    State(state): State<Arc<ClinicState>>,
    Json(request): Json<ScheduleAppointmentRequest>,
) -> OperationResult {
    let mut clinic = state.clinic.write().await;
    state.appointments.schedule(&mut clinic, request)
}

#[axum::debug_handler]
pub async fn check_scheduling(
    State(state): State<Arc<ClinicState>>,
    Path(cpf): Path<String>,
) -> Result<OperationResult, AppError> {
    let cpf = parse_cpf(&cpf)?;
    let clinic = state.clinic.read().await;
    Ok(state.appointments.can_schedule(&clinic, cpf))
}

#[axum::debug_handler]
pub async fn check_cancellation(
    State(state): State<Arc<ClinicState>>,
    Path(cpf): Path<String>,
) -> Result<OperationResult, AppError> {
    let cpf = parse_cpf(&cpf)?;
    let clinic = state.clinic.read().await;
    Ok(state.appointments.can_cancel(&clinic, cpf))
}

#[axum::debug_handler]
pub async fn cancel_appointment(
    State(state): State<Arc<ClinicState>>,
    Json(request): Json<CancelAppointmentRequest>,
) -> OperationResult {
    let mut clinic = state.clinic.write().await;
    state.appointments.cancel(&mut clinic, request)
}

/// Without `from`/`to` the whole agenda; with either, the inclusive window
/// over start instants, open on the missing side.
#[axum::debug_handler]
pub async fn list_appointments(
    State(state): State<Arc<ClinicState>>,
    Query(query): Query<AgendaQuery>,
) -> Result<Json<Value>, AppError> {
    let clinic = state.clinic.read().await;

    let appointments = match (query.from, query.to) {
        (None, None) => state.appointments.list(&clinic),
        (from, to) => {
            let from = from.unwrap_or(NaiveDateTime::MIN);
            let to = to.unwrap_or(NaiveDateTime::MAX);
            if from > to {
                return Err(AppError::BadRequest(format!(
                    "Range start {} is after range end {}",
                    from, to
                )));
            }
            state.appointments.list_in_range(&clinic, from, to)
        }
    };

    debug!("Returning {} agenda entries", appointments.len());

    Ok(Json(json!({
        "appointments": appointments,
        "total": appointments.len(),
    })))
}
