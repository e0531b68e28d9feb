// libs/clinic-cell/src/router.rs
use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::handlers;
use crate::state::ClinicState;

pub fn patient_routes(state: Arc<ClinicState>) -> Router {
    Router::new()
        .route("/", post(handlers::register_patient).get(handlers::list_patients))
        .route("/{cpf}", delete(handlers::remove_patient))
        .route("/{cpf}/registration", get(handlers::check_registration))
        .with_state(state)
}

pub fn appointment_routes(state: Arc<ClinicState>) -> Router {
    Router::new()
        .route("/", post(handlers::schedule_appointment).get(handlers::list_appointments))
        .route("/cancel", post(handlers::cancel_appointment))
        .route("/eligibility/{cpf}", get(handlers::check_scheduling))
        .route("/cancellation/{cpf}", get(handlers::check_cancellation))
        .with_state(state)
}

pub fn clinic_routes(state: Arc<ClinicState>) -> Router {
    Router::new()
        .nest("/patients", patient_routes(state.clone()))
        .nest("/appointments", appointment_routes(state))
}
