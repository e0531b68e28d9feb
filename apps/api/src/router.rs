use std::sync::Arc;

use axum::{routing::get, Router};

use clinic_cell::router::clinic_routes;
use clinic_cell::ClinicState;

pub fn create_router(state: Arc<ClinicState>) -> Router {
    Router::new()
        .route("/", get(|| async { "Clinic API is running!" }))
        .merge(clinic_routes(state))
}
