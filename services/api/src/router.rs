use std::time::Duration;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{
        Method,
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    },
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use eloquia_core::health::{health, healthz, readyz};
use eloquia_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    analytics::patient_analytics,
    docs::{docs_page, openapi_document},
    doctor::{get_doctor_me, login_doctor, logout_doctor, register_doctor},
    entry::{list_patient_entries, recent_entries, sync_entries},
    link::{approve_link, invite_link, list_patients, revoke_links},
    pairing_code::{create_pairing_code, redeem_pairing_code},
    patient::{get_my_doctor, get_patient_me, login_patient, logout_patient, register_patient},
    practice::create_practice,
    system::ready,
};
use crate::state::AppState;

/// Request bodies above 1 MiB are rejected.
const BODY_LIMIT_BYTES: usize = 1 << 20;

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
            Method::PATCH,
        ])
        .allow_headers([ACCEPT, AUTHORIZATION, CONTENT_TYPE])
        .max_age(Duration::from_secs(300))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Docs
        .route("/docs", get(docs_page))
        .route("/docs/doc.json", get(openapi_document))
        // Doctor account
        .route("/doctor/register", post(register_doctor))
        .route("/doctor/login", post(login_doctor))
        .route("/doctor/me", get(get_doctor_me))
        .route("/doctor/logout", post(logout_doctor))
        // Patient account
        .route("/patient/register", post(register_patient))
        .route("/patient/login", post(login_patient))
        .route("/patient/me", get(get_patient_me))
        .route("/patient/mydoctor", get(get_my_doctor))
        .route("/patient/logout", post(logout_patient))
        .route("/patient/entries/sync", get(sync_entries).post(sync_entries))
        // Practice
        .route("/practice", post(create_practice))
        // Links
        .route("/links/invite", post(invite_link))
        .route("/links/request", post(invite_link))
        .route("/links/{id}/approve", post(approve_link))
        .route("/links/pairing-code", post(create_pairing_code))
        .route("/links/pairing-code/redeem", post(redeem_pairing_code))
        .route("/links/revoke", post(revoke_links))
        // Linked patients
        .route("/patients", get(list_patients))
        .route("/patients/{id}/entries", get(list_patient_entries))
        .route("/patients/{id}/analytics", get(patient_analytics))
        .route("/entries/recent", get(recent_entries))
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(TraceLayer::new_for_http())
                .layer(propagate_request_id_layer())
                .layer(cors_layer()),
        )
        .with_state(state)
}
