use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use eloquia_domain::analytics::{PatientAnalytics, RangeDays};

use crate::auth::CurrentDoctor;
use crate::error::ApiError;
use crate::handlers::link::parse_patient_id;
use crate::handlers::query::ApiQuery;
use crate::state::AppState;
use crate::usecase::analytics::PatientAnalyticsUseCase;

// ── GET /patients/{id}/analytics ─────────────────────────────────────────────

#[derive(Deserialize)]
pub struct AnalyticsQuery {
    pub range: Option<String>,
}

pub async fn patient_analytics(
    CurrentDoctor(doctor): CurrentDoctor,
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiQuery(query): ApiQuery<AnalyticsQuery>,
) -> Result<Json<PatientAnalytics>, ApiError> {
    let patient_id = parse_patient_id(&id)?;
    let usecase = PatientAnalyticsUseCase {
        links: state.link_repo(),
        entries: state.entry_repo(),
    };
    let analytics = usecase
        .execute(
            doctor.id,
            patient_id,
            RangeDays::parse(query.range.as_deref()),
        )
        .await?;
    Ok(Json(analytics))
}
