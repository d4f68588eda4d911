use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::PracticeRepository;
use crate::domain::types::{Doctor, Practice};
use crate::error::ApiError;

pub struct CreatePracticeInput {
    pub name: String,
    pub address: Option<String>,
    pub logo_url: Option<String>,
}

// ── CreatePractice ───────────────────────────────────────────────────────────

pub struct CreatePracticeUseCase<R: PracticeRepository> {
    pub repo: R,
}

impl<R: PracticeRepository> CreatePracticeUseCase<R> {
    /// Create a practice and assign `doctor_id` to it as Owner.
    pub async fn execute(
        &self,
        doctor_id: Uuid,
        input: CreatePracticeInput,
    ) -> Result<(Practice, Doctor), ApiError> {
        let name = input.name.trim().to_owned();
        if name.is_empty() {
            return Err(ApiError::validation("name is required"));
        }
        let now = Utc::now();
        let practice = Practice {
            id: Uuid::now_v7(),
            name,
            address: input.address.map(|s| s.trim().to_owned()),
            logo_url: input.logo_url.map(|s| s.trim().to_owned()),
            created_at: now,
            updated_at: now,
        };
        let doctor = self.repo.create_with_owner(&practice, doctor_id).await?;
        tracing::info!(practice_id = %practice.id, doctor_id = %doctor_id, "practice created");
        Ok((practice, doctor))
    }
}
