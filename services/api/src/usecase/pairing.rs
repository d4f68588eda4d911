use chrono::{Duration, Utc};
use rand::RngExt;
use uuid::Uuid;

use eloquia_domain::pairing::{
    MAX_GENERATION_ATTEMPTS, PAIRING_CODE_SPACE, PAIRING_CODE_TTL_SECS, PairingCodeValue,
};

use crate::domain::repository::PairingCodeRepository;
use crate::domain::types::{PairingCode, Redemption};
use crate::error::ApiError;

fn generate_code() -> Option<PairingCodeValue> {
    let mut rng = rand::rng();
    PairingCodeValue::from_number(rng.random_range(0..PAIRING_CODE_SPACE))
}

// ── CreatePairingCode ────────────────────────────────────────────────────────

pub struct CreatePairingCodeUseCase<R: PairingCodeRepository> {
    pub repo: R,
}

impl<R: PairingCodeRepository> CreatePairingCodeUseCase<R> {
    /// Expire the doctor's active codes, then issue a fresh code that no
    /// other active code shares.
    pub async fn execute(&self, doctor_id: Uuid) -> Result<PairingCode, ApiError> {
        let now = Utc::now();
        let expired = self.repo.expire_active_for_doctor(doctor_id, now).await?;
        if expired > 0 {
            tracing::debug!(doctor_id = %doctor_id, expired, "expired previous pairing codes");
        }

        for attempt in 1..=MAX_GENERATION_ATTEMPTS {
            let Some(value) = generate_code() else {
                continue;
            };
            if self.repo.exists_active(value.as_str(), now).await? {
                tracing::debug!(attempt, "pairing code collision");
                continue;
            }
            let code = PairingCode {
                id: Uuid::now_v7(),
                code: value.into_string(),
                doctor_id,
                expires_at: now + Duration::seconds(PAIRING_CODE_TTL_SECS),
                consumed_at: None,
                consumed_by_patient_id: None,
                created_at: now,
            };
            if self.repo.create(&code).await? {
                tracing::info!(doctor_id = %doctor_id, expires_at = %code.expires_at, "pairing code issued");
                return Ok(code);
            }
            tracing::debug!(attempt, "pairing code insert conflicted");
        }

        Err(ApiError::PairingCodeUnavailable)
    }
}

// ── RedeemPairingCode ────────────────────────────────────────────────────────

pub struct RedeemPairingCodeUseCase<R: PairingCodeRepository> {
    pub repo: R,
}

impl<R: PairingCodeRepository> RedeemPairingCodeUseCase<R> {
    /// Consume the code for `patient_id` and approve the link to its doctor.
    pub async fn execute(&self, patient_id: Uuid, raw_code: &str) -> Result<Redemption, ApiError> {
        let code = PairingCodeValue::normalize(raw_code)
            .ok_or_else(|| ApiError::validation("code must be 6 digits"))?;
        let redemption = self.repo.redeem(code.as_str(), patient_id, Utc::now()).await?;
        tracing::info!(
            patient_id = %patient_id,
            doctor_id = %redemption.code.doctor_id,
            link_id = %redemption.link.id,
            "pairing code redeemed"
        );
        Ok(redemption)
    }
}
