use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, SqlErr,
    TransactionError, TransactionTrait, sea_query::Expr,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use eloquia_api_schema::{doctor_patient_links, doctors, entries, pairing_codes, patients, practices};
use eloquia_domain::account::{DoctorRole, PatientStatus};
use eloquia_domain::link::{LinkStatus, RedeemLinkAction};

use crate::domain::repository::{
    DoctorRepository, EntryRepository, LinkRepository, PairingCodeRepository, PatientRepository,
    PracticeRepository,
};
use crate::domain::types::{
    Doctor, Entry, EntryFilter, EntryOrder, Link, PairingCode, Patient, Practice, Redemption,
};
use crate::error::ApiError;

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

/// Map an insert result to `Ok(false)` on a unique violation.
fn inserted<T>(result: Result<T, DbErr>, what: &'static str) -> Result<bool, ApiError> {
    match result {
        Ok(_) => Ok(true),
        Err(e) if is_unique_violation(&e) => Ok(false),
        Err(e) => Err(anyhow::Error::new(e).context(what).into()),
    }
}

fn to_json<T: Serialize>(value: &Option<T>) -> anyhow::Result<Option<serde_json::Value>> {
    value
        .as_ref()
        .map(serde_json::to_value)
        .transpose()
        .context("encode json column")
}

fn from_json<T: DeserializeOwned>(value: Option<serde_json::Value>) -> anyhow::Result<Option<T>> {
    value
        .map(serde_json::from_value)
        .transpose()
        .context("decode json column")
}

// ── Doctor repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbDoctorRepository {
    pub db: DatabaseConnection,
}

impl DoctorRepository for DbDoctorRepository {
    async fn create(&self, doctor: &Doctor) -> Result<bool, ApiError> {
        let result = doctors::ActiveModel {
            id: Set(doctor.id),
            email: Set(doctor.email.clone()),
            display_name: Set(doctor.display_name.clone()),
            password_hash: Set(doctor.password_hash.clone()),
            role: Set(doctor.role.as_str().to_owned()),
            practice_id: Set(doctor.practice_id),
            created_at: Set(doctor.created_at),
            updated_at: Set(doctor.updated_at),
        }
        .insert(&self.db)
        .await;
        inserted(result, "create doctor")
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Doctor>, ApiError> {
        let model = doctors::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find doctor by id")?;
        Ok(model.map(doctor_from_model).transpose()?)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Doctor>, ApiError> {
        let model = doctors::Entity::find()
            .filter(doctors::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find doctor by email")?;
        Ok(model.map(doctor_from_model).transpose()?)
    }
}

fn doctor_from_model(model: doctors::Model) -> anyhow::Result<Doctor> {
    let role = DoctorRole::parse(&model.role)
        .with_context(|| format!("unknown doctor role {:?}", model.role))?;
    Ok(Doctor {
        id: model.id,
        email: model.email,
        display_name: model.display_name,
        password_hash: model.password_hash,
        role,
        practice_id: model.practice_id,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── Patient repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbPatientRepository {
    pub db: DatabaseConnection,
}

impl PatientRepository for DbPatientRepository {
    async fn create(&self, patient: &Patient) -> Result<bool, ApiError> {
        let result = patients::ActiveModel {
            id: Set(patient.id),
            display_name: Set(patient.display_name.clone()),
            birth_date: Set(patient.birth_date),
            status: Set(patient.status.as_str().to_owned()),
            email: Set(patient.email.clone()),
            password_hash: Set(patient.password_hash.clone()),
            patient_code: Set(patient.patient_code.clone()),
            last_entry_at: Set(patient.last_entry_at),
            created_at: Set(patient.created_at),
            updated_at: Set(patient.updated_at),
        }
        .insert(&self.db)
        .await;
        inserted(result, "create patient")
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Patient>, ApiError> {
        let model = patients::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find patient by id")?;
        Ok(model.map(patient_from_model).transpose()?)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Patient>, ApiError> {
        let model = patients::Entity::find()
            .filter(patients::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find patient by email")?;
        Ok(model.map(patient_from_model).transpose()?)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Patient>, ApiError> {
        let model = patients::Entity::find()
            .filter(patients::Column::PatientCode.eq(code))
            .one(&self.db)
            .await
            .context("find patient by code")?;
        Ok(model.map(patient_from_model).transpose()?)
    }

    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<Patient>, ApiError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = patients::Entity::find()
            .filter(patients::Column::Id.is_in(ids.iter().copied()))
            .order_by_asc(patients::Column::DisplayName)
            .all(&self.db)
            .await
            .context("find patients by ids")?;
        Ok(models
            .into_iter()
            .map(patient_from_model)
            .collect::<anyhow::Result<Vec<_>>>()?)
    }
}

fn patient_from_model(model: patients::Model) -> anyhow::Result<Patient> {
    let status = PatientStatus::parse(&model.status)
        .with_context(|| format!("unknown patient status {:?}", model.status))?;
    Ok(Patient {
        id: model.id,
        display_name: model.display_name,
        birth_date: model.birth_date,
        status,
        email: model.email,
        password_hash: model.password_hash,
        patient_code: model.patient_code,
        last_entry_at: model.last_entry_at,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── Practice repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbPracticeRepository {
    pub db: DatabaseConnection,
}

impl PracticeRepository for DbPracticeRepository {
    async fn create_with_owner(
        &self,
        practice: &Practice,
        owner_id: Uuid,
    ) -> Result<Doctor, ApiError> {
        let practice = practice.clone();
        let model = self
            .db
            .transaction::<_, doctors::Model, DbErr>(|txn| {
                Box::pin(async move {
                    practices::ActiveModel {
                        id: Set(practice.id),
                        name: Set(practice.name),
                        address: Set(practice.address),
                        logo_url: Set(practice.logo_url),
                        created_at: Set(practice.created_at),
                        updated_at: Set(practice.updated_at),
                    }
                    .insert(txn)
                    .await?;

                    doctors::ActiveModel {
                        id: Set(owner_id),
                        practice_id: Set(Some(practice.id)),
                        role: Set(DoctorRole::Owner.as_str().to_owned()),
                        updated_at: Set(practice.created_at),
                        ..Default::default()
                    }
                    .update(txn)
                    .await
                })
            })
            .await
            .context("create practice with owner")?;
        Ok(doctor_from_model(model)?)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Practice>, ApiError> {
        let model = practices::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find practice by id")?;
        Ok(model.map(practice_from_model))
    }
}

fn practice_from_model(model: practices::Model) -> Practice {
    Practice {
        id: model.id,
        name: model.name,
        address: model.address,
        logo_url: model.logo_url,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Link repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbLinkRepository {
    pub db: DatabaseConnection,
}

impl LinkRepository for DbLinkRepository {
    async fn create(&self, link: &Link) -> Result<bool, ApiError> {
        let result = link_active_model(link).insert(&self.db).await;
        inserted(result, "create link")
    }

    async fn approve(
        &self,
        id: Uuid,
        approved_by: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Option<Link>, ApiError> {
        let result = doctor_patient_links::ActiveModel {
            id: Set(id),
            status: Set(LinkStatus::Approved.as_str().to_owned()),
            approved_at: Set(Some(now)),
            approved_by_doctor_id: Set(Some(approved_by)),
            updated_at: Set(now),
            ..Default::default()
        }
        .update(&self.db)
        .await;
        match result {
            Ok(model) => Ok(Some(link_from_model(model)?)),
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(anyhow::Error::new(e).context("approve link").into()),
        }
    }

    async fn list_by_doctor(
        &self,
        doctor_id: Uuid,
        status: LinkStatus,
    ) -> Result<Vec<Link>, ApiError> {
        let models = doctor_patient_links::Entity::find()
            .filter(doctor_patient_links::Column::DoctorId.eq(doctor_id))
            .filter(doctor_patient_links::Column::Status.eq(status.as_str()))
            .order_by_asc(doctor_patient_links::Column::RequestedAt)
            .all(&self.db)
            .await
            .context("list links by doctor")?;
        Ok(models
            .into_iter()
            .map(link_from_model)
            .collect::<anyhow::Result<Vec<_>>>()?)
    }

    async fn has_approved(&self, doctor_id: Uuid, patient_id: Uuid) -> Result<bool, ApiError> {
        let count = doctor_patient_links::Entity::find()
            .filter(doctor_patient_links::Column::DoctorId.eq(doctor_id))
            .filter(doctor_patient_links::Column::PatientId.eq(patient_id))
            .filter(doctor_patient_links::Column::Status.eq(LinkStatus::Approved.as_str()))
            .count(&self.db)
            .await
            .context("check approved link")?;
        Ok(count > 0)
    }

    async fn latest_approved_for_patient(
        &self,
        patient_id: Uuid,
    ) -> Result<Option<Link>, ApiError> {
        let model = doctor_patient_links::Entity::find()
            .filter(doctor_patient_links::Column::PatientId.eq(patient_id))
            .filter(doctor_patient_links::Column::Status.eq(LinkStatus::Approved.as_str()))
            .order_by_desc(doctor_patient_links::Column::ApprovedAt)
            .one(&self.db)
            .await
            .context("find latest approved link")?;
        Ok(model.map(link_from_model).transpose()?)
    }

    async fn revoke_approved_for_patient(
        &self,
        patient_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<u64, ApiError> {
        let result = doctor_patient_links::Entity::update_many()
            .col_expr(
                doctor_patient_links::Column::Status,
                Expr::value(LinkStatus::Revoked.as_str()),
            )
            .col_expr(doctor_patient_links::Column::UpdatedAt, Expr::value(now))
            .filter(doctor_patient_links::Column::PatientId.eq(patient_id))
            .filter(doctor_patient_links::Column::Status.eq(LinkStatus::Approved.as_str()))
            .exec(&self.db)
            .await
            .context("revoke approved links")?;
        Ok(result.rows_affected)
    }
}

fn link_active_model(link: &Link) -> doctor_patient_links::ActiveModel {
    doctor_patient_links::ActiveModel {
        id: Set(link.id),
        doctor_id: Set(link.doctor_id),
        patient_id: Set(link.patient_id),
        status: Set(link.status.as_str().to_owned()),
        requested_at: Set(link.requested_at),
        approved_at: Set(link.approved_at),
        approved_by_doctor_id: Set(link.approved_by_doctor_id),
        created_at: Set(link.created_at),
        updated_at: Set(link.updated_at),
    }
}

fn link_from_model(model: doctor_patient_links::Model) -> anyhow::Result<Link> {
    let status = LinkStatus::parse(&model.status)
        .with_context(|| format!("unknown link status {:?}", model.status))?;
    Ok(Link {
        id: model.id,
        doctor_id: model.doctor_id,
        patient_id: model.patient_id,
        status,
        requested_at: model.requested_at,
        approved_at: model.approved_at,
        approved_by_doctor_id: model.approved_by_doctor_id,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── Pairing code repository ──────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbPairingCodeRepository {
    pub db: DatabaseConnection,
}

impl PairingCodeRepository for DbPairingCodeRepository {
    async fn expire_active_for_doctor(
        &self,
        doctor_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<u64, ApiError> {
        let result = pairing_codes::Entity::update_many()
            .col_expr(pairing_codes::Column::ExpiresAt, Expr::value(now))
            .filter(pairing_codes::Column::DoctorId.eq(doctor_id))
            .filter(pairing_codes::Column::ConsumedAt.is_null())
            .filter(pairing_codes::Column::ExpiresAt.gt(now))
            .exec(&self.db)
            .await
            .context("expire active pairing codes")?;
        Ok(result.rows_affected)
    }

    async fn exists_active(&self, code: &str, now: DateTime<Utc>) -> Result<bool, ApiError> {
        let count = pairing_codes::Entity::find()
            .filter(pairing_codes::Column::Code.eq(code))
            .filter(pairing_codes::Column::ConsumedAt.is_null())
            .filter(pairing_codes::Column::ExpiresAt.gt(now))
            .count(&self.db)
            .await
            .context("check active pairing code")?;
        Ok(count > 0)
    }

    async fn create(&self, code: &PairingCode) -> Result<bool, ApiError> {
        let result = pairing_codes::ActiveModel {
            id: Set(code.id),
            code: Set(code.code.clone()),
            doctor_id: Set(code.doctor_id),
            expires_at: Set(code.expires_at),
            consumed_at: Set(code.consumed_at),
            consumed_by_patient_id: Set(code.consumed_by_patient_id),
            created_at: Set(code.created_at),
        }
        .insert(&self.db)
        .await;
        inserted(result, "create pairing code")
    }

    async fn redeem(
        &self,
        code: &str,
        patient_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Redemption, ApiError> {
        let code = code.to_owned();
        self.db
            .transaction::<_, Redemption, ApiError>(|txn| {
                Box::pin(async move { redeem_in_txn(txn, &code, patient_id, now).await })
            })
            .await
            .map_err(|e| match e {
                TransactionError::Connection(e) => {
                    anyhow::Error::new(e).context("redeem pairing code").into()
                }
                TransactionError::Transaction(e) => e,
            })
    }
}

async fn redeem_in_txn(
    txn: &DatabaseTransaction,
    code: &str,
    patient_id: Uuid,
    now: DateTime<Utc>,
) -> Result<Redemption, ApiError> {
    let model = pairing_codes::Entity::find()
        .filter(pairing_codes::Column::Code.eq(code))
        .filter(pairing_codes::Column::ConsumedAt.is_null())
        .filter(pairing_codes::Column::ExpiresAt.gt(now))
        .order_by_desc(pairing_codes::Column::ExpiresAt)
        .one(txn)
        .await
        .context("find active pairing code")?
        .ok_or(ApiError::PairingCodeNotFound)?;

    // Conditional consume: zero rows means another redemption won.
    let consumed = pairing_codes::Entity::update_many()
        .col_expr(pairing_codes::Column::ConsumedAt, Expr::value(now))
        .col_expr(pairing_codes::Column::ConsumedByPatientId, Expr::value(patient_id))
        .filter(pairing_codes::Column::Id.eq(model.id))
        .filter(pairing_codes::Column::ConsumedAt.is_null())
        .filter(pairing_codes::Column::ExpiresAt.gt(now))
        .exec(txn)
        .await
        .context("consume pairing code")?;
    if consumed.rows_affected == 0 {
        return Err(ApiError::PairingCodeNotFound);
    }

    let doctor_id = model.doctor_id;
    let existing = doctor_patient_links::Entity::find()
        .filter(doctor_patient_links::Column::DoctorId.eq(doctor_id))
        .filter(doctor_patient_links::Column::PatientId.eq(patient_id))
        .one(txn)
        .await
        .context("find link for redemption")?
        .map(link_from_model)
        .transpose()?;

    let link = match (RedeemLinkAction::for_existing(existing.as_ref().map(|l| l.status)), existing) {
        (RedeemLinkAction::Create, _) => {
            let link = Link {
                id: Uuid::now_v7(),
                doctor_id,
                patient_id,
                status: LinkStatus::Approved,
                requested_at: now,
                approved_at: Some(now),
                approved_by_doctor_id: Some(doctor_id),
                created_at: now,
                updated_at: now,
            };
            link_active_model(&link)
                .insert(txn)
                .await
                .context("create approved link")?;
            link
        }
        (RedeemLinkAction::Upgrade, Some(mut link)) => {
            doctor_patient_links::ActiveModel {
                id: Set(link.id),
                status: Set(LinkStatus::Approved.as_str().to_owned()),
                approved_at: Set(Some(now)),
                approved_by_doctor_id: Set(Some(doctor_id)),
                updated_at: Set(now),
                ..Default::default()
            }
            .update(txn)
            .await
            .context("approve existing link")?;
            link.status = LinkStatus::Approved;
            link.approved_at = Some(now);
            link.approved_by_doctor_id = Some(doctor_id);
            link.updated_at = now;
            link
        }
        (_, Some(link)) => link,
        (_, None) => {
            return Err(anyhow::anyhow!("link action without an existing link").into());
        }
    };

    let mut code = pairing_code_from_model(model);
    code.consumed_at = Some(now);
    code.consumed_by_patient_id = Some(patient_id);
    Ok(Redemption { code, link })
}

fn pairing_code_from_model(model: pairing_codes::Model) -> PairingCode {
    PairingCode {
        id: model.id,
        code: model.code,
        doctor_id: model.doctor_id,
        expires_at: model.expires_at,
        consumed_at: model.consumed_at,
        consumed_by_patient_id: model.consumed_by_patient_id,
        created_at: model.created_at,
    }
}

// ── Entry repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbEntryRepository {
    pub db: DatabaseConnection,
}

impl EntryRepository for DbEntryRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Entry>, ApiError> {
        let model = entries::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find entry by id")?;
        Ok(model.map(entry_from_model).transpose()?)
    }

    async fn create(&self, entry: &Entry) -> Result<(), ApiError> {
        entry_active_model(entry)?
            .insert(&self.db)
            .await
            .context("create entry")?;
        Ok(())
    }

    async fn update(&self, entry: &Entry) -> Result<(), ApiError> {
        let mut model = entry_active_model(entry)?;
        model.patient_id = sea_orm::ActiveValue::NotSet;
        model.created_at = sea_orm::ActiveValue::NotSet;
        model.update(&self.db).await.context("update entry")?;
        Ok(())
    }

    async fn list_for_patient(
        &self,
        patient_id: Uuid,
        filter: EntryFilter,
        order: EntryOrder,
    ) -> Result<Vec<Entry>, ApiError> {
        let mut query = entries::Entity::find().filter(entries::Column::PatientId.eq(patient_id));
        if let Some(updated_since) = filter.updated_since {
            query = query.filter(entries::Column::UpdatedAt.gt(updated_since));
        }
        if let Some(from) = filter.from {
            query = query.filter(entries::Column::HappenedAt.gte(from));
        }
        if let Some(to) = filter.to {
            query = query.filter(entries::Column::HappenedAt.lte(to));
        }
        query = match order {
            EntryOrder::OldestFirst => query.order_by_asc(entries::Column::HappenedAt),
            EntryOrder::NewestFirst => query.order_by_desc(entries::Column::HappenedAt),
        };
        let models = query
            .all(&self.db)
            .await
            .context("list entries for patient")?;
        Ok(models
            .into_iter()
            .map(entry_from_model)
            .collect::<anyhow::Result<Vec<_>>>()?)
    }

    async fn recent_for_patients(
        &self,
        patient_ids: &[Uuid],
        limit: u64,
    ) -> Result<Vec<Entry>, ApiError> {
        if patient_ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = entries::Entity::find()
            .filter(entries::Column::PatientId.is_in(patient_ids.iter().copied()))
            .order_by_desc(entries::Column::HappenedAt)
            .limit(limit)
            .all(&self.db)
            .await
            .context("list recent entries")?;
        Ok(models
            .into_iter()
            .map(entry_from_model)
            .collect::<anyhow::Result<Vec<_>>>()?)
    }
}

fn entry_active_model(entry: &Entry) -> anyhow::Result<entries::ActiveModel> {
    Ok(entries::ActiveModel {
        id: Set(entry.id),
        patient_id: Set(entry.patient_id),
        happened_at: Set(entry.happened_at),
        situation: Set(entry.situation.clone()),
        emotions: Set(to_json(&entry.emotions)?),
        triggers: Set(to_json(&entry.triggers)?),
        techniques: Set(to_json(&entry.techniques)?),
        stutter_frequency: Set(entry.stutter_frequency),
        notes: Set(entry.notes.clone()),
        tags: Set(to_json(&entry.tags)?),
        created_at: Set(entry.created_at),
        updated_at: Set(entry.updated_at),
    })
}

fn entry_from_model(model: entries::Model) -> anyhow::Result<Entry> {
    Ok(Entry {
        id: model.id,
        patient_id: model.patient_id,
        happened_at: model.happened_at,
        situation: model.situation,
        emotions: from_json(model.emotions)?,
        triggers: from_json(model.triggers)?,
        techniques: from_json(model.techniques)?,
        stutter_frequency: model.stutter_frequency,
        notes: model.notes,
        tags: from_json(model.tags)?,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}
