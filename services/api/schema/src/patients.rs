use sea_orm::entity::prelude::*;

/// Patient record. Invite-created patients have no email/password until they
/// register; `status` stores `"Active"` / `"Inactive"`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "patients")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub display_name: String,
    pub birth_date: Option<Date>,
    pub status: String,
    #[sea_orm(unique)]
    pub email: Option<String>,
    pub password_hash: Option<String>,
    #[sea_orm(unique)]
    pub patient_code: Option<String>,
    pub last_entry_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::doctor_patient_links::Entity")]
    DoctorPatientLinks,
    #[sea_orm(has_many = "super::entries::Entity")]
    Entries,
}

impl Related<super::doctor_patient_links::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DoctorPatientLinks.def()
    }
}

impl Related<super::entries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Entries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
