use sea_orm::entity::prelude::*;

/// Doctor account. `role` stores `"Owner"` / `"Staff"`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "doctors")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    pub display_name: String,
    pub password_hash: String,
    pub role: String,
    pub practice_id: Option<Uuid>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::practices::Entity",
        from = "Column::PracticeId",
        to = "super::practices::Column::Id",
        on_delete = "SetNull"
    )]
    Practice,
    #[sea_orm(has_many = "super::doctor_patient_links::Entity")]
    DoctorPatientLinks,
    #[sea_orm(has_many = "super::pairing_codes::Entity")]
    PairingCodes,
}

impl Related<super::practices::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Practice.def()
    }
}

impl Related<super::doctor_patient_links::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DoctorPatientLinks.def()
    }
}

impl Related<super::pairing_codes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PairingCodes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
