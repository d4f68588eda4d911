use sea_orm::entity::prelude::*;

/// Patient journal entry. Ids are supplied by the mobile client on sync.
///
/// JSON columns: `emotions` is `[{name, intensity}]`; `triggers`,
/// `techniques` and `tags` are string arrays.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "entries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub patient_id: Uuid,
    pub happened_at: chrono::DateTime<chrono::Utc>,
    pub situation: Option<String>,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub emotions: Option<Json>,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub triggers: Option<Json>,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub techniques: Option<Json>,
    pub stutter_frequency: Option<i32>,
    pub notes: Option<String>,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub tags: Option<Json>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::patients::Entity",
        from = "Column::PatientId",
        to = "super::patients::Column::Id",
        on_delete = "Cascade"
    )]
    Patient,
    #[sea_orm(has_many = "super::entry_shares::Entity")]
    EntryShares,
    #[sea_orm(has_many = "super::comments::Entity")]
    Comments,
}

impl Related<super::patients::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Patient.def()
    }
}

impl Related<super::entry_shares::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EntryShares.def()
    }
}

impl Related<super::comments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
