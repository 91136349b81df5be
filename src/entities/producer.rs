use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "DRY_PRODUCER")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Model {
    #[sea_orm(primary_key, column_name = "PID")]
    pub pid: i32,
    #[sea_orm(column_name = "FNAME")]
    pub fname: String,
    #[sea_orm(column_name = "LNAME")]
    pub lname: String,
    #[sea_orm(column_name = "STREET")]
    pub street: String,
    #[sea_orm(column_name = "CITY")]
    pub city: String,
    #[sea_orm(column_name = "STATE")]
    pub state: String,
    #[sea_orm(column_name = "ZIPCODE")]
    pub zipcode: String,
    #[sea_orm(column_name = "PHONE")]
    pub phone: String,
    #[sea_orm(column_name = "EMAIL")]
    pub email: String,
    #[sea_orm(column_name = "CID")]
    pub cid: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::country::Entity",
        from = "Column::Cid",
        to = "super::country::Column::Cid",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Country,
    #[sea_orm(has_many = "super::collaboration::Entity")]
    Collaboration,
}

impl Related<super::country::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Country.def()
    }
}

impl Related<super::collaboration::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Collaboration.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
