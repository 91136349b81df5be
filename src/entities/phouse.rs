use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "DRY_PHOUSE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Model {
    #[sea_orm(primary_key, column_name = "PHOUSE_ID")]
    pub phouse_id: i32,
    #[sea_orm(column_name = "NAME")]
    pub name: String,
    #[sea_orm(column_name = "STREET")]
    pub street: String,
    #[sea_orm(column_name = "CITY")]
    pub city: String,
    #[sea_orm(column_name = "STATE")]
    pub state: String,
    #[sea_orm(column_name = "ZIPCODE")]
    pub zipcode: String,
    #[sea_orm(column_name = "EST_YEAR")]
    pub est_year: i32,
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
    #[sea_orm(has_many = "super::contract::Entity")]
    Contract,
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

impl Related<super::contract::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Contract.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
