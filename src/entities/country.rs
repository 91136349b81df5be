use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "DRY_COUNTRY")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Model {
    #[sea_orm(primary_key, column_name = "CID")]
    pub cid: i32,
    #[sea_orm(column_name = "CNAME")]
    pub cname: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::series_release_country::Entity")]
    SeriesReleaseCountry,
    #[sea_orm(has_many = "super::viewer::Entity")]
    Viewer,
    #[sea_orm(has_many = "super::producer::Entity")]
    Producer,
    #[sea_orm(has_many = "super::phouse::Entity")]
    Phouse,
}

impl Related<super::series_release_country::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SeriesReleaseCountry.def()
    }
}

impl Related<super::viewer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Viewer.def()
    }
}

impl Related<super::producer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Producer.def()
    }
}

impl Related<super::phouse::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Phouse.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
