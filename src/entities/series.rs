use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "DRY_SERIES")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Model {
    #[sea_orm(primary_key, column_name = "SID")]
    pub sid: i32,
    #[sea_orm(column_name = "SNAME")]
    pub sname: String,
    #[sea_orm(column_name = "NEPISODES")]
    pub nepisodes: i32,
    #[sea_orm(column_name = "ORI_LANG")]
    pub ori_lang: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::series_type::Entity")]
    SeriesType,
    #[sea_orm(has_many = "super::series_subtitle::Entity")]
    SeriesSubtitle,
    #[sea_orm(has_many = "super::series_dubbing::Entity")]
    SeriesDubbing,
    #[sea_orm(has_many = "super::series_release_country::Entity")]
    SeriesReleaseCountry,
    #[sea_orm(has_many = "super::episode::Entity")]
    Episode,
    #[sea_orm(has_many = "super::feedback::Entity")]
    Feedback,
    #[sea_orm(has_many = "super::contract::Entity")]
    Contract,
}

impl Related<super::series_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SeriesType.def()
    }
}

impl Related<super::series_subtitle::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SeriesSubtitle.def()
    }
}

impl Related<super::series_dubbing::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SeriesDubbing.def()
    }
}

impl Related<super::series_release_country::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SeriesReleaseCountry.def()
    }
}

impl Related<super::episode::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Episode.def()
    }
}

impl Related<super::feedback::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Feedback.def()
    }
}

impl Related<super::contract::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Contract.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
