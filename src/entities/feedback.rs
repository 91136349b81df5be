use sea_orm::entity::prelude::*;
use serde::Serialize;

/// One live review per (viewer, series). Re-submitting overwrites the row
/// and stamps `FDATE` to today.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "DRY_FEEDBACK")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_name = "ACCOUNT")]
    pub account: i32,
    #[sea_orm(primary_key, auto_increment = false, column_name = "SID")]
    pub sid: i32,
    /// 1 to 5 inclusive.
    #[sea_orm(column_name = "RATE")]
    pub rate: i32,
    #[sea_orm(column_name = "FTEXT")]
    pub ftext: String,
    #[sea_orm(column_name = "FDATE")]
    pub fdate: Date,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::viewer::Entity",
        from = "Column::Account",
        to = "super::viewer::Column::Account",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Viewer,
    #[sea_orm(
        belongs_to = "super::series::Entity",
        from = "Column::Sid",
        to = "super::series::Column::Sid",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Series,
}

impl Related<super::viewer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Viewer.def()
    }
}

impl Related<super::series::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Series.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
