use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "DRY_EPISODE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Model {
    #[sea_orm(primary_key, column_name = "EID")]
    pub eid: i32,
    #[sea_orm(column_name = "E_NUM")]
    pub e_num: i32,
    #[sea_orm(column_name = "SCHEDULE_SDATE")]
    pub schedule_sdate: Date,
    #[sea_orm(column_name = "SCHEDULE_EDATE")]
    pub schedule_edate: Date,
    #[sea_orm(column_name = "NVIEWERS")]
    pub nviewers: i32,
    #[sea_orm(column_name = "SID")]
    pub sid: i32,
    /// 'Y' when the broadcast was interrupted, 'N' otherwise.
    #[sea_orm(column_name = "INTERRUPTION")]
    pub interruption: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::series::Entity",
        from = "Column::Sid",
        to = "super::series::Column::Sid",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Series,
}

impl Related<super::series::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Series.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
