use sea_orm::entity::prelude::*;
use serde::Serialize;

/// Producer to production-house link, both directions many-to-many.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "DRY_COLLABORATION")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_name = "PID")]
    pub pid: i32,
    #[sea_orm(primary_key, auto_increment = false, column_name = "PHOUSE_ID")]
    pub phouse_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::producer::Entity",
        from = "Column::Pid",
        to = "super::producer::Column::Pid",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Producer,
    #[sea_orm(
        belongs_to = "super::phouse::Entity",
        from = "Column::PhouseId",
        to = "super::phouse::Column::PhouseId",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Phouse,
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
