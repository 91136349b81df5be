use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "DRY_CONTRACT")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Model {
    #[sea_orm(primary_key, column_name = "CONTRACT_ID")]
    pub contract_id: i32,
    #[sea_orm(column_name = "ISSUED_DATE")]
    pub issued_date: Date,
    #[sea_orm(column_name = "EPISODE_PRICE")]
    pub episode_price: f64,
    /// 'Y' when the contract auto-renews.
    #[sea_orm(column_name = "IS_RENEW")]
    pub is_renew: Option<String>,
    #[sea_orm(column_name = "PHOUSE_ID")]
    pub phouse_id: i32,
    #[sea_orm(column_name = "SID")]
    pub sid: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::phouse::Entity",
        from = "Column::PhouseId",
        to = "super::phouse::Column::PhouseId",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Phouse,
    #[sea_orm(
        belongs_to = "super::series::Entity",
        from = "Column::Sid",
        to = "super::series::Column::Sid",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Series,
}

impl Related<super::phouse::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Phouse.def()
    }
}

impl Related<super::series::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Series.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
