use sea_orm::entity::prelude::*;
use serde::Serialize;

/// Append-only audit row, one per mutating admin action. Never updated.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "DRY_ADMIN_HISTORY")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Model {
    #[sea_orm(primary_key, column_name = "HID")]
    pub hid: i64,
    #[sea_orm(column_name = "ADMIN_ID")]
    pub admin_id: i32,
    #[sea_orm(column_name = "ACTION_TS")]
    pub action_ts: String,
    #[sea_orm(column_name = "TARGET_TABLE")]
    pub target_table: String,
    /// INSERT, UPDATE or DELETE.
    #[sea_orm(column_name = "ACTION_TYPE")]
    pub action_type: String,
    /// The literal statement the action executed.
    #[sea_orm(column_name = "SQL_TEXT")]
    pub sql_text: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::admin::Entity",
        from = "Column::AdminId",
        to = "super::admin::Column::AdminId",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Admin,
}

impl Related<super::admin::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Admin.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
