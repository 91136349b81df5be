use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "DRY_ADMIN")]
pub struct Model {
    #[sea_orm(primary_key, column_name = "ADMIN_ID")]
    pub admin_id: i32,
    #[sea_orm(unique, column_name = "USERNAME")]
    pub username: String,
    /// Argon2id password hash
    #[sea_orm(column_name = "PASSWORD_HASH")]
    pub password_hash: String,
    #[sea_orm(column_name = "FNAME")]
    pub fname: String,
    #[sea_orm(column_name = "LNAME")]
    pub lname: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::admin_history::Entity")]
    AdminHistory,
}

impl Related<super::admin_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AdminHistory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
