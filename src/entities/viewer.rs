use sea_orm::entity::prelude::*;

/// Subscriber account. Never serialized directly; handler DTOs pick the
/// fields they expose so the password hash and security answer stay out of
/// responses.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "DRY_VIEWER")]
pub struct Model {
    #[sea_orm(primary_key, column_name = "ACCOUNT")]
    pub account: i32,
    #[sea_orm(unique, column_name = "USERNAME")]
    pub username: String,
    /// Argon2id password hash
    #[sea_orm(column_name = "PASSWORD_HASH")]
    pub password_hash: String,
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
    /// Signup date, drives the monthly growth buckets.
    #[sea_orm(column_name = "OPEN_DATE")]
    pub open_date: Date,
    #[sea_orm(column_name = "MCHARGE")]
    pub mcharge: f64,
    #[sea_orm(column_name = "CID")]
    pub cid: i32,
    #[sea_orm(column_name = "SECURITY_QUESTION")]
    pub security_question: Option<String>,
    #[sea_orm(column_name = "SECURITY_ANSWER")]
    pub security_answer: Option<String>,
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
    #[sea_orm(has_many = "super::feedback::Entity")]
    Feedback,
}

impl Related<super::country::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Country.def()
    }
}

impl Related<super::feedback::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Feedback.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
