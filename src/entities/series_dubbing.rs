use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "DRY_SERIES_DUBBING")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_name = "SID")]
    pub sid: i32,
    #[sea_orm(primary_key, auto_increment = false, column_name = "LNAME")]
    pub lname: String,
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
