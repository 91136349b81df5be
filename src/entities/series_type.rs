use sea_orm::entity::prelude::*;

/// Genre tag on a series. Tags are stored by name and validated against
/// the `DRY_GENRE_TYPE` catalog.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "DRY_SERIES_TYPE")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_name = "SID")]
    pub sid: i32,
    #[sea_orm(primary_key, auto_increment = false, column_name = "TNAME")]
    pub tname: String,
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
    #[sea_orm(
        belongs_to = "super::genre_type::Entity",
        from = "Column::Tname",
        to = "super::genre_type::Column::Tname",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    GenreType,
}

impl Related<super::series::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Series.def()
    }
}

impl Related<super::genre_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GenreType.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
