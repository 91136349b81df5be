use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "DRY_GENRE_TYPE")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_name = "TNAME")]
    pub tname: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::series_type::Entity")]
    SeriesType,
}

impl Related<super::series_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SeriesType.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
