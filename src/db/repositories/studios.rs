use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, JoinType,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
};

use crate::entities::{collaboration, contract, country, phouse, prelude::*};

/// Production-house listing row joined with the country name.
#[derive(Debug, Clone, FromQueryResult)]
pub struct StudioRow {
    pub phouse_id: i32,
    pub name: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zipcode: String,
    pub est_year: i32,
    pub cid: i32,
    pub cname: String,
}

#[derive(Debug, Clone)]
pub struct StudioInput {
    pub name: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zipcode: String,
    pub est_year: i32,
    pub cid: i32,
}

pub struct StudioRepository {
    conn: DatabaseConnection,
}

impl StudioRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self) -> Result<Vec<StudioRow>> {
        let rows = Phouse::find()
            .select_only()
            .column_as(phouse::Column::PhouseId, "phouse_id")
            .column_as(phouse::Column::Name, "name")
            .column_as(phouse::Column::Street, "street")
            .column_as(phouse::Column::City, "city")
            .column_as(phouse::Column::State, "state")
            .column_as(phouse::Column::Zipcode, "zipcode")
            .column_as(phouse::Column::EstYear, "est_year")
            .column_as(phouse::Column::Cid, "cid")
            .column_as(country::Column::Cname, "cname")
            .join(JoinType::InnerJoin, phouse::Relation::Country.def())
            .order_by_asc(phouse::Column::PhouseId)
            .into_model::<StudioRow>()
            .all(&self.conn)
            .await?;

        Ok(rows)
    }

    pub async fn create(&self, input: StudioInput) -> Result<i32> {
        let active = phouse::ActiveModel {
            name: Set(input.name),
            street: Set(input.street),
            city: Set(input.city),
            state: Set(input.state),
            zipcode: Set(input.zipcode),
            est_year: Set(input.est_year),
            cid: Set(input.cid),
            ..Default::default()
        };

        let row = active.insert(&self.conn).await?;
        Ok(row.phouse_id)
    }

    pub async fn update(&self, phouse_id: i32, input: StudioInput) -> Result<bool> {
        let Some(row) = Phouse::find_by_id(phouse_id).one(&self.conn).await? else {
            return Ok(false);
        };

        let mut active: phouse::ActiveModel = row.into();
        active.name = Set(input.name);
        active.street = Set(input.street);
        active.city = Set(input.city);
        active.state = Set(input.state);
        active.zipcode = Set(input.zipcode);
        active.est_year = Set(input.est_year);
        active.cid = Set(input.cid);
        active.update(&self.conn).await?;

        Ok(true)
    }

    /// Contracts that still reference the house block deletion.
    pub async fn contract_count(&self, phouse_id: i32) -> Result<u64> {
        let count = Contract::find()
            .filter(contract::Column::PhouseId.eq(phouse_id))
            .count(&self.conn)
            .await?;

        Ok(count)
    }

    /// Collaborations referencing the house are removed first.
    pub async fn delete(&self, phouse_id: i32) -> Result<bool> {
        if Phouse::find_by_id(phouse_id)
            .one(&self.conn)
            .await?
            .is_none()
        {
            return Ok(false);
        }

        Collaboration::delete_many()
            .filter(collaboration::Column::PhouseId.eq(phouse_id))
            .exec(&self.conn)
            .await?;

        Phouse::delete_by_id(phouse_id).exec(&self.conn).await?;
        Ok(true)
    }
}
