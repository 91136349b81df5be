use anyhow::Result;
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, FromQueryResult, JoinType, QueryOrder,
    QuerySelect, RelationTrait, Set,
};

use crate::entities::{contract, phouse, prelude::*, series};

/// Contract listing row joined with the series and house names.
#[derive(Debug, Clone, FromQueryResult)]
pub struct ContractRow {
    pub contract_id: i32,
    pub issued_date: NaiveDate,
    pub episode_price: f64,
    pub is_renew: Option<String>,
    pub phouse_id: i32,
    pub phouse_name: String,
    pub sid: i32,
    pub sname: String,
}

#[derive(Debug, Clone)]
pub struct ContractInput {
    pub issued_date: NaiveDate,
    pub episode_price: f64,
    pub is_renew: Option<String>,
    pub phouse_id: i32,
    pub sid: i32,
}

pub struct ContractRepository {
    conn: DatabaseConnection,
}

impl ContractRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self) -> Result<Vec<ContractRow>> {
        let rows = Contract::find()
            .select_only()
            .column_as(contract::Column::ContractId, "contract_id")
            .column_as(contract::Column::IssuedDate, "issued_date")
            .column_as(contract::Column::EpisodePrice, "episode_price")
            .column_as(contract::Column::IsRenew, "is_renew")
            .column_as(contract::Column::PhouseId, "phouse_id")
            .column_as(phouse::Column::Name, "phouse_name")
            .column_as(contract::Column::Sid, "sid")
            .column_as(series::Column::Sname, "sname")
            .join(JoinType::InnerJoin, contract::Relation::Phouse.def())
            .join(JoinType::InnerJoin, contract::Relation::Series.def())
            .order_by_asc(contract::Column::ContractId)
            .into_model::<ContractRow>()
            .all(&self.conn)
            .await?;

        Ok(rows)
    }

    pub async fn create(&self, input: ContractInput) -> Result<i32> {
        let active = contract::ActiveModel {
            issued_date: Set(input.issued_date),
            episode_price: Set(input.episode_price),
            is_renew: Set(input.is_renew),
            phouse_id: Set(input.phouse_id),
            sid: Set(input.sid),
            ..Default::default()
        };

        let row = active.insert(&self.conn).await?;
        Ok(row.contract_id)
    }

    pub async fn update(&self, contract_id: i32, input: ContractInput) -> Result<bool> {
        let Some(row) = Contract::find_by_id(contract_id).one(&self.conn).await? else {
            return Ok(false);
        };

        let mut active: contract::ActiveModel = row.into();
        active.issued_date = Set(input.issued_date);
        active.episode_price = Set(input.episode_price);
        active.is_renew = Set(input.is_renew);
        active.phouse_id = Set(input.phouse_id);
        active.sid = Set(input.sid);
        active.update(&self.conn).await?;

        Ok(true)
    }

    pub async fn delete(&self, contract_id: i32) -> Result<bool> {
        let result = Contract::delete_by_id(contract_id).exec(&self.conn).await?;
        Ok(result.rows_affected > 0)
    }
}
