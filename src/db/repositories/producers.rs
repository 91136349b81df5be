use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, JoinType,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
};

use crate::entities::{collaboration, country, phouse, prelude::*, producer};

/// Producer listing row joined with the country name.
#[derive(Debug, Clone, FromQueryResult)]
pub struct ProducerRow {
    pub pid: i32,
    pub fname: String,
    pub lname: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zipcode: String,
    pub phone: String,
    pub email: String,
    pub cid: i32,
    pub cname: String,
}

#[derive(Debug, Clone)]
pub struct ProducerInput {
    pub fname: String,
    pub lname: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zipcode: String,
    pub phone: String,
    pub email: String,
    pub cid: i32,
}

/// Collaboration listing row with both display names.
#[derive(Debug, Clone, FromQueryResult)]
pub struct CollaborationRow {
    pub pid: i32,
    pub producer_fname: String,
    pub producer_lname: String,
    pub phouse_id: i32,
    pub phouse_name: String,
}

pub struct ProducerRepository {
    conn: DatabaseConnection,
}

impl ProducerRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self) -> Result<Vec<ProducerRow>> {
        let rows = Producer::find()
            .select_only()
            .column_as(producer::Column::Pid, "pid")
            .column_as(producer::Column::Fname, "fname")
            .column_as(producer::Column::Lname, "lname")
            .column_as(producer::Column::Street, "street")
            .column_as(producer::Column::City, "city")
            .column_as(producer::Column::State, "state")
            .column_as(producer::Column::Zipcode, "zipcode")
            .column_as(producer::Column::Phone, "phone")
            .column_as(producer::Column::Email, "email")
            .column_as(producer::Column::Cid, "cid")
            .column_as(country::Column::Cname, "cname")
            .join(JoinType::InnerJoin, producer::Relation::Country.def())
            .order_by_asc(producer::Column::Pid)
            .into_model::<ProducerRow>()
            .all(&self.conn)
            .await?;

        Ok(rows)
    }

    pub async fn create(&self, input: ProducerInput) -> Result<i32> {
        let active = producer::ActiveModel {
            fname: Set(input.fname),
            lname: Set(input.lname),
            street: Set(input.street),
            city: Set(input.city),
            state: Set(input.state),
            zipcode: Set(input.zipcode),
            phone: Set(input.phone),
            email: Set(input.email),
            cid: Set(input.cid),
            ..Default::default()
        };

        let row = active.insert(&self.conn).await?;
        Ok(row.pid)
    }

    pub async fn update(&self, pid: i32, input: ProducerInput) -> Result<bool> {
        let Some(row) = Producer::find_by_id(pid).one(&self.conn).await? else {
            return Ok(false);
        };

        let mut active: producer::ActiveModel = row.into();
        active.fname = Set(input.fname);
        active.lname = Set(input.lname);
        active.street = Set(input.street);
        active.city = Set(input.city);
        active.state = Set(input.state);
        active.zipcode = Set(input.zipcode);
        active.phone = Set(input.phone);
        active.email = Set(input.email);
        active.cid = Set(input.cid);
        active.update(&self.conn).await?;

        Ok(true)
    }

    /// Collaborations referencing the producer are removed first.
    pub async fn delete(&self, pid: i32) -> Result<bool> {
        if Producer::find_by_id(pid).one(&self.conn).await?.is_none() {
            return Ok(false);
        }

        Collaboration::delete_many()
            .filter(collaboration::Column::Pid.eq(pid))
            .exec(&self.conn)
            .await?;

        Producer::delete_by_id(pid).exec(&self.conn).await?;
        Ok(true)
    }

    pub async fn list_collaborations(&self) -> Result<Vec<CollaborationRow>> {
        let rows = Collaboration::find()
            .select_only()
            .column_as(collaboration::Column::Pid, "pid")
            .column_as(producer::Column::Fname, "producer_fname")
            .column_as(producer::Column::Lname, "producer_lname")
            .column_as(collaboration::Column::PhouseId, "phouse_id")
            .column_as(phouse::Column::Name, "phouse_name")
            .join(JoinType::InnerJoin, collaboration::Relation::Producer.def())
            .join(JoinType::InnerJoin, collaboration::Relation::Phouse.def())
            .order_by_asc(collaboration::Column::Pid)
            .order_by_asc(collaboration::Column::PhouseId)
            .into_model::<CollaborationRow>()
            .all(&self.conn)
            .await?;

        Ok(rows)
    }

    /// Returns false when the pair already exists.
    pub async fn add_collaboration(&self, pid: i32, phouse_id: i32) -> Result<bool> {
        let existing = Collaboration::find_by_id((pid, phouse_id))
            .one(&self.conn)
            .await?;
        if existing.is_some() {
            return Ok(false);
        }

        let active = collaboration::ActiveModel {
            pid: Set(pid),
            phouse_id: Set(phouse_id),
        };
        active.insert(&self.conn).await?;
        Ok(true)
    }

    pub async fn remove_collaboration(&self, pid: i32, phouse_id: i32) -> Result<bool> {
        let result = Collaboration::delete_by_id((pid, phouse_id))
            .exec(&self.conn)
            .await?;
        Ok(result.rows_affected > 0)
    }
}
