use anyhow::Result;
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::entities::{episode, prelude::*};

/// Episode fields accepted on create/update.
#[derive(Debug, Clone)]
pub struct EpisodeInput {
    pub e_num: i32,
    pub schedule_sdate: NaiveDate,
    pub schedule_edate: NaiveDate,
    pub nviewers: i32,
    pub interruption: String,
}

pub struct EpisodeRepository {
    conn: DatabaseConnection,
}

impl EpisodeRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list_for_series(&self, sid: i32) -> Result<Vec<episode::Model>> {
        let rows = Episode::find()
            .filter(episode::Column::Sid.eq(sid))
            .order_by_asc(episode::Column::ENum)
            .all(&self.conn)
            .await?;

        Ok(rows)
    }

    pub async fn create(&self, sid: i32, input: EpisodeInput) -> Result<i32> {
        let active = episode::ActiveModel {
            e_num: Set(input.e_num),
            schedule_sdate: Set(input.schedule_sdate),
            schedule_edate: Set(input.schedule_edate),
            nviewers: Set(input.nviewers),
            sid: Set(sid),
            interruption: Set(input.interruption),
            ..Default::default()
        };

        let row = active.insert(&self.conn).await?;
        Ok(row.eid)
    }

    /// Returns false when no episode has the given id.
    pub async fn update(&self, eid: i32, input: EpisodeInput) -> Result<bool> {
        let Some(row) = Episode::find_by_id(eid).one(&self.conn).await? else {
            return Ok(false);
        };

        let mut active: episode::ActiveModel = row.into();
        active.e_num = Set(input.e_num);
        active.schedule_sdate = Set(input.schedule_sdate);
        active.schedule_edate = Set(input.schedule_edate);
        active.nviewers = Set(input.nviewers);
        active.interruption = Set(input.interruption);
        active.update(&self.conn).await?;

        Ok(true)
    }

    pub async fn delete(&self, eid: i32) -> Result<bool> {
        let result = Episode::delete_by_id(eid).exec(&self.conn).await?;
        Ok(result.rows_affected > 0)
    }
}
