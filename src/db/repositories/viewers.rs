use anyhow::Result;
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, JoinType,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
};
use std::collections::HashMap;

use crate::entities::{country, feedback, prelude::*, viewer};

/// Admin listing row: profile columns, country name, live feedback count.
#[derive(Debug, Clone)]
pub struct ViewerAdminRow {
    pub account: i32,
    pub username: String,
    pub fname: String,
    pub lname: String,
    pub city: String,
    pub state: String,
    pub open_date: NaiveDate,
    pub mcharge: f64,
    pub cid: i32,
    pub cname: String,
    pub feedback_count: i64,
}

/// Profile row joined with the country name.
#[derive(Debug, Clone, FromQueryResult)]
pub struct ViewerProfileRow {
    pub account: i32,
    pub username: String,
    pub fname: String,
    pub lname: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zipcode: String,
    pub open_date: NaiveDate,
    pub mcharge: f64,
    pub cid: i32,
    pub cname: String,
}

/// Fields an admin may change on a viewer account.
#[derive(Debug, Clone)]
pub struct ViewerAdminUpdate {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zipcode: String,
    pub mcharge: f64,
    pub cid: i32,
}

pub struct ViewerRepository {
    conn: DatabaseConnection,
}

impl ViewerRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list_admin(&self) -> Result<Vec<ViewerAdminRow>> {
        #[derive(FromQueryResult)]
        struct Row {
            account: i32,
            username: String,
            fname: String,
            lname: String,
            city: String,
            state: String,
            open_date: NaiveDate,
            mcharge: f64,
            cid: i32,
            cname: String,
        }

        let rows = Viewer::find()
            .select_only()
            .column_as(viewer::Column::Account, "account")
            .column_as(viewer::Column::Username, "username")
            .column_as(viewer::Column::Fname, "fname")
            .column_as(viewer::Column::Lname, "lname")
            .column_as(viewer::Column::City, "city")
            .column_as(viewer::Column::State, "state")
            .column_as(viewer::Column::OpenDate, "open_date")
            .column_as(viewer::Column::Mcharge, "mcharge")
            .column_as(viewer::Column::Cid, "cid")
            .column_as(country::Column::Cname, "cname")
            .join(JoinType::InnerJoin, viewer::Relation::Country.def())
            .order_by_asc(viewer::Column::Account)
            .into_model::<Row>()
            .all(&self.conn)
            .await?;

        let counts = self.feedback_count_map().await?;

        Ok(rows
            .into_iter()
            .map(|r| ViewerAdminRow {
                feedback_count: counts.get(&r.account).copied().unwrap_or(0),
                account: r.account,
                username: r.username,
                fname: r.fname,
                lname: r.lname,
                city: r.city,
                state: r.state,
                open_date: r.open_date,
                mcharge: r.mcharge,
                cid: r.cid,
                cname: r.cname,
            })
            .collect())
    }

    pub async fn get_model(&self, account: i32) -> Result<Option<viewer::Model>> {
        let row = Viewer::find_by_id(account).one(&self.conn).await?;
        Ok(row)
    }

    pub async fn get_profile(&self, account: i32) -> Result<Option<ViewerProfileRow>> {
        let row = Viewer::find()
            .select_only()
            .column_as(viewer::Column::Account, "account")
            .column_as(viewer::Column::Username, "username")
            .column_as(viewer::Column::Fname, "fname")
            .column_as(viewer::Column::Lname, "lname")
            .column_as(viewer::Column::Street, "street")
            .column_as(viewer::Column::City, "city")
            .column_as(viewer::Column::State, "state")
            .column_as(viewer::Column::Zipcode, "zipcode")
            .column_as(viewer::Column::OpenDate, "open_date")
            .column_as(viewer::Column::Mcharge, "mcharge")
            .column_as(viewer::Column::Cid, "cid")
            .column_as(country::Column::Cname, "cname")
            .join(JoinType::InnerJoin, viewer::Relation::Country.def())
            .filter(viewer::Column::Account.eq(account))
            .into_model::<ViewerProfileRow>()
            .one(&self.conn)
            .await?;

        Ok(row)
    }

    pub async fn update_admin_fields(
        &self,
        account: i32,
        update: ViewerAdminUpdate,
    ) -> Result<bool> {
        let Some(row) = Viewer::find_by_id(account).one(&self.conn).await? else {
            return Ok(false);
        };

        let mut active: viewer::ActiveModel = row.into();
        active.street = Set(update.street);
        active.city = Set(update.city);
        active.state = Set(update.state);
        active.zipcode = Set(update.zipcode);
        active.mcharge = Set(update.mcharge);
        active.cid = Set(update.cid);
        active.update(&self.conn).await?;

        Ok(true)
    }

    pub async fn update_profile(
        &self,
        account: i32,
        street: String,
        city: String,
        state: String,
        zipcode: String,
        cid: i32,
    ) -> Result<bool> {
        let Some(row) = Viewer::find_by_id(account).one(&self.conn).await? else {
            return Ok(false);
        };

        let mut active: viewer::ActiveModel = row.into();
        active.street = Set(street);
        active.city = Set(city);
        active.state = Set(state);
        active.zipcode = Set(zipcode);
        active.cid = Set(cid);
        active.update(&self.conn).await?;

        Ok(true)
    }

    /// account -> feedback row count.
    async fn feedback_count_map(&self) -> Result<HashMap<i32, i64>> {
        let rows: Vec<(i32, i64)> = Feedback::find()
            .select_only()
            .column(feedback::Column::Account)
            .column_as(feedback::Column::Sid.count(), "feedback_count")
            .group_by(feedback::Column::Account)
            .into_tuple()
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().collect())
    }
}
