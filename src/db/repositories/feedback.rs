use anyhow::Result;
use chrono::NaiveDate;
use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Set,
};

use crate::entities::{feedback, prelude::*, series, viewer};

/// Feedback row with the reviewer's names, for per-series listings.
#[derive(Debug, Clone, FromQueryResult)]
pub struct SeriesFeedbackRow {
    pub account: i32,
    pub username: String,
    pub fname: String,
    pub lname: String,
    pub rate: i32,
    pub ftext: String,
    pub fdate: NaiveDate,
}

/// Moderation listing row joined with both the series and the reviewer.
#[derive(Debug, Clone, FromQueryResult)]
pub struct ModerationRow {
    pub account: i32,
    pub username: String,
    pub fname: String,
    pub lname: String,
    pub sid: i32,
    pub sname: String,
    pub rate: i32,
    pub ftext: String,
    pub fdate: NaiveDate,
}

/// A viewer's own feedback joined with the series name.
#[derive(Debug, Clone, FromQueryResult)]
pub struct OwnFeedbackRow {
    pub sid: i32,
    pub sname: String,
    pub rate: i32,
    pub ftext: String,
    pub fdate: NaiveDate,
}

/// Conjunctive moderation filters; unset fields do not constrain.
#[derive(Debug, Clone, Default)]
pub struct FeedbackFilter {
    pub sid: Option<i32>,
    pub rating: Option<i32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

pub struct FeedbackRepository {
    conn: DatabaseConnection,
}

impl FeedbackRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list_for_series(&self, sid: i32) -> Result<Vec<SeriesFeedbackRow>> {
        let rows = Feedback::find()
            .select_only()
            .column_as(feedback::Column::Account, "account")
            .column_as(viewer::Column::Username, "username")
            .column_as(viewer::Column::Fname, "fname")
            .column_as(viewer::Column::Lname, "lname")
            .column_as(feedback::Column::Rate, "rate")
            .column_as(feedback::Column::Ftext, "ftext")
            .column_as(feedback::Column::Fdate, "fdate")
            .join(JoinType::InnerJoin, feedback::Relation::Viewer.def())
            .filter(feedback::Column::Sid.eq(sid))
            .order_by_desc(feedback::Column::Fdate)
            .order_by_asc(feedback::Column::Account)
            .into_model::<SeriesFeedbackRow>()
            .all(&self.conn)
            .await?;

        Ok(rows)
    }

    /// Live aggregate over a single series. The average is None with no rows.
    pub async fn stats_for_series(&self, sid: i32) -> Result<(Option<f64>, i64)> {
        let avg_rating: SimpleExpr =
            Func::avg(Expr::col((feedback::Entity, feedback::Column::Rate))).into();

        let row: Option<(Option<f64>, i64)> = Feedback::find()
            .select_only()
            .column_as(avg_rating, "avg_rating")
            .column_as(feedback::Column::Account.count(), "feedback_count")
            .filter(feedback::Column::Sid.eq(sid))
            .into_tuple()
            .one(&self.conn)
            .await?;

        Ok(row.unwrap_or((None, 0)))
    }

    pub async fn get(&self, account: i32, sid: i32) -> Result<Option<feedback::Model>> {
        let row = Feedback::find_by_id((account, sid)).one(&self.conn).await?;
        Ok(row)
    }

    /// Insert or overwrite the caller's feedback row, stamping `FDATE`.
    pub async fn upsert(
        &self,
        account: i32,
        sid: i32,
        rate: i32,
        ftext: String,
        fdate: NaiveDate,
    ) -> Result<()> {
        let active = feedback::ActiveModel {
            account: Set(account),
            sid: Set(sid),
            rate: Set(rate),
            ftext: Set(ftext),
            fdate: Set(fdate),
        };

        Feedback::insert(active)
            .on_conflict(
                sea_orm::sea_query::OnConflict::columns([
                    feedback::Column::Account,
                    feedback::Column::Sid,
                ])
                .update_columns([
                    feedback::Column::Rate,
                    feedback::Column::Ftext,
                    feedback::Column::Fdate,
                ])
                .to_owned(),
            )
            .exec(&self.conn)
            .await?;

        Ok(())
    }

    pub async fn delete(&self, account: i32, sid: i32) -> Result<bool> {
        let result = Feedback::delete_by_id((account, sid))
            .exec(&self.conn)
            .await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn list_moderation(&self, filter: &FeedbackFilter) -> Result<Vec<ModerationRow>> {
        let mut query = Feedback::find()
            .select_only()
            .column_as(feedback::Column::Account, "account")
            .column_as(viewer::Column::Username, "username")
            .column_as(viewer::Column::Fname, "fname")
            .column_as(viewer::Column::Lname, "lname")
            .column_as(feedback::Column::Sid, "sid")
            .column_as(series::Column::Sname, "sname")
            .column_as(feedback::Column::Rate, "rate")
            .column_as(feedback::Column::Ftext, "ftext")
            .column_as(feedback::Column::Fdate, "fdate")
            .join(JoinType::InnerJoin, feedback::Relation::Viewer.def())
            .join(JoinType::InnerJoin, feedback::Relation::Series.def())
            .order_by_desc(feedback::Column::Fdate)
            .order_by_asc(feedback::Column::Account);

        if let Some(sid) = filter.sid {
            query = query.filter(feedback::Column::Sid.eq(sid));
        }

        if let Some(rating) = filter.rating {
            query = query.filter(feedback::Column::Rate.eq(rating));
        }

        if let Some(start) = filter.start_date {
            query = query.filter(feedback::Column::Fdate.gte(start));
        }

        if let Some(end) = filter.end_date {
            query = query.filter(feedback::Column::Fdate.lte(end));
        }

        let rows = query.into_model::<ModerationRow>().all(&self.conn).await?;
        Ok(rows)
    }

    pub async fn list_for_viewer(&self, account: i32) -> Result<Vec<OwnFeedbackRow>> {
        let rows = Feedback::find()
            .select_only()
            .column_as(feedback::Column::Sid, "sid")
            .column_as(series::Column::Sname, "sname")
            .column_as(feedback::Column::Rate, "rate")
            .column_as(feedback::Column::Ftext, "ftext")
            .column_as(feedback::Column::Fdate, "fdate")
            .join(JoinType::InnerJoin, feedback::Relation::Series.def())
            .filter(feedback::Column::Account.eq(account))
            .order_by_desc(feedback::Column::Fdate)
            .order_by_asc(feedback::Column::Sid)
            .into_model::<OwnFeedbackRow>()
            .all(&self.conn)
            .await?;

        Ok(rows)
    }
}
