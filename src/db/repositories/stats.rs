use anyhow::Result;
use chrono::NaiveDate;
use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, JoinType, PaginatorTrait,
    QueryFilter, QuerySelect, RelationTrait,
};

use crate::entities::{feedback, prelude::*, series, viewer};

/// Per-series rating aggregate; only series with feedback produce a row.
#[derive(Debug, Clone, FromQueryResult)]
pub struct SeriesRatingRow {
    pub sid: i32,
    pub sname: String,
    pub avg_rating: f64,
    pub feedback_count: i64,
}

pub struct StatsRepository {
    conn: DatabaseConnection,
}

impl StatsRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn count_series(&self) -> Result<u64> {
        Ok(Series::find().count(&self.conn).await?)
    }

    pub async fn count_viewers(&self) -> Result<u64> {
        Ok(Viewer::find().count(&self.conn).await?)
    }

    pub async fn count_feedback(&self) -> Result<u64> {
        Ok(Feedback::find().count(&self.conn).await?)
    }

    /// Feedback dated on or after the cutoff.
    pub async fn count_feedback_since(&self, cutoff: NaiveDate) -> Result<u64> {
        let count = Feedback::find()
            .filter(feedback::Column::Fdate.gte(cutoff))
            .count(&self.conn)
            .await?;

        Ok(count)
    }

    /// Rating aggregates for every series that has feedback. Ranking and
    /// truncation happen in the caller.
    pub async fn series_rating_rows(&self) -> Result<Vec<SeriesRatingRow>> {
        let avg_rating: SimpleExpr =
            Func::avg(Expr::col((feedback::Entity, feedback::Column::Rate))).into();

        let rows = Feedback::find()
            .select_only()
            .column_as(feedback::Column::Sid, "sid")
            .column_as(series::Column::Sname, "sname")
            .column_as(avg_rating, "avg_rating")
            .column_as(feedback::Column::Account.count(), "feedback_count")
            .join(JoinType::InnerJoin, feedback::Relation::Series.def())
            .group_by(feedback::Column::Sid)
            .group_by(series::Column::Sname)
            .into_model::<SeriesRatingRow>()
            .all(&self.conn)
            .await?;

        Ok(rows)
    }

    /// Signup date and monthly charge for every viewer, the raw input of
    /// the growth bucketing.
    pub async fn signup_rows(&self) -> Result<Vec<(NaiveDate, f64)>> {
        let rows: Vec<(NaiveDate, f64)> = Viewer::find()
            .select_only()
            .column(viewer::Column::OpenDate)
            .column(viewer::Column::Mcharge)
            .into_tuple()
            .all(&self.conn)
            .await?;

        Ok(rows)
    }
}
