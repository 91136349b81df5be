//! `SeaORM` implementation of the `DashboardService` trait.
//!
//! The store hands back raw rows; ranking and month bucketing happen here
//! as plain functions so the arithmetic is testable without a database.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::db::{SeriesRatingRow, Store};
use crate::services::dashboard_service::{
    DashboardError, DashboardService, DashboardStats, GrowthPoint, RevenuePoint, TopSeriesEntry,
};

pub struct SeaOrmDashboardService {
    store: Store,
}

impl SeaOrmDashboardService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl DashboardService for SeaOrmDashboardService {
    async fn stats(&self) -> Result<DashboardStats, DashboardError> {
        let total_series = self.store.count_series().await?;
        let total_viewers = self.store.count_viewers().await?;
        let total_feedback = self.store.count_feedback().await?;

        // A row dated exactly seven days ago still counts.
        let cutoff = chrono::Local::now().date_naive() - chrono::Duration::days(7);
        let recent_feedback = self.store.count_feedback_since(cutoff).await?;

        let rows = self.store.series_rating_rows().await?;
        let top_series = rank_top_series(rows, 5)
            .into_iter()
            .map(|row| TopSeriesEntry {
                sname: row.sname,
                avg_rating: row.avg_rating,
            })
            .collect();

        Ok(DashboardStats {
            total_series,
            total_viewers,
            total_feedback,
            recent_feedback,
            top_series,
        })
    }

    async fn viewer_growth(&self) -> Result<Vec<GrowthPoint>, DashboardError> {
        let rows = self.store.signup_rows().await?;
        Ok(bucket_viewer_growth(&rows))
    }

    async fn revenue_growth(&self) -> Result<Vec<RevenuePoint>, DashboardError> {
        let rows = self.store.signup_rows().await?;
        Ok(bucket_revenue_growth(&rows))
    }
}

/// Sorts rating rows descending by average, ties ascending by series id,
/// and keeps the first `limit`.
#[must_use]
pub fn rank_top_series(mut rows: Vec<SeriesRatingRow>, limit: usize) -> Vec<SeriesRatingRow> {
    rows.sort_by(|a, b| {
        b.avg_rating
            .total_cmp(&a.avg_rating)
            .then_with(|| a.sid.cmp(&b.sid))
    });
    rows.truncate(limit);
    rows
}

fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

fn bucket_viewer_growth(rows: &[(NaiveDate, f64)]) -> Vec<GrowthPoint> {
    let mut buckets: BTreeMap<String, u64> = BTreeMap::new();
    for (open_date, _) in rows {
        *buckets.entry(month_key(*open_date)).or_insert(0) += 1;
    }

    buckets
        .into_iter()
        .map(|(month, new_viewers)| GrowthPoint { month, new_viewers })
        .collect()
}

fn bucket_revenue_growth(rows: &[(NaiveDate, f64)]) -> Vec<RevenuePoint> {
    let mut buckets: BTreeMap<String, Decimal> = BTreeMap::new();
    for (open_date, mcharge) in rows {
        let charge = Decimal::try_from(*mcharge).unwrap_or_default();
        *buckets.entry(month_key(*open_date)).or_insert(Decimal::ZERO) += charge;
    }

    let mut points = Vec::with_capacity(buckets.len());
    let mut running_total = Decimal::ZERO;
    for (month, revenue_new) in buckets {
        running_total += revenue_new;
        points.push(RevenuePoint {
            month,
            revenue_new,
            revenue_total: running_total,
        });
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn rating_row(sid: i32, sname: &str, avg_rating: f64, feedback_count: i64) -> SeriesRatingRow {
        SeriesRatingRow {
            sid,
            sname: sname.to_string(),
            avg_rating,
            feedback_count,
        }
    }

    #[test]
    fn top_series_orders_by_average_then_id() {
        let rows = vec![
            rating_row(2, "Tied Later", 4.0, 3),
            rating_row(9, "Best", 4.8, 4),
            rating_row(1, "Tied First", 4.0, 2),
        ];

        let ranked = rank_top_series(rows, 5);
        let names: Vec<&str> = ranked.iter().map(|r| r.sname.as_str()).collect();
        assert_eq!(names, ["Best", "Tied First", "Tied Later"]);
    }

    #[test]
    fn top_series_truncates_to_limit() {
        let rows = (1..=8)
            .map(|sid| rating_row(sid, "s", f64::from(sid), 1))
            .collect();

        let ranked = rank_top_series(rows, 5);
        assert_eq!(ranked.len(), 5);
        assert_eq!(ranked[0].sid, 8);
        assert_eq!(ranked[4].sid, 4);
    }

    #[test]
    fn top_series_empty_input() {
        assert!(rank_top_series(Vec::new(), 5).is_empty());
    }

    #[test]
    fn viewer_growth_counts_per_month() {
        let rows = vec![
            (date(2024, 1, 5), 9.99),
            (date(2024, 2, 20), 9.99),
            (date(2024, 1, 28), 9.99),
        ];

        let series = bucket_viewer_growth(&rows);
        assert_eq!(
            series,
            vec![
                GrowthPoint {
                    month: "2024-01".to_string(),
                    new_viewers: 2,
                },
                GrowthPoint {
                    month: "2024-02".to_string(),
                    new_viewers: 1,
                },
            ]
        );
    }

    #[test]
    fn viewer_growth_omits_empty_months() {
        let rows = vec![(date(2024, 1, 1), 9.99), (date(2024, 4, 1), 9.99)];

        let series = bucket_viewer_growth(&rows);
        let months: Vec<&str> = series.iter().map(|p| p.month.as_str()).collect();
        assert_eq!(months, ["2024-01", "2024-04"]);
    }

    #[test]
    fn revenue_growth_accumulates_without_drift() {
        let rows = vec![
            (date(2024, 1, 3), 9.99),
            (date(2024, 1, 9), 5.01),
            (date(2024, 2, 14), 9.99),
        ];

        let series = bucket_revenue_growth(&rows);
        assert_eq!(series.len(), 2);

        assert_eq!(series[0].month, "2024-01");
        assert_eq!(series[0].revenue_new, Decimal::new(1500, 2));
        assert_eq!(series[0].revenue_total, Decimal::new(1500, 2));

        assert_eq!(series[1].month, "2024-02");
        assert_eq!(series[1].revenue_new, Decimal::new(999, 2));
        assert_eq!(series[1].revenue_total, Decimal::new(2499, 2));
    }

    #[test]
    fn revenue_total_is_running_sum() {
        let rows = vec![
            (date(2023, 11, 1), 1.10),
            (date(2023, 12, 1), 2.20),
            (date(2024, 1, 1), 3.30),
        ];

        let series = bucket_revenue_growth(&rows);
        let mut expected_total = Decimal::ZERO;
        for point in &series {
            expected_total += point.revenue_new;
            assert_eq!(point.revenue_total, expected_total);
        }
    }

    #[test]
    fn growth_of_nothing_is_empty() {
        assert!(bucket_viewer_growth(&[]).is_empty());
        assert!(bucket_revenue_growth(&[]).is_empty());
    }
}
