use anyhow::Result;
use chrono::NaiveDate;
use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, JoinType,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
};
use std::collections::HashMap;

use crate::entities::{
    contract, country, episode, feedback, prelude::*, series, series_dubbing,
    series_release_country, series_subtitle, series_type,
};

/// Admin listing row: base columns plus live aggregates.
#[derive(Debug, Clone)]
pub struct SeriesOverviewRow {
    pub sid: i32,
    pub sname: String,
    pub nepisodes: i32,
    pub ori_lang: String,
    pub avg_rating: Option<f64>,
    pub genres: Vec<String>,
}

/// Viewer catalog row: aggregates plus typed release countries.
#[derive(Debug, Clone)]
pub struct BrowseSeriesRow {
    pub sid: i32,
    pub sname: String,
    pub nepisodes: i32,
    pub ori_lang: String,
    pub genres: Vec<String>,
    pub release_countries: Vec<CountryRef>,
    pub avg_rating: Option<f64>,
    pub feedback_count: i64,
}

#[derive(Debug, Clone, FromQueryResult)]
pub struct CountryRef {
    pub cid: i32,
    pub cname: String,
}

/// Release-country child row on the series detail views.
#[derive(Debug, Clone, FromQueryResult)]
pub struct ReleaseCountryRow {
    pub cid: i32,
    pub cname: String,
    pub release_date: NaiveDate,
}

/// Conjunctive filters for the viewer catalog.
#[derive(Debug, Clone, Default)]
pub struct BrowseFilter {
    pub genre: Option<String>,
    pub language: Option<String>,
    pub country: Option<i32>,
}

/// Replacement payload for a series update: base fields and all four child
/// collections, applied as delete-all-then-reinsert.
#[derive(Debug, Clone)]
pub struct SeriesChildren {
    pub genres: Vec<String>,
    pub subtitles: Vec<String>,
    pub dubbings: Vec<String>,
    pub release_countries: Vec<(i32, NaiveDate)>,
}

pub struct SeriesRepository {
    conn: DatabaseConnection,
}

impl SeriesRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    pub async fn get(&self, sid: i32) -> Result<Option<series::Model>> {
        let row = Series::find_by_id(sid).one(&self.conn).await?;
        Ok(row)
    }

    /// Admin listing, newest series first, with live average rating and
    /// genre names merged in via batch queries.
    pub async fn list_overview(&self) -> Result<Vec<SeriesOverviewRow>> {
        let rows = Series::find()
            .order_by_desc(series::Column::Sid)
            .all(&self.conn)
            .await?;

        let ratings = self.rating_map().await?;
        let genres = self.genre_map().await?;

        Ok(rows
            .into_iter()
            .map(|s| SeriesOverviewRow {
                avg_rating: ratings.get(&s.sid).map(|&(avg, _)| avg),
                genres: genres.get(&s.sid).cloned().unwrap_or_default(),
                sid: s.sid,
                sname: s.sname,
                nepisodes: s.nepisodes,
                ori_lang: s.ori_lang,
            })
            .collect())
    }

    /// Viewer catalog ordered by name, with optional conjunctive filters.
    pub async fn browse(&self, filter: &BrowseFilter) -> Result<Vec<BrowseSeriesRow>> {
        let mut query = Series::find().order_by_asc(series::Column::Sname);
        if let Some(language) = &filter.language {
            query = query.filter(series::Column::OriLang.eq(language.clone()));
        }
        let rows = query.all(&self.conn).await?;

        let ratings = self.rating_map().await?;
        let genres = self.genre_map().await?;
        let countries = self.country_map().await?;

        let mut out = Vec::with_capacity(rows.len());
        for s in rows {
            let series_genres = genres.get(&s.sid).cloned().unwrap_or_default();
            if let Some(genre) = &filter.genre {
                if !series_genres.iter().any(|g| g == genre) {
                    continue;
                }
            }

            let series_countries = countries.get(&s.sid).cloned().unwrap_or_default();
            if let Some(cid) = filter.country {
                if !series_countries.iter().any(|c| c.cid == cid) {
                    continue;
                }
            }

            let (avg_rating, feedback_count) = ratings
                .get(&s.sid)
                .map_or((None, 0), |&(avg, count)| (Some(avg), count));

            out.push(BrowseSeriesRow {
                sid: s.sid,
                sname: s.sname,
                nepisodes: s.nepisodes,
                ori_lang: s.ori_lang,
                genres: series_genres,
                release_countries: series_countries,
                avg_rating,
                feedback_count,
            });
        }

        Ok(out)
    }

    pub async fn genres_for(&self, sid: i32) -> Result<Vec<String>> {
        let rows = SeriesType::find()
            .filter(series_type::Column::Sid.eq(sid))
            .order_by_asc(series_type::Column::Tname)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(|r| r.tname).collect())
    }

    pub async fn subtitles_for(&self, sid: i32) -> Result<Vec<String>> {
        let rows = SeriesSubtitle::find()
            .filter(series_subtitle::Column::Sid.eq(sid))
            .order_by_asc(series_subtitle::Column::Lname)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(|r| r.lname).collect())
    }

    pub async fn dubbings_for(&self, sid: i32) -> Result<Vec<String>> {
        let rows = SeriesDubbing::find()
            .filter(series_dubbing::Column::Sid.eq(sid))
            .order_by_asc(series_dubbing::Column::Lname)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(|r| r.lname).collect())
    }

    pub async fn release_countries_for(&self, sid: i32) -> Result<Vec<ReleaseCountryRow>> {
        let rows = SeriesReleaseCountry::find()
            .select_only()
            .column_as(series_release_country::Column::Cid, "cid")
            .column_as(country::Column::Cname, "cname")
            .column_as(series_release_country::Column::ReleaseDate, "release_date")
            .join(
                JoinType::InnerJoin,
                series_release_country::Relation::Country.def(),
            )
            .filter(series_release_country::Column::Sid.eq(sid))
            .order_by_asc(country::Column::Cname)
            .into_model::<ReleaseCountryRow>()
            .all(&self.conn)
            .await?;

        Ok(rows)
    }

    // ------------------------------------------------------------------
    // Writes
    // ------------------------------------------------------------------

    pub async fn create(&self, sname: String, nepisodes: i32, ori_lang: String) -> Result<i32> {
        let active = series::ActiveModel {
            sname: Set(sname),
            nepisodes: Set(nepisodes),
            ori_lang: Set(ori_lang),
            ..Default::default()
        };

        let row = active.insert(&self.conn).await?;
        Ok(row.sid)
    }

    /// Update base fields and replace every child collection. Returns false
    /// when the series does not exist.
    pub async fn update(
        &self,
        sid: i32,
        sname: String,
        nepisodes: i32,
        ori_lang: String,
        children: SeriesChildren,
    ) -> Result<bool> {
        let Some(row) = Series::find_by_id(sid).one(&self.conn).await? else {
            return Ok(false);
        };

        let mut active: series::ActiveModel = row.into();
        active.sname = Set(sname);
        active.nepisodes = Set(nepisodes);
        active.ori_lang = Set(ori_lang);
        active.update(&self.conn).await?;

        self.replace_children(sid, children).await?;
        Ok(true)
    }

    async fn replace_children(&self, sid: i32, children: SeriesChildren) -> Result<()> {
        SeriesType::delete_many()
            .filter(series_type::Column::Sid.eq(sid))
            .exec(&self.conn)
            .await?;
        SeriesSubtitle::delete_many()
            .filter(series_subtitle::Column::Sid.eq(sid))
            .exec(&self.conn)
            .await?;
        SeriesDubbing::delete_many()
            .filter(series_dubbing::Column::Sid.eq(sid))
            .exec(&self.conn)
            .await?;
        SeriesReleaseCountry::delete_many()
            .filter(series_release_country::Column::Sid.eq(sid))
            .exec(&self.conn)
            .await?;

        if !children.genres.is_empty() {
            let models = children.genres.into_iter().map(|tname| {
                series_type::ActiveModel {
                    sid: Set(sid),
                    tname: Set(tname),
                }
            });
            SeriesType::insert_many(models).exec(&self.conn).await?;
        }

        if !children.subtitles.is_empty() {
            let models = children.subtitles.into_iter().map(|lname| {
                series_subtitle::ActiveModel {
                    sid: Set(sid),
                    lname: Set(lname),
                }
            });
            SeriesSubtitle::insert_many(models).exec(&self.conn).await?;
        }

        if !children.dubbings.is_empty() {
            let models = children.dubbings.into_iter().map(|lname| {
                series_dubbing::ActiveModel {
                    sid: Set(sid),
                    lname: Set(lname),
                }
            });
            SeriesDubbing::insert_many(models).exec(&self.conn).await?;
        }

        if !children.release_countries.is_empty() {
            let models =
                children
                    .release_countries
                    .into_iter()
                    .map(|(cid, release_date)| series_release_country::ActiveModel {
                        sid: Set(sid),
                        cid: Set(cid),
                        release_date: Set(release_date),
                    });
            SeriesReleaseCountry::insert_many(models)
                .exec(&self.conn)
                .await?;
        }

        Ok(())
    }

    /// Delete a series and every dependent row. Returns false when the
    /// series does not exist.
    pub async fn delete(&self, sid: i32) -> Result<bool> {
        if Series::find_by_id(sid).one(&self.conn).await?.is_none() {
            return Ok(false);
        }

        SeriesType::delete_many()
            .filter(series_type::Column::Sid.eq(sid))
            .exec(&self.conn)
            .await?;
        SeriesSubtitle::delete_many()
            .filter(series_subtitle::Column::Sid.eq(sid))
            .exec(&self.conn)
            .await?;
        SeriesDubbing::delete_many()
            .filter(series_dubbing::Column::Sid.eq(sid))
            .exec(&self.conn)
            .await?;
        SeriesReleaseCountry::delete_many()
            .filter(series_release_country::Column::Sid.eq(sid))
            .exec(&self.conn)
            .await?;
        Feedback::delete_many()
            .filter(feedback::Column::Sid.eq(sid))
            .exec(&self.conn)
            .await?;
        Episode::delete_many()
            .filter(episode::Column::Sid.eq(sid))
            .exec(&self.conn)
            .await?;
        Contract::delete_many()
            .filter(contract::Column::Sid.eq(sid))
            .exec(&self.conn)
            .await?;

        Series::delete_by_id(sid).exec(&self.conn).await?;
        Ok(true)
    }

    // ------------------------------------------------------------------
    // Batch maps shared by the listing queries
    // ------------------------------------------------------------------

    /// sid -> (avg rating, feedback count), only for series with feedback.
    async fn rating_map(&self) -> Result<HashMap<i32, (f64, i64)>> {
        let avg_rating: SimpleExpr =
            Func::avg(Expr::col((feedback::Entity, feedback::Column::Rate))).into();

        let rows: Vec<(i32, f64, i64)> = Feedback::find()
            .select_only()
            .column(feedback::Column::Sid)
            .column_as(avg_rating, "avg_rating")
            .column_as(feedback::Column::Account.count(), "feedback_count")
            .group_by(feedback::Column::Sid)
            .into_tuple()
            .all(&self.conn)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(sid, avg, count)| (sid, (avg, count)))
            .collect())
    }

    /// sid -> sorted genre names.
    async fn genre_map(&self) -> Result<HashMap<i32, Vec<String>>> {
        let rows = SeriesType::find()
            .order_by_asc(series_type::Column::Tname)
            .all(&self.conn)
            .await?;

        let mut map: HashMap<i32, Vec<String>> = HashMap::new();
        for row in rows {
            map.entry(row.sid).or_default().push(row.tname);
        }
        Ok(map)
    }

    /// sid -> release countries ordered by name.
    async fn country_map(&self) -> Result<HashMap<i32, Vec<CountryRef>>> {
        #[derive(FromQueryResult)]
        struct Row {
            sid: i32,
            cid: i32,
            cname: String,
        }

        let rows = SeriesReleaseCountry::find()
            .select_only()
            .column_as(series_release_country::Column::Sid, "sid")
            .column_as(series_release_country::Column::Cid, "cid")
            .column_as(country::Column::Cname, "cname")
            .join(
                JoinType::InnerJoin,
                series_release_country::Relation::Country.def(),
            )
            .order_by_asc(country::Column::Cname)
            .into_model::<Row>()
            .all(&self.conn)
            .await?;

        let mut map: HashMap<i32, Vec<CountryRef>> = HashMap::new();
        for row in rows {
            map.entry(row.sid).or_default().push(CountryRef {
                cid: row.cid,
                cname: row.cname,
            });
        }
        Ok(map)
    }
}
