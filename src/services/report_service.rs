//! Canned analytical reports over the catalog schema.
//!
//! Each report is a fixed, named read query with no user-supplied
//! parameters. The response carries the literal SQL alongside the rows so
//! the report table can render both.

use sea_orm::JsonValue;
use serde::Serialize;
use thiserror::Error;

/// Errors specific to report execution.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for ReportError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for ReportError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// The six fixed reports, addressed as `q1`..`q6` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CannedReport {
    /// One row per series x genre x release-country combination.
    SeriesGenresAndCountries,
    /// Distinct viewers who reviewed any series tagged `Drama`.
    DramaReviewers,
    /// Feedback rows rated strictly above their own series' average.
    AboveAverageFeedback,
    /// Series with English subtitles or English dubbing.
    EnglishLocalizedSeries,
    /// Series averaging above 4.0 across at least two reviews.
    HighlyRatedSeries,
    /// The three viewers with the most feedback rows.
    MostActiveViewers,
}

impl CannedReport {
    pub const ALL: [Self; 6] = [
        Self::SeriesGenresAndCountries,
        Self::DramaReviewers,
        Self::AboveAverageFeedback,
        Self::EnglishLocalizedSeries,
        Self::HighlyRatedSeries,
        Self::MostActiveViewers,
    ];

    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "q1" => Some(Self::SeriesGenresAndCountries),
            "q2" => Some(Self::DramaReviewers),
            "q3" => Some(Self::AboveAverageFeedback),
            "q4" => Some(Self::EnglishLocalizedSeries),
            "q5" => Some(Self::HighlyRatedSeries),
            "q6" => Some(Self::MostActiveViewers),
            _ => None,
        }
    }

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::SeriesGenresAndCountries => "q1",
            Self::DramaReviewers => "q2",
            Self::AboveAverageFeedback => "q3",
            Self::EnglishLocalizedSeries => "q4",
            Self::HighlyRatedSeries => "q5",
            Self::MostActiveViewers => "q6",
        }
    }

    /// The literal SQL this report executes.
    #[must_use]
    pub const fn sql(self) -> &'static str {
        match self {
            Self::SeriesGenresAndCountries => {
                "SELECT s.SNAME, gt.TNAME AS Genre, c.CNAME AS ReleaseCountry, src.RELEASE_DATE
FROM DRY_SERIES s
JOIN DRY_SERIES_TYPE st ON s.SID = st.SID
JOIN DRY_GENRE_TYPE gt ON st.TNAME = gt.TNAME
JOIN DRY_SERIES_RELEASE_COUNTRY src ON s.SID = src.SID
JOIN DRY_COUNTRY c ON src.CID = c.CID
ORDER BY s.SNAME, c.CNAME"
            }
            Self::DramaReviewers => {
                "SELECT v.USERNAME, v.FNAME, v.LNAME
FROM DRY_VIEWER v
WHERE v.ACCOUNT IN (
    SELECT f.ACCOUNT
    FROM DRY_FEEDBACK f
    JOIN DRY_SERIES_TYPE st ON f.SID = st.SID
    WHERE st.TNAME = 'Drama'
)"
            }
            Self::AboveAverageFeedback => {
                "SELECT s.SNAME, v.USERNAME, f.RATE, f.FTEXT
FROM DRY_FEEDBACK f
JOIN DRY_SERIES s ON f.SID = s.SID
JOIN DRY_VIEWER v ON f.ACCOUNT = v.ACCOUNT
WHERE f.RATE > (
    SELECT AVG(f2.RATE)
    FROM DRY_FEEDBACK f2
    WHERE f2.SID = f.SID
)
ORDER BY s.SNAME, f.RATE DESC"
            }
            Self::EnglishLocalizedSeries => {
                "SELECT SID, SNAME FROM DRY_SERIES WHERE SID IN (
    SELECT SID FROM DRY_SERIES_SUBTITLE WHERE LNAME = 'English'
)
UNION
SELECT SID, SNAME FROM DRY_SERIES WHERE SID IN (
    SELECT SID FROM DRY_SERIES_DUBBING WHERE LNAME = 'English'
)"
            }
            Self::HighlyRatedSeries => {
                "WITH SeriesRatings AS (
    SELECT
        SID,
        AVG(RATE) AS avg_rating,
        COUNT(ACCOUNT) AS feedback_count
    FROM DRY_FEEDBACK
    GROUP BY SID
)
SELECT s.SNAME, sr.avg_rating, sr.feedback_count
FROM SeriesRatings sr
JOIN DRY_SERIES s ON sr.SID = s.SID
WHERE sr.avg_rating > 4.0 AND sr.feedback_count >= 2
ORDER BY sr.avg_rating DESC"
            }
            Self::MostActiveViewers => {
                "SELECT v.USERNAME, v.FNAME, v.LNAME, COUNT(f.SID) AS total_feedback
FROM DRY_VIEWER v
JOIN DRY_FEEDBACK f ON v.ACCOUNT = f.ACCOUNT
GROUP BY v.ACCOUNT
ORDER BY total_feedback DESC, v.ACCOUNT ASC
LIMIT 3"
            }
        }
    }
}

/// Wire shape of a report response: the executed SQL plus its rows.
#[derive(Debug, Clone, Serialize)]
pub struct ReportOutput {
    pub query: String,
    pub result: Vec<JsonValue>,
}

/// Domain service trait for the canned report engine.
#[async_trait::async_trait]
pub trait ReportService: Send + Sync {
    /// Executes one canned report and returns its rows with the SQL text.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Database`] when the store is unreachable or
    /// the query fails. An empty result set is not an error.
    async fn run(&self, report: CannedReport) -> Result<ReportOutput, ReportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip() {
        for report in CannedReport::ALL {
            assert_eq!(CannedReport::from_key(report.key()), Some(report));
        }
        assert_eq!(CannedReport::from_key("q7"), None);
        assert_eq!(CannedReport::from_key(""), None);
    }

    #[test]
    fn sql_is_single_statement() {
        for report in CannedReport::ALL {
            let sql = report.sql();
            assert!(!sql.trim().is_empty());
            assert!(!sql.contains(';'), "{} carries a statement separator", report.key());
        }
    }

    #[test]
    fn most_active_viewers_is_capped_and_deterministic() {
        let sql = CannedReport::MostActiveViewers.sql();
        assert!(sql.contains("LIMIT 3"));
        assert!(sql.contains("v.ACCOUNT ASC"));
    }
}
