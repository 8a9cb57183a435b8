//! Store access for match records: inserts, filtered finds, lookups,
//! partial updates, deletes, and distinct value listings.
//!
//! All operations go through an owned `MatchStore` handle around a sqlx
//! pool; there is no process-global connection. Filter criteria translate
//! to SQL predicates with `QueryBuilder`: criteria AND across categories,
//! the team clause ORs across home and away, and absent criteria add no
//! constraint at all.

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::db::models::MatchRow;
use crate::error::{AppError, Result};
use crate::normalizer::{canonical_date, end_bound, start_bound};
use crate::types::{FilterCriteria, MatchPatch, MatchRecord, NewMatch, UNKNOWN_DATE};

const MATCH_COLUMNS: &str = "id, fixture_id, date, home_team, away_team, is_home, \
     home_goals, away_goals, home_possession, away_possession, \
     home_yellow_cards, away_yellow_cards, home_shots, away_shots, \
     league, season";

#[derive(Clone)]
pub struct MatchStore {
    pool: SqlitePool,
}

impl MatchStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open the SQLite database at `path`, creating it if missing, and run
    /// pending migrations.
    pub async fn connect(path: &str) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_with(options).await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }

    /// Parse a caller-supplied id into the store's integer identifier.
    /// Rejected before any store round trip.
    fn parse_id(id: &str) -> Result<i64> {
        id.trim()
            .parse::<i64>()
            .map_err(|_| AppError::InvalidId(id.to_string()))
    }

    // -----------------------------------------------------------------------
    // Inserts
    // -----------------------------------------------------------------------

    /// Insert one normalized match. The store assigns the record id here and
    /// nowhere else.
    pub async fn insert(&self, rec: &NewMatch) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO matches (
                fixture_id, date, home_team, away_team, is_home,
                home_goals, away_goals, home_possession, away_possession,
                home_yellow_cards, away_yellow_cards, home_shots, away_shots,
                league, season
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(rec.fixture_id)
        .bind(&rec.date)
        .bind(&rec.home_team)
        .bind(&rec.away_team)
        .bind(i64::from(rec.is_home))
        .bind(rec.home_goals)
        .bind(rec.away_goals)
        .bind(rec.home_possession)
        .bind(rec.away_possession)
        .bind(rec.home_yellow_cards)
        .bind(rec.away_yellow_cards)
        .bind(rec.home_shots)
        .bind(rec.away_shots)
        .bind(&rec.league)
        .bind(rec.season)
        .execute(&self.pool)
        .await?;
        Ok(result.last_insert_rowid())
    }

    pub async fn insert_many(&self, recs: &[NewMatch]) -> Result<usize> {
        for rec in recs {
            self.insert(rec).await?;
        }
        Ok(recs.len())
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Fetch all records matching `criteria`, ordered by kickoff date.
    /// Zero matches is a valid empty result, never an error.
    pub async fn find(&self, criteria: &FilterCriteria) -> Result<Vec<MatchRecord>> {
        let mut qb: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {MATCH_COLUMNS} FROM matches WHERE 1 = 1"));

        if let Some(bound) = criteria.start_date.as_deref().and_then(start_bound) {
            qb.push(" AND date >= ").push_bind(bound);
        }
        if let Some(bound) = criteria.end_date.as_deref().and_then(end_bound) {
            qb.push(" AND date <= ").push_bind(bound);
        }
        if let Some(team) = criteria.team.as_deref().filter(|t| !t.is_empty()) {
            qb.push(" AND (home_team = ")
                .push_bind(team.to_string())
                .push(" OR away_team = ")
                .push_bind(team.to_string())
                .push(")");
        }
        if let Some(league) = criteria.league.as_deref().filter(|l| !l.is_empty()) {
            qb.push(" AND league = ").push_bind(league.to_string());
        }
        qb.push(" ORDER BY date");

        let rows: Vec<MatchRow> = qb.build_query_as().fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(MatchRecord::from).collect())
    }

    /// Exact lookup by id. Distinguishes a targeted miss (`NotFound`) from
    /// an unparseable identifier (`InvalidId`).
    pub async fn find_by_id(&self, id: &str) -> Result<MatchRecord> {
        let id = Self::parse_id(id)?;
        let row: Option<MatchRow> =
            sqlx::query_as(&format!("SELECT {MATCH_COLUMNS} FROM matches WHERE id = ?"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        row.map(MatchRecord::from).ok_or(AppError::NotFound)
    }

    async fn exists(&self, id: i64) -> Result<bool> {
        let found: Option<i64> = sqlx::query_scalar("SELECT id FROM matches WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(found.is_some())
    }

    // -----------------------------------------------------------------------
    // Updates and deletes
    // -----------------------------------------------------------------------

    /// Apply the fields present in `patch` against the declared schema,
    /// leaving the rest untouched. An empty patch on an existing record is a
    /// successful no-op; a nonexistent id is `NotFound` either way. Dates in
    /// the patch are re-encoded canonically so the store never holds two
    /// representations.
    pub async fn update(&self, id: &str, patch: &MatchPatch) -> Result<()> {
        let id = Self::parse_id(id)?;
        if patch.is_empty() {
            return if self.exists(id).await? {
                Ok(())
            } else {
                Err(AppError::NotFound)
            };
        }

        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE matches SET ");
        {
            let mut set = qb.separated(", ");
            if let Some(v) = patch.fixture_id {
                set.push("fixture_id = ").push_bind_unseparated(v);
            }
            if let Some(d) = &patch.date {
                let canonical =
                    canonical_date(d).unwrap_or_else(|| UNKNOWN_DATE.to_string());
                set.push("date = ").push_bind_unseparated(canonical);
            }
            if let Some(v) = &patch.home_team {
                set.push("home_team = ").push_bind_unseparated(v.clone());
            }
            if let Some(v) = &patch.away_team {
                set.push("away_team = ").push_bind_unseparated(v.clone());
            }
            if let Some(v) = patch.is_home {
                set.push("is_home = ").push_bind_unseparated(i64::from(v));
            }
            if let Some(v) = patch.home_goals {
                set.push("home_goals = ").push_bind_unseparated(v);
            }
            if let Some(v) = patch.away_goals {
                set.push("away_goals = ").push_bind_unseparated(v);
            }
            if let Some(v) = patch.home_possession {
                set.push("home_possession = ").push_bind_unseparated(v);
            }
            if let Some(v) = patch.away_possession {
                set.push("away_possession = ").push_bind_unseparated(v);
            }
            if let Some(v) = patch.home_yellow_cards {
                set.push("home_yellow_cards = ").push_bind_unseparated(v);
            }
            if let Some(v) = patch.away_yellow_cards {
                set.push("away_yellow_cards = ").push_bind_unseparated(v);
            }
            if let Some(v) = patch.home_shots {
                set.push("home_shots = ").push_bind_unseparated(v);
            }
            if let Some(v) = patch.away_shots {
                set.push("away_shots = ").push_bind_unseparated(v);
            }
            if let Some(v) = &patch.league {
                set.push("league = ").push_bind_unseparated(v.clone());
            }
            if let Some(v) = patch.season {
                set.push("season = ").push_bind_unseparated(v);
            }
        }
        qb.push(" WHERE id = ").push_bind(id);

        let result = qb.build().execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        let id = Self::parse_id(id)?;
        let result = sqlx::query("DELETE FROM matches WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Distinct listings
    // -----------------------------------------------------------------------

    /// Union of home and away team names, deduplicated and sorted with the
    /// store's binary collation. Recomputed on every call so the listing
    /// tracks inserts and deletes; the empty-string absent marker is
    /// excluded.
    pub async fn distinct_teams(&self) -> Result<Vec<String>> {
        let teams: Vec<String> = sqlx::query_scalar(
            "SELECT home_team FROM matches WHERE home_team <> '' \
             UNION SELECT away_team FROM matches WHERE away_team <> '' \
             ORDER BY 1",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(teams)
    }

    pub async fn distinct_leagues(&self) -> Result<Vec<String>> {
        let leagues: Vec<String> = sqlx::query_scalar(
            "SELECT DISTINCT league FROM matches WHERE league <> '' ORDER BY league",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(leagues)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
