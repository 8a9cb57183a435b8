use sqlx::FromRow;

use crate::types::MatchRecord;

/// Database row type for the `matches` table. SQLite has no boolean column
/// type, so `is_home` travels as an integer.
#[derive(Debug, FromRow)]
pub struct MatchRow {
    pub id: i64,
    pub fixture_id: i64,
    pub date: String,
    pub home_team: String,
    pub away_team: String,
    pub is_home: i64,
    pub home_goals: Option<i64>,
    pub away_goals: Option<i64>,
    pub home_possession: Option<i64>,
    pub away_possession: Option<i64>,
    pub home_yellow_cards: i64,
    pub away_yellow_cards: i64,
    pub home_shots: i64,
    pub away_shots: i64,
    pub league: String,
    pub season: i64,
}

impl From<MatchRow> for MatchRecord {
    fn from(r: MatchRow) -> Self {
        MatchRecord {
            id: r.id,
            fixture_id: r.fixture_id,
            date: r.date,
            home_team: r.home_team,
            away_team: r.away_team,
            is_home: r.is_home != 0,
            home_goals: r.home_goals,
            away_goals: r.away_goals,
            home_possession: r.home_possession,
            away_possession: r.away_possession,
            home_yellow_cards: r.home_yellow_cards,
            away_yellow_cards: r.away_yellow_cards,
            home_shots: r.home_shots,
            away_shots: r.away_shots,
            league: r.league,
            season: r.season,
        }
    }
}
