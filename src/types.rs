use serde::{Deserialize, Serialize};

/// Canonical timestamp stored for a match whose kickoff date is unknown.
pub const UNKNOWN_DATE: &str = "1970-01-01T00:00:00Z";

// ---------------------------------------------------------------------------
// Match records
// ---------------------------------------------------------------------------

/// The canonical flat representation of one match as persisted in the store.
/// `id` is assigned by the store at insert time and is immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: i64,
    /// External source fixture id. Not guaranteed unique within the store.
    pub fixture_id: i64,
    /// Kickoff time, always RFC 3339 UTC seconds with a `Z` suffix.
    pub date: String,
    pub home_team: String,
    pub away_team: String,
    /// Perspective flag. Defaulted at normalization, never derived.
    pub is_home: bool,
    pub home_goals: Option<i64>,
    pub away_goals: Option<i64>,
    /// Best-effort extraction; the source does not reliably carry possession.
    pub home_possession: Option<i64>,
    pub away_possession: Option<i64>,
    pub home_yellow_cards: i64,
    pub away_yellow_cards: i64,
    pub home_shots: i64,
    pub away_shots: i64,
    pub league: String,
    pub season: i64,
}

/// A normalized match that has not been inserted yet. The normalizer only
/// ever produces this shape; the store id does not exist until insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMatch {
    pub fixture_id: i64,
    pub date: String,
    pub home_team: String,
    pub away_team: String,
    pub is_home: bool,
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

impl Default for NewMatch {
    fn default() -> Self {
        Self {
            fixture_id: 0,
            date: UNKNOWN_DATE.to_string(),
            home_team: String::new(),
            away_team: String::new(),
            is_home: true,
            home_goals: None,
            away_goals: None,
            home_possession: None,
            away_possession: None,
            home_yellow_cards: 0,
            away_yellow_cards: 0,
            home_shots: 0,
            away_shots: 0,
            league: String::new(),
            season: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Partial updates
// ---------------------------------------------------------------------------

/// Field-by-field edit applied against the declared schema. Absent fields
/// are left untouched; an empty patch on an existing record is a no-op.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchPatch {
    pub fixture_id: Option<i64>,
    pub date: Option<String>,
    pub home_team: Option<String>,
    pub away_team: Option<String>,
    pub is_home: Option<bool>,
    pub home_goals: Option<i64>,
    pub away_goals: Option<i64>,
    pub home_possession: Option<i64>,
    pub away_possession: Option<i64>,
    pub home_yellow_cards: Option<i64>,
    pub away_yellow_cards: Option<i64>,
    pub home_shots: Option<i64>,
    pub away_shots: Option<i64>,
    pub league: Option<String>,
    pub season: Option<i64>,
}

impl MatchPatch {
    pub fn is_empty(&self) -> bool {
        self.fixture_id.is_none()
            && self.date.is_none()
            && self.home_team.is_none()
            && self.away_team.is_none()
            && self.is_home.is_none()
            && self.home_goals.is_none()
            && self.away_goals.is_none()
            && self.home_possession.is_none()
            && self.away_possession.is_none()
            && self.home_yellow_cards.is_none()
            && self.away_yellow_cards.is_none()
            && self.home_shots.is_none()
            && self.away_shots.is_none()
            && self.league.is_none()
            && self.season.is_none()
    }
}

// ---------------------------------------------------------------------------
// Filter criteria
// ---------------------------------------------------------------------------

/// User-selected constraints for listing matches. Every field is optional;
/// an empty criteria set matches every record. Dates accept either full
/// RFC 3339 timestamps or bare `YYYY-MM-DD` dates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    /// Matches either side: home or away.
    pub team: Option<String>,
    pub league: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_patch_is_empty() {
        assert!(MatchPatch::default().is_empty());
    }

    #[test]
    fn patch_with_one_field_is_not_empty() {
        let patch = MatchPatch {
            home_goals: Some(3),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }
}
