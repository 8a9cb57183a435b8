//! Converts raw API-Football fixture payloads into flat match records.
//!
//! Total over its input: a missing or malformed field degrades to its
//! documented default and never surfaces as an error to the caller.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde_json::Value;

use crate::types::{NewMatch, UNKNOWN_DATE};

/// Statistic labels inside the per-team statistics list. Entries are matched
/// by label, never by position — the source does not guarantee ordering.
const STAT_POSSESSION: &str = "Ball Possession";
const STAT_YELLOW_CARDS: &str = "Yellow Cards";
const STAT_TOTAL_SHOTS: &str = "Total Shots";

/// Normalize one raw fixture into a `NewMatch`.
///
/// Defaults when a path is missing or malformed: 0 for counts and ids,
/// `None` for goals and possession, empty strings for names, `true` for the
/// perspective flag, and the Unix epoch for the kickoff date.
pub fn normalize(raw: &Value) -> NewMatch {
    let home_team = str_at(raw, "/teams/home/name");
    let away_team = str_at(raw, "/teams/away/name");
    let home_id = raw.pointer("/teams/home/id").and_then(Value::as_i64);
    let away_id = raw.pointer("/teams/away/id").and_then(Value::as_i64);

    let (home_stats, away_stats) = team_stat_blocks(
        raw.get("statistics"),
        home_id,
        &home_team,
        away_id,
        &away_team,
    );

    NewMatch {
        fixture_id: raw.pointer("/fixture/id").and_then(as_int).unwrap_or(0),
        date: raw
            .pointer("/fixture/date")
            .and_then(Value::as_str)
            .and_then(canonical_date)
            .unwrap_or_else(|| UNKNOWN_DATE.to_string()),
        home_team,
        away_team,
        is_home: true,
        home_goals: raw.pointer("/goals/home").and_then(as_int),
        away_goals: raw.pointer("/goals/away").and_then(as_int),
        home_possession: stat_value(home_stats, STAT_POSSESSION).map(clamp_percent),
        away_possession: stat_value(away_stats, STAT_POSSESSION).map(clamp_percent),
        home_yellow_cards: stat_value(home_stats, STAT_YELLOW_CARDS).unwrap_or(0),
        away_yellow_cards: stat_value(away_stats, STAT_YELLOW_CARDS).unwrap_or(0),
        home_shots: stat_value(home_stats, STAT_TOTAL_SHOTS).unwrap_or(0),
        away_shots: stat_value(away_stats, STAT_TOTAL_SHOTS).unwrap_or(0),
        league: str_at(raw, "/league/name"),
        season: raw.pointer("/league/season").and_then(as_int).unwrap_or(0),
    }
}

// ---------------------------------------------------------------------------
// Canonical dates
// ---------------------------------------------------------------------------

/// Parse an RFC 3339 / ISO 8601 timestamp (any offset) or a bare
/// `YYYY-MM-DD` date, and re-encode it in the single form stored for every
/// record: UTC seconds with a `Z` suffix.
pub fn canonical_date(s: &str) -> Option<String> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(
            dt.with_timezone(&Utc)
                .to_rfc3339_opts(SecondsFormat::Secs, true),
        );
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|ndt| {
            DateTime::<Utc>::from_naive_utc_and_offset(ndt, Utc)
                .to_rfc3339_opts(SecondsFormat::Secs, true)
        })
}

/// Canonicalize a filter lower bound. A bare date is already the start of
/// its day. Unparseable bounds impose no constraint.
pub fn start_bound(s: &str) -> Option<String> {
    canonical_date(s)
}

/// Canonicalize a filter upper bound. A bare date expands to the end of its
/// day so the bound stays inclusive of the whole day.
pub fn end_bound(s: &str) -> Option<String> {
    let s = s.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return d.and_hms_opt(23, 59, 59).map(|ndt| {
            DateTime::<Utc>::from_naive_utc_and_offset(ndt, Utc)
                .to_rfc3339_opts(SecondsFormat::Secs, true)
        });
    }
    canonical_date(s)
}

// ---------------------------------------------------------------------------
// Field coercion
// ---------------------------------------------------------------------------

/// Lenient integer coercion: accepts JSON integers, floats, and numeric
/// strings, including possession values with a trailing `%`.
fn as_int(v: &Value) -> Option<i64> {
    if let Some(i) = v.as_i64() {
        return Some(i);
    }
    if let Some(f) = v.as_f64() {
        return Some(f.round() as i64);
    }
    let s = v.as_str()?.trim();
    let s = s.strip_suffix('%').unwrap_or(s).trim();
    if let Ok(i) = s.parse::<i64>() {
        return Some(i);
    }
    s.parse::<f64>().ok().map(|f| f.round() as i64)
}

fn clamp_percent(v: i64) -> i64 {
    v.clamp(0, 100)
}

fn str_at(raw: &Value, path: &str) -> String {
    raw.pointer(path)
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string()
}

// ---------------------------------------------------------------------------
// Statistics extraction
// ---------------------------------------------------------------------------

/// Resolve the home and away per-team statistics blocks. Blocks are matched
/// by team id, then team name, and only fall back to position when neither
/// identifies them.
fn team_stat_blocks<'a>(
    stats: Option<&'a Value>,
    home_id: Option<i64>,
    home_name: &str,
    away_id: Option<i64>,
    away_name: &str,
) -> (Option<&'a Value>, Option<&'a Value>) {
    let Some(blocks) = stats.and_then(Value::as_array) else {
        return (None, None);
    };
    let find = |id: Option<i64>, name: &str, fallback: usize| -> Option<&'a Value> {
        blocks
            .iter()
            .find(|b| {
                let block_id = b.pointer("/team/id").and_then(Value::as_i64);
                let block_name = b.pointer("/team/name").and_then(Value::as_str);
                (id.is_some() && block_id == id)
                    || (!name.is_empty() && block_name == Some(name))
            })
            .or_else(|| blocks.get(fallback))
    };
    (
        find(home_id, home_name, 0),
        find(away_id, away_name, 1),
    )
}

/// Find the entry whose `type` label matches and coerce its value. Returns
/// `None` when the block, the label, or a usable value is absent.
fn stat_value(block: Option<&Value>, label: &str) -> Option<i64> {
    let entries = block?.get("statistics")?.as_array()?;
    entries
        .iter()
        .find(|e| {
            e.get("type")
                .and_then(Value::as_str)
                .map_or(false, |t| t.eq_ignore_ascii_case(label))
        })
        .and_then(|e| e.get("value"))
        .and_then(as_int)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_fixture() -> Value {
        json!({
            "fixture": { "id": 1034502, "date": "2025-07-11T20:00:00+00:00" },
            "teams": {
                "home": { "id": 49, "name": "Chelsea" },
                "away": { "id": 42, "name": "Arsenal" }
            },
            "goals": { "home": 2, "away": 1 },
            "league": { "name": "Premier League", "season": 2025 },
            "statistics": [
                {
                    "team": { "id": 49, "name": "Chelsea" },
                    "statistics": [
                        { "type": "Ball Possession", "value": "54%" },
                        { "type": "Yellow Cards", "value": 1 },
                        { "type": "Total Shots", "value": 7 }
                    ]
                },
                {
                    "team": { "id": 42, "name": "Arsenal" },
                    "statistics": [
                        { "type": "Total Shots", "value": 11 },
                        { "type": "Ball Possession", "value": "46%" },
                        { "type": "Yellow Cards", "value": 3 }
                    ]
                }
            ]
        })
    }

    #[test]
    fn full_fixture_extracts_every_field() {
        let m = normalize(&full_fixture());
        assert_eq!(m.fixture_id, 1034502);
        assert_eq!(m.date, "2025-07-11T20:00:00Z");
        assert_eq!(m.home_team, "Chelsea");
        assert_eq!(m.away_team, "Arsenal");
        assert!(m.is_home);
        assert_eq!(m.home_goals, Some(2));
        assert_eq!(m.away_goals, Some(1));
        assert_eq!(m.home_possession, Some(54));
        assert_eq!(m.away_possession, Some(46));
        assert_eq!(m.home_yellow_cards, 1);
        assert_eq!(m.away_yellow_cards, 3);
        assert_eq!(m.home_shots, 7);
        assert_eq!(m.away_shots, 11);
        assert_eq!(m.league, "Premier League");
        assert_eq!(m.season, 2025);
    }

    #[test]
    fn empty_payload_yields_all_defaults() {
        let m = normalize(&json!({}));
        assert_eq!(m.fixture_id, 0);
        assert_eq!(m.date, UNKNOWN_DATE);
        assert_eq!(m.home_team, "");
        assert_eq!(m.away_team, "");
        assert!(m.is_home);
        assert_eq!(m.home_goals, None);
        assert_eq!(m.away_goals, None);
        assert_eq!(m.home_possession, None);
        assert_eq!(m.away_possession, None);
        assert_eq!(m.home_yellow_cards, 0);
        assert_eq!(m.away_yellow_cards, 0);
        assert_eq!(m.home_shots, 0);
        assert_eq!(m.away_shots, 0);
        assert_eq!(m.league, "");
        assert_eq!(m.season, 0);
    }

    #[test]
    fn non_object_payload_yields_defaults() {
        assert_eq!(normalize(&json!(null)), NewMatch::default());
        assert_eq!(normalize(&json!("garbage")), NewMatch::default());
    }

    #[test]
    fn numeric_strings_and_floats_coerce_to_integers() {
        let m = normalize(&json!({
            "fixture": { "id": "1034502" },
            "goals": { "home": "2", "away": 1.0 },
            "league": { "season": "2025" }
        }));
        assert_eq!(m.fixture_id, 1034502);
        assert_eq!(m.home_goals, Some(2));
        assert_eq!(m.away_goals, Some(1));
        assert_eq!(m.season, 2025);
    }

    #[test]
    fn uncoercible_values_fall_back_to_defaults() {
        let m = normalize(&json!({
            "fixture": { "id": { "nested": true } },
            "goals": { "home": "abc", "away": null },
            "teams": { "home": { "name": 42 } }
        }));
        assert_eq!(m.fixture_id, 0);
        assert_eq!(m.home_goals, None);
        assert_eq!(m.away_goals, None);
        assert_eq!(m.home_team, "");
    }

    #[test]
    fn statistics_blocks_resolved_by_team_id_not_position() {
        // Away team listed first — positional indexing would swap every stat.
        let mut fixture = full_fixture();
        let blocks = fixture["statistics"].as_array_mut().unwrap();
        blocks.reverse();

        let m = normalize(&fixture);
        assert_eq!(m.home_possession, Some(54));
        assert_eq!(m.away_possession, Some(46));
        assert_eq!(m.home_shots, 7);
        assert_eq!(m.away_shots, 11);
        assert_eq!(m.home_yellow_cards, 1);
        assert_eq!(m.away_yellow_cards, 3);
    }

    #[test]
    fn statistics_entries_matched_by_label_not_index() {
        // The away block in full_fixture() deliberately lists shots first.
        let m = normalize(&full_fixture());
        assert_eq!(m.away_shots, 11);
        assert_eq!(m.away_possession, Some(46));
    }

    #[test]
    fn missing_statistics_list_defaults_counts_and_possession() {
        let mut fixture = full_fixture();
        fixture.as_object_mut().unwrap().remove("statistics");
        let m = normalize(&fixture);
        assert_eq!(m.home_possession, None);
        assert_eq!(m.home_yellow_cards, 0);
        assert_eq!(m.home_shots, 0);
        // Unrelated fields unaffected.
        assert_eq!(m.home_goals, Some(2));
    }

    #[test]
    fn null_stat_value_is_absent_not_zero_for_possession() {
        let fixture = json!({
            "teams": { "home": { "id": 1, "name": "A" }, "away": { "id": 2, "name": "B" } },
            "statistics": [
                { "team": { "id": 1 }, "statistics": [
                    { "type": "Ball Possession", "value": null },
                    { "type": "Yellow Cards", "value": null }
                ] },
                { "team": { "id": 2 }, "statistics": [] }
            ]
        });
        let m = normalize(&fixture);
        assert_eq!(m.home_possession, None);
        assert_eq!(m.home_yellow_cards, 0);
    }

    #[test]
    fn possession_clamped_to_percent_range() {
        let fixture = json!({
            "teams": { "home": { "id": 1, "name": "A" }, "away": { "id": 2, "name": "B" } },
            "statistics": [
                { "team": { "id": 1 }, "statistics": [
                    { "type": "Ball Possession", "value": "140%" }
                ] },
                { "team": { "id": 2 }, "statistics": [
                    { "type": "Ball Possession", "value": -3 }
                ] }
            ]
        });
        let m = normalize(&fixture);
        assert_eq!(m.home_possession, Some(100));
        assert_eq!(m.away_possession, Some(0));
    }

    #[test]
    fn offset_dates_canonicalize_to_utc_z() {
        assert_eq!(
            canonical_date("2025-07-11T22:00:00+02:00").as_deref(),
            Some("2025-07-11T20:00:00Z")
        );
        assert_eq!(
            canonical_date("2025-07-11T20:00:00.123Z").as_deref(),
            Some("2025-07-11T20:00:00Z")
        );
        assert_eq!(
            canonical_date("2025-07-11").as_deref(),
            Some("2025-07-11T00:00:00Z")
        );
        assert_eq!(canonical_date("not a date"), None);
    }

    #[test]
    fn malformed_date_falls_back_to_epoch() {
        let m = normalize(&json!({ "fixture": { "date": "tomorrow-ish" } }));
        assert_eq!(m.date, UNKNOWN_DATE);
    }

    #[test]
    fn end_bound_expands_bare_date_to_end_of_day() {
        assert_eq!(
            end_bound("2025-07-05").as_deref(),
            Some("2025-07-05T23:59:59Z")
        );
        assert_eq!(
            end_bound("2025-07-05T12:00:00Z").as_deref(),
            Some("2025-07-05T12:00:00Z")
        );
        assert_eq!(
            start_bound("2025-07-05").as_deref(),
            Some("2025-07-05T00:00:00Z")
        );
        assert_eq!(end_bound("garbage"), None);
    }
}
