//! CSV serialization of match records for the dashboard's export button.
//! Emits every field except the store id, header row first.

use crate::types::MatchRecord;

const HEADER: &[&str] = &[
    "fixture_id",
    "date",
    "home_team",
    "away_team",
    "is_home",
    "home_goals",
    "away_goals",
    "home_possession",
    "away_possession",
    "home_yellow_cards",
    "away_yellow_cards",
    "home_shots",
    "away_shots",
    "league",
    "season",
];

pub fn to_csv(records: &[MatchRecord]) -> String {
    let mut out = String::new();
    out.push_str(&HEADER.join(","));
    out.push('\n');
    for r in records {
        let fields = [
            r.fixture_id.to_string(),
            escape(&r.date),
            escape(&r.home_team),
            escape(&r.away_team),
            r.is_home.to_string(),
            opt(r.home_goals),
            opt(r.away_goals),
            opt(r.home_possession),
            opt(r.away_possession),
            r.home_yellow_cards.to_string(),
            r.away_yellow_cards.to_string(),
            r.home_shots.to_string(),
            r.away_shots.to_string(),
            escape(&r.league),
            r.season.to_string(),
        ];
        out.push_str(&fields.join(","));
        out.push('\n');
    }
    out
}

/// Absent numeric values export as empty cells, not zeroes.
fn opt(v: Option<i64>) -> String {
    v.map(|n| n.to_string()).unwrap_or_default()
}

/// Quote a field when it contains a comma, quote, or line break.
fn escape(field: &str) -> String {
    if field.contains(['"', ',', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
