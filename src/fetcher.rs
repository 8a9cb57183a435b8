//! REST client for the API-Football fixtures endpoint, plus a sample-data
//! generator for exercising the pipeline without an API key.

use std::time::Duration;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::{Config, API_FOOTBALL_HOST, FETCH_TIMEOUT_SECS};
use crate::error::{AppError, Result};
use crate::normalizer::normalize;
use crate::types::NewMatch;

/// Fixture query filters forwarded to API-Football. All optional; the API
/// rejects fully unconstrained queries on some plans, so callers usually
/// supply at least a date.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FetchParams {
    /// Kickoff date, `YYYY-MM-DD`.
    pub date: Option<String>,
    /// API-Football league id (39 = Premier League).
    pub league: Option<i64>,
    /// Season start year.
    pub season: Option<i64>,
}

#[derive(Debug, Default, Serialize)]
pub struct FetchStats {
    /// Items delivered by the API before normalization.
    pub api_total: usize,
    pub normalized: usize,
}

/// Fetch fixtures from API-Football and run each response item through the
/// normalizer. Refuses to issue a request without an API key.
pub async fn fetch_fixtures(
    cfg: &Config,
    params: &FetchParams,
) -> Result<(Vec<NewMatch>, FetchStats)> {
    let key = cfg
        .api_football_key
        .as_deref()
        .ok_or_else(|| AppError::Config("API_FOOTBALL_KEY is not set".to_string()))?;

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
        .build()?;

    let mut query: Vec<(&str, String)> = Vec::new();
    if let Some(date) = &params.date {
        query.push(("date", date.clone()));
    }
    if let Some(league) = params.league {
        query.push(("league", league.to_string()));
    }
    if let Some(season) = params.season {
        query.push(("season", season.to_string()));
    }

    let url = format!("{}/fixtures", cfg.api_football_url);
    debug!("fetching fixtures from {url} ({} filters)", query.len());

    let resp: serde_json::Value = client
        .get(&url)
        .header("x-rapidapi-key", key)
        .header("x-rapidapi-host", API_FOOTBALL_HOST)
        .query(&query)
        .send()
        .await?
        .json()
        .await?;

    let items = match resp.get("response").and_then(|r| r.as_array()) {
        Some(a) => a,
        None => {
            return Err(AppError::Fetch(
                "fixtures response missing the `response` array".to_string(),
            ))
        }
    };

    let mut stats = FetchStats {
        api_total: items.len(),
        normalized: 0,
    };
    let mut matches = Vec::with_capacity(items.len());
    for item in items {
        matches.push(normalize(item));
        stats.normalized += 1;
    }

    info!(
        "fetched {} fixtures, normalized {}",
        stats.api_total, stats.normalized
    );
    Ok((matches, stats))
}

/// Generate `count` plausible matches for trying the dashboard offline.
/// Same shape the normalizer produces, one per day counting back from now.
pub fn sample_matches(count: usize) -> Vec<NewMatch> {
    let now = Utc::now();
    (0..count)
        .map(|i| {
            let date = (now - chrono::Duration::days(i as i64))
                .to_rfc3339_opts(SecondsFormat::Secs, true);
            NewMatch {
                fixture_id: 1_034_502 + i as i64,
                date,
                home_team: format!("Home Team {}", i + 1),
                away_team: format!("Away Team {}", i + 1),
                is_home: true,
                home_goals: Some((i % 4) as i64),
                away_goals: Some(((i + 1) % 3) as i64),
                home_possession: Some(54),
                away_possession: Some(46),
                home_yellow_cards: (i % 3) as i64,
                away_yellow_cards: ((i + 1) % 4) as i64,
                home_shots: (7 + i % 5) as i64,
                away_shots: (11 - i % 4) as i64,
                league: if i % 2 == 0 {
                    "Sample League".to_string()
                } else {
                    "Other League".to_string()
                },
                season: 2025,
            }
        })
        .collect()
}
