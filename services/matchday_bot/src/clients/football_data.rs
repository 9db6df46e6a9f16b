//! football-data.org v4 client.
//!
//! Fetches the tracked team's fixture for today and the detailed match
//! resource (lineups, events, score). Parsing is tolerant: optional fields
//! default instead of erroring, only a missing match id is fatal to a parse.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Days, Utc};
use log::{debug, info};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use match_core::{
    EventKind, FinalScore, Lineup, MatchEvent, MatchSnapshot, MatchSource, MatchStatus, TeamRef,
};

#[derive(Debug, Clone)]
pub struct FootballDataClient {
    http: Client,
    base_url: String,
    api_key: String,
    team_id: i64,
}

impl FootballDataClient {
    pub fn new(base_url: String, api_key: String, team_id: i64) -> Self {
        Self {
            http: Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url,
            api_key,
            team_id,
        }
    }

    async fn get_json(&self, url: &str, query: &[(&str, String)]) -> Result<Value> {
        let resp = self
            .http
            .get(url)
            .header("X-Auth-Token", &self.api_key)
            .query(query)
            .send()
            .await
            .with_context(|| format!("Request failed: {url}"))?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(anyhow!("football-data non-2xx: {status} url={url} body={body}"));
        }
        resp.json::<Value>()
            .await
            .with_context(|| format!("Invalid JSON from {url}"))
    }
}

#[async_trait]
impl MatchSource for FootballDataClient {
    async fn today_match(&self) -> Result<Option<MatchSnapshot>> {
        let today = Utc::now().date_naive();
        // Include tomorrow so late evening kickoffs survive timezone skew.
        let tomorrow = today
            .checked_add_days(Days::new(1))
            .unwrap_or(today);

        let url = format!(
            "{}/teams/{}/matches",
            self.base_url.trim_end_matches('/'),
            self.team_id
        );
        let data = self
            .get_json(
                &url,
                &[
                    ("dateFrom", today.to_string()),
                    ("dateTo", tomorrow.to_string()),
                ],
            )
            .await?;

        let Some(first) = data["matches"].as_array().and_then(|m| m.first()) else {
            info!("No match found for team {} on {today}", self.team_id);
            return Ok(None);
        };
        let snapshot = parse_snapshot(first)?;
        debug!(
            "Found match {}: {} vs {}",
            snapshot.id, snapshot.home.name, snapshot.away.name
        );
        Ok(Some(snapshot))
    }

    async fn match_details(&self, match_id: i64) -> Result<MatchSnapshot> {
        let url = format!("{}/matches/{match_id}", self.base_url.trim_end_matches('/'));
        let data = self.get_json(&url, &[]).await?;
        parse_snapshot(&data)
    }
}

fn parse_team(v: &Value) -> TeamRef {
    TeamRef {
        id: v["id"].as_i64().unwrap_or_default(),
        name: v["name"].as_str().unwrap_or_default().to_string(),
    }
}

fn opt_string(v: &Value) -> Option<String> {
    v.as_str().map(|s| s.to_string()).filter(|s| !s.is_empty())
}

/// Convert one football-data match document (summary or detail) into a snapshot.
pub fn parse_snapshot(data: &Value) -> Result<MatchSnapshot> {
    let id = data["id"]
        .as_i64()
        .ok_or_else(|| anyhow!("Match document has no id"))?;

    let status = MatchStatus::parse(data["status"].as_str().unwrap_or_default());
    let utc_date = data["utcDate"]
        .as_str()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|d| d.with_timezone(&Utc));

    let mut lineups = Vec::new();
    if let Some(entries) = data["lineups"].as_array() {
        for entry in entries {
            let starters = entry["startXI"]
                .as_array()
                .map(|players| {
                    players
                        .iter()
                        .filter_map(|p| opt_string(&p["name"]))
                        .collect()
                })
                .unwrap_or_default();
            lineups.push(Lineup {
                team_id: entry["team"]["id"].as_i64().unwrap_or_default(),
                formation: opt_string(&entry["formation"]),
                starters,
            });
        }
    }

    let mut events = Vec::new();
    if let Some(entries) = data["events"].as_array() {
        for entry in entries {
            let kind = match entry["type"].as_str() {
                Some("GOAL") => EventKind::Goal,
                Some("SUBSTITUTION") => EventKind::Substitution,
                _ => continue,
            };
            let Some(event_id) = entry["id"].as_i64() else {
                // An event without a stable id cannot be deduplicated; skip it
                // rather than announce it on every run.
                continue;
            };
            events.push(MatchEvent {
                id: event_id,
                kind,
                team: parse_team(&entry["team"]),
                player: opt_string(&entry["player"]["name"]),
                // On substitutions the API reports the outgoing player in the
                // assist slot.
                counterpart: opt_string(&entry["assist"]["name"]),
                minute: entry["minute"].as_u64().map(|m| m as u32),
            });
        }
    }

    let full_time = &data["score"]["fullTime"];
    let final_score = match (full_time["home"].as_u64(), full_time["away"].as_u64()) {
        (Some(home), Some(away)) => Some(FinalScore {
            home: home as u32,
            away: away as u32,
        }),
        _ => None,
    };

    Ok(MatchSnapshot {
        id,
        status,
        utc_date,
        home: parse_team(&data["homeTeam"]),
        away: parse_team(&data["awayTeam"]),
        lineups,
        events,
        final_score,
    })
}
