use anyhow::{Context, Result};
use serde::Deserialize;

use crate::config::{ApiConfig, League, ROSTER_SEASON};
use crate::http_client::fetch_json;
use crate::state::Team;

#[derive(Debug, Deserialize)]
struct TeamsResponse {
    #[serde(default)]
    results: u32,
    #[serde(default)]
    response: Vec<TeamEntry>,
}

#[derive(Debug, Deserialize)]
struct TeamEntry {
    team: ApiTeam,
}

#[derive(Debug, Deserialize)]
struct ApiTeam {
    id: u32,
    name: String,
    #[serde(default)]
    logo: String,
    #[serde(default)]
    country: String,
    founded: Option<u32>,
}

pub fn fetch_league_roster(cfg: &ApiConfig, league: &League) -> Result<Vec<Team>> {
    let url = format!(
        "{}/teams?league={}&season={}",
        cfg.base_url, league.api_id, ROSTER_SEASON
    );
    let body = fetch_json(&url, &cfg.headers()).context("roster request failed")?;
    parse_roster_json(&body, league.key)
}

pub fn parse_roster_json(raw: &str, league_key: &str) -> Result<Vec<Team>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Err(anyhow::anyhow!("empty roster response"));
    }
    let parsed: TeamsResponse = serde_json::from_str(trimmed).context("invalid roster json")?;
    if parsed.results == 0 || parsed.response.is_empty() {
        return Err(anyhow::anyhow!("no teams found for league {league_key}"));
    }
    let teams = parsed
        .response
        .into_iter()
        .map(|entry| Team {
            id: entry.team.id,
            name: entry.team.name,
            league: league_key.to_string(),
            logo: entry.team.logo,
            country: entry.team.country,
            founded: entry.team.founded,
        })
        .collect();
    Ok(teams)
}
