use anyhow::{Context, Result};
use rand::Rng;
use serde::Deserialize;

use crate::config::ApiConfig;
use crate::http_client::fetch_json;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamStats {
    pub rating: u32,
    pub attacking: u32,
    pub defensive: u32,
    pub win_percentage: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsSource {
    Api,
    Fallback,
}

/// Normalized scores plus where they came from. The fallback path renders
/// identically but must stay detectable at the data layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsReport {
    pub stats: TeamStats,
    pub source: StatsSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizeError {
    NoMatchesPlayed,
}

impl std::fmt::Display for NormalizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NormalizeError::NoMatchesPlayed => write!(f, "team has played zero matches"),
        }
    }
}

impl std::error::Error for NormalizeError {}

#[derive(Debug, Deserialize)]
struct StatisticsResponse {
    #[serde(default)]
    results: u32,
    response: Option<SeasonRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeasonRecord {
    pub fixtures: FixtureTotals,
    pub goals: GoalsBlock,
    pub clean_sheet: CountTotal,
    pub failed_to_score: CountTotal,
    pub penalty: PenaltyBlock,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FixtureTotals {
    pub played: CountTotal,
    pub wins: CountTotal,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CountTotal {
    pub total: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoalsBlock {
    #[serde(rename = "for")]
    pub scored: GoalsSide,
    pub against: GoalsSide,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoalsSide {
    pub total: CountTotal,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PenaltyBlock {
    pub scored: CountTotal,
    pub total: u32,
}

/// Compresses a raw season record into four comparable 0-100 scores.
/// Pure and deterministic; the weighted sum is computed first, then clamped
/// to [0,100], then rounded to the nearest integer.
pub fn normalize(record: &SeasonRecord) -> Result<TeamStats, NormalizeError> {
    let played = record.fixtures.played.total;
    if played == 0 {
        return Err(NormalizeError::NoMatchesPlayed);
    }
    let played = played as f64;

    let win_pct = record.fixtures.wins.total as f64 / played * 100.0;

    let goals_for = record.goals.scored.total.total as f64;
    let goals_against = record.goals.against.total.total as f64;
    let goal_diff_per_game = (goals_for - goals_against) / played;
    let goals_for_per_game = goals_for / played;
    let goals_against_per_game = goals_against / played;

    let clean_sheet_pct = record.clean_sheet.total as f64 / played * 100.0;
    let scoring_consistency =
        (played - record.failed_to_score.total as f64) / played * 100.0;
    let penalty_efficiency = if record.penalty.total > 0 {
        record.penalty.scored.total as f64 / record.penalty.total as f64 * 100.0
    } else {
        100.0
    };

    let rating = win_pct * 0.4
        + ((goal_diff_per_game + 2.0) * 25.0).min(100.0) * 0.3
        + (goals_for_per_game * 20.0).min(100.0) * 0.2
        + clean_sheet_pct * 0.1;

    let attacking = (goals_for_per_game * 25.0).min(100.0) * 0.5
        + scoring_consistency * 0.3
        + penalty_efficiency * 0.2;

    let defensive = (100.0 - goals_against_per_game * 30.0).max(0.0) * 0.6
        + clean_sheet_pct * 0.4;

    Ok(TeamStats {
        rating: score(rating),
        attacking: score(attacking),
        defensive: score(defensive),
        win_percentage: score(win_pct),
    })
}

fn score(raw: f64) -> u32 {
    raw.clamp(0.0, 100.0).round() as u32
}

/// Substitute scores when the upstream is unreachable or empty: rating,
/// attacking and defensive in [60,89], win percentage in [40,79].
pub fn fallback_stats(rng: &mut impl Rng) -> TeamStats {
    TeamStats {
        rating: rng.gen_range(60..90),
        attacking: rng.gen_range(60..90),
        defensive: rng.gen_range(60..90),
        win_percentage: rng.gen_range(40..80),
    }
}

pub fn parse_statistics_json(raw: &str) -> Result<SeasonRecord> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Err(anyhow::anyhow!("empty statistics response"));
    }
    let parsed: StatisticsResponse =
        serde_json::from_str(trimmed).context("invalid statistics json")?;
    if parsed.results == 0 {
        return Err(anyhow::anyhow!("statistics returned zero results"));
    }
    parsed
        .response
        .ok_or_else(|| anyhow::anyhow!("statistics response missing body"))
}

pub fn fetch_team_stats(
    cfg: &ApiConfig,
    team_id: u32,
    league_id: u32,
    season: u32,
) -> Result<TeamStats> {
    let url = format!(
        "{}/teams/statistics?league={}&season={}&team={}",
        cfg.base_url, league_id, season, team_id
    );
    let body = fetch_json(&url, &cfg.headers()).context("statistics request failed")?;
    let record = parse_statistics_json(&body)?;
    normalize(&record).map_err(anyhow::Error::from)
}

/// Resolves to real scores or the randomized fallback, never an error.
/// Returns the report and the failure message when the fallback was used.
pub fn stats_or_fallback(
    cfg: Option<&ApiConfig>,
    team_id: u32,
    league_id: u32,
    season: u32,
) -> (StatsReport, Option<String>) {
    let err = match cfg {
        Some(cfg) => match fetch_team_stats(cfg, team_id, league_id, season) {
            Ok(stats) => {
                return (
                    StatsReport {
                        stats,
                        source: StatsSource::Api,
                    },
                    None,
                );
            }
            Err(err) => Some(format!("stats fetch failed for team {team_id}: {err}")),
        },
        None => None,
    };
    let mut rng = rand::thread_rng();
    (
        StatsReport {
            stats: fallback_stats(&mut rng),
            source: StatsSource::Fallback,
        },
        err,
    )
}
