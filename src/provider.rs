use std::sync::mpsc::{Receiver, Sender};
use std::thread;

use anyhow::Result;

use crate::config::{self, ApiConfig, STATS_LEAGUE_ID, STATS_SEASON};
use crate::head_to_head::fetch_head_to_head;
use crate::roster_cache::RosterCache;
use crate::roster_fetch::fetch_league_roster;
use crate::seed::seed_roster;
use crate::state::{pick_random_team, Delta, MatchPreview, ProviderCommand, Team};
use crate::team_stats::{stats_or_fallback, StatsSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterOrigin {
    Cache,
    Fetched,
}

/// Cache-checked roster resolution. The fetch closure runs only on a miss;
/// a hit requires a present, non-empty roster inside the validity window.
pub fn roster_via_cache<F>(
    cache: &mut RosterCache,
    league_key: &str,
    fetch: F,
) -> Result<(Vec<Team>, RosterOrigin)>
where
    F: FnOnce(&str) -> Result<Vec<Team>>,
{
    if let Some(hit) = cache.get(league_key) {
        return Ok((hit.to_vec(), RosterOrigin::Cache));
    }
    let teams = fetch(league_key)?;
    if teams.is_empty() {
        return Err(anyhow::anyhow!("empty roster for {league_key}"));
    }
    cache.put(league_key, teams.clone());
    Ok((teams, RosterOrigin::Fetched))
}

pub fn spawn_provider(tx: Sender<Delta>, cmd_rx: Receiver<ProviderCommand>) {
    thread::spawn(move || {
        let cfg = ApiConfig::from_env();
        let mut cache = RosterCache::load();

        if cfg.is_none() {
            let _ = tx.send(Delta::Log(
                "[WARN] FOOTBALL_API_KEY not set; using bundled demo data".to_string(),
            ));
        }
        let _ = tx.send(Delta::SetCacheStamp(cache.timestamp_ms()));

        while let Ok(cmd) = cmd_rx.recv() {
            match cmd {
                ProviderCommand::FetchRoster { league_key } => {
                    let _ = tx.send(Delta::RosterLoading {
                        league_key: league_key.clone(),
                        loading: true,
                    });
                    let teams = resolve_roster(&mut cache, cfg.as_ref(), &league_key, &tx);
                    let _ = tx.send(Delta::SetRoster { league_key, teams });
                }
                ProviderCommand::GeneratePreview { league1, league2 } => {
                    let _ = tx.send(Delta::PreviewLoading(true));
                    match build_preview(&mut cache, cfg.as_ref(), &league1, &league2, &tx) {
                        Some(preview) => {
                            let _ = tx.send(Delta::SetPreview(Box::new(preview)));
                        }
                        None => {
                            let _ = tx.send(Delta::PreviewLoading(false));
                        }
                    }
                }
                ProviderCommand::InvalidateCache => {
                    cache.invalidate();
                    let _ = tx.send(Delta::SetCacheStamp(None));
                    let _ = tx.send(Delta::Log("[INFO] Roster cache cleared".to_string()));
                }
            }
        }
    });
}

fn resolve_roster(
    cache: &mut RosterCache,
    cfg: Option<&ApiConfig>,
    league_key: &str,
    tx: &Sender<Delta>,
) -> Vec<Team> {
    let resolved = roster_via_cache(cache, league_key, |key| {
        let cfg = cfg.ok_or_else(|| anyhow::anyhow!("no api key configured"))?;
        let league =
            config::league_by_key(key).ok_or_else(|| anyhow::anyhow!("unknown league {key}"))?;
        fetch_league_roster(cfg, league)
    });
    match resolved {
        Ok((teams, RosterOrigin::Cache)) => {
            let _ = tx.send(Delta::Log(format!(
                "[INFO] Using cached roster for {league_key}"
            )));
            teams
        }
        Ok((teams, RosterOrigin::Fetched)) => {
            let _ = tx.send(Delta::Log(format!(
                "[INFO] Fetched {} teams for {league_key}",
                teams.len()
            )));
            let _ = tx.send(Delta::SetCacheStamp(cache.timestamp_ms()));
            teams
        }
        Err(err) => {
            let _ = tx.send(Delta::Log(format!(
                "[WARN] Roster unavailable for {league_key} ({err}); using bundled roster"
            )));
            seed_roster(league_key)
        }
    }
}

fn build_preview(
    cache: &mut RosterCache,
    cfg: Option<&ApiConfig>,
    league1: &str,
    league2: &str,
    tx: &Sender<Delta>,
) -> Option<MatchPreview> {
    let roster1 = resolve_roster(cache, cfg, league1, tx);
    let roster2 = resolve_roster(cache, cfg, league2, tx);

    let mut rng = rand::thread_rng();
    let team1 = pick_random_team(&roster1, &mut rng).cloned();
    let team2 = pick_random_team(&roster2, &mut rng).cloned();
    let (Some(team1), Some(team2)) = (team1, team2) else {
        let _ = tx.send(Delta::Log(
            "[WARN] No teams available for the selected leagues".to_string(),
        ));
        return None;
    };

    // The two statistics pipelines run concurrently and resolve
    // independently; a failed side falls back on its own.
    let (report1, report2) = rayon::join(
        || stats_or_fallback(cfg, team1.id, STATS_LEAGUE_ID, STATS_SEASON),
        || stats_or_fallback(cfg, team2.id, STATS_LEAGUE_ID, STATS_SEASON),
    );
    for (report, err) in [&report1, &report2] {
        if let Some(err) = err {
            let _ = tx.send(Delta::Log(format!("[WARN] {err}")));
        }
        if report.source == StatsSource::Fallback {
            let _ = tx.send(Delta::Log(
                "[INFO] Using randomized fallback statistics".to_string(),
            ));
        }
    }

    let h2h = match cfg {
        Some(cfg) => match fetch_head_to_head(cfg, team1.id, team2.id) {
            Ok(tally) => tally,
            Err(err) => {
                let _ = tx.send(Delta::Log(format!("[WARN] Head-to-head failed: {err}")));
                (0, 0)
            }
        },
        None => (0, 0),
    };

    let _ = tx.send(Delta::Log(format!(
        "[INFO] Preview ready: {} vs {}",
        team1.name, team2.name
    )));

    Some(MatchPreview {
        team1,
        team2,
        stats1: report1.0,
        stats2: report2.0,
        h2h,
    })
}
