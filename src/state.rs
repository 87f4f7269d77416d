use std::collections::HashMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::team_stats::StatsReport;

const MAX_LOG_LINES: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: u32,
    pub name: String,
    pub league: String,
    pub logo: String,
    pub country: String,
    pub founded: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Home,
    Away,
}

impl Slot {
    pub fn index(self) -> usize {
        match self {
            Slot::Home => 0,
            Slot::Away => 1,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    pub league1: Option<String>,
    pub league2: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectEffect {
    pub fetch_needed: bool,
}

impl SelectionState {
    pub fn league_for(&self, slot: Slot) -> Option<&str> {
        match slot {
            Slot::Home => self.league1.as_deref(),
            Slot::Away => self.league2.as_deref(),
        }
    }

    pub fn both_selected(&self) -> bool {
        self.league1.is_some() && self.league2.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct MatchPreview {
    pub team1: Team,
    pub team2: Team,
    pub stats1: StatsReport,
    pub stats2: StatsReport,
    pub h2h: (u32, u32),
}

#[derive(Debug, Clone)]
pub enum ProviderCommand {
    FetchRoster { league_key: String },
    GeneratePreview { league1: String, league2: String },
    InvalidateCache,
}

#[derive(Debug, Clone)]
pub enum Delta {
    SetRoster {
        league_key: String,
        teams: Vec<Team>,
    },
    RosterLoading {
        league_key: String,
        loading: bool,
    },
    SetPreview(Box<MatchPreview>),
    PreviewLoading(bool),
    SetCacheStamp(Option<u64>),
    Log(String),
}

pub struct AppState {
    pub selection: SelectionState,
    pub rosters: HashMap<String, Vec<Team>>,
    pub rosters_loading: HashMap<String, bool>,
    pub preview: Option<MatchPreview>,
    pub preview_loading: bool,
    pub cache_stamp_ms: Option<u64>,
    pub focus_slot: Slot,
    pub league_cursor: usize,
    pub help_overlay: bool,
    pub logs: Vec<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            selection: SelectionState::default(),
            rosters: HashMap::new(),
            rosters_loading: HashMap::new(),
            preview: None,
            preview_loading: false,
            cache_stamp_ms: None,
            focus_slot: Slot::Home,
            league_cursor: 0,
            help_overlay: false,
            logs: Vec::new(),
        }
    }

    /// Explicit selection transition. The returned effect tells the caller
    /// whether a roster fetch must be issued for this league; the cache and
    /// the selection remain separate stores composed by the orchestrator.
    pub fn select_league(&mut self, slot: Slot, key: &str) -> SelectEffect {
        match slot {
            Slot::Home => self.selection.league1 = Some(key.to_string()),
            Slot::Away => self.selection.league2 = Some(key.to_string()),
        }
        let cached = self
            .rosters
            .get(key)
            .map(|roster| !roster.is_empty())
            .unwrap_or(false);
        SelectEffect {
            fetch_needed: !cached,
        }
    }

    pub fn roster_loading(&self, key: &str) -> bool {
        self.rosters_loading.get(key).copied().unwrap_or(false)
    }

    pub fn push_log(&mut self, line: impl Into<String>) {
        self.logs.push(line.into());
        if self.logs.len() > MAX_LOG_LINES {
            let drop = self.logs.len() - MAX_LOG_LINES;
            self.logs.drain(..drop);
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

pub fn apply_delta(state: &mut AppState, delta: Delta) {
    match delta {
        Delta::SetRoster { league_key, teams } => {
            state.rosters_loading.insert(league_key.clone(), false);
            state.rosters.insert(league_key, teams);
        }
        Delta::RosterLoading {
            league_key,
            loading,
        } => {
            state.rosters_loading.insert(league_key, loading);
        }
        Delta::SetPreview(preview) => {
            state.preview = Some(*preview);
            state.preview_loading = false;
        }
        Delta::PreviewLoading(loading) => state.preview_loading = loading,
        Delta::SetCacheStamp(stamp) => state.cache_stamp_ms = stamp,
        Delta::Log(line) => state.push_log(line),
    }
}

pub fn pick_random_team<'a>(roster: &'a [Team], rng: &mut impl Rng) -> Option<&'a Team> {
    if roster.is_empty() {
        return None;
    }
    let idx = rng.gen_range(0..roster.len());
    roster.get(idx)
}
