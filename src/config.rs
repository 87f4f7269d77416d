use std::env;

pub const ROSTER_SEASON: u32 = 2023;

// Statistics default to Premier League 2023. The upstream source we mirror
// queried this league for every team regardless of where it actually plays;
// the league id and season are parameters here so callers can do better.
pub const STATS_LEAGUE_ID: u32 = 39;
pub const STATS_SEASON: u32 = 2023;

pub const H2H_FROM: &str = "2019-01-01";
pub const H2H_TO: &str = "2023-12-01";

const DEFAULT_BASE_URL: &str = "https://v3.football.api-sports.io";
const API_HOST: &str = "v3.football.api-sports.io";

#[derive(Debug, Clone, Copy)]
pub struct League {
    pub key: &'static str,
    pub label: &'static str,
    pub flag: &'static str,
    pub api_id: u32,
}

pub const LEAGUES: &[League] = &[
    League {
        key: "premier-league",
        label: "Premier League",
        flag: "england",
        api_id: 39,
    },
    League {
        key: "la-liga",
        label: "La Liga",
        flag: "spain",
        api_id: 140,
    },
    League {
        key: "serie-a",
        label: "Serie A",
        flag: "italy",
        api_id: 71,
    },
    League {
        key: "bundesliga",
        label: "Bundesliga",
        flag: "germany",
        api_id: 78,
    },
    League {
        key: "major-league-soccer",
        label: "Major League Soccer",
        flag: "usa",
        api_id: 253,
    },
];

pub fn league_by_key(key: &str) -> Option<&'static League> {
    LEAGUES.iter().find(|league| league.key == key)
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub api_key: String,
}

impl ApiConfig {
    /// Reads FOOTBALL_API_KEY / FOOTBALL_API_BASE_URL. Returns None when no
    /// key is configured, which puts the app into bundled-roster demo mode.
    pub fn from_env() -> Option<Self> {
        let api_key = opt_env("FOOTBALL_API_KEY")?;
        let base_url =
            opt_env("FOOTBALL_API_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Some(Self { base_url, api_key })
    }

    pub fn headers(&self) -> [(&'static str, String); 2] {
        [
            ("x-rapidapi-host", API_HOST.to_string()),
            ("x-rapidapi-key", self.api_key.clone()),
        ]
    }
}

fn opt_env(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .and_then(|val| if val.trim().is_empty() { None } else { Some(val) })
}
