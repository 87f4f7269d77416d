use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::state::Team;

const CACHE_DIR: &str = "matchup_terminal";
const CACHE_FILE: &str = "roster_cache.json";

// One validity window for the whole mapping, matching the single timestamp.
const CACHE_TTL_MS: u64 = 24 * 60 * 60 * 1000;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct CacheFile {
    teams: HashMap<String, Vec<Team>>,
    timestamp: u64,
}

/// Time-boxed roster store. The durable form is a single JSON slot holding
/// the entire mapping plus one creation timestamp; it is either fully valid
/// or fully discarded, never partially trusted.
pub struct RosterCache {
    teams: HashMap<String, Vec<Team>>,
    timestamp: u64,
    path: Option<PathBuf>,
}

impl RosterCache {
    pub fn load() -> Self {
        Self::load_from(default_cache_path())
    }

    pub fn load_from(path: Option<PathBuf>) -> Self {
        let mut cache = Self {
            teams: HashMap::new(),
            timestamp: 0,
            path,
        };
        let Some(path) = cache.path.clone() else {
            return cache;
        };
        let Ok(raw) = fs::read_to_string(&path) else {
            return cache;
        };
        let Ok(file) = serde_json::from_str::<CacheFile>(&raw) else {
            // Corrupted payload: drop the durable copy and start empty.
            let _ = fs::remove_file(&path);
            return cache;
        };
        if now_ms().saturating_sub(file.timestamp) > CACHE_TTL_MS {
            let _ = fs::remove_file(&path);
            return cache;
        }
        cache.teams = file.teams;
        cache.timestamp = file.timestamp;
        cache
    }

    /// A hit requires the key to be present AND non-empty; an empty roster
    /// for a known key counts as not yet fetched.
    pub fn get(&self, league_key: &str) -> Option<&[Team]> {
        if !self.is_valid() {
            return None;
        }
        self.teams
            .get(league_key)
            .filter(|roster| !roster.is_empty())
            .map(|roster| roster.as_slice())
    }

    /// Merges the roster into the mapping, restamps the whole mapping with
    /// the current time, and rewrites the entire durable slot. A write
    /// failure leaves the in-memory state authoritative for this session.
    pub fn put(&mut self, league_key: &str, roster: Vec<Team>) {
        self.teams.insert(league_key.to_string(), roster);
        self.timestamp = now_ms();
        let _ = self.persist();
    }

    pub fn is_valid(&self) -> bool {
        if self.teams.is_empty() {
            return false;
        }
        now_ms().saturating_sub(self.timestamp) <= CACHE_TTL_MS
    }

    pub fn timestamp_ms(&self) -> Option<u64> {
        if self.teams.is_empty() {
            None
        } else {
            Some(self.timestamp)
        }
    }

    /// Administrative reset: clears the in-memory mapping and removes the
    /// durable slot.
    pub fn invalidate(&mut self) {
        self.teams.clear();
        self.timestamp = 0;
        if let Some(path) = &self.path {
            let _ = fs::remove_file(path);
        }
    }

    fn persist(&self) -> std::io::Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(dir) = path.parent() {
            let _ = fs::create_dir_all(dir);
        }
        let file = CacheFile {
            teams: self.teams.clone(),
            timestamp: self.timestamp,
        };
        let json = serde_json::to_string(&file)
            .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err))?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}

fn default_cache_path() -> Option<PathBuf> {
    // Prefer XDG cache.
    if let Ok(base) = std::env::var("XDG_CACHE_HOME") {
        if !base.trim().is_empty() {
            return Some(PathBuf::from(base).join(CACHE_DIR).join(CACHE_FILE));
        }
    }
    // Fallback to ~/.cache on linux-like systems.
    let home = std::env::var("HOME").ok()?;
    if home.trim().is_empty() {
        return None;
    }
    Some(
        PathBuf::from(home)
            .join(".cache")
            .join(CACHE_DIR)
            .join(CACHE_FILE),
    )
}

pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}
