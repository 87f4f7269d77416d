pub mod config;
pub mod head_to_head;
pub mod http_client;
pub mod provider;
pub mod roster_cache;
pub mod roster_fetch;
pub mod seed;
pub mod state;
pub mod team_stats;
