use rand::rngs::StdRng;
use rand::SeedableRng;

use matchup_terminal::state::{
    apply_delta, pick_random_team, AppState, Delta, MatchPreview, Slot, Team,
};
use matchup_terminal::team_stats::{StatsReport, StatsSource, TeamStats};

fn team(id: u32, name: &str) -> Team {
    Team {
        id,
        name: name.to_string(),
        league: "premier-league".to_string(),
        logo: String::new(),
        country: "England".to_string(),
        founded: Some(1892),
    }
}

fn stats(rating: u32) -> StatsReport {
    StatsReport {
        stats: TeamStats {
            rating,
            attacking: rating,
            defensive: rating,
            win_percentage: rating,
        },
        source: StatsSource::Api,
    }
}

#[test]
fn selecting_an_unfetched_league_requires_a_fetch() {
    let mut state = AppState::new();
    let effect = state.select_league(Slot::Home, "premier-league");
    assert!(effect.fetch_needed);
    assert_eq!(state.selection.league1.as_deref(), Some("premier-league"));
}

#[test]
fn selecting_a_cached_league_skips_the_fetch() {
    let mut state = AppState::new();
    apply_delta(
        &mut state,
        Delta::SetRoster {
            league_key: "premier-league".to_string(),
            teams: vec![team(4, "Liverpool")],
        },
    );

    let effect = state.select_league(Slot::Away, "premier-league");
    assert!(!effect.fetch_needed);
    assert_eq!(state.selection.league2.as_deref(), Some("premier-league"));
}

#[test]
fn an_empty_roster_still_requires_a_fetch() {
    let mut state = AppState::new();
    apply_delta(
        &mut state,
        Delta::SetRoster {
            league_key: "major-league-soccer".to_string(),
            teams: Vec::new(),
        },
    );

    let effect = state.select_league(Slot::Home, "major-league-soccer");
    assert!(effect.fetch_needed);
}

#[test]
fn generation_requires_both_leagues() {
    let mut state = AppState::new();
    assert!(!state.selection.both_selected());

    state.select_league(Slot::Home, "premier-league");
    assert!(!state.selection.both_selected());

    state.select_league(Slot::Away, "la-liga");
    assert!(state.selection.both_selected());
}

#[test]
fn set_preview_clears_the_loading_flag() {
    let mut state = AppState::new();
    apply_delta(&mut state, Delta::PreviewLoading(true));
    assert!(state.preview_loading);

    let preview = MatchPreview {
        team1: team(4, "Liverpool"),
        team2: team(541, "Real Madrid"),
        stats1: stats(80),
        stats2: stats(85),
        h2h: (2, 3),
    };
    apply_delta(&mut state, Delta::SetPreview(Box::new(preview)));
    assert!(!state.preview_loading);
    let preview = state.preview.expect("preview should be set");
    assert_eq!(preview.team1.name, "Liverpool");
    assert_eq!(preview.h2h, (2, 3));
}

#[test]
fn roster_loading_flag_follows_deltas() {
    let mut state = AppState::new();
    apply_delta(
        &mut state,
        Delta::RosterLoading {
            league_key: "serie-a".to_string(),
            loading: true,
        },
    );
    assert!(state.roster_loading("serie-a"));

    apply_delta(
        &mut state,
        Delta::SetRoster {
            league_key: "serie-a".to_string(),
            teams: vec![team(496, "Juventus")],
        },
    );
    assert!(!state.roster_loading("serie-a"));
}

#[test]
fn random_pick_comes_from_the_roster() {
    let mut rng = StdRng::seed_from_u64(11);
    assert!(pick_random_team(&[], &mut rng).is_none());

    let roster = vec![team(1, "Manchester United"), team(2, "Arsenal"), team(3, "Chelsea")];
    for _ in 0..50 {
        let picked = pick_random_team(&roster, &mut rng).expect("non-empty roster");
        assert!(roster.iter().any(|t| t.id == picked.id));
    }
}

#[test]
fn log_ring_stays_bounded() {
    let mut state = AppState::new();
    for i in 0..200 {
        state.push_log(format!("[INFO] line {i}"));
    }
    assert!(state.logs.len() <= 50);
    assert_eq!(state.logs.last().map(String::as_str), Some("[INFO] line 199"));
}
