use matchup_terminal::head_to_head::{aggregate, H2hFixture};

const TEAM_A: u32 = 33;
const TEAM_B: u32 = 42;

fn fixture(
    home_id: u32,
    away_id: u32,
    home_winner: Option<bool>,
    away_winner: Option<bool>,
) -> H2hFixture {
    H2hFixture {
        home_id,
        away_id,
        home_winner,
        away_winner,
    }
}

#[test]
fn empty_fixture_list_yields_zero_zero() {
    assert_eq!(aggregate(&[], TEAM_A, TEAM_B), (0, 0));
}

#[test]
fn counts_one_win_per_side() {
    let fixtures = [
        fixture(TEAM_A, TEAM_B, Some(true), Some(false)),
        fixture(TEAM_A, TEAM_B, Some(false), Some(true)),
    ];
    assert_eq!(aggregate(&fixtures, TEAM_A, TEAM_B), (1, 1));
}

#[test]
fn draws_and_unresolved_fixtures_count_for_neither() {
    let fixtures = [
        fixture(TEAM_A, TEAM_B, None, None),
        fixture(TEAM_B, TEAM_A, Some(false), Some(false)),
        fixture(TEAM_A, TEAM_B, None, Some(false)),
    ];
    assert_eq!(aggregate(&fixtures, TEAM_A, TEAM_B), (0, 0));
}

#[test]
fn fixtures_between_other_teams_are_ignored() {
    let fixtures = [
        fixture(100, 200, Some(true), Some(false)),
        fixture(TEAM_A, 200, Some(true), Some(false)),
    ];
    assert_eq!(aggregate(&fixtures, TEAM_A, TEAM_B), (1, 0));
}

#[test]
fn home_and_away_wins_both_count() {
    let fixtures = [
        fixture(TEAM_A, TEAM_B, Some(true), None),
        fixture(TEAM_B, TEAM_A, None, Some(true)),
        fixture(TEAM_B, TEAM_A, Some(true), Some(false)),
    ];
    assert_eq!(aggregate(&fixtures, TEAM_A, TEAM_B), (2, 1));
}

#[test]
fn each_side_is_evaluated_independently() {
    // The upstream feed records one winner per fixture, but if a fixture
    // ever marked both sides, both counters move. This pins the deliberate
    // departure from the exclusive branching the source implementation used.
    let fixtures = [fixture(TEAM_A, TEAM_B, Some(true), Some(true))];
    assert_eq!(aggregate(&fixtures, TEAM_A, TEAM_B), (1, 1));
}
