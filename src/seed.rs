use crate::state::Team;

// Bundled rosters used when no API key is configured or a roster fetch
// fails outright, so the preview screen always has something to show.
const SEED_TEAMS: &[(u32, &str, &str, &str, &str, u32)] = &[
    (1, "Manchester United", "premier-league", "🔴", "England", 1878),
    (2, "Arsenal", "premier-league", "⚪", "England", 1886),
    (3, "Chelsea", "premier-league", "🔵", "England", 1905),
    (4, "Liverpool", "premier-league", "🔴", "England", 1892),
    (5, "Real Madrid", "la-liga", "⚪", "Spain", 1902),
    (6, "Barcelona", "la-liga", "🔴", "Spain", 1899),
    (7, "Atletico Madrid", "la-liga", "🔴", "Spain", 1903),
    (8, "Valencia", "la-liga", "🟠", "Spain", 1919),
    (9, "Juventus", "serie-a", "⚫", "Italy", 1897),
    (10, "AC Milan", "serie-a", "🔴", "Italy", 1899),
    (11, "Inter Milan", "serie-a", "🔵", "Italy", 1908),
    (12, "AS Roma", "serie-a", "🟡", "Italy", 1927),
    (13, "Bayern Munich", "bundesliga", "🔴", "Germany", 1900),
    (14, "Borussia Dortmund", "bundesliga", "🟡", "Germany", 1909),
    (15, "RB Leipzig", "bundesliga", "🔴", "Germany", 2009),
    (16, "Bayer Leverkusen", "bundesliga", "🔴", "Germany", 1904),
];

pub fn seed_roster(league_key: &str) -> Vec<Team> {
    SEED_TEAMS
        .iter()
        .filter(|(_, _, league, _, _, _)| *league == league_key)
        .map(|(id, name, league, logo, country, founded)| Team {
            id: *id,
            name: (*name).to_string(),
            league: (*league).to_string(),
            logo: (*logo).to_string(),
            country: (*country).to_string(),
            founded: Some(*founded),
        })
        .collect()
}
