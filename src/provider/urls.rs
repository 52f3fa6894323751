//! URL building utilities for provider endpoints

/// Builds the URL of a league, including its teams.
///
/// # Example
/// ```
/// use liiga_fantasy::provider::urls::build_league_url;
///
/// let url = build_league_url("https://api.example.com", "office-2025");
/// assert_eq!(url, "https://api.example.com/fantasy/leagues/office-2025");
/// ```
pub fn build_league_url(api_domain: &str, league_id: &str) -> String {
    format!("{api_domain}/fantasy/leagues/{league_id}")
}

/// Builds the URL of the season player statistics listing.
///
/// # Example
/// ```
/// use liiga_fantasy::provider::urls::build_players_url;
///
/// let url = build_players_url("https://api.example.com", 2025);
/// assert_eq!(url, "https://api.example.com/players/stats?season=2025");
/// ```
pub fn build_players_url(api_domain: &str, season: i32) -> String {
    format!("{api_domain}/players/stats?season={season}")
}
