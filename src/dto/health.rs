use serde::Serialize;
use utoipa::ToSchema;

/// Health response returned by the `/healthcheck` route.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Health status ("ok").
    pub status: String,
    /// Number of open games.
    pub games: usize,
    /// Number of connected players.
    pub players: usize,
}

impl HealthResponse {
    /// Create a health response indicating the system is operational.
    pub fn ok(games: usize, players: usize) -> Self {
        Self {
            status: "ok".to_string(),
            games,
            players,
        }
    }
}
