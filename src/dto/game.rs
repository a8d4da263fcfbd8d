use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{dto::format_system_time, state::Game};

/// Member of a game as seen by other participants.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct PlayerSummary {
    /// Connection id of the player.
    pub id: Uuid,
    /// Display name chosen on create or join.
    pub name: String,
    /// Whether the player opened the game.
    pub host: bool,
}

/// Snapshot of an open game sent to its members.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GameSummary {
    /// Four digit room code.
    pub code: String,
    /// Connection id of the creator.
    pub host_id: Uuid,
    /// Members in join order, host first.
    pub players: Vec<PlayerSummary>,
    /// Creation time, RFC 3339.
    pub created_at: String,
}

impl From<&Game> for GameSummary {
    fn from(game: &Game) -> Self {
        Self {
            code: game.code.to_string(),
            host_id: game.host_id,
            players: game
                .players
                .iter()
                .map(|(id, name)| PlayerSummary {
                    id: *id,
                    name: name.clone(),
                    host: *id == game.host_id,
                })
                .collect(),
            created_at: format_system_time(game.created_at),
        }
    }
}

/// Public answer to a room code lookup, used by join screens before connecting.
#[derive(Debug, Serialize, ToSchema)]
pub struct GameLookupResponse {
    /// Four digit room code.
    pub code: String,
    /// Display name of the host.
    pub host_name: String,
    /// Members currently in the game, host included.
    pub player_count: usize,
}

impl From<&Game> for GameLookupResponse {
    fn from(game: &Game) -> Self {
        Self {
            code: game.code.to_string(),
            host_name: game.host_name().unwrap_or_default().to_string(),
            player_count: game.players.len(),
        }
    }
}
