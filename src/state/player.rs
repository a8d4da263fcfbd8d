use axum::extract::ws::Message;
use dashmap::DashMap;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::state::code::RoomCode;

/// Identifier allocated to every WebSocket connection.
pub type PlayerId = Uuid;

/// A connected participant.
#[derive(Debug, Clone)]
pub struct Player {
    /// Connection identifier.
    pub id: PlayerId,
    /// Display name, set once the player creates or joins a game.
    pub name: Option<String>,
    /// Game the player currently belongs to.
    pub game_code: Option<RoomCode>,
    /// Channel feeding the connection's writer task.
    pub tx: mpsc::UnboundedSender<Message>,
}

/// Registry of connected players keyed by their connection id.
///
/// When a game entry is locked alongside a player entry, the game is always
/// locked first.
#[derive(Debug, Default)]
pub struct PlayerRegistry {
    players: DashMap<PlayerId, Player>,
}

impl PlayerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a freshly opened connection and return its identifier.
    pub fn connect(&self, tx: mpsc::UnboundedSender<Message>) -> PlayerId {
        let id = Uuid::new_v4();
        self.players.insert(
            id,
            Player {
                id,
                name: None,
                game_code: None,
                tx,
            },
        );
        id
    }

    /// Drop a connection, returning the last known player record.
    pub fn disconnect(&self, id: &PlayerId) -> Option<Player> {
        self.players.remove(id).map(|(_, player)| player)
    }

    /// Clone the player record.
    pub fn get(&self, id: &PlayerId) -> Option<Player> {
        self.players.get(id).map(|entry| entry.value().clone())
    }

    /// Whether the connection is registered.
    pub fn contains(&self, id: &PlayerId) -> bool {
        self.players.contains_key(id)
    }

    /// Game the player is in, or `None` when unknown or not in a game.
    pub fn game_of(&self, id: &PlayerId) -> Option<RoomCode> {
        self.players.get(id).and_then(|entry| entry.game_code)
    }

    /// Outbound channel for the player's connection.
    pub fn sender(&self, id: &PlayerId) -> Option<mpsc::UnboundedSender<Message>> {
        self.players.get(id).map(|entry| entry.tx.clone())
    }

    /// Record that the player joined `code` under `name`.
    ///
    /// Returns `false` when the player is no longer connected.
    pub fn assign(&self, id: &PlayerId, code: RoomCode, name: String) -> bool {
        match self.players.get_mut(id) {
            Some(mut entry) => {
                entry.game_code = Some(code);
                entry.name = Some(name);
                true
            }
            None => false,
        }
    }

    /// Clear the player's game membership, keeping its display name.
    pub fn detach(&self, id: &PlayerId) {
        if let Some(mut entry) = self.players.get_mut(id) {
            entry.game_code = None;
        }
    }

    /// Number of connected players.
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Whether no player is connected.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}
