use std::time::SystemTime;

use dashmap::{DashMap, mapref::entry::Entry};
use indexmap::IndexMap;
use thiserror::Error;

use crate::state::{
    code::RoomCode,
    player::{PlayerId, PlayerRegistry},
};

/// Draws attempted before giving up on finding a free room code.
pub const MAX_CODE_ATTEMPTS: usize = 64;

/// An open game session.
#[derive(Debug, Clone)]
pub struct Game {
    /// Code participants use to join.
    pub code: RoomCode,
    /// Player that created the game.
    pub host_id: PlayerId,
    /// Members in join order (host first) with their display names.
    pub players: IndexMap<PlayerId, String>,
    /// Creation timestamp.
    pub created_at: SystemTime,
}

impl Game {
    fn new(code: RoomCode, host_id: PlayerId, host_name: String) -> Self {
        let mut players = IndexMap::new();
        players.insert(host_id, host_name);
        Self {
            code,
            host_id,
            players,
            created_at: SystemTime::now(),
        }
    }

    /// Display name of the host.
    pub fn host_name(&self) -> Option<&str> {
        self.players.get(&self.host_id).map(String::as_str)
    }

    /// Whether a member already uses `name`, ignoring case.
    pub fn has_name(&self, name: &str) -> bool {
        let wanted = name.to_lowercase();
        self.players
            .values()
            .any(|existing| existing.to_lowercase() == wanted)
    }
}

/// Errors returned by registry operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// No open game uses the code.
    #[error("no open game with code `{0}`")]
    GameNotFound(RoomCode),
    /// The player must leave its current game first.
    #[error("player is already in game `{0}`")]
    AlreadyInGame(RoomCode),
    /// Another member already uses the display name.
    #[error("name `{0}` is already taken in this game")]
    NameTaken(String),
    /// Every draw hit a code already in use.
    #[error("no free room code found after {} attempts", MAX_CODE_ATTEMPTS)]
    CodesExhausted,
    /// The connection is not registered.
    #[error("player is not connected")]
    UnknownPlayer,
}

/// What happened when a player left its game.
#[derive(Debug, Clone)]
pub enum LeaveOutcome {
    /// The player was not part of an open game.
    NotInGame,
    /// The player left; `game` is the remaining roster.
    Left {
        /// Game after the player was removed.
        game: Game,
    },
    /// The host left, so the game was removed. Every member has been detached.
    Closed {
        /// Game as it was when it closed, host included.
        game: Game,
    },
}

/// Registry of open games keyed by room code.
#[derive(Debug, Default)]
pub struct GameRegistry {
    games: DashMap<RoomCode, Game>,
}

impl GameRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new game hosted by `host_id` under a code no other open game uses.
    pub fn create(
        &self,
        players: &PlayerRegistry,
        host_id: PlayerId,
        host_name: String,
    ) -> Result<Game, RegistryError> {
        self.create_with(players, host_id, host_name, RoomCode::generate)
    }

    fn create_with(
        &self,
        players: &PlayerRegistry,
        host_id: PlayerId,
        host_name: String,
        mut draw: impl FnMut() -> RoomCode,
    ) -> Result<Game, RegistryError> {
        ensure_free(players, &host_id)?;

        for _ in 0..MAX_CODE_ATTEMPTS {
            let Entry::Vacant(slot) = self.games.entry(draw()) else {
                continue;
            };

            let game = Game::new(*slot.key(), host_id, host_name.clone());
            if !players.assign(&host_id, game.code, host_name) {
                return Err(RegistryError::UnknownPlayer);
            }
            slot.insert(game.clone());
            return Ok(game);
        }

        Err(RegistryError::CodesExhausted)
    }

    /// Add `player_id` to the game identified by `code`.
    pub fn join(
        &self,
        players: &PlayerRegistry,
        code: RoomCode,
        player_id: PlayerId,
        name: String,
    ) -> Result<Game, RegistryError> {
        ensure_free(players, &player_id)?;

        let mut game = self
            .games
            .get_mut(&code)
            .ok_or(RegistryError::GameNotFound(code))?;

        if game.has_name(&name) {
            return Err(RegistryError::NameTaken(name));
        }

        if !players.assign(&player_id, code, name.clone()) {
            return Err(RegistryError::UnknownPlayer);
        }
        game.players.insert(player_id, name);

        Ok(game.clone())
    }

    /// Remove `player_id` from whatever game it is in.
    pub fn leave(
        &self,
        players: &PlayerRegistry,
        player_id: PlayerId,
    ) -> Result<LeaveOutcome, RegistryError> {
        if !players.contains(&player_id) {
            return Err(RegistryError::UnknownPlayer);
        }
        let Some(code) = players.game_of(&player_id) else {
            return Ok(LeaveOutcome::NotInGame);
        };

        match self.games.entry(code) {
            Entry::Occupied(mut entry) if entry.get().players.contains_key(&player_id) => {
                if entry.get().host_id == player_id {
                    let game = entry.remove();
                    for member in game.players.keys() {
                        players.detach(member);
                    }
                    Ok(LeaveOutcome::Closed { game })
                } else {
                    entry.get_mut().players.shift_remove(&player_id);
                    players.detach(&player_id);
                    Ok(LeaveOutcome::Left {
                        game: entry.get().clone(),
                    })
                }
            }
            _ => {
                players.detach(&player_id);
                Ok(LeaveOutcome::NotInGame)
            }
        }
    }

    /// Clone the game registered under `code`.
    pub fn get(&self, code: &RoomCode) -> Option<Game> {
        self.games.get(code).map(|entry| entry.value().clone())
    }

    /// Number of open games.
    pub fn len(&self) -> usize {
        self.games.len()
    }

    /// Whether no game is open.
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

fn ensure_free(players: &PlayerRegistry, id: &PlayerId) -> Result<(), RegistryError> {
    let player = players.get(id).ok_or(RegistryError::UnknownPlayer)?;
    match player.game_code {
        Some(code) => Err(RegistryError::AlreadyInGame(code)),
        None => Ok(()),
    }
}
