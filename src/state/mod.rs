pub mod code;
pub mod game;
pub mod player;
pub mod questions;

use std::sync::Arc;

use crate::config::AppConfig;

pub use self::code::{RoomCode, RoomCodeError, generate_code};
pub use self::game::{Game, GameRegistry, LeaveOutcome, RegistryError};
pub use self::player::{Player, PlayerId, PlayerRegistry};
pub use self::questions::QuestionBank;

/// Handle to [`AppState`] cloned into every handler.
pub type SharedState = Arc<AppState>;

/// Central application state: immutable configuration plus the live game and player registries.
///
/// One instance is built at startup and handed to every handler through [`SharedState`].
pub struct AppState {
    config: AppConfig,
    games: GameRegistry,
    players: PlayerRegistry,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    pub fn new(config: AppConfig) -> SharedState {
        Arc::new(Self {
            config,
            games: GameRegistry::new(),
            players: PlayerRegistry::new(),
        })
    }

    /// Runtime configuration loaded at startup.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Question bank used by every game.
    pub fn questions(&self) -> &QuestionBank {
        self.config.questions()
    }

    /// Registry of open games keyed by room code.
    pub fn games(&self) -> &GameRegistry {
        &self.games
    }

    /// Registry of connected players keyed by connection id.
    pub fn players(&self) -> &PlayerRegistry {
        &self.players
    }
}
