use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::dto::{
    game::GameSummary,
    validation::{validate_display_name, validate_room_code},
};

/// Reasons an inbound frame is rejected before it reaches the lobby.
#[derive(Debug, Error)]
pub enum InboundError {
    /// The frame is not JSON of a known shape.
    #[error("malformed message: {0}")]
    Malformed(#[from] serde_json::Error),
    /// A payload field failed validation.
    #[error("invalid message: {0}")]
    Invalid(#[from] ValidationErrors),
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
/// Messages accepted from player WebSocket clients.
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Open a new game hosted by the sender.
    CreateGame(CreateGamePayload),
    /// Join an open game by room code.
    JoinGame(JoinGamePayload),
    /// Leave the current game.
    LeaveGame,
    /// Any other `type` value.
    #[serde(other)]
    Unknown,
}

impl ClientMessage {
    /// Parse a text frame and validate its payload.
    pub fn from_json_str(text: &str) -> Result<Self, InboundError> {
        let message = serde_json::from_str::<Self>(text)?;
        match &message {
            Self::CreateGame(payload) => payload.validate()?,
            Self::JoinGame(payload) => payload.validate()?,
            Self::LeaveGame | Self::Unknown => {}
        }
        Ok(message)
    }
}

#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
/// Payload of a `create_game` message.
pub struct CreateGamePayload {
    /// Display name of the host.
    #[validate(custom(function = "validate_display_name"))]
    pub name: String,
}

#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
/// Payload of a `join_game` message.
pub struct JoinGamePayload {
    /// Four digit room code.
    #[validate(custom(function = "validate_room_code"))]
    pub code: String,
    /// Display name, unique within the game.
    #[validate(custom(function = "validate_display_name"))]
    pub name: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
/// Why a game stopped existing.
pub enum CloseReason {
    /// The host left or disconnected.
    HostLeft,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
/// Messages pushed to player WebSocket clients.
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Sent once the connection is registered.
    Connected { player_id: Uuid },
    /// Sent to the host after it opened a game.
    GameCreated { game: GameSummary },
    /// Sent to a player after it joined a game.
    GameJoined { game: GameSummary },
    /// Sent to every member when the roster changes.
    Roster { game: GameSummary },
    /// Sent to a player after it left a game on its own.
    GameLeft { code: String },
    /// Sent to remaining members when a game is closed.
    GameClosed { code: String, reason: CloseReason },
    /// Request could not be served.
    Error { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_validates_join() {
        let message =
            ClientMessage::from_json_str(r#"{"type":"join_game","code":"4821","name":"Sam"}"#)
                .unwrap();
        match message {
            ClientMessage::JoinGame(payload) => {
                assert_eq!(payload.code, "4821");
                assert_eq!(payload.name, "Sam");
            }
            other => panic!("unexpected message {other:?}"),
        }
    }

    #[test]
    fn rejects_invalid_payloads() {
        let err =
            ClientMessage::from_json_str(r#"{"type":"join_game","code":"0042","name":"Sam"}"#)
                .unwrap_err();
        assert!(matches!(err, InboundError::Invalid(_)));

        let err = ClientMessage::from_json_str(r#"{"type":"create_game","name":"   "}"#)
            .unwrap_err();
        assert!(matches!(err, InboundError::Invalid(_)));

        let err = ClientMessage::from_json_str(r#"{"type":"join_game","code":"4821"}"#)
            .unwrap_err();
        assert!(matches!(err, InboundError::Malformed(_)));

        let err = ClientMessage::from_json_str("not json").unwrap_err();
        assert!(matches!(err, InboundError::Malformed(_)));
    }

    #[test]
    fn unknown_and_unit_types_parse() {
        assert!(matches!(
            ClientMessage::from_json_str(r#"{"type":"leave_game"}"#).unwrap(),
            ClientMessage::LeaveGame
        ));
        assert!(matches!(
            ClientMessage::from_json_str(r#"{"type":"submit_answer","answer":"42"}"#).unwrap(),
            ClientMessage::Unknown
        ));
    }

    #[test]
    fn server_messages_are_tagged() {
        let value = serde_json::to_value(ServerMessage::GameClosed {
            code: "4821".into(),
            reason: CloseReason::HostLeft,
        })
        .unwrap();
        assert_eq!(
            value,
            serde_json::json!({"type": "game_closed", "code": "4821", "reason": "host_left"})
        );
    }
}
