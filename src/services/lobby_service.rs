//! Session lifecycle: hosts open games, players join by room code, and
//! departures keep the registries consistent. Every change is pushed to the
//! affected connections.

use tracing::{debug, info};

use crate::{
    dto::{
        game::GameSummary,
        validation::validate_display_name,
        ws::{CloseReason, CreateGamePayload, JoinGamePayload, ServerMessage},
    },
    error::ServiceError,
    services::websocket_service::send_message_to_websocket,
    state::{Game, LeaveOutcome, PlayerId, RoomCode, SharedState},
};

/// Open a game hosted by `player_id`.
pub fn create_game(
    state: &SharedState,
    player_id: PlayerId,
    payload: CreateGamePayload,
) -> Result<GameSummary, ServiceError> {
    let name = display_name(&payload.name)?;
    let game = state.games().create(state.players(), player_id, name)?;
    info!(%player_id, code = %game.code, "game created");

    let summary = GameSummary::from(&game);
    notify(
        state,
        &player_id,
        &ServerMessage::GameCreated {
            game: summary.clone(),
        },
    );
    Ok(summary)
}

/// Add `player_id` to the game named by the payload's room code.
pub fn join_game(
    state: &SharedState,
    player_id: PlayerId,
    payload: JoinGamePayload,
) -> Result<GameSummary, ServiceError> {
    let code = payload.code.parse::<RoomCode>()?;
    let name = display_name(&payload.name)?;
    let game = state
        .games()
        .join(state.players(), code, player_id, name)?;
    info!(%player_id, %code, players = game.players.len(), "player joined game");

    let summary = GameSummary::from(&game);
    notify(
        state,
        &player_id,
        &ServerMessage::GameJoined {
            game: summary.clone(),
        },
    );
    broadcast_roster(state, &game, Some(&player_id));
    Ok(summary)
}

/// Leave the current game on request. Fails when the player is not in one.
pub fn leave_game(state: &SharedState, player_id: PlayerId) -> Result<(), ServiceError> {
    let code = match depart(state, player_id)? {
        LeaveOutcome::NotInGame => {
            return Err(ServiceError::InvalidState("not in a game".into()));
        }
        LeaveOutcome::Left { game } | LeaveOutcome::Closed { game } => game.code,
    };

    notify(
        state,
        &player_id,
        &ServerMessage::GameLeft {
            code: code.to_string(),
        },
    );
    Ok(())
}

/// Tear down a connection: leave its game, then drop it from the player registry.
pub fn disconnect(state: &SharedState, player_id: PlayerId) {
    if let Err(err) = depart(state, player_id) {
        debug!(%player_id, error = %err, "nothing to leave on disconnect");
    }
    state.players().disconnect(&player_id);
}

fn display_name(raw: &str) -> Result<String, ServiceError> {
    validate_display_name(raw).map_err(|err| ServiceError::InvalidInput(err.to_string()))?;
    Ok(raw.trim().to_string())
}

/// Remove the player from its game and tell the other members.
fn depart(state: &SharedState, player_id: PlayerId) -> Result<LeaveOutcome, ServiceError> {
    let outcome = state.games().leave(state.players(), player_id)?;
    match &outcome {
        LeaveOutcome::NotInGame => {}
        LeaveOutcome::Left { game } => {
            info!(%player_id, code = %game.code, "player left game");
            broadcast_roster(state, game, None);
        }
        LeaveOutcome::Closed { game } => {
            info!(%player_id, code = %game.code, "host left; game closed");
            let message = ServerMessage::GameClosed {
                code: game.code.to_string(),
                reason: CloseReason::HostLeft,
            };
            game.players
                .keys()
                .filter(|id| **id != player_id)
                .for_each(|id| notify(state, id, &message));
        }
    }
    Ok(outcome)
}

/// Push the current roster to every member except `skip`.
fn broadcast_roster(state: &SharedState, game: &Game, skip: Option<&PlayerId>) {
    let message = ServerMessage::Roster {
        game: GameSummary::from(game),
    };
    game.players
        .keys()
        .filter(|id| Some(*id) != skip)
        .for_each(|id| notify(state, id, &message));
}

/// Send a message to a single connection, logging when it has gone away.
fn notify(state: &SharedState, player_id: &PlayerId, message: &ServerMessage) {
    let Some(tx) = state.players().sender(player_id) else {
        debug!(%player_id, "player not connected; dropping message");
        return;
    };

    if send_message_to_websocket(&tx, message).is_err() {
        debug!(%player_id, "writer closed; dropping message");
    }
}

#[cfg(test)]
mod tests {
    use axum::extract::ws::Message;
    use serde_json::Value;
    use tokio::sync::mpsc;

    use super::*;
    use crate::{config::AppConfig, state::AppState};

    fn connect(state: &SharedState) -> (PlayerId, mpsc::UnboundedReceiver<Message>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (state.players().connect(tx), rx)
    }

    fn next_frame(rx: &mut mpsc::UnboundedReceiver<Message>) -> Value {
        match rx.try_recv().expect("expected a queued frame") {
            Message::Text(text) => serde_json::from_str(text.as_str()).unwrap(),
            other => panic!("unexpected frame {other:?}"),
        }
    }

    fn create(state: &SharedState, host: PlayerId, name: &str) -> GameSummary {
        create_game(state, host, CreateGamePayload { name: name.into() }).unwrap()
    }

    fn join(state: &SharedState, player: PlayerId, code: &str, name: &str) -> GameSummary {
        join_game(
            state,
            player,
            JoinGamePayload {
                code: code.into(),
                name: name.into(),
            },
        )
        .unwrap()
    }

    #[test]
    fn create_then_join_notifies_members() {
        let state = AppState::new(AppConfig::default());
        let (host, mut host_rx) = connect(&state);
        let (guest, mut guest_rx) = connect(&state);

        let created = create(&state, host, "  Host ");
        assert_eq!(created.players.len(), 1);
        assert_eq!(created.players[0].name, "Host");
        assert!(created.players[0].host);
        let frame = next_frame(&mut host_rx);
        assert_eq!(frame["type"], "game_created");
        assert_eq!(frame["game"]["code"], created.code.as_str());

        let joined = join(&state, guest, &created.code, "Guest");
        assert_eq!(joined.players.len(), 2);
        assert_eq!(next_frame(&mut guest_rx)["type"], "game_joined");
        assert!(guest_rx.try_recv().is_err());

        let roster = next_frame(&mut host_rx);
        assert_eq!(roster["type"], "roster");
        assert_eq!(roster["game"]["players"][1]["name"], "Guest");
        assert_eq!(roster["game"]["players"][1]["host"], false);
    }

    #[test]
    fn join_rejects_taken_name_and_unknown_code() {
        let state = AppState::new(AppConfig::default());
        let (host, _host_rx) = connect(&state);
        let (guest, _guest_rx) = connect(&state);
        let created = create(&state, host, "Host");

        let err = join_game(
            &state,
            guest,
            JoinGamePayload {
                code: created.code.clone(),
                name: "HOST".into(),
            },
        )
        .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)));

        let other_code = if created.code == "1000" { "1001" } else { "1000" };
        let err = join_game(
            &state,
            guest,
            JoinGamePayload {
                code: other_code.into(),
                name: "Guest".into(),
            },
        )
        .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        assert_eq!(state.players().game_of(&guest), None);
    }

    #[test]
    fn guest_leave_updates_roster() {
        let state = AppState::new(AppConfig::default());
        let (host, mut host_rx) = connect(&state);
        let (guest, mut guest_rx) = connect(&state);
        let created = create(&state, host, "Host");
        join(&state, guest, &created.code, "Guest");
        next_frame(&mut host_rx);
        next_frame(&mut host_rx);
        next_frame(&mut guest_rx);

        leave_game(&state, guest).unwrap();

        let left = next_frame(&mut guest_rx);
        assert_eq!(left["type"], "game_left");
        assert_eq!(left["code"], created.code.as_str());
        let roster = next_frame(&mut host_rx);
        assert_eq!(roster["type"], "roster");
        assert_eq!(roster["game"]["players"].as_array().unwrap().len(), 1);

        let err = leave_game(&state, guest).unwrap_err();
        assert!(matches!(err, ServiceError::InvalidState(_)));
    }

    #[test]
    fn host_disconnect_closes_game() {
        let state = AppState::new(AppConfig::default());
        let (host, _host_rx) = connect(&state);
        let (guest, mut guest_rx) = connect(&state);
        let created = create(&state, host, "Host");
        join(&state, guest, &created.code, "Guest");
        next_frame(&mut guest_rx);

        disconnect(&state, host);

        let closed = next_frame(&mut guest_rx);
        assert_eq!(closed["type"], "game_closed");
        assert_eq!(closed["reason"], "host_left");
        assert!(state.games().is_empty());
        assert_eq!(state.players().len(), 1);
        assert_eq!(state.players().game_of(&guest), None);

        // The detached guest can host a game of its own.
        create(&state, guest, "Guest");
        assert_eq!(state.games().len(), 1);
    }

    #[test]
    fn blank_or_long_names_are_rejected() {
        let state = AppState::new(AppConfig::default());
        let (host, _host_rx) = connect(&state);
        let (guest, _guest_rx) = connect(&state);

        let err = create_game(&state, host, CreateGamePayload { name: "   ".into() })
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)));
        assert!(state.games().is_empty());

        let created = create(&state, host, "Host");
        let err = join_game(
            &state,
            guest,
            JoinGamePayload {
                code: created.code,
                name: "x".repeat(33),
            },
        )
        .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)));
        assert_eq!(state.players().game_of(&guest), None);
    }

    #[test]
    fn player_in_a_game_cannot_open_another() {
        let state = AppState::new(AppConfig::default());
        let (host, _host_rx) = connect(&state);
        create(&state, host, "Host");

        let err = create_game(&state, host, CreateGamePayload { name: "Host".into() })
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidState(_)));
        assert_eq!(state.games().len(), 1);
    }
}
