use crate::{
    dto::game::GameLookupResponse,
    error::ServiceError,
    state::{RoomCode, SharedState},
};

/// Look up an open game by the code a participant typed.
pub fn find_game(state: &SharedState, code: &str) -> Result<GameLookupResponse, ServiceError> {
    let code = code.parse::<RoomCode>()?;
    let game = state
        .games()
        .get(&code)
        .ok_or_else(|| ServiceError::NotFound(format!("no open game with code `{code}`")))?;
    Ok(GameLookupResponse::from(&game))
}
