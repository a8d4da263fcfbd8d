use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};

use crate::{
    dto::game::GameLookupResponse, error::AppError, services::game_service, state::SharedState,
};

/// Routes exposing open games to join screens.
pub fn router() -> Router<SharedState> {
    Router::new().route("/games/{code}", get(find_game))
}

/// Check whether a room code belongs to an open game.
#[utoipa::path(
    get,
    path = "/games/{code}",
    tag = "trivia",
    params(("code" = String, Path, description = "Four digit room code")),
    responses(
        (status = 200, description = "Game is open", body = GameLookupResponse),
        (status = 400, description = "Malformed room code"),
        (status = 404, description = "No open game with this code")
    )
)]
pub async fn find_game(
    State(state): State<SharedState>,
    Path(code): Path<String>,
) -> Result<Json<GameLookupResponse>, AppError> {
    let game = game_service::find_game(&state, &code)?;
    Ok(Json(game))
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use super::*;
    use crate::{config::AppConfig, state::AppState};

    #[tokio::test]
    async fn lookup_maps_errors_to_statuses() {
        let state = AppState::new(AppConfig::default());

        let response = find_game(State(state.clone()), Path("12".into()))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = find_game(State(state), Path("4821".into()))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
