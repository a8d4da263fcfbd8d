use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for Party Trivia Back.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::questions::list_questions,
        crate::routes::game::find_game,
        crate::routes::websocket::ws_handler,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::questions::QuestionBankResponse,
            crate::dto::game::GameLookupResponse,
            crate::dto::game::GameSummary,
            crate::dto::game::PlayerSummary,
            crate::dto::ws::ClientMessage,
            crate::dto::ws::CreateGamePayload,
            crate::dto::ws::JoinGamePayload,
            crate::dto::ws::ServerMessage,
            crate::dto::ws::CloseReason,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "trivia", description = "Question bank and open games"),
        (name = "players", description = "WebSocket session channel for players"),
    )
)]
pub struct ApiDoc;
