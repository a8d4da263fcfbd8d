//! Service layer sitting between the HTTP/WebSocket routes and the shared state.

/// OpenAPI document aggregation.
pub mod documentation;
/// Room code lookups.
pub mod game_service;
/// Health reporting.
pub mod health_service;
/// Game session lifecycle (create, join, leave).
pub mod lobby_service;
/// Per-connection WebSocket handling.
pub mod websocket_service;
