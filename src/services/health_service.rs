use crate::{dto::health::HealthResponse, state::SharedState};

/// Report liveness along with the size of the in-memory registries.
pub fn health_status(state: &SharedState) -> HealthResponse {
    HealthResponse::ok(state.games().len(), state.players().len())
}
