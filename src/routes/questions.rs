use axum::{Json, Router, extract::State, routing::get};

use crate::{dto::questions::QuestionBankResponse, state::SharedState};

#[utoipa::path(
    get,
    path = "/questions",
    tag = "trivia",
    responses((status = 200, description = "Question bank and tiebreaker", body = QuestionBankResponse))
)]
/// Return the question bank every game plays through.
pub async fn list_questions(State(state): State<SharedState>) -> Json<QuestionBankResponse> {
    Json(QuestionBankResponse::from(state.questions()))
}

/// Configure the question bank routes.
pub fn router() -> Router<SharedState> {
    Router::<SharedState>::new().route("/questions", get(list_questions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::AppConfig,
        state::{AppState, QuestionBank},
    };

    #[tokio::test]
    async fn serves_the_built_in_bank_by_default() {
        let state = AppState::new(AppConfig::default());
        let Json(bank) = list_questions(State(state)).await;
        assert_eq!(bank.subject, "Ali");
        assert_eq!(bank.questions.len(), 12);
        assert!(bank.tiebreaker.starts_with("How many books"));
    }

    #[tokio::test]
    async fn serves_a_configured_bank() {
        let questions =
            QuestionBank::new("Sam", vec!["Favourite snack?".into()], "Age in days?").unwrap();
        let state = AppState::new(AppConfig::new("static", questions));
        let Json(bank) = list_questions(State(state)).await;
        assert_eq!(bank.subject, "Sam");
        assert_eq!(bank.questions, ["Favourite snack?"]);
        assert_eq!(bank.tiebreaker, "Age in days?");
    }
}
