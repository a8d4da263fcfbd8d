use serde::Serialize;
use utoipa::ToSchema;

use crate::state::QuestionBank;

/// Question bank exposed to clients.
#[derive(Debug, Serialize, ToSchema)]
pub struct QuestionBankResponse {
    /// Person the questions are about.
    pub subject: String,
    /// Main questions in play order.
    pub questions: Vec<String>,
    /// Question used to break ties, not part of `questions`.
    pub tiebreaker: String,
}

impl From<&QuestionBank> for QuestionBankResponse {
    fn from(bank: &QuestionBank) -> Self {
        Self {
            subject: bank.subject().to_string(),
            questions: bank.questions().to_vec(),
            tiebreaker: bank.tiebreaker().to_string(),
        }
    }
}
