//! The trivia question bank shared by every game.

use thiserror::Error;

/// Name of the person the built-in questions are about.
pub const DEFAULT_SUBJECT: &str = "Ali";

const DEFAULT_QUESTIONS: [&str; 12] = [
    "If Ali could have one animal follow her around for a week, what would it be and why?",
    "What are three types of happy skiing? (Bluebird powder, Backcountry adventure, Downhill tricks)",
    "Where would Ali most love to take her bike for a long, peaceful ride?",
    "If Ali were sitting by the ocean right now, what would she be doing?",
    "What is Ali most likely knitting while watching or listening to something cozy?",
    "What bread or dough creation makes Ali feel the most proud when it turns out just right?",
    "What is the official catchphrase of 'ALI 27'?",
    "What kind of scene does Ali most love to paint with watercolors?",
    "Surfed it. Climbed it. Biked it. Hiked it. What's Ali's next Adventure Badge?",
    "What does Ali like most about The Alchemist?",
    "If Ali could leave tomorrow for one place—no planning stress—where would she go?",
    "What small, ordinary thing brings Ali joy that other people might overlook?",
];

const DEFAULT_TIEBREAKER: &str =
    "How many books do you think Ali would ideally like to read in a perfect year?";

/// Errors raised when assembling a question bank from external input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuestionBankError {
    /// The subject name is blank.
    #[error("subject must not be empty")]
    EmptySubject,
    /// The question list is empty.
    #[error("question bank must contain at least one question")]
    NoQuestions,
    /// The question at this 1-based position is blank.
    #[error("question #{0} is blank")]
    BlankQuestion(usize),
    /// The tiebreaker is blank.
    #[error("tiebreaker question must not be blank")]
    BlankTiebreaker,
}

/// Ordered list of questions about a named subject, plus the tiebreaker.
///
/// The tiebreaker is kept apart from the main list and is never returned by
/// [`QuestionBank::question`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    subject: String,
    questions: Vec<String>,
    tiebreaker: String,
}

impl QuestionBank {
    /// Build a bank, trimming entries and rejecting blank content.
    pub fn new(
        subject: impl Into<String>,
        questions: Vec<String>,
        tiebreaker: impl Into<String>,
    ) -> Result<Self, QuestionBankError> {
        let subject = subject.into().trim().to_string();
        if subject.is_empty() {
            return Err(QuestionBankError::EmptySubject);
        }

        if questions.is_empty() {
            return Err(QuestionBankError::NoQuestions);
        }

        let questions = questions
            .into_iter()
            .enumerate()
            .map(|(index, question)| {
                let question = question.trim();
                if question.is_empty() {
                    Err(QuestionBankError::BlankQuestion(index + 1))
                } else {
                    Ok(question.to_string())
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        let tiebreaker = tiebreaker.into().trim().to_string();
        if tiebreaker.is_empty() {
            return Err(QuestionBankError::BlankTiebreaker);
        }

        Ok(Self {
            subject,
            questions,
            tiebreaker,
        })
    }

    /// Person the questions are about.
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Main questions in play order.
    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    /// Question at `index` (zero based), if any.
    pub fn question(&self, index: usize) -> Option<&str> {
        self.questions.get(index).map(String::as_str)
    }

    /// Question used to break ties.
    pub fn tiebreaker(&self) -> &str {
        &self.tiebreaker
    }

    /// Number of main questions, the tiebreaker excluded.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false for a constructed bank; kept alongside [`QuestionBank::len`].
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

impl Default for QuestionBank {
    fn default() -> Self {
        Self {
            subject: DEFAULT_SUBJECT.to_string(),
            questions: DEFAULT_QUESTIONS.iter().map(|q| q.to_string()).collect(),
            tiebreaker: DEFAULT_TIEBREAKER.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_bank_has_twelve_questions_and_a_separate_tiebreaker() {
        let bank = QuestionBank::default();
        assert_eq!(bank.subject(), "Ali");
        assert_eq!(bank.len(), 12);
        assert!(!bank.is_empty());
        assert!(!bank.questions().iter().any(|q| q == bank.tiebreaker()));
        assert_eq!(
            bank.question(6),
            Some("What is the official catchphrase of 'ALI 27'?")
        );
        assert_eq!(bank.question(12), None);
    }

    #[test]
    fn new_trims_entries() {
        let bank = QuestionBank::new(
            "  Sam ",
            vec![" First? ".into(), "Second?".into()],
            " Tie? ",
        )
        .unwrap();
        assert_eq!(bank.subject(), "Sam");
        assert_eq!(bank.questions(), ["First?", "Second?"]);
        assert_eq!(bank.tiebreaker(), "Tie?");
    }

    #[test]
    fn new_rejects_blank_content() {
        assert_eq!(
            QuestionBank::new("", vec!["q".into()], "t"),
            Err(QuestionBankError::EmptySubject)
        );
        assert_eq!(
            QuestionBank::new("Sam", vec![], "t"),
            Err(QuestionBankError::NoQuestions)
        );
        assert_eq!(
            QuestionBank::new("Sam", vec!["q".into(), "   ".into()], "t"),
            Err(QuestionBankError::BlankQuestion(2))
        );
        assert_eq!(
            QuestionBank::new("Sam", vec!["q".into()], " "),
            Err(QuestionBankError::BlankTiebreaker)
        );
    }
}
