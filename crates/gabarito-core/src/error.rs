//! Exam structure errors.
//!
//! Raised while building an [`Exam`](crate::model::Exam) from a file. The
//! normalization engine itself never fails.

use thiserror::Error;

use crate::resolve::OPTION_LETTERS;

/// Structural problems in an exam definition.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExamError {
    /// More options than there are option letters.
    #[error(
        "question {question_id}: {count} options, at most {max} are supported",
        max = OPTION_LETTERS.len()
    )]
    TooManyOptions { question_id: String, count: usize },

    /// A multiple-choice question without options.
    #[error("question {question_id}: multiple-choice question has no options")]
    MissingOptions { question_id: String },

    /// The answer key is blank.
    #[error("question {question_id}: correct_answer is empty")]
    EmptyCorrectAnswer { question_id: String },

    /// Two options normalize to the same text, so a prose answer matching
    /// them always resolves to the first.
    #[error("question {question_id}: options {first} and {second} normalize to the same text")]
    AmbiguousOptions {
        question_id: String,
        first: char,
        second: char,
    },

    /// Two questions share an id.
    #[error("duplicate question ID: {0}")]
    DuplicateQuestionId(String),
}

impl ExamError {
    /// Returns `true` if the exam cannot be scored with this error present.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ExamError::TooManyOptions { .. } | ExamError::DuplicateQuestionId(_)
        )
    }

    /// The question this error refers to.
    pub fn question_id(&self) -> &str {
        match self {
            ExamError::TooManyOptions { question_id, .. }
            | ExamError::MissingOptions { question_id }
            | ExamError::EmptyCorrectAnswer { question_id }
            | ExamError::AmbiguousOptions { question_id, .. } => question_id,
            ExamError::DuplicateQuestionId(id) => id,
        }
    }
}
