//! Core data model types for gabarito.
//!
//! Exams, questions and answer sheets as supplied by the caller. None of
//! these are persisted by this crate.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A single exam question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier within the exam.
    pub id: String,
    /// Question text shown to the user.
    #[serde(default)]
    pub prompt: String,
    /// Multiple choice or true/false.
    #[serde(default)]
    pub kind: QuestionKind,
    /// Ordered option texts; position determines the letter.
    #[serde(default)]
    pub options: Vec<String>,
    /// The authoritative answer key: a letter, option prose or a boolean word.
    pub correct_answer: String,
    /// Tags for statistics breakdowns.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Optional explanation shown after answering.
    #[serde(default)]
    pub explanation: Option<String>,
}

impl Question {
    /// The option list, or `None` when the question has no discrete options.
    pub fn option_list(&self) -> Option<&[String]> {
        if self.options.is_empty() {
            None
        } else {
            Some(self.options.as_slice())
        }
    }
}

/// Question types.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    #[default]
    MultipleChoice,
    TrueFalse,
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionKind::MultipleChoice => write!(f, "multiple_choice"),
            QuestionKind::TrueFalse => write!(f, "true_false"),
        }
    }
}

impl FromStr for QuestionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "multiple_choice" | "mc" => Ok(QuestionKind::MultipleChoice),
            "true_false" | "tf" | "boolean" => Ok(QuestionKind::TrueFalse),
            other => Err(format!("unknown question kind: {other}")),
        }
    }
}

/// An exam: an ordered collection of questions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exam {
    /// Unique identifier for this exam.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Description of this exam.
    #[serde(default)]
    pub description: String,
    /// The questions, in presentation order.
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl Exam {
    /// Look up a question by id.
    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }
}

/// A user's raw selections, keyed by question id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnswerSheet {
    /// Exam this sheet was filled for, if recorded.
    #[serde(default)]
    pub exam_id: Option<String>,
    /// Raw selection per question id.
    #[serde(default)]
    pub answers: BTreeMap<String, String>,
}

impl AnswerSheet {
    /// The raw selection for a question, if one was given.
    pub fn selection(&self, question_id: &str) -> Option<&str> {
        self.answers.get(question_id).map(String::as_str)
    }
}
