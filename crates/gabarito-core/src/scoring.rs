//! Per-question scoring.
//!
//! Both the answer key and the user's selection are resolved through the
//! question's option list, and compared as canonical tokens.

use serde::{Deserialize, Serialize};

use crate::model::{AnswerSheet, Exam, Question, QuestionKind};
use crate::resolve::resolve_to_canonical;

/// Outcome of scoring one question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Selection resolves to the same canonical token as the key.
    Correct,
    /// Selection resolves to a different token.
    Incorrect,
    /// No selection, or one that normalizes to nothing.
    Unanswered,
    /// The answer key itself normalizes to nothing.
    InvalidKey,
}

impl Verdict {
    pub fn is_correct(self) -> bool {
        self == Verdict::Correct
    }
}

/// Scoring result for a single question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionResult {
    pub question_id: String,
    pub kind: QuestionKind,
    #[serde(default)]
    pub tags: Vec<String>,
    /// The selection as given by the user.
    pub selected_raw: Option<String>,
    /// Canonical form of the selection.
    pub selected: String,
    /// Canonical form of the answer key.
    pub expected: String,
    pub verdict: Verdict,
}

/// Score one question against a raw selection.
pub fn score_question(question: &Question, selection: Option<&str>) -> QuestionResult {
    let options = question.option_list();
    let expected = resolve_to_canonical(&question.correct_answer, options);
    let selected = selection
        .map(|s| resolve_to_canonical(s, options))
        .unwrap_or_default();

    let verdict = if expected.is_empty() {
        Verdict::InvalidKey
    } else if selected.is_empty() {
        Verdict::Unanswered
    } else if selected == expected {
        Verdict::Correct
    } else {
        Verdict::Incorrect
    };

    tracing::debug!(
        question = %question.id,
        %expected,
        %selected,
        ?verdict,
        "scored question"
    );

    QuestionResult {
        question_id: question.id.clone(),
        kind: question.kind,
        tags: question.tags.clone(),
        selected_raw: selection.map(str::to_string),
        selected,
        expected,
        verdict,
    }
}

/// Score every question of an exam against an answer sheet.
///
/// Results follow the exam's question order. Answers for unknown question
/// ids are ignored.
pub fn score_answers(exam: &Exam, sheet: &AnswerSheet) -> Vec<QuestionResult> {
    if let Some(sheet_exam) = &sheet.exam_id {
        if sheet_exam != &exam.id {
            tracing::warn!(
                "answer sheet is for exam '{}', scoring against '{}'",
                sheet_exam,
                exam.id
            );
        }
    }

    for id in sheet.answers.keys() {
        if exam.question(id).is_none() {
            tracing::warn!("ignoring answer for unknown question '{}'", id);
        }
    }

    exam.questions
        .iter()
        .map(|q| score_question(q, sheet.selection(&q.id)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mc(id: &str, options: &[&str], key: &str) -> Question {
        Question {
            id: id.into(),
            prompt: String::new(),
            kind: QuestionKind::MultipleChoice,
            options: options.iter().map(|s| s.to_string()).collect(),
            correct_answer: key.into(),
            tags: vec![],
            explanation: None,
        }
    }

    fn tf(id: &str, key: &str) -> Question {
        Question {
            id: id.into(),
            prompt: String::new(),
            kind: QuestionKind::TrueFalse,
            options: vec![],
            correct_answer: key.into(),
            tags: vec![],
            explanation: None,
        }
    }

    #[test]
    fn prose_key_and_prose_selection() {
        let q = mc(
            "loja",
            &["A loja abre 24h", "A loja fecha aos domingos"],
            "A loja fecha aos domingos",
        );
        let r = score_question(&q, Some("b) a loja fecha aos domingos"));
        assert_eq!(r.expected, "B");
        assert_eq!(r.selected, "B");
        assert_eq!(r.verdict, Verdict::Correct);
    }

    #[test]
    fn decorated_letter_selection() {
        let q = mc("q", &["x", "y", "z"], "C");
        assert!(score_question(&q, Some("(c)")).verdict.is_correct());
        assert_eq!(score_question(&q, Some("A.")).verdict, Verdict::Incorrect);
    }

    #[test]
    fn true_false_synonyms() {
        let q = tf("q", "Verdadeiro");
        assert_eq!(score_question(&q, Some("true")).verdict, Verdict::Correct);
        assert_eq!(score_question(&q, Some("v")).verdict, Verdict::Correct);
        assert_eq!(score_question(&q, Some("F")).verdict, Verdict::Incorrect);
    }

    #[test]
    fn unanswered() {
        let q = mc("q", &["x", "y"], "A");
        assert_eq!(score_question(&q, None).verdict, Verdict::Unanswered);
        assert_eq!(score_question(&q, Some("  ")).verdict, Verdict::Unanswered);
        assert_eq!(score_question(&q, Some("()")).verdict, Verdict::Unanswered);
    }

    #[test]
    fn invalid_key() {
        let q = mc("q", &["x", "y"], "--");
        let r = score_question(&q, Some("A"));
        assert_eq!(r.verdict, Verdict::InvalidKey);
        assert!(r.expected.is_empty());
    }

    #[test]
    fn letter_word_prose_is_not_a_letter() {
        let q = mc(
            "combinacao",
            &["A e B estão corretas", "A e C estão corretas", "Nenhuma"],
            "A e C estão corretas",
        );
        assert_eq!(score_question(&q, Some("b")).verdict, Verdict::Correct);
        assert_eq!(
            score_question(&q, Some("a) A e C estão corretas")).verdict,
            Verdict::Correct
        );
        assert_eq!(
            score_question(&q, Some("A e B estão corretas")).verdict,
            Verdict::Incorrect
        );
        assert_eq!(score_question(&q, Some("C")).verdict, Verdict::Incorrect);
    }

    #[test]
    fn score_answers_in_exam_order() {
        let exam = Exam {
            id: "e".into(),
            name: "E".into(),
            description: String::new(),
            questions: vec![mc("q1", &["x", "y"], "B"), tf("q2", "F")],
        };
        let mut sheet = AnswerSheet::default();
        sheet.answers.insert("q2".into(), "falso".into());
        sheet.answers.insert("q1".into(), "y".into());
        sheet.answers.insert("q9".into(), "A".into());

        let results = score_answers(&exam, &sheet);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].question_id, "q1");
        assert!(results.iter().all(|r| r.verdict.is_correct()));
    }
}
