//! Score report for one exam attempt.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::GabaritoConfig;
use crate::model::{AnswerSheet, Exam};
use crate::scoring::{score_answers, QuestionResult, Verdict};
use crate::statistics::{compute_exam_stats, ExamStats};

/// A complete score report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Summary of the exam.
    pub exam: ExamSummary,
    /// Individual question results, in exam order.
    pub results: Vec<QuestionResult>,
    /// Aggregate statistics.
    pub stats: ExamStats,
    /// Accuracy needed to pass.
    pub pass_threshold: f64,
    /// Whether unanswered questions counted towards accuracy.
    pub count_unanswered_as_wrong: bool,
    /// Whether overall accuracy reached the threshold.
    pub passed: bool,
}

/// Summary of an exam (without the full question definitions).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamSummary {
    pub id: String,
    pub name: String,
    pub question_count: usize,
}

impl ScoreReport {
    /// Score an answer sheet and build the report.
    pub fn score(exam: &Exam, sheet: &AnswerSheet, config: &GabaritoConfig) -> Self {
        let results = score_answers(exam, sheet);
        let stats = compute_exam_stats(&results, config.count_unanswered_as_wrong);
        let passed = stats.overall.accuracy >= config.pass_threshold;

        tracing::info!(
            exam = %exam.id,
            correct = stats.overall.correct,
            total = stats.overall.total,
            accuracy = stats.overall.accuracy,
            passed,
            "scored exam"
        );

        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            exam: ExamSummary {
                id: exam.id.clone(),
                name: exam.name.clone(),
                question_count: exam.questions.len(),
            },
            results,
            stats,
            pass_threshold: config.pass_threshold,
            count_unanswered_as_wrong: config.count_unanswered_as_wrong,
            passed,
        }
    }

    /// Results with the given verdict.
    pub fn with_verdict(&self, verdict: Verdict) -> impl Iterator<Item = &QuestionResult> {
        self.results.iter().filter(move |r| r.verdict == verdict)
    }

    /// Serialize the report as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize report")
    }
}
