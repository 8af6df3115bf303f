//! Aggregate statistics over scored questions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::scoring::{QuestionResult, Verdict};

/// Verdict counts for a group of questions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BucketStats {
    pub total: usize,
    pub correct: usize,
    pub incorrect: usize,
    pub unanswered: usize,
    pub invalid_key: usize,
    /// Fraction of scorable questions answered correctly.
    pub accuracy: f64,
}

impl BucketStats {
    fn record(&mut self, verdict: Verdict) {
        self.total += 1;
        match verdict {
            Verdict::Correct => self.correct += 1,
            Verdict::Incorrect => self.incorrect += 1,
            Verdict::Unanswered => self.unanswered += 1,
            Verdict::InvalidKey => self.invalid_key += 1,
        }
    }

    fn finish(&mut self, count_unanswered_as_wrong: bool) {
        self.accuracy = accuracy(self.correct, self.scorable(count_unanswered_as_wrong));
    }

    /// Questions that count towards accuracy.
    ///
    /// Questions with an invalid key are never scorable; unanswered ones are
    /// only when they count as wrong.
    pub fn scorable(&self, count_unanswered_as_wrong: bool) -> usize {
        let skipped = if count_unanswered_as_wrong {
            self.invalid_key
        } else {
            self.invalid_key + self.unanswered
        };
        self.total - skipped
    }
}

/// Statistics for one scored exam.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExamStats {
    /// All questions.
    pub overall: BucketStats,
    /// Per tag. A question with several tags counts in each of them.
    pub per_tag: BTreeMap<String, BucketStats>,
    /// Per question kind.
    pub per_kind: BTreeMap<String, BucketStats>,
}

/// `correct / scorable`, or 0.0 when nothing is scorable.
pub fn accuracy(correct: usize, scorable: usize) -> f64 {
    if scorable == 0 {
        return 0.0;
    }
    correct as f64 / scorable as f64
}

/// Compute statistics over a set of question results.
pub fn compute_exam_stats(
    results: &[QuestionResult],
    count_unanswered_as_wrong: bool,
) -> ExamStats {
    let mut stats = ExamStats::default();

    for r in results {
        stats.overall.record(r.verdict);
        for tag in &r.tags {
            stats.per_tag.entry(tag.clone()).or_default().record(r.verdict);
        }
        stats
            .per_kind
            .entry(r.kind.to_string())
            .or_default()
            .record(r.verdict);
    }

    stats.overall.finish(count_unanswered_as_wrong);
    for bucket in stats
        .per_tag
        .values_mut()
        .chain(stats.per_kind.values_mut())
    {
        bucket.finish(count_unanswered_as_wrong);
    }

    stats
}
