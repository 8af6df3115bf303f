//! The `gabarito score` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use gabarito_core::config::load_config_from;
use gabarito_core::parser;
use gabarito_core::report::ScoreReport;
use gabarito_core::scoring::Verdict;
use gabarito_core::statistics::BucketStats;

pub fn execute(
    exam_path: PathBuf,
    answers_path: PathBuf,
    format: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    tracing::debug!(?config, "loaded config");
    let format = format.unwrap_or_else(|| config.default_format.clone());

    let exam = parser::parse_exam(&exam_path)?;
    let sheet = parser::parse_answer_sheet(&answers_path)?;

    let report = ScoreReport::score(&exam, &sheet, &config);

    match format.as_str() {
        "json" => println!("{}", report.to_json()?),
        "text" => print_text(&report),
        other => anyhow::bail!("unknown format: {other} (expected text or json)"),
    }

    Ok(())
}

fn print_text(report: &ScoreReport) {
    let mut table = Table::new();
    table.set_header(vec!["Question", "Selected", "Expected", "Verdict"]);

    for r in &report.results {
        table.add_row(vec![
            Cell::new(&r.question_id),
            Cell::new(r.selected_raw.as_deref().unwrap_or("-")),
            Cell::new(&r.expected),
            Cell::new(verdict_label(r.verdict)),
        ]);
    }

    println!("{}: {}", report.exam.name, report.exam.id);
    println!("{table}");

    if !report.stats.per_tag.is_empty() {
        let mut tags = Table::new();
        tags.set_header(vec!["Tag", "Correct", "Total", "Accuracy"]);
        for (tag, stats) in &report.stats.per_tag {
            tags.add_row(bucket_row(tag, stats));
        }
        println!("{tags}");
    }

    let overall = &report.stats.overall;
    println!(
        "Score: {}/{} ({:.1}%)",
        overall.correct,
        overall.scorable(report.count_unanswered_as_wrong),
        overall.accuracy * 100.0
    );
    for (label, verdict) in [
        ("Incorrect", Verdict::Incorrect),
        ("Unanswered", Verdict::Unanswered),
        ("Questions with an invalid answer key", Verdict::InvalidKey),
    ] {
        let ids: Vec<&str> = report
            .with_verdict(verdict)
            .map(|r| r.question_id.as_str())
            .collect();
        if !ids.is_empty() {
            println!("{label}: {} ({})", ids.len(), ids.join(", "));
        }
    }
    println!(
        "Result: {} (threshold {:.0}%)",
        if report.passed { "PASSED" } else { "FAILED" },
        report.pass_threshold * 100.0
    );
}

fn bucket_row(name: &str, stats: &BucketStats) -> Vec<Cell> {
    vec![
        Cell::new(name),
        Cell::new(stats.correct),
        Cell::new(stats.total),
        Cell::new(format!("{:.1}%", stats.accuracy * 100.0)),
    ]
}

fn verdict_label(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Correct => "correct",
        Verdict::Incorrect => "incorrect",
        Verdict::Unanswered => "unanswered",
        Verdict::InvalidKey => "invalid key",
    }
}
