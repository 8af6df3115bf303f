//! The `gabarito validate` command.
//!
//! Problems that stop an exam from being scored are printed as `ERROR` and
//! fail the command. Everything else is a `WARNING`.

use std::path::PathBuf;

use anyhow::Result;
use gabarito_core::parser;

pub fn execute(exam_path: PathBuf) -> Result<()> {
    let files = if exam_path.is_dir() {
        parser::exam_files(&exam_path)?
    } else {
        vec![exam_path]
    };

    let mut errors = 0;
    let mut warnings = 0;

    for path in &files {
        // Lenient read, so every fatal problem in the file gets listed.
        let exam = match parser::read_exam(path) {
            Ok(exam) => exam,
            Err(e) => {
                println!("{}: ERROR: {e:#}", path.display());
                errors += 1;
                continue;
            }
        };

        println!("Exam: {} ({} questions)", exam.name, exam.questions.len());

        for issue in parser::validate_exam(&exam) {
            let prefix = issue
                .question_id
                .as_ref()
                .map(|id| format!("  [{id}]"))
                .unwrap_or_else(|| "  ".to_string());
            let label = if issue.fatal {
                errors += 1;
                "ERROR"
            } else {
                warnings += 1;
                "WARNING"
            };
            println!("{prefix} {label}: {}", issue.message);
        }
    }

    if errors > 0 {
        anyhow::bail!("{errors} error(s), {warnings} warning(s) found");
    }

    if warnings == 0 {
        println!("All exams valid.");
    } else {
        println!("\n{warnings} warning(s) found.");
    }

    Ok(())
}
