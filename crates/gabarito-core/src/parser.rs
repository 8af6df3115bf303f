//! TOML exam and answer-sheet parser.
//!
//! Loads exams from TOML files and directories, and validates them.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::error::ExamError;
use crate::model::{AnswerSheet, Exam, Question, QuestionKind};
use crate::normalize::{is_boolean_token, normalize};
use crate::resolve::{letter_index, resolve_to_canonical, OPTION_LETTERS};

/// Intermediate TOML structure for parsing exam files.
#[derive(Debug, Deserialize)]
struct TomlExamFile {
    exam: TomlExamHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlExamHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    id: String,
    #[serde(default)]
    prompt: String,
    #[serde(default)]
    kind: Option<String>,
    #[serde(default)]
    options: Vec<String>,
    correct_answer: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    explanation: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TomlAnswerSheet {
    #[serde(default)]
    exam_id: Option<String>,
    #[serde(default)]
    answers: BTreeMap<String, String>,
}

/// Parse a single TOML file into an `Exam`.
pub fn parse_exam(path: &Path) -> Result<Exam> {
    let exam = read_exam(path)?;
    reject_fatal(exam, path)
}

/// Parse a TOML string into an `Exam` (useful for testing).
///
/// Fails on fatal structural errors (duplicate ids, too many options).
pub fn parse_exam_str(content: &str, source_path: &Path) -> Result<Exam> {
    let exam = read_exam_str(content, source_path)?;
    reject_fatal(exam, source_path)
}

/// Read an exam file without rejecting fatal structural errors.
///
/// For reporting tools that want every problem in the file; use
/// [`parse_exam`] before scoring.
pub fn read_exam(path: &Path) -> Result<Exam> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read exam file: {}", path.display()))?;

    read_exam_str(&content, path)
}

/// String form of [`read_exam`].
pub fn read_exam_str(content: &str, source_path: &Path) -> Result<Exam> {
    let parsed: TomlExamFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let questions = parsed
        .questions
        .into_iter()
        .map(|q| {
            let kind = q
                .kind
                .map(|k| k.parse().map_err(|e: String| anyhow::anyhow!("{}", e)))
                .transpose()
                .with_context(|| format!("question {}", q.id))?
                .unwrap_or_default();

            Ok(Question {
                id: q.id,
                prompt: q.prompt,
                kind,
                options: q.options,
                correct_answer: q.correct_answer,
                tags: q.tags,
                explanation: q.explanation,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Exam {
        id: parsed.exam.id,
        name: parsed.exam.name,
        description: parsed.exam.description,
        questions,
    })
}

fn reject_fatal(exam: Exam, source_path: &Path) -> Result<Exam> {
    if let Some(fatal) = exam_errors(&exam).into_iter().find(ExamError::is_fatal) {
        return Err(anyhow::Error::new(fatal))
            .with_context(|| format!("invalid exam: {}", source_path.display()));
    }

    Ok(exam)
}

/// Recursively load all `.toml` exam files from a directory.
///
/// Files that fail to parse are skipped with a warning.
pub fn load_exam_directory(dir: &Path) -> Result<Vec<Exam>> {
    let mut exams = Vec::new();

    for path in exam_files(dir)? {
        match parse_exam(&path) {
            Ok(exam) => exams.push(exam),
            Err(e) => {
                tracing::warn!("skipping {}: {:#}", path.display(), e);
            }
        }
    }

    Ok(exams)
}

/// All `.toml` files under `dir`, recursively, in path order.
pub fn exam_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.path());

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.path();

        if path.is_dir() {
            files.extend(exam_files(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            files.push(path);
        }
    }

    Ok(files)
}

/// Parse an answer sheet TOML file.
pub fn parse_answer_sheet(path: &Path) -> Result<AnswerSheet> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read answer sheet: {}", path.display()))?;

    parse_answer_sheet_str(&content, path)
}

/// Parse an answer sheet from a TOML string.
pub fn parse_answer_sheet_str(content: &str, source_path: &Path) -> Result<AnswerSheet> {
    let parsed: TomlAnswerSheet = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    Ok(AnswerSheet {
        exam_id: parsed.exam_id,
        answers: parsed.answers,
    })
}

/// Structural errors in an exam, fatal or not.
pub fn exam_errors(exam: &Exam) -> Vec<ExamError> {
    let mut errors = Vec::new();

    let mut seen_ids = HashSet::new();
    for q in &exam.questions {
        if !seen_ids.insert(q.id.as_str()) {
            errors.push(ExamError::DuplicateQuestionId(q.id.clone()));
        }
    }

    for q in &exam.questions {
        if q.options.len() > OPTION_LETTERS.len() {
            errors.push(ExamError::TooManyOptions {
                question_id: q.id.clone(),
                count: q.options.len(),
            });
        }
        if q.kind == QuestionKind::MultipleChoice && q.options.is_empty() {
            errors.push(ExamError::MissingOptions {
                question_id: q.id.clone(),
            });
        }
        if q.correct_answer.trim().is_empty() {
            errors.push(ExamError::EmptyCorrectAnswer {
                question_id: q.id.clone(),
            });
        }
        if let Some((first, second)) = colliding_options(&q.options) {
            errors.push(ExamError::AmbiguousOptions {
                question_id: q.id.clone(),
                first,
                second,
            });
        }
    }

    errors
}

/// First pair of addressable options whose texts normalize to the same token.
fn colliding_options(options: &[String]) -> Option<(char, char)> {
    let mut seen: HashMap<String, char> = HashMap::new();
    for (text, letter) in options.iter().zip(OPTION_LETTERS) {
        let token = normalize(text.as_str());
        if let Some(&first) = seen.get(&token) {
            return Some((first, letter));
        }
        seen.insert(token, letter);
    }
    None
}

/// A problem found by exam validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question ID (if applicable).
    pub question_id: Option<String>,
    /// `true` when the exam cannot be scored until this is fixed.
    pub fatal: bool,
    /// Warning message.
    pub message: String,
}

/// Validate an exam for common issues.
pub fn validate_exam(exam: &Exam) -> Vec<ValidationWarning> {
    let mut warnings: Vec<ValidationWarning> = exam_errors(exam)
        .into_iter()
        .map(|e| ValidationWarning {
            question_id: Some(e.question_id().to_string()),
            fatal: e.is_fatal(),
            message: e.to_string(),
        })
        .collect();

    for q in &exam.questions {
        if q.prompt.trim().is_empty() {
            warnings.push(ValidationWarning {
                question_id: Some(q.id.clone()),
                fatal: false,
                message: "prompt is empty".into(),
            });
        }

        if q.correct_answer.trim().is_empty() {
            continue;
        }

        match q.kind {
            QuestionKind::MultipleChoice if !q.options.is_empty() => {
                let key = resolve_to_canonical(&q.correct_answer, q.option_list());
                if letter_index(&key).is_none() {
                    warnings.push(ValidationWarning {
                        question_id: Some(q.id.clone()),
                        fatal: false,
                        message: format!(
                            "correct_answer {:?} does not match any option",
                            q.correct_answer
                        ),
                    });
                }
            }
            QuestionKind::MultipleChoice => {}
            QuestionKind::TrueFalse => {
                if !q.options.is_empty() {
                    warnings.push(ValidationWarning {
                        question_id: Some(q.id.clone()),
                        fatal: false,
                        message: "true/false question has options; keys resolve against them"
                            .into(),
                    });
                } else if !is_boolean_token(&normalize(q.correct_answer.as_str())) {
                    warnings.push(ValidationWarning {
                        question_id: Some(q.id.clone()),
                        fatal: false,
                        message: format!(
                            "correct_answer {:?} is not a true/false value",
                            q.correct_answer
                        ),
                    });
                }
            }
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_TOML: &str = r#"
[exam]
id = "geo-1"
name = "Geografia"
description = "Capitais e regiões"

[[questions]]
id = "capital-rj"
prompt = "Qual é a capital do estado do Rio de Janeiro?"
options = ["Rio de Janeiro", "Niterói", "Petrópolis"]
correct_answer = "A"
tags = ["capitais"]

[[questions]]
id = "capital-sp"
prompt = "Qual é a capital do estado de São Paulo?"
options = ["Campinas", "São Paulo"]
correct_answer = "São Paulo"
tags = ["capitais"]

[[questions]]
id = "amazonia"
prompt = "A Amazônia é a maior floresta tropical do mundo."
kind = "true_false"
correct_answer = "Verdadeiro"
explanation = "Cobre cerca de 5,5 milhões de km²."
"#;

    fn parse(toml: &str) -> Result<Exam> {
        parse_exam_str(toml, &PathBuf::from("test.toml"))
    }

    #[test]
    fn parse_valid_toml() {
        let exam = parse(VALID_TOML).unwrap();
        assert_eq!(exam.id, "geo-1");
        assert_eq!(exam.name, "Geografia");
        assert_eq!(exam.questions.len(), 3);
        assert_eq!(exam.questions[0].kind, QuestionKind::MultipleChoice);
        assert_eq!(exam.questions[2].kind, QuestionKind::TrueFalse);
        assert!(exam.questions[2].explanation.is_some());
        assert!(validate_exam(&exam).is_empty());
    }

    #[test]
    fn parse_missing_optional_fields() {
        let toml = r#"
[exam]
id = "minimal"
name = "Minimal"

[[questions]]
id = "q1"
options = ["x", "y"]
correct_answer = "b"
"#;
        let exam = parse(toml).unwrap();
        assert!(exam.description.is_empty());
        assert!(exam.questions[0].tags.is_empty());
        assert!(exam.questions[0].explanation.is_none());
    }

    #[test]
    fn parse_unknown_kind() {
        let toml = r#"
[exam]
id = "bad-kind"
name = "Bad kind"

[[questions]]
id = "q1"
kind = "essay"
correct_answer = "A"
"#;
        let err = parse(toml).unwrap_err();
        assert!(format!("{err:#}").contains("unknown question kind"));
    }

    #[test]
    fn duplicate_ids_are_fatal() {
        let toml = r#"
[exam]
id = "dupes"
name = "Dupes"

[[questions]]
id = "same"
options = ["x", "y"]
correct_answer = "A"

[[questions]]
id = "same"
options = ["x", "y"]
correct_answer = "B"
"#;
        let err = parse(toml).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ExamError>(),
            Some(&ExamError::DuplicateQuestionId("same".into()))
        );
    }

    #[test]
    fn too_many_options_are_fatal() {
        let toml = r#"
[exam]
id = "six"
name = "Six options"

[[questions]]
id = "q1"
options = ["1", "2", "3", "4", "5", "6"]
correct_answer = "A"
"#;
        let err = parse(toml).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ExamError>(),
            Some(ExamError::TooManyOptions { count: 6, .. })
        ));
    }

    #[test]
    fn validate_unresolvable_key() {
        let toml = r#"
[exam]
id = "mismatch"
name = "Mismatch"

[[questions]]
id = "q1"
prompt = "Capital do Brasil?"
options = ["Rio de Janeiro", "São Paulo"]
correct_answer = "Brasília"
"#;
        let exam = parse(toml).unwrap();
        let warnings = validate_exam(&exam);
        assert!(warnings
            .iter()
            .any(|w| w.message.contains("does not match any option")));
    }

    #[test]
    fn validate_missing_options_and_empty_key() {
        let toml = r#"
[exam]
id = "holes"
name = "Holes"

[[questions]]
id = "q1"
prompt = "?"
correct_answer = "A"

[[questions]]
id = "q2"
options = ["x"]
correct_answer = "  "
"#;
        let exam = parse(toml).unwrap();
        let warnings = validate_exam(&exam);
        assert!(warnings.iter().any(|w| w.message.contains("has no options")));
        assert!(warnings
            .iter()
            .any(|w| w.message.contains("correct_answer is empty")));
        assert!(warnings.iter().any(|w| w.message == "prompt is empty"));
    }

    #[test]
    fn validate_options_that_normalize_alike() {
        let toml = r#"
[exam]
id = "dup"
name = "Dup"

[[questions]]
id = "q1"
prompt = "Quais estão corretas?"
options = ["A e B estão corretas", "A e C estão corretas", "Nenhuma", "nenhuma."]
correct_answer = "A e C estão corretas"
"#;
        let exam = parse(toml).unwrap();
        let q = &exam.questions[0];
        assert_eq!(resolve_to_canonical(&q.correct_answer, q.option_list()), "B");

        let warnings = validate_exam(&exam);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].question_id.as_deref(), Some("q1"));
        assert!(!warnings[0].fatal);
        assert_eq!(
            warnings[0].message,
            "question q1: options C and D normalize to the same text"
        );
    }

    #[test]
    fn read_exam_keeps_fatal_errors() {
        let toml = r#"
[exam]
id = "twice"
name = "Twice"

[[questions]]
id = "q1"
options = ["x", "y"]
correct_answer = "A"

[[questions]]
id = "q1"
options = ["x", "y"]
correct_answer = "B"
"#;
        assert!(parse(toml).is_err());

        let exam = read_exam_str(toml, &PathBuf::from("twice.toml")).unwrap();
        let warnings = validate_exam(&exam);
        assert!(warnings
            .iter()
            .any(|w| w.fatal && w.message == "duplicate question ID: q1"));
    }

    #[test]
    fn validate_true_false_key() {
        let toml = r#"
[exam]
id = "tf"
name = "TF"

[[questions]]
id = "q1"
prompt = "O sol é uma estrela."
kind = "true_false"
correct_answer = "Talvez"
"#;
        let exam = parse(toml).unwrap();
        let warnings = validate_exam(&exam);
        assert!(warnings
            .iter()
            .any(|w| w.message.contains("not a true/false value")));
    }

    #[test]
    fn parse_malformed_toml() {
        let bad = "this is not [valid toml }{";
        assert!(parse(bad).is_err());
    }

    #[test]
    fn parse_answer_sheet_from_str() {
        let toml = r#"
exam_id = "geo-1"

[answers]
capital-rj = "a) rio de janeiro"
amazonia = "V"
"#;
        let sheet = parse_answer_sheet_str(toml, &PathBuf::from("answers.toml")).unwrap();
        assert_eq!(sheet.exam_id.as_deref(), Some("geo-1"));
        assert_eq!(sheet.selection("amazonia"), Some("V"));
        assert_eq!(sheet.answers.len(), 2);
    }

    #[test]
    fn load_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("geo.toml"), VALID_TOML).unwrap();
        std::fs::write(dir.path().join("broken.toml"), "not = [toml").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let exams = load_exam_directory(dir.path()).unwrap();
        assert_eq!(exams.len(), 1);
        assert_eq!(exams[0].id, "geo-1");
    }

    #[test]
    fn exam_files_recurse_in_order() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join("b.toml"), VALID_TOML).unwrap();
        std::fs::write(dir.path().join("a.toml"), VALID_TOML).unwrap();
        std::fs::write(dir.path().join("sub/c.toml"), VALID_TOML).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let files = exam_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            names,
            vec![
                PathBuf::from("a.toml"),
                PathBuf::from("b.toml"),
                PathBuf::from("sub/c.toml")
            ]
        );
    }

    #[test]
    fn load_directory_rejects_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("geo.toml");
        std::fs::write(&file, VALID_TOML).unwrap();
        assert!(load_exam_directory(&file).is_err());
    }
}
