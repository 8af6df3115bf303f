//! The `gabarito init` command.

use std::path::Path;

use anyhow::{Context, Result};

pub fn execute() -> Result<()> {
    write_if_missing(Path::new("gabarito.toml"), SAMPLE_CONFIG)?;
    write_if_missing(Path::new("exams/example.toml"), EXAMPLE_EXAM)?;
    write_if_missing(Path::new("answers/example.toml"), EXAMPLE_ANSWERS)?;

    println!("\nNext steps:");
    println!("  1. Run: gabarito validate --exam exams/example.toml");
    println!("  2. Run: gabarito score --exam exams/example.toml --answers answers/example.toml");

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
        return Ok(());
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))?;
    println!("Created {}", path.display());
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# gabarito configuration

# Fraction of correct answers needed to pass (0.0 - 1.0).
pass_threshold = 0.6

# Keep unanswered questions in the accuracy denominator.
count_unanswered_as_wrong = true

# Output format for `gabarito score`: text or json.
default_format = "text"
"#;

const EXAMPLE_EXAM: &str = r#"[exam]
id = "example"
name = "Example Exam"
description = "A small exam to get started"

[[questions]]
id = "capital"
prompt = "Qual é a capital do Brasil?"
options = ["Rio de Janeiro", "Brasília", "São Paulo"]
correct_answer = "Brasília"
tags = ["geografia"]

[[questions]]
id = "domingo"
prompt = "Segundo o aviso, o que acontece aos domingos?"
options = ["A loja abre 24h", "A loja fecha aos domingos"]
correct_answer = "b)"
tags = ["interpretacao"]

[[questions]]
id = "sol"
prompt = "O Sol é uma estrela."
kind = "true_false"
correct_answer = "Verdadeiro"
tags = ["ciencias"]
"#;

const EXAMPLE_ANSWERS: &str = r#"exam_id = "example"

[answers]
capital = "B) Brasília"
domingo = "a loja fecha aos domingos"
sol = "V"
"#;
