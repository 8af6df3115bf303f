//! gabarito CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "gabarito",
    version,
    about = "Exam answer normalization and scoring"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the canonical token for each raw answer
    Normalize {
        /// Raw answers (e.g. "(b)", "Verdadeiro", "A) Rio de Janeiro")
        #[arg(required = true)]
        raw: Vec<String>,
    },

    /// Resolve an answer key to its option letter
    Resolve {
        /// The answer key: a letter, option text or true/false word
        #[arg(long)]
        answer: String,

        /// Option texts in display order (repeat for each option)
        #[arg(long = "option")]
        options: Vec<String>,
    },

    /// Score an answer sheet against an exam
    Score {
        /// Path to the exam .toml file
        #[arg(long)]
        exam: PathBuf,

        /// Path to the answer sheet .toml file
        #[arg(long)]
        answers: PathBuf,

        /// Output format: text, json (default from config)
        #[arg(long)]
        format: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate exam TOML files
    Validate {
        /// Path to exam file or directory
        #[arg(long)]
        exam: PathBuf,
    },

    /// Create starter config, example exam and answer sheet
    Init,
}

/// Filter used when `RUST_LOG` is unset or unparsable.
const DEFAULT_LOG_FILTER: &str = "gabarito=info,gabarito_core=info";

fn main() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Normalize { raw } => commands::normalize::execute(raw),
        Commands::Resolve { answer, options } => commands::resolve::execute(answer, options),
        Commands::Score {
            exam,
            answers,
            format,
            config,
        } => commands::score::execute(exam, answers, format, config),
        Commands::Validate { exam } => commands::validate::execute(exam),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
