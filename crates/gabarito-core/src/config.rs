//! Scoring configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable overriding [`GabaritoConfig::pass_threshold`].
pub const PASS_THRESHOLD_ENV: &str = "GABARITO_PASS_THRESHOLD";

/// Top-level gabarito configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GabaritoConfig {
    /// Fraction of correct answers needed to pass an exam.
    #[serde(default = "default_pass_threshold")]
    pub pass_threshold: f64,
    /// Keep unanswered questions in the accuracy denominator.
    #[serde(default = "default_true")]
    pub count_unanswered_as_wrong: bool,
    /// Output format for `score`: text or json.
    #[serde(default = "default_format")]
    pub default_format: String,
}

fn default_pass_threshold() -> f64 {
    0.6
}
fn default_true() -> bool {
    true
}
fn default_format() -> String {
    "text".to_string()
}

impl Default for GabaritoConfig {
    fn default() -> Self {
        Self {
            pass_threshold: default_pass_threshold(),
            count_unanswered_as_wrong: true,
            default_format: default_format(),
        }
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order without a path:
/// 1. `gabarito.toml` in the current directory
/// 2. `~/.config/gabarito/config.toml`
///
/// Environment variable override: `GABARITO_PASS_THRESHOLD`.
pub fn load_config_from(path: Option<&Path>) -> Result<GabaritoConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("gabarito.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<GabaritoConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => GabaritoConfig::default(),
    };

    if let Ok(raw) = std::env::var(PASS_THRESHOLD_ENV) {
        match raw.trim().parse::<f64>() {
            Ok(t) => config.pass_threshold = t,
            Err(_) => tracing::warn!("ignoring invalid {}={:?}", PASS_THRESHOLD_ENV, raw),
        }
    }

    anyhow::ensure!(
        (0.0..=1.0).contains(&config.pass_threshold),
        "pass_threshold must be between 0.0 and 1.0, got {}",
        config.pass_threshold
    );

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("gabarito"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = GabaritoConfig::default();
        assert_eq!(config.pass_threshold, 0.6);
        assert!(config.count_unanswered_as_wrong);
        assert_eq!(config.default_format, "text");
    }

    #[test]
    fn parse_partial_config() {
        let config: GabaritoConfig = toml::from_str("pass_threshold = 0.7").unwrap();
        assert_eq!(config.pass_threshold, 0.7);
        assert!(config.count_unanswered_as_wrong);
    }

    #[test]
    fn load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gabarito.toml");
        std::fs::write(
            &path,
            "pass_threshold = 0.5\ncount_unanswered_as_wrong = false\ndefault_format = \"json\"\n",
        )
        .unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        assert!(!config.count_unanswered_as_wrong);
        assert_eq!(config.default_format, "json");
    }

    #[test]
    fn load_missing_explicit_path() {
        let err = load_config_from(Some(Path::new("/no/such/gabarito.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn rejects_threshold_out_of_range() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gabarito.toml");
        std::fs::write(&path, "pass_threshold = 1.5\n").unwrap();
        assert!(load_config_from(Some(&path)).is_err());
    }
}
