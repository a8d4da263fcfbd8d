//! Application-level configuration loading, including the runtime question bank.

use std::{
    env, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::state::questions::{DEFAULT_SUBJECT, QuestionBank, QuestionBankError};

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "PARTY_TRIVIA_CONFIG_PATH";
/// Default directory the static frontend is served from.
const DEFAULT_STATIC_DIR: &str = "public";
/// Environment variable that overrides [`DEFAULT_STATIC_DIR`].
const STATIC_DIR_ENV: &str = "STATIC_DIR";

/// Reasons a configuration file cannot be turned into a question bank.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file is not valid JSON for the expected shape.
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
    /// The JSON parsed but the bank content is unusable.
    #[error("invalid question bank: {0}")]
    Questions(#[from] QuestionBankError),
}

#[derive(Debug, Clone)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    static_dir: PathBuf,
    questions: QuestionBank,
}

impl AppConfig {
    /// Load the application configuration from disk, falling back to the built-in question bank.
    pub fn load() -> Self {
        Self::load_from(&resolve_config_path())
    }

    /// Load the configuration file at `path`, keeping the built-in question bank
    /// when the file is missing or unusable.
    pub fn load_from(path: &Path) -> Self {
        let questions = match fs::read_to_string(path) {
            Ok(contents) => match parse_question_bank(&contents) {
                Ok(bank) => {
                    info!(
                        path = %path.display(),
                        subject = bank.subject(),
                        count = bank.len(),
                        "loaded question bank from config"
                    );
                    bank
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    QuestionBank::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in questions"
                );
                QuestionBank::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                QuestionBank::default()
            }
        };

        Self {
            static_dir: resolve_static_dir(),
            questions,
        }
    }

    /// Build a configuration from explicit parts.
    pub fn new(static_dir: impl Into<PathBuf>, questions: QuestionBank) -> Self {
        Self {
            static_dir: static_dir.into(),
            questions,
        }
    }

    /// Directory the static frontend is served from.
    pub fn static_dir(&self) -> &PathBuf {
        &self.static_dir
    }

    /// Question bank used by every game.
    pub fn questions(&self) -> &QuestionBank {
        &self.questions
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            questions: QuestionBank::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    #[serde(default)]
    subject: Option<String>,
    questions: Vec<String>,
    tiebreaker: String,
}

impl TryFrom<RawConfig> for QuestionBank {
    type Error = QuestionBankError;

    fn try_from(value: RawConfig) -> Result<Self, Self::Error> {
        QuestionBank::new(
            value.subject.unwrap_or_else(|| DEFAULT_SUBJECT.to_string()),
            value.questions,
            value.tiebreaker,
        )
    }
}

/// Parse the JSON configuration document into a validated question bank.
fn parse_question_bank(contents: &str) -> Result<QuestionBank, ConfigError> {
    let raw = serde_json::from_str::<RawConfig>(contents)?;
    Ok(raw.try_into()?)
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env_path(CONFIG_PATH_ENV).unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// Resolve the static root taking the environment override into account.
fn resolve_static_dir() -> PathBuf {
    env_path(STATIC_DIR_ENV).unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR))
}

fn env_path(key: &str) -> Option<PathBuf> {
    env::var_os(key)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
}
