// Configuration loading and parsing (league.toml).

use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::roster::player::Position;
use crate::valuation::predict::PredictionWeights;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// league.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire league.toml file.
#[derive(Debug, Clone, Deserialize)]
struct LeagueFile {
    team: TeamSettings,
    lineup: HashMap<String, usize>,
    #[serde(default)]
    prediction: PredictionWeights,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TeamSettings {
    /// Display name of the fantasy team.
    pub name: String,
    /// Path to the curated player CSV, relative to the working directory.
    pub roster_file: String,
}

/// The assembled configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub team: TeamSettings,
    /// Lineup slot counts keyed by position tag (e.g. "C" -> 2).
    pub lineup: HashMap<String, usize>,
    pub prediction: PredictionWeights,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/league.toml` relative to the
/// given `base_dir`.
///
/// This is the lower-level loading primitive that does not auto-copy
/// defaults. Prefer `load_config()` which handles default initialization.
pub(crate) fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let league_path = base_dir.join("config").join("league.toml");
    let league_text = read_file(&league_path)?;
    let league_file: LeagueFile =
        toml::from_str(&league_text).map_err(|e| ConfigError::ParseError {
            path: league_path,
            source: e,
        })?;

    let config = Config {
        team: league_file.team,
        lineup: league_file.lineup,
        prediction: league_file.prediction,
    };

    validate(&config)?;

    Ok(config)
}

/// Ensure `config/league.toml` exists by copying it from `defaults/` when
/// missing. Returns the list of files that were copied.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.exists() {
        if !config_dir.exists() {
            return Err(ConfigError::DefaultsCopyError {
                message: format!(
                    "neither defaults/ nor config/ directory found in {}; \
                     run from the project root or ensure defaults/ is present",
                    base_dir.display()
                ),
            });
        }
        return Ok(vec![]);
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;

    let mut copied = Vec::new();

    let entries = std::fs::read_dir(&defaults_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to read defaults directory: {e}"),
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to read defaults entry: {e}"),
        })?;
        let path = entry.path();

        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name() else {
            continue;
        };
        let target = config_dir.join(file_name);

        match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
        {
            Ok(mut dest) => {
                let content = std::fs::read(&path).map_err(|e| ConfigError::DefaultsCopyError {
                    message: format!("failed to read {}: {e}", path.display()),
                })?;
                std::io::Write::write_all(&mut dest, &content).map_err(|e| {
                    ConfigError::DefaultsCopyError {
                        message: format!("failed to write {}: {e}", target.display()),
                    }
                })?;
                copied.push(target);
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                // File already exists in config/, skip it
            }
            Err(e) => {
                return Err(ConfigError::DefaultsCopyError {
                    message: format!("failed to create {}: {e}", target.display()),
                });
            }
        }
    }

    Ok(copied)
}

/// Load config against an explicit base directory, copying defaults first.
/// Exposed for testing and flexibility; `load_config()` is the normal entry.
pub fn load_config_at(base_dir: &Path) -> Result<Config, ConfigError> {
    ensure_config_files(base_dir)?;
    load_config_from(base_dir)
}

/// Convenience wrapper: loads config relative to the current working
/// directory, copying default config files first.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    load_config_at(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.team.name.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "team.name".into(),
            message: "must not be empty".into(),
        });
    }

    if config.team.roster_file.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "team.roster_file".into(),
            message: "must not be empty".into(),
        });
    }

    // Lineup tags must be real positions; typos surface here, not as
    // silently missing slots during optimization.
    for tag in config.lineup.keys() {
        if Position::from_str_pos(tag).is_none() {
            return Err(ConfigError::ValidationError {
                field: format!("lineup.{tag}"),
                message: "unknown position tag".into(),
            });
        }
    }

    let total_slots: usize = config.lineup.values().sum();
    if total_slots == 0 {
        return Err(ConfigError::ValidationError {
            field: "lineup".into(),
            message: "must define at least one starting slot".into(),
        });
    }

    let w = config.prediction.recent_weight;
    if !(0.0..=1.0).contains(&w) {
        return Err(ConfigError::ValidationError {
            field: "prediction.recent_weight".into(),
            message: format!("must be between 0.0 and 1.0 inclusive, got {w}"),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
