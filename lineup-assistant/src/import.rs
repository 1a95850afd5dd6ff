// Player data import and normalization.
//
// Reads the curated stats CSV: one row per player with season totals, the
// recent-window split, and the upcoming schedule count. Spreadsheet exports
// land here as plain CSV; nothing downstream of this module parses file
// formats. A future scraper or database reader replaces this loader without
// touching the core.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use crate::roster::player::{positions_from_tag, PlayerRecord, Position};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("validation error: {0}")]
    Validation(String),
}

// ---------------------------------------------------------------------------
// Raw CSV serde struct (private)
// ---------------------------------------------------------------------------

/// One raw CSV row. Counting stats are f64 because spreadsheet exports often
/// carry fractional or formatted cells; they are rounded to whole games.
/// Extra columns are silently ignored via `#[serde(flatten)]`.
#[derive(Debug, Deserialize)]
#[allow(dead_code, non_snake_case)]
struct RawPlayerRow {
    Name: String,
    /// Position tags, `/`-separated (e.g. "C/LW").
    Pos: String,
    #[serde(alias = "SeasonPoints")]
    SeasonPts: f64,
    SeasonGP: f64,
    #[serde(alias = "RecentPoints", default)]
    RecentPts: f64,
    #[serde(default)]
    RecentGP: f64,
    #[serde(alias = "UpcomingGames", default)]
    Upcoming: f64,
    /// Absorb any extra columns the spreadsheet includes.
    #[serde(flatten)]
    _extra: HashMap<String, serde_json::Value>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Returns true if all given f64 values are finite (not NaN or Infinity).
fn all_finite(values: &[f64]) -> bool {
    values.iter().all(|v| v.is_finite())
}

/// Parse a `/`-separated position field into concrete positions, expanding
/// combo tags and dropping duplicates while preserving order. Returns None
/// if any tag is unknown, so the caller can skip the row.
fn parse_positions(field: &str) -> Option<Vec<Position>> {
    let mut positions: Vec<Position> = Vec::new();
    for tag in field.split('/') {
        let tag = tag.trim();
        if tag.is_empty() {
            continue;
        }
        let expanded = positions_from_tag(tag);
        if expanded.is_empty() {
            return None;
        }
        for pos in expanded {
            if !positions.contains(&pos) {
                positions.push(pos);
            }
        }
    }
    Some(positions)
}

/// Round a non-negative count cell to u32; None for negative values.
fn count_cell(value: f64) -> Option<u32> {
    if value < 0.0 {
        return None;
    }
    Some(value.round() as u32)
}

// ---------------------------------------------------------------------------
// Reader-based loader (private, enables testing without temp files)
// ---------------------------------------------------------------------------

fn load_players_from_reader<R: Read>(rdr: R) -> Result<Vec<PlayerRecord>, csv::Error> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut players = Vec::new();
    for result in reader.deserialize::<RawPlayerRow>() {
        match result {
            Ok(raw) => {
                let name = raw.Name.trim();
                if !all_finite(&[raw.SeasonPts, raw.RecentPts]) {
                    warn!("skipping player '{}': non-finite points value", name);
                    continue;
                }
                let Some(positions) = parse_positions(&raw.Pos) else {
                    warn!("skipping player '{}': unknown position tag in '{}'", name, raw.Pos);
                    continue;
                };
                let (Some(season_games), Some(recent_games), Some(upcoming)) = (
                    count_cell(raw.SeasonGP),
                    count_cell(raw.RecentGP),
                    count_cell(raw.Upcoming),
                ) else {
                    warn!("skipping player '{}': negative games count", name);
                    continue;
                };
                match PlayerRecord::new(
                    name,
                    positions,
                    raw.SeasonPts,
                    season_games,
                    raw.RecentPts,
                    recent_games,
                    upcoming,
                ) {
                    Ok(player) => players.push(player),
                    Err(e) => {
                        warn!("skipping invalid player row: {}", e);
                    }
                }
            }
            Err(e) => {
                warn!("skipping malformed player row: {}", e);
            }
        }
    }
    Ok(players)
}

// ---------------------------------------------------------------------------
// Public path-based loader
// ---------------------------------------------------------------------------

/// Load validated player records from a CSV file.
///
/// Malformed rows are skipped with a warning; an import that yields zero
/// valid rows is an error. Name uniqueness is the registry's concern and is
/// enforced at registration.
pub fn load_players(path: &Path) -> Result<Vec<PlayerRecord>, ImportError> {
    let file = std::fs::File::open(path).map_err(|e| ImportError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let players = load_players_from_reader(file).map_err(|e| ImportError::Csv {
        path: path.display().to_string(),
        source: e,
    })?;

    if players.is_empty() {
        return Err(ImportError::Validation(format!(
            "player CSV {} produced zero valid rows",
            path.display()
        )));
    }

    Ok(players)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
