// Player record: raw per-player statistics and the derived rates built on them.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Positions
// ---------------------------------------------------------------------------

/// Hockey positions used for lineup slot assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    Center,
    LeftWing,
    RightWing,
    Defense,
    Goalie,
}

/// All concrete positions, in display order.
pub const ALL_POSITIONS: [Position; 5] = [
    Position::Center,
    Position::LeftWing,
    Position::RightWing,
    Position::Defense,
    Position::Goalie,
];

impl Position {
    /// Parse a position string into a Position enum.
    ///
    /// Handles the abbreviations used by the curated spreadsheet exports:
    /// - "C" -> Center
    /// - "LW" or "L" -> LeftWing, "RW" or "R" -> RightWing
    /// - "D" -> Defense, "G" -> Goalie
    pub fn from_str_pos(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "C" => Some(Position::Center),
            "LW" | "L" => Some(Position::LeftWing),
            "RW" | "R" => Some(Position::RightWing),
            "D" => Some(Position::Defense),
            "G" => Some(Position::Goalie),
            _ => None,
        }
    }

    /// Return the display string for this position.
    pub fn display_str(&self) -> &'static str {
        match self {
            Position::Center => "C",
            Position::LeftWing => "LW",
            Position::RightWing => "RW",
            Position::Defense => "D",
            Position::Goalie => "G",
        }
    }

    /// Deterministic ordering index for lineup slot display.
    pub fn sort_order(&self) -> u8 {
        match self {
            Position::Center => 0,
            Position::LeftWing => 1,
            Position::RightWing => 2,
            Position::Defense => 3,
            Position::Goalie => 4,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_str())
    }
}

/// Expand a position tag into all concrete positions it represents.
/// Regular tags return a single position; combo tags expand to multiple.
///
/// - "W" -> LW, RW (generic winger)
/// - "F" -> C, LW, RW (generic forward)
pub fn positions_from_tag(tag: &str) -> Vec<Position> {
    match tag.to_uppercase().as_str() {
        "W" => vec![Position::LeftWing, Position::RightWing],
        "F" => vec![Position::Center, Position::LeftWing, Position::RightWing],
        other => Position::from_str_pos(other).into_iter().collect(),
    }
}

// ---------------------------------------------------------------------------
// Stat scopes and errors
// ---------------------------------------------------------------------------

/// Which window a rate statistic is computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Season to date.
    Season,
    /// The recent window (last N games, as curated in the source data).
    Recent,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Season => write!(f, "season"),
            Scope::Recent => write!(f, "recent"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StatsError {
    #[error("points per game undefined for {scope} scope: zero games played")]
    DivisionUndefined { scope: Scope },
}

/// Construction-time validation failures for a player record.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("player record has an empty name")]
    EmptyName,

    #[error("player `{name}` has no eligible positions")]
    NoPositions { name: String },

    #[error(
        "player `{name}`: recent games played ({recent}) exceeds season games played ({season})"
    )]
    RecentExceedsSeason { name: String, recent: u32, season: u32 },
}

// ---------------------------------------------------------------------------
// Player record
// ---------------------------------------------------------------------------

/// One player's curated statistics.
///
/// Raw fields are fixed at construction; everything derived (points per game,
/// trend delta, predicted points) is computed on demand so it can never go
/// stale against the raw data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerRecord {
    /// Player name, unique within a team.
    pub name: String,
    /// Positions this player is eligible to fill. Never empty.
    pub positions: Vec<Position>,
    /// Season-to-date fantasy points.
    pub season_points: f64,
    /// Season-to-date games played.
    pub season_games: u32,
    /// Fantasy points over the recent window.
    pub recent_points: f64,
    /// Games played in the recent window. Never more than `season_games`.
    pub recent_games: u32,
    /// Games scheduled in the upcoming window.
    pub upcoming_games: u32,
}

impl PlayerRecord {
    /// Construct a validated player record.
    ///
    /// Enforces: non-empty trimmed name, at least one eligible position, and
    /// recent-window games not exceeding season games. Negative point totals
    /// are accepted (the prediction model tolerates them) but are outside the
    /// curated data's normal domain.
    pub fn new(
        name: impl Into<String>,
        positions: Vec<Position>,
        season_points: f64,
        season_games: u32,
        recent_points: f64,
        recent_games: u32,
        upcoming_games: u32,
    ) -> Result<Self, RecordError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(RecordError::EmptyName);
        }
        if positions.is_empty() {
            return Err(RecordError::NoPositions { name });
        }
        if recent_games > season_games {
            return Err(RecordError::RecentExceedsSeason {
                name,
                recent: recent_games,
                season: season_games,
            });
        }
        Ok(PlayerRecord {
            name,
            positions,
            season_points,
            season_games,
            recent_points,
            recent_games,
            upcoming_games,
        })
    }

    /// Whether this player can fill a slot at the given position.
    pub fn is_eligible(&self, position: Position) -> bool {
        self.positions.contains(&position)
    }

    /// Points per game over the given scope.
    ///
    /// Exact division; errors with `DivisionUndefined` when the scope has no
    /// games played. Callers decide the zero-games policy (the aggregator
    /// treats an undefined scope as contributing nothing).
    pub fn points_per_game(&self, scope: Scope) -> Result<f64, StatsError> {
        let (points, games) = match scope {
            Scope::Season => (self.season_points, self.season_games),
            Scope::Recent => (self.recent_points, self.recent_games),
        };
        if games == 0 {
            return Err(StatsError::DivisionUndefined { scope });
        }
        Ok(points / games as f64)
    }

    /// Recent-window points per game minus season-to-date points per game.
    ///
    /// Positive means the player is running hot relative to their baseline,
    /// negative cold. A scope with zero games played contributes 0.0 rather
    /// than surfacing the undefined division.
    pub fn trend_delta(&self) -> f64 {
        let season = self.points_per_game(Scope::Season).unwrap_or(0.0);
        let recent = self.points_per_game(Scope::Recent).unwrap_or(0.0);
        recent - season
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, positions: Vec<Position>) -> PlayerRecord {
        PlayerRecord::new(name, positions, 30.0, 20, 9.0, 5, 4).unwrap()
    }

    // -- Position parsing --

    #[test]
    fn from_str_pos_standard_positions() {
        assert_eq!(Position::from_str_pos("C"), Some(Position::Center));
        assert_eq!(Position::from_str_pos("LW"), Some(Position::LeftWing));
        assert_eq!(Position::from_str_pos("RW"), Some(Position::RightWing));
        assert_eq!(Position::from_str_pos("D"), Some(Position::Defense));
        assert_eq!(Position::from_str_pos("G"), Some(Position::Goalie));
    }

    #[test]
    fn from_str_pos_single_letter_wing_aliases() {
        assert_eq!(Position::from_str_pos("L"), Some(Position::LeftWing));
        assert_eq!(Position::from_str_pos("R"), Some(Position::RightWing));
    }

    #[test]
    fn from_str_pos_case_insensitive() {
        assert_eq!(Position::from_str_pos("lw"), Some(Position::LeftWing));
        assert_eq!(Position::from_str_pos("Rw"), Some(Position::RightWing));
        assert_eq!(Position::from_str_pos("g"), Some(Position::Goalie));
    }

    #[test]
    fn from_str_pos_invalid() {
        assert_eq!(Position::from_str_pos("XX"), None);
        assert_eq!(Position::from_str_pos(""), None);
        assert_eq!(Position::from_str_pos("W"), None);
    }

    #[test]
    fn display_str_roundtrip() {
        for pos in ALL_POSITIONS {
            let parsed = Position::from_str_pos(pos.display_str());
            assert_eq!(parsed, Some(pos), "Roundtrip failed for {}", pos);
        }
    }

    #[test]
    fn positions_from_tag_combo_tags() {
        assert_eq!(
            positions_from_tag("W"),
            vec![Position::LeftWing, Position::RightWing]
        );
        assert_eq!(
            positions_from_tag("F"),
            vec![Position::Center, Position::LeftWing, Position::RightWing]
        );
    }

    #[test]
    fn positions_from_tag_regular_tag() {
        assert_eq!(positions_from_tag("D"), vec![Position::Defense]);
        assert_eq!(positions_from_tag("c"), vec![Position::Center]);
    }

    #[test]
    fn positions_from_tag_unknown() {
        assert!(positions_from_tag("XX").is_empty());
    }

    #[test]
    fn sort_order_matches_display_order() {
        for window in ALL_POSITIONS.windows(2) {
            assert!(window[0].sort_order() < window[1].sort_order());
        }
    }

    // -- Record construction --

    #[test]
    fn new_trims_name() {
        let p = PlayerRecord::new("  Sidney Crosby  ", vec![Position::Center], 50.0, 30, 12.0, 5, 3)
            .unwrap();
        assert_eq!(p.name, "Sidney Crosby");
    }

    #[test]
    fn new_rejects_empty_name() {
        let err = PlayerRecord::new("   ", vec![Position::Center], 1.0, 1, 0.0, 0, 0).unwrap_err();
        assert_eq!(err, RecordError::EmptyName);
    }

    #[test]
    fn new_rejects_no_positions() {
        let err = PlayerRecord::new("Nobody", vec![], 1.0, 1, 0.0, 0, 0).unwrap_err();
        assert_eq!(
            err,
            RecordError::NoPositions {
                name: "Nobody".into()
            }
        );
    }

    #[test]
    fn new_rejects_recent_exceeding_season() {
        let err =
            PlayerRecord::new("Backwards", vec![Position::Goalie], 10.0, 3, 12.0, 4, 0).unwrap_err();
        assert_eq!(
            err,
            RecordError::RecentExceedsSeason {
                name: "Backwards".into(),
                recent: 4,
                season: 3,
            }
        );
    }

    // -- Points per game --

    #[test]
    fn points_per_game_exact_division() {
        let p = record("Exact", vec![Position::Center]);
        assert_eq!(p.points_per_game(Scope::Season).unwrap(), 30.0 / 20.0);
        assert_eq!(p.points_per_game(Scope::Recent).unwrap(), 9.0 / 5.0);
    }

    #[test]
    fn points_per_game_zero_games_is_undefined() {
        let p = PlayerRecord::new("Rookie", vec![Position::Defense], 0.0, 0, 0.0, 0, 2).unwrap();
        assert_eq!(
            p.points_per_game(Scope::Season),
            Err(StatsError::DivisionUndefined {
                scope: Scope::Season
            })
        );
        assert_eq!(
            p.points_per_game(Scope::Recent),
            Err(StatsError::DivisionUndefined {
                scope: Scope::Recent
            })
        );
    }

    #[test]
    fn points_per_game_negative_points_do_not_panic() {
        let p = PlayerRecord::new("Slumping", vec![Position::Defense], -4.0, 8, -2.0, 2, 1).unwrap();
        assert_eq!(p.points_per_game(Scope::Season).unwrap(), -0.5);
        assert_eq!(p.points_per_game(Scope::Recent).unwrap(), -1.0);
    }

    // -- Trend delta --

    #[test]
    fn trend_delta_hot_player_is_positive() {
        // Season 1.5 PPG, recent 1.8 PPG.
        let p = record("Hot", vec![Position::Center]);
        assert!((p.trend_delta() - (1.8 - 1.5)).abs() < 1e-12);
    }

    #[test]
    fn trend_delta_cold_player_is_negative() {
        let p =
            PlayerRecord::new("Cold", vec![Position::LeftWing], 40.0, 20, 2.0, 5, 3).unwrap();
        // Season 2.0 PPG, recent 0.4 PPG.
        assert!((p.trend_delta() - (0.4 - 2.0)).abs() < 1e-12);
    }

    #[test]
    fn trend_delta_absorbs_empty_recent_window() {
        let p = PlayerRecord::new("NoRecent", vec![Position::Goalie], 10.0, 5, 0.0, 0, 2).unwrap();
        // Recent scope contributes 0.0, so the delta is minus the season rate.
        assert!((p.trend_delta() - (0.0 - 2.0)).abs() < 1e-12);
    }

    #[test]
    fn is_eligible_multi_position() {
        let p = record("Swing", vec![Position::Center, Position::LeftWing]);
        assert!(p.is_eligible(Position::Center));
        assert!(p.is_eligible(Position::LeftWing));
        assert!(!p.is_eligible(Position::RightWing));
        assert!(!p.is_eligible(Position::Goalie));
    }
}
