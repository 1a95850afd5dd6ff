// Predicted points from a weighted blend of season and recent scoring rates.
//
// Recent form carries more weight than the season-long baseline, while the
// season average damps small-sample noise from the recent window. The blend
// weight comes from config rather than a constant: the recalculation schema
// is expected to keep evolving.

use serde::Deserialize;

use crate::roster::player::{PlayerRecord, Scope};
use crate::roster::team::TeamRegistry;

// ---------------------------------------------------------------------------
// Tunable weights
// ---------------------------------------------------------------------------

/// Tunable parameters of the prediction blend, loaded from `[prediction]`
/// in league.toml.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PredictionWeights {
    /// Fraction of the blend assigned to recent-window points per game,
    /// in [0, 1]. The remainder goes to the season-to-date rate.
    pub recent_weight: f64,
}

impl Default for PredictionWeights {
    fn default() -> Self {
        PredictionWeights { recent_weight: 0.6 }
    }
}

// ---------------------------------------------------------------------------
// Prediction
// ---------------------------------------------------------------------------

/// Predicted fantasy points over a player's upcoming scheduled games.
///
/// `upcoming_games * (w * recent_ppg + (1 - w) * season_ppg)` where
/// `w = weights.recent_weight`. A scope with zero games played contributes
/// nothing and the weights renormalize onto the remaining scope; when
/// neither scope has games the rate is zero. The undefined-division error
/// from `points_per_game` is fully absorbed here and never reaches ranking
/// or lineup optimization.
pub fn predicted_points(player: &PlayerRecord, weights: &PredictionWeights) -> f64 {
    let season = player.points_per_game(Scope::Season).ok();
    let recent = player.points_per_game(Scope::Recent).ok();

    let rate = match (recent, season) {
        (Some(recent), Some(season)) => {
            weights.recent_weight * recent + (1.0 - weights.recent_weight) * season
        }
        (Some(recent), None) => recent,
        (None, Some(season)) => season,
        (None, None) => 0.0,
    };

    player.upcoming_games as f64 * rate
}

/// Total predicted points across every player on the team.
///
/// A whole-roster number for week-over-week comparison; the optimizer's
/// lineup total covers just the starters.
pub fn predicted_team_points(team: &TeamRegistry, weights: &PredictionWeights) -> f64 {
    team.players()
        .iter()
        .map(|p| predicted_points(p, weights))
        .sum()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
