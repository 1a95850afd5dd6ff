// Deterministic ranking sequences over player records.

use std::cmp::Ordering;

use crate::roster::player::{PlayerRecord, Scope};
use crate::valuation::predict::{predicted_points, PredictionWeights};

// ---------------------------------------------------------------------------
// Rank keys
// ---------------------------------------------------------------------------

/// Which derived quantity a ranking orders by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankKey {
    /// Predicted points over the upcoming window.
    PredictedPoints,
    /// Season-to-date points per game. Players with no season games rank
    /// at a rate of zero rather than erroring out of the sequence.
    SeasonPointsPerGame,
    /// Recent-vs-season trend delta (hot/cold).
    TrendDelta,
}

/// The key value for one player. Undefined divisions are absorbed as 0.0 so
/// the ordering is total over any input.
fn key_value(player: &PlayerRecord, key: RankKey, weights: &PredictionWeights) -> f64 {
    match key {
        RankKey::PredictedPoints => predicted_points(player, weights),
        RankKey::SeasonPointsPerGame => player.points_per_game(Scope::Season).unwrap_or(0.0),
        RankKey::TrendDelta => player.trend_delta(),
    }
}

/// Descending comparison with the standard tie-break: key value descending,
/// then season-to-date points descending, then name ascending. Shared with
/// the lineup optimizer so both produce the same order.
pub fn cmp_ranked(a_value: f64, a: &PlayerRecord, b_value: f64, b: &PlayerRecord) -> Ordering {
    b_value
        .partial_cmp(&a_value)
        .unwrap_or(Ordering::Equal)
        .then_with(|| {
            b.season_points
                .partial_cmp(&a.season_points)
                .unwrap_or(Ordering::Equal)
        })
        .then_with(|| a.name.cmp(&b.name))
}

// ---------------------------------------------------------------------------
// Ranking result
// ---------------------------------------------------------------------------

/// One entry in a ranking: the player plus the key value they ranked on.
#[derive(Debug, Clone, Copy)]
pub struct RankedPlayer<'a> {
    pub player: &'a PlayerRecord,
    pub value: f64,
}

/// A ranked, finite, restartable view over a set of players.
///
/// The order is fixed at construction; `iter()` can be called any number of
/// times and always replays the same sequence.
#[derive(Debug, Clone)]
pub struct Ranking<'a> {
    key: RankKey,
    entries: Vec<RankedPlayer<'a>>,
}

impl<'a> Ranking<'a> {
    /// The key this ranking was built with.
    pub fn key(&self) -> RankKey {
        self.key
    }

    /// Iterate the ranking from the top. Restartable.
    pub fn iter(&self) -> std::slice::Iter<'_, RankedPlayer<'a>> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a, 'b> IntoIterator for &'b Ranking<'a> {
    type Item = &'b RankedPlayer<'a>;
    type IntoIter = std::slice::Iter<'b, RankedPlayer<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Rank players descending by the chosen key.
///
/// The ordering is total and deterministic: ties break by season points
/// descending, then name ascending, so running `rank` twice on unchanged
/// input yields identical sequences.
pub fn rank<'a, I>(players: I, key: RankKey, weights: &PredictionWeights) -> Ranking<'a>
where
    I: IntoIterator<Item = &'a PlayerRecord>,
{
    let mut entries: Vec<RankedPlayer<'a>> = players
        .into_iter()
        .map(|player| RankedPlayer {
            player,
            value: key_value(player, key, weights),
        })
        .collect();

    entries.sort_by(|a, b| cmp_ranked(a.value, a.player, b.value, b.player));

    Ranking { key, entries }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::player::Position;

    fn player(
        name: &str,
        season_points: f64,
        season_games: u32,
        recent_points: f64,
        recent_games: u32,
        upcoming: u32,
    ) -> PlayerRecord {
        PlayerRecord::new(
            name,
            vec![Position::Center],
            season_points,
            season_games,
            recent_points,
            recent_games,
            upcoming,
        )
        .unwrap()
    }

    fn names(ranking: &Ranking) -> Vec<String> {
        ranking.iter().map(|e| e.player.name.clone()).collect()
    }

    #[test]
    fn orders_descending_by_predicted_points() {
        let players = vec![
            player("Low", 10.0, 10, 1.0, 1, 4),  // 4 * 1.0 = 4
            player("High", 30.0, 10, 3.0, 1, 4), // 4 * 3.0 = 12
            player("Mid", 20.0, 10, 2.0, 1, 4),  // 4 * 2.0 = 8
        ];
        let w = PredictionWeights { recent_weight: 0.6 };
        let ranking = rank(&players, RankKey::PredictedPoints, &w);
        assert_eq!(names(&ranking), vec!["High", "Mid", "Low"]);
        assert_eq!(ranking.key(), RankKey::PredictedPoints);
    }

    #[test]
    fn ties_break_by_season_points_then_name() {
        // All three predict identically (same rates, same schedule), but
        // season totals and names differ.
        let players = vec![
            player("Zed", 20.0, 10, 4.0, 2, 3),
            player("Abe", 20.0, 10, 4.0, 2, 3),
            player("More", 40.0, 20, 4.0, 2, 3),
        ];
        let w = PredictionWeights::default();
        let ranking = rank(&players, RankKey::PredictedPoints, &w);
        // "More" wins on season points; "Abe" beats "Zed" alphabetically.
        assert_eq!(names(&ranking), vec!["More", "Abe", "Zed"]);
    }

    #[test]
    fn rank_is_idempotent() {
        let players = vec![
            player("B", 20.0, 10, 4.0, 2, 3),
            player("A", 20.0, 10, 4.0, 2, 3),
            player("C", 35.0, 14, 1.0, 2, 2),
        ];
        let w = PredictionWeights::default();
        let first = rank(&players, RankKey::TrendDelta, &w);
        let second = rank(&players, RankKey::TrendDelta, &w);
        assert_eq!(names(&first), names(&second));
    }

    #[test]
    fn ranking_iterator_is_restartable() {
        let players = vec![
            player("One", 10.0, 5, 2.0, 1, 2),
            player("Two", 20.0, 5, 2.0, 1, 2),
        ];
        let w = PredictionWeights::default();
        let ranking = rank(&players, RankKey::SeasonPointsPerGame, &w);
        let first_pass: Vec<_> = ranking.iter().map(|e| e.player.name.clone()).collect();
        let second_pass: Vec<_> = ranking.iter().map(|e| e.player.name.clone()).collect();
        assert_eq!(first_pass, second_pass);
        assert_eq!(ranking.len(), 2);
    }

    #[test]
    fn season_ppg_key_treats_zero_games_as_zero() {
        let players = vec![
            player("Veteran", 10.0, 10, 0.0, 0, 2), // 1.0 PPG
            player("Rookie", 0.0, 0, 0.0, 0, 2),    // no games: ranks at 0.0
        ];
        let w = PredictionWeights::default();
        let ranking = rank(&players, RankKey::SeasonPointsPerGame, &w);
        assert_eq!(names(&ranking), vec!["Veteran", "Rookie"]);
        assert_eq!(ranking.iter().last().unwrap().value, 0.0);
    }

    #[test]
    fn trend_delta_key_ranks_hot_players_first() {
        let players = vec![
            // Season 2.0, recent 1.0: cooling off.
            player("Cold", 20.0, 10, 2.0, 2, 3),
            // Season 1.0, recent 3.0: heating up.
            player("Hot", 10.0, 10, 6.0, 2, 3),
        ];
        let w = PredictionWeights::default();
        let ranking = rank(&players, RankKey::TrendDelta, &w);
        assert_eq!(names(&ranking), vec!["Hot", "Cold"]);
    }

    #[test]
    fn empty_input_gives_empty_ranking() {
        let players: Vec<PlayerRecord> = Vec::new();
        let w = PredictionWeights::default();
        let ranking = rank(&players, RankKey::PredictedPoints, &w);
        assert!(ranking.is_empty());
        assert_eq!(ranking.iter().count(), 0);
    }
}
