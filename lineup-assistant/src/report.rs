// Report formatting for rankings, trend display, and the optimized lineup.
//
// Formatters are pure and return strings; printing is the binary's job.

use crate::lineup::optimizer::OptimizedLineup;
use crate::roster::player::{PlayerRecord, Scope};
use crate::valuation::rank::Ranking;

/// Band within which a trend delta reads as steady rather than hot or cold,
/// in points per game.
const STEADY_BAND: f64 = 0.25;

/// Hot/cold/steady label for a trend delta.
pub fn trend_marker(delta: f64) -> &'static str {
    if delta > STEADY_BAND {
        "hot"
    } else if delta < -STEADY_BAND {
        "cold"
    } else {
        "steady"
    }
}

/// One-line stat summary for a player. Scopes with no games show 0.00.
pub fn format_player_line(player: &PlayerRecord) -> String {
    let positions: Vec<&str> = player.positions.iter().map(|p| p.display_str()).collect();
    let season = player.points_per_game(Scope::Season).unwrap_or(0.0);
    let recent = player.points_per_game(Scope::Recent).unwrap_or(0.0);
    format!(
        "{:<24} {:<8} season {:>5.2} ppg  recent {:>5.2} ppg  {}",
        player.name,
        positions.join("/"),
        season,
        recent,
        trend_marker(player.trend_delta()),
    )
}

/// Numbered ranking table under a title line.
pub fn format_rankings(title: &str, ranking: &Ranking) -> String {
    let mut out = String::new();
    out.push_str(title);
    out.push('\n');
    for (i, entry) in ranking.iter().enumerate() {
        out.push_str(&format!(
            "{:>3}. {:<24} {:>7.2}\n",
            i + 1,
            entry.player.name,
            entry.value
        ));
    }
    out
}

/// The optimized lineup, slot by slot, with shortfall annotations and the
/// aggregate prediction.
pub fn format_lineup(lineup: &OptimizedLineup) -> String {
    let mut out = String::new();
    out.push_str("Starting lineup\n");
    for slot in &lineup.slots {
        let label = format!("{}{}", slot.position, slot.index);
        match &slot.player {
            Some(player) => out.push_str(&format!(
                "  {:<4} {:<24} {:>7.2}\n",
                label, player.name, player.predicted_points
            )),
            None => out.push_str(&format!("  {:<4} (unfilled)\n", label)),
        }
    }
    for shortfall in &lineup.shortfalls {
        out.push_str(&format!(
            "  warning: {} slot(s) at {} left unfilled, not enough eligible players\n",
            shortfall.unfilled, shortfall.position
        ));
    }
    out.push_str(&format!(
        "Projected points: {:.2}\n",
        lineup.total_predicted_points
    ));
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
