// Team builder entry point.
//
// Startup sequence:
// 1. Initialize tracing
// 2. Load config (copying defaults on first run)
// 3. Import the player CSV and build the team registry
// 4. Rank players by predicted points and by trend
// 5. Optimize the starting lineup
// 6. Print the report

use std::path::Path;

use anyhow::Context;
use tracing::info;

use lineup_assistant::config;
use lineup_assistant::import;
use lineup_assistant::lineup::optimizer::optimize_lineup;
use lineup_assistant::lineup::slots::SlotConfig;
use lineup_assistant::report;
use lineup_assistant::roster::team::TeamRegistry;
use lineup_assistant::valuation::predict::predicted_team_points;
use lineup_assistant::valuation::rank::{rank, RankKey};

fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: team={}, {} lineup positions",
        config.team.name,
        config.lineup.len()
    );

    let records = import::load_players(Path::new(&config.team.roster_file))
        .with_context(|| format!("failed to import players from {}", config.team.roster_file))?;
    info!("Imported {} players", records.len());

    let team = TeamRegistry::from_records(&config.team.name, records)
        .context("failed to build team registry")?;

    let slots = SlotConfig::from_counts(&config.lineup);
    let weights = config.prediction;

    let by_predicted = rank(team.players(), RankKey::PredictedPoints, &weights);
    println!(
        "{}",
        report::format_rankings("Projected points (upcoming window)", &by_predicted)
    );

    let by_trend = rank(team.players(), RankKey::TrendDelta, &weights);
    println!("{}", report::format_rankings("Trend (recent vs season PPG)", &by_trend));

    let lineup = optimize_lineup(&team, &slots, &weights);
    println!("{}", report::format_lineup(&lineup));

    info!(
        "Lineup optimized: {}/{} slots filled, {:.2} projected points \
         ({:.2} across the full roster)",
        lineup.filled_count(),
        slots.total_slots(),
        lineup.total_predicted_points,
        predicted_team_points(&team, &weights)
    );

    Ok(())
}

/// Initialize tracing to stderr so reports on stdout stay clean.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("lineup_assistant=info,warn")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
