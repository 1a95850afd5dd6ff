// Greedy scarcity-first lineup optimization.
//
// Fills the tightest-constrained position first (required slots divided by
// eligible candidates), so a looser position cannot consume the only player
// a scarce position could use. Within a position, candidates are taken in
// ranked order of predicted points.
//
// When eligibility sets overlap heavily this greedy pass is not guaranteed
// globally optimal -- an exact solve would be a weighted bipartite matching
// (assignment problem), which is a candidate upgrade. It is exact whenever
// every player is eligible at a single position.

use std::collections::{HashMap, HashSet};

use tracing::warn;

use crate::roster::player::Position;
use crate::roster::team::TeamRegistry;
use crate::valuation::predict::{predicted_points, PredictionWeights};
use crate::valuation::rank::cmp_ranked;

use super::slots::SlotConfig;

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// A player chosen for a lineup slot, with the prediction that ranked them.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignedPlayer {
    pub name: String,
    pub predicted_points: f64,
}

/// A single slot in the optimized lineup. `index` is 1-based within the
/// position (C1, C2, ...). An unfillable slot carries no player.
#[derive(Debug, Clone)]
pub struct LineupSlot {
    pub position: Position,
    pub index: usize,
    pub player: Option<AssignedPlayer>,
}

/// Slots at one position that could not be filled from the eligible pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shortfall {
    pub position: Position,
    pub unfilled: usize,
}

/// The optimizer's result: a transient value recomputed from a registry
/// snapshot, never mutating it.
///
/// A lineup with shortfalls is partial but still usable; the aggregate
/// covers filled slots only.
#[derive(Debug, Clone)]
pub struct OptimizedLineup {
    /// Every slot of the configuration, in deterministic display order.
    pub slots: Vec<LineupSlot>,
    /// Sum of predicted points over filled slots.
    pub total_predicted_points: f64,
    /// Positions left short of their required count, if any.
    pub shortfalls: Vec<Shortfall>,
}

impl OptimizedLineup {
    /// Number of slots that received a player.
    pub fn filled_count(&self) -> usize {
        self.slots.iter().filter(|s| s.player.is_some()).count()
    }

    /// Whether every required slot was filled.
    pub fn is_complete(&self) -> bool {
        self.shortfalls.is_empty()
    }

    /// Names of all assigned players, in slot order.
    pub fn assigned_names(&self) -> Vec<&str> {
        self.slots
            .iter()
            .filter_map(|s| s.player.as_ref().map(|p| p.name.as_str()))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Optimization
// ---------------------------------------------------------------------------

/// Choose, for each slot in the configuration, a distinct eligible player,
/// maximizing total predicted points under the scarcity-first greedy rule.
///
/// Takes immutable snapshots of the registry and slot configuration and
/// returns a fresh result; inputs are never modified. Slots that cannot be
/// filled are reported as shortfalls rather than dropped.
pub fn optimize_lineup(
    team: &TeamRegistry,
    slots: &SlotConfig,
    weights: &PredictionWeights,
) -> OptimizedLineup {
    // Predictions are pure, so this cache is a per-run performance
    // optimization only.
    let predictions: HashMap<&str, f64> = team
        .players()
        .iter()
        .map(|p| (p.name.as_str(), predicted_points(p, weights)))
        .collect();

    // Process positions tightest-constrained first. Scarcity is computed
    // once, from the pre-assignment pool. A position with no eligible
    // players is maximally scarce; it resolves immediately to a shortfall.
    let mut order: Vec<(Position, usize, f64)> = slots
        .requirements()
        .iter()
        .filter(|r| r.count > 0)
        .map(|r| {
            let eligible = team.players_by_position(r.position).len();
            let scarcity = if eligible == 0 {
                f64::INFINITY
            } else {
                r.count as f64 / eligible as f64
            };
            (r.position, r.count, scarcity)
        })
        .collect();
    order.sort_by(|a, b| {
        b.2.partial_cmp(&a.2)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.sort_order().cmp(&b.0.sort_order()))
    });

    // Greedy assignment: best remaining candidates per position, no player
    // in more than one slot.
    let mut taken: HashSet<&str> = HashSet::new();
    let mut chosen: HashMap<Position, Vec<AssignedPlayer>> = HashMap::new();

    for (position, count, _scarcity) in order {
        let mut candidates: Vec<_> = team
            .players_by_position(position)
            .into_iter()
            .filter(|p| !taken.contains(p.name.as_str()))
            .collect();
        candidates.sort_by(|a, b| {
            cmp_ranked(
                predictions[a.name.as_str()],
                a,
                predictions[b.name.as_str()],
                b,
            )
        });

        let assigned = chosen.entry(position).or_default();
        for player in candidates.into_iter().take(count) {
            taken.insert(player.name.as_str());
            assigned.push(AssignedPlayer {
                name: player.name.clone(),
                predicted_points: predictions[player.name.as_str()],
            });
        }
    }

    // Assemble the result in display order and report any shortfalls.
    let mut out_slots = Vec::with_capacity(slots.total_slots());
    let mut shortfalls = Vec::new();
    let mut total = 0.0;

    for req in slots.requirements() {
        let assigned = chosen.remove(&req.position).unwrap_or_default();
        let filled = assigned.len();

        for (i, player) in assigned.into_iter().enumerate() {
            total += player.predicted_points;
            out_slots.push(LineupSlot {
                position: req.position,
                index: i + 1,
                player: Some(player),
            });
        }
        for i in filled..req.count {
            out_slots.push(LineupSlot {
                position: req.position,
                index: i + 1,
                player: None,
            });
        }

        if filled < req.count {
            let unfilled = req.count - filled;
            warn!(
                "insufficient candidates at {}: {} of {} slots unfilled",
                req.position, unfilled, req.count
            );
            shortfalls.push(Shortfall {
                position: req.position,
                unfilled,
            });
        }
    }

    OptimizedLineup {
        slots: out_slots,
        total_predicted_points: total,
        shortfalls,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
