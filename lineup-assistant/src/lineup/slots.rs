// Starting-lineup slot configuration.

use std::collections::HashMap;

use tracing::warn;

use crate::roster::player::Position;

/// Required starter count for one position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotRequirement {
    pub position: Position,
    pub count: usize,
}

/// The shape of the starting lineup: how many slots each position gets.
///
/// Built from the `[lineup]` config table, e.g.
/// `{"C": 2, "LW": 2, "RW": 2, "D": 4, "G": 2}`. Requirements are held in
/// deterministic order based on `Position::sort_order()`.
#[derive(Debug, Clone)]
pub struct SlotConfig {
    requirements: Vec<SlotRequirement>,
}

impl SlotConfig {
    /// Build a slot configuration from a config mapping of position tags to
    /// slot counts. Unknown tags are skipped with a warning (config
    /// validation rejects them earlier in the normal flow); zero-count
    /// entries are kept so the lineup shape is explicit.
    pub fn from_counts(counts: &HashMap<String, usize>) -> Self {
        let mut requirements: Vec<SlotRequirement> = Vec::new();

        for (tag, &count) in counts {
            match Position::from_str_pos(tag) {
                Some(position) => requirements.push(SlotRequirement { position, count }),
                None => warn!("skipping unknown lineup position tag '{}'", tag),
            }
        }

        requirements.sort_by_key(|r| r.position.sort_order());

        SlotConfig { requirements }
    }

    /// The per-position requirements, in deterministic display order.
    pub fn requirements(&self) -> &[SlotRequirement] {
        &self.requirements
    }

    /// Required slot count for the given position (zero if absent).
    pub fn count_for(&self, position: Position) -> usize {
        self.requirements
            .iter()
            .find(|r| r.position == position)
            .map_or(0, |r| r.count)
    }

    /// Total starting roster size.
    pub fn total_slots(&self) -> usize {
        self.requirements.iter().map(|r| r.count).sum()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
