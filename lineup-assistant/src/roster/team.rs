// Team registry: the full collection of player records for one fantasy team.
//
// There is no process-wide "current team" -- a registry is an explicit value
// passed into every operation that needs one. Query operations are read-only;
// add/remove are administrative and never run as part of an optimization.

use rand::Rng;
use thiserror::Error;

use super::player::{PlayerRecord, Position};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RosterError {
    #[error("player not found: {name}")]
    PlayerNotFound { name: String },

    #[error("duplicate player: `{name}` is already on the roster")]
    DuplicatePlayer { name: String },

    #[error("operation requires at least one player on the roster")]
    EmptyRoster,
}

// ---------------------------------------------------------------------------
// Team registry
// ---------------------------------------------------------------------------

/// A named collection of player records, keyed by player name.
///
/// Players are kept in insertion order; name uniqueness is enforced at
/// insertion time. Rosters are small (tens of players), so lookups scan.
#[derive(Debug, Clone)]
pub struct TeamRegistry {
    name: String,
    players: Vec<PlayerRecord>,
}

impl TeamRegistry {
    /// Create an empty registry for the given team name.
    pub fn new(name: impl Into<String>) -> Self {
        TeamRegistry {
            name: name.into(),
            players: Vec::new(),
        }
    }

    /// Build a registry from an imported sequence of records.
    ///
    /// Duplicate names surface immediately as `DuplicatePlayer`; a partial
    /// registry is never returned.
    pub fn from_records(
        name: impl Into<String>,
        records: Vec<PlayerRecord>,
    ) -> Result<Self, RosterError> {
        let mut registry = TeamRegistry::new(name);
        for record in records {
            registry.add_player(record)?;
        }
        Ok(registry)
    }

    /// The team name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All players, in insertion order.
    pub fn players(&self) -> &[PlayerRecord] {
        &self.players
    }

    /// Number of players on the team.
    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Add a player. Fails with `DuplicatePlayer` if the name is taken.
    pub fn add_player(&mut self, player: PlayerRecord) -> Result<(), RosterError> {
        if self.players.iter().any(|p| p.name == player.name) {
            return Err(RosterError::DuplicatePlayer { name: player.name });
        }
        self.players.push(player);
        Ok(())
    }

    /// Remove a player by name, returning the removed record.
    pub fn remove_player(&mut self, name: &str) -> Result<PlayerRecord, RosterError> {
        match self.players.iter().position(|p| p.name == name) {
            Some(idx) => Ok(self.players.remove(idx)),
            None => Err(RosterError::PlayerNotFound { name: name.into() }),
        }
    }

    /// Look up a player by name.
    pub fn get_player(&self, name: &str) -> Result<&PlayerRecord, RosterError> {
        self.players
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| RosterError::PlayerNotFound { name: name.into() })
    }

    /// All players eligible for the given position, in insertion order.
    /// A multi-position player appears in the result for every matching tag.
    pub fn players_by_position(&self, position: Position) -> Vec<&PlayerRecord> {
        self.players
            .iter()
            .filter(|p| p.is_eligible(position))
            .collect()
    }

    /// Uniform random selection over all players.
    ///
    /// Takes the RNG explicitly so callers (and tests) control seeding;
    /// there is no hidden entropy source.
    pub fn random_player<R: Rng>(&self, rng: &mut R) -> Result<&PlayerRecord, RosterError> {
        if self.players.is_empty() {
            return Err(RosterError::EmptyRoster);
        }
        let idx = rng.gen_range(0..self.players.len());
        Ok(&self.players[idx])
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn player(name: &str, positions: Vec<Position>) -> PlayerRecord {
        PlayerRecord::new(name, positions, 20.0, 10, 6.0, 3, 4).unwrap()
    }

    fn three_player_team() -> TeamRegistry {
        TeamRegistry::from_records(
            "Test Team",
            vec![
                player("Alpha", vec![Position::Center]),
                player("Bravo", vec![Position::Center, Position::LeftWing]),
                player("Charlie", vec![Position::Goalie]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn from_records_preserves_insertion_order() {
        let team = three_player_team();
        let names: Vec<_> = team.players().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Bravo", "Charlie"]);
        assert_eq!(team.name(), "Test Team");
        assert_eq!(team.len(), 3);
    }

    #[test]
    fn from_records_rejects_duplicates() {
        let err = TeamRegistry::from_records(
            "Dupes",
            vec![
                player("Alpha", vec![Position::Center]),
                player("Alpha", vec![Position::Goalie]),
            ],
        )
        .unwrap_err();
        assert_eq!(
            err,
            RosterError::DuplicatePlayer {
                name: "Alpha".into()
            }
        );
    }

    #[test]
    fn add_player_rejects_duplicate_name() {
        let mut team = three_player_team();
        let err = team
            .add_player(player("Bravo", vec![Position::Defense]))
            .unwrap_err();
        assert_eq!(
            err,
            RosterError::DuplicatePlayer {
                name: "Bravo".into()
            }
        );
        assert_eq!(team.len(), 3);
    }

    #[test]
    fn get_player_found_and_missing() {
        let team = three_player_team();
        assert_eq!(team.get_player("Bravo").unwrap().name, "Bravo");
        assert_eq!(
            team.get_player("Delta").unwrap_err(),
            RosterError::PlayerNotFound {
                name: "Delta".into()
            }
        );
    }

    #[test]
    fn remove_player_returns_record() {
        let mut team = three_player_team();
        let removed = team.remove_player("Alpha").unwrap();
        assert_eq!(removed.name, "Alpha");
        assert_eq!(team.len(), 2);
        assert_eq!(
            team.remove_player("Alpha").unwrap_err(),
            RosterError::PlayerNotFound {
                name: "Alpha".into()
            }
        );
    }

    #[test]
    fn players_by_position_includes_multi_eligible() {
        let team = three_player_team();
        let centers: Vec<_> = team
            .players_by_position(Position::Center)
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(centers, vec!["Alpha", "Bravo"]);

        let wings: Vec<_> = team
            .players_by_position(Position::LeftWing)
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(wings, vec!["Bravo"]);

        assert!(team.players_by_position(Position::RightWing).is_empty());
    }

    #[test]
    fn random_player_is_deterministic_with_fixed_seed() {
        let team = three_player_team();
        let mut rng_a = ChaCha8Rng::seed_from_u64(42);
        let mut rng_b = ChaCha8Rng::seed_from_u64(42);
        let first = team.random_player(&mut rng_a).unwrap().name.clone();
        let second = team.random_player(&mut rng_b).unwrap().name.clone();
        assert_eq!(first, second);
    }

    #[test]
    fn random_player_covers_all_players_eventually() {
        let team = three_player_team();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..100 {
            seen.insert(team.random_player(&mut rng).unwrap().name.clone());
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn random_player_empty_roster() {
        let team = TeamRegistry::new("Empty");
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(
            team.random_player(&mut rng).unwrap_err(),
            RosterError::EmptyRoster
        );
    }
}
