//! The fixed, ordered list of player names.
//!
//! A player's position in the roster is their [`PlayerId`]. The roster is
//! validated once at game setup and never changes afterwards.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use wakkerdam_types::PlayerId;

use crate::error::SetupError;

/// Ordered, distinct player names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    names: Vec<String>,
}

impl Roster {
    /// Build a roster from player names in seating order.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::EmptyRoster`] for no names,
    /// [`SetupError::DuplicatePlayer`] if a name repeats, and
    /// [`SetupError::RosterTooLarge`] if ids would overflow.
    pub fn new(names: Vec<String>) -> Result<Self, SetupError> {
        if names.is_empty() {
            return Err(SetupError::EmptyRoster);
        }
        if u32::try_from(names.len()).is_err() {
            return Err(SetupError::RosterTooLarge(names.len()));
        }
        let mut seen = BTreeSet::new();
        for name in &names {
            if !seen.insert(name.as_str()) {
                return Err(SetupError::DuplicatePlayer(name.clone()));
            }
        }
        Ok(Self { names })
    }

    /// Number of players.
    pub const fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the roster has no players. Never true for a validated roster.
    pub const fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Name of `player`.
    pub fn name(&self, player: PlayerId) -> Option<&str> {
        self.names.get(player.index()).map(String::as_str)
    }

    /// Id of the player called `name`.
    pub fn id_of(&self, name: &str) -> Option<PlayerId> {
        self.names
            .iter()
            .position(|candidate| candidate == name)
            .and_then(PlayerId::from_position)
    }

    /// All player ids in seating order.
    pub fn ids(&self) -> impl Iterator<Item = PlayerId> + '_ {
        (0..self.names.len()).filter_map(PlayerId::from_position)
    }

    /// All player names in seating order.
    pub fn names(&self) -> &[String] {
        &self.names
    }
}
