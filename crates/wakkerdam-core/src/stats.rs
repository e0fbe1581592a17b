//! Statistics over the surviving worlds.
//!
//! Every figure is an exact [`Decimal`] ratio. An empty ensemble yields
//! neutral results (empty maps, zero, no winner) instead of failing.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use wakkerdam_types::{PlayerId, Role, Team};
use wakkerdam_world::World;

use crate::ensemble::WorldSet;

/// Role distribution for one player.
pub type RoleDistribution = BTreeMap<Role, Decimal>;

/// `part / whole` as a decimal, zero when `whole` is zero.
fn ratio(part: usize, whole: usize) -> Decimal {
    Decimal::from(part)
        .checked_div(Decimal::from(whole))
        .unwrap_or(Decimal::ZERO)
}

/// Turn raw role counts into shares of `total`.
fn normalize(counts: BTreeMap<Role, usize>, total: usize) -> RoleDistribution {
    counts
        .into_iter()
        .map(|(role, count)| (role, ratio(count, total)))
        .collect()
}

impl WorldSet {
    /// Role distribution of `player` over the worlds where they are alive.
    ///
    /// Returns an empty map when the player is dead in every surviving world.
    pub fn role_percentages_of_player(&self, player: PlayerId) -> RoleDistribution {
        let mut counts: BTreeMap<Role, usize> = BTreeMap::new();
        let mut alive_in = 0_usize;
        for world in self.worlds.iter().filter(|world| world.is_alive(player)) {
            if let Some(role) = world.role_of(player) {
                let count = counts.entry(role).or_default();
                *count = count.saturating_add(1);
                alive_in = alive_in.saturating_add(1);
            }
        }
        normalize(counts, alive_in)
    }

    /// Role distribution of every player, in seating order.
    pub fn role_percentages_of_all_players(&self) -> Vec<RoleDistribution> {
        let players = self.roster().len();
        let mut counts: Vec<BTreeMap<Role, usize>> = vec![BTreeMap::new(); players];
        let mut alive_in: Vec<usize> = vec![0; players];

        for world in &self.worlds {
            for player in world.living_players() {
                let (Some(role), Some(tally), Some(alive)) = (
                    world.role_of(player),
                    counts.get_mut(player.index()),
                    alive_in.get_mut(player.index()),
                ) else {
                    continue;
                };
                let count = tally.entry(role).or_default();
                *count = count.saturating_add(1);
                *alive = alive.saturating_add(1);
            }
        }

        counts
            .into_iter()
            .zip(alive_in)
            .map(|(tally, alive)| normalize(tally, alive))
            .collect()
    }

    /// Fraction of all surviving worlds in which `player` is dead.
    pub fn death_percentage_of_player(&self, player: PlayerId) -> Decimal {
        let dead = self
            .worlds
            .iter()
            .filter(|world| !world.is_alive(player))
            .count();
        ratio(dead, self.worlds.len())
    }

    /// Death fraction of every player, in seating order.
    pub fn death_percentage_of_all_players(&self) -> Vec<Decimal> {
        let players = self.roster().len();
        let mut dead: Vec<usize> = vec![0; players];
        for world in &self.worlds {
            for (position, count) in dead.iter_mut().enumerate() {
                let is_dead = PlayerId::from_position(position)
                    .is_some_and(|player| !world.is_alive(player));
                if is_dead {
                    *count = count.saturating_add(1);
                }
            }
        }
        dead.into_iter()
            .map(|count| ratio(count, self.worlds.len()))
            .collect()
    }

    /// The winning team, if every surviving world agrees on the same one.
    pub fn winning_team(&self) -> Option<Team> {
        let mut winners = self.worlds.iter().map(World::local_winner);
        let first = winners.next()??;
        winners
            .all(|winner| winner == Some(first))
            .then_some(first)
    }

    /// Whether `role` has non-zero probability for `player`.
    pub fn could_hold(&self, player: PlayerId, role: Role) -> bool {
        self.worlds
            .iter()
            .any(|world| world.is_alive(player) && world.role_of(player) == Some(role))
    }
}
