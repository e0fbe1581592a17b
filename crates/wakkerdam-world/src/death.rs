//! Death and its consequences inside one world.
//!
//! Shared by lynching, quantum deaths, and night resolution. When a player
//! dies:
//! - they leave the living set (there is no resurrection),
//! - a dying seer or legacy seer hands their sight to one random living
//!   apprentice seer,
//! - every wild child who picked them as role model turns werewolf and joins
//!   the back of the pack.

use rand::Rng;
use rand::seq::IndexedRandom;
use wakkerdam_types::{PlayerId, Role, capabilities};

use crate::world::World;

impl World {
    /// Kill `player` and run the death cascade.
    pub(crate) fn kill<R: Rng + ?Sized>(&mut self, player: PlayerId, rng: &mut R) {
        let Some(role) = self.role_of(player) else {
            return;
        };
        if let Some(slot) = self.alive.get_mut(player.index()) {
            *slot = false;
        }

        if capabilities::passes_sight_on(role) {
            self.promote_apprentice(role, rng);
        }

        let followers: Vec<PlayerId> = self
            .role_models
            .iter()
            .filter(|(_, model)| **model == player)
            .map(|(follower, _)| *follower)
            .collect();
        for follower in followers {
            self.set_role(follower, Role::Werewolf);
            self.join_pack(follower);
        }
    }

    /// Give `sight` to one random living apprentice seer, if there is one.
    fn promote_apprentice<R: Rng + ?Sized>(&mut self, sight: Role, rng: &mut R) {
        let apprentices: Vec<PlayerId> = self
            .living_players()
            .filter(|player| {
                self.role_of(*player)
                    .is_some_and(capabilities::is_seer_successor)
            })
            .collect();
        if let Some(heir) = apprentices.choose(rng) {
            self.set_role(*heir, sight);
        }
    }
}
