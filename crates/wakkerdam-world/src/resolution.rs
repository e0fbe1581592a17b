//! Night resolution: turning the buffered night records into deaths.
//!
//! The order is fixed and matters:
//! 1. Living, uncursed hamsters become guarded hamsters.
//! 2. Every hamster that was seen tonight dies, cursed or not, along with
//!    every player turned into a hamster tonight.
//! 3. The first wolf in priority order that is alive and targeted a living,
//!    edible player is the acting wolf. Unless it is positively blessed, its
//!    victim dies when unguarded, and every guest sleeping at the victim's
//!    house dies with them.
//! 4. Hunters' recorded shots fire, chaining through hunters they hit.
//! 5. Everyone marked dies once.
//! 6. The night records are cleared; bless/curse counters remain.

use std::collections::BTreeSet;

use rand::Rng;
use tracing::trace;
use wakkerdam_types::{Action, PlayerId, Role, capabilities};

use crate::rules::ResolutionRules;
use crate::world::World;

impl World {
    /// Resolve everything recorded tonight.
    pub(crate) fn finish_night<R: Rng + ?Sized>(&mut self, rules: ResolutionRules, rng: &mut R) {
        self.trigger_hamsters();
        self.kill_seen_hamsters();
        self.resolve_wolf_attack();
        self.resolve_mutual_kills(rules);

        let deaths: Vec<PlayerId> = self.night.died_tonight.iter().copied().collect();
        trace!(world = %self.id, deaths = deaths.len(), "night resolved");
        for player in deaths {
            if self.is_alive(player) {
                self.kill(player, rng);
            }
        }

        self.night.reset(rules.bless_decays_each_night);
    }

    fn trigger_hamsters(&mut self) {
        let hamsters: Vec<PlayerId> = self
            .living_players()
            .filter(|player| self.role_of(*player) == Some(Role::Hamster))
            .filter(|player| !self.night.is_cursed(*player))
            .collect();
        for hamster in hamsters {
            self.night.make_hamster(hamster);
        }
    }

    fn kill_seen_hamsters(&mut self) {
        let seen: Vec<PlayerId> = self
            .night
            .seen
            .iter()
            .copied()
            .filter(|player| {
                self.night.hamsters.contains(player)
                    || self.role_of(*player) == Some(Role::Hamster)
            })
            .collect();
        self.night.died_tonight.extend(seen);
    }

    /// The wolf that gets to eat tonight and its victim.
    pub(crate) fn acting_wolf(&self) -> Option<(PlayerId, PlayerId)> {
        self.wolf_order.iter().find_map(|wolf| {
            if !self.is_alive(*wolf) {
                return None;
            }
            let victim = self.night.wolf_targets.get(wolf).copied()?;
            let edible = self
                .role_of(victim)
                .is_some_and(capabilities::can_be_eaten);
            (self.is_alive(victim) && edible).then_some((*wolf, victim))
        })
    }

    fn resolve_wolf_attack(&mut self) {
        let Some((wolf, victim)) = self.acting_wolf() else {
            return;
        };
        if self.night.blessing_of(wolf) > 0 {
            return;
        }

        if !self.night.is_guarded(victim) {
            self.night.died_tonight.insert(victim);
        }
        let guests: Vec<PlayerId> = self
            .night
            .sleeps_at
            .iter()
            .filter(|(_, host)| **host == victim)
            .map(|(guest, _)| *guest)
            .collect();
        self.night.died_tonight.extend(guests);
    }

    fn resolve_mutual_kills(&mut self, rules: ResolutionRules) {
        let hunters: Vec<PlayerId> = self.night.mutual_kills.keys().copied().collect();
        let mut fired = BTreeSet::new();
        for hunter in hunters {
            if rules.mutual_kill_requires_death && !self.night.died_tonight.contains(&hunter) {
                continue;
            }
            self.fire_chain(hunter, &mut fired);
        }
    }

    /// Follow a chain of hunters shooting hunters. Each hunter fires once.
    fn fire_chain(&mut self, hunter: PlayerId, fired: &mut BTreeSet<PlayerId>) {
        let mut current = hunter;
        while fired.insert(current) {
            let can_shoot = self
                .role_of(current)
                .is_some_and(|role| capabilities::can_perform(role, Action::Shoot));
            if !can_shoot {
                break;
            }
            let Some(target) = self.night.mutual_kills.get(&current).copied() else {
                break;
            };
            self.night.died_tonight.insert(target);
            current = target;
        }
    }
}
