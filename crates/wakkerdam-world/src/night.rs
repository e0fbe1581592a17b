//! Per-night accumulator for a single world.
//!
//! Everything recorded here is buffered until the night is finished and then
//! cleared, with one exception: the bless/curse counters persist for the
//! whole game.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use wakkerdam_types::PlayerId;

/// Night-scoped records plus the persistent bless/curse counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NightActions {
    /// Victim chosen by each werewolf.
    pub(crate) wolf_targets: BTreeMap<PlayerId, PlayerId>,
    /// Players the wolves cannot eat tonight.
    pub(crate) guarded: BTreeSet<PlayerId>,
    /// Players who are hamsters tonight.
    pub(crate) hamsters: BTreeSet<PlayerId>,
    /// Players looked at by a seer tonight.
    pub(crate) seen: BTreeSet<PlayerId>,
    /// Guest -> host: where a player spends the night.
    pub(crate) sleeps_at: BTreeMap<PlayerId, PlayerId>,
    /// Hunter -> who they take along.
    pub(crate) mutual_kills: BTreeMap<PlayerId, PlayerId>,
    /// Players who die when the night is finished.
    pub(crate) died_tonight: BTreeSet<PlayerId>,
    /// Signed bless/curse counter per player. Not cleared between nights.
    pub(crate) blessings: BTreeMap<PlayerId, i32>,
}

impl NightActions {
    /// Create an empty accumulator.
    pub const fn new() -> Self {
        Self {
            wolf_targets: BTreeMap::new(),
            guarded: BTreeSet::new(),
            hamsters: BTreeSet::new(),
            seen: BTreeSet::new(),
            sleeps_at: BTreeMap::new(),
            mutual_kills: BTreeMap::new(),
            died_tonight: BTreeSet::new(),
            blessings: BTreeMap::new(),
        }
    }

    /// Current bless/curse counter of `player` (zero if never touched).
    pub fn blessing_of(&self, player: PlayerId) -> i32 {
        self.blessings.get(&player).copied().unwrap_or(0)
    }

    /// Whether `player` is cursed, which stops their role from acting.
    pub fn is_cursed(&self, player: PlayerId) -> bool {
        self.blessing_of(player) < 0
    }

    /// Whether `player` is protected from the wolves tonight.
    pub fn is_guarded(&self, player: PlayerId) -> bool {
        self.guarded.contains(&player)
    }

    /// Players scheduled to die when the night is finished.
    pub const fn died_tonight(&self) -> &BTreeSet<PlayerId> {
        &self.died_tonight
    }

    /// Add `delta` to the persistent counter of `player`.
    pub(crate) fn adjust_blessing(&mut self, player: PlayerId, delta: i32) {
        let counter = self.blessings.entry(player).or_insert(0);
        *counter = counter.saturating_add(delta);
    }

    /// Turn `player` into a hamster for the night. Hamsters cannot be eaten.
    pub(crate) fn make_hamster(&mut self, player: PlayerId) {
        self.hamsters.insert(player);
        self.guarded.insert(player);
    }

    /// Clear everything recorded tonight, keeping the bless/curse counters.
    ///
    /// With `decay` set, every counter moves one step toward zero.
    pub(crate) fn reset(&mut self, decay: bool) {
        self.wolf_targets.clear();
        self.guarded.clear();
        self.hamsters.clear();
        self.seen.clear();
        self.sleeps_at.clear();
        self.mutual_kills.clear();
        self.died_tonight.clear();

        if decay {
            for counter in self.blessings.values_mut() {
                *counter = counter.saturating_sub(counter.signum());
            }
            self.blessings.retain(|_, counter| *counter != 0);
        }
    }
}
