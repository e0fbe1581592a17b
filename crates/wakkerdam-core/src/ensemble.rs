//! The possible-worlds ensemble.
//!
//! The [`WorldSet`] owns every world that is still consistent with what has
//! been observed, the roster, and the event log. Each event is appended to
//! the log, broadcast to every surviving world, and worlds it contradicts are
//! dropped. The ensemble therefore never grows after creation.
//!
//! No world is privileged as the truth. When the game needs a concrete fact
//! (the role of a lynched player, what a seer sees) one relevant world is
//! sampled uniformly, its private value is read, and that value is broadcast
//! as an event like any other.

use std::collections::HashSet;

use rand::Rng;
use rand::seq::{IteratorRandom, SliceRandom};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use wakkerdam_types::{
    Action, PlayerId, Role, TargetedAction, Team, WorldId, seen_as, team_seen_as,
};
use wakkerdam_world::{ResolutionRules, World};

use crate::config::MAX_WORLD_COUNT;
use crate::error::SetupError;
use crate::log::EventLog;
use crate::roster::Roster;

/// The set of worlds still consistent with every observed event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldSet {
    /// Surviving worlds. Impossible worlds are removed, never re-added.
    pub(crate) worlds: Vec<World>,
    /// Players in seating order.
    roster: Roster,
    /// Everything broadcast so far.
    log: EventLog,
    /// World count asked for at setup, before de-duplication.
    requested_world_count: usize,
    /// Resolution switches handed to every world.
    rules: ResolutionRules,
}

impl WorldSet {
    /// Generate up to `world_count` worlds from independent shuffles of
    /// `roles` over the roster.
    ///
    /// Shuffles that produce an assignment already in the ensemble are
    /// dropped, so the ensemble may end up smaller than requested.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::RoleCountMismatch`] when `roles` does not hold
    /// exactly one role per player.
    pub fn new<R: Rng + ?Sized>(
        world_count: usize,
        roster: Roster,
        roles: &[Role],
        rules: ResolutionRules,
        rng: &mut R,
    ) -> Result<Self, SetupError> {
        if roles.len() != roster.len() {
            return Err(SetupError::RoleCountMismatch {
                players: roster.len(),
                roles: roles.len(),
            });
        }

        let capacity = world_count.min(MAX_WORLD_COUNT);
        let mut seen: HashSet<Vec<Role>> = HashSet::with_capacity(capacity);
        let mut worlds = Vec::with_capacity(capacity);
        for position in 0..world_count {
            let mut assignment = roles.to_vec();
            assignment.shuffle(rng);
            if !seen.insert(assignment.clone()) {
                continue;
            }
            let Some(id) = WorldId::from_position(position) else {
                break;
            };
            worlds.push(World::new(id, assignment, rng));
        }

        debug!(
            requested = world_count,
            generated = worlds.len(),
            players = roster.len(),
            "world ensemble created"
        );

        Ok(Self {
            worlds,
            roster,
            log: EventLog::new(),
            requested_world_count: world_count,
            rules,
        })
    }

    /// Build an ensemble from hand-made worlds, with an empty log.
    ///
    /// Impossible worlds are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::RoleCountMismatch`] when a world does not assign
    /// exactly one role per roster entry.
    pub fn from_worlds(
        roster: Roster,
        worlds: Vec<World>,
        rules: ResolutionRules,
    ) -> Result<Self, SetupError> {
        if let Some(world) = worlds
            .iter()
            .find(|world| world.player_count() != roster.len())
        {
            return Err(SetupError::RoleCountMismatch {
                players: roster.len(),
                roles: world.player_count(),
            });
        }
        let requested_world_count = worlds.len();
        let worlds = worlds.into_iter().filter(World::is_possible).collect();
        Ok(Self {
            worlds,
            roster,
            log: EventLog::new(),
            requested_world_count,
            rules,
        })
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// Read-only view of the surviving worlds.
    pub fn worlds(&self) -> &[World] {
        &self.worlds
    }

    /// Number of surviving worlds.
    pub const fn len(&self) -> usize {
        self.worlds.len()
    }

    /// Whether every world has been pruned.
    pub const fn is_empty(&self) -> bool {
        self.worlds.is_empty()
    }

    /// The roster the ensemble was built for.
    pub const fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Every event broadcast so far.
    pub const fn events(&self) -> &EventLog {
        &self.log
    }

    /// World count asked for at setup.
    pub const fn requested_world_count(&self) -> usize {
        self.requested_world_count
    }

    /// Resolution switches in effect.
    pub const fn rules(&self) -> ResolutionRules {
        self.rules
    }

    // -----------------------------------------------------------------------
    // Broadcasting
    // -----------------------------------------------------------------------

    /// Record `event` and apply it to every surviving world, dropping the
    /// worlds it contradicts. Returns how many worlds were dropped.
    ///
    /// A lynch identical to one already in the log is recorded but not
    /// broadcast again: every surviving world already agrees with it.
    pub fn execute_action<R: Rng + ?Sized>(
        &mut self,
        event: TargetedAction,
        rng: &mut R,
    ) -> usize {
        let repeated_lynch =
            event.action() == Action::Lynch && self.log.entries().contains(&event);
        self.log.append(event);
        if repeated_lynch {
            debug!(target_player = ?event.target(), "repeated lynch ignored");
            return 0;
        }

        let before = self.worlds.len();
        let rules = self.rules;
        for world in &mut self.worlds {
            world.apply(&event, rules, rng);
        }
        self.worlds.retain(World::is_possible);
        let pruned = before.saturating_sub(self.worlds.len());

        debug!(
            action = ?event.action(),
            before,
            after = self.worlds.len(),
            pruned,
            "event broadcast"
        );
        if self.worlds.is_empty() && before > 0 {
            warn!(action = ?event.action(), "every world has been pruned");
        }
        pruned
    }

    /// End the night in every world.
    pub fn end_night<R: Rng + ?Sized>(&mut self, rng: &mut R) -> usize {
        self.execute_action(TargetedAction::finish_night(), rng)
    }

    // -----------------------------------------------------------------------
    // Reveals
    // -----------------------------------------------------------------------

    /// Lynch `player`, revealing their role from a world where they are
    /// alive. Returns `None` (and changes nothing) if no such world exists.
    pub fn lynch_player<R: Rng + ?Sized>(
        &mut self,
        player: PlayerId,
        rng: &mut R,
    ) -> Option<Role> {
        let role = self
            .worlds
            .iter()
            .filter(|world| world.is_alive(player))
            .choose(rng)
            .and_then(|world| world.role_of(player));
        self.execute_action(TargetedAction::lynch(player, role), rng);
        role
    }

    /// Declare `player` dead after they died in every world, revealing their
    /// role from one of the worlds.
    pub fn quantum_kill_player<R: Rng + ?Sized>(
        &mut self,
        player: PlayerId,
        rng: &mut R,
    ) -> Option<Role> {
        let role = self
            .worlds
            .iter()
            .filter(|world| !world.is_alive(player))
            .choose(rng)
            .and_then(|world| world.role_of(player));
        self.execute_action(TargetedAction::quantum_death(player, role), rng);
        role
    }

    /// `performer` uses a seer's sight on `target`. The role shown is sampled
    /// from worlds where the performer is a living seer and the target is
    /// alive; `None` means the target was dead in all of them.
    pub fn see_player<R: Rng + ?Sized>(
        &mut self,
        performer: PlayerId,
        target: PlayerId,
        rng: &mut R,
    ) -> Option<Role> {
        let role = self
            .sample_sight(performer, target, Role::Seer, rng)
            .and_then(|world| world.role_of(target))
            .map(seen_as);
        self.execute_action(TargetedAction::see(performer, target, role), rng);
        role
    }

    /// `performer` uses a legacy seer's sight on `target`, learning a team.
    pub fn legacy_see_player<R: Rng + ?Sized>(
        &mut self,
        performer: PlayerId,
        target: PlayerId,
        rng: &mut R,
    ) -> Option<Team> {
        let team = self
            .sample_sight(performer, target, Role::LegacySeer, rng)
            .and_then(|world| world.role_of(target))
            .map(team_seen_as);
        self.execute_action(TargetedAction::legacy_see(performer, target, team), rng);
        team
    }

    /// One world where `performer` is a living `seer` and `target` is alive.
    fn sample_sight<R: Rng + ?Sized>(
        &self,
        performer: PlayerId,
        target: PlayerId,
        seer: Role,
        rng: &mut R,
    ) -> Option<&World> {
        self.worlds
            .iter()
            .filter(|world| {
                world.is_alive(performer)
                    && world.is_alive(target)
                    && world.role_of(performer) == Some(seer)
            })
            .choose(rng)
    }
}
