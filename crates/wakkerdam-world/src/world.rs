//! A single hypothesis of who holds which role and who is alive.
//!
//! A [`World`] starts out possible and becomes impossible the moment an event
//! contradicts its private state. Impossible is terminal: an impossible world
//! ignores every later event and is expected to be dropped by its owner.
//!
//! Role assignments only change through two mechanics: a devil copying a role
//! and an apprentice seer inheriting sight when a seer dies (plus a wild child
//! turning werewolf, see [`crate::death`]).

use std::collections::BTreeMap;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use wakkerdam_types::{
    Action, PlayerId, Role, TargetedAction, Team, WorldId, capabilities, seen_as, team_seen_as,
};

use crate::night::NightActions;
use crate::rules::ResolutionRules;

/// One fully determined hypothesis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct World {
    /// Identifier assigned at creation.
    pub(crate) id: WorldId,
    /// Role per player, indexed by [`PlayerId`].
    pub(crate) roles: Vec<Role>,
    /// Liveness per player, indexed by [`PlayerId`].
    pub(crate) alive: Vec<bool>,
    /// Werewolves in the order in which they get to eat.
    pub(crate) wolf_order: Vec<PlayerId>,
    /// Wild child -> role model.
    pub(crate) role_models: BTreeMap<PlayerId, PlayerId>,
    /// Buffered night records.
    pub(crate) night: NightActions,
    /// Cleared once an event contradicts this world.
    pub(crate) possible: bool,
}

impl World {
    /// Create a world from a role assignment, with every player alive.
    ///
    /// The werewolf priority order is a random permutation of all players on
    /// the werewolf team.
    pub fn new<R: Rng + ?Sized>(id: WorldId, roles: Vec<Role>, rng: &mut R) -> Self {
        let mut wolf_order: Vec<PlayerId> = roles
            .iter()
            .enumerate()
            .filter(|(_, role)| capabilities::team(**role) == Team::Werewolves)
            .filter_map(|(position, _)| PlayerId::from_position(position))
            .collect();
        wolf_order.shuffle(rng);
        Self::with_wolf_order(id, roles, wolf_order)
    }

    /// Create a world with an explicit werewolf priority order.
    pub fn with_wolf_order(id: WorldId, roles: Vec<Role>, wolf_order: Vec<PlayerId>) -> Self {
        let alive = vec![true; roles.len()];
        Self {
            id,
            roles,
            alive,
            wolf_order,
            role_models: BTreeMap::new(),
            night: NightActions::new(),
            possible: true,
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Identifier assigned at creation.
    pub const fn id(&self) -> WorldId {
        self.id
    }

    /// Whether no event has contradicted this world yet.
    pub const fn is_possible(&self) -> bool {
        self.possible
    }

    /// The full role assignment, indexed by player.
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    /// Number of players in this world.
    pub const fn player_count(&self) -> usize {
        self.roles.len()
    }

    /// Private role of `player`, or `None` if the player is not in the roster.
    pub fn role_of(&self, player: PlayerId) -> Option<Role> {
        self.roles.get(player.index()).copied()
    }

    /// Whether `player` is alive in this world.
    pub fn is_alive(&self, player: PlayerId) -> bool {
        self.alive.get(player.index()).copied().unwrap_or(false)
    }

    /// All players alive in this world, in roster order.
    pub fn living_players(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.alive
            .iter()
            .enumerate()
            .filter(|(_, alive)| **alive)
            .filter_map(|(position, _)| PlayerId::from_position(position))
    }

    /// The werewolf priority order.
    pub fn wolf_order(&self) -> &[PlayerId] {
        &self.wolf_order
    }

    /// Position of `player` in the werewolf priority order.
    pub fn wolf_rank(&self, player: PlayerId) -> Option<usize> {
        self.wolf_order.iter().position(|wolf| *wolf == player)
    }

    /// Persistent bless/curse counter of `player`.
    pub fn blessing_of(&self, player: PlayerId) -> i32 {
        self.night.blessing_of(player)
    }

    /// Role model picked by a wild child, if any.
    pub fn role_model_of(&self, player: PlayerId) -> Option<PlayerId> {
        self.role_models.get(&player).copied()
    }

    /// Read-only view of tonight's records.
    pub const fn night(&self) -> &NightActions {
        &self.night
    }

    /// The team that has won in this world: the single team shared by every
    /// living player. `None` while teams are mixed or nobody is alive.
    pub fn local_winner(&self) -> Option<Team> {
        let mut winner = None;
        for player in self.living_players() {
            let team = capabilities::team(self.role_of(player)?);
            match winner {
                None => winner = Some(team),
                Some(existing) if existing != team => return None,
                Some(_) => {}
            }
        }
        winner
    }

    // -----------------------------------------------------------------------
    // Event application
    // -----------------------------------------------------------------------

    /// Apply one event to this world.
    ///
    /// Inapplicable events (performer dead, or their role in this world
    /// cannot perform the action) are silently ignored. Events that contradict
    /// this world make it impossible; nothing is ever reported as an error.
    pub fn apply<R: Rng + ?Sized>(
        &mut self,
        event: &TargetedAction,
        rules: ResolutionRules,
        rng: &mut R,
    ) {
        if !self.possible || !self.applies(event) {
            return;
        }

        match event.action() {
            Action::Lynch => self.apply_reveal_death(event, true, rng),
            Action::QuantumDeath => self.apply_reveal_death(event, false, rng),
            Action::FinishNight => self.finish_night(rules, rng),
            _ => {
                if let Some(performer) = event.performer() {
                    self.apply_role_action(performer, event);
                }
            }
        }
    }

    /// Whether `event` has any effect on this world.
    fn applies(&self, event: &TargetedAction) -> bool {
        let action = event.action();
        if capabilities::is_unconditional(action) {
            return true;
        }
        let Some(performer) = event.performer() else {
            return false;
        };
        self.is_alive(performer)
            && self
                .role_of(performer)
                .is_some_and(|role| capabilities::can_perform(role, action))
    }

    /// Lynch or quantum death: check the revealed role, then kill.
    ///
    /// A lynch of a player already dead here is a contradiction. A quantum
    /// death targets players who are dead in every world, so it only checks
    /// the role.
    fn apply_reveal_death<R: Rng + ?Sized>(
        &mut self,
        event: &TargetedAction,
        must_be_alive: bool,
        rng: &mut R,
    ) {
        let (Some(target), Some(revealed)) = (event.target(), event.revealed_role()) else {
            return;
        };
        let Some(role) = self.role_of(target) else {
            return;
        };
        if role != revealed {
            self.possible = false;
            return;
        }
        if self.is_alive(target) {
            self.kill(target, rng);
        } else if must_be_alive {
            self.possible = false;
        }
    }

    /// Record an action performed by a role during the night.
    fn apply_role_action(&mut self, performer: PlayerId, event: &TargetedAction) {
        let Some(target) = event.target() else {
            return;
        };
        if self.role_of(target).is_none() {
            return;
        }

        match event.action() {
            Action::Eat => {
                self.night.wolf_targets.insert(performer, target);
            }
            Action::See | Action::LegacySee => self.apply_sight(performer, target, event),
            Action::Bless => self.night.adjust_blessing(target, 1),
            Action::Curse => self.night.adjust_blessing(target, -1),
            Action::FollowExample => {
                self.role_models.insert(performer, target);
            }
            Action::DevilsChoice => self.apply_devils_choice(performer, target),
            gated => {
                if self.night.is_cursed(performer) {
                    return;
                }
                self.apply_gated(gated, performer, target);
            }
        }
    }

    /// Actions that a cursed performer cannot carry out.
    fn apply_gated(&mut self, action: Action, performer: PlayerId, target: PlayerId) {
        let night = &mut self.night;
        match action {
            Action::TransformToHamster => night.make_hamster(target),
            Action::Guard => {
                night.guarded.insert(target);
            }
            Action::SleepWith => {
                night.guarded.insert(performer);
                night.sleeps_at.insert(performer, target);
            }
            Action::Invite => {
                night.guarded.insert(target);
                night.sleeps_at.insert(target, performer);
            }
            Action::Poison => {
                night.died_tonight.insert(target);
            }
            Action::Shoot => {
                night.mutual_kills.insert(performer, target);
            }
            _ => {}
        }
    }

    /// Seer or legacy seer: the revealed value must match the disguise.
    fn apply_sight(&mut self, performer: PlayerId, target: PlayerId, event: &TargetedAction) {
        if self.night.is_cursed(performer) {
            return;
        }
        let Some(role) = self.role_of(target) else {
            return;
        };

        let consistent = match event.action() {
            Action::See => event.revealed_role().map(|revealed| seen_as(role) == revealed),
            Action::LegacySee => event
                .revealed_team()
                .map(|revealed| team_seen_as(role) == revealed),
            _ => None,
        };
        // Nothing was revealed: the sight carries no information.
        let Some(consistent) = consistent else {
            return;
        };

        if !consistent || !self.is_alive(target) {
            self.possible = false;
            return;
        }
        self.night.seen.insert(target);
    }

    /// The devil copies a seer or werewolf role, or settles as a villager.
    fn apply_devils_choice(&mut self, performer: PlayerId, target: PlayerId) {
        let Some(target_role) = self.role_of(target) else {
            return;
        };
        let new_role = if capabilities::devil_copies(target_role) {
            target_role
        } else {
            Role::Villager
        };
        self.set_role(performer, new_role);
        if new_role == Role::Werewolf {
            self.join_pack(performer);
        }
    }

    // -----------------------------------------------------------------------
    // Mutation helpers
    // -----------------------------------------------------------------------

    /// Overwrite the private role of `player`.
    pub(crate) fn set_role(&mut self, player: PlayerId, role: Role) {
        if let Some(slot) = self.roles.get_mut(player.index()) {
            *slot = role;
        }
    }

    /// Append `player` to the end of the werewolf priority order.
    pub(crate) fn join_pack(&mut self, player: PlayerId) {
        if !self.wolf_order.contains(&player) {
            self.wolf_order.push(player);
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn p(raw: u32) -> PlayerId {
        PlayerId(raw)
    }

    fn world(roles: &[Role]) -> World {
        let wolves = roles
            .iter()
            .enumerate()
            .filter(|(_, role)| capabilities::team(**role) == Team::Werewolves)
            .filter_map(|(i, _)| PlayerId::from_position(i))
            .collect();
        World::with_wolf_order(WorldId(0), roles.to_vec(), wolves)
    }

    fn apply(world: &mut World, event: TargetedAction) {
        let mut rng = StdRng::seed_from_u64(7);
        world.apply(&event, ResolutionRules::default(), &mut rng);
    }

    #[test]
    fn new_world_shuffles_only_werewolf_team_into_order() {
        let mut rng = StdRng::seed_from_u64(1);
        let roles = vec![Role::Werewolf, Role::Villager, Role::Cursed, Role::Werewolf];
        let world = World::new(WorldId(3), roles, &mut rng);
        let mut order = world.wolf_order().to_vec();
        order.sort();
        assert_eq!(order, vec![p(0), p(2), p(3)]);
        assert_eq!(world.living_players().count(), 4);
        assert!(world.is_possible());
    }

    #[test]
    fn lynch_with_wrong_role_is_contradiction() {
        let mut w = world(&[Role::Werewolf, Role::Villager]);
        apply(&mut w, TargetedAction::lynch(p(0), Some(Role::Villager)));
        assert!(!w.is_possible());
    }

    #[test]
    fn lynch_with_matching_role_kills() {
        let mut w = world(&[Role::Werewolf, Role::Villager]);
        apply(&mut w, TargetedAction::lynch(p(1), Some(Role::Villager)));
        assert!(w.is_possible());
        assert!(!w.is_alive(p(1)));
    }

    #[test]
    fn lynching_a_dead_player_is_contradiction() {
        let mut w = world(&[Role::Werewolf, Role::Villager]);
        apply(&mut w, TargetedAction::lynch(p(1), Some(Role::Villager)));
        apply(&mut w, TargetedAction::lynch(p(1), Some(Role::Villager)));
        assert!(!w.is_possible());
    }

    #[test]
    fn quantum_death_of_dead_player_only_checks_role() {
        let mut w = world(&[Role::Werewolf, Role::Villager]);
        apply(&mut w, TargetedAction::lynch(p(1), Some(Role::Villager)));
        apply(&mut w, TargetedAction::quantum_death(p(1), Some(Role::Villager)));
        assert!(w.is_possible());
        apply(&mut w, TargetedAction::quantum_death(p(1), Some(Role::Seer)));
        assert!(!w.is_possible());
    }

    #[test]
    fn reveal_without_value_is_noop() {
        let mut w = world(&[Role::Werewolf, Role::Villager]);
        apply(&mut w, TargetedAction::lynch(p(0), None));
        assert!(w.is_possible());
        assert!(w.is_alive(p(0)));
    }

    #[test]
    fn action_by_wrong_role_is_ignored() {
        let mut w = world(&[Role::Villager, Role::Villager]);
        apply(&mut w, TargetedAction::by(p(0), Action::Guard, Some(p(1))));
        assert!(!w.night().is_guarded(p(1)));
    }

    #[test]
    fn action_by_dead_performer_is_ignored() {
        let mut w = world(&[Role::Guardian, Role::Villager, Role::Werewolf]);
        apply(&mut w, TargetedAction::lynch(p(0), Some(Role::Guardian)));
        apply(&mut w, TargetedAction::by(p(0), Action::Guard, Some(p(1))));
        assert!(!w.night().is_guarded(p(1)));
    }

    #[test]
    fn seer_sees_disguise() {
        let mut w = world(&[Role::Seer, Role::Lycan, Role::Werewolf]);
        apply(&mut w, TargetedAction::see(p(0), p(1), Some(Role::Werewolf)));
        assert!(w.is_possible());
        apply(&mut w, TargetedAction::see(p(0), p(1), Some(Role::Lycan)));
        assert!(!w.is_possible());
    }

    #[test]
    fn legacy_seer_sees_disguised_team() {
        let mut w = world(&[Role::LegacySeer, Role::Cursed, Role::Villager]);
        apply(&mut w, TargetedAction::legacy_see(p(0), p(1), Some(Team::Villagers)));
        assert!(w.is_possible());
        apply(&mut w, TargetedAction::legacy_see(p(0), p(1), Some(Team::Werewolves)));
        assert!(!w.is_possible());
    }

    #[test]
    fn cursed_seer_is_ignored() {
        let mut w = world(&[Role::Seer, Role::Cursed, Role::Villager]);
        apply(&mut w, TargetedAction::by(p(1), Action::Curse, Some(p(0))));
        assert_eq!(w.blessing_of(p(0)), -1);
        // A wrong reveal from a cursed seer carries no information.
        apply(&mut w, TargetedAction::see(p(0), p(2), Some(Role::Werewolf)));
        assert!(w.is_possible());
    }

    #[test]
    fn cursed_guardian_cannot_guard() {
        let mut w = world(&[Role::Guardian, Role::Cursed, Role::Villager]);
        apply(&mut w, TargetedAction::by(p(1), Action::Curse, Some(p(0))));
        apply(&mut w, TargetedAction::by(p(0), Action::Guard, Some(p(2))));
        assert!(!w.night().is_guarded(p(2)));
    }

    #[test]
    fn sleep_with_and_invite_record_opposite_directions() {
        let mut w = world(&[Role::Harlot, Role::Casanova, Role::Villager, Role::Villager]);
        apply(&mut w, TargetedAction::by(p(0), Action::SleepWith, Some(p(2))));
        apply(&mut w, TargetedAction::by(p(1), Action::Invite, Some(p(3))));
        assert!(w.night().is_guarded(p(0)));
        assert!(w.night().is_guarded(p(3)));
        assert_eq!(w.night.sleeps_at.get(&p(0)), Some(&p(2)));
        assert_eq!(w.night.sleeps_at.get(&p(3)), Some(&p(1)));
    }

    #[test]
    fn devil_copies_seer_or_becomes_villager() {
        let mut w = world(&[Role::Devil, Role::Seer, Role::Hunter]);
        apply(&mut w, TargetedAction::by(p(0), Action::DevilsChoice, Some(p(1))));
        assert_eq!(w.role_of(p(0)), Some(Role::Seer));

        let mut w = world(&[Role::Devil, Role::Seer, Role::Hunter]);
        apply(&mut w, TargetedAction::by(p(0), Action::DevilsChoice, Some(p(2))));
        assert_eq!(w.role_of(p(0)), Some(Role::Villager));
    }

    #[test]
    fn devil_copying_werewolf_joins_pack_last() {
        let mut w = world(&[Role::Devil, Role::Werewolf, Role::Villager]);
        apply(&mut w, TargetedAction::by(p(0), Action::DevilsChoice, Some(p(1))));
        assert_eq!(w.role_of(p(0)), Some(Role::Werewolf));
        assert_eq!(w.wolf_order(), &[p(1), p(0)]);
        assert_eq!(w.wolf_rank(p(0)), Some(1));
    }

    #[test]
    fn local_winner_requires_single_team() {
        let mut w = world(&[Role::Werewolf, Role::Villager, Role::Seer]);
        assert_eq!(w.local_winner(), None);
        apply(&mut w, TargetedAction::lynch(p(0), Some(Role::Werewolf)));
        assert_eq!(w.local_winner(), Some(Team::Villagers));
    }

    #[test]
    fn impossible_world_ignores_later_events() {
        let mut w = world(&[Role::Werewolf, Role::Villager]);
        apply(&mut w, TargetedAction::lynch(p(0), Some(Role::Villager)));
        apply(&mut w, TargetedAction::lynch(p(1), Some(Role::Villager)));
        assert!(!w.is_possible());
        assert!(w.is_alive(p(1)));
    }
}
