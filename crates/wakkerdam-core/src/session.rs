//! The game session: one ensemble plus the public state a controller sees.
//!
//! A [`GameSession`] is the only object a controller talks to. It owns the
//! [`WorldSet`], the game's single random generator, the day/night cycle,
//! the publicly living players, the night plan and the period report. All
//! player arguments are names; unknown names are [`SessionError`]s.
//!
//! # Period cycle
//!
//! The game starts on night 1. [`GameSession::execute_night`] resolves the
//! plan and switches to day; [`GameSession::lynch`] (and any follow-up
//! [`GameSession::hunter_shot`]) happen during the day, and
//! [`GameSession::go_to_night`] ends it. After every death the session
//! declares players who are dead in every world and checks for a
//! consensus win, after which the session accepts no further actions.

use std::collections::BTreeSet;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;
use wakkerdam_types::{Action, PlayerId, Role, TargetedAction, Team, can_perform, performing_role};

use crate::config::GameConfig;
use crate::ensemble::WorldSet;
use crate::error::{SessionError, SetupError};
use crate::log::describe;
use crate::plan::NightPlan;
use crate::report::Announcement;
use crate::roster::Roster;
use crate::stats::RoleDistribution;

/// Night actions that only record something, executed in this order before
/// any information is revealed.
const SILENT_ACTIONS: [Action; 7] = [
    Action::Bless,
    Action::Curse,
    Action::Guard,
    Action::SleepWith,
    Action::Invite,
    Action::TransformToHamster,
    Action::Shoot,
];

/// Wild children pick a role model on this night only.
const FOLLOW_EXAMPLE_NIGHT: u32 = 1;

/// The devil copies a role on this night only.
const DEVILS_CHOICE_NIGHT: u32 = 2;

/// What a seer or legacy seer learned.
enum Sight {
    Role(Role),
    Team(Team),
}

/// What a lynch or hunter shot revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeathOutcome {
    /// Role revealed on death. `None` only if the player was already dead in
    /// every world.
    pub role: Option<Role>,
    /// Whether the revealed role can shoot, so the victim takes someone along.
    pub retaliates: bool,
}

impl DeathOutcome {
    fn from_role(role: Option<Role>) -> Self {
        Self {
            role,
            retaliates: role.is_some_and(|role| can_perform(role, Action::Shoot)),
        }
    }
}

/// Everything needed to rebuild a session, minus the random generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Game name.
    pub name: String,
    /// The ensemble, including roster and event log.
    pub worlds: WorldSet,
    /// Current day counter, starting at 1.
    pub day: u32,
    /// Whether it is currently day.
    pub is_day: bool,
    /// Publicly living players.
    pub living: BTreeSet<PlayerId>,
    /// Pending night choices.
    pub plan: NightPlan,
    /// Witches who have used their potion.
    pub spent_potions: BTreeSet<PlayerId>,
    /// The latest period report.
    pub report: Vec<Announcement>,
    /// Consensus winner, once there is one.
    pub winner: Option<Team>,
}

/// A running game.
#[derive(Debug)]
pub struct GameSession {
    name: String,
    worlds: WorldSet,
    rng: StdRng,
    day: u32,
    is_day: bool,
    living: BTreeSet<PlayerId>,
    plan: NightPlan,
    spent_potions: BTreeSet<PlayerId>,
    report: Vec<Announcement>,
    winner: Option<Team>,
}

impl GameSession {
    /// Set up a game from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::PlayerCount`] when the roster is outside the
    /// configured limits, and any roster or ensemble setup error.
    pub fn new(config: &GameConfig) -> Result<Self, SetupError> {
        let count = config.game.players.len();
        let (min, max) = (config.limits.min_players, config.limits.max_players);
        if !(min..=max).contains(&count) {
            return Err(SetupError::PlayerCount { count, min, max });
        }

        let roster = Roster::new(config.game.players.clone())?;
        let mut rng = config
            .game
            .seed
            .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        let worlds = WorldSet::new(
            config.game.world_count,
            roster,
            &config.game.roles,
            config.rules,
            &mut rng,
        )?;

        let name = if config.game.name.is_empty() {
            "Quantum Wakkerdam".to_owned()
        } else {
            config.game.name.clone()
        };
        let living = worlds.roster().ids().collect();

        info!(
            game = %name,
            players = count,
            worlds = worlds.len(),
            requested = config.game.world_count,
            "game session created"
        );

        Ok(Self {
            name,
            worlds,
            rng,
            day: 1,
            is_day: false,
            living,
            plan: NightPlan::new(),
            spent_potions: BTreeSet::new(),
            report: Vec::new(),
            winner: None,
        })
    }

    /// Rebuild a session from a snapshot. The random generator is seeded
    /// from `seed`, or from OS entropy when `None`.
    pub fn restore(snapshot: SessionSnapshot, seed: Option<u64>) -> Self {
        Self {
            name: snapshot.name,
            worlds: snapshot.worlds,
            rng: seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64),
            day: snapshot.day,
            is_day: snapshot.is_day,
            living: snapshot.living,
            plan: snapshot.plan,
            spent_potions: snapshot.spent_potions,
            report: snapshot.report,
            winner: snapshot.winner,
        }
    }

    /// Capture the session as plain data.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            name: self.name.clone(),
            worlds: self.worlds.clone(),
            day: self.day,
            is_day: self.is_day,
            living: self.living.clone(),
            plan: self.plan.clone(),
            spent_potions: self.spent_potions.clone(),
            report: self.report.clone(),
            winner: self.winner,
        }
    }

    // -----------------------------------------------------------------------
    // Public state
    // -----------------------------------------------------------------------

    /// Game name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Period counter, starting at 1 and advanced when a night is resolved.
    pub const fn day(&self) -> u32 {
        self.day
    }

    /// Whether it is currently day.
    pub const fn is_day(&self) -> bool {
        self.is_day
    }

    /// The roster.
    pub const fn roster(&self) -> &Roster {
        self.worlds.roster()
    }

    /// Read-only view of the ensemble.
    pub const fn worlds(&self) -> &WorldSet {
        &self.worlds
    }

    /// Names of the publicly living players, in seating order.
    pub fn living_players(&self) -> impl Iterator<Item = &str> + '_ {
        self.living
            .iter()
            .filter_map(|player| self.roster().name(*player))
    }

    /// Whether `name` is publicly alive.
    pub fn is_alive(&self, name: &str) -> bool {
        self.roster()
            .id_of(name)
            .is_some_and(|player| self.living.contains(&player))
    }

    /// Announcements of the latest period.
    pub fn report(&self) -> &[Announcement] {
        &self.report
    }

    /// The consensus winner, once every world agrees.
    pub const fn winner(&self) -> Option<Team> {
        self.winner
    }

    /// Events grouped per period, split on night-finish markers.
    pub fn events_by_night(&self) -> Vec<&[TargetedAction]> {
        self.worlds.events().nights()
    }

    /// English description of an event using this game's player names.
    pub fn describe(&self, event: &TargetedAction) -> String {
        describe(event, self.roster())
    }

    // -----------------------------------------------------------------------
    // Statistics by name
    // -----------------------------------------------------------------------

    /// Role distribution of `name` over the worlds where they are alive.
    pub fn role_percentages(&self, name: &str) -> Result<RoleDistribution, SessionError> {
        let player = self.player(name)?;
        Ok(self.worlds.role_percentages_of_player(player))
    }

    /// Role distribution of every player, in seating order.
    pub fn role_percentages_of_all_players(&self) -> Vec<(&str, RoleDistribution)> {
        self.roster()
            .names()
            .iter()
            .map(String::as_str)
            .zip(self.worlds.role_percentages_of_all_players())
            .collect()
    }

    /// Fraction of worlds in which `name` is dead.
    pub fn death_percentage(&self, name: &str) -> Result<Decimal, SessionError> {
        let player = self.player(name)?;
        Ok(self.worlds.death_percentage_of_player(player))
    }

    /// Death fraction of every player, in seating order.
    pub fn death_percentage_of_all_players(&self) -> Vec<(&str, Decimal)> {
        self.roster()
            .names()
            .iter()
            .map(String::as_str)
            .zip(self.worlds.death_percentage_of_all_players())
            .collect()
    }

    // -----------------------------------------------------------------------
    // Night plan
    // -----------------------------------------------------------------------

    /// Whether `name` may currently choose a target for `action`.
    pub fn can_perform(&self, name: &str, action: Action) -> bool {
        self.roster()
            .id_of(name)
            .is_some_and(|player| self.can_player_perform(player, action))
    }

    fn can_player_perform(&self, player: PlayerId, action: Action) -> bool {
        let Some(role) = performing_role(action) else {
            return false;
        };
        if !self.living.contains(&player) || !self.worlds.could_hold(player, role) {
            return false;
        }
        match action {
            Action::Poison => !self.spent_potions.contains(&player),
            Action::FollowExample => self.day == FOLLOW_EXAMPLE_NIGHT,
            Action::DevilsChoice => self.day == DEVILS_CHOICE_NIGHT,
            _ => true,
        }
    }

    /// Plan `performer` doing `action` to `target` tonight.
    pub fn set_night_action(
        &mut self,
        performer: &str,
        action: Action,
        target: &str,
    ) -> Result<(), SessionError> {
        self.ensure_night()?;
        let performer_id = self.player(performer)?;
        let target_id = self.player(target)?;
        if !self.can_player_perform(performer_id, action) {
            return Err(SessionError::ActionNotAllowed {
                player: performer.to_owned(),
                action,
            });
        }
        self.plan.set(performer_id, action, target_id);
        Ok(())
    }

    /// Withdraw a planned action.
    pub fn clear_night_action(
        &mut self,
        performer: &str,
        action: Action,
    ) -> Result<(), SessionError> {
        let performer = self.player(performer)?;
        self.plan.remove(performer, action);
        Ok(())
    }

    /// Name of the planned target, if any.
    pub fn planned_target(&self, performer: &str, action: Action) -> Option<&str> {
        let performer = self.roster().id_of(performer)?;
        self.plan
            .target(performer, action)
            .and_then(|target| self.roster().name(target))
    }

    // -----------------------------------------------------------------------
    // Periods
    // -----------------------------------------------------------------------

    /// Resolve the night: submit the plan in a fixed order, finish the night
    /// in every world, declare quantum deaths and switch to day.
    pub fn execute_night(&mut self) -> Result<(), SessionError> {
        self.ensure_night()?;
        self.report.clear();

        for action in SILENT_ACTIONS {
            self.submit_planned(action);
        }
        if self.day == FOLLOW_EXAMPLE_NIGHT {
            self.submit_planned(Action::FollowExample);
        }
        if self.day == DEVILS_CHOICE_NIGHT {
            self.submit_planned(Action::DevilsChoice);
        }
        for witch in self.submit_planned(Action::Poison) {
            self.spent_potions.insert(witch);
        }
        self.perform_sightings(Action::See);
        self.perform_sightings(Action::LegacySee);
        self.submit_planned(Action::Eat);

        let pruned = self.worlds.end_night(&mut self.rng);
        self.sweep_quantum_deaths();
        self.check_for_win();

        info!(
            night = self.day,
            worlds = self.worlds.len(),
            pruned,
            living = self.living.len(),
            "night resolved"
        );

        self.is_day = true;
        self.plan.clear();
        self.day = self.day.saturating_add(1);
        Ok(())
    }

    /// Lynch `name`. Starts a new period report.
    pub fn lynch(&mut self, name: &str) -> Result<DeathOutcome, SessionError> {
        self.ensure_day()?;
        let player = self.living_player(name)?;
        self.report.clear();

        let role = self.worlds.lynch_player(player, &mut self.rng);
        info!(player = name, role = ?role, "player lynched");
        self.report.push(Announcement::Lynched {
            player: name.to_owned(),
            role,
        });
        self.after_day_death(player);
        Ok(DeathOutcome::from_role(role))
    }

    /// A hunter killed during the day takes `name` along.
    pub fn hunter_shot(&mut self, name: &str) -> Result<DeathOutcome, SessionError> {
        self.ensure_day()?;
        let player = self.living_player(name)?;

        let role = self.worlds.lynch_player(player, &mut self.rng);
        info!(player = name, role = ?role, "player shot by a hunter");
        self.report.push(Announcement::Shot {
            player: name.to_owned(),
            role,
        });
        self.after_day_death(player);
        Ok(DeathOutcome::from_role(role))
    }

    /// End the day.
    pub fn go_to_night(&mut self) -> Result<(), SessionError> {
        self.ensure_day()?;
        self.is_day = false;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn player(&self, name: &str) -> Result<PlayerId, SessionError> {
        self.roster()
            .id_of(name)
            .ok_or_else(|| SessionError::UnknownPlayer(name.to_owned()))
    }

    fn living_player(&self, name: &str) -> Result<PlayerId, SessionError> {
        let player = self.player(name)?;
        if self.living.contains(&player) {
            Ok(player)
        } else {
            Err(SessionError::AlreadyDead(name.to_owned()))
        }
    }

    fn ensure_running(&self) -> Result<(), SessionError> {
        self.winner.map_or(Ok(()), |team| Err(SessionError::GameOver(team)))
    }

    fn ensure_night(&self) -> Result<(), SessionError> {
        self.ensure_running()?;
        if self.is_day {
            return Err(SessionError::NotNight);
        }
        Ok(())
    }

    fn ensure_day(&self) -> Result<(), SessionError> {
        self.ensure_running()?;
        if !self.is_day {
            return Err(SessionError::NotDay);
        }
        Ok(())
    }

    /// Players for whom the role performing `action` is still possible.
    fn candidates(&self, action: Action) -> Vec<PlayerId> {
        let Some(role) = performing_role(action) else {
            return Vec::new();
        };
        self.roster()
            .ids()
            .filter(|player| self.worlds.could_hold(*player, role))
            .collect()
    }

    /// Submit `action` for every candidate, with their planned target or
    /// none. Returns the candidates that had a target.
    fn submit_planned(&mut self, action: Action) -> Vec<PlayerId> {
        let mut targeted = Vec::new();
        for performer in self.candidates(action) {
            if action == Action::Poison && self.spent_potions.contains(&performer) {
                continue;
            }
            let target = self.plan.target(performer, action);
            if target.is_some() {
                targeted.push(performer);
            }
            self.worlds
                .execute_action(TargetedAction::by(performer, action, target), &mut self.rng);
        }
        targeted
    }

    /// Reveal what every living seer (or legacy seer) sees.
    fn perform_sightings(&mut self, action: Action) {
        for seer in self.candidates(action) {
            if !self.living.contains(&seer) {
                continue;
            }
            let seer_name = self.name_of(seer);
            let Some(target) = self.plan.target(seer, action) else {
                self.report.push(Announcement::SawNobody { seer: seer_name });
                continue;
            };
            let target_name = self.name_of(target);

            let sight = if action == Action::LegacySee {
                self.worlds
                    .legacy_see_player(seer, target, &mut self.rng)
                    .map(Sight::Team)
            } else {
                self.worlds
                    .see_player(seer, target, &mut self.rng)
                    .map(Sight::Role)
            };
            let announcement = match sight {
                Some(Sight::Role(role)) => Announcement::SawRole {
                    seer: seer_name,
                    target: target_name,
                    role,
                },
                Some(Sight::Team(team)) => Announcement::SawTeam {
                    seer: seer_name,
                    target: target_name,
                    team,
                },
                None => Announcement::SawDead {
                    seer: seer_name,
                    target: target_name,
                },
            };
            self.report.push(announcement);
        }
    }

    fn name_of(&self, player: PlayerId) -> String {
        self.roster().name(player).unwrap_or_default().to_owned()
    }

    fn after_day_death(&mut self, player: PlayerId) {
        self.living.remove(&player);
        self.sweep_quantum_deaths();
        self.check_for_win();
    }

    /// Declare every publicly living player who is dead in all worlds,
    /// until no such player remains.
    fn sweep_quantum_deaths(&mut self) {
        loop {
            let deaths = self.worlds.death_percentage_of_all_players();
            let doomed: Vec<PlayerId> = self
                .living
                .iter()
                .copied()
                .filter(|player| deaths.get(player.index()) == Some(&Decimal::ONE))
                .collect();
            if doomed.is_empty() {
                return;
            }
            for player in doomed {
                let role = self.worlds.quantum_kill_player(player, &mut self.rng);
                let name = self.name_of(player);
                info!(player = %name, role = ?role, "quantum death");
                self.report.push(Announcement::QuantumDeath { player: name, role });
                self.living.remove(&player);
            }
        }
    }

    fn check_for_win(&mut self) {
        if self.winner.is_some() {
            return;
        }
        self.winner = self.worlds.winning_team();
        if let Some(team) = self.winner {
            info!(game = %self.name, winner = %team, day = self.day, "game won");
        }
    }
}
