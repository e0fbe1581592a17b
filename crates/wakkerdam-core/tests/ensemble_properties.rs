//! Integration tests for the possible-worlds ensemble.
//!
//! Covers the properties every event sequence must keep (monotone pruning,
//! uniform prior, death and winner bookkeeping) and small hand-built
//! scenarios for night resolution.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use wakkerdam_core::{Roster, WorldSet};
use wakkerdam_types::{Action, PlayerId, Role, TargetedAction, Team, WorldId};
use wakkerdam_world::{ResolutionRules, World};

fn roster(names: &[&str]) -> Roster {
    Roster::new(names.iter().map(|name| (*name).to_owned()).collect()).unwrap()
}

fn generated(names: &[&str], roles: &[Role], worlds: usize, seed: u64) -> (WorldSet, StdRng) {
    let mut rng = StdRng::seed_from_u64(seed);
    let set = WorldSet::new(
        worlds,
        roster(names),
        roles,
        ResolutionRules::default(),
        &mut rng,
    )
    .unwrap();
    (set, rng)
}

fn single_world(names: &[&str], roles: &[Role], wolf_order: &[u32]) -> WorldSet {
    let world = World::with_wolf_order(
        WorldId(0),
        roles.to_vec(),
        wolf_order.iter().copied().map(PlayerId).collect(),
    );
    WorldSet::from_worlds(roster(names), vec![world], ResolutionRules::default()).unwrap()
}

fn share(part: u32, whole: u32) -> Decimal {
    Decimal::from(part).checked_div(Decimal::from(whole)).unwrap()
}

// =============================================================================
// Properties
// =============================================================================

#[test]
fn ensemble_never_grows() {
    let roles = [
        Role::Werewolf,
        Role::Werewolf,
        Role::Seer,
        Role::Guardian,
        Role::Hunter,
        Role::Hamster,
        Role::Villager,
    ];
    let names = ["a", "b", "c", "d", "e", "f", "g"];
    let (mut set, mut rng) = generated(&names, &roles, 400, 21);
    let mut events = StdRng::seed_from_u64(99);

    let mut previous = set.len();
    for _ in 0..250 {
        let performer = PlayerId(events.random_range(0..7));
        let target = PlayerId(events.random_range(0..7));
        let action = *Action::ALL.choose(&mut events).unwrap();
        let event = match action {
            Action::Lynch => TargetedAction::lynch(target, roles.choose(&mut events).copied()),
            Action::QuantumDeath => {
                TargetedAction::quantum_death(target, roles.choose(&mut events).copied())
            }
            Action::FinishNight => TargetedAction::finish_night(),
            Action::See => {
                TargetedAction::see(performer, target, roles.choose(&mut events).copied())
            }
            Action::LegacySee => {
                TargetedAction::legacy_see(performer, target, Some(Team::Werewolves))
            }
            other => TargetedAction::by(performer, other, Some(target)),
        };
        set.execute_action(event, &mut rng);
        assert!(set.len() <= previous, "ensemble grew after {event:?}");
        previous = set.len();
    }
}

#[test]
fn prior_matches_the_role_multiset() {
    let roles = [Role::Werewolf, Role::Seer, Role::Villager, Role::Villager];
    let (set, _) = generated(&["a", "b", "c", "d"], &roles, 600, 5);
    // 4! / 2! distinct assignments, all of them generated.
    assert_eq!(set.len(), 12);

    for player in set.roster().ids() {
        let distribution = set.role_percentages_of_player(player);
        assert_eq!(distribution.len(), 3);
        assert_eq!(distribution[&Role::Werewolf], share(1, 4));
        assert_eq!(distribution[&Role::Seer], share(1, 4));
        assert_eq!(distribution[&Role::Villager], share(1, 2));
    }
}

#[test]
fn death_percentage_goes_from_zero_to_one() {
    let roles = [Role::Werewolf, Role::Villager, Role::Villager, Role::Seer];
    let (mut set, mut rng) = generated(&["a", "b", "c", "d"], &roles, 200, 8);
    let victim = PlayerId(2);

    assert_eq!(set.death_percentage_of_player(victim), Decimal::ZERO);
    set.lynch_player(victim, &mut rng);
    assert_eq!(set.death_percentage_of_player(victim), Decimal::ONE);
    assert!(set.role_percentages_of_player(victim).is_empty());
}

#[test]
fn winner_requires_every_world_to_agree() {
    let worlds = vec![
        World::with_wolf_order(
            WorldId(0),
            vec![Role::Werewolf, Role::Villager],
            vec![PlayerId(0)],
        ),
        World::with_wolf_order(WorldId(1), vec![Role::Villager, Role::Villager], Vec::new()),
    ];
    let mut set =
        WorldSet::from_worlds(roster(&["a", "b"]), worlds, ResolutionRules::default()).unwrap();
    let mut rng = StdRng::seed_from_u64(1);

    // One world is mixed, the other already villager-only.
    assert_eq!(set.winning_team(), None);

    set.execute_action(
        TargetedAction::lynch(PlayerId(0), Some(Role::Werewolf)),
        &mut rng,
    );
    assert_eq!(set.len(), 1);
    assert_eq!(set.winning_team(), Some(Team::Villagers));
}

#[test]
fn repeated_lynch_changes_nothing() {
    let roles = [Role::Werewolf, Role::Villager, Role::Villager, Role::Seer];
    let (mut set, mut rng) = generated(&["a", "b", "c", "d"], &roles, 200, 13);

    let role = set.lynch_player(PlayerId(1), &mut rng);
    let survivors = set.worlds().to_vec();

    let pruned = set.execute_action(TargetedAction::lynch(PlayerId(1), role), &mut rng);
    assert_eq!(pruned, 0);
    assert_eq!(set.worlds(), survivors.as_slice());

    // Lynching through the reveal again finds no living target and is a no-op.
    assert_eq!(set.lynch_player(PlayerId(1), &mut rng), None);
    assert_eq!(set.worlds(), survivors.as_slice());
}

#[test]
fn setup_rejects_mismatched_roles() {
    let mut rng = StdRng::seed_from_u64(0);
    let result = WorldSet::new(
        10,
        roster(&["a", "b", "c"]),
        &[Role::Werewolf],
        ResolutionRules::default(),
        &mut rng,
    );
    assert!(result.is_err());
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn lynching_a_villager_removes_worlds_where_they_were_the_wolf() {
    let roles = [Role::Werewolf, Role::Villager, Role::Villager];
    let (mut set, mut rng) = generated(&["A", "B", "C"], &roles, 200, 3);
    assert_eq!(set.len(), 3);
    let a = PlayerId(0);
    let b = PlayerId(1);

    set.execute_action(TargetedAction::lynch(a, Some(Role::Villager)), &mut rng);

    assert_eq!(set.len(), 2);
    assert!(set
        .worlds()
        .iter()
        .all(|world| world.role_of(a) == Some(Role::Villager)));
    let distribution = set.role_percentages_of_player(b);
    assert_eq!(distribution[&Role::Werewolf], share(1, 2));
    assert_eq!(distribution[&Role::Villager], share(1, 2));
}

#[test]
fn seen_hamster_dies_without_being_eaten() {
    let mut set = single_world(
        &["seer", "hamster", "wolf", "villager"],
        &[Role::Seer, Role::Hamster, Role::Werewolf, Role::Villager],
        &[2],
    );
    let mut rng = StdRng::seed_from_u64(4);

    let seen = set.see_player(PlayerId(0), PlayerId(1), &mut rng);
    assert_eq!(seen, Some(Role::Hamster));

    set.end_night(&mut rng);
    assert_eq!(set.len(), 1);
    assert_eq!(set.death_percentage_of_player(PlayerId(1)), Decimal::ONE);
    assert_eq!(set.death_percentage_of_player(PlayerId(3)), Decimal::ZERO);
}

#[test]
fn only_the_first_wolf_in_priority_eats() {
    let mut set = single_world(
        &["alpha", "beta", "x", "y"],
        &[Role::Werewolf, Role::Werewolf, Role::Villager, Role::Villager],
        &[0, 1],
    );
    let mut rng = StdRng::seed_from_u64(6);

    set.execute_action(
        TargetedAction::by(PlayerId(0), Action::Eat, Some(PlayerId(2))),
        &mut rng,
    );
    set.execute_action(
        TargetedAction::by(PlayerId(1), Action::Eat, Some(PlayerId(3))),
        &mut rng,
    );
    set.end_night(&mut rng);

    assert_eq!(set.death_percentage_of_player(PlayerId(2)), Decimal::ONE);
    assert_eq!(set.death_percentage_of_player(PlayerId(3)), Decimal::ZERO);
}

#[test]
fn guarded_victim_survives_the_wolf() {
    let mut set = single_world(
        &["wolf", "guardian", "victim"],
        &[Role::Werewolf, Role::Guardian, Role::Villager],
        &[0],
    );
    let mut rng = StdRng::seed_from_u64(7);

    set.execute_action(
        TargetedAction::by(PlayerId(1), Action::Guard, Some(PlayerId(2))),
        &mut rng,
    );
    set.execute_action(
        TargetedAction::by(PlayerId(0), Action::Eat, Some(PlayerId(2))),
        &mut rng,
    );
    set.end_night(&mut rng);

    assert_eq!(set.death_percentage_of_player(PlayerId(2)), Decimal::ZERO);
    assert_eq!(set.winning_team(), None);
}

#[test]
fn events_are_grouped_per_night() {
    let roles = [Role::Werewolf, Role::Villager, Role::Villager];
    let (mut set, mut rng) = generated(&["a", "b", "c"], &roles, 50, 2);
    set.execute_action(
        TargetedAction::by(PlayerId(0), Action::Eat, Some(PlayerId(1))),
        &mut rng,
    );
    set.end_night(&mut rng);
    set.lynch_player(PlayerId(2), &mut rng);

    let nights = set.events().nights();
    assert_eq!(nights.len(), 2);
    assert_eq!(nights[0].len(), 1);
    assert_eq!(nights[1][0].action(), Action::Lynch);
}
