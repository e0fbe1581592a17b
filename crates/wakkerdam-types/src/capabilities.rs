//! Static capability tables for roles and actions.
//!
//! Pure lookups, no state. Every rule that depends on *which* role a player
//! holds (what they may do, which side they win with, how seers perceive
//! them) is answered here so that the per-world engine never matches on role
//! behavior itself.

use crate::enums::{Action, Role, Team};

/// Actions the given role may perform.
///
/// Most roles have at most one action. Roles without a night action return an
/// empty slice.
pub const fn actions_of(role: Role) -> &'static [Action] {
    match role {
        Role::Guardian => &[Action::Guard],
        Role::HamsterManiac => &[Action::TransformToHamster],
        Role::Blessed => &[Action::Bless],
        Role::Casanova => &[Action::Invite],
        Role::Witch => &[Action::Poison],
        Role::Hunter => &[Action::Shoot],
        Role::LegacySeer => &[Action::LegacySee],
        Role::Harlot => &[Action::SleepWith],
        Role::Seer => &[Action::See],
        Role::Werewolf => &[Action::Eat],
        Role::Cursed => &[Action::Curse],
        Role::WildChild => &[Action::FollowExample],
        Role::Devil => &[Action::DevilsChoice],
        Role::Villager
        | Role::VillagingVillager
        | Role::EarlyBird
        | Role::Fraudster
        | Role::ApprenticeSeer
        | Role::Lycan
        | Role::Hamster => &[],
    }
}

/// Whether `role` may perform `action`.
pub fn can_perform(role: Role, action: Action) -> bool {
    actions_of(role).contains(&action)
}

/// The role required to perform `action`, or `None` for the unconditional
/// actions (lynch, quantum death, night finish).
pub const fn performing_role(action: Action) -> Option<Role> {
    match action {
        Action::Lynch | Action::QuantumDeath | Action::FinishNight => None,
        Action::Eat => Some(Role::Werewolf),
        Action::See => Some(Role::Seer),
        Action::LegacySee => Some(Role::LegacySeer),
        Action::Bless => Some(Role::Blessed),
        Action::Curse => Some(Role::Cursed),
        Action::Guard => Some(Role::Guardian),
        Action::Invite => Some(Role::Casanova),
        Action::SleepWith => Some(Role::Harlot),
        Action::TransformToHamster => Some(Role::HamsterManiac),
        Action::Poison => Some(Role::Witch),
        Action::Shoot => Some(Role::Hunter),
        Action::FollowExample => Some(Role::WildChild),
        Action::DevilsChoice => Some(Role::Devil),
    }
}

/// Whether `action` applies in every world regardless of who performs it.
pub const fn is_unconditional(action: Action) -> bool {
    performing_role(action).is_none()
}

/// The team a role wins with.
pub const fn team(role: Role) -> Team {
    match role {
        Role::Werewolf | Role::Cursed => Team::Werewolves,
        _ => Team::Villagers,
    }
}

/// How the role appears to a seer.
pub const fn seen_as(role: Role) -> Role {
    match role {
        Role::Lycan => Role::Werewolf,
        Role::Cursed => Role::Villager,
        other => other,
    }
}

/// How the role's team appears to a legacy seer.
pub const fn team_seen_as(role: Role) -> Team {
    team(seen_as(role))
}

/// Whether werewolves can eat a player holding this role.
pub fn can_be_eaten(role: Role) -> bool {
    role != Role::Werewolf
}

/// Whether this role inherits a seer's sight when a seer dies.
pub fn is_seer_successor(role: Role) -> bool {
    role == Role::ApprenticeSeer
}

/// Whether the death of this role hands its sight to an apprentice.
pub const fn passes_sight_on(role: Role) -> bool {
    matches!(role, Role::Seer | Role::LegacySeer)
}

/// Whether a devil copies this role, rather than becoming a plain villager.
pub const fn devil_copies(role: Role) -> bool {
    matches!(
        role,
        Role::Seer | Role::LegacySeer | Role::Werewolf | Role::ApprenticeSeer
    )
}

/// Rank names used when presenting the werewolf priority order.
const WOLF_TITLES: [&str; 24] = [
    "Alpha", "Beta", "Gamma", "Delta", "Epsilon", "Zeta", "Eta", "Theta", "Iota", "Kappa",
    "Lambda", "Mu", "Nu", "Xi", "Omicron", "Pi", "Rho", "Sigma", "Tau", "Upsilon", "Phi", "Chi",
    "Psi", "Omega",
];

/// Title of the werewolf at `rank` in the priority order.
///
/// Falls back to the number itself past the end of the Greek alphabet.
pub fn wolf_title(rank: usize) -> String {
    WOLF_TITLES
        .get(rank)
        .map_or_else(|| rank.to_string(), |title| (*title).to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_role_action_points_back_to_its_role() {
        for role in Role::ALL {
            for action in actions_of(role) {
                assert_eq!(performing_role(*action), Some(role), "{action:?}");
            }
        }
    }

    #[test]
    fn every_targeted_action_has_one_performer() {
        for action in Action::ALL {
            match performing_role(action) {
                Some(role) => assert!(can_perform(role, action)),
                None => assert!(is_unconditional(action)),
            }
        }
    }

    #[test]
    fn disguises() {
        assert_eq!(seen_as(Role::Lycan), Role::Werewolf);
        assert_eq!(seen_as(Role::Cursed), Role::Villager);
        assert_eq!(seen_as(Role::Hamster), Role::Hamster);
        assert_eq!(team_seen_as(Role::Lycan), Team::Werewolves);
        assert_eq!(team_seen_as(Role::Cursed), Team::Villagers);
        assert_eq!(team_seen_as(Role::Werewolf), Team::Werewolves);
        assert_eq!(team_seen_as(Role::Seer), Team::Villagers);
    }

    #[test]
    fn teams() {
        assert_eq!(team(Role::Cursed), Team::Werewolves);
        assert_eq!(team(Role::Lycan), Team::Villagers);
        assert_eq!(team(Role::Devil), Team::Villagers);
    }

    #[test]
    fn only_werewolves_are_inedible() {
        for role in Role::ALL {
            assert_eq!(can_be_eaten(role), role != Role::Werewolf);
        }
    }

    #[test]
    fn wolf_titles_fall_back_to_numbers() {
        assert_eq!(wolf_title(0), "Alpha");
        assert_eq!(wolf_title(23), "Omega");
        assert_eq!(wolf_title(24), "24");
    }
}
