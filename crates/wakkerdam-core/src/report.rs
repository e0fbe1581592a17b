//! Public announcements made at the start of each period.

use core::fmt;

use serde::{Deserialize, Serialize};
use wakkerdam_types::{Role, Team};

/// One line of the period report. Player fields hold names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Announcement {
    /// The village lynched a player.
    Lynched {
        /// The lynched player.
        player: String,
        /// Role revealed on death.
        role: Option<Role>,
    },
    /// A hunter took a player along during the day.
    Shot {
        /// The player who was shot.
        player: String,
        /// Role revealed on death.
        role: Option<Role>,
    },
    /// A player died in every remaining world.
    QuantumDeath {
        /// The player who died.
        player: String,
        /// Role revealed on death.
        role: Option<Role>,
    },
    /// A seer learned a role.
    SawRole {
        /// The seer.
        seer: String,
        /// Who was looked at.
        target: String,
        /// The role shown, after disguises.
        role: Role,
    },
    /// A legacy seer learned a team.
    SawTeam {
        /// The legacy seer.
        seer: String,
        /// Who was looked at.
        target: String,
        /// The team shown, after disguises.
        team: Team,
    },
    /// A seer looked at someone already dead.
    SawDead {
        /// The seer.
        seer: String,
        /// Who was looked at.
        target: String,
    },
    /// A seer chose nobody.
    SawNobody {
        /// The seer.
        seer: String,
    },
}

fn role_name(role: Option<Role>) -> &'static str {
    role.map_or("unknown", Role::display_name)
}

impl fmt::Display for Announcement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lynched { player, role } => {
                write!(f, "{player} was lynched as {}", role_name(*role))
            }
            Self::Shot { player, role } => write!(
                f,
                "{player} was shot by a hunter, and died as {}",
                role_name(*role)
            ),
            Self::QuantumDeath { player, role } => write!(
                f,
                "{player} died due to quantum effects and was {}",
                role_name(*role)
            ),
            Self::SawRole { seer, target, role } => write!(f, "{seer} saw {target} as {role}"),
            Self::SawTeam { seer, target, team } => write!(f, "{seer} saw {target} as {team}"),
            Self::SawDead { seer, target } => write!(f, "{seer} saw {target} as dead"),
            Self::SawNobody { seer } => write!(f, "{seer} did not see anyone"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_as_english() {
        let lynched = Announcement::Lynched {
            player: "Ada".to_owned(),
            role: Some(Role::Werewolf),
        };
        assert_eq!(lynched.to_string(), "Ada was lynched as Werewolf");

        let team = Announcement::SawTeam {
            seer: "Bas".to_owned(),
            target: "Cor".to_owned(),
            team: Team::Villagers,
        };
        assert_eq!(team.to_string(), "Bas saw Cor as Villager");

        let nobody = Announcement::SawNobody {
            seer: "Bas".to_owned(),
        };
        assert_eq!(nobody.to_string(), "Bas did not see anyone");
    }
}
