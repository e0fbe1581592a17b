//! The immutable event record broadcast to every world.
//!
//! A [`TargetedAction`] describes one occurrence: who did what to whom, and
//! optionally which role or team was revealed about the target. Fields are
//! private and there are no setters; once an event is built it is only ever
//! read, copied into the audit log, and applied.

use serde::{Deserialize, Serialize};

use crate::enums::{Action, Role, Team};
use crate::ids::PlayerId;

/// One game occurrence, optionally carrying a revealed fact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetedAction {
    performer: Option<PlayerId>,
    action: Action,
    target: Option<PlayerId>,
    revealed_role: Option<Role>,
    revealed_team: Option<Team>,
}

impl TargetedAction {
    /// An action performed by `performer` on an optional `target`, revealing
    /// nothing.
    pub const fn by(performer: PlayerId, action: Action, target: Option<PlayerId>) -> Self {
        Self {
            performer: Some(performer),
            action,
            target,
            revealed_role: None,
            revealed_team: None,
        }
    }

    /// The village lynches `target`. `role` is `None` when no world could
    /// supply a value.
    pub const fn lynch(target: PlayerId, role: Option<Role>) -> Self {
        Self {
            performer: None,
            action: Action::Lynch,
            target: Some(target),
            revealed_role: role,
            revealed_team: None,
        }
    }

    /// `target` is dead in every world and is declared dead as `role`.
    pub const fn quantum_death(target: PlayerId, role: Option<Role>) -> Self {
        Self {
            performer: None,
            action: Action::QuantumDeath,
            target: Some(target),
            revealed_role: role,
            revealed_team: None,
        }
    }

    /// End of the night: resolve everything recorded since the last one.
    pub const fn finish_night() -> Self {
        Self {
            performer: None,
            action: Action::FinishNight,
            target: None,
            revealed_role: None,
            revealed_team: None,
        }
    }

    /// A seer looks at `target` and sees `role` (`None` if the target was
    /// dead in every relevant world).
    pub const fn see(performer: PlayerId, target: PlayerId, role: Option<Role>) -> Self {
        Self {
            performer: Some(performer),
            action: Action::See,
            target: Some(target),
            revealed_role: role,
            revealed_team: None,
        }
    }

    /// A legacy seer looks at `target` and sees `team`.
    pub const fn legacy_see(performer: PlayerId, target: PlayerId, team: Option<Team>) -> Self {
        Self {
            performer: Some(performer),
            action: Action::LegacySee,
            target: Some(target),
            revealed_role: None,
            revealed_team: team,
        }
    }

    /// Who performed the action, if anyone.
    pub const fn performer(&self) -> Option<PlayerId> {
        self.performer
    }

    /// What happened.
    pub const fn action(&self) -> Action {
        self.action
    }

    /// Who it happened to, if anyone.
    pub const fn target(&self) -> Option<PlayerId> {
        self.target
    }

    /// The role revealed about the target, if any.
    pub const fn revealed_role(&self) -> Option<Role> {
        self.revealed_role
    }

    /// The team revealed about the target, if any.
    pub const fn revealed_team(&self) -> Option<Team> {
        self.revealed_team
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_fill_expected_fields() {
        let seer = PlayerId(0);
        let target = PlayerId(3);

        let seen = TargetedAction::see(seer, target, Some(Role::Lycan));
        assert_eq!(seen.performer(), Some(seer));
        assert_eq!(seen.action(), Action::See);
        assert_eq!(seen.target(), Some(target));
        assert_eq!(seen.revealed_role(), Some(Role::Lycan));
        assert_eq!(seen.revealed_team(), None);

        let night = TargetedAction::finish_night();
        assert_eq!(night.performer(), None);
        assert_eq!(night.target(), None);
    }

    #[test]
    fn serializes_with_optional_fields() {
        let event = TargetedAction::legacy_see(PlayerId(1), PlayerId(2), Some(Team::Werewolves));
        let json = serde_json::to_value(event).ok();
        let json = json.unwrap_or_default();
        assert_eq!(json["action"], "legacy_see");
        assert_eq!(json["revealed_team"], "werewolves");
        assert!(json["revealed_role"].is_null());
    }
}
