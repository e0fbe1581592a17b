//! The game's event log: an append-only record of every broadcast event.
//!
//! # Design
//!
//! - **Append-only**: entries are never modified or deleted.
//! - **Total order**: entries are stored in broadcast order.
//! - **Plain data**: the log serializes as a list of [`TargetedAction`]s.

use serde::{Deserialize, Serialize};
use wakkerdam_types::{Action, PlayerId, TargetedAction};

use crate::roster::Roster;

/// Every event broadcast to the ensemble, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLog {
    entries: Vec<TargetedAction>,
}

impl EventLog {
    /// Create an empty log.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Number of events recorded.
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has happened yet.
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All events in broadcast order.
    pub fn entries(&self) -> &[TargetedAction] {
        &self.entries
    }

    /// Append an event.
    pub(crate) fn append(&mut self, event: TargetedAction) {
        self.entries.push(event);
    }

    /// Events grouped per period, split on night-finish markers.
    ///
    /// The first group is night 1; each later group holds the day and the
    /// night that follows it. Night-finish markers themselves are left out.
    /// The last group is the period in progress and may be empty.
    pub fn nights(&self) -> Vec<&[TargetedAction]> {
        self.entries
            .split(|event| event.action() == Action::FinishNight)
            .collect()
    }
}

/// Human-readable English description of `event`.
pub fn describe(event: &TargetedAction, roster: &Roster) -> String {
    let name = |player: Option<PlayerId>| {
        player
            .and_then(|id| roster.name(id))
            .unwrap_or("no one")
            .to_owned()
    };
    let performer = name(event.performer());
    let target = name(event.target());

    match event.action() {
        Action::Lynch => event.revealed_role().map_or_else(
            || format!("{target} is lynched"),
            |role| format!("{target} is lynched as {role}"),
        ),
        Action::QuantumDeath => event.revealed_role().map_or_else(
            || format!("{target} dies due to quantum mechanics"),
            |role| format!("{target} dies due to quantum mechanics as {role}"),
        ),
        Action::FinishNight => "the night ends".to_owned(),
        Action::See if event.target().is_some() => {
            let seen = event
                .revealed_role()
                .map_or_else(|| "dead".to_owned(), |role| role.to_string());
            format!("{performer} sees {target} as {seen}")
        }
        Action::LegacySee if event.target().is_some() => {
            let seen = event
                .revealed_team()
                .map_or_else(|| "dead".to_owned(), |team| team.to_string());
            format!("{performer} sees {target} as {seen}")
        }
        Action::TransformToHamster => {
            format!("{performer} transforms {target} into a hamster")
        }
        other => format!("{performer} {} {target}", other.verb()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use wakkerdam_types::{Role, Team};

    use super::*;

    fn roster() -> Roster {
        Roster::new(vec!["Ada".to_owned(), "Bas".to_owned()]).unwrap()
    }

    #[test]
    fn nights_split_on_finish_markers() {
        let mut log = EventLog::new();
        log.append(TargetedAction::by(PlayerId(0), Action::Eat, Some(PlayerId(1))));
        log.append(TargetedAction::finish_night());
        log.append(TargetedAction::lynch(PlayerId(0), Some(Role::Werewolf)));
        log.append(TargetedAction::by(PlayerId(1), Action::Guard, Some(PlayerId(0))));

        let nights = log.nights();
        assert_eq!(nights.len(), 2);
        assert_eq!(nights.first().map(|n| n.len()), Some(1));
        assert_eq!(nights.get(1).map(|n| n.len()), Some(2));
        assert_eq!(log.len(), 4);
    }

    #[test]
    fn describes_events() {
        let roster = roster();
        let lynch = TargetedAction::lynch(PlayerId(1), Some(Role::Hunter));
        assert_eq!(describe(&lynch, &roster), "Bas is lynched as Hunter");

        let seen = TargetedAction::see(PlayerId(0), PlayerId(1), None);
        assert_eq!(describe(&seen, &roster), "Ada sees Bas as dead");

        let old = TargetedAction::legacy_see(PlayerId(0), PlayerId(1), Some(Team::Werewolves));
        assert_eq!(describe(&old, &roster), "Ada sees Bas as Werewolf");

        let guard = TargetedAction::by(PlayerId(0), Action::Guard, None);
        assert_eq!(describe(&guard, &roster), "Ada guards no one");
    }
}
