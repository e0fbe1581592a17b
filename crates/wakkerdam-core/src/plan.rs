//! Night actions chosen by players but not yet executed.

use serde::{Deserialize, Serialize};
use wakkerdam_types::{Action, PlayerId};

/// One pending choice: `performer` will do `action` to `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedAction {
    /// Who acts.
    pub performer: PlayerId,
    /// What they do.
    pub action: Action,
    /// Who they do it to.
    pub target: PlayerId,
}

/// At most one target per performer and action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NightPlan {
    entries: Vec<PlannedAction>,
}

impl NightPlan {
    /// Create an empty plan.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Choose `target`, replacing any earlier choice for the same action.
    pub fn set(&mut self, performer: PlayerId, action: Action, target: PlayerId) {
        let planned = PlannedAction {
            performer,
            action,
            target,
        };
        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|entry| entry.performer == performer && entry.action == action)
        {
            *entry = planned;
            return;
        }
        self.entries.push(planned);
    }

    /// Forget the choice for this performer and action.
    pub fn remove(&mut self, performer: PlayerId, action: Action) {
        self.entries
            .retain(|entry| entry.performer != performer || entry.action != action);
    }

    /// The chosen target, if any.
    pub fn target(&self, performer: PlayerId, action: Action) -> Option<PlayerId> {
        self.entries
            .iter()
            .find(|entry| entry.performer == performer && entry.action == action)
            .map(|entry| entry.target)
    }

    /// Every pending choice, in the order they were first made.
    pub fn entries(&self) -> &[PlannedAction] {
        &self.entries
    }

    /// Drop every choice.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_choice_replaces_earlier() {
        let mut plan = NightPlan::new();
        plan.set(PlayerId(0), Action::Eat, PlayerId(1));
        plan.set(PlayerId(0), Action::Eat, PlayerId(2));
        plan.set(PlayerId(0), Action::Guard, PlayerId(3));
        assert_eq!(plan.target(PlayerId(0), Action::Eat), Some(PlayerId(2)));
        assert_eq!(plan.entries().len(), 2);

        plan.remove(PlayerId(0), Action::Eat);
        assert_eq!(plan.target(PlayerId(0), Action::Eat), None);
        assert_eq!(plan.target(PlayerId(0), Action::Guard), Some(PlayerId(3)));

        plan.clear();
        assert!(plan.entries().is_empty());
    }
}
