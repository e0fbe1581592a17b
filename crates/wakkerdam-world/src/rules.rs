//! Tunable resolution rules applied by every world.
//!
//! The defaults reproduce the house rules the game has always been played
//! with. Each flag names an alternative reading of a rule so that a game
//! setup can opt into it explicitly; nothing changes unless a flag is set.

use serde::{Deserialize, Serialize};

/// Switches for the ambiguous corners of night resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionRules {
    /// Only let a hunter's recorded shot fire when the hunter died this
    /// night (default: `false`, every recorded shot fires and chains).
    #[serde(default)]
    pub mutual_kill_requires_death: bool,

    /// Move every bless/curse counter one step toward zero at the end of
    /// each night (default: `false`, counters accumulate for the whole game).
    #[serde(default)]
    pub bless_decays_each_night: bool,
}
