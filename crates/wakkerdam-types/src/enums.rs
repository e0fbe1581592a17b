//! Enumeration types for teams, roles, and actions.
//!
//! These are tagged variants only. Everything a role or action *does* lives
//! in the static lookup tables of [`crate::capabilities`].

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Teams
// ---------------------------------------------------------------------------

/// One of the two sides a player can win with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Team {
    /// The village: wins when only villagers are alive.
    Villagers,
    /// The pack: wins when only werewolves are alive.
    Werewolves,
}

impl Team {
    /// Human-readable team name.
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Villagers => "Villager",
            Self::Werewolves => "Werewolf",
        }
    }
}

impl core::fmt::Display for Team {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.display_name())
    }
}

// ---------------------------------------------------------------------------
// Roles
// ---------------------------------------------------------------------------

/// A secret role a player may hold in some world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    // --- Team Villagers ---
    /// Protects one player from the werewolves each night.
    Guardian,
    /// Turns one player into a hamster each night.
    HamsterManiac,
    /// Plain villager without any action.
    Villager,
    /// A villager that is even more of a villager. No action.
    VillagingVillager,
    /// Invites a guest to spend the night at their house.
    Casanova,
    /// No action.
    EarlyBird,
    /// No action.
    Fraudster,
    /// Blesses one player each night.
    Blessed,
    /// Poisons one player, once per game.
    Witch,
    /// Takes someone along when dying.
    Hunter,
    /// Inherits the seer's sight when a seer dies.
    ApprenticeSeer,
    /// A villager that seers see as a werewolf.
    Lycan,
    /// Sees only the team of a player.
    LegacySeer,
    /// Spends the night at another player's house.
    Harlot,
    /// Cannot be eaten, but dies when seen.
    Hamster,
    /// Sees the role of a player.
    Seer,

    // --- Team Werewolves ---
    /// Eats one player each night.
    Werewolf,
    /// Curses one player each night; looks like a villager.
    Cursed,

    // --- Team switchers ---
    /// Picks a role model on the first night and turns werewolf when it dies.
    WildChild,
    /// Copies the role of a chosen player on the second night.
    Devil,
}

impl Role {
    /// Every role in catalog order.
    pub const ALL: [Self; 20] = [
        Self::Guardian,
        Self::HamsterManiac,
        Self::Villager,
        Self::VillagingVillager,
        Self::Casanova,
        Self::EarlyBird,
        Self::Fraudster,
        Self::Blessed,
        Self::Witch,
        Self::Hunter,
        Self::ApprenticeSeer,
        Self::Lycan,
        Self::LegacySeer,
        Self::Harlot,
        Self::Hamster,
        Self::Seer,
        Self::Werewolf,
        Self::Cursed,
        Self::WildChild,
        Self::Devil,
    ];

    /// Human-readable role name.
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Guardian => "Guardian",
            Self::HamsterManiac => "Hamster Maniac",
            Self::Villager => "Villager",
            Self::VillagingVillager => "Villaging Villager",
            Self::Casanova => "Casanova",
            Self::EarlyBird => "Early Bird",
            Self::Fraudster => "Fraudster",
            Self::Blessed => "Blessed",
            Self::Witch => "Witch",
            Self::Hunter => "Hunter",
            Self::ApprenticeSeer => "Apprentice Seer",
            Self::Lycan => "Lycan",
            Self::LegacySeer => "Legacy Seer",
            Self::Harlot => "Harlot",
            Self::Hamster => "Hamster",
            Self::Seer => "Seer",
            Self::Werewolf => "Werewolf",
            Self::Cursed => "Cursed",
            Self::WildChild => "Wild Child",
            Self::Devil => "Devil",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.display_name())
    }
}

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

/// Something that happens to or is done by a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    // --- Unconditional ---
    /// The village executes a player, revealing their role.
    Lynch,
    /// A player dead in every world is declared dead, revealing their role.
    QuantumDeath,
    /// Resolve everything recorded during the night.
    FinishNight,

    // --- Role actions ---
    /// Werewolf picks a victim.
    Eat,
    /// Seer learns a (disguised) role.
    See,
    /// Legacy seer learns a (disguised) team.
    LegacySee,
    /// Blessed adds one to a player's counter.
    Bless,
    /// Cursed subtracts one from a player's counter.
    Curse,
    /// Guardian protects a player.
    Guard,
    /// Casanova invites a guest over.
    Invite,
    /// Harlot sleeps at someone else's house.
    SleepWith,
    /// Hamster maniac turns a player into a hamster for the night.
    TransformToHamster,
    /// Witch kills a player.
    Poison,
    /// Hunter names who they take along.
    Shoot,
    /// Wild child picks a role model.
    FollowExample,
    /// Devil copies a role.
    DevilsChoice,
}

impl Action {
    /// Every action in catalog order.
    pub const ALL: [Self; 16] = [
        Self::Lynch,
        Self::QuantumDeath,
        Self::FinishNight,
        Self::Eat,
        Self::See,
        Self::LegacySee,
        Self::Bless,
        Self::Curse,
        Self::Guard,
        Self::Invite,
        Self::SleepWith,
        Self::TransformToHamster,
        Self::Poison,
        Self::Shoot,
        Self::FollowExample,
        Self::DevilsChoice,
    ];

    /// Verb phrase used when describing the action in a log line.
    pub const fn verb(self) -> &'static str {
        match self {
            Self::Lynch => "is lynched",
            Self::QuantumDeath => "quantum dies",
            Self::FinishNight => "finish night",
            Self::Eat => "eats",
            Self::See | Self::LegacySee => "sees",
            Self::Bless => "blesses",
            Self::Curse => "curses",
            Self::Guard => "guards",
            Self::Invite => "invites",
            Self::SleepWith => "sleeps at",
            Self::TransformToHamster => "transforms into a hamster",
            Self::Poison => "poisons",
            Self::Shoot => "shoots",
            Self::FollowExample => "follows",
            Self::DevilsChoice => "chooses",
        }
    }
}

impl core::fmt::Display for Action {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.verb())
    }
}
