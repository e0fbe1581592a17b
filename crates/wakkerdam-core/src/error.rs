//! Error types for the wakkerdam-core crate.
//!
//! Contradictions between an event and a world are never errors: they only
//! prune worlds. The errors here cover invalid game setups and controller
//! calls that make no sense in the current game state.

use wakkerdam_types::{Action, Team};

/// Errors that make a game impossible to set up. Fatal, not recoverable.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    /// The role multiset does not have one role per player.
    #[error("role count mismatch: {players} players but {roles} roles")]
    RoleCountMismatch {
        /// Number of players in the roster.
        players: usize,
        /// Number of roles supplied.
        roles: usize,
    },

    /// Two players share a name.
    #[error("duplicate player name: {0}")]
    DuplicatePlayer(String),

    /// No players were supplied.
    #[error("the roster is empty")]
    EmptyRoster,

    /// The roster is too large to address with player ids.
    #[error("roster of {0} players is too large")]
    RosterTooLarge(usize),

    /// The player count is outside the configured limits.
    #[error("player count {count} outside allowed range {min}..={max}")]
    PlayerCount {
        /// Number of players supplied.
        count: usize,
        /// Minimum allowed players.
        min: usize,
        /// Maximum allowed players.
        max: usize,
    },
}

/// Errors returned by [`crate::session::GameSession`] for calls that do not
/// fit the current game state.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// No player with this name is on the roster.
    #[error("unknown player: {0}")]
    UnknownPlayer(String),

    /// The player has already been declared dead.
    #[error("player is already dead: {0}")]
    AlreadyDead(String),

    /// The player cannot perform this action right now.
    #[error("{player} may not perform {action:?} right now")]
    ActionNotAllowed {
        /// Name of the player.
        player: String,
        /// The refused action.
        action: Action,
    },

    /// The call is only valid during the day.
    #[error("this can only be done during the day")]
    NotDay,

    /// The call is only valid during the night.
    #[error("this can only be done during the night")]
    NotNight,

    /// The game has been won and accepts no more actions.
    #[error("the game is over, the {0}s won")]
    GameOver(Team),
}
