//! Possible-worlds ensemble, statistics, and game session for Quantum
//! Wakkerdam.
//!
//! The secret role assignment of a Quantum Wakkerdam game is never fixed.
//! Instead the game keeps an ensemble of candidate worlds, broadcasts every
//! event to all of them, and prunes the ones the event contradicts. What the
//! players see (role and death percentages, the winner) is computed over
//! the worlds that remain.
//!
//! # Modules
//!
//! - [`ensemble`] -- The [`WorldSet`]: construction, broadcast, reveals
//! - [`stats`] -- Role and death percentages, consensus winner
//! - [`session`] -- The controller-facing [`GameSession`]
//! - [`plan`] -- Pending night choices ([`NightPlan`])
//! - [`report`] -- Period announcements ([`Announcement`])
//! - [`roster`] -- Player names ([`Roster`])
//! - [`log`] -- The append-only [`EventLog`] and event descriptions
//! - [`config`] -- YAML configuration ([`GameConfig`])
//! - [`error`] -- Setup and session errors

pub mod config;
pub mod ensemble;
pub mod error;
pub mod log;
pub mod plan;
pub mod report;
pub mod roster;
pub mod session;
pub mod stats;

pub use config::{ConfigError, GameConfig};
pub use ensemble::WorldSet;
pub use error::{SessionError, SetupError};
pub use log::{EventLog, describe};
pub use plan::{NightPlan, PlannedAction};
pub use report::Announcement;
pub use roster::Roster;
pub use session::{DeathOutcome, GameSession, SessionSnapshot};
pub use stats::RoleDistribution;
