//! Shared type definitions for the Quantum Wakkerdam possible-worlds engine.
//!
//! This crate is the single source of truth for the data model used across
//! the workspace: identifiers, the team/role/action catalogs, the static
//! capability tables, and the immutable event record.
//!
//! # Modules
//!
//! - [`ids`] -- Index wrappers for players and worlds
//! - [`enums`] -- [`Team`], [`Role`], and [`Action`] catalogs
//! - [`capabilities`] -- Pure lookup tables (actions per role, teams, disguises)
//! - [`event`] -- The [`TargetedAction`] event record

pub mod capabilities;
pub mod enums;
pub mod event;
pub mod ids;

// Re-export all public types at crate root for convenience.
pub use capabilities::{
    actions_of, can_be_eaten, can_perform, performing_role, seen_as, team, team_seen_as,
    wolf_title,
};
pub use enums::{Action, Role, Team};
pub use event::TargetedAction;
pub use ids::{PlayerId, WorldId};
