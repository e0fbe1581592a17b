//! Per-hypothesis world state and night resolution for Quantum Wakkerdam.
//!
//! A [`World`] is one fully consistent guess at the secret role assignment.
//! This crate owns the state machine that applies events to a single world:
//! role actions are buffered during the night, resolved in a fixed order when
//! the night finishes, and any event that contradicts the world's private
//! state marks it impossible. It performs no I/O and knows nothing about the
//! other worlds in the ensemble.
//!
//! # Modules
//!
//! - [`world`] -- The [`World`] struct, queries, and event application
//! - [`night`] -- The per-night accumulator ([`NightActions`])
//! - [`rules`] -- Switches for ambiguous resolution rules ([`ResolutionRules`])
//! - [`death`] -- Death cascade (seer succession, wild child conversion)
//! - [`resolution`] -- Night-finish resolution order

pub mod death;
pub mod night;
pub mod resolution;
pub mod rules;
pub mod world;

// Re-export primary types at crate root for convenience.
pub use night::NightActions;
pub use rules::ResolutionRules;
pub use world::World;
