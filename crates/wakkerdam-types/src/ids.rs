//! Type-safe index wrappers for players and worlds.
//!
//! Players are addressed by their position in the fixed roster and worlds by
//! the index they were generated with. Both are plain `u32` values so that
//! every world can store per-player state in dense vectors instead of maps
//! keyed by name.

use serde::{Deserialize, Serialize};

/// Generates a newtype wrapper around a `u32` index with standard derives.
macro_rules! define_index {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub u32);

        impl $name {
            /// Wrap a raw index.
            pub const fn new(raw: u32) -> Self {
                Self(raw)
            }

            /// Return the index as a `usize` for slice lookups.
            pub const fn index(self) -> usize {
                self.0 as usize
            }

            /// Return the inner `u32` value.
            pub const fn into_inner(self) -> u32 {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u32> for $name {
            fn from(raw: u32) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for u32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_index! {
    /// Position of a player in the game roster.
    PlayerId
}

define_index! {
    /// Identifier of a world, assigned at ensemble creation.
    WorldId
}

impl PlayerId {
    /// Convert a roster position into a player id.
    ///
    /// Returns `None` when the position does not fit in a `u32`.
    pub fn from_position(position: usize) -> Option<Self> {
        u32::try_from(position).ok().map(Self)
    }
}

impl WorldId {
    /// Convert a generation counter into a world id.
    ///
    /// Returns `None` when the counter does not fit in a `u32`.
    pub fn from_position(position: usize) -> Option<Self> {
        u32::try_from(position).ok().map(Self)
    }
}
