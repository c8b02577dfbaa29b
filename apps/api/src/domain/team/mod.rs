// Team domain module
// Contains the team aggregate root, its players and sorting value objects

#![allow(clippy::module_inception)]

pub mod player;
pub mod team;
pub mod value_objects;

// Re-export main types for convenience
pub use player::Player;
pub use team::Team;
pub use value_objects::{SortDirection, SortField};
