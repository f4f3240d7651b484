//! Hidden astral objects and the proximity scan that scores them.

pub mod objects;
pub mod tracker;

pub use objects::{spawn_objects, AstralKind, AstralObject, SpawnLayout};
pub use tracker::{DiscoveryAggregate, DiscoveryTracker, Scan};
