pub mod csv;
pub mod hitbox;
pub mod json;

pub use hitbox::{load_hitboxes, parse_hitboxes, CircleHitbox, HitboxSet, PolyHitbox};
pub use json::SessionSummary;
