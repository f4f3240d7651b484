pub mod craft;
pub mod bullets;

pub use craft::{direction_of, heading_vector, normalize_degrees, Craft, Intents};
pub use bullets::{Bullet, Bullets};
