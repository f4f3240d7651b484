pub mod planet;
pub mod propagator;

pub use planet::{presets, Planet, Planets, SolarSystemBuilder, SUN};
pub use propagator::{advance, check_orbit_rate, max_step, propagate};
