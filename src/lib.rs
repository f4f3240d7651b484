//! 2D craft flight and orbital simulation core.
//!
//! One [`sim::step`] per rendered frame: flight input, heuristic gravity,
//! speed clamp, position integration, planet orbits, then the discovery
//! scan. [`sim::Session`] wraps the step with a generated world and an
//! event log for headless runs.

pub mod arena;
pub mod config;
pub mod discovery;
pub mod error;
pub mod gnc;
pub mod io;
pub mod orbital;
pub mod physics;
pub mod sim;
pub mod vehicle;

pub use config::SimConfig;
pub use error::{SimError, SimResult};
