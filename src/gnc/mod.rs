pub mod controller;
pub mod flight;

pub use controller::{Controller, ScriptedPilot, SeekPilot};
pub use flight::{angular_distance, clamp_speed, shortest_turn, FlightController, RotationAction};
