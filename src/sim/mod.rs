pub mod event;
pub mod runner;

pub use event::{EventDetector, EventKind, InfluenceDetector, RestDetector, SimEvent};
pub use runner::{simulate, simulate_with, step, CraftSample, Session, Systems, TickReport, World};
