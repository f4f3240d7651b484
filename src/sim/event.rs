use crate::orbital::Planet;
use crate::vehicle::Craft;

// ---------------------------------------------------------------------------
// Simulation events
// ---------------------------------------------------------------------------

/// Kinds of simulation events.
#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    Discovery { count: usize },
    AllDiscovered,
    Reset,
    CameToRest,
    /// The craft crossed into a body's gravity influence radius.
    EnteredInfluence { planet: usize, name: String },
}

/// A discrete event that occurred during simulation.
#[derive(Debug, Clone)]
pub struct SimEvent {
    pub frame: u64,
    pub kind: EventKind,
    pub craft: Craft,
}

/// Trait for passive event detectors.
/// Implementations inspect consecutive craft states against the planets as
/// they stand after the tick, and report events.
pub trait EventDetector {
    fn check(&mut self, prev: &Craft, current: &Craft, planets: &[Planet]) -> Option<EventKind>;
}

/// Detects the frame the craft stops dead.
pub struct RestDetector;

impl EventDetector for RestDetector {
    fn check(&mut self, prev: &Craft, current: &Craft, _planets: &[Planet]) -> Option<EventKind> {
        if prev.speed() > 0.0 && current.speed() == 0.0 {
            Some(EventKind::CameToRest)
        } else {
            None
        }
    }
}

/// Detects the craft crossing into a body's gravity influence radius. Fires
/// on every entry, not only the first. When several bodies are entered on
/// the same frame the lowest index is reported and the rest follow on later
/// frames while the craft is still inside them.
pub struct InfluenceDetector {
    pub influence_per_mass: f64,
    inside: Vec<bool>,
}

impl InfluenceDetector {
    pub fn new(influence_per_mass: f64) -> Self {
        Self { influence_per_mass, inside: Vec::new() }
    }

    fn within(&self, craft: &Craft, planet: &Planet) -> bool {
        let reach = planet.mass * self.influence_per_mass;
        (planet.pos - craft.pos).norm_squared() < reach * reach
    }
}

impl EventDetector for InfluenceDetector {
    fn check(&mut self, prev: &Craft, current: &Craft, planets: &[Planet]) -> Option<EventKind> {
        if self.inside.len() != planets.len() {
            // first look: wherever the craft already is does not count as entering
            self.inside = planets.iter().map(|p| self.within(prev, p)).collect();
        }

        let mut entered = None;
        for (i, planet) in planets.iter().enumerate() {
            let now = self.within(current, planet);
            if !now {
                self.inside[i] = false;
            } else if !self.inside[i] && entered.is_none() {
                self.inside[i] = true;
                entered = Some(EventKind::EnteredInfluence { planet: i, name: planet.name.clone() });
            }
        }
        entered
    }
}
