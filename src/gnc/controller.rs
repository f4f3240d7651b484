use crate::config::SimConfig;
use crate::discovery::AstralObject;
use crate::vehicle::{direction_of, Craft, Intents};

use super::flight::{angular_distance, shortest_turn, RotationAction};

/// Trait for pilots: anything that produces one frame of intents.
///
/// The interactive input collaborator is one implementation; headless runs
/// and demos plug in scripted or automatic pilots instead.
pub trait Controller {
    /// Intents for `frame`, given the craft and the field of astral objects.
    fn control(&mut self, craft: &Craft, objects: &[AstralObject], frame: u64) -> Intents;

    /// Reset pilot internal state.
    fn reset(&mut self) {}

    /// Human-readable name for logging/display.
    fn name(&self) -> &str {
        "unnamed"
    }
}

// ---------------------------------------------------------------------------
// Scripted pilot: fixed timeline of intents
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct Segment {
    start: u64,
    end: u64, // exclusive
    intents: Intents,
}

#[derive(Debug, Clone, Default)]
pub struct ScriptedPilot {
    segments: Vec<Segment>,
}

impl ScriptedPilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hold `intents` for `frames` frames, starting where the previous hold ended.
    pub fn hold(mut self, intents: Intents, frames: u64) -> Self {
        let start = self.segments.last().map_or(0, |s| s.end);
        self.segments.push(Segment { start, end: start + frames, intents });
        self
    }

    /// Total scripted length in frames.
    pub fn len(&self) -> u64 {
        self.segments.last().map_or(0, |s| s.end)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Controller for ScriptedPilot {
    fn control(&mut self, _craft: &Craft, _objects: &[AstralObject], frame: u64) -> Intents {
        self.segments
            .iter()
            .find(|s| frame >= s.start && frame < s.end)
            .map_or(Intents::IDLE, |s| s.intents)
    }

    fn name(&self) -> &str {
        "ScriptedPilot"
    }
}

// ---------------------------------------------------------------------------
// Seek pilot: fly to the nearest undiscovered object and stop on it
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct SeekPilot {
    pub cruise_speed: f64,
    degrees_per_frame: f64,
    thrust_increment: f64,
}

impl SeekPilot {
    pub fn new(config: &SimConfig, cruise_speed: f64) -> Self {
        Self {
            cruise_speed,
            degrees_per_frame: config.degrees_per_frame,
            thrust_increment: config.thrust_increment,
        }
    }

    /// Distance covered while braking from `speed`, plus the frames spent
    /// turning retrograde first.
    pub fn stopping_distance(&self, speed: f64) -> f64 {
        let turn_frames = 180.0 / self.degrees_per_frame;
        let burn = if self.thrust_increment > 0.0 {
            speed * speed / (2.0 * self.thrust_increment)
        } else {
            f64::INFINITY
        };
        burn + speed * turn_frames
    }
}

impl Controller for SeekPilot {
    fn control(&mut self, craft: &Craft, objects: &[AstralObject], _frame: u64) -> Intents {
        let target = objects
            .iter()
            .filter(|o| !o.discovered)
            .map(|o| o.center())
            .min_by(|a, b| {
                let da = (a - craft.pos).norm_squared();
                let db = (b - craft.pos).norm_squared();
                da.total_cmp(&db)
            });

        let Some(target) = target else {
            return Intents::brake();
        };

        let to_target = target - craft.pos;
        let distance = to_target.norm();
        if distance <= self.stopping_distance(craft.speed()) {
            return Intents::brake();
        }

        let desired = direction_of(&to_target);
        if angular_distance(craft.facing(), desired) > self.degrees_per_frame {
            return match shortest_turn(craft.facing(), desired) {
                RotationAction::TurnLeft => Intents::left(),
                _ => Intents::right(),
            };
        }
        if craft.speed() < self.cruise_speed {
            Intents::thrust()
        } else {
            Intents::IDLE
        }
    }

    fn name(&self) -> &str {
        "SeekPilot"
    }
}
