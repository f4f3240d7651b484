use crate::config::SimConfig;
use crate::vehicle::{direction_of, heading_vector, normalize_degrees, Craft, Intents};

// ---------------------------------------------------------------------------
// Rotation decision
// ---------------------------------------------------------------------------

/// One frame's worth of attitude/burn command from the brake autopilot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationAction {
    /// Counter-clockwise (facing angle decreases).
    TurnLeft,
    /// Clockwise (facing angle increases).
    TurnRight,
    Thrust,
    DoNothing,
}

/// Pick the turn direction along the arc of at most 180 degrees.
/// Both angles must already be normalized into [0, 360).
pub fn shortest_turn(current: f64, target: f64) -> RotationAction {
    if target > current {
        if target - current > 180.0 {
            RotationAction::TurnLeft
        } else {
            RotationAction::TurnRight
        }
    } else if current - target > 180.0 {
        RotationAction::TurnRight
    } else {
        RotationAction::TurnLeft
    }
}

/// Unsigned angular distance in degrees, wrap-aware, in [0, 180].
pub fn angular_distance(a: f64, b: f64) -> f64 {
    let d = normalize_degrees(a - b);
    d.min(360.0 - d)
}

// ---------------------------------------------------------------------------
// Flight controller
// ---------------------------------------------------------------------------

/// Turns intents into rotation and velocity changes on the craft.
#[derive(Debug, Clone)]
pub struct FlightController {
    pub degrees_per_frame: f64,
    pub angle_epsilon: f64,
    pub thrust_increment: f64,
    pub stop_speed: f64,
    pub min_direction_speed: f64,
}

impl FlightController {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            degrees_per_frame: config.degrees_per_frame,
            angle_epsilon: config.angle_epsilon,
            thrust_increment: config.thrust_increment,
            stop_speed: config.stop_speed,
            min_direction_speed: config.min_direction_speed,
        }
    }

    /// Direction of travel in the facing convention. When the craft is
    /// (nearly) at rest this falls back to the reverse of its facing.
    pub fn movement_direction(&self, craft: &Craft) -> f64 {
        if craft.speed() < self.min_direction_speed {
            normalize_degrees(craft.angle + 180.0)
        } else {
            direction_of(&craft.vel)
        }
    }

    /// Facing needed for a retrograde burn.
    pub fn brake_target(&self, craft: &Craft) -> f64 {
        normalize_degrees(self.movement_direction(craft) + 180.0)
    }

    /// Brake state machine. Snaps the facing once aligned and zeroes the
    /// velocity when the craft is slow enough to stop outright.
    pub fn decide_rotation(&self, craft: &mut Craft) -> RotationAction {
        let target = self.brake_target(craft);
        let current = craft.facing();

        if angular_distance(current, target) <= self.degrees_per_frame + self.angle_epsilon {
            craft.angle = target;
            if craft.speed() < self.stop_speed {
                craft.vel.fill(0.0);
                return RotationAction::DoNothing;
            }
            return RotationAction::Thrust;
        }
        shortest_turn(current, target)
    }

    /// Apply one frame of rotation for a turn action; other actions are ignored.
    pub fn rotate(&self, craft: &mut Craft, action: RotationAction) {
        match action {
            RotationAction::TurnLeft => craft.angle -= self.degrees_per_frame,
            RotationAction::TurnRight => craft.angle += self.degrees_per_frame,
            RotationAction::Thrust | RotationAction::DoNothing => {}
        }
    }

    /// One burn along `angle` (degrees, facing convention).
    pub fn apply_thrust(&self, craft: &mut Craft, angle: f64) {
        craft.vel += heading_vector(angle) * self.thrust_increment;
        craft.thrusting = true;
    }

    /// Run one frame of flight input. Brake overrides manual rotation and
    /// thrust; the brake decision is returned when it ran.
    pub fn apply_intents(&self, craft: &mut Craft, intents: &Intents) -> Option<RotationAction> {
        craft.thrusting = false;

        if intents.brake {
            let action = self.decide_rotation(craft);
            match action {
                RotationAction::Thrust => {
                    let angle = craft.angle;
                    self.apply_thrust(craft, angle);
                }
                _ => self.rotate(craft, action),
            }
            return Some(action);
        }

        if intents.rotate_left {
            self.rotate(craft, RotationAction::TurnLeft);
        }
        if intents.rotate_right {
            self.rotate(craft, RotationAction::TurnRight);
        }
        if intents.thrust {
            let angle = craft.angle;
            self.apply_thrust(craft, angle);
        }
        None
    }
}

impl Default for FlightController {
    fn default() -> Self {
        Self::new(&SimConfig::default())
    }
}

/// Rescale the velocity to `max_speed` if it is faster, keeping its direction.
pub fn clamp_speed(craft: &mut Craft, max_speed: f64) {
    let speed = craft.speed();
    if speed > max_speed && speed > 0.0 {
        craft.vel *= max_speed / speed;
    }
}
