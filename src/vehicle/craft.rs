use nalgebra::Vector2;

use crate::config::MAX_SPEED;

// ---------------------------------------------------------------------------
// Angle convention
// ---------------------------------------------------------------------------
//
// World y grows downward. Facing angles are degrees with 0 = up and positive
// rotation clockwise, so a facing of 90 points along +x. A velocity's
// movement direction in this convention is atan2(vy, vx) + 90.

/// Wrap an angle in degrees into [0, 360).
pub fn normalize_degrees(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid rounds tiny negatives up to exactly 360
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Unit vector for a facing angle.
pub fn heading_vector(angle_deg: f64) -> Vector2<f64> {
    let a = angle_deg.to_radians();
    Vector2::new(a.sin(), -a.cos())
}

/// Facing angle (degrees, [0, 360)) that points along `v`.
pub fn direction_of(v: &Vector2<f64>) -> f64 {
    normalize_degrees(v.y.atan2(v.x).to_degrees() + 90.0)
}

// ---------------------------------------------------------------------------
// Craft state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Craft {
    pub pos: Vector2<f64>,      // world units, center of the craft
    pub vel: Vector2<f64>,      // world units per frame
    pub angle: f64,             // facing, degrees, unbounded
    pub max_speed: f64,
    /// Set for frames in which any burn fired; drives the thruster flame.
    pub thrusting: bool,
    pub weapon_level: u8,       // 1 = single gun, 2 = twin guns
    spawn: Vector2<f64>,
}

impl Craft {
    pub fn new(pos: Vector2<f64>, max_speed: f64) -> Self {
        Self {
            pos,
            vel: Vector2::zeros(),
            angle: 0.0,
            max_speed,
            thrusting: false,
            weapon_level: 1,
            spawn: pos,
        }
    }

    pub fn with_velocity(mut self, vel: Vector2<f64>) -> Self {
        self.vel = vel;
        self
    }

    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    pub fn with_weapon_level(mut self, level: u8) -> Self {
        self.weapon_level = level.clamp(1, 2);
        self
    }

    pub fn speed(&self) -> f64 {
        self.vel.norm()
    }

    /// Facing normalized into [0, 360).
    pub fn facing(&self) -> f64 {
        normalize_degrees(self.angle)
    }

    pub fn spawn(&self) -> Vector2<f64> {
        self.spawn
    }

    /// Back to the spawn pose: at rest, facing up.
    pub fn reset(&mut self) {
        self.pos = self.spawn;
        self.vel = Vector2::zeros();
        self.angle = 0.0;
        self.thrusting = false;
    }
}

impl Default for Craft {
    fn default() -> Self {
        Self::new(Vector2::zeros(), MAX_SPEED)
    }
}

// ---------------------------------------------------------------------------
// Input intents (one frame's worth, produced by the input collaborator)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Intents {
    pub thrust: bool,
    pub rotate_left: bool,
    pub rotate_right: bool,
    /// Turn retrograde and burn until the craft stops.
    pub brake: bool,
    pub reset: bool,
    pub fire: bool,
}

impl Intents {
    pub const IDLE: Intents = Intents {
        thrust: false,
        rotate_left: false,
        rotate_right: false,
        brake: false,
        reset: false,
        fire: false,
    };

    pub fn thrust() -> Self {
        Self { thrust: true, ..Self::IDLE }
    }

    pub fn brake() -> Self {
        Self { brake: true, ..Self::IDLE }
    }

    pub fn left() -> Self {
        Self { rotate_left: true, ..Self::IDLE }
    }

    pub fn right() -> Self {
        Self { rotate_right: true, ..Self::IDLE }
    }

    pub fn is_idle(&self) -> bool {
        *self == Self::IDLE
    }
}
