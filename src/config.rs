//! Runtime tunables for the flight and orbital simulation.
//!
//! [`SimConfig`] mirrors every constant the tick reads. A TOML file may
//! override any subset of fields; missing keys fall back to the defaults
//! below, so a minimal file can retune just the gravity model.
//!
//! ```toml
//! degrees_per_frame = 4.0
//! gravity_factor = 5e11
//! seed = 7
//! ```

use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

pub const DEGREES_PER_FRAME: f64 = 5.0;
pub const ANGLE_EPSILON: f64 = 1e-3;
pub const THRUST_INCREMENT: f64 = 0.1;
pub const MAX_SPEED: f64 = 20.0;
pub const STOP_SPEED: f64 = 0.2;
pub const MIN_DIRECTION_SPEED: f64 = 0.01;
pub const CRAFT_MASS: f64 = 10.0;

pub const GRAVITY_CONSTANT: f64 = 6.674e-11;
pub const GRAVITY_FACTOR: f64 = 1e12;
pub const GRAVITY_DAMPING: f64 = 1.0;
pub const SOFTENING: f64 = 100.0;
pub const INFLUENCE_PER_MASS: f64 = 400.0;
pub const DOMINANT_PER_MASS: f64 = 10.0;

pub const ORBIT_SPEED_MULTIPLIER: f64 = 1e-5;
pub const DISCOVERY_FRACTION: f64 = 0.5;

pub const BULLET_SPEED: f64 = 12.0;
pub const BULLET_RANGE: f64 = 2_000.0;

pub const DEFAULT_SEED: u64 = 0x5EED;

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // ── Flight ──────────────────────────────────────────────────────────────
    pub degrees_per_frame: f64,
    pub angle_epsilon: f64,
    pub thrust_increment: f64,
    pub max_speed: f64,
    /// Below this speed an aligned brake burn zeroes the velocity instead.
    pub stop_speed: f64,
    /// Below this speed the movement direction is undefined.
    pub min_direction_speed: f64,
    pub craft_mass: f64,

    // ── Gravity ─────────────────────────────────────────────────────────────
    pub gravity_constant: f64,
    pub gravity_factor: f64,
    pub gravity_damping: f64,
    pub softening: f64,
    pub influence_per_mass: f64,
    pub dominant_per_mass: f64,

    // ── Orbits ──────────────────────────────────────────────────────────────
    pub orbit_speed_multiplier: f64,

    // ── Discovery ───────────────────────────────────────────────────────────
    pub discovery_fraction: f64,

    // ── Weapons ─────────────────────────────────────────────────────────────
    pub bullet_speed: f64,
    pub bullet_range: f64,

    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            degrees_per_frame: DEGREES_PER_FRAME,
            angle_epsilon: ANGLE_EPSILON,
            thrust_increment: THRUST_INCREMENT,
            max_speed: MAX_SPEED,
            stop_speed: STOP_SPEED,
            min_direction_speed: MIN_DIRECTION_SPEED,
            craft_mass: CRAFT_MASS,
            gravity_constant: GRAVITY_CONSTANT,
            gravity_factor: GRAVITY_FACTOR,
            gravity_damping: GRAVITY_DAMPING,
            softening: SOFTENING,
            influence_per_mass: INFLUENCE_PER_MASS,
            dominant_per_mass: DOMINANT_PER_MASS,
            orbit_speed_multiplier: ORBIT_SPEED_MULTIPLIER,
            discovery_fraction: DISCOVERY_FRACTION,
            bullet_speed: BULLET_SPEED,
            bullet_range: BULLET_RANGE,
            seed: DEFAULT_SEED,
        }
    }
}

impl SimConfig {
    /// Parse a TOML document, then validate it.
    pub fn from_toml_str(text: &str) -> SimResult<Self> {
        let config: SimConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> SimResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| SimError::io(path, e))?;
        let config = Self::from_toml_str(&text)?;
        debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Reject tunables that make the tick unstable or divide by zero.
    pub fn validate(&self) -> SimResult<()> {
        check("degrees_per_frame", self.degrees_per_frame, "(0, 180]", |v| v > 0.0 && v <= 180.0)?;
        check("angle_epsilon", self.angle_epsilon, "[0, 1)", |v| (0.0..1.0).contains(&v))?;
        check("thrust_increment", self.thrust_increment, "[0, inf)", |v| v >= 0.0)?;
        check("max_speed", self.max_speed, "(0, inf)", |v| v > 0.0)?;
        check("stop_speed", self.stop_speed, "[0, inf)", |v| v >= 0.0)?;
        check("min_direction_speed", self.min_direction_speed, "[0, inf)", |v| v >= 0.0)?;
        check("craft_mass", self.craft_mass, "(0, inf)", |v| v > 0.0)?;
        check("gravity_factor", self.gravity_factor, "[0, inf)", |v| v >= 0.0)?;
        check("gravity_damping", self.gravity_damping, "(0, inf)", |v| v > 0.0)?;
        check("softening", self.softening, "(0, inf)", |v| v > 0.0)?;
        check("influence_per_mass", self.influence_per_mass, "[0, inf)", |v| v >= 0.0)?;
        check("dominant_per_mass", self.dominant_per_mass, "[0, inf)", |v| v >= 0.0)?;
        check("orbit_speed_multiplier", self.orbit_speed_multiplier, "[0, inf)", |v| v >= 0.0)?;
        check("discovery_fraction", self.discovery_fraction, "[0, inf)", |v| v >= 0.0)?;
        check("bullet_range", self.bullet_range, "[0, inf)", |v| v >= 0.0)?;
        Ok(())
    }
}

fn check(
    name: &'static str,
    value: f64,
    safe_range: &'static str,
    ok: impl Fn(f64) -> bool,
) -> SimResult<()> {
    if value.is_finite() && ok(value) {
        Ok(())
    } else {
        Err(SimError::UnsafeConstant { name, value, safe_range })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = SimConfig::from_toml_str("degrees_per_frame = 3.0\nseed = 42\n").unwrap();
        assert_eq!(config.degrees_per_frame, 3.0);
        assert_eq!(config.seed, 42);
        assert_eq!(config.max_speed, MAX_SPEED);
        assert_eq!(config.softening, SOFTENING);
    }

    #[test]
    fn rejects_zero_rotation_rate() {
        let err = SimConfig::from_toml_str("degrees_per_frame = 0.0").unwrap_err();
        assert!(matches!(err, SimError::UnsafeConstant { name: "degrees_per_frame", .. }));
    }

    #[test]
    fn rejects_malformed_toml() {
        let err = SimConfig::from_toml_str("max_speed = \"fast\"").unwrap_err();
        assert!(matches!(err, SimError::Config(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = SimConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, SimError::Io { .. }));
    }
}
