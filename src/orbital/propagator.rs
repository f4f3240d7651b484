use std::f64::consts::TAU;

use nalgebra::Vector2;

use super::planet::Planet;
use crate::error::{SimError, SimResult};

/// Advance every planet one frame along its circular orbit.
///
/// The sun stays pinned at the origin. Angles only grow, so a single
/// subtraction keeps them in [0, 2pi) while each step is under a full turn;
/// a larger step falls back to a full wrap.
pub fn advance(planets: &mut [Planet], speed_multiplier: f64) {
    for planet in planets.iter_mut() {
        if planet.is_sun() {
            planet.pos = Vector2::zeros();
            continue;
        }
        planet.orbit_angle += planet.angular_speed * speed_multiplier;
        if planet.orbit_angle >= TAU {
            planet.orbit_angle -= TAU;
        }
        if !(0.0..TAU).contains(&planet.orbit_angle) {
            planet.orbit_angle = planet.orbit_angle.rem_euclid(TAU);
        }
        planet.pos = planet.orbit_position();
    }
}

/// Largest angle (rad) any orbiting planet sweeps in one frame.
pub fn max_step(planets: &[Planet], speed_multiplier: f64) -> f64 {
    planets
        .iter()
        .filter(|p| !p.is_sun())
        .map(|p| (p.angular_speed * speed_multiplier).abs())
        .fold(0.0, f64::max)
}

/// Reject a multiplier that would sweep some planet a full turn per frame.
pub fn check_orbit_rate(planets: &[Planet], speed_multiplier: f64) -> SimResult<()> {
    if max_step(planets, speed_multiplier) < TAU {
        Ok(())
    } else {
        Err(SimError::UnsafeConstant {
            name: "orbit_speed_multiplier",
            value: speed_multiplier,
            safe_range: "angular_speed * multiplier < 2pi for every planet",
        })
    }
}

/// Run `frames` orbital steps and sample every planet's position after each.
/// Index `[frame][planet]`.
pub fn propagate(planets: &mut [Planet], speed_multiplier: f64, frames: usize) -> Vec<Vec<Vector2<f64>>> {
    let mut samples = Vec::with_capacity(frames);
    for _ in 0..frames {
        advance(planets, speed_multiplier);
        samples.push(planets.iter().map(|p| p.pos).collect());
    }
    samples
}
