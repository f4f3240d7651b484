use nalgebra::Vector2;

use crate::arena::FixedArena;

/// Index of the stationary sun in every planet list.
pub const SUN: usize = 0;

// ---------------------------------------------------------------------------
// Planet
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Planet {
    pub index: usize,
    pub name: String,
    pub orbit_radius: f64,   // world units from the sun
    pub orbit_angle: f64,    // rad, kept in [0, 2pi)
    pub angular_speed: f64,  // rad per frame before the global multiplier
    pub mass: f64,           // proportional to gravitational pull
    pub width: f64,          // rendered diameter, world units
    pub pos: Vector2<f64>,
}

impl Planet {
    pub fn is_sun(&self) -> bool {
        self.index == SUN
    }

    /// Rendered radius in world units.
    pub fn radius(&self) -> f64 {
        self.width * 0.5
    }

    /// Position implied by the current orbit angle.
    pub fn orbit_position(&self) -> Vector2<f64> {
        if self.is_sun() {
            return Vector2::zeros();
        }
        Vector2::new(self.orbit_angle.cos(), self.orbit_angle.sin()) * self.orbit_radius
    }
}

pub type Planets = FixedArena<Planet>;

// ---------------------------------------------------------------------------
// Solar system builder
// ---------------------------------------------------------------------------

pub struct SolarSystemBuilder {
    planets: Vec<Planet>,
}

impl SolarSystemBuilder {
    /// Start a system around a sun of the given mass and width.
    pub fn new(sun_mass: f64, sun_width: f64) -> Self {
        let sun = Planet {
            index: SUN,
            name: "Sun".into(),
            orbit_radius: 0.0,
            orbit_angle: 0.0,
            angular_speed: 0.0,
            mass: sun_mass,
            width: sun_width,
            pos: Vector2::zeros(),
        };
        Self { planets: vec![sun] }
    }

    pub fn planet(
        mut self,
        name: impl Into<String>,
        orbit_radius: f64,
        start_angle: f64,
        angular_speed: f64,
        mass: f64,
        width: f64,
    ) -> Self {
        let mut planet = Planet {
            index: self.planets.len(),
            name: name.into(),
            orbit_radius: orbit_radius.max(0.0),
            orbit_angle: start_angle.rem_euclid(std::f64::consts::TAU),
            angular_speed,
            mass,
            width,
            pos: Vector2::zeros(),
        };
        planet.pos = planet.orbit_position();
        self.planets.push(planet);
        self
    }

    pub fn build(self) -> Planets {
        self.planets.into_iter().collect()
    }
}

// ---------------------------------------------------------------------------
// Preset systems
// ---------------------------------------------------------------------------

pub mod presets {
    use super::*;

    /// Sun plus eight planets, distances and speeds scaled for play.
    pub fn sol() -> Planets {
        SolarSystemBuilder::new(27.4, 3_762.0)
            //      name       radius     angle  speed   mass   width
            .planet("Mercury", 3_200.0,  0.0,   17.7,   3.7,   392.0)
            .planet("Venus",   4_800.0,  1.2,   12.98,  8.87,  564.0)
            .planet("Earth",   6_400.0,  2.4,   11.04,  9.81,  576.0)
            .planet("Mars",    8_000.0,  3.1,   8.93,   3.73,  447.0)
            .planet("Jupiter", 11_200.0, 4.5,   8.9,    24.79, 1_500.0)
            .planet("Saturn",  14_400.0, 5.8,   3.6,    10.44, 2_788.0)
            .planet("Uranus",  17_600.0, 0.7,   2.53,   8.69,  2_000.0)
            .planet("Neptune", 20_800.0, 1.9,   2.0,    11.15, 988.0)
            .build()
    }
}
