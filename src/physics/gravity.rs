use nalgebra::Vector2;

use crate::config::SimConfig;
use crate::orbital::Planet;

/// Heuristic multi-body gravity: softened inverse-square pull from every
/// body whose influence radius covers the craft, stopping early once the
/// craft is deep inside one body's well.
#[derive(Debug, Clone)]
pub struct GravityField {
    pub gravity_constant: f64,
    pub gravity_factor: f64,
    pub damping: f64,
    pub softening: f64,             // added to squared distance
    pub influence_per_mass: f64,
    pub dominant_per_mass: f64,
    pub craft_mass: f64,
}

impl GravityField {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            gravity_constant: config.gravity_constant,
            gravity_factor: config.gravity_factor,
            damping: config.gravity_damping,
            softening: config.softening,
            influence_per_mass: config.influence_per_mass,
            dominant_per_mass: config.dominant_per_mass,
            craft_mass: config.craft_mass,
        }
    }

    /// Distance beyond which a body of `mass` exerts no pull.
    pub fn influence_radius(&self, mass: f64) -> f64 {
        mass * self.influence_per_mass
    }

    /// Distance inside which a body of `mass` overrides every later body.
    pub fn dominant_radius(&self, mass: f64) -> f64 {
        mass * self.dominant_per_mass
    }

    /// Acceleration magnitude toward a body at squared distance `distance2`.
    pub fn pull(&self, mass: f64, distance2: f64) -> f64 {
        let softened2 = distance2 + self.softening;
        let force = self.gravity_constant * mass * self.craft_mass / softened2 / self.damping;
        force / self.craft_mass * self.gravity_factor
    }

    /// Net acceleration on a craft at `craft_pos`. Bodies are visited in
    /// index order, so the sun is always considered first.
    pub fn accumulate(&self, craft_pos: &Vector2<f64>, planets: &[Planet]) -> Vector2<f64> {
        let mut accel = Vector2::zeros();

        for planet in planets {
            let delta = planet.pos - craft_pos;
            let distance2 = delta.norm_squared();
            let influence = self.influence_radius(planet.mass);
            if distance2 >= influence * influence {
                continue;
            }

            let distance = distance2.sqrt();
            // Exactly at the center there is no direction to pull in.
            if distance > 0.0 {
                accel += delta / distance * self.pull(planet.mass, distance2);
            }

            if distance < self.dominant_radius(planet.mass) {
                break;
            }
        }

        accel
    }
}

impl Default for GravityField {
    fn default() -> Self {
        Self::new(&SimConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orbital::{presets, SolarSystemBuilder};

    fn lone_planet(mass: f64) -> Vec<Planet> {
        // massless sun so only the planet pulls
        SolarSystemBuilder::new(0.0, 0.0)
            .planet("P", 100.0, 0.0, 0.0, mass, 10.0)
            .build()
            .to_vec()
    }

    #[test]
    fn pull_points_toward_planet() {
        let field = GravityField::default();
        let planets = lone_planet(10.0);
        assert!(field.influence_radius(10.0) > 100.0);
        let a = field.accumulate(&Vector2::zeros(), &planets);
        assert!(a.norm() > 0.0);
        assert!(a.x > 0.0);
        assert!(a.y.abs() < 1e-12);
    }

    #[test]
    fn outside_influence_contributes_nothing() {
        let field = GravityField::default();
        let planets = lone_planet(0.1); // influence 40 < 100
        let a = field.accumulate(&Vector2::zeros(), &planets);
        assert_eq!(a, Vector2::zeros());
    }

    #[test]
    fn pull_weakens_with_distance() {
        let field = GravityField::default();
        let planets = lone_planet(10.0);
        let near = field.accumulate(&Vector2::new(50.0, 0.0), &planets).norm();
        let far = field.accumulate(&Vector2::new(-500.0, 0.0), &planets).norm();
        assert!(near > far);
    }

    #[test]
    fn softening_keeps_center_finite() {
        let field = GravityField::default();
        let planets = lone_planet(10.0);
        let at_center = field.accumulate(&Vector2::new(100.0, 0.0), &planets);
        assert_eq!(at_center, Vector2::zeros());
        let grazing = field.accumulate(&Vector2::new(100.0, 1e-6), &planets);
        assert!(grazing.norm().is_finite());
        assert!(grazing.norm() <= field.pull(10.0, 0.0) + 1e-12);
    }

    #[test]
    fn dominant_body_short_circuits() {
        let field = GravityField::default();
        let planets = SolarSystemBuilder::new(27.4, 3_762.0)
            .planet("Close", 400.0, 0.0, 0.0, 5.0, 10.0)
            .build()
            .to_vec();
        // 50 units from the sun: well inside its dominant radius (274)
        let craft = Vector2::new(-50.0, 0.0);
        let both = field.accumulate(&craft, &planets);
        let sun_only = field.accumulate(&craft, &planets[..1]);
        assert_eq!(both, sun_only);
        assert!(both.x > 0.0);

        // outside the sun's core the planet adds its own pull
        let craft = Vector2::new(350.0, 0.0);
        let both = field.accumulate(&craft, &planets);
        let sun_only = field.accumulate(&craft, &planets[..1]);
        assert_ne!(both, sun_only);
    }

    #[test]
    fn sol_field_is_finite_everywhere_sampled() {
        let field = GravityField::default();
        let planets = presets::sol();
        for x in (-25_000..=25_000).step_by(2_500) {
            for y in (-25_000..=25_000).step_by(2_500) {
                let a = field.accumulate(&Vector2::new(x as f64, y as f64), &planets);
                assert!(a.x.is_finite() && a.y.is_finite());
            }
        }
    }
}
