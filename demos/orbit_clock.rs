use std::f64::consts::TAU;

use astral_flight::config::ORBIT_SPEED_MULTIPLIER;
use astral_flight::orbital::{presets, propagate};

/// Print how many frames each planet needs for one lap, and where the
/// planets sit after a long propagation.
fn main() {
    let mut planets = presets::sol();

    println!("{:<10} {:>8} {:>14} {:>10}", "body", "radius", "frames/lap", "minutes@60");
    for p in planets.iter().filter(|p| !p.is_sun()) {
        let frames = TAU / (p.angular_speed * ORBIT_SPEED_MULTIPLIER);
        println!(
            "{:<10} {:>8.0} {:>14.0} {:>10.1}",
            p.name,
            p.orbit_radius,
            frames,
            frames / 60.0 / 60.0
        );
    }

    let frames = 100_000;
    let tracks = propagate(&mut planets, ORBIT_SPEED_MULTIPLIER, frames);
    println!();
    println!("After {} frames:", tracks.len());
    for p in planets.iter() {
        println!(
            "  {:<10} angle {:>6.3} rad  pos ({:>9.1}, {:>9.1})",
            p.name, p.orbit_angle, p.pos.x, p.pos.y
        );
    }
}
