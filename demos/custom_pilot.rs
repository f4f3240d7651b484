use astral_flight::config::SimConfig;
use astral_flight::discovery::AstralObject;
use astral_flight::gnc::Controller;
use astral_flight::sim::{self, Session};
use astral_flight::vehicle::{Craft, Intents};

/// A spiral pilot: burn, coast, turn a notch, repeat. Brakes every few laps
/// so gravity does not fling it out of the system.
struct SpiralPilot {
    burn_frames: u64,
    coast_frames: u64,
    turn_frames: u64,
    brake_every: u64,
}

impl Controller for SpiralPilot {
    fn control(&mut self, craft: &Craft, _objects: &[AstralObject], frame: u64) -> Intents {
        let cycle = self.burn_frames + self.coast_frames + self.turn_frames;
        let lap = frame / cycle;
        if lap % self.brake_every == self.brake_every - 1 && craft.speed() > 0.0 {
            return Intents::brake();
        }
        let t = frame % cycle;
        if t < self.burn_frames {
            Intents::thrust()
        } else if t < self.burn_frames + self.coast_frames {
            Intents::IDLE
        } else {
            Intents::right()
        }
    }

    fn name(&self) -> &str {
        "Spiral"
    }
}

fn main() {
    let config = SimConfig { seed: 42, ..SimConfig::default() };
    let mut session = match Session::new(config) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("error: {e}");
            return;
        }
    };

    let mut pilot = SpiralPilot {
        burn_frames: 40,
        coast_frames: 200,
        turn_frames: 6,
        brake_every: 8,
    };

    println!("Simulating with {} pilot...", pilot.name());
    let (trajectory, _) = sim::simulate_with(&mut session, &mut pilot, 30_000);

    let farthest = trajectory.iter().map(|s| s.pos.norm()).fold(0.0_f64, f64::max);
    let top_speed = trajectory.iter().map(|s| s.vel.norm()).fold(0.0_f64, f64::max);
    let d = &session.world.discovery;

    println!("Farthest from sun: {:.0}", farthest);
    println!("Top speed: {:.2}", top_speed);
    println!("Found: {}/{} (score {})", d.total_discovered, d.total_objects(), d.total_score);
    println!("Trajectory points: {}", trajectory.len());
}
