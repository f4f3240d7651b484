use astral_flight::config::SimConfig;
use astral_flight::gnc::SeekPilot;
use astral_flight::sim::{self, EventKind, InfluenceDetector, Session};

fn main() {
    env_logger::init();

    let config = SimConfig::default();
    let mut session = match Session::new(config.clone()) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("error: {e}");
            return;
        }
    };
    session.add_detector(Box::new(InfluenceDetector::new(config.influence_per_mass)));

    let mut pilot = SeekPilot::new(&config, 12.0);
    let (trajectory, commands) = sim::simulate_with(&mut session, &mut pilot, 200_000);

    println!("Grand tour (seed {:#x})", config.seed);
    for event in session.events() {
        match &event.kind {
            EventKind::Discovery { count } => println!(
                "  f={:>7}  found {} at ({:.0}, {:.0})",
                event.frame, count, event.craft.pos.x, event.craft.pos.y
            ),
            EventKind::AllDiscovered => println!("  f={:>7}  every object found", event.frame),
            EventKind::EnteredInfluence { name, .. } => {
                println!("  f={:>7}  entered {}'s pull", event.frame, name)
            }
            other => println!("  f={:>7}  {:?}", event.frame, other),
        }
    }

    let burns = commands.iter().filter(|c| c.thrust).count();
    let brakes = commands.iter().filter(|c| c.brake).count();
    let d = &session.world.discovery;
    println!();
    println!("Frames: {}  burns: {}  brake frames: {}", trajectory.len() - 1, burns, brakes);
    println!("Score: {} ({}/{})", d.total_score, d.total_discovered, d.total_objects());
}
