use std::process;

use astral_flight::config::SimConfig;
use astral_flight::discovery::AstralKind;
use astral_flight::gnc::SeekPilot;
use astral_flight::io::{csv, json, SessionSummary};
use astral_flight::sim::{simulate_with, EventKind, InfluenceDetector, RestDetector, Session};
use astral_flight::SimResult;

const DEFAULT_FRAMES: u64 = 60_000;

struct Args {
    config: Option<String>,
    frames: u64,
    csv: Option<String>,
    json: Option<String>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args { config: None, frames: DEFAULT_FRAMES, csv: None, json: None };
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--frames" => {
                let n = it.next().ok_or("--frames needs a value")?;
                args.frames = n.parse().map_err(|_| format!("bad frame count `{n}`"))?;
            }
            "--csv" => args.csv = Some(it.next().ok_or("--csv needs a path")?),
            "--json" => args.json = Some(it.next().ok_or("--json needs a path")?),
            other if other.starts_with("--") => return Err(format!("unknown flag `{other}`")),
            path => args.config = Some(path.to_string()),
        }
    }
    Ok(args)
}

fn main() {
    env_logger::init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("error: {msg}");
            eprintln!("usage: astral-flight [config.toml] [--frames N] [--csv out.csv] [--json out.json]");
            process::exit(2);
        }
    };

    if let Err(e) = run(&args) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn run(args: &Args) -> SimResult<()> {
    let config = match &args.config {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };

    // -----------------------------------------------------------------------
    // Run simulation
    // -----------------------------------------------------------------------
    let mut session = Session::new(config.clone())?;
    session.add_detector(Box::new(RestDetector));
    session.add_detector(Box::new(InfluenceDetector::new(config.influence_per_mass)));

    let mut pilot = SeekPilot::new(&config, config.max_speed * 0.5);
    let (trajectory, _) = simulate_with(&mut session, &mut pilot, args.frames);
    let summary = SessionSummary::from_session(&session, &trajectory);

    // -----------------------------------------------------------------------
    // Print results
    // -----------------------------------------------------------------------
    println!();
    println!("====================================================================");
    println!("  ASTRAL FLIGHT SIMULATION — seed {:#x}", config.seed);
    println!("====================================================================");
    println!();
    println!("  Configuration");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  Turn rate:     {:>8.1} deg/f  Thrust:       {:>8.2} /f",
        config.degrees_per_frame, config.thrust_increment
    );
    println!(
        "  Max speed:     {:>8.1}        Stop speed:   {:>8.2}",
        config.max_speed, config.stop_speed
    );
    println!(
        "  Gravity x:     {:>8.1e}      Softening:    {:>8.1}",
        config.gravity_factor, config.softening
    );
    println!(
        "  Bodies:        {:>8}        Objects:      {:>8}",
        session.world.planets.len(),
        session.world.objects.len()
    );
    println!();

    println!("  Flight Events");
    println!("  ──────────────────────────────────────────────────────────────────");
    for event in session.events() {
        let label = match &event.kind {
            EventKind::Discovery { count } => format!("DISCOVERY x{count}"),
            EventKind::AllDiscovered => "ALL FOUND".to_string(),
            EventKind::Reset => "RESET".to_string(),
            EventKind::CameToRest => "AT REST".to_string(),
            EventKind::EnteredInfluence { name, .. } => format!("NEAR {}", name.to_uppercase()),
        };
        println!(
            "  f={:>6}   {:<22} pos=({:>8.0},{:>8.0})   |v|={:>5.1}",
            event.frame,
            label,
            event.craft.pos.x,
            event.craft.pos.y,
            event.craft.speed()
        );
    }
    println!();

    println!("  Discovery");
    println!("  ──────────────────────────────────────────────────────────────────");
    for line in &summary.kinds {
        println!(
            "  {:<10} {:>3}/{:<3}  score {:>6}",
            line.kind, line.discovered, line.total, line.score
        );
    }
    let discovery = &session.world.discovery;
    let complete_kinds = AstralKind::ALL.iter().filter(|k| discovery.kind_complete(**k)).count();
    println!(
        "  Total      {:>3}/{:<3}  score {:>6}   ({} of 4 kinds complete)",
        summary.total_discovered, summary.total_objects, summary.total_score, complete_kinds
    );
    println!();

    println!("  Performance Summary");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!("  Max speed:     {:>8.2}", summary.max_speed);
    println!("  Distance:      {:>8.0}", summary.distance_traveled);
    println!("  Farthest out:  {:>8.0}", summary.max_sun_distance);
    println!("  Frames:        {:>8}", summary.frames);
    println!();

    // -----------------------------------------------------------------------
    // Trajectory table (sampled)
    // -----------------------------------------------------------------------
    println!("  Trajectory");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  {:>7}  {:>9}  {:>9}  {:>7}  {:>7}  {:>6}",
        "frame", "x", "y", "speed", "angle", "phase"
    );
    println!("  {}", "─".repeat(56));

    let sample_interval = (trajectory.len() / 30).max(1);
    for (i, s) in trajectory.iter().enumerate() {
        if i % sample_interval != 0 && i != trajectory.len() - 1 {
            continue;
        }
        let phase = if s.thrusting { "BURN" } else { "COAST" };
        println!(
            "  {:>7}  {:>9.1}  {:>9.1}  {:>7.2}  {:>7.1}  {:>6}",
            s.frame,
            s.pos.x,
            s.pos.y,
            s.vel.norm(),
            s.angle.rem_euclid(360.0),
            phase
        );
    }

    println!();
    println!("  Simulation: {} frames, complete={}", summary.frames, summary.completed);
    println!("====================================================================");
    println!();

    if let Some(path) = &args.csv {
        csv::write_trajectory_file(path, &trajectory)?;
        println!("  trajectory written to {path}");
    }
    if let Some(path) = &args.json {
        json::write_summary_file(path, &summary)?;
        println!("  summary written to {path}");
    }

    Ok(())
}
