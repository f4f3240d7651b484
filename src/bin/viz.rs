use eframe::egui;
use egui_plot::{Line, Plot, PlotPoints, Points};
use nalgebra::Vector2;

use astral_flight::config::SimConfig;
use astral_flight::discovery::AstralObject;
use astral_flight::gnc::SeekPilot;
use astral_flight::orbital::{propagate, Planet, Planets};
use astral_flight::sim::{simulate_with, CraftSample, EventKind, Session};
use astral_flight::SimResult;

const MAX_FRAMES: u64 = 60_000;

fn main() -> eframe::Result {
    env_logger::init();

    let config = SimConfig::default();
    let (session, trajectory, start) = match run(&config) {
        Ok(run) => run,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    let app = SimViz::new(&session, trajectory, start, &config);
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1200.0, 800.0]),
        ..Default::default()
    };
    eframe::run_native("Astral Flight", options, Box::new(|_| Ok(Box::new(app))))
}

/// Fly the seek pilot; also hands back the planets as they were at frame 0.
fn run(config: &SimConfig) -> SimResult<(Session, Vec<CraftSample>, Planets)> {
    let mut session = Session::new(config.clone())?;
    let start = session.world.planets.clone();
    let mut pilot = SeekPilot::new(config, config.max_speed * 0.5);
    let (trajectory, _) = simulate_with(&mut session, &mut pilot, MAX_FRAMES);
    Ok((session, trajectory, start))
}

struct SimViz {
    title: String,
    trajectory: Vec<CraftSample>,
    orbits: Vec<(String, Vec<[f64; 2]>)>,
    bodies: Vec<(String, Vec<[f64; 2]>)>,
    found: Vec<[f64; 2]>,
    hidden: Vec<[f64; 2]>,
    discoveries: Vec<[f64; 2]>,
}

/// Disc outline of a body at its current position, sized by its width.
fn body_outline(planet: &Planet) -> Vec<[f64; 2]> {
    (0..=48)
        .map(|i| {
            let a = i as f64 / 48.0 * std::f64::consts::TAU;
            let p = planet.pos + Vector2::new(a.cos(), a.sin()) * planet.radius();
            flip(p.x, p.y)
        })
        .collect()
}

/// World y grows downward; plots grow upward.
fn flip(x: f64, y: f64) -> [f64; 2] {
    [x, -y]
}

impl SimViz {
    fn new(session: &Session, trajectory: Vec<CraftSample>, start: Planets, config: &SimConfig) -> Self {
        let mut planets = start;
        let tracks = propagate(&mut planets, config.orbit_speed_multiplier, trajectory.len());
        let step = (tracks.len() / 2000).max(1);

        let orbits = planets
            .iter()
            .map(|p| {
                let points = tracks
                    .iter()
                    .step_by(step)
                    .map(|frame| frame[p.index])
                    .map(|pos| flip(pos.x, pos.y))
                    .collect();
                (p.name.clone(), points)
            })
            .collect();

        let bodies = session
            .world
            .planets
            .iter()
            .map(|p| (format!("{} disc", p.name), body_outline(p)))
            .collect();

        let (found, hidden): (Vec<_>, Vec<_>) =
            session.world.objects.iter().partition(|o| o.discovered);
        let to_points = |objs: Vec<&AstralObject>| -> Vec<[f64; 2]> {
            objs.iter().map(|o| flip(o.center().x, o.center().y)).collect()
        };

        let mut total = 0.0;
        let mut discoveries = vec![[0.0, 0.0]];
        for event in session.events() {
            if let EventKind::Discovery { count } = event.kind {
                total += count as f64;
                discoveries.push([event.frame as f64, total]);
            }
        }

        let d = &session.world.discovery;
        Self {
            title: format!(
                "Found {}/{}  |  Score {}  |  Frames {}",
                d.total_discovered,
                d.total_objects(),
                d.total_score,
                session.frame()
            ),
            trajectory,
            orbits,
            bodies,
            found: to_points(found),
            hidden: to_points(hidden),
            discoveries,
        }
    }
}

impl eframe::App for SimViz {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let step = (self.trajectory.len() / 2000).max(1);
        let sampled: Vec<&CraftSample> = self.trajectory.iter().step_by(step).collect();

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.heading("Seek pilot tour");
            ui.label(self.title.as_str());
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let available = ui.available_size();
            let half_w = available.x / 2.0 - 8.0;
            let half_h = available.y / 2.0 - 8.0;

            ui.horizontal(|ui| {
                // System map
                ui.vertical(|ui| {
                    ui.label("System map");
                    let track: PlotPoints = sampled.iter().map(|s| flip(s.pos.x, s.pos.y)).collect();
                    Plot::new("map")
                        .width(half_w)
                        .height(available.y - 24.0)
                        .data_aspect(1.0)
                        .show(ui, |plot_ui| {
                            for (name, points) in &self.orbits {
                                plot_ui.line(Line::new(name.as_str(), PlotPoints::from(points.clone())));
                            }
                            for (name, outline) in &self.bodies {
                                plot_ui.line(Line::new(name.as_str(), PlotPoints::from(outline.clone())));
                            }
                            plot_ui.points(Points::new("hidden", self.hidden.clone()).radius(3.0));
                            plot_ui.points(Points::new("found", self.found.clone()).radius(4.0));
                            plot_ui.line(Line::new("craft", track));
                        });
                });

                ui.vertical(|ui| {
                    // Speed vs frame
                    ui.label("Speed");
                    let points: PlotPoints = sampled
                        .iter()
                        .map(|s| [s.frame as f64, s.vel.norm()])
                        .collect();
                    Plot::new("speed")
                        .width(half_w)
                        .height(half_h)
                        .x_axis_label("Frame")
                        .show(ui, |plot_ui| {
                            plot_ui.line(Line::new("Speed", points));
                        });

                    // Discoveries vs frame
                    ui.label("Objects found");
                    Plot::new("found")
                        .width(half_w)
                        .height(half_h - 24.0)
                        .x_axis_label("Frame")
                        .show(ui, |plot_ui| {
                            plot_ui.line(Line::new(
                                "Found",
                                PlotPoints::from(self.discoveries.clone()),
                            ));
                        });
                });
            });
        });
    }
}
