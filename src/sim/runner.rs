use log::{debug, info};
use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::event::{EventDetector, EventKind, SimEvent};
use crate::arena::FixedArena;
use crate::config::SimConfig;
use crate::discovery::{spawn_objects, AstralObject, DiscoveryAggregate, DiscoveryTracker, SpawnLayout};
use crate::error::SimResult;
use crate::gnc::{clamp_speed, Controller, FlightController, RotationAction, SeekPilot};
use crate::orbital::{self, presets, Planets};
use crate::physics::GravityField;
use crate::vehicle::{bullets, Bullets, Craft, Intents};

/// Where a fresh craft starts: above the sun, outside its dominant core.
pub const CRAFT_SPAWN: [f64; 2] = [0.0, -2_000.0];

// ---------------------------------------------------------------------------
// World state
// ---------------------------------------------------------------------------

/// Everything one tick mutates.
#[derive(Debug, Clone)]
pub struct World {
    pub craft: Craft,
    pub planets: Planets,
    pub objects: FixedArena<AstralObject>,
    pub discovery: DiscoveryAggregate,
    pub bullets: Bullets,
}

impl World {
    pub fn new(craft: Craft, planets: Planets, objects: FixedArena<AstralObject>) -> Self {
        let discovery = DiscoveryAggregate::new(&objects);
        Self { craft, planets, objects, discovery, bullets: bullets::bullet_arena() }
    }

    /// The standard system with a field scattered from `config.seed`.
    pub fn generate(config: &SimConfig) -> Self {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let objects = spawn_objects(&mut rng, &SpawnLayout::default());
        let craft = Craft::new(Vector2::new(CRAFT_SPAWN[0], CRAFT_SPAWN[1]), config.max_speed);
        Self::new(craft, presets::sol(), objects)
    }
}

/// The per-tick subsystems, built once from a config.
#[derive(Debug, Clone)]
pub struct Systems {
    pub flight: FlightController,
    pub gravity: GravityField,
    pub tracker: DiscoveryTracker,
    pub orbit_speed_multiplier: f64,
    pub bullet_speed: f64,
    pub bullet_range: f64,
}

impl Systems {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            flight: FlightController::new(config),
            gravity: GravityField::new(config),
            tracker: DiscoveryTracker::new(config),
            orbit_speed_multiplier: config.orbit_speed_multiplier,
            bullet_speed: config.bullet_speed,
            bullet_range: config.bullet_range,
        }
    }
}

/// What one tick reported back to the collaborators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub frame: u64,
    /// The brake autopilot's decision, when brake was held.
    pub brake_action: Option<RotationAction>,
    pub newly_discovered: usize,
    /// True on the single tick the last object was found.
    pub all_discovered: bool,
    pub bullets_fired: usize,
    pub reset: bool,
}

// ---------------------------------------------------------------------------
// Per-frame step
// ---------------------------------------------------------------------------

/// Advance the world by one frame. Order matters: flight input, gravity,
/// speed clamp, position, planets, discovery, then projectiles.
pub fn step(world: &mut World, intents: &Intents, frame: u64, systems: &Systems) -> TickReport {
    let mut report = TickReport { frame, ..TickReport::default() };
    let craft = &mut world.craft;

    if intents.reset {
        craft.reset();
        report.reset = true;
    } else {
        report.brake_action = systems.flight.apply_intents(craft, intents);
    }

    craft.vel += systems.gravity.accumulate(&craft.pos, &world.planets);
    let max_speed = craft.max_speed;
    clamp_speed(craft, max_speed);
    craft.pos += craft.vel;

    orbital::advance(&mut world.planets, systems.orbit_speed_multiplier);

    let scan = systems.tracker.scan(&world.craft.pos, &mut world.objects, &mut world.discovery);
    report.newly_discovered = scan.newly_discovered;
    report.all_discovered = scan.completed;

    if intents.fire && !intents.reset {
        report.bullets_fired = bullets::fire(&mut world.bullets, &world.craft, systems.bullet_speed);
    }
    bullets::advance(&mut world.bullets, systems.bullet_range);

    report
}

// ---------------------------------------------------------------------------
// Session: owns the world and drives ticks
// ---------------------------------------------------------------------------

pub struct Session {
    pub world: World,
    pub config: SimConfig,
    systems: Systems,
    frame: u64,
    detectors: Vec<Box<dyn EventDetector>>,
    events: Vec<SimEvent>,
}

impl Session {
    /// A session over the standard generated world.
    pub fn new(config: SimConfig) -> SimResult<Self> {
        let world = World::generate(&config);
        Self::with_world(config, world)
    }

    /// Validates the config, including the orbit rate against this world's
    /// planets.
    pub fn with_world(config: SimConfig, world: World) -> SimResult<Self> {
        config.validate()?;
        orbital::check_orbit_rate(&world.planets, config.orbit_speed_multiplier)?;
        info!(
            "session start: {} bodies, {} objects, seed {:#x}",
            world.planets.len(),
            world.objects.len(),
            config.seed
        );
        Ok(Self {
            systems: Systems::new(&config),
            world,
            config,
            frame: 0,
            detectors: Vec::new(),
            events: Vec::new(),
        })
    }

    pub fn add_detector(&mut self, detector: Box<dyn EventDetector>) {
        self.detectors.push(detector);
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    pub fn is_complete(&self) -> bool {
        self.world.discovery.completed
    }

    /// Run one frame and record any events it produced.
    pub fn tick(&mut self, intents: &Intents) -> TickReport {
        let prev = self.world.craft.clone();
        let report = step(&mut self.world, intents, self.frame, &self.systems);

        let mut kinds = Vec::new();
        if report.reset {
            info!("frame {}: craft reset", self.frame);
            kinds.push(EventKind::Reset);
        }
        if report.newly_discovered > 0 {
            kinds.push(EventKind::Discovery { count: report.newly_discovered });
        }
        if report.all_discovered {
            kinds.push(EventKind::AllDiscovered);
        }
        for detector in &mut self.detectors {
            if let Some(kind) = detector.check(&prev, &self.world.craft, &self.world.planets) {
                debug!("frame {}: {:?}", self.frame, kind);
                kinds.push(kind);
            }
        }
        for kind in kinds {
            self.events.push(SimEvent { frame: self.frame, kind, craft: self.world.craft.clone() });
        }

        self.frame += 1;
        report
    }
}

// ---------------------------------------------------------------------------
// Headless runs
// ---------------------------------------------------------------------------

/// One recorded frame of the craft's flight.
#[derive(Debug, Clone, PartialEq)]
pub struct CraftSample {
    pub frame: u64,
    pub pos: Vector2<f64>,
    pub vel: Vector2<f64>,
    pub angle: f64,
    pub thrusting: bool,
}

impl CraftSample {
    fn of(frame: u64, craft: &Craft) -> Self {
        Self { frame, pos: craft.pos, vel: craft.vel, angle: craft.angle, thrusting: craft.thrusting }
    }
}

/// Drive a session with a pilot until every object is found or `max_frames`
/// elapse. Returns the craft trajectory and the intents issued each frame.
pub fn simulate_with(
    session: &mut Session,
    pilot: &mut dyn Controller,
    max_frames: u64,
) -> (Vec<CraftSample>, Vec<Intents>) {
    let cap = max_frames.min(200_000) as usize + 1;
    let mut trajectory = Vec::with_capacity(cap);
    let mut commands = Vec::with_capacity(cap);

    trajectory.push(CraftSample::of(session.frame(), &session.world.craft));
    commands.push(Intents::IDLE);

    debug!("simulating up to {} frames with {}", max_frames, pilot.name());
    for _ in 0..max_frames {
        let intents = pilot.control(&session.world.craft, &session.world.objects, session.frame());
        let report = session.tick(&intents);

        trajectory.push(CraftSample::of(report.frame + 1, &session.world.craft));
        commands.push(intents);

        if session.is_complete() {
            break;
        }
    }

    (trajectory, commands)
}

/// Simulate the standard world with the seek pilot (convenience wrapper).
pub fn simulate(config: &SimConfig, max_frames: u64) -> SimResult<(Session, Vec<CraftSample>)> {
    let mut session = Session::new(config.clone())?;
    let mut pilot = SeekPilot::new(config, config.max_speed * 0.5);
    let (trajectory, _) = simulate_with(&mut session, &mut pilot, max_frames);
    Ok((session, trajectory))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::AstralKind;
    use crate::error::SimError;
    use crate::gnc::ScriptedPilot;
    use crate::orbital::SolarSystemBuilder;
    use crate::sim::event::{InfluenceDetector, RestDetector};

    /// No gravity anywhere: a massless sun only.
    fn empty_space() -> Planets {
        SolarSystemBuilder::new(0.0, 0.0).build()
    }

    fn nova_centered(x: f64, y: f64) -> AstralObject {
        let extent = Vector2::new(100.0, 100.0);
        AstralObject::new(AstralKind::Nova, Vector2::new(x, y) - extent * 0.5, extent, 1.0)
    }

    fn quiet_session(objects: Vec<AstralObject>) -> Session {
        let world = World::new(Craft::default(), empty_space(), objects.into_iter().collect());
        Session::with_world(SimConfig::default(), world).unwrap()
    }

    #[test]
    fn generated_world_is_reproducible() {
        let config = SimConfig::default();
        let a = World::generate(&config);
        let b = World::generate(&config);
        assert_eq!(a.objects, b.objects);
        assert_eq!(a.discovery.total_objects(), 14);
        assert_eq!(a.planets.len(), 9);
    }

    #[test]
    fn thrust_moves_craft_up() {
        let mut session = quiet_session(vec![]);
        session.tick(&Intents::thrust());
        let craft = &session.world.craft;
        assert!(craft.pos.y < 0.0);
        assert!(craft.pos.x.abs() < 1e-12);
        assert!(craft.thrusting);
    }

    #[test]
    fn speed_clamped_after_gravity() {
        let config = SimConfig::default();
        let mut world = World::new(Craft::default(), empty_space(), FixedArena::new(0));
        world.craft.vel = Vector2::new(0.0, -config.max_speed);
        let systems = Systems::new(&config);
        step(&mut world, &Intents::thrust(), 0, &systems);
        assert!(world.craft.speed() <= config.max_speed + 1e-9);
    }

    #[test]
    fn gravity_pulls_resting_craft() {
        let config = SimConfig::default();
        let mut world = World::generate(&config);
        world.objects.clear();
        let systems = Systems::new(&config);
        step(&mut world, &Intents::IDLE, 0, &systems);
        // spawn is straight above the sun; the pull is downward (+y)
        assert!(world.craft.vel.y > 0.0);
    }

    #[test]
    fn flying_over_objects_discovers_them() {
        let mut session = quiet_session(vec![nova_centered(0.0, -30.0), nova_centered(0.0, -400.0)]);
        let mut fresh = 0;
        let mut completions = 0;
        for _ in 0..200 {
            let report = session.tick(&Intents::thrust());
            fresh += report.newly_discovered;
            completions += report.all_discovered as usize;
        }
        assert_eq!(fresh, 2);
        assert_eq!(completions, 1);
        assert!(session.is_complete());
        assert_eq!(session.world.discovery.total_score, 300);
        let done = session.events().iter().filter(|e| e.kind == EventKind::AllDiscovered).count();
        assert_eq!(done, 1);
    }

    #[test]
    fn reset_returns_craft_to_spawn() {
        let mut session = quiet_session(vec![]);
        for _ in 0..10 {
            session.tick(&Intents::thrust());
        }
        let report = session.tick(&Intents { reset: true, ..Intents::IDLE });
        assert!(report.reset);
        assert_eq!(session.world.craft.pos, Vector2::zeros());
        assert_eq!(session.world.craft.vel, Vector2::zeros());
        assert!(session.events().iter().any(|e| e.kind == EventKind::Reset));
    }

    #[test]
    fn scripted_burn_then_brake_comes_to_rest() {
        let mut session = quiet_session(vec![]);
        session.add_detector(Box::new(RestDetector));
        let mut pilot = ScriptedPilot::new()
            .hold(Intents::thrust(), 20)
            .hold(Intents::brake(), 200);
        let frames = pilot.len();
        let (trajectory, commands) = simulate_with(&mut session, &mut pilot, frames);

        assert_eq!(trajectory.len(), commands.len());
        assert_eq!(trajectory.len() as u64, frames + 1);
        assert_eq!(session.world.craft.vel, Vector2::zeros());
        let kinds: Vec<&EventKind> = session.events().iter().map(|e| &e.kind).collect();
        assert_eq!(kinds, vec![&EventKind::CameToRest]);
    }

    #[test]
    fn fire_spawns_bullets() {
        let mut session = quiet_session(vec![]);
        let report = session.tick(&Intents { fire: true, ..Intents::IDLE });
        assert_eq!(report.bullets_fired, 1);
        assert_eq!(session.world.bullets.len(), 1);
    }

    #[test]
    fn simulate_stops_when_complete() {
        let mut session = quiet_session(vec![nova_centered(0.0, -20.0)]);
        let mut pilot = ScriptedPilot::new().hold(Intents::thrust(), 1_000);
        let (trajectory, _) = simulate_with(&mut session, &mut pilot, 1_000);
        assert!(session.is_complete());
        assert!(trajectory.len() < 100);
    }

    #[test]
    fn falling_toward_sun_enters_its_influence() {
        let config = SimConfig::default();
        // sun mass 2: influence 800, dominant core 20
        let planets = SolarSystemBuilder::new(2.0, 10.0).build();
        let craft = Craft::new(Vector2::new(0.0, -1_000.0), config.max_speed)
            .with_velocity(Vector2::new(0.0, 10.0));
        let world = World::new(craft, planets, FixedArena::new(0));
        let mut session = Session::with_world(config.clone(), world).unwrap();
        session.add_detector(Box::new(InfluenceDetector::new(config.influence_per_mass)));

        for _ in 0..40 {
            session.tick(&Intents::IDLE);
        }
        let entries: Vec<&SimEvent> = session
            .events()
            .iter()
            .filter(|e| matches!(e.kind, EventKind::EnteredInfluence { planet: 0, .. }))
            .collect();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].craft.pos.norm() < 800.0);
    }

    #[test]
    fn step_applies_gravity_before_clamp_and_integration() {
        let config = SimConfig::default();
        // full-mass sun 1000 units below the craft, already at max speed
        let planets = SolarSystemBuilder::new(27.4, 3_762.0).build();
        let craft = Craft::new(Vector2::new(0.0, -1_000.0), config.max_speed)
            .with_angle(90.0)
            .with_velocity(Vector2::new(config.max_speed, 0.0));
        let mut world = World::new(craft, planets, FixedArena::new(0));
        let systems = Systems::new(&config);
        let pull = systems.gravity.accumulate(&world.craft.pos, &world.planets);
        assert!(pull.y > 0.0);

        let before = world.craft.pos;
        step(&mut world, &Intents::thrust(), 0, &systems);
        let craft = &world.craft;

        // thrust along +x plus the pull along +y, then clamped to max speed
        assert!((craft.speed() - config.max_speed).abs() < 1e-9);
        assert!(craft.vel.y > 0.0);
        let unclamped = Vector2::new(config.max_speed + config.thrust_increment, 0.0) + pull;
        let expected = unclamped * (config.max_speed / unclamped.norm());
        assert!((craft.vel - expected).norm() < 1e-9);
        // position moved by exactly the clamped velocity
        assert!((craft.pos - before - craft.vel).norm() < 1e-9);
    }

    #[test]
    fn oversized_orbit_rate_is_rejected() {
        let config = SimConfig { orbit_speed_multiplier: 1.0, ..SimConfig::default() };
        assert!(config.validate().is_ok());
        let err = Session::new(config).err().unwrap();
        assert!(matches!(err, SimError::UnsafeConstant { name: "orbit_speed_multiplier", .. }));
    }
}
