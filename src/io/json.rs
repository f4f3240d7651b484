use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::discovery::{AstralKind, DiscoveryAggregate};
use crate::error::{SimError, SimResult};
use crate::sim::{CraftSample, Session};

/// Per-kind discovery line of the summary.
#[derive(Debug, Clone, Serialize)]
pub struct KindSummary {
    pub kind: String,
    pub discovered: u32,
    pub total: u32,
    pub score: u32,
}

/// Summary statistics computed from a finished session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub seed: u64,
    pub frames: u64,
    pub final_pos: [f64; 2],
    pub max_speed: f64,
    pub distance_traveled: f64,
    pub max_sun_distance: f64,
    pub events: usize,
    pub total_discovered: u32,
    pub total_objects: u32,
    pub total_score: u32,
    pub completed: bool,
    pub kinds: Vec<KindSummary>,
}

fn kind_lines(aggregate: &DiscoveryAggregate) -> Vec<KindSummary> {
    AstralKind::ALL
        .iter()
        .map(|&kind| {
            let i = kind.index();
            KindSummary {
                kind: kind.to_string(),
                discovered: aggregate.discovered[i],
                total: aggregate.total[i],
                score: aggregate.score[i],
            }
        })
        .collect()
}

impl SessionSummary {
    /// Compute summary from the session and the trajectory it produced.
    pub fn from_session(session: &Session, trajectory: &[CraftSample]) -> Self {
        let max_speed = trajectory
            .iter()
            .map(|s| s.vel.norm())
            .fold(0.0_f64, f64::max);

        let distance_traveled = trajectory
            .windows(2)
            .map(|w| (w[1].pos - w[0].pos).norm())
            .sum();

        let max_sun_distance = trajectory
            .iter()
            .map(|s| s.pos.norm())
            .fold(0.0_f64, f64::max);

        let craft = &session.world.craft;
        let discovery = &session.world.discovery;

        SessionSummary {
            seed: session.config.seed,
            frames: session.frame(),
            final_pos: [craft.pos.x, craft.pos.y],
            max_speed,
            distance_traveled,
            max_sun_distance,
            events: session.events().len(),
            total_discovered: discovery.total_discovered,
            total_objects: discovery.total_objects(),
            total_score: discovery.total_score,
            completed: discovery.completed,
            kinds: kind_lines(discovery),
        }
    }
}

/// Write session summary as pretty JSON to a writer.
pub fn write_summary<W: Write>(writer: &mut W, summary: &SessionSummary) -> SimResult<()> {
    serde_json::to_writer_pretty(&mut *writer, summary)?;
    writeln!(writer)?;
    Ok(())
}

/// Write session summary JSON to a file.
pub fn write_summary_file(path: impl AsRef<Path>, summary: &SessionSummary) -> SimResult<()> {
    let path = path.as_ref();
    let mut file = std::fs::File::create(path).map_err(|e| SimError::io(path, e))?;
    write_summary(&mut file, summary)
}
