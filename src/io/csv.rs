use std::io::Write;
use std::path::Path;

use crate::error::{SimError, SimResult};
use crate::sim::CraftSample;

/// Write craft trajectory data to CSV format.
///
/// Columns: frame, pos_x, pos_y, vel_x, vel_y, speed, angle_deg, thrusting
pub fn write_trajectory<W: Write>(writer: &mut W, trajectory: &[CraftSample]) -> SimResult<()> {
    writeln!(writer, "frame,pos_x,pos_y,vel_x,vel_y,speed,angle_deg,thrusting")?;

    for s in trajectory {
        writeln!(
            writer,
            "{},{:.4},{:.4},{:.4},{:.4},{:.4},{:.2},{}",
            s.frame,
            s.pos.x, s.pos.y,
            s.vel.x, s.vel.y,
            s.vel.norm(),
            s.angle,
            u8::from(s.thrusting),
        )?;
    }

    Ok(())
}

/// Write trajectory to a CSV file at the given path.
pub fn write_trajectory_file(path: impl AsRef<Path>, trajectory: &[CraftSample]) -> SimResult<()> {
    let path = path.as_ref();
    let mut file = std::fs::File::create(path).map_err(|e| SimError::io(path, e))?;
    write_trajectory(&mut file, trajectory)
}
