use std::fs;
use std::path::Path;

use log::{debug, warn};
use nalgebra::Vector2;

use crate::arena::FixedArena;
use crate::error::{SimError, SimResult};

/// Vertex cap per polygon; extra pairs are dropped.
pub const MAX_VERTICES: usize = 32;
/// Polygon records kept per description.
pub const MAX_POLYGONS: usize = 64;
/// Circle records kept per description.
pub const MAX_CIRCLES: usize = 64;

/// Collision outline in sprite-local coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct PolyHitbox {
    pub id: String,
    pub vertices: FixedArena<Vector2<f64>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CircleHitbox {
    pub id: String,
    pub center: Vector2<f64>,
    pub radius: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HitboxSet {
    pub polygons: FixedArena<PolyHitbox>,
    pub circles: FixedArena<CircleHitbox>,
}

impl Default for HitboxSet {
    fn default() -> Self {
        Self {
            polygons: FixedArena::new(MAX_POLYGONS),
            circles: FixedArena::new(MAX_CIRCLES),
        }
    }
}

impl HitboxSet {
    pub fn polygon(&self, id: &str) -> Option<&PolyHitbox> {
        self.polygons.iter().find(|p| p.id == id)
    }

    pub fn circle(&self, id: &str) -> Option<&CircleHitbox> {
        self.circles.iter().find(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.polygons.len() + self.circles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

enum Record {
    Poly(PolyHitbox),
    Circle(CircleHitbox),
}

fn parse_numbers(tokens: &[&str]) -> Option<Vec<f64>> {
    tokens.iter().map(|t| t.parse::<f64>().ok()).collect()
}

fn parse_line(line: &str) -> Result<Record, String> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let [id, kind, rest @ ..] = tokens.as_slice() else {
        return Err("expected `<id> <kind> ...`".into());
    };
    let numbers = parse_numbers(rest).ok_or("non-numeric coordinate")?;

    match *kind {
        "poly" => {
            if numbers.len() < 2 {
                return Err("polygon needs at least one x y pair".into());
            }
            // chunks_exact leaves a trailing unpaired coordinate out
            let mut vertices = FixedArena::new(MAX_VERTICES);
            for pair in numbers.chunks_exact(2) {
                if !vertices.push(Vector2::new(pair[0], pair[1])) {
                    break;
                }
            }
            Ok(Record::Poly(PolyHitbox { id: id.to_string(), vertices }))
        }
        "circle" => match numbers.as_slice() {
            &[cx, cy, r] if r >= 0.0 => Ok(Record::Circle(CircleHitbox {
                id: id.to_string(),
                center: Vector2::new(cx, cy),
                radius: r,
            })),
            &[_, _, _] => Err("negative radius".into()),
            _ => Err(format!("circle takes 3 numbers, got {}", numbers.len())),
        },
        other => Err(format!("unknown hitbox kind `{other}`")),
    }
}

/// Parse a hitbox description. Bad lines are logged and skipped, and records
/// past the per-kind caps are dropped.
pub fn parse_hitboxes(text: &str) -> HitboxSet {
    let mut set = HitboxSet::default();

    for (lineno, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let stored = match parse_line(line) {
            Ok(Record::Poly(poly)) => set.polygons.push(poly),
            Ok(Record::Circle(circle)) => set.circles.push(circle),
            Err(reason) => {
                warn!("hitbox line {}: {} (skipped)", lineno + 1, reason);
                continue;
            }
        };
        if !stored {
            warn!("hitbox line {}: capacity reached (dropped)", lineno + 1);
        }
    }

    debug!("parsed {} polygons, {} circles", set.polygons.len(), set.circles.len());
    set
}

/// Read and parse a hitbox description file.
pub fn load_hitboxes(path: impl AsRef<Path>) -> SimResult<HitboxSet> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| SimError::io(path, e))?;
    Ok(parse_hitboxes(&text))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
# craft outline
fighter poly 0 -10 8 10 -8 10

sun circle 0 0 188.1
";

    #[test]
    fn parses_polygons_and_circles() {
        let set = parse_hitboxes(SAMPLE);
        assert_eq!(set.len(), 2);
        let fighter = set.polygon("fighter").unwrap();
        assert_eq!(fighter.vertices.len(), 3);
        assert_eq!(fighter.vertices[1], Vector2::new(8.0, 10.0));
        let sun = set.circle("sun").unwrap();
        assert!((sun.radius - 188.1).abs() < 1e-12);
    }

    #[test]
    fn trailing_coordinate_ignored() {
        let set = parse_hitboxes("a poly 1 2 3 4 5");
        assert_eq!(set.polygon("a").unwrap().vertices.len(), 2);
    }

    #[test]
    fn vertices_capped() {
        let coords: Vec<String> = (0..(MAX_VERTICES + 10) * 2).map(|i| i.to_string()).collect();
        let set = parse_hitboxes(&format!("big poly {}", coords.join(" ")));
        assert_eq!(set.polygon("big").unwrap().vertices.len(), MAX_VERTICES);
    }

    #[test]
    fn malformed_lines_skipped() {
        let text = "\
bad1 poly 1
bad2 circle 1 2
bad3 circle 1 2 x
bad4 hexagon 1 2 3
bad5
bad6 circle 0 0 -5
ok circle 1 2 3
";
        let set = parse_hitboxes(text);
        assert_eq!(set.len(), 1);
        assert!(set.circle("ok").is_some());
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_hitboxes("/nonexistent/hitboxes.txt").unwrap_err();
        assert!(matches!(err, SimError::Io { .. }));
    }
}
