use std::f64::consts::TAU;
use std::fmt;

use nalgebra::Vector2;
use rand::Rng;
use serde::Serialize;

use crate::arena::FixedArena;

// ---------------------------------------------------------------------------
// Object kinds
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AstralKind {
    Cloud,
    Nebula,
    Nova,
    Vortex,
}

impl AstralKind {
    pub const ALL: [AstralKind; 4] = [
        AstralKind::Cloud,
        AstralKind::Nebula,
        AstralKind::Nova,
        AstralKind::Vortex,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn score(self) -> u32 {
        match self {
            AstralKind::Cloud => 100,
            AstralKind::Nebula => 250,
            AstralKind::Nova => 150,
            AstralKind::Vortex => 500,
        }
    }

    /// How many of this kind a standard field holds.
    pub fn count(self) -> usize {
        match self {
            AstralKind::Cloud => 5,
            AstralKind::Nebula => 3,
            AstralKind::Nova => 4,
            AstralKind::Vortex => 2,
        }
    }

    /// Unscaled rendered size (width, height) in world units.
    pub fn nominal_extent(self) -> Vector2<f64> {
        match self {
            AstralKind::Cloud => Vector2::new(120.0, 80.0),
            AstralKind::Nebula => Vector2::new(160.0, 160.0),
            AstralKind::Nova => Vector2::new(100.0, 100.0),
            AstralKind::Vortex => Vector2::new(140.0, 140.0),
        }
    }

    /// Distance band from the sun (min, max) this kind spawns in.
    pub fn spawn_ring(self) -> (f64, f64) {
        match self {
            AstralKind::Cloud => (2_000.0, 8_000.0),
            AstralKind::Nebula => (6_000.0, 14_000.0),
            AstralKind::Nova => (4_000.0, 12_000.0),
            AstralKind::Vortex => (12_000.0, 22_000.0),
        }
    }
}

impl fmt::Display for AstralKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AstralKind::Cloud => "cloud",
            AstralKind::Nebula => "nebula",
            AstralKind::Nova => "supernova",
            AstralKind::Vortex => "vortex",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// Astral object
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct AstralObject {
    pub kind: AstralKind,
    pub position: Vector2<f64>,  // top-left corner, world units
    pub extent: Vector2<f64>,    // unscaled (width, height); zero until sized
    pub scale: f64,
    pub rotation: f64,           // degrees, cosmetic
    pub score_value: u32,
    /// Flipped once, false to true, by the discovery scan.
    pub discovered: bool,
}

impl AstralObject {
    pub fn new(kind: AstralKind, position: Vector2<f64>, extent: Vector2<f64>, scale: f64) -> Self {
        Self {
            kind,
            position,
            extent,
            scale,
            rotation: 0.0,
            score_value: kind.score(),
            discovered: false,
        }
    }

    pub fn scaled_extent(&self) -> Vector2<f64> {
        self.extent * self.scale
    }

    pub fn center(&self) -> Vector2<f64> {
        self.position + self.scaled_extent() * 0.5
    }

    /// Largest craft-to-center distance that counts as found. Zero for an
    /// object whose extent has not been set.
    pub fn discovery_threshold(&self, proximity_fraction: f64) -> f64 {
        let smaller = self.extent.x.min(self.extent.y);
        (smaller * self.scale * proximity_fraction).max(0.0)
    }

    /// Let the renderer fix the size once it knows the texture dimensions.
    pub fn set_extent(&mut self, width: f64, height: f64) {
        self.extent = Vector2::new(width, height);
    }
}

// ---------------------------------------------------------------------------
// Spawning
// ---------------------------------------------------------------------------

/// Per-kind counts and spawn rings for a field of objects.
#[derive(Debug, Clone)]
pub struct SpawnLayout {
    pub counts: [usize; 4],
    pub rings: [(f64, f64); 4],
    pub scale_range: (f64, f64),
}

impl Default for SpawnLayout {
    fn default() -> Self {
        Self {
            counts: AstralKind::ALL.map(AstralKind::count),
            rings: AstralKind::ALL.map(AstralKind::spawn_ring),
            scale_range: (0.5, 1.5),
        }
    }
}

impl SpawnLayout {
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Scatter a field of objects. All randomness comes from `rng`, so a seeded
/// generator reproduces the same field.
pub fn spawn_objects<R: Rng>(rng: &mut R, layout: &SpawnLayout) -> FixedArena<AstralObject> {
    let mut objects = FixedArena::new(layout.total());
    for kind in AstralKind::ALL {
        let (inner, outer) = layout.rings[kind.index()];
        for _ in 0..layout.counts[kind.index()] {
            let angle = rng.gen_range(0.0..TAU);
            let distance = if outer > inner { rng.gen_range(inner..outer) } else { inner };
            let (lo, hi) = layout.scale_range;
            let scale = if hi > lo { rng.gen_range(lo..hi) } else { lo };

            let center = Vector2::new(angle.cos(), angle.sin()) * distance;
            let extent = kind.nominal_extent();
            let mut obj = AstralObject::new(kind, center - extent * scale * 0.5, extent, scale);
            obj.rotation = rng.gen_range(0.0..360.0);
            objects.push(obj);
        }
    }
    objects
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn center_accounts_for_scale() {
        let obj = AstralObject::new(
            AstralKind::Nova,
            Vector2::new(10.0, 20.0),
            Vector2::new(100.0, 50.0),
            2.0,
        );
        assert_eq!(obj.center(), Vector2::new(110.0, 70.0));
        assert!((obj.discovery_threshold(0.5) - 50.0).abs() < 1e-12);
    }

    #[test]
    fn zero_extent_has_zero_threshold() {
        let obj = AstralObject::new(AstralKind::Cloud, Vector2::zeros(), Vector2::zeros(), 1.3);
        assert_eq!(obj.discovery_threshold(0.5), 0.0);
    }

    #[test]
    fn spawn_counts_match_layout() {
        let mut rng = StdRng::seed_from_u64(1);
        let objects = spawn_objects(&mut rng, &SpawnLayout::default());
        assert_eq!(objects.len(), 14);
        for kind in AstralKind::ALL {
            let n = objects.iter().filter(|o| o.kind == kind).count();
            assert_eq!(n, kind.count());
        }
    }

    #[test]
    fn spawn_respects_rings_and_scale() {
        let mut rng = StdRng::seed_from_u64(99);
        let layout = SpawnLayout::default();
        for obj in spawn_objects(&mut rng, &layout).iter() {
            let (inner, outer) = obj.kind.spawn_ring();
            let r = obj.center().norm();
            assert!(r >= inner - 1e-6 && r <= outer + 1e-6, "{} at {r}", obj.kind);
            assert!(obj.scale >= 0.5 && obj.scale < 1.5);
            assert!(!obj.discovered);
            assert_eq!(obj.score_value, obj.kind.score());
        }
    }

    #[test]
    fn same_seed_same_field() {
        let layout = SpawnLayout::default();
        let a = spawn_objects(&mut StdRng::seed_from_u64(7), &layout);
        let b = spawn_objects(&mut StdRng::seed_from_u64(7), &layout);
        let c = spawn_objects(&mut StdRng::seed_from_u64(8), &layout);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
