use log::{debug, info};
use nalgebra::Vector2;
use serde::Serialize;

use super::objects::{AstralKind, AstralObject};
use crate::config::SimConfig;

// ---------------------------------------------------------------------------
// Aggregate score state
// ---------------------------------------------------------------------------

/// Running discovery tallies. Only ever incremented.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DiscoveryAggregate {
    pub discovered: [u32; 4],
    pub total: [u32; 4],
    pub score: [u32; 4],
    pub total_discovered: u32,
    pub total_score: u32,
    /// Set once, when every object has been found.
    pub completed: bool,
}

impl DiscoveryAggregate {
    /// Zeroed tallies with per-kind totals taken from the field.
    pub fn new(objects: &[AstralObject]) -> Self {
        let mut agg = Self::default();
        for obj in objects {
            agg.total[obj.kind.index()] += 1;
        }
        agg
    }

    pub fn total_objects(&self) -> u32 {
        self.total.iter().sum()
    }

    pub fn discovered_of(&self, kind: AstralKind) -> u32 {
        self.discovered[kind.index()]
    }

    pub fn kind_complete(&self, kind: AstralKind) -> bool {
        self.discovered[kind.index()] >= self.total[kind.index()]
    }

    fn record(&mut self, obj: &AstralObject) {
        let i = obj.kind.index();
        self.discovered[i] += 1;
        self.score[i] += obj.score_value;
        self.total_discovered += 1;
        self.total_score += obj.score_value;
    }
}

// ---------------------------------------------------------------------------
// Proximity scan
// ---------------------------------------------------------------------------

/// Outcome of one scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scan {
    pub newly_discovered: usize,
    /// True only for the scan in which the field became fully discovered.
    pub completed: bool,
}

#[derive(Debug, Clone)]
pub struct DiscoveryTracker {
    /// Fraction of an object's smaller scaled side used as the find radius.
    pub proximity_fraction: f64,
}

impl DiscoveryTracker {
    pub fn new(config: &SimConfig) -> Self {
        Self { proximity_fraction: config.discovery_fraction }
    }

    /// Flag every undiscovered object the craft is close enough to and
    /// update the tallies. Already-discovered objects are never touched.
    pub fn scan(
        &self,
        craft_pos: &Vector2<f64>,
        objects: &mut [AstralObject],
        aggregate: &mut DiscoveryAggregate,
    ) -> Scan {
        let mut newly_discovered = 0;

        for obj in objects.iter_mut().filter(|o| !o.discovered) {
            let threshold = obj.discovery_threshold(self.proximity_fraction);
            let distance2 = (obj.center() - craft_pos).norm_squared();
            if distance2 < threshold * threshold {
                obj.discovered = true;
                aggregate.record(obj);
                newly_discovered += 1;
                info!(
                    "discovered {} (+{}), {}/{} found",
                    obj.kind,
                    obj.score_value,
                    aggregate.total_discovered,
                    aggregate.total_objects()
                );
            }
        }

        let mut completed = false;
        let total = aggregate.total_objects();
        if !aggregate.completed && total > 0 && aggregate.total_discovered == total {
            aggregate.completed = true;
            completed = true;
            info!("all {} objects discovered, score {}", total, aggregate.total_score);
        } else if newly_discovered > 0 {
            debug!("scan found {} new object(s)", newly_discovered);
        }

        Scan { newly_discovered, completed }
    }
}

impl Default for DiscoveryTracker {
    fn default() -> Self {
        Self::new(&SimConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nova_at(center: Vector2<f64>) -> AstralObject {
        let extent = Vector2::new(100.0, 100.0);
        AstralObject::new(AstralKind::Nova, center - extent * 0.5, extent, 1.0)
    }

    #[test]
    fn close_pass_discovers_once() {
        let tracker = DiscoveryTracker::default();
        let mut objects = vec![nova_at(Vector2::new(40.0, 0.0))];
        let mut agg = DiscoveryAggregate::new(&objects);
        let craft = Vector2::zeros();

        let first = tracker.scan(&craft, &mut objects, &mut agg);
        assert_eq!(first.newly_discovered, 1);
        assert!(objects[0].discovered);
        assert_eq!(agg.discovered_of(AstralKind::Nova), 1);
        assert_eq!(agg.score[AstralKind::Nova.index()], 150);

        let second = tracker.scan(&craft, &mut objects, &mut agg);
        assert_eq!(second.newly_discovered, 0);
        assert_eq!(agg.discovered_of(AstralKind::Nova), 1);
        assert_eq!(agg.total_score, 150);
    }

    #[test]
    fn far_object_stays_hidden() {
        let tracker = DiscoveryTracker::default();
        let mut objects = vec![nova_at(Vector2::new(60.0, 0.0))];
        let mut agg = DiscoveryAggregate::new(&objects);
        let scan = tracker.scan(&Vector2::zeros(), &mut objects, &mut agg);
        assert_eq!(scan.newly_discovered, 0);
        assert!(!objects[0].discovered);
    }

    #[test]
    fn zero_sized_object_is_undiscoverable() {
        let tracker = DiscoveryTracker::default();
        let mut objects = vec![AstralObject::new(
            AstralKind::Vortex,
            Vector2::zeros(),
            Vector2::zeros(),
            1.0,
        )];
        let mut agg = DiscoveryAggregate::new(&objects);
        let scan = tracker.scan(&Vector2::zeros(), &mut objects, &mut agg);
        assert_eq!(scan.newly_discovered, 0);
        assert!(!agg.completed);

        objects[0].set_extent(10.0, 10.0);
        let scan = tracker.scan(&Vector2::new(5.0, 5.0), &mut objects, &mut agg);
        assert_eq!(scan.newly_discovered, 1);
    }

    #[test]
    fn completion_fires_exactly_once() {
        let tracker = DiscoveryTracker::default();
        let mut objects = vec![nova_at(Vector2::zeros()), nova_at(Vector2::new(500.0, 0.0))];
        let mut agg = DiscoveryAggregate::new(&objects);

        let a = tracker.scan(&Vector2::zeros(), &mut objects, &mut agg);
        assert_eq!(a, Scan { newly_discovered: 1, completed: false });

        let b = tracker.scan(&Vector2::new(500.0, 0.0), &mut objects, &mut agg);
        assert_eq!(b, Scan { newly_discovered: 1, completed: true });
        assert!(agg.completed);
        let score = agg.total_score;

        for pos in [Vector2::zeros(), Vector2::new(500.0, 0.0)] {
            let again = tracker.scan(&pos, &mut objects, &mut agg);
            assert_eq!(again, Scan::default());
        }
        assert!(agg.completed);
        assert_eq!(agg.total_score, score);
    }

    #[test]
    fn global_count_is_sum_of_kinds() {
        let tracker = DiscoveryTracker::default();
        let mut objects = vec![
            nova_at(Vector2::zeros()),
            AstralObject::new(AstralKind::Cloud, Vector2::new(-60.0, -40.0), Vector2::new(120.0, 80.0), 1.0),
            nova_at(Vector2::new(9_000.0, 0.0)),
        ];
        let mut agg = DiscoveryAggregate::new(&objects);
        tracker.scan(&Vector2::zeros(), &mut objects, &mut agg);
        assert_eq!(agg.total_discovered, agg.discovered.iter().sum::<u32>());
        assert_eq!(agg.total_discovered, 2);
        assert_eq!(agg.total_score, 150 + 100);
        assert!(agg.kind_complete(AstralKind::Cloud));
        assert!(!agg.kind_complete(AstralKind::Nova));
    }

    #[test]
    fn empty_field_never_completes() {
        let tracker = DiscoveryTracker::default();
        let mut agg = DiscoveryAggregate::new(&[]);
        let scan = tracker.scan(&Vector2::zeros(), &mut [], &mut agg);
        assert!(!scan.completed);
        assert!(!agg.completed);
    }
}
