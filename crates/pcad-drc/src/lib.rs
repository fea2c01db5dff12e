#![warn(missing_docs)]

//! Pad overlap design-rule check.
//!
//! Finds every pair of pads on the same copper layer, belonging to two
//! different components, whose footprints intersect with positive area.
//! Footprints are oriented rectangles tested with the separating-axis
//! method; touching along an edge or corner is not an overlap.
//!
//! Pairs within one component are never checked: a component's own pads
//! are taken as non-conflicting by construction.
//!
//! Candidate pairs are enumerated in ascending pad id order per layer and
//! may be tested in parallel; findings are sorted back into id order so
//! the output is reproducible for a given input.

use rayon::prelude::*;
use std::collections::BTreeMap;

use pcad_db::{CircuitDb, ComponentId, Layer, Pad, PadId, ViolationId};
use pcad_math::{OrientedRect, Tolerance};

/// One overlapping pad pair, before it is persisted as a violation record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PadOverlap {
    /// The two offending pads, in ascending id order.
    pub pad_ids: [PadId; 2],
    /// Human-readable description. Always contains "overlap".
    pub message: String,
}

/// The oriented-rectangle footprint of a pad.
pub fn pad_footprint(pad: &Pad) -> OrientedRect {
    OrientedRect::from_center_size(
        pad.center.into(),
        pad.width,
        pad.height,
        pad.rotation_deg.to_radians(),
    )
}

/// Find all illegal pad overlaps. Pure read of the store.
///
/// Findings are ordered ascending by `(min pad id, max pad id)`.
pub fn find_pad_overlaps(db: &CircuitDb) -> Vec<PadOverlap> {
    let tol = Tolerance::DEFAULT;

    // Only same-layer pads can physically overlap
    let mut by_layer: BTreeMap<Layer, Vec<&Pad>> = BTreeMap::new();
    for pad in db.pads.list() {
        by_layer.entry(pad.layer).or_default().push(pad);
    }

    let mut pairs: Vec<(&Pad, &Pad)> = Vec::new();
    for pads in by_layer.values() {
        for (i, a) in pads.iter().enumerate() {
            for b in &pads[i + 1..] {
                if a.component != b.component {
                    pairs.push((a, b));
                }
            }
        }
    }

    let mut found: Vec<PadOverlap> = pairs
        .par_iter()
        .filter_map(|&(a, b)| {
            pad_footprint(a)
                .overlaps(&pad_footprint(b), tol.linear)
                .then(|| overlap_finding(db, a, b))
        })
        .collect();

    // Parallel evaluation must not leak into the output order
    found.sort_by_key(|o| o.pad_ids);
    found
}

/// Find all illegal pad overlaps and persist them as violation records.
pub fn record_pad_overlaps(db: &mut CircuitDb) -> Vec<ViolationId> {
    let found = find_pad_overlaps(db);
    found
        .into_iter()
        .map(|o| db.add_violation(o.message, o.pad_ids))
        .collect()
}

fn overlap_finding(db: &CircuitDb, a: &Pad, b: &Pad) -> PadOverlap {
    let (a, b) = if a.id <= b.id { (a, b) } else { (b, a) };
    let name = |c: ComponentId| {
        db.components
            .get(c)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| c.to_string())
    };
    PadOverlap {
        pad_ids: [a.id, b.id],
        message: format!(
            "{} of {} overlaps {} of {}",
            a.id,
            name(a.component),
            b.id,
            name(b.component)
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pcad_math::Point2D;

    fn two_pad_component(
        db: &mut CircuitDb,
        name: &str,
        center: Point2D,
        rotation_deg: f64,
        layer: Layer,
    ) -> (ComponentId, PadId, PadId) {
        // 0402-style footprint: 0.5 x 0.6 mm pads 1mm apart, rotated with
        // the component body
        let c = db.add_component(name, center, rotation_deg);
        let rot = rotation_deg.to_radians();
        let (s, cos) = rot.sin_cos();
        let offset = |dx: f64| Point2D::new(center.x + dx * cos, center.y + dx * s);
        let p1 = db.add_pad(c, layer, offset(-0.5), 0.5, 0.6, rotation_deg);
        let p2 = db.add_pad(c, layer, offset(0.5), 0.5, 0.6, rotation_deg);
        (c, p1, p2)
    }

    #[test]
    fn test_overlapping_pads_of_two_components() {
        let mut db = CircuitDb::new();
        let c1 = db.add_component("R1", Point2D::ORIGIN, 0.0);
        let c2 = db.add_component("R2", Point2D::new(0.4, 0.0), 0.0);
        let a = db.add_pad(c1, Layer::Top, Point2D::ORIGIN, 0.5, 0.6, 0.0);
        let b = db.add_pad(c2, Layer::Top, Point2D::new(0.4, 0.0), 0.5, 0.6, 0.0);

        let found = find_pad_overlaps(&db);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].pad_ids, [a, b]);
        assert!(found[0].message.contains("overlap"));
        assert!(found[0].message.contains("R1"));
        assert!(found[0].message.contains("R2"));
    }

    #[test]
    fn test_same_component_pads_are_skipped() {
        let mut db = CircuitDb::new();
        let c = db.add_component("U1", Point2D::ORIGIN, 0.0);
        db.add_pad(c, Layer::Top, Point2D::ORIGIN, 1.0, 1.0, 0.0);
        db.add_pad(c, Layer::Top, Point2D::new(0.2, 0.0), 1.0, 1.0, 0.0);

        assert!(find_pad_overlaps(&db).is_empty());
    }

    #[test]
    fn test_different_layers_never_overlap() {
        let mut db = CircuitDb::new();
        let c1 = db.add_component("R1", Point2D::ORIGIN, 0.0);
        let c2 = db.add_component("R2", Point2D::ORIGIN, 0.0);
        db.add_pad(c1, Layer::Top, Point2D::ORIGIN, 1.0, 1.0, 0.0);
        db.add_pad(c2, Layer::Bottom, Point2D::ORIGIN, 1.0, 1.0, 0.0);

        assert!(find_pad_overlaps(&db).is_empty());
    }

    #[test]
    fn test_touching_pads_are_not_flagged() {
        let mut db = CircuitDb::new();
        let c1 = db.add_component("R1", Point2D::ORIGIN, 0.0);
        let c2 = db.add_component("R2", Point2D::new(1.0, 0.0), 0.0);
        // Shared edge at x = 0.5, zero-area contact
        db.add_pad(c1, Layer::Top, Point2D::ORIGIN, 1.0, 1.0, 0.0);
        db.add_pad(c2, Layer::Top, Point2D::new(1.0, 0.0), 1.0, 1.0, 0.0);

        assert!(find_pad_overlaps(&db).is_empty());
    }

    #[test]
    fn test_rotated_pad_overlap() {
        let mut db = CircuitDb::new();
        let c1 = db.add_component("R1", Point2D::ORIGIN, 0.0);
        let c2 = db.add_component("R2", Point2D::new(0.5, 0.0), 90.0);
        let a = db.add_pad(c1, Layer::Top, Point2D::ORIGIN, 1.0, 0.4, 0.0);
        let b = db.add_pad(c2, Layer::Top, Point2D::new(0.5, 0.0), 1.0, 0.4, 90.0);

        let found = find_pad_overlaps(&db);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].pad_ids, [a, b]);
    }

    #[test]
    fn test_symmetry_does_not_depend_on_insertion_order() {
        let mut db1 = CircuitDb::new();
        let c1 = db1.add_component("R1", Point2D::ORIGIN, 0.0);
        let c2 = db1.add_component("R2", Point2D::new(0.4, 0.0), 0.0);
        db1.add_pad(c1, Layer::Top, Point2D::ORIGIN, 0.5, 0.6, 0.0);
        db1.add_pad(c2, Layer::Top, Point2D::new(0.4, 0.0), 0.5, 0.6, 0.0);

        let mut db2 = CircuitDb::new();
        let c2 = db2.add_component("R2", Point2D::new(0.4, 0.0), 0.0);
        let c1 = db2.add_component("R1", Point2D::ORIGIN, 0.0);
        db2.add_pad(c2, Layer::Top, Point2D::new(0.4, 0.0), 0.5, 0.6, 0.0);
        db2.add_pad(c1, Layer::Top, Point2D::ORIGIN, 0.5, 0.6, 0.0);

        assert_eq!(find_pad_overlaps(&db1).len(), 1);
        assert_eq!(find_pad_overlaps(&db2).len(), 1);
    }

    #[test]
    fn test_close_resistors_produce_two_overlaps() {
        // Two 0402 footprints 0.8mm apart, one rotated 90°: both pads of
        // the rotated part reach into the neighbor's right pad region
        let mut db = CircuitDb::new();
        two_pad_component(&mut db, "R1", Point2D::ORIGIN, 0.0, Layer::Top);
        two_pad_component(&mut db, "R2", Point2D::new(0.8, 0.0), 90.0, Layer::Top);
        two_pad_component(&mut db, "R3", Point2D::new(-5.0, 5.0), 0.0, Layer::Top);
        two_pad_component(&mut db, "R4", Point2D::new(5.0, 5.0), 0.0, Layer::Top);

        let found = find_pad_overlaps(&db);
        assert_eq!(found.len(), 2);
        for f in &found {
            assert!(f.message.contains("overlap"));
            assert_ne!(f.pad_ids[0], f.pad_ids[1]);
        }
        // Deterministic ordering
        assert!(found[0].pad_ids < found[1].pad_ids);
    }

    #[test]
    fn test_record_pad_overlaps_persists_violations() {
        let mut db = CircuitDb::new();
        let c1 = db.add_component("R1", Point2D::ORIGIN, 0.0);
        let c2 = db.add_component("R2", Point2D::new(0.4, 0.0), 0.0);
        db.add_pad(c1, Layer::Top, Point2D::ORIGIN, 0.5, 0.6, 0.0);
        db.add_pad(c2, Layer::Top, Point2D::new(0.4, 0.0), 0.5, 0.6, 0.0);

        let ids = record_pad_overlaps(&mut db);
        assert_eq!(ids.len(), 1);
        let v = db.violations.get(ids[0]).unwrap();
        assert!(v.message.contains("overlap"));
        assert_eq!(v.pad_ids.len(), 2);
    }
}
