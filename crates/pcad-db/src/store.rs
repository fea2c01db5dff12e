//! The keyed entity store shared by the validation stages.

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

use crate::records::{
    Board, BoardId, Component, ComponentId, Cutout, CutoutId, CutoutShape, GroupRef, Hole, HoleId,
    HoleShape, Layer, OverlapViolation, Pad, PadId, SubcircuitRef, ViolationId,
};
use pcad_math::Point2D;

/// Errors raised by strict store accessors.
#[derive(Error, Debug)]
pub enum DbError {
    /// A record id did not resolve (deleted or never allocated).
    #[error("no record with id {0}")]
    Missing(String),
}

/// A keyed collection of one record kind.
///
/// Ids are allocated from a monotonic counter and never reused, so a
/// deleted id stays invalid forever. Listing iterates in ascending id
/// order, which keeps every downstream pass deterministic.
#[derive(Debug, Clone)]
pub struct Table<K, V> {
    rows: BTreeMap<K, V>,
    next: u64,
}

impl<K: Copy + Ord + From<u64> + fmt::Display, V> Table<K, V> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
            next: 0,
        }
    }

    /// Allocate a fresh id and insert the record built from it.
    ///
    /// The builder receives the allocated id so the record can carry it.
    pub fn insert_with(&mut self, build: impl FnOnce(K) -> V) -> K {
        let id = K::from(self.next);
        self.next += 1;
        self.rows.insert(id, build(id));
        id
    }

    /// Look up a record, returning `None` for stale or unknown ids.
    pub fn get(&self, id: K) -> Option<&V> {
        self.rows.get(&id)
    }

    /// Mutable lookup.
    pub fn get_mut(&mut self, id: K) -> Option<&mut V> {
        self.rows.get_mut(&id)
    }

    /// Look up a record, treating absence as an error.
    pub fn try_get(&self, id: K) -> Result<&V, DbError> {
        self.rows.get(&id).ok_or_else(|| DbError::Missing(id.to_string()))
    }

    /// Iterate records in ascending id order.
    pub fn list(&self) -> impl Iterator<Item = &V> {
        self.rows.values()
    }

    /// Iterate ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = K> + '_ {
        self.rows.keys().copied()
    }

    /// Delete a record. Returns false if the id did not resolve.
    /// The id is never reused.
    pub fn delete(&mut self, id: K) -> bool {
        self.rows.remove(&id).is_some()
    }

    /// Number of live records.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if the table holds no records.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<K: Copy + Ord + From<u64> + fmt::Display, V> Default for Table<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// The shared entity store: one table per record kind.
///
/// Holes and pads are created by the rendering pipeline before the
/// validation stages run; cutouts and violations are created exclusively
/// by those stages.
#[derive(Debug, Clone, Default)]
pub struct CircuitDb {
    /// Board outline records.
    pub boards: Table<BoardId, Board>,
    /// Drilled hole records.
    pub holes: Table<HoleId, Hole>,
    /// Cutout records.
    pub cutouts: Table<CutoutId, Cutout>,
    /// Pad records.
    pub pads: Table<PadId, Pad>,
    /// Component records.
    pub components: Table<ComponentId, Component>,
    /// Overlap violation records.
    pub violations: Table<ViolationId, OverlapViolation>,
}

impl CircuitDb {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a board outline record.
    pub fn add_board(&mut self, center: Point2D, width: f64, height: f64) -> BoardId {
        self.boards.insert_with(|id| Board {
            id,
            center,
            width,
            height,
        })
    }

    /// Insert a hole record with group/subcircuit associations.
    pub fn add_hole(
        &mut self,
        shape: HoleShape,
        group: Option<GroupRef>,
        subcircuit: Option<SubcircuitRef>,
    ) -> HoleId {
        self.holes.insert_with(|id| Hole {
            id,
            shape,
            group,
            subcircuit,
        })
    }

    /// Insert an unassociated circular hole.
    pub fn add_circular_hole(&mut self, center: Point2D, diameter: f64) -> HoleId {
        self.add_hole(HoleShape::Circle { center, diameter }, None, None)
    }

    /// Insert a cutout record.
    pub fn add_cutout(
        &mut self,
        shape: CutoutShape,
        group: Option<GroupRef>,
        subcircuit: Option<SubcircuitRef>,
    ) -> CutoutId {
        self.cutouts.insert_with(|id| Cutout {
            id,
            shape,
            group,
            subcircuit,
        })
    }

    /// Insert a component placement with no pads yet.
    pub fn add_component(&mut self, name: &str, center: Point2D, rotation_deg: f64) -> ComponentId {
        self.components.insert_with(|id| Component {
            id,
            name: name.to_owned(),
            center,
            rotation_deg,
            pads: Vec::new(),
        })
    }

    /// Insert a pad and register it on its owning component.
    pub fn add_pad(
        &mut self,
        component: ComponentId,
        layer: Layer,
        center: Point2D,
        width: f64,
        height: f64,
        rotation_deg: f64,
    ) -> PadId {
        let id = self.pads.insert_with(|id| Pad {
            id,
            component,
            layer,
            center,
            width,
            height,
            rotation_deg,
        });
        if let Some(owner) = self.components.get_mut(component) {
            owner.pads.push(id);
        }
        id
    }

    /// Insert an overlap violation record.
    pub fn add_violation(&mut self, message: String, pad_ids: [PadId; 2]) -> ViolationId {
        self.violations.insert_with(|id| OverlapViolation {
            id,
            message,
            pad_ids,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_never_reused() {
        let mut db = CircuitDb::new();
        let a = db.add_circular_hole(Point2D::ORIGIN, 1.0);
        assert!(db.holes.delete(a));
        let b = db.add_circular_hole(Point2D::ORIGIN, 1.0);
        assert_ne!(a, b);
        assert!(db.holes.get(a).is_none());
        assert!(db.holes.get(b).is_some());
    }

    #[test]
    fn test_delete_is_permanent() {
        let mut db = CircuitDb::new();
        let id = db.add_circular_hole(Point2D::ORIGIN, 1.0);
        assert!(db.holes.delete(id));
        assert!(!db.holes.delete(id));
        assert!(db.holes.try_get(id).is_err());
    }

    #[test]
    fn test_list_is_id_ordered() {
        let mut db = CircuitDb::new();
        for i in 0..5 {
            db.add_circular_hole(Point2D::new(i as f64, 0.0), 1.0);
        }
        let xs: Vec<f64> = db
            .holes
            .list()
            .map(|h| match h.shape {
                HoleShape::Circle { center, .. } => center.x,
            })
            .collect();
        assert_eq!(xs, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_add_pad_registers_on_component() {
        let mut db = CircuitDb::new();
        let c = db.add_component("R1", Point2D::ORIGIN, 0.0);
        let p1 = db.add_pad(c, Layer::Top, Point2D::new(-0.5, 0.0), 0.5, 0.6, 0.0);
        let p2 = db.add_pad(c, Layer::Top, Point2D::new(0.5, 0.0), 0.5, 0.6, 0.0);
        assert_eq!(db.components.get(c).unwrap().pads, vec![p1, p2]);
    }

    #[test]
    fn test_try_get_reports_missing_id() {
        let db = CircuitDb::new();
        let err = db.boards.try_get(BoardId(7)).unwrap_err();
        assert_eq!(err.to_string(), "no record with id board_7");
    }
}
